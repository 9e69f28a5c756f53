//! 控制台展示层：行交互实现
//!
//! stdin 由内部 Mutex 独占：命令行读取与表单收集共用同一个行读取器，
//! 主循环在工作流收敛（input_locked 解除）前不会再碰 stdin。
//! 纯胶水层，不持有引擎状态。

use std::io::Write;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::{mpsc, watch, Mutex};

use async_trait::async_trait;

use crate::chain::Activity;
use crate::core::{Command, SessionPhase, UiState};
use crate::recommend::{
    DifficultyFeel, FormAnswers, IndependenceLevel, PredictionResponse, PromptLevel, TimeFit,
};
use crate::ui::Presentation;

/// 控制台实现：共享的 stdin 行读取器
pub struct ConsolePresentation {
    lines: Mutex<Lines<BufReader<Stdin>>>,
}

impl ConsolePresentation {
    pub fn new() -> Self {
        Self {
            lines: Mutex::new(BufReader::new(tokio::io::stdin()).lines()),
        }
    }

    async fn next_line(&self) -> Option<String> {
        self.lines.lock().await.next_line().await.ok().flatten()
    }

    /// 打印提示并读一行；EOF 返回 None
    async fn ask(&self, prompt: &str) -> Option<String> {
        print!("{} ", prompt);
        let _ = std::io::stdout().flush();
        self.next_line().await
    }
}

impl Default for ConsolePresentation {
    fn default() -> Self {
        Self::new()
    }
}

fn is_cancel(input: &str) -> bool {
    input.eq_ignore_ascii_case("q")
}

fn parse_yes_no(input: &str, default: bool) -> bool {
    match input.to_lowercase().as_str() {
        "y" | "yes" | "是" => true,
        "n" | "no" | "否" => false,
        _ => default,
    }
}

fn parse_rating(input: &str) -> f64 {
    let v = input.parse::<f64>().unwrap_or(3.0).clamp(1.0, 5.0);
    (v * 10.0).round() / 10.0
}

fn parse_level(input: &str, default: PromptLevel) -> PromptLevel {
    match input {
        "low" => PromptLevel::Low,
        "medium" => PromptLevel::Medium,
        "high" => PromptLevel::High,
        _ => default,
    }
}

fn parse_independence(input: &str) -> IndependenceLevel {
    match input {
        "low" => IndependenceLevel::Low,
        "high" => IndependenceLevel::High,
        _ => IndependenceLevel::Medium,
    }
}

fn parse_difficulty(input: &str) -> DifficultyFeel {
    match input {
        "too_easy" => DifficultyFeel::TooEasy,
        "too_hard" => DifficultyFeel::TooHard,
        _ => DifficultyFeel::Ok,
    }
}

fn parse_time_fit(input: &str) -> TimeFit {
    match input {
        "too_short" => TimeFit::TooShort,
        "too_long" => TimeFit::TooLong,
        "mismatch" => TimeFit::Mismatch,
        _ => TimeFit::Ok,
    }
}

#[async_trait]
impl Presentation for ConsolePresentation {
    async fn render_chain(&self, chain: &[Activity]) {
        println!("—— 推荐链 ——");
        for (i, a) in chain.iter().enumerate() {
            let marker = if i + 1 == chain.len() { "  ← 当前" } else { "" };
            println!("{:>2}. {} ({}){}", i + 1, a.name, a.id, marker);
        }
    }

    async fn collect_finish_form(&self, activity_id: &str) -> Option<FormAnswers> {
        println!("完成活动 {}，请填写反馈（直接回车取默认值，输入 q 取消）", activity_id);

        let line = self.ask("完成了吗? [Y/n]").await?.trim().to_string();
        if is_cancel(&line) {
            return None;
        }
        let session_completed = parse_yes_no(&line, true);

        let line = self.ask("投入度 1.0-5.0 [3.0]:").await?.trim().to_string();
        if is_cancel(&line) {
            return None;
        }
        let engagement_rating = parse_rating(&line);

        let line = self.ask("独立程度 low/medium/high [medium]:").await?.trim().to_string();
        if is_cancel(&line) {
            return None;
        }
        let independence_level = parse_independence(&line);

        let line = self.ask("难度体感 too_easy/ok/too_hard [ok]:").await?.trim().to_string();
        if is_cancel(&line) {
            return None;
        }
        let difficulty_feel = parse_difficulty(&line);

        let line = self.ask("有行为问题? [y/N]").await?.trim().to_string();
        if is_cancel(&line) {
            return None;
        }
        let behavior_issue = parse_yes_no(&line, false);

        let line = self.ask("孩子偏好（可空）:").await?.trim().to_string();
        if is_cancel(&line) {
            return None;
        }
        let child_preference = line;

        let line = self
            .ask("时长匹配 ok/too_short/too_long/mismatch [ok]:").await?
            .trim()
            .to_string();
        if is_cancel(&line) {
            return None;
        }
        let time_fit = parse_time_fit(&line);

        let line = self.ask("最大辅助等级 low/medium/high [medium]:").await?.trim().to_string();
        if is_cancel(&line) {
            return None;
        }
        let prompts_used_max = parse_level(&line, PromptLevel::Medium);

        let line = self.ask("看到泛化表现? [y/N]").await?.trim().to_string();
        if is_cancel(&line) {
            return None;
        }
        let generalization_seen = parse_yes_no(&line, false);

        Some(FormAnswers {
            session_completed,
            engagement_rating,
            independence_level,
            difficulty_feel,
            behavior_issue,
            child_preference,
            time_fit,
            prompts_used_max,
            generalization_seen,
        })
    }

    async fn show_result(&self, response: &PredictionResponse) {
        match &response.top1_recommendation {
            Some(top1) => {
                let name = top1.name.as_deref().unwrap_or(&top1.activity_id);
                println!("推荐下一个活动：{} ({})，prob={:.2}", name, top1.activity_id, top1.prob);
                if let Some(desc) = &top1.description {
                    println!("  说明：{}", desc);
                }
                if let Some(plan) = &top1.weekly_plan {
                    println!("  周计划：{}", plan);
                }
            }
            None => println!("本次没有新的推荐，链保持不变"),
        }
        if !response.follow_up_questions.is_empty() {
            println!("追问：");
            for q in &response.follow_up_questions {
                println!("  - {}", q);
            }
        }
    }

    async fn show_error(&self, message: &str) {
        println!("请求失败：{}（链未改动，可重试）", message);
    }
}

/// 等待工作流收敛（调用方需先 borrow_and_update 再发命令）
async fn wait_settled(state_rx: &mut watch::Receiver<UiState>) {
    loop {
        if state_rx.changed().await.is_err() {
            return;
        }
        let state = state_rx.borrow();
        let in_flight = state.input_locked
            || matches!(
                state.phase,
                SessionPhase::AwaitingFinishInput | SessionPhase::Submitting
            );
        if !in_flight {
            return;
        }
    }
}

/// 控制台主循环：读命令、发给编排器、等工作流收敛后再读下一条
pub async fn run_console(
    console: Arc<ConsolePresentation>,
    cmd_tx: mpsc::UnboundedSender<Command>,
    mut state_rx: watch::Receiver<UiState>,
) -> anyhow::Result<()> {
    println!("命令：f [序号] = 完成（始终基于当前活动），r = 重置，q = 退出");
    loop {
        // 标记当前版本已读：之后等待的都是本次命令引发的投影
        state_rx.borrow_and_update();
        let Some(line) = console.ask(">").await else {
            break;
        };
        let line = line.trim().to_string();
        if line.is_empty() {
            continue;
        }
        let mut parts = line.split_whitespace();
        match parts.next().unwrap_or("") {
            "q" | "quit" => {
                let _ = cmd_tx.send(Command::Quit);
                break;
            }
            "r" | "reset" => {
                if cmd_tx.send(Command::Reset).is_err() {
                    break;
                }
                wait_settled(&mut state_rx).await;
            }
            "f" | "finish" => {
                let tapped_id = parts
                    .next()
                    .and_then(|s| s.parse::<usize>().ok())
                    .and_then(|i| {
                        let state = state_rx.borrow();
                        state.chain.get(i.saturating_sub(1)).map(|a| a.id.clone())
                    });
                if cmd_tx.send(Command::Finish { tapped_id }).is_err() {
                    break;
                }
                wait_settled(&mut state_rx).await;
            }
            other => println!("未知命令：{}", other),
        }
    }
    Ok(())
}
