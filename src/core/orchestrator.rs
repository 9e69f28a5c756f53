//! 会话编排器：完成工作流状态机
//!
//! 负责：启动引导（加载或播种链）、完成工作流（收集表单 -> 计算排除集 -> 请求推荐 ->
//! 标记完成并延长链）、重置；通过 cmd/state 两通道与展示层交互。
//!
//! 并发约束：命令由唯一的后台任务逐条消费，完成工作流天然串行；UiState.input_locked
//! 同时告知展示层在 Submitting 期间不要发起第二次完成。请求中途不可取消，超时按失败处理。

use std::sync::Arc;

use rand::RngCore;
use tokio::sync::{mpsc, watch};

use crate::chain::{seed_activity, Activity, ChainStore};
use crate::core::{SessionPhase, UiState, WorkflowError};
use crate::recommend::{PredictOptions, RecommendService};
use crate::ui::Presentation;

/// 从展示层发往编排器的用户命令
#[derive(Debug, Clone)]
pub enum Command {
    /// 对某张卡片发起「完成」；tapped_id 仅用于日志，请求一律使用链尾活动
    Finish { tapped_id: Option<String> },
    /// 清空链与已完成集合并重新播种
    Reset,
    /// 退出
    Quit,
}

/// 计算排除集：{链尾活动 id} ∪ 已完成集合，去重；顺序对服务端无意义
fn exclusion_ids(frontier_id: &str, finished: Vec<String>) -> Vec<String> {
    let mut ids = finished;
    if !ids.iter().any(|f| f == frontier_id) {
        ids.push(frontier_id.to_string());
    }
    ids
}

/// 编排器内部运行时：权威链 + 各协作方句柄
struct SessionRuntime {
    store: ChainStore,
    service: Arc<dyn RecommendService>,
    presentation: Arc<dyn Presentation>,
    rng: Box<dyn RngCore + Send + Sync>,
    opts: PredictOptions,
    chain: Vec<Activity>,
    state_tx: watch::Sender<UiState>,
}

impl SessionRuntime {
    fn project(&self, phase: SessionPhase, input_locked: bool, error_message: Option<String>) {
        let _ = self.state_tx.send(UiState {
            phase,
            chain: self.chain.clone(),
            input_locked,
            error_message,
        });
    }

    /// Uninitialized -> Bootstrapped：持久化链非空则原样加载，否则播种一个默认活动并落盘
    async fn bootstrap(&mut self) -> anyhow::Result<()> {
        self.chain = self.store.load_chain();
        if self.chain.is_empty() {
            let seed = seed_activity(&mut *self.rng);
            tracing::info!(id = %seed.id, "Empty chain, seeding default activity");
            self.chain.push(seed);
            self.store.save_chain(&self.chain)?;
        } else {
            tracing::info!(len = self.chain.len(), "Loaded persisted chain");
        }
        self.project(SessionPhase::Bootstrapped, false, None);
        self.presentation.render_chain(&self.chain).await;
        Ok(())
    }

    /// 完成工作流：表单 -> 排除集 -> predict -> 标记完成 + 延长链
    ///
    /// 请求使用的活动始终是链尾（frontier），与用户点的是哪张卡片无关。
    async fn finish(&mut self, tapped_id: Option<&str>) {
        let Some(frontier) = self.chain.last().cloned() else {
            tracing::warn!("Finish requested on empty chain, ignoring");
            return;
        };
        if let Some(tapped) = tapped_id {
            if tapped != frontier.id {
                tracing::debug!(tapped = %tapped, frontier = %frontier.id, "Finish initiated from non-frontier card, using frontier");
            }
        }

        self.project(SessionPhase::AwaitingFinishInput, true, None);
        let Some(answers) = self.presentation.collect_finish_form(&frontier.id).await else {
            tracing::info!("Finish form cancelled, no state change");
            self.project(SessionPhase::Bootstrapped, false, None);
            return;
        };

        self.project(SessionPhase::Submitting, true, None);
        let exclude_ids = exclusion_ids(&frontier.id, self.store.load_finished());
        let context = answers.to_context(&frontier.id);
        tracing::info!(activity = %frontier.id, exclude = exclude_ids.len(), "Requesting next recommendation");

        match self.service.predict(context, self.opts, exclude_ids).await {
            Ok(response) => {
                if let Err(e) = self.store.mark_finished(&frontier.id) {
                    self.fail(WorkflowError::Storage(e.to_string()).to_string()).await;
                    return;
                }
                match &response.top1_recommendation {
                    Some(top1) => {
                        let next = Activity::from_recommendation(top1);
                        tracing::info!(next = %next.id, prob = top1.prob, "Chain extended");
                        self.chain.push(next);
                        if let Err(e) = self.store.save_chain(&self.chain) {
                            // 内存中的链已延长；下次启动回退到最近落盘状态
                            tracing::warn!("Failed to persist extended chain: {}", e);
                        }
                    }
                    None => {
                        tracing::info!("No top1 recommendation, chain not extended");
                    }
                }
                self.project(SessionPhase::Extended, false, None);
                self.presentation.show_result(&response).await;
                self.presentation.render_chain(&self.chain).await;
            }
            Err(e) => {
                tracing::warn!("Predict request failed: {}", e);
                self.fail(e.to_string()).await;
            }
        }
    }

    /// Submitting -> Failed：链与已完成集合保持不变，错误原样呈现，回到可重试状态
    async fn fail(&self, message: String) {
        self.project(SessionPhase::Failed, false, Some(message.clone()));
        self.presentation.show_error(&message).await;
    }

    /// 任意状态 -> Uninitialized -> Bootstrapped：清空持久化后重新引导
    async fn reset(&mut self) {
        if let Err(e) = self.store.reset_all() {
            tracing::warn!("Reset failed: {}", e);
            self.fail(WorkflowError::Storage(e.to_string()).to_string()).await;
            return;
        }
        tracing::info!("Storage cleared, re-running bootstrap");
        self.chain.clear();
        self.project(SessionPhase::Uninitialized, true, None);
        if let Err(e) = self.bootstrap().await {
            tracing::warn!("Bootstrap after reset failed: {}", e);
            self.fail(WorkflowError::Storage(e.to_string()).to_string()).await;
        }
    }
}

/// 创建会话引擎：完成引导后返回命令发送端与状态接收端；后台任务逐条消费命令。
pub async fn create_engine(
    store: ChainStore,
    service: Arc<dyn RecommendService>,
    presentation: Arc<dyn Presentation>,
    seed_rng: Box<dyn RngCore + Send + Sync>,
    opts: PredictOptions,
) -> anyhow::Result<(mpsc::UnboundedSender<Command>, watch::Receiver<UiState>)> {
    let (cmd_tx, mut cmd_rx) = mpsc::unbounded_channel::<Command>();
    let (state_tx, state_rx) = watch::channel(UiState::default());

    let mut runtime = SessionRuntime {
        store,
        service,
        presentation,
        rng: seed_rng,
        opts,
        chain: Vec::new(),
        state_tx,
    };
    runtime.bootstrap().await?;

    tokio::spawn(async move {
        while let Some(cmd) = cmd_rx.recv().await {
            match cmd {
                Command::Finish { tapped_id } => runtime.finish(tapped_id.as_deref()).await,
                Command::Reset => runtime.reset().await,
                Command::Quit => break,
            }
        }
    });

    Ok((cmd_tx, state_rx))
}
