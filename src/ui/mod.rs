//! 展示边界
//!
//! 编排器只通过 Presentation trait 与展示层交互：渲染链快照、收集完成表单、展示结果/错误。
//! console 为行交互的控制台实现；mock 为测试用脚本化实现。

pub mod console;
pub mod mock;

use async_trait::async_trait;

use crate::chain::Activity;
use crate::recommend::{FormAnswers, PredictionResponse};

pub use console::{run_console, ConsolePresentation};
pub use mock::ScriptedPresentation;

/// 展示层契约；所有方法只消费不可变快照，不回写引擎状态
#[async_trait]
pub trait Presentation: Send + Sync {
    /// 渲染当前链（每次迁移后编排器整体重发快照）
    async fn render_chain(&self, chain: &[Activity]);

    /// 为指定活动收集完成表单；返回 None 表示用户取消，工作流原地中止
    async fn collect_finish_form(&self, activity_id: &str) -> Option<FormAnswers>;

    /// 展示一次成功的预测结果（top1 与追问列表）
    async fn show_result(&self, response: &PredictionResponse);

    /// 展示用户可见的错误信息
    async fn show_error(&self, message: &str);
}
