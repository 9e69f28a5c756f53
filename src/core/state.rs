//! 会话状态定义与 UI 投影
//!
//! 编排器持有权威的链；UI 只拿到不可变的 UiState 快照（阶段、链、输入锁、错误），
//! 每次迁移后整体替换，渲染方不共享可变状态。

use serde::Serialize;

use crate::chain::Activity;

/// 会话阶段
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum SessionPhase {
    Uninitialized,
    Bootstrapped,
    AwaitingFinishInput,
    Submitting,
    /// 请求成功（链可能未延长：服务端可返回空 top1）
    Extended,
    Failed,
}

/// UI 看到的「投影」状态
#[derive(Clone, Debug, Serialize)]
pub struct UiState {
    pub phase: SessionPhase,
    pub chain: Vec<Activity>,
    /// 完成工作流进行中时为 true；UI 不应再发起新的完成操作
    pub input_locked: bool,
    pub error_message: Option<String>,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            phase: SessionPhase::Uninitialized,
            chain: Vec::new(),
            input_locked: false,
            error_message: None,
        }
    }
}
