//! 推荐服务客户端抽象
//!
//! 所有后端（HTTP / Mock）实现 RecommendService：单次 predict 调用，
//! 不重试、不退避、不缓存；失败分类见 WorkflowError。

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::core::WorkflowError;
use crate::recommend::PredictionResponse;

/// predict 的请求参数（top_k / followup_n），来自配置
#[derive(Debug, Clone, Copy)]
pub struct PredictOptions {
    pub top_k: u32,
    pub followup_n: u32,
}

impl Default for PredictOptions {
    fn default() -> Self {
        Self {
            top_k: 5,
            followup_n: 3,
        }
    }
}

/// 推荐服务客户端 trait：单次尽力而为的预测请求
#[async_trait]
pub trait RecommendService: Send + Sync {
    /// 请求下一个推荐；context 原样作为请求体 context 字段，exclude_ids 为去重后的排除集
    async fn predict(
        &self,
        context: Map<String, Value>,
        opts: PredictOptions,
        exclude_ids: Vec<String>,
    ) -> Result<PredictionResponse, WorkflowError>;
}
