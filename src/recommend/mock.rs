//! Mock 推荐服务（用于测试，无需网络）
//!
//! 按预置队列依次吐出结果，并记录收到的每个请求，便于断言 context 与排除集。

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::core::WorkflowError;
use crate::recommend::{PredictOptions, PredictionResponse, RecommendService};

/// Mock 收到的一次请求快照
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub context: Map<String, Value>,
    pub opts: PredictOptions,
    pub exclude_ids: Vec<String>,
}

/// Mock 客户端：预置响应队列 + 请求记录；队列耗尽时返回空响应
#[derive(Default)]
pub struct MockRecommendService {
    responses: Mutex<VecDeque<Result<PredictionResponse, WorkflowError>>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockRecommendService {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加一个预置结果（成功或失败）
    pub fn push_result(&self, result: Result<PredictionResponse, WorkflowError>) {
        self.responses.lock().unwrap().push_back(result);
    }

    /// 取出已记录的请求
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl RecommendService for MockRecommendService {
    async fn predict(
        &self,
        context: Map<String, Value>,
        opts: PredictOptions,
        exclude_ids: Vec<String>,
    ) -> Result<PredictionResponse, WorkflowError> {
        self.requests.lock().unwrap().push(RecordedRequest {
            context,
            opts,
            exclude_ids,
        });
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(PredictionResponse::default()))
    }
}
