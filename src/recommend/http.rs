//! HTTP 推荐服务客户端
//!
//! POST {base_url}/predict，Content-Type: application/json；超时由 reqwest 客户端强制（默认 15s）。
//! 非 2xx 响应保留原始状态码与 body 作为诊断；成功 body 解析失败报 ResponseDecode。

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Map, Value};

use crate::core::WorkflowError;
use crate::recommend::{PredictOptions, PredictionRequest, PredictionResponse, RecommendService};

/// HTTP 客户端：持有 reqwest Client（内置超时）与服务根地址
pub struct HttpRecommendService {
    client: Client,
    base_url: String,
}

impl HttpRecommendService {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl RecommendService for HttpRecommendService {
    async fn predict(
        &self,
        context: Map<String, Value>,
        opts: PredictOptions,
        exclude_ids: Vec<String>,
    ) -> Result<PredictionResponse, WorkflowError> {
        let request = PredictionRequest {
            top_k: opts.top_k,
            followup_n: opts.followup_n,
            context,
            exclude_ids,
        };

        tracing::debug!(
            url = %format!("{}/predict", self.base_url),
            exclude = request.exclude_ids.len(),
            "dispatching predict request"
        );

        let response = self
            .client
            .post(format!("{}/predict", self.base_url))
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    WorkflowError::NetworkTimeout
                } else {
                    WorkflowError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                WorkflowError::NetworkTimeout
            } else {
                WorkflowError::Network(e.to_string())
            }
        })?;

        if !status.is_success() {
            return Err(WorkflowError::ServerStatus {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| WorkflowError::ResponseDecode(e.to_string()))
    }
}
