//! 推荐服务客户端
//!
//! types：线上类型与表单编码；client：RecommendService trait；
//! http：reqwest 实现；mock：测试用实现。

pub mod client;
pub mod http;
pub mod mock;
pub mod types;

pub use client::{PredictOptions, RecommendService};
pub use http::HttpRecommendService;
pub use mock::MockRecommendService;
pub use types::{
    DifficultyFeel, FormAnswers, IndependenceLevel, PredictionRequest, PredictionResponse,
    PromptLevel, TimeFit, Top1Recommendation,
};
