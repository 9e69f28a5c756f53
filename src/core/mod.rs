//! 核心：错误、状态与会话编排

pub mod error;
pub mod orchestrator;
pub mod state;

pub use error::WorkflowError;
pub use orchestrator::{create_engine, Command};
pub use state::{SessionPhase, UiState};
