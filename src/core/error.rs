//! 工作流错误类型
//!
//! 网络/服务端/解码错误一律不自动重试，原样上抛到 Submitting -> Failed 迁移并以字符串形式
//! 呈现给用户；本地持久化的解码损坏不在此列（ChainStore 就地按空值恢复，用户无感知）。

use thiserror::Error;

/// 完成工作流中可能出现的错误（网络、服务端状态、响应解码、存储写入）
#[derive(Error, Debug)]
pub enum WorkflowError {
    #[error("Network timeout")]
    NetworkTimeout,

    #[error("Network error: {0}")]
    Network(String),

    /// 非 2xx 响应；status 与 body 原样保留用于诊断
    #[error("Server error {status}: {body}")]
    ServerStatus { status: u16, body: String },

    #[error("Response decode error: {0}")]
    ResponseDecode(String),

    #[error("Storage error: {0}")]
    Storage(String),
}
