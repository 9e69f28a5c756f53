//! Sprout - 活动推荐链引擎
//!
//! 管理单用户的活动推荐链：本地持久化、按「完成反馈」向远程推荐服务请求下一个活动并追加到链尾。
//!
//! 模块划分：
//! - **config**: 应用配置加载（TOML + 环境变量）
//! - **core**: 错误类型、会话状态投影、会话编排器（状态机主循环）
//! - **chain**: 活动模型、默认种子目录、链存储（ChainStore）
//! - **storage**: 持久化适配层（KvStore trait 与文件实现）
//! - **recommend**: 推荐服务客户端抽象与实现（HTTP / Mock）、请求上下文编码
//! - **ui**: 展示边界契约（渲染链、收集完成表单、展示结果/错误）与控制台实现

pub mod chain;
pub mod config;
pub mod core;
pub mod observability;
pub mod recommend;
pub mod storage;
pub mod ui;
