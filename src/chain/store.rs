//! 链存储
//!
//! 推荐链与已完成集合的唯一事实来源。本身无状态：每次调用都直接读写 KvStore，
//! 进程任意时刻重建都安全。本地数据损坏时按空值处理（warn 级日志），不阻塞用户。

use std::sync::Arc;

use anyhow::Context;

use crate::chain::Activity;
use crate::storage::KvStore;

const KEY_CHAIN: &str = "chain";
const KEY_FINISHED: &str = "finished";

/// 链存储：持有 KvStore 句柄，负责 chain / finished 两个键的编解码与落盘
#[derive(Clone)]
pub struct ChainStore {
    kv: Arc<dyn KvStore>,
}

impl ChainStore {
    pub fn new(kv: Arc<dyn KvStore>) -> Self {
        Self { kv }
    }

    /// 读取持久化的链；键缺失或数据损坏时返回空链
    pub fn load_chain(&self) -> Vec<Activity> {
        match self.kv.get(KEY_CHAIN) {
            Ok(Some(data)) => match serde_json::from_str(&data) {
                Ok(chain) => chain,
                Err(e) => {
                    tracing::warn!("Corrupted chain data, treating as empty: {}", e);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!("Failed to read chain, treating as empty: {}", e);
                Vec::new()
            }
        }
    }

    /// 将整条链写入存储（整键替换）
    pub fn save_chain(&self, chain: &[Activity]) -> anyhow::Result<()> {
        let data = serde_json::to_string(chain).context("Encode chain")?;
        self.kv.put(KEY_CHAIN, &data)
    }

    /// 读取已完成活动 id 集合；键缺失或数据损坏时返回空集
    pub fn load_finished(&self) -> Vec<String> {
        match self.kv.get(KEY_FINISHED) {
            Ok(Some(data)) => match serde_json::from_str(&data) {
                Ok(ids) => ids,
                Err(e) => {
                    tracing::warn!("Corrupted finished set, treating as empty: {}", e);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!("Failed to read finished set, treating as empty: {}", e);
                Vec::new()
            }
        }
    }

    /// 将 id 标记为已完成；幂等，重复标记不产生重复条目
    pub fn mark_finished(&self, id: &str) -> anyhow::Result<()> {
        let mut finished = self.load_finished();
        if finished.iter().any(|f| f == id) {
            return Ok(());
        }
        finished.push(id.to_string());
        let data = serde_json::to_string(&finished).context("Encode finished set")?;
        self.kv.put(KEY_FINISHED, &data)
    }

    /// 清空链与已完成集合
    pub fn reset_all(&self) -> anyhow::Result<()> {
        self.kv.remove(KEY_CHAIN)?;
        self.kv.remove(KEY_FINISHED)?;
        Ok(())
    }
}
