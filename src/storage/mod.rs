//! 持久化适配层
//!
//! KvStore：进程级、跨重启的 key -> 字符串存储抽象；ChainStore 的唯一落盘通道。
//! FileKvStore：每个 key 一个 JSON 文件（<dir>/<key>.json），写入采用「临时文件 + rename」，
//! 读方不会观察到半写状态。

use std::path::{Path, PathBuf};

use anyhow::Context;

/// 键值存储接口：get / put / remove，put 为整键替换
pub trait KvStore: Send + Sync {
    /// 读取 key 的值；不存在时返回 None
    fn get(&self, key: &str) -> anyhow::Result<Option<String>>;

    /// 写入 key 的值，整体替换旧值
    fn put(&self, key: &str, value: &str) -> anyhow::Result<()>;

    /// 删除 key；key 不存在时为 no-op
    fn remove(&self, key: &str) -> anyhow::Result<()>;
}

/// 文件键值存储：每个 key 对应 <dir>/<key>.json
#[derive(Debug)]
pub struct FileKvStore {
    dir: PathBuf,
}

impl FileKvStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KvStore for FileKvStore {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let data = std::fs::read_to_string(&path)
            .with_context(|| format!("Read {}", path.display()))?;
        Ok(Some(data))
    }

    fn put(&self, key: &str, value: &str) -> anyhow::Result<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("Create dir {}", self.dir.display()))?;
        let path = self.key_path(key);
        // 先写临时文件再 rename，读方只会看到完整内容
        let tmp = self.dir.join(format!("{}.json.tmp", key));
        std::fs::write(&tmp, value).with_context(|| format!("Write {}", tmp.display()))?;
        std::fs::rename(&tmp, &path)
            .with_context(|| format!("Rename {} -> {}", tmp.display(), path.display()))?;
        Ok(())
    }

    fn remove(&self, key: &str) -> anyhow::Result<()> {
        let path = self.key_path(key);
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("Remove {}", path.display())),
        }
    }
}
