use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Error, Result};
use crate::index::SaAlgorithm;

/// 分块比对中，一条 read 在多个块都能比对上时的取舍策略。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
pub enum MatchPolicy {
    /// 第一个给出可接受比对的块胜出，之后不再尝试该 read
    #[default]
    #[value(name = "first")]
    FirstMatch,
    /// 尝试所有块，保留错配最少者（同分取较早的块）
    #[value(name = "best")]
    BestMatch,
}

/// 分块参数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockConfig {
    pub block_size: usize,
    /// 期望的块间重叠；实际重叠至少为 `max_read_len - 1`，见 [`BlockConfig::effective_overlap`]
    pub overlap: usize,
    pub policy: MatchPolicy,
}

impl Default for BlockConfig {
    fn default() -> Self {
        Self { block_size: 500_000, overlap: 100, policy: MatchPolicy::FirstMatch }
    }
}

impl BlockConfig {
    pub fn validate(&self) -> Result<()> {
        if self.block_size == 0 {
            return Err(Error::InvalidConfig("block_size must be positive".into()));
        }
        Ok(())
    }

    /// 实际使用的重叠长度。
    ///
    /// 跨块边界的 read 必须完整落在某一块内，因此重叠不得小于 `max_read_len - 1`；
    /// 配置值不足时自动抬高并告警。
    pub fn effective_overlap(&self, max_read_len: usize) -> usize {
        let required = max_read_len.saturating_sub(1);
        if self.overlap < required {
            warn!(
                configured = self.overlap,
                required,
                "block overlap shorter than read length - 1; raising it"
            );
            required
        } else {
            self.overlap
        }
    }
}

/// 一次比对运行的全部配置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignConfig {
    /// 允许的最大错配（替换）数 k
    pub max_mismatches: usize,
    pub sa_algorithm: SaAlgorithm,
    /// rayon 线程数，0 表示使用 rayon 默认值
    pub threads: usize,
    /// None 表示整条参考序列一次建索引
    pub blocking: Option<BlockConfig>,
}

impl Default for AlignConfig {
    fn default() -> Self {
        Self {
            max_mismatches: 2,
            sa_algorithm: SaAlgorithm::default(),
            threads: 1,
            blocking: None,
        }
    }
}

impl AlignConfig {
    pub fn with_mismatches(mut self, k: usize) -> Self {
        self.max_mismatches = k;
        self
    }

    pub fn with_blocking(mut self, blocking: BlockConfig) -> Self {
        self.blocking = Some(blocking);
        self
    }

    pub fn with_algorithm(mut self, algorithm: SaAlgorithm) -> Self {
        self.sa_algorithm = algorithm;
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(b) = &self.blocking {
            b.validate()?;
        }
        Ok(())
    }
}
