use thiserror::Error;

/// 库内统一错误类型。
///
/// 注意：read 比对失败不是错误，而是 [`crate::align::Alignments`] 中的未比对结果。
#[derive(Debug, Error)]
pub enum Error {
    /// 运行配置不合法（如 block_size 为 0）。
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// 逐碱基比较的两条序列长度不一致。
    #[error("sequence length mismatch: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },

    /// 真值位置数量与 read 数量不一致。
    #[error("ground truth has {truth} offsets but {reads} reads were given")]
    TruthCountMismatch { reads: usize, truth: usize },

    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type Result<T> = std::result::Result<T, Error>;
