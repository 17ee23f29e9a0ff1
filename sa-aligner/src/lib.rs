//! # sa-aligner
//!
//! 基于后缀数组的短 read 近似比对与序列重建。
//!
//! 本 crate 提供：
//!
//! - **索引构建**：后缀数组（朴素比较排序 / 倍增法 / SA-IS）
//! - **精确匹配**：在后缀数组上二分查找 pattern 的出现区间
//! - **近似比对**：鸽巢原理切分 read 为 k+1 段做种子，验证后取错配最少的位置
//! - **分块比对**：参考序列过大时按重叠窗口逐块建索引，限制峰值内存
//! - **序列重建**：用比对上的 read 覆盖参考序列，并评估重建准确率
//!
//! ## 快速示例
//!
//! ```rust
//! use sa_aligner::align::{align_reads, UNMATCHED};
//! use sa_aligner::config::{AlignConfig, BlockConfig, MatchPolicy};
//! use sa_aligner::reference::Reference;
//! use sa_aligner::assemble::assemble;
//!
//! let reference = Reference::from(&b"ACGTACGTACGT"[..]);
//! let reads = vec![b"ACGA".to_vec(), b"TTTT".to_vec()];
//!
//! let config = AlignConfig::default().with_mismatches(1);
//! let aln = align_reads(&reference, &reads, &config).unwrap();
//! assert_eq!(aln.signed_offset(0), 0);
//! assert_eq!(aln.signed_offset(1), UNMATCHED);
//!
//! // 分块比对结果一致
//! let blocked = config.with_blocking(BlockConfig { block_size: 6, overlap: 2, policy: MatchPolicy::FirstMatch });
//! assert_eq!(align_reads(&reference, &reads, &blocked).unwrap(), aln);
//!
//! let rebuilt = assemble(&reference, &reads, &aln);
//! assert_eq!(rebuilt, b"ACGAACGTACGT");
//! ```
//!
//! ## 模块说明
//!
//! - [`reference`]：参考序列与分块视图
//! - [`index`]：后缀数组构建与精确匹配查找
//! - [`align`]：鸽巢近似比对、分块比对与运行入口
//! - [`assemble`]：序列重建与准确率评估
//! - [`config`]：运行配置
//! - [`io`]：参考序列 / reads / 真值 / 比对结果文件读写
//! - [`util`]：错配计数等工具函数

pub mod align;
pub mod assemble;
pub mod config;
pub mod error;
pub mod index;
pub mod io;
pub mod reference;
pub mod util;

pub use error::{Error, Result};
