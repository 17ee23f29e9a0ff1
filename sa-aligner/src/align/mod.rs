pub mod block;
pub mod pigeonhole;

use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::Utc;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::AlignConfig;
use crate::error::Result;
use crate::index::SuffixIndex;
use crate::reference::Reference;

pub use block::{align_blocked, align_window, merge_delta, BlockDelta};
pub use pigeonhole::{align_read, candidates, chunk_bounds};

/// 未比对 read 的偏移哨兵值
pub const UNMATCHED: i64 = -1;

/// 一次被接受的比对：read 在参考序列上的起点及错配数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hit {
    pub offset: usize,
    pub mismatches: usize,
}

/// 全部 read 的比对结果，按 read 下标索引。
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Alignments {
    hits: Vec<Option<Hit>>,
}

impl Alignments {
    /// 长度为 n、全部未比对的结果
    pub fn unmatched(n: usize) -> Self {
        Self { hits: vec![None; n] }
    }

    pub fn from_hits(hits: Vec<Option<Hit>>) -> Self {
        Self { hits }
    }

    pub fn len(&self) -> usize {
        self.hits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    pub fn get(&self, i: usize) -> Option<Hit> {
        self.hits.get(i).copied().flatten()
    }

    pub fn offset(&self, i: usize) -> Option<usize> {
        self.get(i).map(|h| h.offset)
    }

    /// 带哨兵的偏移：比对上返回起点，否则返回 [`UNMATCHED`]
    pub fn signed_offset(&self, i: usize) -> i64 {
        self.offset(i).map_or(UNMATCHED, |p| p as i64)
    }

    pub(crate) fn set(&mut self, i: usize, hit: Option<Hit>) {
        self.hits[i] = hit;
    }

    pub fn matched_count(&self) -> usize {
        self.hits.iter().filter(|h| h.is_some()).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, Option<Hit>)> + '_ {
        self.hits.iter().copied().enumerate()
    }

    pub fn as_slice(&self) -> &[Option<Hit>] {
        &self.hits
    }
}

/// 用已构建的索引比对全部 read（并行，结果按 read 顺序）。
pub fn align_all<R>(index: &SuffixIndex<'_>, reads: &[R], k: usize) -> Alignments
where
    R: AsRef<[u8]> + Sync,
{
    let total = reads.len();
    let interval = (total / 10).max(1);
    let done = AtomicUsize::new(0);

    let hits = reads
        .par_iter()
        .map(|read| {
            let hit = align_read(index, read.as_ref(), k);
            let n = done.fetch_add(1, Ordering::Relaxed) + 1;
            if n % interval == 0 || n == total {
                debug!("processed {}/{} reads ({:.1}%)", n, total, n as f64 * 100.0 / total as f64);
            }
            hit
        })
        .collect();
    Alignments::from_hits(hits)
}

/// 比对入口：按配置决定整条建索引还是分块建索引。
pub fn align_reads<R>(reference: &Reference, reads: &[R], config: &AlignConfig) -> Result<Alignments>
where
    R: AsRef<[u8]> + Sync,
{
    config.validate()?;
    let pool = rayon::ThreadPoolBuilder::new().num_threads(config.threads).build()?;
    let k = config.max_mismatches;
    let started = Utc::now();

    let alignments = pool.install(|| match &config.blocking {
        None => {
            let index = SuffixIndex::build(reference.as_bytes(), config.sa_algorithm);
            info!(
                "suffix array built: {} suffixes ({:?}) in {} ms",
                index.suffix_array().len(),
                config.sa_algorithm,
                (Utc::now() - started).num_milliseconds()
            );
            align_all(&index, reads, k)
        }
        Some(b) => align_blocked(reference, reads, k, b, config.sa_algorithm),
    });

    info!(
        "aligned {}/{} reads (k={}) in {} ms",
        alignments.matched_count(),
        alignments.len(),
        k,
        (Utc::now() - started).num_milliseconds()
    );
    Ok(alignments)
}
