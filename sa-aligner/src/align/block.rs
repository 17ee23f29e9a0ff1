use rayon::prelude::*;
use tracing::{debug, info};

use super::pigeonhole::align_read;
use super::{Alignments, Hit};
use crate::config::{BlockConfig, MatchPolicy};
use crate::index::{SaAlgorithm, SuffixIndex};
use crate::reference::{RefView, Reference};

/// 单个块产出的增量：本块新找到的 (read 下标, 全局坐标命中)，按 read 下标升序。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BlockDelta {
    pub hits: Vec<(usize, Hit)>,
}

/// 对一个块建立后缀数组，并比对 `pending` 中列出的 read。
///
/// 索引只在本函数内存活，返回时即释放，峰值内存受块大小约束。
/// 命中偏移已转换为全局坐标。
pub fn align_window<R>(
    view: RefView<'_>,
    reads: &[R],
    pending: &[usize],
    k: usize,
    algorithm: SaAlgorithm,
) -> BlockDelta
where
    R: AsRef<[u8]> + Sync,
{
    let index = SuffixIndex::build(view.as_bytes(), algorithm);
    let hits = pending
        .par_iter()
        .filter_map(|&i| {
            align_read(&index, reads[i].as_ref(), k).map(|h| (i, Hit { offset: view.to_global(h.offset), ..h }))
        })
        .collect();
    BlockDelta { hits }
}

/// 将一个块的增量合并到结果中。各块按参考序列上的先后顺序合并。
///
/// - `FirstMatch`：只填充尚未比对上的 read
/// - `BestMatch`：错配严格更少时才替换，同分保留较早的块
pub fn merge_delta(alignments: &mut Alignments, delta: BlockDelta, policy: MatchPolicy) -> usize {
    let mut updated = 0usize;
    for (i, hit) in delta.hits {
        let replace = match (alignments.get(i), policy) {
            (None, _) => true,
            (Some(_), MatchPolicy::FirstMatch) => false,
            (Some(cur), MatchPolicy::BestMatch) => hit.mismatches < cur.mismatches,
        };
        if replace {
            alignments.set(i, Some(hit));
            updated += 1;
        }
    }
    updated
}

/// 下一个块需要尝试的 read。
///
/// FirstMatch 下是所有未比对的 read；BestMatch 下还包括尚未完全匹配的 read。
pub fn pending_reads(alignments: &Alignments, policy: MatchPolicy) -> Vec<usize> {
    alignments
        .iter()
        .filter(|(_, hit)| match (hit, policy) {
            (None, _) => true,
            (Some(_), MatchPolicy::FirstMatch) => false,
            (Some(h), MatchPolicy::BestMatch) => h.mismatches > 0,
        })
        .map(|(i, _)| i)
        .collect()
}

/// 分块比对：逐块建索引，以增量折叠的方式累积结果。
pub fn align_blocked<R>(
    reference: &Reference,
    reads: &[R],
    k: usize,
    cfg: &BlockConfig,
    algorithm: SaAlgorithm,
) -> Alignments
where
    R: AsRef<[u8]> + Sync,
{
    let max_len = reads.iter().map(|r| r.as_ref().len()).max().unwrap_or(0);
    let overlap = cfg.effective_overlap(max_len);
    let windows = reference.windows(cfg.block_size, overlap);
    let n_blocks = windows.len();

    let mut alignments = Alignments::unmatched(reads.len());
    for (b, view) in windows.into_iter().enumerate() {
        let pending = pending_reads(&alignments, cfg.policy);
        if pending.is_empty() {
            debug!(block = b + 1, "no pending reads; skipping remaining blocks");
            break;
        }
        let range = view.global_range();
        info!(
            "block {}/{} [{}, {}): {} pending reads",
            b + 1,
            n_blocks,
            range.start,
            range.end,
            pending.len()
        );
        let delta = align_window(view, reads, &pending, k, algorithm);
        let found = delta.hits.len();
        let updated = merge_delta(&mut alignments, delta, cfg.policy);
        debug!(block = b + 1, found, updated, "block merged");
    }
    alignments
}
