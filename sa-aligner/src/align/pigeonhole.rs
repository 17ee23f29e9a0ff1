use std::ops::Range;

use super::Hit;
use crate::index::SuffixIndex;
use crate::util::dna;

/// 将长度为 `read_len` 的 read 切成恰好 `k+1` 段互不重叠、首尾相接的区间（惰性产出）。
///
/// 每段长 `read_len / (k+1)`，最后一段吸收余数。read 短于 `k+1` 时前面几段为空，
/// 最后一段即整条 read。
pub fn chunk_bounds(read_len: usize, k: usize) -> impl Iterator<Item = Range<usize>> {
    chunks_from(read_len, k, 0)
}

/// 参与精确查找的种子段：[`chunk_bounds`] 去掉空段。
///
/// read 短于 `k+1` 时直接跳到最后一段，不逐个遍历前面的空段。
pub fn seed_chunks(read_len: usize, k: usize) -> impl Iterator<Item = Range<usize>> {
    let first = if k < read_len { 0 } else { k };
    chunks_from(read_len, k, first).filter(|c| !c.is_empty())
}

fn chunks_from(read_len: usize, k: usize, first: usize) -> impl Iterator<Item = Range<usize>> {
    // k < read_len 时 k+1 不会溢出
    let size = if k < read_len { read_len / (k + 1) } else { 0 };
    (first..=k).map(move |i| {
        let start = i * size;
        let end = if i == k { read_len } else { start + size };
        start..end
    })
}

/// 鸽巢原理收集候选起点。
///
/// 至多 k 个错配分布在 k+1 段上，至少有一段完全匹配，因此对每段做精确查找，
/// 把命中位置换算成整条 read 的起点即可覆盖所有可能的比对位置。
/// 越界（起点为负或 `start + L > text.len()`）的候选直接丢弃。
/// 结果去重并升序排列。
pub fn candidates(index: &SuffixIndex<'_>, read: &[u8], k: usize) -> Vec<usize> {
    let read_len = read.len();
    let text_len = index.text().len();
    let mut cands = Vec::new();
    for chunk in seed_chunks(read_len, k) {
        for &p in index.positions(&read[chunk.clone()]) {
            let Some(start) = p.checked_sub(chunk.start) else {
                continue;
            };
            if start + read_len > text_len {
                continue;
            }
            cands.push(start);
        }
    }
    cands.sort_unstable();
    cands.dedup();
    cands
}

/// 在索引文本上比对一条 read，最多容忍 `k` 个替换。
///
/// 返回错配最少的候选（同分时取偏移最小者），遇到完全匹配立即返回。
/// 没有候选满足 `mismatches <= k` 时返回 None。
pub fn align_read(index: &SuffixIndex<'_>, read: &[u8], k: usize) -> Option<Hit> {
    let text = index.text();
    let read_len = read.len();
    let mut best: Option<Hit> = None;

    for pos in candidates(index, read, k) {
        // 只接受严格更优的候选
        let limit = best.map_or(k, |h| h.mismatches.saturating_sub(1));
        let segment = &text[pos..pos + read_len];
        if let Some(mm) = dna::mismatches_within(segment, read, limit) {
            best = Some(Hit { offset: pos, mismatches: mm });
            if mm == 0 {
                break;
            }
        }
    }
    best
}
