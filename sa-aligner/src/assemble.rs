//! 由比对结果重建序列，以及重建质量评估。

use tracing::debug;

use crate::align::Alignments;
use crate::error::{Error, Result};
use crate::reference::Reference;
use crate::util::dna;

/// 复制参考序列，并用每条比对上的 read 覆盖其所在区间。
///
/// 按 read 顺序写入，重叠区间后写者胜出，不做冲突检测或投票。
/// 超出参考末尾的部分被裁掉，输出长度恒等于参考长度。
pub fn assemble<R: AsRef<[u8]>>(reference: &Reference, reads: &[R], alignments: &Alignments) -> Vec<u8> {
    let mut out = reference.as_bytes().to_vec();
    let n = out.len();
    let mut written = 0usize;
    for (i, read) in reads.iter().enumerate() {
        let Some(pos) = alignments.offset(i) else {
            continue;
        };
        if pos >= n {
            continue;
        }
        let read: &[u8] = read.as_ref();
        let end = (pos + read.len()).min(n);
        out[pos..end].copy_from_slice(&read[..end - pos]);
        written += 1;
    }
    debug!(written, total = reads.len(), "reads written into reconstruction");
    out
}

/// 两条等长序列逐位相同的比例。两条都为空时视为完全一致（1.0）。
pub fn base_identity(a: &[u8], b: &[u8]) -> Result<f64> {
    if a.len() != b.len() {
        return Err(Error::LengthMismatch { left: a.len(), right: b.len() });
    }
    if a.is_empty() {
        return Ok(1.0);
    }
    let same = a.len() - dna::count_mismatches(a, b);
    Ok(same as f64 / a.len() as f64)
}

/// read 级准确率统计
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReadAccuracy {
    pub total: usize,
    pub correct: usize,
}

impl ReadAccuracy {
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.correct as f64 / self.total as f64
        }
    }

    pub fn percent(&self) -> f64 {
        self.fraction() * 100.0
    }
}

fn check_truth(reads: usize, truth: &[usize]) -> Result<()> {
    if reads != truth.len() {
        return Err(Error::TruthCountMismatch { reads, truth: truth.len() });
    }
    Ok(())
}

/// 比对偏移与真值完全相等的 read 比例。未比对的 read 计为错误。
pub fn read_accuracy(alignments: &Alignments, truth: &[usize]) -> Result<ReadAccuracy> {
    check_truth(alignments.len(), truth)?;
    let correct = truth
        .iter()
        .enumerate()
        .filter(|&(i, &t)| alignments.offset(i) == Some(t))
        .count();
    Ok(ReadAccuracy { total: alignments.len(), correct })
}

/// 重建序列在每条 read 真值位置上的恢复情况：
/// 该位置的片段与 read 相差不超过 `k` 个碱基即视为恢复成功。
/// 片段越过重建序列末尾的 read 计为失败。
pub fn recovery_accuracy<R: AsRef<[u8]>>(
    reconstructed: &[u8],
    reads: &[R],
    truth: &[usize],
    k: usize,
) -> Result<ReadAccuracy> {
    check_truth(reads.len(), truth)?;
    let correct = reads
        .iter()
        .zip(truth)
        .filter(|(read, &pos)| {
            let read: &[u8] = read.as_ref();
            pos.checked_add(read.len())
                .and_then(|end| reconstructed.get(pos..end))
                .and_then(|seg| dna::mismatches_within(seg, read, k))
                .is_some()
        })
        .count();
    Ok(ReadAccuracy { total: reads.len(), correct })
}
