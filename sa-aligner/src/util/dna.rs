/// 统计两条序列在公共长度上的错配（替换）数。
/// 不做字母表校验，任意字节都按可比较字符处理。
#[inline]
pub fn count_mismatches(a: &[u8], b: &[u8]) -> usize {
    a.iter().zip(b).filter(|(x, y)| x != y).count()
}

/// 带上限的错配计数：一旦错配数超过 `limit` 立即返回 None。
/// 用于候选验证时按当前最优值提前剪枝。
#[inline]
pub fn mismatches_within(a: &[u8], b: &[u8], limit: usize) -> Option<usize> {
    let mut mm = 0usize;
    for (x, y) in a.iter().zip(b) {
        if x != y {
            mm += 1;
            if mm > limit {
                return None;
            }
        }
    }
    Some(mm)
}

/// 规范化为大写（读取文本文件时使用；核心算法本身不依赖大小写）。
pub fn normalize_seq(seq: &[u8]) -> Vec<u8> {
    seq.iter()
        .filter(|b| !b.is_ascii_whitespace())
        .map(u8::to_ascii_uppercase)
        .collect()
}
