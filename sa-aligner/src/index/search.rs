use std::cmp::Ordering;
use std::ops::Range;

use super::sa::{SaAlgorithm, SuffixArray};

/// 将 `text[pos..]` 截断到 `pattern.len()` 后与 pattern 比较。
///
/// 截断后的片段若是 pattern 的真前缀（后缀在文本末尾提前结束），结果为 Less，
/// 因而不会越过文本末尾误匹配。
#[inline]
pub fn compare_prefix(text: &[u8], pos: usize, pattern: &[u8]) -> Ordering {
    let end = pos.saturating_add(pattern.len()).min(text.len());
    text[pos.min(end)..end].cmp(pattern)
}

/// 在后缀数组上二分查找，返回所有以 `pattern` 开头的后缀在 SA 中的区间 `[start, end)`。
/// 无匹配时返回空区间；空 pattern 匹配全部后缀。
pub fn range(sa: &[usize], text: &[u8], pattern: &[u8]) -> Range<usize> {
    // lower bound: 第一个 >= pattern 的后缀
    let start = sa.partition_point(|&p| compare_prefix(text, p, pattern) == Ordering::Less);
    // upper bound: 第一个 > pattern 的后缀
    let end = start + sa[start..].partition_point(|&p| compare_prefix(text, p, pattern) != Ordering::Greater);
    start..end
}

/// 返回 pattern 的全部出现位置（SA 区间对应的文本起点，按后缀序）。
pub fn positions<'s>(sa: &'s [usize], text: &[u8], pattern: &[u8]) -> &'s [usize] {
    &sa[range(sa, text, pattern)]
}

/// 文本与其后缀数组的组合，构成一个可查询的精确匹配索引。
#[derive(Debug, Clone)]
pub struct SuffixIndex<'a> {
    text: &'a [u8],
    sa: SuffixArray,
}

impl<'a> SuffixIndex<'a> {
    pub fn build(text: &'a [u8], algorithm: SaAlgorithm) -> Self {
        Self { text, sa: SuffixArray::build_with(&algorithm, text) }
    }

    pub fn text(&self) -> &'a [u8] {
        self.text
    }

    pub fn suffix_array(&self) -> &SuffixArray {
        &self.sa
    }

    pub fn range(&self, pattern: &[u8]) -> Range<usize> {
        range(self.sa.as_slice(), self.text, pattern)
    }

    pub fn positions(&self, pattern: &[u8]) -> &[usize] {
        positions(self.sa.as_slice(), self.text, pattern)
    }

    pub fn count(&self, pattern: &[u8]) -> usize {
        self.range(pattern).len()
    }
}
