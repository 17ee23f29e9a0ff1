use serde::{Deserialize, Serialize};
use tracing::debug;

/// 后缀数组构建能力接口。
///
/// 所有实现必须给出同一顺序：按字节逐位比较后缀，若一个后缀是另一个的前缀，
/// 则较短者在前。空文本返回空数组。
pub trait SuffixArrayBuilder {
    fn build(&self, text: &[u8]) -> Vec<usize>;
}

/// 朴素比较排序：直接对后缀切片排序，作为正确性基准。
#[derive(Debug, Clone, Copy, Default)]
pub struct NaiveBuilder;

impl SuffixArrayBuilder for NaiveBuilder {
    fn build(&self, text: &[u8]) -> Vec<usize> {
        let mut sa: Vec<usize> = (0..text.len()).collect();
        sa.sort_unstable_by(|&i, &j| text[i..].cmp(&text[j..]));
        sa
    }
}

/// 倍增法，O(n log² n)。
#[derive(Debug, Clone, Copy, Default)]
pub struct DoublingBuilder;

impl SuffixArrayBuilder for DoublingBuilder {
    fn build(&self, text: &[u8]) -> Vec<usize> {
        let n = text.len();
        if n == 0 {
            return Vec::new();
        }
        let mut sa: Vec<usize> = (0..n).collect();
        let mut rank: Vec<i64> = text.iter().map(|&b| b as i64).collect();
        let mut tmp: Vec<i64> = vec![0; n];

        // 越过文本末尾的后缀取 -1，保证短后缀排在其扩展之前
        let key = |rank: &[i64], i: usize, k: usize| (rank[i], if i + k < n { rank[i + k] } else { -1 });

        let mut k = 1usize;
        loop {
            sa.sort_unstable_by_key(|&i| key(rank.as_slice(), i, k));

            tmp[sa[0]] = 0;
            for w in 1..n {
                let a = sa[w - 1];
                let b = sa[w];
                tmp[b] = tmp[a] + i64::from(key(rank.as_slice(), a, k) != key(rank.as_slice(), b, k));
            }

            rank.copy_from_slice(&tmp);
            if rank[sa[n - 1]] as usize == n - 1 || k >= n {
                break;
            }
            k <<= 1;
        }
        sa
    }
}

/// 委托 `bio` 的 SA-IS 实现（线性时间）。
///
/// bio 要求文本以唯一且最小的哨兵结尾，这里临时追加 0 字节，构建后去掉哨兵位置。
/// 若文本本身含 0 字节，哨兵不再唯一，回退到倍增法。
#[derive(Debug, Clone, Copy, Default)]
pub struct SaisBuilder;

impl SuffixArrayBuilder for SaisBuilder {
    fn build(&self, text: &[u8]) -> Vec<usize> {
        if text.is_empty() {
            return Vec::new();
        }
        if text.contains(&0) {
            debug!(len = text.len(), "text contains NUL byte; SA-IS falls back to prefix doubling");
            return DoublingBuilder.build(text);
        }
        let mut with_sentinel = Vec::with_capacity(text.len() + 1);
        with_sentinel.extend_from_slice(text);
        with_sentinel.push(0);
        let n = text.len();
        bio::data_structures::suffix_array::suffix_array(&with_sentinel)
            .into_iter()
            .filter(|&p| p != n)
            .collect()
    }
}

/// 构建算法选择，由配置决定。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
pub enum SaAlgorithm {
    Naive,
    #[default]
    Doubling,
    Sais,
}

impl SuffixArrayBuilder for SaAlgorithm {
    fn build(&self, text: &[u8]) -> Vec<usize> {
        match self {
            SaAlgorithm::Naive => NaiveBuilder.build(text),
            SaAlgorithm::Doubling => DoublingBuilder.build(text),
            SaAlgorithm::Sais => SaisBuilder.build(text),
        }
    }
}

/// 后缀数组：文本每个起点恰好出现一次，按后缀字典序排列。构建后只读。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SuffixArray {
    sa: Vec<usize>,
}

impl SuffixArray {
    pub fn build(text: &[u8]) -> Self {
        Self::build_with(&SaAlgorithm::default(), text)
    }

    pub fn build_with<B: SuffixArrayBuilder + ?Sized>(builder: &B, text: &[u8]) -> Self {
        Self { sa: builder.build(text) }
    }

    pub fn len(&self) -> usize {
        self.sa.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sa.is_empty()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.sa
    }

    pub fn get(&self, i: usize) -> Option<usize> {
        self.sa.get(i).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_text(len: usize, sigma: u32) -> Vec<u8> {
        let mut x: u32 = 1_234_567;
        let mut v = Vec::with_capacity(len);
        for _ in 0..len {
            x = x.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            v.push(b"ACGT"[((x >> 16) % sigma) as usize]);
        }
        v
    }

    #[test]
    fn sa_basic() {
        // 后缀：ACGT, CGT, GT, T
        let sa = SuffixArray::build(b"ACGT");
        assert_eq!(sa.as_slice(), &[0, 1, 2, 3]);
    }

    #[test]
    fn shorter_prefix_sorts_first() {
        // AAA: 后缀 A(2) < AA(1) < AAA(0)
        for algo in [SaAlgorithm::Naive, SaAlgorithm::Doubling, SaAlgorithm::Sais] {
            let sa = SuffixArray::build_with(&algo, b"AAA");
            assert_eq!(sa.as_slice(), &[2, 1, 0], "{:?}", algo);
        }
    }

    #[test]
    fn banana_like() {
        // ACACA: A(4) ACA(2) ACACA(0) CA(3) CACA(1)
        let sa = SuffixArray::build_with(&NaiveBuilder, b"ACACA");
        assert_eq!(sa.as_slice(), &[4, 2, 0, 3, 1]);
        assert_eq!(sa.get(2), Some(0));
        assert_eq!(sa.get(5), None);
    }

    #[test]
    fn builders_agree_on_small_random_texts() {
        for sigma in [1, 2, 4] {
            for len in 1..=40 {
                let text = make_text(len, sigma);
                let naive = NaiveBuilder.build(&text);
                assert_eq!(DoublingBuilder.build(&text), naive, "doubling len={} sigma={}", len, sigma);
                assert_eq!(SaisBuilder.build(&text), naive, "sais len={} sigma={}", len, sigma);
            }
        }
    }

    #[test]
    fn sais_falls_back_on_nul_bytes() {
        let text = [3u8, 0, 2, 0, 1];
        assert_eq!(SaisBuilder.build(&text), NaiveBuilder.build(&text));
    }

    #[test]
    fn empty_text_yields_empty_array() {
        for algo in [SaAlgorithm::Naive, SaAlgorithm::Doubling, SaAlgorithm::Sais] {
            assert!(SuffixArray::build_with(&algo, b"").is_empty());
        }
    }
}
