use std::ops::Range;

/// 参考序列：运行期间不可变，0-based 随机访问。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    seq: Vec<u8>,
}

impl Reference {
    pub fn new(seq: Vec<u8>) -> Self {
        Self { seq }
    }

    pub fn len(&self) -> usize {
        self.seq.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seq.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.seq
    }

    /// 取 `[start, start+len)` 子串，越界返回 None。
    pub fn substring(&self, start: usize, len: usize) -> Option<&[u8]> {
        let end = start.checked_add(len)?;
        self.seq.get(start..end)
    }

    /// 取一个区间视图，区间会被裁剪到序列长度内。
    pub fn view(&self, range: Range<usize>) -> RefView<'_> {
        let end = range.end.min(self.seq.len());
        let start = range.start.min(end);
        RefView { seq: &self.seq[start..end], offset: start }
    }

    /// 按固定块大小切分参考序列，每块尾部额外附加 `overlap` 个碱基。
    ///
    /// 第 b 块覆盖 `[b*block_size, min((b+1)*block_size + overlap, N))`，
    /// 共 `ceil(N / block_size)` 块。`block_size` 为 0 时返回空列表。
    pub fn windows(&self, block_size: usize, overlap: usize) -> Vec<RefView<'_>> {
        if block_size == 0 {
            return Vec::new();
        }
        let n = self.seq.len();
        // 向上取整，block_size 接近 usize::MAX 时也不溢出
        let n_blocks = n / block_size + usize::from(n % block_size != 0);
        (0..n_blocks)
            .map(|b| {
                let start = b * block_size;
                let end = start.saturating_add(block_size).saturating_add(overlap);
                self.view(start..end)
            })
            .collect()
    }
}

impl From<Vec<u8>> for Reference {
    fn from(seq: Vec<u8>) -> Self {
        Self::new(seq)
    }
}

impl From<&[u8]> for Reference {
    fn from(seq: &[u8]) -> Self {
        Self::new(seq.to_vec())
    }
}

/// 参考序列上的连续只读切片，记录其在整条序列中的起点。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefView<'a> {
    seq: &'a [u8],
    offset: usize,
}

impl<'a> RefView<'a> {
    /// 全局起点
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn len(&self) -> usize {
        self.seq.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seq.is_empty()
    }

    pub fn as_bytes(&self) -> &'a [u8] {
        self.seq
    }

    /// 全局坐标区间 `[offset, offset + len)`
    pub fn global_range(&self) -> Range<usize> {
        self.offset..self.offset + self.seq.len()
    }

    #[inline]
    pub fn to_global(&self, local: usize) -> usize {
        self.offset + local
    }
}
