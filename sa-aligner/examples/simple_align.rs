//! 演示如何在 library 模式下使用 sa-aligner 进行比对与重建。
//!
//! 运行方式：
//! ```bash
//! cargo run --example simple_align
//! ```

use sa_aligner::align::{self, align_read, candidates, chunk_bounds};
use sa_aligner::assemble;
use sa_aligner::config::{AlignConfig, BlockConfig, MatchPolicy};
use sa_aligner::index::{SaAlgorithm, SuffixIndex};
use sa_aligner::reference::Reference;

fn main() -> anyhow::Result<()> {
    // 1. 参考序列
    let reference = Reference::from(&b"ACGTACGTAGCTGATCGTAGCTAGCTAGCTGATCGTAGCTAGCTAGCTGAT"[..]);
    println!("参考序列: {}", String::from_utf8_lossy(reference.as_bytes()));
    println!("参考长度: {} bp", reference.len());

    // 2. 后缀数组索引
    let idx = SuffixIndex::build(reference.as_bytes(), SaAlgorithm::Doubling);
    println!("后缀数组构建完成：SA 长度={}", idx.suffix_array().len());

    // 3. 精确匹配
    let pattern = b"GCTGATC";
    let mut positions = idx.positions(pattern).to_vec();
    positions.sort_unstable();
    println!("\n精确匹配 '{}': 找到 {} 处 {:?}", String::from_utf8_lossy(pattern), positions.len(), positions);

    // 4. 鸽巢切分与候选
    let read = b"ACGTACGTAGCAGATCGTAG"; // 11 处一个替换
    let k = 2;
    println!("\nread='{}' 切为 {} 段: {:?}", String::from_utf8_lossy(read), k + 1, chunk_bounds(read.len(), k).collect::<Vec<_>>());
    println!("候选起点: {:?}", candidates(&idx, read, k));
    match align_read(&idx, read, k) {
        Some(hit) => println!("比对结果: offset={} mismatches={}", hit.offset, hit.mismatches),
        None => println!("未比对"),
    }

    // 5. 整条 vs 分块
    let reads = vec![read.to_vec(), b"TTTTTTTTTT".to_vec(), b"CTAGCTAGCTGAT".to_vec()];
    let whole = AlignConfig::default();
    let blocked = whole.with_blocking(BlockConfig { block_size: 16, overlap: 4, policy: MatchPolicy::FirstMatch });
    let a = align::align_reads(&reference, &reads, &whole)?;
    let b = align::align_reads(&reference, &reads, &blocked)?;
    println!("\n整条索引: {:?}", (0..a.len()).map(|i| a.signed_offset(i)).collect::<Vec<_>>());
    println!("分块索引: {:?}", (0..b.len()).map(|i| b.signed_offset(i)).collect::<Vec<_>>());

    // 6. 重建
    let rebuilt = assemble::assemble(&reference, &reads, &a);
    let identity = assemble::base_identity(&rebuilt, reference.as_bytes())?;
    println!("\n重建序列: {}", String::from_utf8_lossy(&rebuilt));
    println!("与参考一致率: {:.2}%", identity * 100.0);

    println!("\n完成！");
    Ok(())
}
