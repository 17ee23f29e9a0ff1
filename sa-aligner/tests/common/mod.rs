#![allow(dead_code)]

use sa_aligner::util::dna::count_mismatches;

/// 确定性伪随机 ACGT 序列
pub fn lcg_sequence(len: usize, seed: u32) -> Vec<u8> {
    let mut x = seed;
    (0..len)
        .map(|_| {
            x = x.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            b"ACGT"[(x >> 16) as usize % 4]
        })
        .collect()
}

/// 把一个碱基替换成另一个不同的碱基
pub fn substitute(base: u8) -> u8 {
    match base {
        b'A' => b'C',
        b'C' => b'T',
        b'G' => b'A',
        _ => b'G',
    }
}

/// 在给定位置做替换（位置按 read 长度取模，重复位置只替换一次）
pub fn mutate(read: &[u8], positions: &[usize]) -> Vec<u8> {
    let mut out = read.to_vec();
    if out.is_empty() {
        return out;
    }
    let mut done = vec![false; out.len()];
    for &p in positions {
        let p = p % out.len();
        if !done[p] {
            out[p] = substitute(out[p]);
            done[p] = true;
        }
    }
    out
}

/// 暴力扫描：所有可放置位置中错配最少者（同分取最小偏移），返回 (offset, mismatches)
pub fn brute_force(text: &[u8], read: &[u8]) -> Option<(usize, usize)> {
    if read.is_empty() || read.len() > text.len() {
        return None;
    }
    (0..=text.len() - read.len())
        .map(|p| (p, count_mismatches(&text[p..p + read.len()], read)))
        .min_by_key(|&(p, mm)| (mm, p))
}

/// 暴力扫描：k 以内的最优位置
pub fn brute_force_within(text: &[u8], read: &[u8], k: usize) -> Option<(usize, usize)> {
    brute_force(text, read).filter(|&(_, mm)| mm <= k)
}

/// pattern 的全部出现位置（升序）
pub fn occurrences(text: &[u8], pattern: &[u8]) -> Vec<usize> {
    (0..text.len()).filter(|&i| text[i..].starts_with(pattern)).collect()
}
