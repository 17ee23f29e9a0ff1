use anyhow::{anyhow, Context, Result};
use std::io::{BufRead, Write};
use std::path::Path;

use crate::util::dna;

fn open(path: &Path) -> Result<std::io::BufReader<std::fs::File>> {
    let fh = std::fs::File::open(path).with_context(|| format!("cannot open '{}'", path.display()))?;
    Ok(std::io::BufReader::new(fh))
}

/// 读取参考序列。
///
/// 支持两种格式：纯文本（整个文件即序列，忽略空白）和 FASTA（以 '>' 开头，只取第一条记录）。
pub fn read_reference<R: BufRead>(reader: R) -> Result<Vec<u8>> {
    let mut seq = Vec::new();
    let mut seen_header = false;
    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with('>') {
            if seen_header {
                // multi-record FASTA: only the first record is used
                break;
            }
            if !seq.is_empty() {
                return Err(anyhow!("unexpected FASTA header at line {}", lineno + 1));
            }
            seen_header = true;
            continue;
        }
        seq.extend(dna::normalize_seq(line.as_bytes()));
    }
    Ok(seq)
}

pub fn load_reference(path: &Path) -> Result<Vec<u8>> {
    let seq = read_reference(open(path)?).with_context(|| format!("while reading reference '{}'", path.display()))?;
    if seq.is_empty() {
        anyhow::bail!("reference '{}' contains no sequence", path.display());
    }
    Ok(seq)
}

/// 读取 reads。
///
/// 纯文本：每个非空行一条 read；FASTQ：首个非空行以 '@' 开头时按四行一组解析，只取序列行。
pub fn read_reads<R: BufRead>(reader: R) -> Result<Vec<Vec<u8>>> {
    let mut lines = reader.lines();
    let mut reads = Vec::new();
    let mut fastq = None;

    while let Some(line) = lines.next() {
        let line = line?;
        let line = line.trim_end();
        if line.is_empty() {
            continue;
        }
        let is_fastq = *fastq.get_or_insert(line.starts_with('@'));
        if !is_fastq {
            reads.push(dna::normalize_seq(line.as_bytes()));
            continue;
        }

        if !line.starts_with('@') {
            return Err(anyhow!("FASTQ header not starting with '@'"));
        }
        let seq = lines.next().ok_or_else(|| anyhow!("unexpected EOF after header"))??;
        let plus = lines.next().ok_or_else(|| anyhow!("missing '+' line"))??;
        if !plus.starts_with('+') {
            return Err(anyhow!("missing '+' line"));
        }
        let qual = lines.next().ok_or_else(|| anyhow!("missing quality line"))??;
        if qual.trim_end().len() != seq.trim_end().len() {
            return Err(anyhow!("seq/qual length mismatch"));
        }
        reads.push(dna::normalize_seq(seq.as_bytes()));
    }
    Ok(reads)
}

pub fn load_reads(path: &Path) -> Result<Vec<Vec<u8>>> {
    read_reads(open(path)?).with_context(|| format!("while reading reads '{}'", path.display()))
}

/// 真值偏移：每个非空行一个非负整数。
pub fn read_truth<R: BufRead>(reader: R) -> Result<Vec<usize>> {
    let mut out = Vec::new();
    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let v = line
            .parse::<usize>()
            .with_context(|| format!("invalid offset '{}' at line {}", line, lineno + 1))?;
        out.push(v);
    }
    Ok(out)
}

pub fn load_truth(path: &Path) -> Result<Vec<usize>> {
    read_truth(open(path)?).with_context(|| format!("while reading ground truth '{}'", path.display()))
}

pub fn write_sequence(path: &Path, seq: &[u8]) -> Result<()> {
    let fh = std::fs::File::create(path).with_context(|| format!("cannot create '{}'", path.display()))?;
    let mut w = std::io::BufWriter::new(fh);
    w.write_all(seq)?;
    w.write_all(b"\n")?;
    w.flush()?;
    Ok(())
}
