use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::align::Alignments;
use crate::config::AlignConfig;

/// 比对结果文件：只保存结果与生成它的配置，不保存索引。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignmentFile {
    pub created: DateTime<Utc>,
    pub reference_len: usize,
    pub config: AlignConfig,
    pub alignments: Alignments,
}

impl AlignmentFile {
    pub fn new(reference_len: usize, config: AlignConfig, alignments: Alignments) -> Self {
        Self { created: Utc::now(), reference_len, config, alignments }
    }

    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let f = std::fs::File::create(path).with_context(|| format!("cannot create '{}'", path.display()))?;
        let mut w = std::io::BufWriter::new(f);
        bincode::serialize_into(&mut w, self)?;
        Ok(())
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let f = std::fs::File::open(path).with_context(|| format!("cannot open '{}'", path.display()))?;
        let file: Self = bincode::deserialize_from(std::io::BufReader::new(f))
            .with_context(|| format!("'{}' is not a valid alignment file", path.display()))?;
        Ok(file)
    }

    /// 文本形式：每行一个偏移，未比对为 -1（与真值文件同格式）
    pub fn offsets_tsv(&self) -> String {
        let mut s = String::with_capacity(self.alignments.len() * 8);
        for i in 0..self.alignments.len() {
            s.push_str(&self.alignments.signed_offset(i).to_string());
            s.push('\n');
        }
        s
    }
}
