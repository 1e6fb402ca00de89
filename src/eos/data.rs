//! # EOS 数据文件读取
//!
//! ## 文件格式
//! ```text
//! cubic|bcc|fcc|diamond      # 首行第一个词为晶格类型，其余忽略
//! alat1 (Ang)   TotEn1 (eV)
//! alat2 (Ang)   TotEn2 (eV)
//! ...
//! ```
//!
//! 数据行以空白分隔，必须恰好两列；空行与 `#` 开头的注释行被跳过。
//!
//! ## 依赖关系
//! - 被 `eos/mod.rs` 使用
//! - 使用 `eos/lattice.rs`

use crate::eos::lattice::LatticeType;
use crate::error::{DfttkError, Result};
use std::fs;
use std::path::Path;

/// 读入的 EOS 样本
#[derive(Debug, Clone)]
pub struct EosData {
    pub lattice: LatticeType,
    /// 线性尺寸 (Å)，文件顺序
    pub dimensions: Vec<f64>,
    /// 原胞体积 (Å³)
    pub volumes: Vec<f64>,
    /// 总能 (eV)
    pub energies: Vec<f64>,
}

impl EosData {
    /// 体积范围 (min, max)
    pub fn volume_range(&self) -> (f64, f64) {
        let min = self.volumes.iter().copied().fold(f64::INFINITY, f64::min);
        let max = self
            .volumes
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max);
        (min, max)
    }
}

/// 读取 EOS 数据文件
pub fn read_data(path: &Path) -> Result<EosData> {
    let content = fs::read_to_string(path).map_err(|e| DfttkError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_data(&content, &path.display().to_string())
}

/// 从字符串内容解析 EOS 数据
pub fn parse_data(content: &str, source_name: &str) -> Result<EosData> {
    let mut lines = content.lines();

    let header = lines.next().unwrap_or("");
    let token = header
        .split_whitespace()
        .next()
        .ok_or_else(|| DfttkError::ParseError {
            format: "eos".to_string(),
            path: source_name.to_string(),
            reason: "Missing lattice type on the first line".to_string(),
        })?;
    let lattice: LatticeType = token.parse()?;

    let mut dimensions = Vec::new();
    let mut energies = Vec::new();

    for (idx, line) in lines.enumerate() {
        // 首行已消耗，行号从 2 开始
        let line_no = idx + 2;
        // `#` 之后为注释，整行或行尾均可
        let trimmed = line.split('#').next().unwrap_or("").trim();
        if trimmed.is_empty() {
            continue;
        }

        let fields: Vec<&str> = trimmed.split_whitespace().collect();
        if fields.len() != 2 {
            return Err(DfttkError::ParseError {
                format: "eos".to_string(),
                path: source_name.to_string(),
                reason: format!(
                    "Line {}: expected 2 columns, found {}",
                    line_no,
                    fields.len()
                ),
            });
        }

        let parse_field = |s: &str| -> Result<f64> {
            s.parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| DfttkError::ParseError {
                    format: "eos".to_string(),
                    path: source_name.to_string(),
                    reason: format!("Line {}: invalid number '{}'", line_no, s),
                })
        };

        dimensions.push(parse_field(fields[0])?);
        energies.push(parse_field(fields[1])?);
    }

    let volumes = dimensions.iter().map(|&d| lattice.volume(d)).collect();

    Ok(EosData {
        lattice,
        dimensions,
        volumes,
        energies,
    })
}
