//! # 晶格类型与体积换算
//!
//! EOS 输入文件首行给出的晶格类型，决定线性尺寸到原胞体积的换算因子。
//!
//! | 类型      | 因子 |
//! |-----------|------|
//! | cubic     | 1    |
//! | bcc       | 1/2  |
//! | fcc       | 1/4  |
//! | diamond   | 1/4  |
//!
//! ## 依赖关系
//! - 被 `eos/data.rs`, `eos/murnaghan.rs` 使用

use crate::error::DfttkError;
use std::str::FromStr;

/// 晶格类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LatticeType {
    Cubic,
    Bcc,
    Fcc,
    Diamond,
}

impl LatticeType {
    /// 体积换算因子
    pub fn factor(self) -> f64 {
        match self {
            LatticeType::Cubic => 1.0,
            LatticeType::Bcc => 1.0 / 2.0,
            LatticeType::Fcc => 1.0 / 4.0,
            LatticeType::Diamond => 1.0 / 4.0,
        }
    }

    /// 线性尺寸 -> 原胞体积
    pub fn volume(self, dimension: f64) -> f64 {
        self.factor() * dimension.powi(3)
    }

    /// 原胞体积 -> 晶格常数
    pub fn lattice_constant(self, volume: f64) -> f64 {
        (volume / self.factor()).powf(1.0 / 3.0)
    }
}

impl FromStr for LatticeType {
    type Err = DfttkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cubic" => Ok(LatticeType::Cubic),
            "bcc" => Ok(LatticeType::Bcc),
            "fcc" => Ok(LatticeType::Fcc),
            "diamond" => Ok(LatticeType::Diamond),
            other => Err(DfttkError::InvalidLatticeType(other.to_string())),
        }
    }
}

impl std::fmt::Display for LatticeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LatticeType::Cubic => write!(f, "cubic"),
            LatticeType::Bcc => write!(f, "bcc"),
            LatticeType::Fcc => write!(f, "fcc"),
            LatticeType::Diamond => write!(f, "diamond"),
        }
    }
}
