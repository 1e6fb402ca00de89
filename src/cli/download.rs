//! # mp-download 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/download.rs`

use clap::{Args, ValueEnum};
use std::path::PathBuf;

/// 支持的输出格式
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum StructureFormat {
    /// VASP POSCAR format
    Poscar,
    /// Crystallographic Information File
    Cif,
    /// CASTEP .cell format
    Cell,
}

impl std::fmt::Display for StructureFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StructureFormat::Poscar => write!(f, "poscar"),
            StructureFormat::Cif => write!(f, "cif"),
            StructureFormat::Cell => write!(f, "cell"),
        }
    }
}

/// mp-download 子命令参数
#[derive(Args, Debug)]
pub struct MpDownloadArgs {
    /// Materials Project id, e.g. mp-149
    pub mp_id: String,

    /// Materials Project API key
    #[arg(short = 'k', long, env = "MP_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Output file
    #[arg(short, long, default_value = "infile.ucposcar")]
    pub output: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value_t = StructureFormat::Poscar)]
    pub format: StructureFormat,

    /// Download the final (relaxed) structure instead of the initial one
    #[arg(short = 'f', long = "final", default_value_t = false)]
    pub final_structure: bool,
}
