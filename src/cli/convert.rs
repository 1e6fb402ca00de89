//! # 结构转换子命令 CLI 定义
//!
//! - `struct-out-to-poscar`
//! - `poscar-to-fdf`
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/convert.rs`

use clap::Args;
use std::path::PathBuf;

/// struct-out-to-poscar 子命令参数
#[derive(Args, Debug)]
pub struct StructOutArgs {
    /// SIESTA STRUCT_OUT file
    pub struct_out: PathBuf,

    /// Output POSCAR
    #[arg(default_value = "out.poscar.vasp")]
    pub out_poscar: PathBuf,
}

/// poscar-to-fdf 子命令参数
#[derive(Args, Debug)]
pub struct PoscarToFdfArgs {
    /// Input POSCAR
    pub poscar: PathBuf,

    /// Directory holding <Element>.psf / <Element>.psml pseudopotentials
    #[arg(short, long, env = "SIESTA_PP_PATH")]
    pub pseudos_dir: Option<PathBuf>,

    /// Directory for the fdf file and pseudopotential links
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// SystemLabel, also the fdf file stem
    #[arg(long, default_value = "siesta")]
    pub label: String,
}
