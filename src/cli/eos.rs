//! # eos 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/eos.rs`

use clap::Args;
use std::path::PathBuf;

/// eos 子命令参数
#[derive(Args, Debug)]
pub struct EosArgs {
    /// Data file: lattice type on the first line, then "lattice_constant energy" rows
    pub filename: PathBuf,

    /// Save the comparison plot here (.png or .svg); without it a text plot is printed
    pub fig_filename: Option<PathBuf>,

    /// Plot width in pixels
    #[arg(long, default_value_t = 1000)]
    pub width: u32,

    /// Plot height in pixels
    #[arg(long, default_value_t = 700)]
    pub height: u32,

    /// Also write the fitted curve as CSV
    #[arg(long)]
    pub curve_csv: Option<PathBuf>,

    /// Print a per-point residual table
    #[arg(long, default_value_t = false)]
    pub show_residuals: bool,
}
