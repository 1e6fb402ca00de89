//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `eos`: Murnaghan 状态方程拟合
//! - `mp-download`: 从 Materials Project 下载结构
//! - `struct-out-to-poscar`: SIESTA STRUCT_OUT -> POSCAR
//! - `poscar-to-fdf`: POSCAR -> SIESTA fdf 输入
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: eos, download, convert

pub mod convert;
pub mod download;
pub mod eos;

use clap::{Parser, Subcommand};

/// dfttk - DFT 计算辅助工具箱
#[derive(Parser)]
#[command(name = "dfttk")]
#[command(version)]
#[command(about = "Equation-of-state fitting and structure helpers for DFT workflows", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Fit a Murnaghan equation of state to energy/lattice-constant data
    Eos(eos::EosArgs),

    /// Download a structure from the Materials Project
    MpDownload(download::MpDownloadArgs),

    /// Convert a SIESTA STRUCT_OUT file to VASP POSCAR
    StructOutToPoscar(convert::StructOutArgs),

    /// Write a SIESTA fdf input and link pseudopotentials for a POSCAR
    PoscarToFdf(convert::PoscarToFdfArgs),
}
