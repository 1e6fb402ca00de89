//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `eos/`, `mp/`, `parsers/`, `siesta/`, `utils/`
//! - 子模块: eos, download, convert

pub mod convert;
pub mod download;
pub mod eos;

use crate::cli::Commands;
use crate::error::{DfttkError, Result};
use std::fs;
use std::path::Path;

/// 执行命令
pub fn run(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Eos(args) => eos::execute(args),
        Commands::MpDownload(args) => download::execute(args),
        Commands::StructOutToPoscar(args) => convert::execute_struct_out(args),
        Commands::PoscarToFdf(args) => convert::execute_poscar_to_fdf(args),
    }
}

/// 写出文本文件
pub(crate) fn write_text(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).map_err(|e| DfttkError::FileWriteError {
        path: path.display().to_string(),
        source: e,
    })
}
