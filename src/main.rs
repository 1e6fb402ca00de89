//! # dfttk - DFT 计算辅助工具箱
//!
//! 状态方程拟合与结构文件处理，统一成单一可执行文件。
//!
//! ## 子命令
//! - `eos` - Murnaghan 状态方程拟合与绘图
//! - `mp-download` - 从 Materials Project 下载结构
//! - `struct-out-to-poscar` - SIESTA STRUCT_OUT 转 POSCAR
//! - `poscar-to-fdf` - 由 POSCAR 生成 SIESTA 输入
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── eos/       (EOS 拟合、绘图、导出)
//!   │     ├── mp/        (Materials Project 客户端)
//!   │     ├── parsers/   (格式读写)
//!   │     ├── siesta/    (fdf 与赝势)
//!   │     └── models/    (数据模型)
//!   ├── utils/      (输出与进度)
//!   └── error.rs    (错误处理)
//! ```

mod cli;
mod commands;
mod eos;
mod error;
mod models;
mod mp;
mod parsers;
mod siesta;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli.command) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
