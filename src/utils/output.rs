//! # 终端输出工具
//!
//! 统一的彩色状态行。拟合报告本身用普通 `print!` 输出，
//! 这里只负责状态、警告与错误。
//!
//! ## 依赖关系
//! - 被 `main.rs`、`commands/` 和 `eos/mod.rs` 使用
//! - 使用 `colored` crate

use colored::Colorize;

const RULE_WIDTH: usize = 60;

/// 打印成功消息
pub fn print_success(msg: &str) {
    println!("{} {}", "[OK]".green().bold(), msg);
}

/// 打印错误消息（stderr）
pub fn print_error(msg: &str) {
    eprintln!("{} {}", "[ERR]".red().bold(), msg);
}

/// 打印警告消息
pub fn print_warning(msg: &str) {
    println!("{} {}", "[WARN]".yellow().bold(), msg);
}

pub fn print_info(msg: &str) {
    println!("{} {}", "[*]".blue().bold(), msg);
}

pub fn print_done(msg: &str) {
    println!("{} {}", "[DONE]".green().bold(), msg);
}

/// 打印文件转换消息 `from -> to`
pub fn print_conversion(from: &str, to: &str) {
    println!(
        "{} {} {} {}",
        "[OK]".green().bold(),
        from.dimmed(),
        "->".cyan(),
        to
    );
}

/// 打印标题栏
pub fn print_header(title: &str) {
    println!("\n{}", rule().dimmed());
    println!("  {}", title.bold());
    println!("{}\n", rule().dimmed());
}

/// 打印分隔线
pub fn print_separator() {
    println!("{}", rule().dimmed());
}

fn rule() -> String {
    "─".repeat(RULE_WIDTH)
}
