//! # mp-download 命令实现
//!
//! 从 Materials Project 获取结构，按所选格式写出并打印结构摘要。
//!
//! ## 依赖关系
//! - 使用 `cli/download.rs` 定义的参数
//! - 使用 `mp/`, `parsers/`
//! - 使用 `utils/output.rs`, `utils/progress.rs`

use crate::cli::download::{MpDownloadArgs, StructureFormat};
use crate::commands::write_text;
use crate::error::Result;
use crate::models::Crystal;
use crate::mp::{MpClient, MpConfig, StructureKind};
use crate::parsers::{cell, cif, poscar};
use crate::utils::{output, progress};

/// 执行 mp-download 命令
pub fn execute(args: MpDownloadArgs) -> Result<()> {
    let config = MpConfig {
        api_key: args.api_key,
        ..MpConfig::default()
    };
    let client = MpClient::new(&config)?;
    let kind = StructureKind::from_final_flag(args.final_structure);

    let pb = progress::create_spinner(&format!("Fetching {} from Materials Project", args.mp_id));
    let fetched = client.fetch_structure(&args.mp_id, kind);
    pb.finish_and_clear();
    let crystal = fetched?;

    println!("{}", crystal);
    output::print_separator();

    write_text(&args.output, &render(&crystal, args.format))?;
    output::print_success(&format!(
        "{} structure of {} saved to '{}' ({})",
        match kind {
            StructureKind::Final => "Final",
            StructureKind::Initial => "Initial",
        },
        args.mp_id,
        args.output.display(),
        args.format
    ));

    Ok(())
}

fn render(crystal: &Crystal, format: StructureFormat) -> String {
    match format {
        StructureFormat::Poscar => poscar::to_poscar_string(crystal),
        StructureFormat::Cif => cif::to_cif_string(crystal),
        StructureFormat::Cell => cell::to_cell_string(crystal),
    }
}
