//! # 结构转换命令实现
//!
//! - `struct-out-to-poscar`: 读 STRUCT_OUT，写 POSCAR
//! - `poscar-to-fdf`: 读 POSCAR，写 fdf 并链接赝势
//!
//! ## 依赖关系
//! - 使用 `cli/convert.rs` 定义的参数
//! - 使用 `parsers/`, `siesta/`
//! - 使用 `utils/output.rs`

use crate::cli::convert::{PoscarToFdfArgs, StructOutArgs};
use crate::commands::write_text;
use crate::error::Result;
use crate::parsers::{poscar, struct_out};
use crate::siesta::{self, SiestaConfig};
use crate::utils::output;

/// 执行 struct-out-to-poscar 命令
pub fn execute_struct_out(args: StructOutArgs) -> Result<()> {
    let crystal = struct_out::parse_struct_out_file(&args.struct_out)?;
    write_text(&args.out_poscar, &poscar::to_poscar_string(&crystal))?;

    output::print_conversion(
        &args.struct_out.display().to_string(),
        &args.out_poscar.display().to_string(),
    );
    Ok(())
}

/// 执行 poscar-to-fdf 命令
pub fn execute_poscar_to_fdf(args: PoscarToFdfArgs) -> Result<()> {
    let crystal = poscar::parse_poscar_file(&args.poscar)?;
    let config = SiestaConfig {
        pseudo_path: args.pseudos_dir,
        label: args.label,
    };

    let written = siesta::write_siesta_fdf(&crystal, &config, &args.output_dir)?;

    output::print_conversion(
        &args.poscar.display().to_string(),
        &written.fdf_path.display().to_string(),
    );
    for pp in &written.pseudopotentials {
        output::print_info(&format!("Linked {}", pp.display()));
    }
    output::print_done(&format!(
        "{} species, {} atoms",
        written.pseudopotentials.len(),
        crystal.atoms.len()
    ));
    Ok(())
}
