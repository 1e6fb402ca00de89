//! # EOS 数据导出
//!
//! 将模型曲线写成 `volume,energy` 两列 CSV。
//!
//! ## 依赖关系
//! - 被 `commands/eos.rs` 调用
//! - 使用 `csv` 库写入 CSV 文件

use crate::error::Result;

use std::io::Write;
use std::path::Path;

/// 导出曲线为 CSV 文件
pub fn curve_to_csv(curve: &[(f64, f64)], output_path: &Path) -> Result<()> {
    let wtr = csv::Writer::from_path(output_path)?;
    write_curve(wtr, curve)
}

/// 写入任意 writer（便于测试）
pub fn write_curve<W: Write>(mut wtr: csv::Writer<W>, curve: &[(f64, f64)]) -> Result<()> {
    wtr.write_record(["volume_A3", "energy_eV"])?;

    for (volume, energy) in curve {
        wtr.write_record(&[format!("{:.6}", volume), format!("{:.6}", energy)])?;
    }

    wtr.flush().map_err(csv::Error::from)?;
    Ok(())
}
