//! # 状态方程 (EOS) 拟合模块
//!
//! 读取 `晶格类型 + (晶格常数, 总能)` 数据，拟合 Murnaghan EOS。
//!
//! ## 子模块
//! - `lattice`: 晶格类型与体积换算因子
//! - `data`: 数据文件读取
//! - `murnaghan`: 模型与参数
//! - `polyfit`: 二次预拟合
//! - `lm`: Levenberg–Marquardt 求解器
//! - `fit`: 两步拟合流程
//! - `plot`: 图表生成
//! - `export`: 曲线导出
//!
//! ## 依赖关系
//! - 被 `commands/eos.rs` 使用

pub mod data;
pub mod export;
pub mod fit;
pub mod lattice;
pub mod lm;
pub mod murnaghan;
pub mod plot;
pub mod polyfit;

pub use data::{read_data, EosData};
pub use fit::{fit_murnaghan, model_curve, EosFit, FitWarning, CURVE_POINTS};
pub use lattice::LatticeType;
pub use murnaghan::MurnaghanParams;

use crate::error::Result;
use crate::utils::output;
use std::path::Path;

/// 一次完整拟合的产物
#[derive(Debug, Clone)]
pub struct EosReport {
    pub data: EosData,
    pub fit: EosFit,
    /// 原始 (体积, 能量) 点
    pub points: Vec<(f64, f64)>,
    /// 模型曲线 (体积, 能量)
    pub curve: Vec<(f64, f64)>,
}

impl EosReport {
    pub fn series(&self) -> plot::EosSeries<'_> {
        plot::EosSeries {
            points: &self.points,
            curve: &self.curve,
        }
    }
}

/// 拟合数据并整理绘图序列，预拟合警告交给 `on_warning`
pub fn fit_data<W>(data: EosData, on_warning: W) -> Result<EosReport>
where
    W: FnMut(&FitWarning),
{
    let fit = fit_murnaghan(&data.volumes, &data.energies, on_warning)?;

    let (v_lo, v_hi) = data.volume_range();
    let curve = model_curve(&fit.params, v_lo, v_hi, CURVE_POINTS);
    let points = data
        .volumes
        .iter()
        .copied()
        .zip(data.energies.iter().copied())
        .collect();

    Ok(EosReport {
        data,
        fit,
        points,
        curve,
    })
}

/// 读取、拟合并将报告打印到标准输出
pub fn fit_and_plot(path: &Path) -> Result<EosReport> {
    let data = read_data(path)?;
    let report = fit_data(data, |w| output::print_warning(&w.to_string()))?;

    print!("{}", format_report(&report.fit.params, report.data.lattice));

    Ok(report)
}

/// 拟合参数报告（六行，4 位小数）
pub fn format_report(params: &MurnaghanParams, lattice: LatticeType) -> String {
    let mut out = String::new();
    out.push_str("Fit parameters:\n");
    out.push_str(&format!("V0     =  {:.4} A^3\n", params.v0));
    out.push_str(&format!("E0     =  {:.4} eV\n", params.e0));
    out.push_str(&format!("B(V0)  =  {:.4} eV/A^3\n", params.b0));
    out.push_str(&format!("B'(VO) =  {:.4}\n", params.bp));
    out.push_str(&format!(
        "Theoretical lattice constant: {:.4} A\n",
        params.lattice_constant(lattice)
    ));
    out
}
