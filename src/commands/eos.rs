//! # eos 命令实现
//!
//! ## 功能
//! - 读取数据并拟合 Murnaghan EOS，打印参数报告
//! - 保存 PNG/SVG 对比图，或在终端打印字符图
//! - 可选导出模型曲线 CSV 与残差表
//!
//! ## 依赖关系
//! - 使用 `cli/eos.rs` 定义的参数
//! - 使用 `eos/`
//! - 使用 `utils/output.rs`

use crate::cli::eos::EosArgs;
use crate::eos::{self, export, plot, EosReport};
use crate::error::Result;
use crate::utils::output;

use tabled::{Table, Tabled};

const TEXT_PLOT_WIDTH: usize = 72;
const TEXT_PLOT_HEIGHT: usize = 20;

/// 残差表行
#[derive(Debug, Clone, Tabled)]
struct ResidualRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "a (Å)")]
    dimension: String,
    #[tabled(rename = "V (Å³)")]
    volume: String,
    #[tabled(rename = "E (eV)")]
    energy: String,
    #[tabled(rename = "E fit (eV)")]
    fitted: String,
    #[tabled(rename = "ΔE (meV)")]
    residual: String,
}

/// 执行 eos 命令
pub fn execute(args: EosArgs) -> Result<()> {
    let report = eos::fit_and_plot(&args.filename)?;
    let series = report.series();

    match args.fig_filename {
        Some(ref path) => {
            let title = format!("Murnaghan EOS ({})", report.data.lattice);
            plot::save_eos_plot(&series, path, &title, args.width, args.height)?;
            output::print_success(&format!("Plot saved to '{}'", path.display()));
        }
        None => {
            println!();
            print!(
                "{}",
                plot::render_text_plot(&series, TEXT_PLOT_WIDTH, TEXT_PLOT_HEIGHT)
            );
        }
    }

    if let Some(ref path) = args.curve_csv {
        export::curve_to_csv(&report.curve, path)?;
        output::print_success(&format!("Fitted curve saved to '{}'", path.display()));
    }

    if args.show_residuals {
        print_residuals(&report);
    }

    Ok(())
}

fn residual_rows(report: &EosReport) -> Vec<ResidualRow> {
    let params = &report.fit.params;
    report
        .data
        .dimensions
        .iter()
        .zip(report.points.iter())
        .enumerate()
        .map(|(i, (&dim, &(v, e)))| {
            let fitted = params.energy(v);
            ResidualRow {
                index: i + 1,
                dimension: format!("{:.4}", dim),
                volume: format!("{:.4}", v),
                energy: format!("{:.6}", e),
                fitted: format!("{:.6}", fitted),
                residual: format!("{:.3}", (e - fitted) * 1000.0),
            }
        })
        .collect()
}

/// 表格下方的拟合摘要：体弹模量、抛物线初值与求解器统计
fn summary_lines(report: &EosReport) -> Vec<String> {
    let fit = &report.fit;
    vec![
        format!("B(V0) = {:.2} GPa", fit.params.b0_gpa()),
        format!(
            "Parabolic seed: V0 = {:.4} A^3, E0 = {:.4} eV, B(V0) = {:.4} eV/A^3, B' = {:.1}",
            fit.seed.v0, fit.seed.e0, fit.seed.b0, fit.seed.bp
        ),
        format!(
            "Sum of squared residuals = {:.3e} eV^2 ({} iterations, {} evaluations)",
            fit.sum_squared_residuals, fit.iterations, fit.evaluations
        ),
    ]
}

fn print_residuals(report: &EosReport) {
    output::print_header("Residuals");
    println!("{}", Table::new(residual_rows(report)));
    output::print_separator();
    for line in summary_lines(report) {
        output::print_info(&line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eos::data::parse_data;

    #[test]
    fn test_residual_rows_follow_file_order() {
        let data = parse_data(
            "cubic\n3.9 -10.0\n3.5 -10.0\n3.7 -10.25\n3.6 -10.2\n3.8 -10.2\n",
            "sample",
        )
        .unwrap();
        let report = eos::fit_data(data, |_| {}).unwrap();
        let rows = residual_rows(&report);

        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0].index, 1);
        assert_eq!(rows[0].dimension, "3.9000");
        assert_eq!(rows[1].dimension, "3.5000");
        assert_eq!(rows[2].energy, "-10.250000");

        let table = Table::new(&rows).to_string();
        assert!(table.contains("ΔE (meV)"));
    }

    #[test]
    fn test_summary_reports_seed_and_solver_counts() {
        let data = parse_data(
            "cubic\n3.5 -10.0\n3.6 -10.2\n3.7 -10.25\n3.8 -10.2\n3.9 -10.0\n",
            "sample",
        )
        .unwrap();
        let report = eos::fit_data(data, |_| {}).unwrap();
        let lines = summary_lines(&report);

        assert_eq!(lines.len(), 3);
        assert!(lines[0].ends_with("GPa"));
        assert!(lines[1].contains("B' = 4.0"));
        assert!(lines[2].contains(&format!("{} iterations", report.fit.iterations)));
    }
}
