//! # EOS 图表生成
//!
//! 数据点（黑色圆点）与拟合曲线（红色折线）叠加。
//!
//! ## 功能
//! - `plotters` 渲染 PNG / SVG（按扩展名选择）
//! - 无输出文件时在终端绘制字符图
//!
//! ## 依赖关系
//! - 被 `commands/eos.rs` 调用
//! - 使用 `plotters` 渲染图表

use crate::error::{DfttkError, Result};

use plotters::prelude::*;
use std::path::Path;

/// 绘图所需的两组序列
#[derive(Debug, Clone)]
pub struct EosSeries<'a> {
    /// 原始 (体积, 能量) 样本
    pub points: &'a [(f64, f64)],
    /// 模型曲线
    pub curve: &'a [(f64, f64)],
}

/// 输出到图片文件，`.svg` 扩展名使用 SVG 后端，其余使用位图
pub fn save_eos_plot(
    series: &EosSeries,
    output_path: &Path,
    title: &str,
    width: u32,
    height: u32,
) -> Result<()> {
    let is_svg = output_path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("svg"))
        .unwrap_or(false);

    if is_svg {
        let root = SVGBackend::new(output_path, (width, height)).into_drawing_area();
        draw_eos_chart(&root, series, title)?;
        root.present()
            .map_err(|e| DfttkError::Other(e.to_string()))?;
    } else {
        let root = BitMapBackend::new(output_path, (width, height)).into_drawing_area();
        draw_eos_chart(&root, series, title)?;
        root.present()
            .map_err(|e| DfttkError::Other(e.to_string()))?;
    }
    Ok(())
}

/// 绘制 EOS 图表的核心逻辑
fn draw_eos_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    series: &EosSeries,
    title: &str,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)
        .map_err(|e| DfttkError::Other(format!("{:?}", e)))?;

    let (x_min, x_max) = padded_range(series.points.iter().chain(series.curve).map(|p| p.0));
    let (y_min, y_max) = padded_range(series.points.iter().chain(series.curve).map(|p| p.1));

    let mut chart = ChartBuilder::on(root)
        .caption(title, ("sans-serif", 24).into_font())
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)
        .map_err(|e| DfttkError::Other(format!("{:?}", e)))?;

    chart
        .configure_mesh()
        .x_desc("Volume (Å³)")
        .y_desc("Energy (eV)")
        .x_label_style(("sans-serif", 14))
        .y_label_style(("sans-serif", 14))
        .axis_desc_style(("sans-serif", 16))
        .draw()
        .map_err(|e| DfttkError::Other(format!("{:?}", e)))?;

    chart
        .draw_series(LineSeries::new(
            series.curve.iter().copied(),
            RED.stroke_width(2),
        ))
        .map_err(|e| DfttkError::Other(format!("{:?}", e)))?
        .label("Murnaghan fit")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED.stroke_width(2)));

    chart
        .draw_series(
            series
                .points
                .iter()
                .map(|&(x, y)| Circle::new((x, y), 5, BLACK.filled())),
        )
        .map_err(|e| DfttkError::Other(format!("{:?}", e)))?
        .label("Data")
        .legend(|(x, y)| Circle::new((x + 10, y), 5, BLACK.filled()));

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(|e| DfttkError::Other(format!("{:?}", e)))?;

    Ok(())
}

/// 数据范围两侧各留 5%
fn padded_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (lo, hi) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });

    if !lo.is_finite() || !hi.is_finite() {
        return (0.0, 1.0);
    }
    let span = hi - lo;
    if span <= 0.0 {
        let pad = lo.abs().max(1.0) * 0.05;
        return (lo - pad, hi + pad);
    }
    (lo - 0.05 * span, hi + 0.05 * span)
}

/// 终端字符图：曲线 `-`，数据点 `o`
pub fn render_text_plot(series: &EosSeries, width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let (x_min, x_max) = padded_range(series.points.iter().chain(series.curve).map(|p| p.0));
    let (y_min, y_max) = padded_range(series.points.iter().chain(series.curve).map(|p| p.1));

    let map_x = |x: f64| -> usize {
        let t = ((x - x_min) / (x_max - x_min)).clamp(0.0, 1.0);
        (t * (width - 1) as f64).round() as usize
    };
    // 行 0 在顶部
    let map_y = |y: f64| -> usize {
        let t = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
        (height - 1) - (t * (height - 1) as f64).round() as usize
    };

    let mut grid = vec![vec![' '; width]; height];

    for &(x, y) in series.curve {
        if x.is_finite() && y.is_finite() {
            grid[map_y(y)][map_x(x)] = '-';
        }
    }
    for &(x, y) in series.points {
        grid[map_y(y)][map_x(x)] = 'o';
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Volume=[{:.3}, {:.3}] A^3 | Energy=[{:.4}, {:.4}] eV\n",
        x_min, x_max, y_min, y_max
    ));
    for row in grid {
        out.push('|');
        out.push_str(row.into_iter().collect::<String>().trim_end());
        out.push('\n');
    }
    out.push('+');
    out.push_str(&"-".repeat(width));
    out.push('\n');
    out
}
