//! # Murnaghan EOS 两步拟合
//!
//! 1. 能量对体积做二次多项式拟合，取抛物线极小点作为初值
//! 2. 以初值 `[E(v_min), 2 a v_min, 4, v_min]` 做 Levenberg–Marquardt 非线性回归
//!
//! 抛物线极小点落在样本体积范围之外只产生警告，不中断拟合。
//! 警告在非线性回归开始前交给调用方，回归失败时也不会丢失。
//!
//! ## 依赖关系
//! - 被 `eos/mod.rs` 使用
//! - 使用 `eos/polyfit.rs`, `eos/lm.rs`, `eos/murnaghan.rs`

use crate::eos::lm::{levenberg_marquardt, LmOptions, LmResult};
use crate::eos::murnaghan::{murnaghan_energy, MurnaghanParams};
use crate::eos::polyfit::{polyfit, polyval};
use crate::error::{DfttkError, Result};

/// 四参数模型所需的最少样本数
pub const MIN_POINTS: usize = 4;

/// B' 初值
pub const BP_SEED: f64 = 4.0;

/// 模型曲线默认采样点数
pub const CURVE_POINTS: usize = 1000;

/// 非致命的拟合警告
#[derive(Debug, Clone, PartialEq)]
pub enum FitWarning {
    /// 抛物线极小点不在样本体积范围内
    MinimumOutOfRange { v_min: f64, lower: f64, upper: f64 },
}

impl std::fmt::Display for FitWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FitWarning::MinimumOutOfRange { v_min, lower, upper } => write!(
                f,
                "minimum volume not in the range of results ({:.4} not in [{:.4}, {:.4}])",
                v_min, lower, upper
            ),
        }
    }
}

/// 拟合结果
#[derive(Debug, Clone)]
pub struct EosFit {
    pub params: MurnaghanParams,
    /// 由抛物线得到的初值
    pub seed: MurnaghanParams,
    pub warnings: Vec<FitWarning>,
    /// 残差平方和
    pub sum_squared_residuals: f64,
    pub evaluations: usize,
    pub iterations: usize,
}

/// 二次预拟合：返回初值与可能的范围警告
pub fn parabolic_seed(volumes: &[f64], energies: &[f64]) -> Result<(MurnaghanParams, Option<FitWarning>)> {
    let coefs = polyfit(volumes, energies, 2)?;
    let (a, b, c) = (coefs[0], coefs[1], coefs[2]);

    // 曲率相对线性项可忽略时视为零
    let v_scale = volumes.iter().fold(0.0_f64, |m, v| m.max(v.abs()));
    let reference = b.abs() * v_scale + c.abs();
    if a == 0.0 || (a * v_scale * v_scale).abs() <= 1e-12 * reference {
        return Err(DfttkError::DegenerateFit(
            "quadratic pre-fit has no curvature; cannot seed the Murnaghan fit".to_string(),
        ));
    }

    let v_min = -b / (2.0 * a);

    let lower = volumes.iter().copied().fold(f64::INFINITY, f64::min);
    let upper = volumes.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let warning = if v_min < lower || v_min > upper {
        Some(FitWarning::MinimumOutOfRange {
            v_min,
            lower,
            upper,
        })
    } else {
        None
    };

    let seed = MurnaghanParams::new(polyval(&coefs, v_min), 2.0 * a * v_min, BP_SEED, v_min);

    Ok((seed, warning))
}

/// 拟合 Murnaghan EOS，`on_warning` 在回归开始前收到预拟合警告
pub fn fit_murnaghan<W>(volumes: &[f64], energies: &[f64], on_warning: W) -> Result<EosFit>
where
    W: FnMut(&FitWarning),
{
    fit_with_options(volumes, energies, &LmOptions::default(), on_warning)
}

fn fit_with_options<W>(
    volumes: &[f64],
    energies: &[f64],
    options: &LmOptions,
    mut on_warning: W,
) -> Result<EosFit>
where
    W: FnMut(&FitWarning),
{
    if volumes.len() != energies.len() {
        return Err(DfttkError::InvalidArgument(format!(
            "volume and energy lengths differ ({} vs {})",
            volumes.len(),
            energies.len()
        )));
    }
    if volumes.len() < MIN_POINTS {
        return Err(DfttkError::InsufficientData {
            got: volumes.len(),
            need: MIN_POINTS,
        });
    }

    let (seed, warning) = parabolic_seed(volumes, energies)?;
    let warnings: Vec<FitWarning> = warning.into_iter().collect();
    for w in &warnings {
        on_warning(w);
    }

    let model = |v: f64, p: &[f64]| murnaghan_energy(v, p[0], p[1], p[2], p[3]);
    let LmResult {
        params,
        cost,
        evaluations,
        iterations,
    } = levenberg_marquardt(model, volumes, energies, &seed.to_vec(), options)?;

    let params = MurnaghanParams::from_slice(&params);
    if params.on_pole() || params.to_vec().iter().any(|p| !p.is_finite()) {
        return Err(DfttkError::DegenerateFit(format!(
            "fit converged to an undefined model (B' = {})",
            params.bp
        )));
    }

    Ok(EosFit {
        params,
        seed,
        warnings,
        sum_squared_residuals: cost,
        evaluations,
        iterations,
    })
}

/// 在 `[v_lo, v_hi]` 上等距采样 `n` 个体积并计算模型能量
///
/// 端点精确包含在内。
pub fn model_curve(params: &MurnaghanParams, v_lo: f64, v_hi: f64, n: usize) -> Vec<(f64, f64)> {
    linspace(v_lo, v_hi, n)
        .into_iter()
        .map(|v| (v, params.energy(v)))
        .collect()
}

fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            let mut out: Vec<f64> = (0..n).map(|i| start + step * i as f64).collect();
            out[n - 1] = end;
            out
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn synthetic(params: MurnaghanParams, v_lo: f64, v_hi: f64, n: usize) -> (Vec<f64>, Vec<f64>) {
        let v: Vec<f64> = linspace(v_lo, v_hi, n);
        let e: Vec<f64> = v.iter().map(|&x| params.energy(x)).collect();
        (v, e)
    }

    #[test]
    fn test_recovers_synthetic_parameters() {
        let truth = MurnaghanParams::new(-10.8, 0.6, 4.5, 40.0);
        let (v, e) = synthetic(truth, 34.0, 46.0, 11);

        let fit = fit_murnaghan(&v, &e, |_| {}).unwrap();
        let p = fit.params;

        assert!((p.e0 - truth.e0).abs() < 1e-6);
        assert!((p.b0 - truth.b0).abs() / truth.b0 < 1e-4);
        assert!((p.bp - truth.bp).abs() < 1e-3);
        assert!((p.v0 - truth.v0).abs() / truth.v0 < 1e-5);
        assert!(fit.warnings.is_empty());
    }

    #[test]
    fn test_recovers_soft_material() {
        let truth = MurnaghanParams::new(-3.2, 0.1, 3.5, 120.0);
        let (v, e) = synthetic(truth, 100.0, 140.0, 9);

        let fit = fit_murnaghan(&v, &e, |_| {}).unwrap();
        assert!((fit.params.v0 - 120.0).abs() < 1e-3);
        assert!((fit.params.e0 + 3.2).abs() < 1e-6);
    }

    #[test]
    fn test_cubic_sample_converges_inside_range() {
        let dims = [3.5, 3.6, 3.7, 3.8, 3.9];
        let energies = [-10.0, -10.2, -10.25, -10.2, -10.0];
        let volumes: Vec<f64> = dims.iter().map(|d: &f64| d.powi(3)).collect();

        let fit = fit_murnaghan(&volumes, &energies, |_| {}).unwrap();

        assert!(fit.params.v0 > 42.875 && fit.params.v0 < 59.319);
        // 初值接近能量最低样本的体积 3.7³
        assert!((fit.seed.v0 - 3.7_f64.powi(3)).abs() < 2.0);
        assert_eq!(fit.seed.bp, BP_SEED);
        assert!(fit.warnings.is_empty());
    }

    #[test]
    fn test_order_invariance() {
        let truth = MurnaghanParams::new(-5.0, 0.4, 4.2, 60.0);
        let (v, e) = synthetic(truth, 52.0, 68.0, 7);
        let fwd = fit_murnaghan(&v, &e, |_| {}).unwrap();

        let v_rev: Vec<f64> = v.iter().rev().copied().collect();
        let e_rev: Vec<f64> = e.iter().rev().copied().collect();
        let rev = fit_murnaghan(&v_rev, &e_rev, |_| {}).unwrap();

        assert!((fwd.params.v0 - rev.params.v0).abs() < 1e-6);
        assert!((fwd.params.e0 - rev.params.e0).abs() < 1e-8);
    }

    #[test]
    fn test_insufficient_data() {
        let err = fit_murnaghan(&[40.0, 45.0, 50.0], &[-1.0, -2.0, -1.0], |_| {}).unwrap_err();
        assert!(matches!(err, DfttkError::InsufficientData { got: 3, need: 4 }));
    }

    #[test]
    fn test_linear_data_is_degenerate() {
        let v = [40.0, 42.0, 44.0, 46.0, 48.0];
        let e: Vec<f64> = v.iter().map(|x| -0.1 * x + 2.0).collect();
        let err = fit_murnaghan(&v, &e, |_| {}).unwrap_err();
        assert!(matches!(err, DfttkError::DegenerateFit(_)));
    }

    #[test]
    fn test_minimum_outside_range_warns() {
        // 只采样压缩侧，抛物线极小点落在范围之外
        let truth = MurnaghanParams::new(-8.0, 0.5, 4.0, 50.0);
        let (v, e) = synthetic(truth, 38.0, 44.0, 6);

        let (_, warning) = parabolic_seed(&v, &e).unwrap();
        assert!(matches!(
            warning,
            Some(FitWarning::MinimumOutOfRange { .. })
        ));

        let text = warning.unwrap().to_string();
        assert!(text.starts_with("minimum volume not in the range of results"));
    }

    #[test]
    fn test_warning_reported_before_regression_fails() {
        let truth = MurnaghanParams::new(-8.0, 0.5, 4.0, 50.0);
        let (v, e) = synthetic(truth, 38.0, 44.0, 6);
        let options = LmOptions {
            max_evaluations: Some(2),
            ..LmOptions::default()
        };

        let mut seen = Vec::new();
        let err = fit_with_options(&v, &e, &options, |w| seen.push(w.clone())).unwrap_err();

        assert!(matches!(err, DfttkError::FitConvergence { .. }));
        assert_eq!(seen.len(), 1);
        assert!(matches!(seen[0], FitWarning::MinimumOutOfRange { .. }));
    }

    #[test]
    fn test_warning_callback_matches_recorded_warnings() {
        let truth = MurnaghanParams::new(-8.0, 0.5, 4.0, 50.0);
        let (v, e) = synthetic(truth, 38.0, 44.0, 6);

        let mut seen = Vec::new();
        let fit = fit_murnaghan(&v, &e, |w| seen.push(w.clone())).unwrap();

        assert_eq!(seen, fit.warnings);
        assert!(fit.iterations > 0);
    }

    #[test]
    fn test_model_curve_endpoints_and_monotonic() {
        let p = MurnaghanParams::new(-10.0, 0.5, 4.0, 50.0);
        let curve = model_curve(&p, 42.875, 59.319, CURVE_POINTS);

        assert_eq!(curve.len(), CURVE_POINTS);
        assert_eq!(curve[0].0, 42.875);
        assert_eq!(curve[CURVE_POINTS - 1].0, 59.319);
        assert!(curve.windows(2).all(|w| w[1].0 > w[0].0));
    }
}
