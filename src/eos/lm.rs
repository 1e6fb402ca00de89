//! # Levenberg–Marquardt 非线性最小二乘
//!
//! 最小化 `Σ (y_i - f(x_i; p))²`，无逐点权重。
//!
//! ## 实现要点
//! - 前向差分 Jacobian
//! - 阻尼正规方程 `(JᵀJ + λ·diag(JᵀJ)) δ = Jᵀr`，Cholesky 求解
//! - λ 在步长被接受时 ÷10，被拒绝时 ×10
//! - 残差出现非有限值的试探点一律拒绝
//! - 收敛判据与 MINPACK `lmdif` 默认值一致：`ftol = xtol = 1.49012e-8`，
//!   函数评估上限 `200 * (n_params + 1)`
//!
//! ## 依赖关系
//! - 被 `eos/fit.rs` 使用
//! - 使用 `nalgebra`

use crate::error::{DfttkError, Result};
use nalgebra::{DMatrix, DVector};
use std::cell::Cell;

/// 求解器选项
#[derive(Debug, Clone, Copy)]
pub struct LmOptions {
    /// 代价函数相对下降量阈值
    pub ftol: f64,
    /// 参数相对步长阈值
    pub xtol: f64,
    /// 函数评估上限，`None` 时取 `200 * (n_params + 1)`
    pub max_evaluations: Option<usize>,
    /// 初始阻尼因子
    pub initial_lambda: f64,
}

impl Default for LmOptions {
    fn default() -> Self {
        LmOptions {
            ftol: 1.49012e-8,
            xtol: 1.49012e-8,
            max_evaluations: None,
            initial_lambda: 1e-3,
        }
    }
}

/// 求解结果
#[derive(Debug, Clone)]
pub struct LmResult {
    pub params: Vec<f64>,
    /// 残差平方和
    pub cost: f64,
    pub evaluations: usize,
    pub iterations: usize,
}

/// 以 `p0` 为初值拟合 `model(x, p)` 到 `(x, y)`
pub fn levenberg_marquardt<F>(
    model: F,
    x: &[f64],
    y: &[f64],
    p0: &[f64],
    opts: &LmOptions,
) -> Result<LmResult>
where
    F: Fn(f64, &[f64]) -> f64,
{
    if x.len() != y.len() {
        return Err(DfttkError::InvalidArgument(format!(
            "x and y lengths differ ({} vs {})",
            x.len(),
            y.len()
        )));
    }

    let n_params = p0.len();
    let max_evaluations = opts.max_evaluations.unwrap_or(200 * (n_params + 1));

    let evaluations = Cell::new(0usize);
    let eval_residuals = |p: &[f64]| -> Option<DVector<f64>> {
        evaluations.set(evaluations.get() + 1);
        residuals(&model, x, y, p)
    };

    let mut p = DVector::from_column_slice(p0);
    let mut r = eval_residuals(p.as_slice()).ok_or_else(|| {
        DfttkError::DegenerateFit("model is not finite at the initial guess".to_string())
    })?;
    let mut cost = r.norm_squared();
    let mut lambda = opts.initial_lambda;
    let mut iterations = 0usize;

    loop {
        if cost == 0.0 {
            break;
        }
        if evaluations.get() >= max_evaluations {
            return Err(DfttkError::FitConvergence {
                evaluations: evaluations.get(),
            });
        }
        iterations += 1;

        // Jacobian: 每列一次函数评估
        let mut jac = DMatrix::<f64>::zeros(x.len(), n_params);
        for j in 0..n_params {
            let h = if p[j] == 0.0 {
                f64::EPSILON.sqrt()
            } else {
                f64::EPSILON.sqrt() * p[j].abs()
            };
            let mut shifted = p.clone();
            shifted[j] += h;
            // residual = y - f，故 df/dp = -(r' - r)/h
            let r_shift = eval_residuals(shifted.as_slice()).ok_or_else(|| {
                DfttkError::DegenerateFit(format!(
                    "model is not finite while differentiating parameter {}",
                    j
                ))
            })?;
            let column = (&r - &r_shift) / h;
            jac.set_column(j, &column);
        }

        let jtj = jac.transpose() * &jac;
        let gradient = jac.transpose() * &r;

        // 同一 Jacobian 下调整 λ 直至步长被接受
        let mut accepted = false;
        while !accepted {
            if evaluations.get() >= max_evaluations || !lambda.is_finite() {
                return Err(DfttkError::FitConvergence {
                    evaluations: evaluations.get(),
                });
            }

            let mut damped = jtj.clone();
            for i in 0..n_params {
                damped[(i, i)] += lambda * jtj[(i, i)].max(1e-12);
            }

            let delta = match damped.cholesky() {
                Some(chol) => chol.solve(&gradient),
                None => {
                    lambda *= 10.0;
                    continue;
                }
            };

            let step_small = delta.norm() <= opts.xtol * (p.norm() + opts.xtol);

            let trial = &p + &delta;
            match eval_residuals(trial.as_slice()) {
                Some(r_trial) => {
                    let trial_cost = r_trial.norm_squared();
                    if trial_cost < cost {
                        let actual = (cost - trial_cost) / cost;
                        let predicted = (cost - (&r - &jac * &delta).norm_squared()) / cost;

                        p = trial;
                        r = r_trial;
                        cost = trial_cost;
                        lambda = (lambda / 10.0).max(1e-12);
                        accepted = true;

                        if step_small
                            || (actual.abs() <= opts.ftol && predicted.abs() <= opts.ftol)
                        {
                            return Ok(LmResult {
                                params: p.as_slice().to_vec(),
                                cost,
                                evaluations: evaluations.get(),
                                iterations,
                            });
                        }
                    } else if step_small {
                        // 已无可改进空间
                        return Ok(LmResult {
                            params: p.as_slice().to_vec(),
                            cost,
                            evaluations: evaluations.get(),
                            iterations,
                        });
                    } else {
                        lambda *= 10.0;
                    }
                }
                None => {
                    if step_small {
                        return Ok(LmResult {
                            params: p.as_slice().to_vec(),
                            cost,
                            evaluations: evaluations.get(),
                            iterations,
                        });
                    }
                    lambda *= 10.0;
                }
            }
        }
    }

    Ok(LmResult {
        params: p.as_slice().to_vec(),
        cost,
        evaluations: evaluations.get(),
        iterations,
    })
}

/// 残差向量 `y - f(x; p)`；任一分量非有限时返回 `None`
fn residuals<F>(model: &F, x: &[f64], y: &[f64], p: &[f64]) -> Option<DVector<f64>>
where
    F: Fn(f64, &[f64]) -> f64,
{
    let values: Vec<f64> = x
        .iter()
        .zip(y.iter())
        .map(|(&xi, &yi)| yi - model(xi, p))
        .collect();

    if values.iter().all(|v| v.is_finite()) {
        Some(DVector::from_vec(values))
    } else {
        None
    }
}
