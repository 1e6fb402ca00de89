//! # 多项式最小二乘拟合
//!
//! 在 Vandermonde 矩阵上做 SVD 最小二乘，系数按最高次幂在前排列
//! (`[a, b, c]` 对应 `a x² + b x + c`)。
//!
//! ## 依赖关系
//! - 被 `eos/fit.rs` 使用
//! - 使用 `nalgebra`

use crate::error::{DfttkError, Result};
use nalgebra::{DMatrix, DVector};

/// 拟合 `degree` 次多项式
pub fn polyfit(x: &[f64], y: &[f64], degree: usize) -> Result<Vec<f64>> {
    if x.len() != y.len() {
        return Err(DfttkError::InvalidArgument(format!(
            "x and y lengths differ ({} vs {})",
            x.len(),
            y.len()
        )));
    }

    let n_coef = degree + 1;
    if x.len() < n_coef {
        return Err(DfttkError::InsufficientData {
            got: x.len(),
            need: n_coef,
        });
    }

    let vander = DMatrix::from_fn(x.len(), n_coef, |i, j| x[i].powi((degree - j) as i32));
    let rhs = DVector::from_column_slice(y);

    let svd = vander.svd(true, true);
    let max_sv = svd.singular_values.max();
    let eps = max_sv * f64::EPSILON * x.len() as f64;

    let coefs = svd
        .solve(&rhs, eps)
        .map_err(|e| DfttkError::DegenerateFit(format!("polynomial fit failed: {}", e)))?;

    if coefs.iter().any(|c| !c.is_finite()) {
        return Err(DfttkError::DegenerateFit(
            "polynomial fit produced non-finite coefficients".to_string(),
        ));
    }

    Ok(coefs.as_slice().to_vec())
}

/// 按 Horner 法计算多项式值
pub fn polyval(coefs: &[f64], x: f64) -> f64 {
    coefs.iter().fold(0.0, |acc, &c| acc * x + c)
}
