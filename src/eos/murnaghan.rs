//! # Murnaghan 状态方程
//!
//! 能量作为体积的函数 (PRB 28, 5480 (1983))：
//!
//! ```text
//! E(V) = E0 + B0 V / B' * ((V0/V)^B' / (B' - 1) + 1) - V0 B0 / (B' - 1)
//! ```
//!
//! B' = 1 处模型发散，此时返回 NaN，由拟合器拒绝该参数点。
//!
//! ## 依赖关系
//! - 被 `eos/fit.rs`, `eos/plot.rs` 使用

use crate::eos::lattice::LatticeType;

/// 判定 B' 落在极点上的容差
pub const BP_POLE_TOLERANCE: f64 = 1e-12;

/// eV/Å³ -> GPa
pub const EV_PER_A3_TO_GPA: f64 = 160.21766208;

/// Murnaghan 拟合参数
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MurnaghanParams {
    /// 平衡能量 (eV)
    pub e0: f64,
    /// 平衡体积下的体模量 (eV/Å³)
    pub b0: f64,
    /// 体模量对压力的导数 (无量纲)
    pub bp: f64,
    /// 平衡体积 (Å³)
    pub v0: f64,
}

impl MurnaghanParams {
    pub fn new(e0: f64, b0: f64, bp: f64, v0: f64) -> Self {
        MurnaghanParams { e0, b0, bp, v0 }
    }

    /// 按 [E0, B0, B', V0] 顺序
    pub fn from_slice(p: &[f64]) -> Self {
        MurnaghanParams::new(p[0], p[1], p[2], p[3])
    }

    pub fn to_vec(self) -> Vec<f64> {
        vec![self.e0, self.b0, self.bp, self.v0]
    }

    /// B' 是否落在 B' = 1 的极点
    pub fn on_pole(&self) -> bool {
        (self.bp - 1.0).abs() < BP_POLE_TOLERANCE
    }

    /// 计算体积 `v` 处的能量
    pub fn energy(&self, v: f64) -> f64 {
        murnaghan_energy(v, self.e0, self.b0, self.bp, self.v0)
    }

    /// 体模量 (GPa)
    pub fn b0_gpa(&self) -> f64 {
        self.b0 * EV_PER_A3_TO_GPA
    }

    /// 理论晶格常数 (Å)
    pub fn lattice_constant(&self, lattice: LatticeType) -> f64 {
        lattice.lattice_constant(self.v0)
    }
}

/// Murnaghan 模型本体
pub fn murnaghan_energy(v: f64, e0: f64, b0: f64, bp: f64, v0: f64) -> f64 {
    if (bp - 1.0).abs() < BP_POLE_TOLERANCE {
        return f64::NAN;
    }
    e0 + b0 * v / bp * ((v0 / v).powf(bp) / (bp - 1.0) + 1.0) - v0 * b0 / (bp - 1.0)
}
