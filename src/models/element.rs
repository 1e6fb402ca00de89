//! # 元素周期表
//!
//! 原子序数与元素符号互查。STRUCT_OUT 只记录原子序数，fdf 需要两者。
//!
//! ## 依赖关系
//! - 被 `parsers/struct_out.rs`, `siesta/fdf.rs` 使用

use crate::error::{DfttkError, Result};

/// 按原子序数排列，下标 0 对应 H
const SYMBOLS: [&str; 118] = [
    "H", "He", "Li", "Be", "B", "C", "N", "O", "F", "Ne", //
    "Na", "Mg", "Al", "Si", "P", "S", "Cl", "Ar", "K", "Ca", //
    "Sc", "Ti", "V", "Cr", "Mn", "Fe", "Co", "Ni", "Cu", "Zn", //
    "Ga", "Ge", "As", "Se", "Br", "Kr", "Rb", "Sr", "Y", "Zr", //
    "Nb", "Mo", "Tc", "Ru", "Rh", "Pd", "Ag", "Cd", "In", "Sn", //
    "Sb", "Te", "I", "Xe", "Cs", "Ba", "La", "Ce", "Pr", "Nd", //
    "Pm", "Sm", "Eu", "Gd", "Tb", "Dy", "Ho", "Er", "Tm", "Yb", //
    "Lu", "Hf", "Ta", "W", "Re", "Os", "Ir", "Pt", "Au", "Hg", //
    "Tl", "Pb", "Bi", "Po", "At", "Rn", "Fr", "Ra", "Ac", "Th", //
    "Pa", "U", "Np", "Pu", "Am", "Cm", "Bk", "Cf", "Es", "Fm", //
    "Md", "No", "Lr", "Rf", "Db", "Sg", "Bh", "Hs", "Mt", "Ds", //
    "Rg", "Cn", "Nh", "Fl", "Mc", "Lv", "Ts", "Og",
];

/// 原子序数 -> 元素符号
pub fn symbol(z: u32) -> Result<&'static str> {
    (z as usize)
        .checked_sub(1)
        .and_then(|i| SYMBOLS.get(i))
        .copied()
        .ok_or_else(|| DfttkError::UnknownElement(format!("Z = {}", z)))
}

/// 元素符号 -> 原子序数（大小写不敏感）
pub fn atomic_number(sym: &str) -> Result<u32> {
    SYMBOLS
        .iter()
        .position(|s| s.eq_ignore_ascii_case(sym))
        .map(|i| i as u32 + 1)
        .ok_or_else(|| DfttkError::UnknownElement(sym.to_string()))
}
