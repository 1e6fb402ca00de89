//! # CIF 格式输出
//!
//! 写出 P1 对称性的 CIF，原子坐标为分数坐标。
//!
//! ## 依赖关系
//! - 被 `commands/download.rs` 使用
//! - 使用 `models/structure.rs`

use crate::models::Crystal;

/// 写出 CIF 文本
pub fn to_cif_string(crystal: &Crystal) -> String {
    let (a, b, c, alpha, beta, gamma) = crystal.lattice.parameters();

    let mut result = format!("data_{}\n", crystal.name.replace(char::is_whitespace, "_"));
    result.push_str("_symmetry_space_group_name_H-M    'P 1'\n");
    result.push_str("_symmetry_Int_Tables_number       1\n");
    result.push_str(&format!("_chemical_formula_sum    '{}'\n\n", crystal.formula()));

    for (key, value) in [
        ("_cell_length_a   ", a),
        ("_cell_length_b   ", b),
        ("_cell_length_c   ", c),
    ] {
        result.push_str(&format!("{} {:.6}\n", key, value));
    }
    for (key, value) in [
        ("_cell_angle_alpha", alpha),
        ("_cell_angle_beta ", beta),
        ("_cell_angle_gamma", gamma),
    ] {
        result.push_str(&format!("{} {:.4}\n", key, value));
    }
    result.push_str(&format!(
        "_cell_volume      {:.6}\n\n",
        crystal.lattice.volume().abs()
    ));

    result.push_str("loop_\n");
    for column in [
        "_atom_site_label",
        "_atom_site_type_symbol",
        "_atom_site_fract_x",
        "_atom_site_fract_y",
        "_atom_site_fract_z",
        "_atom_site_occupancy",
    ] {
        result.push_str(column);
        result.push('\n');
    }

    for (i, atom) in crystal.atoms.iter().enumerate() {
        let [x, y, z] = atom.position;
        result.push_str(&format!(
            "{}{} {} {:.10} {:.10} {:.10} 1.0\n",
            atom.element,
            i + 1,
            atom.element,
            x,
            y,
            z
        ));
    }

    result
}
