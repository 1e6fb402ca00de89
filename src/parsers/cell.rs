//! # CASTEP .cell 格式输出
//!
//! ```text
//! %BLOCK LATTICE_CART
//! ang
//! a1 a2 a3
//! b1 b2 b3
//! c1 c2 c3
//! %ENDBLOCK LATTICE_CART
//!
//! %BLOCK POSITIONS_FRAC
//! Element x y z
//! %ENDBLOCK POSITIONS_FRAC
//! ```
//!
//! ## 依赖关系
//! - 被 `commands/download.rs` 使用
//! - 使用 `models/structure.rs`

use crate::models::Crystal;

/// 写出 .cell 文本
pub fn to_cell_string(crystal: &Crystal) -> String {
    let mut result = String::from("%BLOCK LATTICE_CART\nang\n");
    for row in &crystal.lattice.matrix {
        result.push_str(&format!(
            "{:16.10} {:16.10} {:16.10}\n",
            row[0], row[1], row[2]
        ));
    }
    result.push_str("%ENDBLOCK LATTICE_CART\n\n%BLOCK POSITIONS_FRAC\n");
    for atom in &crystal.atoms {
        let [x, y, z] = atom.position;
        result.push_str(&format!(
            "{:4} {:16.10} {:16.10} {:16.10}\n",
            atom.element, x, y, z
        ));
    }
    result.push_str("%ENDBLOCK POSITIONS_FRAC\n");
    result
}
