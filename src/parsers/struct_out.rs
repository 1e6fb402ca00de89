//! # SIESTA STRUCT_OUT 解析器
//!
//! ## 格式说明
//! ```text
//!   a1 a2 a3                   # 晶格向量 (Å)
//!   b1 b2 b3
//!   c1 c2 c3
//!   N                          # 原子数
//!   species_idx  Z  x y z      # 分数坐标，共 N 行
//! ```
//!
//! ## 依赖关系
//! - 被 `commands/convert.rs` 使用
//! - 使用 `models/structure.rs`, `models/element.rs`

use crate::error::{DfttkError, Result};
use crate::models::element;
use crate::models::{Atom, Crystal, Lattice};
use std::fs;
use std::path::Path;

/// 读取 STRUCT_OUT 文件
pub fn parse_struct_out_file(path: &Path) -> Result<Crystal> {
    let content = fs::read_to_string(path).map_err(|e| DfttkError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_struct_out_content(
        &content,
        path.file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("siesta"),
    )
}

/// 从字符串内容解析 STRUCT_OUT
pub fn parse_struct_out_content(content: &str, name: &str) -> Result<Crystal> {
    let err = |reason: String| DfttkError::ParseError {
        format: "STRUCT_OUT".to_string(),
        path: name.to_string(),
        reason,
    };

    let mut lines = content.lines().filter(|l| !l.trim().is_empty());

    let mut matrix = [[0.0; 3]; 3];
    for (i, row) in matrix.iter_mut().enumerate() {
        let line = lines
            .next()
            .ok_or_else(|| err(format!("Missing lattice vector {}", i + 1)))?;
        let values: Vec<f64> = line
            .split_whitespace()
            .map(|s| s.parse::<f64>())
            .collect::<std::result::Result<_, _>>()
            .map_err(|_| err(format!("Invalid lattice vector {}", i + 1)))?;
        if values.len() != 3 {
            return Err(err(format!("Lattice vector {} needs 3 components", i + 1)));
        }
        row.copy_from_slice(&values);
    }

    let n_atoms: usize = lines
        .next()
        .and_then(|l| l.trim().parse().ok())
        .ok_or_else(|| err("Invalid atom count".to_string()))?;

    let mut atoms = Vec::new();
    for i in 0..n_atoms {
        let line = lines
            .next()
            .ok_or_else(|| err(format!("Expected {} atoms, found {}", n_atoms, i)))?;
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 5 {
            return Err(err(format!("Atom {}: expected 5 columns", i + 1)));
        }

        let z: u32 = fields[1]
            .parse()
            .map_err(|_| err(format!("Atom {}: invalid atomic number", i + 1)))?;
        let mut position = [0.0; 3];
        for (k, p) in position.iter_mut().enumerate() {
            *p = fields[2 + k]
                .parse()
                .map_err(|_| err(format!("Atom {}: invalid coordinate", i + 1)))?;
        }

        atoms.push(Atom::new(element::symbol(z)?, position));
    }

    let mut crystal = Crystal::new(name, Lattice::from_vectors(matrix), atoms);
    crystal.source_format = Some("struct_out".to_string());
    Ok(crystal)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MGO: &str = "       0.000000000       2.105000000       2.105000000
       2.105000000       0.000000000       2.105000000
       2.105000000       2.105000000       0.000000000
          2
   1    12       0.000000000       0.000000000       0.000000000
   2     8       0.500000000       0.500000000       0.500000000
";

    #[test]
    fn test_parse_rocksalt() {
        let crystal = parse_struct_out_content(MGO, "MgO").unwrap();
        assert_eq!(crystal.atoms.len(), 2);
        assert_eq!(crystal.atoms[0].element, "Mg");
        assert_eq!(crystal.atoms[1].element, "O");
        assert_eq!(crystal.atoms[1].position, [0.5, 0.5, 0.5]);
        assert!((crystal.lattice.matrix[0][1] - 2.105).abs() < 1e-12);
    }

    #[test]
    fn test_truncated_file() {
        let truncated: String = MGO.lines().take(5).collect::<Vec<_>>().join("\n");
        let err = parse_struct_out_content(&truncated, "MgO").unwrap_err();
        match err {
            DfttkError::ParseError { reason, .. } => assert!(reason.contains("Expected 2 atoms")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unknown_atomic_number() {
        let content = "1 0 0\n0 1 0\n0 0 1\n1\n1 200 0 0 0\n";
        let err = parse_struct_out_content(content, "x").unwrap_err();
        assert!(matches!(err, DfttkError::UnknownElement(_)));
    }

    #[test]
    fn test_oversized_atom_count() {
        let content = "1 0 0\n0 1 0\n0 0 1\n18446744073709551615\n1 14 0 0 0\n";
        let err = parse_struct_out_content(content, "x").unwrap_err();
        match err {
            DfttkError::ParseError { reason, .. } => assert!(reason.contains("found 1")),
            other => panic!("unexpected error: {other}"),
        }
    }
}
