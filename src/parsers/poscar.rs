//! # VASP POSCAR 格式读写
//!
//! ## POSCAR 格式说明
//! ```text
//! Comment line (structure name)
//! 1.0                    # scaling factor (负值表示目标体积)
//! a1 a2 a3
//! b1 b2 b3
//! c1 c2 c3
//! Element1 Element2 ...  # VASP 5+，VASP 4 缺省
//! n1 n2 ...
//! Selective dynamics     # 可选
//! Direct/Cartesian
//! x1 y1 z1
//! ...
//! ```
//!
//! VASP 4 文件没有元素行时，尝试从注释行按顺序取元素符号。
//!
//! ## 依赖关系
//! - 被 `commands/` 使用
//! - 使用 `models/structure.rs`

use crate::error::{DfttkError, Result};
use crate::models::element;
use crate::models::{Atom, Crystal, Lattice};
use std::fs;
use std::path::Path;

/// 读取 POSCAR/CONTCAR 文件
pub fn parse_poscar_file(path: &Path) -> Result<Crystal> {
    let content = fs::read_to_string(path).map_err(|e| DfttkError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_poscar_content(
        &content,
        path.file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unknown"),
    )
}

fn poscar_error(name: &str, reason: impl Into<String>) -> DfttkError {
    DfttkError::ParseError {
        format: "poscar".to_string(),
        path: name.to_string(),
        reason: reason.into(),
    }
}

fn parse_floats(line: &str, count: usize) -> Option<Vec<f64>> {
    let values: Vec<f64> = line
        .split_whitespace()
        .take(count)
        .map(|s| s.parse().ok())
        .collect::<Option<Vec<f64>>>()?;
    (values.len() == count).then_some(values)
}

/// 从字符串内容解析 POSCAR
pub fn parse_poscar_content(content: &str, default_name: &str) -> Result<Crystal> {
    let lines: Vec<&str> = content.lines().collect();
    if lines.len() < 7 {
        return Err(poscar_error(default_name, "File too short"));
    }

    let comment = lines[0].trim();
    let name = if comment.is_empty() {
        default_name.to_string()
    } else {
        comment.to_string()
    };

    let scale: f64 = lines[1]
        .split_whitespace()
        .next()
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| poscar_error(&name, "Invalid scaling factor on line 2"))?;

    let mut raw = [[0.0; 3]; 3];
    for (i, row) in raw.iter_mut().enumerate() {
        let v = parse_floats(lines[2 + i], 3)
            .ok_or_else(|| poscar_error(&name, format!("Invalid lattice vector on line {}", 3 + i)))?;
        row.copy_from_slice(&v);
    }

    // 负的缩放因子表示目标体积
    let factor = if scale < 0.0 {
        let v = Lattice::from_vectors(raw).volume().abs();
        (-scale / v).cbrt()
    } else {
        scale
    };
    let lattice = Lattice::from_vectors(raw.map(|row| row.map(|x| x * factor)));

    let first_tokens: Vec<&str> = lines[5].split_whitespace().collect();
    let vasp4 = first_tokens
        .first()
        .map(|t| t.parse::<usize>().is_ok())
        .unwrap_or(false);

    let (elements, counts_line) = if vasp4 {
        (Vec::new(), 5)
    } else {
        let elements: Vec<String> = first_tokens
            .iter()
            // "Si_pv" / "Fe/abc" 之类的 POTCAR 标签只取元素部分
            .map(|t| t.split(['_', '/']).next().unwrap_or(t).to_string())
            .collect();
        (elements, 6)
    };

    let counts: Vec<usize> = lines
        .get(counts_line)
        .ok_or_else(|| poscar_error(&name, "Missing atom counts line"))?
        .split_whitespace()
        .map(|s| s.parse().ok())
        .collect::<Option<Vec<usize>>>()
        .ok_or_else(|| poscar_error(&name, "Invalid atom counts"))?;

    let elements = if vasp4 {
        elements_from_comment(comment, counts.len())
            .ok_or_else(|| poscar_error(&name, "VASP 4 file without element symbols"))?
    } else {
        elements
    };

    if elements.len() != counts.len() {
        return Err(poscar_error(
            &name,
            format!(
                "{} element symbols but {} atom counts",
                elements.len(),
                counts.len()
            ),
        ));
    }

    let mut coord_line = counts_line + 1;
    if lines
        .get(coord_line)
        .map(|l| l.trim_start().to_lowercase().starts_with('s'))
        .unwrap_or(false)
    {
        coord_line += 1;
    }

    let mode = lines
        .get(coord_line)
        .ok_or_else(|| poscar_error(&name, "Missing coordinate type line"))?
        .trim_start()
        .to_lowercase();
    let cartesian = mode.starts_with('c') || mode.starts_with('k');

    counts
        .iter()
        .try_fold(0usize, |acc, &c| acc.checked_add(c))
        .ok_or_else(|| poscar_error(&name, "Atom counts overflow"))?;

    let mut atoms = Vec::new();
    let mut line_idx = coord_line + 1;
    for (elem, &count) in elements.iter().zip(counts.iter()) {
        for _ in 0..count {
            let line = lines
                .get(line_idx)
                .ok_or_else(|| poscar_error(&name, "Fewer positions than atom counts"))?;
            let v = parse_floats(line, 3).ok_or_else(|| {
                poscar_error(&name, format!("Invalid position on line {}", line_idx + 1))
            })?;
            let position = if cartesian {
                let cart = [v[0] * factor, v[1] * factor, v[2] * factor];
                lattice
                    .cart_to_frac(cart)
                    .ok_or_else(|| poscar_error(&name, "Singular lattice"))?
            } else {
                [v[0], v[1], v[2]]
            };
            atoms.push(Atom::new(elem.clone(), position));
            line_idx += 1;
        }
    }

    let mut crystal = Crystal::new(name, lattice, atoms);
    crystal.source_format = Some("poscar".to_string());
    Ok(crystal)
}

/// 注释行中按顺序出现的前 `n` 个合法元素符号
fn elements_from_comment(comment: &str, n: usize) -> Option<Vec<String>> {
    let found: Vec<String> = comment
        .split_whitespace()
        .filter(|t| element::atomic_number(t).is_ok())
        .take(n)
        .map(|t| t.to_string())
        .collect();
    (found.len() == n).then_some(found)
}

/// 写出 VASP 5 POSCAR（同种元素归并，Direct 坐标）
pub fn to_poscar_string(crystal: &Crystal) -> String {
    let species = crystal.species();

    let mut result = String::new();
    result.push_str(&format!("{}\n", crystal.name));
    result.push_str("1.0\n");

    for row in &crystal.lattice.matrix {
        result.push_str(&format!(
            "  {:16.10}  {:16.10}  {:16.10}\n",
            row[0], row[1], row[2]
        ));
    }

    result.push_str(&format!("   {}\n", species.join("   ")));
    let counts: Vec<String> = species
        .iter()
        .map(|el| {
            crystal
                .atoms
                .iter()
                .filter(|a| a.element == *el)
                .count()
                .to_string()
        })
        .collect();
    result.push_str(&format!("   {}\n", counts.join("   ")));
    result.push_str("Direct\n");

    for el in &species {
        for atom in crystal.atoms.iter().filter(|a| a.element == *el) {
            result.push_str(&format!(
                "  {:16.10}  {:16.10}  {:16.10}\n",
                atom.position[0], atom.position[1], atom.position[2]
            ));
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    const SI_DIAMOND: &str = r#"Si8
5.43
1.0 0.0 0.0
0.0 1.0 0.0
0.0 0.0 1.0
Si
2
Direct
0.00 0.00 0.00
0.25 0.25 0.25
"#;

    #[test]
    fn test_parse_vasp5_with_scale() {
        let crystal = parse_poscar_content(SI_DIAMOND, "si").unwrap();
        assert_eq!(crystal.name, "Si8");
        assert_eq!(crystal.atoms.len(), 2);
        assert!((crystal.lattice.matrix[0][0] - 5.43).abs() < 1e-12);
        assert_eq!(crystal.atoms[1].position, [0.25, 0.25, 0.25]);
    }

    #[test]
    fn test_negative_scale_is_volume() {
        let content = "cell\n-64.0\n1 0 0\n0 1 0\n0 0 1\nAl\n1\nDirect\n0 0 0\n";
        let crystal = parse_poscar_content(content, "al").unwrap();
        assert!((crystal.lattice.volume() - 64.0).abs() < 1e-9);
    }

    #[test]
    fn test_cartesian_and_selective_dynamics() {
        let content = r#"Fe bcc
2.0
1.4 0.0 0.0
0.0 1.4 0.0
0.0 0.0 1.4
Fe
2
Selective dynamics
Cartesian
0.0 0.0 0.0 T T T
0.7 0.7 0.7 F F F
"#;
        let crystal = parse_poscar_content(content, "fe").unwrap();
        // 笛卡尔坐标同样乘以缩放因子
        for x in crystal.atoms[1].position {
            assert!((x - 0.5).abs() < 1e-12);
        }
    }

    #[test]
    fn test_vasp4_takes_elements_from_comment() {
        let content = "Ga As zincblende\n5.65\n0 .5 .5\n.5 0 .5\n.5 .5 0\n1 1\nDirect\n0 0 0\n.25 .25 .25\n";
        let crystal = parse_poscar_content(content, "gaas").unwrap();
        assert_eq!(crystal.species(), vec!["Ga", "As"]);
    }

    #[test]
    fn test_potcar_style_symbols_trimmed() {
        let content = "x\n1.0\n3 0 0\n0 3 0\n0 0 3\nNa_pv Cl\n1 1\nDirect\n0 0 0\n.5 .5 .5\n";
        let crystal = parse_poscar_content(content, "x").unwrap();
        assert_eq!(crystal.species(), vec!["Na", "Cl"]);
    }

    #[test]
    fn test_missing_positions_is_error() {
        let content = "x\n1.0\n3 0 0\n0 3 0\n0 0 3\nNa Cl\n1 1\nDirect\n0 0 0\n";
        let err = parse_poscar_content(content, "x").unwrap_err();
        assert!(matches!(err, DfttkError::ParseError { .. }));
    }

    #[test]
    fn test_writer_groups_species() {
        let lattice = Lattice::from_vectors([[4.0, 0.0, 0.0], [0.0, 4.0, 0.0], [0.0, 0.0, 4.0]]);
        let atoms = vec![
            Atom::new("O", [0.5, 0.5, 0.0]),
            Atom::new("Ti", [0.0, 0.0, 0.0]),
            Atom::new("O", [0.5, 0.0, 0.5]),
        ];
        let crystal = Crystal::new("TiO2", lattice, atoms);

        let text = to_poscar_string(&crystal);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[5].split_whitespace().collect::<Vec<_>>(), vec!["O", "Ti"]);
        assert_eq!(lines[6].split_whitespace().collect::<Vec<_>>(), vec!["2", "1"]);

        let parsed = parse_poscar_content(&text, "rt").unwrap();
        assert_eq!(parsed.atoms.len(), 3);
        assert_eq!(parsed.atoms[2].element, "Ti");
    }

    #[test]
    fn test_overflowing_atom_counts() {
        let content = "x\n1.0\n3 0 0\n0 3 0\n0 0 3\nNa Cl\n18446744073709551615 1\nDirect\n0 0 0\n";
        let err = parse_poscar_content(content, "x").unwrap_err();
        match err {
            DfttkError::ParseError { reason, .. } => assert!(reason.contains("overflow")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_huge_single_count_runs_out_of_positions() {
        let content = "x\n1.0\n3 0 0\n0 3 0\n0 0 3\nNa\n18446744073709551615\nDirect\n0 0 0\n";
        let err = parse_poscar_content(content, "x").unwrap_err();
        assert!(matches!(err, DfttkError::ParseError { .. }));
    }
}
