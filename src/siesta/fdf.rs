//! # SIESTA fdf 输入文件生成
//!
//! 结构部分使用笛卡尔坐标 (Å)；物种按首次出现顺序编号。
//! 计算参数采用 SIESTA 常见默认值（LDA, DZP, 200 Ry）。
//!
//! ## 依赖关系
//! - 被 `siesta/mod.rs` 使用
//! - 使用 `models/structure.rs`, `models/element.rs`

use crate::error::Result;
use crate::models::element;
use crate::models::Crystal;

/// 物种表中的一项
#[derive(Debug, Clone, PartialEq)]
pub struct Species {
    /// 1 起始的物种编号
    pub index: usize,
    pub atomic_number: u32,
    pub symbol: String,
}

/// 按首次出现顺序建立物种表
pub fn species_table(crystal: &Crystal) -> Result<Vec<Species>> {
    crystal
        .species()
        .into_iter()
        .enumerate()
        .map(|(i, sym)| {
            Ok(Species {
                index: i + 1,
                atomic_number: element::atomic_number(sym)?,
                symbol: sym.to_string(),
            })
        })
        .collect()
}

/// 生成 fdf 文本
pub fn to_fdf_string(crystal: &Crystal, label: &str) -> Result<String> {
    let species = species_table(crystal)?;

    let mut out = String::new();
    out.push_str(&format!("SystemName          {}\n", label));
    out.push_str(&format!("SystemLabel         {}\n", label));
    out.push_str(&format!("NumberOfSpecies     {}\n", species.len()));
    out.push_str(&format!("NumberOfAtoms       {}\n\n", crystal.atoms.len()));

    out.push_str("%block ChemicalSpeciesLabel\n");
    for s in &species {
        out.push_str(&format!("    {} {} {}\n", s.index, s.atomic_number, s.symbol));
    }
    out.push_str("%endblock ChemicalSpeciesLabel\n\n");

    out.push_str("MeshCutoff          200.0000 Ry\n");
    out.push_str("PAO.EnergyShift     0.0100 Ry\n");
    out.push_str("PAO.BasisSize       DZP\n");
    out.push_str("XC.functional       LDA\n");
    out.push_str("XC.authors          CA\n");
    out.push_str("Spin                non-polarized\n");
    out.push_str("DM.UseSaveDM        T\n\n");

    out.push_str("LatticeConstant     1.0 Ang\n");
    out.push_str("%block LatticeVectors\n");
    for row in &crystal.lattice.matrix {
        out.push_str(&format!(
            "    {:16.10} {:16.10} {:16.10}\n",
            row[0], row[1], row[2]
        ));
    }
    out.push_str("%endblock LatticeVectors\n\n");

    out.push_str("AtomicCoordinatesFormat  Ang\n");
    out.push_str("%block AtomicCoordinatesAndAtomicSpecies\n");
    for (atom, cart) in crystal.atoms.iter().zip(crystal.cartesian_positions()) {
        // species_table 覆盖了所有元素
        let index = species
            .iter()
            .find(|s| s.symbol == atom.element)
            .map(|s| s.index)
            .unwrap_or_default();
        out.push_str(&format!(
            "    {:16.10} {:16.10} {:16.10} {:>3}\n",
            cart[0], cart[1], cart[2], index
        ));
    }
    out.push_str("%endblock AtomicCoordinatesAndAtomicSpecies\n");

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DfttkError;
    use crate::models::{Atom, Lattice};

    fn gaas() -> Crystal {
        let lattice = Lattice::from_vectors([[0.0, 2.825, 2.825], [2.825, 0.0, 2.825], [2.825, 2.825, 0.0]]);
        Crystal::new(
            "GaAs",
            lattice,
            vec![
                Atom::new("Ga", [0.0, 0.0, 0.0]),
                Atom::new("As", [0.25, 0.25, 0.25]),
            ],
        )
    }

    #[test]
    fn test_species_table_order() {
        let table = species_table(&gaas()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table[0], Species { index: 1, atomic_number: 31, symbol: "Ga".to_string() });
        assert_eq!(table[1].atomic_number, 33);
    }

    #[test]
    fn test_fdf_blocks() {
        let text = to_fdf_string(&gaas(), "siesta").unwrap();

        assert!(text.starts_with("SystemName          siesta\n"));
        assert!(text.contains("NumberOfSpecies     2\n"));
        assert!(text.contains("NumberOfAtoms       2\n"));
        assert!(text.contains("    1 31 Ga\n    2 33 As\n"));
        assert!(text.contains("LatticeConstant     1.0 Ang"));

        let coords: Vec<&str> = text
            .lines()
            .skip_while(|l| !l.starts_with("%block AtomicCoordinatesAndAtomicSpecies"))
            .skip(1)
            .take_while(|l| !l.starts_with("%endblock"))
            .collect();
        assert_eq!(coords.len(), 2);
        let fields: Vec<&str> = coords[1].split_whitespace().collect();
        assert_eq!(fields[0], "1.4125000000");
        assert_eq!(fields[3], "2");
    }

    #[test]
    fn test_unknown_element_rejected() {
        let lattice = Lattice::from_parameters(3.0, 3.0, 3.0, 90.0, 90.0, 90.0);
        let crystal = Crystal::new("X", lattice, vec![Atom::new("Xx", [0.0; 3])]);
        let err = to_fdf_string(&crystal, "siesta").unwrap_err();
        assert!(matches!(err, DfttkError::UnknownElement(_)));
    }
}
