//! # Materials Project 响应解析
//!
//! `/materials/core/` 返回的 `data` 数组中每项包含 pymatgen 格式的
//! `structure` 与 `initial_structures`。
//!
//! ## 依赖关系
//! - 被 `mp/client.rs` 使用
//! - 使用 `serde` / `serde_json`

use crate::error::{DfttkError, Result};
use crate::models::{Atom, Crystal, Lattice};
use crate::mp::StructureKind;

use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct CoreResponse {
    #[serde(default)]
    data: Vec<CoreDoc>,
}

#[derive(Debug, Deserialize)]
struct CoreDoc {
    #[serde(default)]
    material_id: Option<String>,
    #[serde(default)]
    structure: Option<PmgStructure>,
    #[serde(default)]
    initial_structures: Vec<PmgStructure>,
}

#[derive(Debug, Deserialize)]
struct PmgStructure {
    lattice: PmgLattice,
    sites: Vec<PmgSite>,
}

#[derive(Debug, Deserialize)]
struct PmgLattice {
    matrix: [[f64; 3]; 3],
}

#[derive(Debug, Deserialize)]
struct PmgSite {
    species: Vec<PmgSpecies>,
    abc: [f64; 3],
}

#[derive(Debug, Deserialize)]
struct PmgSpecies {
    element: String,
    #[serde(default = "full_occupancy")]
    occu: f64,
}

fn full_occupancy() -> f64 {
    1.0
}

impl PmgStructure {
    fn into_crystal(self, name: &str) -> Result<Crystal> {
        let atoms = self
            .sites
            .into_iter()
            .enumerate()
            .map(|(i, site)| {
                // 无序位点取占有率最高的元素
                let element = site
                    .species
                    .into_iter()
                    .max_by(|a, b| a.occu.total_cmp(&b.occu))
                    .map(|s| s.element)
                    .ok_or_else(|| {
                        DfttkError::Other(format!("Site {} of '{}' has no species", i, name))
                    })?;
                Ok(Atom::new(element, site.abc))
            })
            .collect::<Result<Vec<_>>>()?;

        let mut crystal = Crystal::new(name, Lattice::from_vectors(self.lattice.matrix), atoms);
        crystal.source_format = Some("mp".to_string());
        Ok(crystal)
    }
}

/// 从 API 响应体中取出请求的结构
pub fn parse_structure_response(body: &str, id: &str, kind: StructureKind) -> Result<Crystal> {
    let response: CoreResponse = serde_json::from_str(body)?;

    let doc = response
        .data
        .into_iter()
        .next()
        .ok_or_else(|| DfttkError::StructureNotFound { id: id.to_string() })?;
    let name = doc.material_id.unwrap_or_else(|| id.to_string());

    let structure = match kind {
        StructureKind::Final => doc.structure,
        StructureKind::Initial => doc.initial_structures.into_iter().next(),
    }
    .ok_or_else(|| DfttkError::StructureNotFound { id: id.to_string() })?;

    structure.into_crystal(&name)
}
