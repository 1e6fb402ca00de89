//! # SIESTA 输入生成模块
//!
//! 从晶体结构生成 SIESTA 计算目录：`<label>.fdf` 加上各元素赝势链接。
//!
//! ## 子模块
//! - `fdf`: fdf 文本生成
//! - `pseudo`: 赝势查找与链接
//!
//! ## 依赖关系
//! - 被 `commands/convert.rs` 使用
//! - 使用 `models/`

pub mod fdf;
pub mod pseudo;

use crate::error::{DfttkError, Result};
use crate::models::Crystal;
use std::fs;
use std::path::{Path, PathBuf};

/// SIESTA 输入配置，由命令行层显式传入
#[derive(Debug, Clone)]
pub struct SiestaConfig {
    /// 赝势库目录
    pub pseudo_path: Option<PathBuf>,
    /// SystemLabel，同时决定 fdf 文件名
    pub label: String,
}

impl Default for SiestaConfig {
    fn default() -> Self {
        SiestaConfig {
            pseudo_path: None,
            label: "siesta".to_string(),
        }
    }
}

/// 写出的文件
#[derive(Debug, Clone)]
pub struct SiestaInput {
    pub fdf_path: PathBuf,
    pub pseudopotentials: Vec<PathBuf>,
}

/// 在 `output_dir` 中写出 fdf 并链接赝势
pub fn write_siesta_fdf(
    crystal: &Crystal,
    config: &SiestaConfig,
    output_dir: &Path,
) -> Result<SiestaInput> {
    let library = config.pseudo_path.as_deref().ok_or_else(|| {
        DfttkError::MissingConfig(
            "Provide path to pseudopotential files collection, either with `SIESTA_PP_PATH` \
             variable or through `--pseudos-dir` flag."
                .to_string(),
        )
    })?;
    if !library.is_dir() {
        return Err(DfttkError::FileNotFound {
            path: library.display().to_string(),
        });
    }

    // 先确认所有赝势存在，再写任何文件
    let sources = crystal
        .species()
        .into_iter()
        .map(|sym| pseudo::find_pseudopotential(library, sym))
        .collect::<Result<Vec<_>>>()?;

    let content = fdf::to_fdf_string(crystal, &config.label)?;

    fs::create_dir_all(output_dir).map_err(|e| DfttkError::FileWriteError {
        path: output_dir.display().to_string(),
        source: e,
    })?;

    let fdf_path = output_dir.join(format!("{}.fdf", config.label));
    fs::write(&fdf_path, content).map_err(|e| DfttkError::FileWriteError {
        path: fdf_path.display().to_string(),
        source: e,
    })?;

    let pseudopotentials = sources
        .iter()
        .map(|src| pseudo::link_pseudopotential(src, output_dir))
        .collect::<Result<Vec<_>>>()?;

    Ok(SiestaInput {
        fdf_path,
        pseudopotentials,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Atom, Lattice};

    fn scratch(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("dfttk_siesta_{}_{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn mgo() -> Crystal {
        let lattice = Lattice::from_vectors([[0.0, 2.1, 2.1], [2.1, 0.0, 2.1], [2.1, 2.1, 0.0]]);
        Crystal::new(
            "MgO",
            lattice,
            vec![
                Atom::new("Mg", [0.0, 0.0, 0.0]),
                Atom::new("O", [0.5, 0.5, 0.5]),
            ],
        )
    }

    #[test]
    fn test_missing_library_is_config_error() {
        let err = write_siesta_fdf(&mgo(), &SiestaConfig::default(), Path::new(".")).unwrap_err();
        assert!(matches!(err, DfttkError::MissingConfig(_)));
    }

    #[test]
    fn test_missing_pseudo_writes_nothing() {
        let lib = scratch("partial_lib");
        let out = scratch("partial_out");
        fs::write(lib.join("Mg.psf"), "mg").unwrap();

        let config = SiestaConfig {
            pseudo_path: Some(lib.clone()),
            ..SiestaConfig::default()
        };
        let err = write_siesta_fdf(&mgo(), &config, &out).unwrap_err();
        assert!(matches!(err, DfttkError::FileNotFound { .. }));
        assert!(!out.join("siesta.fdf").exists());

        fs::remove_dir_all(&lib).unwrap();
        fs::remove_dir_all(&out).unwrap();
    }

    #[test]
    fn test_writes_fdf_and_links() {
        let lib = scratch("lib");
        let out = scratch("out");
        fs::write(lib.join("Mg.psf"), "mg").unwrap();
        fs::write(lib.join("O.psml"), "o").unwrap();

        let config = SiestaConfig {
            pseudo_path: Some(lib.clone()),
            label: "mgo".to_string(),
        };
        let written = write_siesta_fdf(&mgo(), &config, &out).unwrap();

        assert_eq!(written.fdf_path, out.join("mgo.fdf"));
        let text = fs::read_to_string(&written.fdf_path).unwrap();
        assert!(text.contains("SystemLabel         mgo"));
        assert_eq!(
            written.pseudopotentials,
            vec![out.join("Mg.psf"), out.join("O.psml")]
        );
        assert_eq!(fs::read_to_string(out.join("O.psml")).unwrap(), "o");

        fs::remove_dir_all(&lib).unwrap();
        fs::remove_dir_all(&out).unwrap();
    }
}
