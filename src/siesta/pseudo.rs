//! # 赝势库查找与链接
//!
//! 在赝势库目录中查找 `<元素>.psf` 或 `<元素>.psml`，并链接到计算目录。
//!
//! ## 依赖关系
//! - 被 `siesta/mod.rs` 使用

use crate::error::{DfttkError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// 按优先级尝试的赝势扩展名
pub const PSEUDO_EXTENSIONS: [&str; 2] = ["psf", "psml"];

/// 查找某元素的赝势文件
pub fn find_pseudopotential(library: &Path, symbol: &str) -> Result<PathBuf> {
    PSEUDO_EXTENSIONS
        .iter()
        .map(|ext| library.join(format!("{}.{}", symbol, ext)))
        .find(|p| p.is_file())
        .ok_or_else(|| DfttkError::FileNotFound {
            path: library
                .join(format!("{}.{{{}}}", symbol, PSEUDO_EXTENSIONS.join(",")))
                .display()
                .to_string(),
        })
}

/// 将赝势链接（非 unix 平台为复制）到 `target_dir`，已存在的同名文件会被替换
pub fn link_pseudopotential(source: &Path, target_dir: &Path) -> Result<PathBuf> {
    let file_name = source.file_name().ok_or_else(|| {
        DfttkError::InvalidArgument(format!("Not a file: {}", source.display()))
    })?;
    let target = target_dir.join(file_name);

    if target.symlink_metadata().is_ok() {
        fs::remove_file(&target).map_err(|e| DfttkError::FileWriteError {
            path: target.display().to_string(),
            source: e,
        })?;
    }

    let source = source.canonicalize().map_err(|e| DfttkError::FileReadError {
        path: source.display().to_string(),
        source: e,
    })?;

    #[cfg(unix)]
    let linked = std::os::unix::fs::symlink(&source, &target);
    #[cfg(not(unix))]
    let linked = fs::copy(&source, &target).map(|_| ());

    linked.map_err(|e| DfttkError::FileWriteError {
        path: target.display().to_string(),
        source: e,
    })?;

    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("dfttk_pseudo_{}_{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_find_prefers_psf() {
        let lib = scratch("find");
        fs::write(lib.join("Si.psml"), "psml").unwrap();
        assert_eq!(find_pseudopotential(&lib, "Si").unwrap(), lib.join("Si.psml"));

        fs::write(lib.join("Si.psf"), "psf").unwrap();
        assert_eq!(find_pseudopotential(&lib, "Si").unwrap(), lib.join("Si.psf"));

        assert!(matches!(
            find_pseudopotential(&lib, "Ge"),
            Err(DfttkError::FileNotFound { .. })
        ));
        fs::remove_dir_all(&lib).unwrap();
    }

    #[test]
    fn test_link_replaces_existing() {
        let lib = scratch("lib");
        let work = scratch("work");
        fs::write(lib.join("O.psf"), "oxygen").unwrap();
        fs::write(work.join("O.psf"), "stale").unwrap();

        let target = link_pseudopotential(&lib.join("O.psf"), &work).unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "oxygen");

        fs::remove_dir_all(&lib).unwrap();
        fs::remove_dir_all(&work).unwrap();
    }
}
