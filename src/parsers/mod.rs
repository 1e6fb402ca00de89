//! # 结构文件读写模块
//!
//! ## 支持格式
//! - `poscar`: VASP POSCAR/CONTCAR（读写）
//! - `struct_out`: SIESTA STRUCT_OUT（读）
//! - `cell`: CASTEP .cell（写）
//! - `cif`: CIF（写）
//!
//! ## 依赖关系
//! - 被 `commands/` 模块使用
//! - 使用 `models/` 数据模型

pub mod cell;
pub mod cif;
pub mod poscar;
pub mod struct_out;
