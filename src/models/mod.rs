//! # 数据模型模块
//!
//! 定义结构转换使用的统一晶体结构模型。
//!
//! ## 依赖关系
//! - 被 `parsers/`, `siesta/`, `mp/` 和 `commands/` 使用
//! - 子模块: structure, element

pub mod element;
pub mod structure;

pub use structure::{Atom, Crystal, Lattice};
