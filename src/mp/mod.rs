//! # Materials Project 结构下载模块
//!
//! 通过 Materials Project REST API 按 material id 获取晶体结构。
//!
//! ## 子模块
//! - `client`: HTTP 客户端 (`reqwest` blocking)
//! - `schema`: 响应 JSON 结构与到 `Crystal` 的转换
//!
//! ## 依赖关系
//! - 被 `commands/download.rs` 使用
//! - 使用 `models/`

pub mod client;
pub mod schema;

pub use client::MpClient;

/// 默认 API 地址
pub const DEFAULT_ENDPOINT: &str = "https://api.materialsproject.org";

/// 客户端配置，API key 由命令行层显式传入
#[derive(Debug, Clone)]
pub struct MpConfig {
    pub api_key: Option<String>,
    pub endpoint: String,
}

impl Default for MpConfig {
    fn default() -> Self {
        MpConfig {
            api_key: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }
}

/// 请求哪一个结构
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructureKind {
    /// 计算弛豫后的结构（对称性可能破缺）
    Final,
    /// 第一个初始结构
    Initial,
}

impl StructureKind {
    pub fn from_final_flag(final_structure: bool) -> Self {
        if final_structure {
            StructureKind::Final
        } else {
            StructureKind::Initial
        }
    }
}
