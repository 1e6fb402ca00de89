//! # Materials Project HTTP 客户端
//!
//! `GET {endpoint}/materials/core/?material_ids=<id>&_fields=...`，
//! API key 通过 `X-API-KEY` 请求头传递。
//!
//! ## 依赖关系
//! - 被 `commands/download.rs` 使用
//! - 使用 `mp/schema.rs`
//! - 使用 `reqwest` blocking 客户端

use crate::error::{DfttkError, Result};
use crate::models::Crystal;
use crate::mp::{schema, MpConfig, StructureKind};

use reqwest::blocking::Client;
use reqwest::StatusCode;

const CORE_PATH: &str = "/materials/core/";
const FIELDS: &str = "material_id,structure,initial_structures";

pub struct MpClient {
    client: Client,
    api_key: String,
    endpoint: String,
}

impl MpClient {
    pub fn new(config: &MpConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                DfttkError::MissingCredential(
                    "Please provide MP_API_KEY via env var or with \"--api-key\" cli switch."
                        .to_string(),
                )
            })?
            .to_string();

        Ok(MpClient {
            client: Client::new(),
            api_key,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
        })
    }

    /// 请求 URL（不含查询参数）
    pub fn core_url(&self) -> String {
        format!("{}{}", self.endpoint, CORE_PATH)
    }

    /// 下载结构
    pub fn fetch_structure(&self, material_id: &str, kind: StructureKind) -> Result<Crystal> {
        let resp = self
            .client
            .get(self.core_url())
            .header("X-API-KEY", &self.api_key)
            .query(&[("material_ids", material_id), ("_fields", FIELDS)])
            .send()?;

        let status = resp.status();
        check_status(status, material_id)?;

        let body = resp.text()?;
        schema::parse_structure_response(&body, material_id, kind)
    }
}

/// 将 HTTP 状态映射到错误类型
fn check_status(status: StatusCode, material_id: &str) -> Result<()> {
    match status {
        s if s.is_success() => Ok(()),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(DfttkError::AuthenticationError {
            status: status.as_u16(),
        }),
        StatusCode::NOT_FOUND => Err(DfttkError::StructureNotFound {
            id: material_id.to_string(),
        }),
        s => Err(DfttkError::RequestError(format!(
            "Materials Project request failed with status {}",
            s
        ))),
    }
}
