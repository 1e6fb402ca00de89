//! # 统一错误处理模块
//!
//! 定义 dfttk 的所有错误类型，使用 `thiserror` 派生。
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// dfttk 统一错误类型
#[derive(Error, Debug)]
pub enum DfttkError {
    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to read file: {path}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ─────────────────────────────────────────────────────────────
    // 解析错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to parse {format} file: {path}\nReason: {reason}")]
    ParseError {
        format: String,
        path: String,
        reason: String,
    },

    #[error("Invalid lattice type '{0}' (expected one of: cubic, bcc, fcc, diamond)")]
    InvalidLatticeType(String),

    #[error("Unknown chemical element: {0}")]
    UnknownElement(String),

    // ─────────────────────────────────────────────────────────────
    // EOS 拟合错误
    // ─────────────────────────────────────────────────────────────
    #[error("Insufficient data points: got {got}, need at least {need}")]
    InsufficientData { got: usize, need: usize },

    #[error("Degenerate fit: {0}")]
    DegenerateFit(String),

    #[error("Fit did not converge after {evaluations} function evaluations")]
    FitConvergence { evaluations: usize },

    // ─────────────────────────────────────────────────────────────
    // Materials Project API 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Missing credential: {0}")]
    MissingCredential(String),

    #[error("Materials Project rejected the API key (HTTP {status})")]
    AuthenticationError { status: u16 },

    #[error("Structure '{id}' not found. Please search for a valid structure Id: https://next-gen.materialsproject.org/materials")]
    StructureNotFound { id: String },

    #[error("Request failed: {0}")]
    RequestError(String),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    // ─────────────────────────────────────────────────────────────
    // 参数与配置错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Missing configuration: {0}")]
    MissingConfig(String),

    // ─────────────────────────────────────────────────────────────
    // CSV 错误
    // ─────────────────────────────────────────────────────────────
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    // ─────────────────────────────────────────────────────────────
    // 其他
    // ─────────────────────────────────────────────────────────────
    #[error("{0}")]
    Other(String),
}

impl From<reqwest::Error> for DfttkError {
    fn from(e: reqwest::Error) -> Self {
        DfttkError::RequestError(e.to_string())
    }
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, DfttkError>;
