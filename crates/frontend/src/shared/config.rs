//! Client-side configuration constants.
//!
//! Values mirror the backend defaults; the API host itself is derived at
//! runtime from `window.location` (see `api_utils`).

pub const APP_TITLE: &str = "材料价格审计";

/// Path prefix of every REST endpoint
pub const API_PREFIX: &str = "/api";

/// Port of the REST backend during local development
pub const BACKEND_PORT: u16 = 8000;

pub const DEFAULT_TIMEOUT_MS: u32 = 60_000;
pub const DOWNLOAD_TIMEOUT_MS: u32 = 300_000;

/// localStorage key of the bearer token
pub const ACCESS_TOKEN_KEY: &str = "uma-audit-token";

pub const DEFAULT_PAGE_SIZE: usize = 20;
pub const PAGE_SIZE_OPTIONS: [usize; 4] = [20, 50, 100, 200];

/// Long-running endpoints that need more than the default timeout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialTimeout {
    ImportMaterials,
    BatchAnalysis,
    GenerateReport,
    UploadLargeFile,
}

impl SpecialTimeout {
    pub fn millis(&self) -> u32 {
        match self {
            SpecialTimeout::ImportMaterials => 300_000,
            SpecialTimeout::BatchAnalysis => 600_000,
            SpecialTimeout::GenerateReport => 180_000,
            SpecialTimeout::UploadLargeFile => 300_000,
        }
    }
}
