use serde::{Deserialize, Serialize};

/// Configuration for the historias module.
///
/// Collection and bucket identifiers are injected here instead of living
/// as process-wide constants, so components can be tested in isolation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HistoriasConfig {
    #[serde(default = "default_profiles_collection")]
    pub profiles_collection: String,
    #[serde(default = "default_records_collection")]
    pub records_collection: String,
    #[serde(default = "default_pdf_bucket")]
    pub pdf_bucket: String,
    #[serde(default = "default_page_size")]
    pub default_page_size: u64,
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u64,
    /// Window fetched for the reporting dashboard.
    #[serde(default = "default_stats_window")]
    pub stats_window: u64,
}

impl Default for HistoriasConfig {
    fn default() -> Self {
        Self {
            profiles_collection: default_profiles_collection(),
            records_collection: default_records_collection(),
            pdf_bucket: default_pdf_bucket(),
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
            stats_window: default_stats_window(),
        }
    }
}

fn default_profiles_collection() -> String {
    "user_profiles".to_string()
}

fn default_records_collection() -> String {
    "historias_clinicas".to_string()
}

fn default_pdf_bucket() -> String {
    "historias_pdfs".to_string()
}

fn default_page_size() -> u64 {
    20
}

fn default_max_page_size() -> u64 {
    100
}

fn default_stats_window() -> u64 {
    100
}
