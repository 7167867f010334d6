use footerkit_core::{FooterConfiguration, FooterLocation, FooterType, Footers};
use serde::Serialize;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

/// Current report schema version.
pub const REPORT_VERSION: u32 = 1;
/// Timestamp used when the clock cannot be formatted.
pub const DEFAULT_GENERATED_AT: &str = "1970-01-01T00:00:00Z";

#[derive(Debug, Serialize)]
pub struct Report {
    /// Report schema version (not the binary version).
    pub report_version: u32,
    pub tool: ToolInfo,
    /// RFC3339 time the report was generated.
    pub generated_at: String,
    pub input: InputInfo,
    pub configuration: FooterConfiguration,
    pub footer_type: FooterType,
    pub footer_count: usize,
    /// Where each footer was read, in the same order as `footers`.
    pub locations: Vec<FooterLocation>,
    pub footers: Footers,
}

#[derive(Debug, Serialize)]
pub struct ToolInfo {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Serialize)]
pub struct InputInfo {
    pub path: String,
    pub bytes: u64,
}

impl Report {
    pub fn new(
        input_path: &str,
        input_bytes: u64,
        configuration: FooterConfiguration,
        locations: Vec<FooterLocation>,
        footers: Footers,
    ) -> Self {
        Report {
            report_version: REPORT_VERSION,
            tool: ToolInfo {
                name: "footerkit".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            generated_at: now_rfc3339(),
            input: InputInfo {
                path: input_path.to_string(),
                bytes: input_bytes,
            },
            configuration,
            footer_type: footers.footer_type(),
            footer_count: footers.len(),
            locations,
            footers,
        }
    }
}

fn now_rfc3339() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| DEFAULT_GENERATED_AT.to_string())
}
