use tagdraw_core::format::OutputFormat;
use tagdraw_core::model::IncludeMode;

/// Parse output format from string
pub fn parse_output_format(s: &str) -> std::result::Result<OutputFormat, String> {
    s.parse::<OutputFormat>().map_err(|e| e.to_string())
}

/// Parse include mode from string
pub fn parse_include_mode(s: &str) -> std::result::Result<IncludeMode, String> {
    s.parse::<IncludeMode>().map_err(|e| e.to_string())
}
