//! Error handling utilities for MCP server

use rmcp::ErrorData;
use wayfare_core::WayfareError;

/// Converts a wayfare error into an MCP error.
///
/// Problems with the caller's request surface as invalid params so the
/// assistant can correct and retry; everything else is an internal error.
pub fn to_mcp_error(message: &str, error: WayfareError) -> ErrorData {
    let text = format!("{message}: {error}");
    match error {
        WayfareError::InvalidInput { .. }
        | WayfareError::SurveyNotFound { .. }
        | WayfareError::RecommendationNotFound { .. }
        | WayfareError::Forbidden { .. } => ErrorData::invalid_params(text, None),
        _ => ErrorData::internal_error(text, None),
    }
}
