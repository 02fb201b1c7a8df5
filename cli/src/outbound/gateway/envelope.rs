//! Per-backend error envelope parsing.
//!
//! Each backend reports failures in its own JSON shape. A gateway is built
//! with exactly one [`ErrorEnvelope`], so call sites never need to know which
//! backend they are talking to.

use serde::Deserialize;

use super::GatewayError;

/// Error body shape expected from a backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorEnvelope {
    /// Cloud Controller: the v3 `errors` array, or the legacy v2 object.
    CloudController,
    /// UAA: `{"error": "...", "error_description": "..."}`.
    Uaa,
}

/// Code and message extracted from an error body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct BackendFailure {
    pub(super) code: String,
    pub(super) message: String,
}

#[derive(Debug, Deserialize)]
struct UaaErrorDto {
    error: String,
    error_description: String,
}

#[derive(Debug, Deserialize)]
struct CcV3ErrorsDto {
    errors: Vec<CcV3ErrorDto>,
}

#[derive(Debug, Deserialize)]
struct CcV3ErrorDto {
    title: String,
    #[serde(default)]
    detail: String,
}

#[derive(Debug, Deserialize)]
struct CcV2ErrorDto {
    error_code: String,
    description: String,
}

impl ErrorEnvelope {
    /// Convert a non-success response into a [`GatewayError`].
    ///
    /// Bodies matching the envelope become [`GatewayError::Backend`]; anything
    /// else becomes [`GatewayError::UnexpectedResponse`] with a compact preview.
    pub fn to_error(self, status: u16, body: &[u8]) -> GatewayError {
        match self.parse(body) {
            Some(failure) => GatewayError::backend(status, failure.code, failure.message),
            None => GatewayError::unexpected_response(status, body_preview(body)),
        }
    }

    pub(super) fn parse(self, body: &[u8]) -> Option<BackendFailure> {
        match self {
            Self::Uaa => parse_uaa(body),
            Self::CloudController => parse_cc_v3(body).or_else(|| parse_cc_v2(body)),
        }
    }
}

fn parse_uaa(body: &[u8]) -> Option<BackendFailure> {
    let dto: UaaErrorDto = serde_json::from_slice(body).ok()?;
    Some(BackendFailure {
        code: dto.error,
        message: dto.error_description,
    })
}

fn parse_cc_v3(body: &[u8]) -> Option<BackendFailure> {
    let dto: CcV3ErrorsDto = serde_json::from_slice(body).ok()?;
    let code = dto.errors.first()?.title.clone();
    let message = dto
        .errors
        .into_iter()
        .map(|error| error.detail)
        .filter(|detail| !detail.is_empty())
        .collect::<Vec<_>>()
        .join("\n");
    Some(BackendFailure { code, message })
}

fn parse_cc_v2(body: &[u8]) -> Option<BackendFailure> {
    let dto: CcV2ErrorDto = serde_json::from_slice(body).ok()?;
    Some(BackendFailure {
        code: dto.error_code,
        message: dto.description,
    })
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 200;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
