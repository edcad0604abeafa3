// src/extraction/mod.rs
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use thiserror::Error;

pub mod skill_extractor;

pub use skill_extractor::SkillExtractor;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Invalid resume payload: {0}")]
    InvalidPayload(String),
    #[error("Failed to reach skill extraction service: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Skill extraction service returned error {status}: {message}")]
    Service { status: u16, message: String },
    #[error("Skill extraction service returned a malformed response: {0}")]
    MalformedResponse(String),
}

/// A resume document as submitted by the caller: a data URI of the form
/// `data:<mimetype>;base64,<encoded_data>`.
///
/// Only the envelope is validated here; the document structure is the
/// external extractor's concern.
#[derive(Debug, Clone, PartialEq)]
pub struct ResumePayload {
    pub mime_type: String,
    /// Base64 content, kept encoded for transport to the extractor.
    pub content: String,
}

impl ResumePayload {
    pub fn parse(data_uri: &str) -> Result<Self, ExtractionError> {
        let rest = data_uri.strip_prefix("data:").ok_or_else(|| {
            ExtractionError::InvalidPayload(
                "expected a data URI ('data:<mimetype>;base64,<data>')".into(),
            )
        })?;

        let (header, content) = rest.split_once(',').ok_or_else(|| {
            ExtractionError::InvalidPayload("data URI has no content section".into())
        })?;

        let mime_type = header.strip_suffix(";base64").ok_or_else(|| {
            ExtractionError::InvalidPayload("data URI must declare base64 encoding".into())
        })?;

        if mime_type.trim().is_empty() {
            return Err(ExtractionError::InvalidPayload(
                "data URI has no MIME type".into(),
            ));
        }

        let content = content.trim();
        if content.is_empty() {
            return Err(ExtractionError::InvalidPayload(
                "resume document is empty".into(),
            ));
        }

        BASE64.decode(content).map_err(|e| {
            ExtractionError::InvalidPayload(format!("resume content is not valid base64: {}", e))
        })?;

        Ok(Self {
            mime_type: mime_type.trim().to_string(),
            content: content.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // "resume text" base64-encoded
    const ENCODED: &str = "cmVzdW1lIHRleHQ=";

    #[test]
    fn parses_well_formed_data_uri() {
        let uri = format!("data:application/pdf;base64,{}", ENCODED);
        let payload = ResumePayload::parse(&uri).unwrap();
        assert_eq!(payload.mime_type, "application/pdf");
        assert_eq!(payload.content, ENCODED);
    }

    #[test]
    fn rejects_missing_scheme() {
        let err = ResumePayload::parse("application/pdf;base64,abcd").unwrap_err();
        assert!(matches!(err, ExtractionError::InvalidPayload(_)));
    }

    #[test]
    fn rejects_missing_mime_type() {
        let uri = format!("data:;base64,{}", ENCODED);
        let err = ResumePayload::parse(&uri).unwrap_err();
        assert!(err.to_string().contains("MIME"));
    }

    #[test]
    fn rejects_non_base64_declaration() {
        let err = ResumePayload::parse("data:application/pdf,plain text").unwrap_err();
        assert!(matches!(err, ExtractionError::InvalidPayload(_)));
    }

    #[test]
    fn rejects_empty_content() {
        let err = ResumePayload::parse("data:application/pdf;base64,").unwrap_err();
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn rejects_undecodable_content() {
        let err = ResumePayload::parse("data:application/pdf;base64,@@not-base64@@").unwrap_err();
        assert!(matches!(err, ExtractionError::InvalidPayload(_)));
    }
}
