//! Attachment encoding: turns the uploaded résumé into a transport-safe
//! inline representation (base64 payload + declared MIME type).

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use thiserror::Error;

use crate::models::{EncodedAttachment, ResumeFile};

#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("Failed to encode attachment: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Base64-encodes the full file contents and carries the declared MIME type
/// through. Encoding runs on the blocking pool so a multi-megabyte upload
/// never stalls the async workers. Type- and size-agnostic: the soft PDF
/// filter lives in the HTTP layer, not here.
pub async fn encode_attachment(file: &ResumeFile) -> Result<EncodedAttachment, EncodeError> {
    let bytes = file.bytes.clone();
    let mime_type = file.mime_type.clone();

    let data = tokio::task::spawn_blocking(move || STANDARD.encode(&bytes)).await?;

    Ok(EncodedAttachment { data, mime_type })
}
