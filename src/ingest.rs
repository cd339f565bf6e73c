//! Image ingestion: data-URI parsing, decoding, storage-key derivation,
//! blob upload.
//!
//! Keys are `{session_id}/{timestamp}.{image_type}` with a per-process
//! strictly-increasing millisecond timestamp, so repeated uploads in the
//! same session never collide on the same key.

use std::sync::atomic::{AtomicI64, Ordering};

use base64::Engine as _;
use chrono::Utc;
use lazy_static::lazy_static;
use regex::Regex;

use crate::error::{HotDogError, Result};
use crate::store::BlobStore;

lazy_static! {
    static ref DATA_URI_RE: Regex =
        Regex::new(r"^data:image/([a-zA-Z0-9.+-]+);base64,(.+)$").unwrap();
}

/// A decoded inbound image.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    /// The subtype from the data URI, e.g. "png"
    pub image_type: String,
    pub bytes: Vec<u8>,
}

impl DecodedImage {
    pub fn mime_type(&self) -> String {
        format!("image/{}", self.image_type)
    }
}

/// The durable location of an uploaded image.
#[derive(Debug, Clone)]
pub struct StoredImage {
    pub public_url: String,
    pub storage_key: String,
}

/// Session ids become a path segment of the storage key, so anything that
/// could traverse out of the blob root is rejected up front.
fn validate_session_id(session_id: &str) -> Result<()> {
    if session_id.contains('/') || session_id.contains('\\') || session_id.contains("..") {
        return Err(HotDogError::Validation(
            "sessionId must not contain path separators".into(),
        ));
    }
    Ok(())
}

/// Parses and decodes a `data:image/<type>;base64,<payload>` string.
pub fn parse_data_uri(image: &str) -> Result<DecodedImage> {
    let captures = DATA_URI_RE.captures(image).ok_or_else(|| {
        HotDogError::InvalidImageFormat("expected a base64-encoded image data URI".into())
    })?;

    let image_type = captures[1].to_string();
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(&captures[2])
        .map_err(|e| HotDogError::InvalidImageFormat(format!("invalid base64 payload: {}", e)))?;

    Ok(DecodedImage { image_type, bytes })
}

static LAST_TIMESTAMP: AtomicI64 = AtomicI64::new(0);

/// Milliseconds since epoch, strictly increasing within this process.
fn next_timestamp_millis() -> i64 {
    let now = Utc::now().timestamp_millis();
    let mut prev = LAST_TIMESTAMP.load(Ordering::Relaxed);
    loop {
        let next = now.max(prev + 1);
        match LAST_TIMESTAMP.compare_exchange_weak(
            prev,
            next,
            Ordering::SeqCst,
            Ordering::Relaxed,
        ) {
            Ok(_) => return next,
            Err(observed) => prev = observed,
        }
    }
}

/// Derives the session-scoped storage key for an upload.
pub fn storage_key(session_id: &str, image_type: &str) -> String {
    format!("{}/{}.{}", session_id, next_timestamp_millis(), image_type)
}

/// Decodes an inbound image, uploads it, and resolves its public URL.
///
/// The declared type is sniffed against the payload bytes; a mismatch is
/// logged but not rejected, since the declared type only picks the key
/// extension and the model sees the raw bytes either way.
pub async fn ingest(
    blobs: &dyn BlobStore,
    session_id: &str,
    image: &str,
) -> Result<(StoredImage, DecodedImage)> {
    validate_session_id(session_id)?;
    let decoded = parse_data_uri(image)?;

    if let Ok(format) = image::guess_format(&decoded.bytes) {
        if !format
            .extensions_str()
            .contains(&decoded.image_type.as_str())
        {
            tracing::warn!(
                declared = %decoded.image_type,
                detected = ?format,
                "image payload does not match its declared type"
            );
        }
    }

    let key = storage_key(session_id, &decoded.image_type);
    blobs.put(&key, &decoded.bytes, &decoded.mime_type()).await?;
    let public_url = blobs.public_url(&key);

    Ok((
        StoredImage {
            public_url,
            storage_key: key,
        },
        decoded,
    ))
}
