//! Validation and decoding of uploaded files.

use sig_composite::{MaskOutcome, MaskedSignature, RasterImage, SignaturePipeline};

use crate::error::IntakeError;

/// What an upload is supposed to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Document,
    Signature,
}

impl FileKind {
    pub fn label(self) -> &'static str {
        match self {
            FileKind::Document => "document",
            FileKind::Signature => "signature",
        }
    }

    fn accepts(self, mime: &str) -> bool {
        match self {
            FileKind::Document => mime == "application/pdf",
            FileKind::Signature => mime.starts_with("image/"),
        }
    }
}

/// Resolve the mime type of an upload and check it against `kind`.
///
/// A declared type (without parameters) wins; when it is missing or the
/// generic `application/octet-stream`, the type is sniffed from the bytes.
pub fn check_mime(kind: FileKind, declared: Option<&str>, bytes: &[u8]) -> Result<String, IntakeError> {
    if bytes.is_empty() {
        return Err(IntakeError::Empty(kind.label()));
    }

    let declared = declared
        .and_then(|v| v.split(';').next())
        .map(|v| v.trim().to_ascii_lowercase())
        .filter(|v| !v.is_empty() && v != "application/octet-stream");

    let mime = match declared {
        Some(mime) => mime,
        None => infer::get(bytes)
            .map(|t| t.mime_type().to_string())
            .unwrap_or_else(|| "application/octet-stream".to_string()),
    };

    if kind.accepts(&mime) {
        Ok(mime)
    } else {
        tracing::info!(kind = kind.label(), %mime, "Rejected upload");
        Err(IntakeError::UnsupportedMime {
            kind: kind.label(),
            mime,
        })
    }
}

/// Decode an image file into a straight-alpha RGBA raster.
pub fn decode_image(bytes: &[u8]) -> Result<RasterImage, IntakeError> {
    let rgba = image::load_from_memory(bytes)
        .map_err(|e| IntakeError::Decode(e.to_string()))?
        .to_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(IntakeError::Decode(format!("image is {width}x{height}")));
    }
    Ok(RasterImage::from_rgba(width, height, rgba.into_raw()))
}

/// Turns a signature upload into the masked original.
#[derive(Debug, Clone, Copy)]
pub struct SignatureIntake {
    pipeline: SignaturePipeline,
    remove_background: bool,
}

impl SignatureIntake {
    pub fn new(pipeline: SignaturePipeline) -> Self {
        Self {
            pipeline,
            remove_background: true,
        }
    }

    /// Keep the image as uploaded instead of removing its background.
    #[inline]
    pub fn remove_background(mut self, enabled: bool) -> Self {
        self.remove_background = enabled;
        self
    }

    /// Check, decode and mask an upload.
    ///
    /// Undecodable bytes are rejected outright. An image that decodes but
    /// cannot be classified falls back to the unmasked original.
    pub fn accept(&self, bytes: &[u8], declared: Option<&str>) -> Result<MaskedSignature, IntakeError> {
        let mime = check_mime(FileKind::Signature, declared, bytes)?;
        let raster = decode_image(bytes)?;

        tracing::debug!(
            %mime,
            width = raster.width(),
            height = raster.height(),
            "Decoded signature image"
        );

        if !self.remove_background {
            return Ok(self.pipeline.passthrough(raster));
        }

        let outcome = self.pipeline.mask(&raster);
        if let MaskOutcome::Unmasked { error, .. } = &outcome {
            tracing::warn!(%error, "Using signature without background removal");
        }
        Ok(outcome.into_signature())
    }

    /// [`accept`](Self::accept) on a blocking worker.
    pub async fn accept_blocking(
        self,
        bytes: Vec<u8>,
        declared: Option<String>,
    ) -> Result<MaskedSignature, IntakeError> {
        tokio::task::spawn_blocking(move || self.accept(&bytes, declared.as_deref()))
            .await
            .map_err(|e| IntakeError::Decode(format!("signature task failed: {e}")))?
    }
}
