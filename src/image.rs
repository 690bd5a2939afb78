//! Camera image handed to the detector.
//!
//! The controller never looks inside an image; it only forwards it to the
//! [`ImageDetector`](crate::app::ports::ImageDetector) port.

use std::path::Path;

/// An encoded camera frame (JPEG, PNG, ...) plus an optional label for logs.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Image {
    bytes: Vec<u8>,
    label: Option<String>,
}

impl Image {
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes, label: None }
    }

    /// Read an image file.  The file name becomes the label.
    pub fn from_file(path: &Path) -> std::io::Result<Self> {
        let bytes = std::fs::read(path)?;
        Ok(Self {
            bytes,
            label: path.file_name().map(|n| n.to_string_lossy().into_owned()),
        })
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or("<unnamed>")
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
