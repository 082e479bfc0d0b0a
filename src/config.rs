//! Configuration for the compressor front door

use serde::{Deserialize, Serialize};

/// Skip-policy knobs for [`crate::Compressor`]. Matching is performed
/// against the lowercased source path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompressorConfig {
    /// Extension produced by compression and recognized on re-input.
    pub container_extension: String,
    /// Extensions of file types that are almost certainly compressed
    /// already; such inputs are skipped without writing a destination.
    pub skip_extensions: Vec<String>,
}

impl Default for CompressorConfig {
    fn default() -> Self {
        Self {
            container_extension: ".huff".to_string(),
            skip_extensions: [
                ".zip", ".gz", ".7z", ".rar", ".jpeg", ".jpg", ".png", ".gif", ".mp3", ".mp4",
                ".avi", ".mov", ".odt", ".docx", ".xlsx",
            ]
            .iter()
            .map(|ext| ext.to_string())
            .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_lists_huff() {
        let config = CompressorConfig::default();
        assert_eq!(config.container_extension, ".huff");
        assert!(config.skip_extensions.iter().any(|e| e == ".zip"));
    }
}
