// =============================================================================
// Rendering contracts
// =============================================================================
//
// Chart images and the paginated document are produced by collaborators
// outside this crate. They plug into the pipeline through these traits and
// hand back opaque byte artifacts tagged with a media type.

use crate::analysis::Analysis;
use crate::error::Result;

/// Encoded chart image (PNG for the reference behaviour).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageArtifact {
    pub media_type: String,
    pub bytes: Vec<u8>,
}

/// Encoded report document (PDF for the reference behaviour).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentArtifact {
    pub media_type: String,
    pub bytes: Vec<u8>,
}

/// Draws close, MA20, MA50 and the Bollinger bands from an analysis.
pub trait ChartRenderer {
    fn render(&self, analysis: &Analysis) -> Result<ImageArtifact>;
}

/// Lays out the report text followed by the chart on a later page,
/// paginating text that overflows a page.
pub trait DocumentBuilder {
    fn build(&self, report_text: &str, chart: &ImageArtifact) -> Result<DocumentArtifact>;
}

/// File extension for a media type, used when writing artifacts to disk.
pub fn extension_for(media_type: &str) -> &'static str {
    match media_type {
        "image/png" => "png",
        "image/svg+xml" => "svg",
        "image/jpeg" => "jpg",
        "application/pdf" => "pdf",
        _ => "bin",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_media_types_map_to_extensions() {
        assert_eq!(extension_for("image/png"), "png");
        assert_eq!(extension_for("application/pdf"), "pdf");
        assert_eq!(extension_for("application/x-unknown"), "bin");
    }
}
