//! Editing session over a single decoded upload.

use super::{Pipeline, PipelineError, PipelineParams};
use crate::buffer::ImageBuffer;
use crate::decode::{decode_image, DecodeError};
use crate::draw::FontLibrary;
use crate::encode::{encode_image, EncodeError, ExportFormat};

/// One image being edited.
///
/// Every render starts again from the decoded original. A failed render
/// leaves the previous result in place, so there is always something to show
/// and export.
#[derive(Debug)]
pub struct EditSession {
    original: ImageBuffer,
    fonts: FontLibrary,
    rendered: Option<ImageBuffer>,
}

impl EditSession {
    /// Start a session with the built-in fonts.
    pub fn new(original: ImageBuffer) -> Self {
        Self::with_fonts(original, FontLibrary::default())
    }

    pub fn with_fonts(original: ImageBuffer, fonts: FontLibrary) -> Self {
        Self {
            original,
            fonts,
            rendered: None,
        }
    }

    /// Decode an uploaded file and start a session on it.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        decode_image(bytes).map(Self::new)
    }

    pub fn original(&self) -> &ImageBuffer {
        &self.original
    }

    pub fn fonts(&self) -> &FontLibrary {
        &self.fonts
    }

    pub fn fonts_mut(&mut self) -> &mut FontLibrary {
        &mut self.fonts
    }

    /// The last successful render, or the original before any render.
    pub fn current(&self) -> &ImageBuffer {
        self.rendered.as_ref().unwrap_or(&self.original)
    }

    /// Re-run the pipeline from the original with `params`.
    ///
    /// On failure the previous render stays current.
    pub fn render(&mut self, params: &PipelineParams) -> Result<&ImageBuffer, PipelineError> {
        let pipeline = Pipeline::from_params(params);
        let image = pipeline.apply(self.original.clone(), &self.fonts)?;
        Ok(self.rendered.insert(image))
    }

    /// Encode the current image for download.
    pub fn export(&self, format: ExportFormat) -> Result<Vec<u8>, EncodeError> {
        encode_image(self.current(), format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::ColorMode;
    use crate::pipeline::{Bounds, CropParams, Slot, ThumbnailParams};

    fn session() -> EditSession {
        EditSession::new(ImageBuffer::filled(40, 20, ColorMode::Rgb, [10, 20, 30, 0]))
    }

    fn thumbnail(max_size: u32) -> PipelineParams {
        PipelineParams {
            thumbnail: Slot::enabled(ThumbnailParams { max_size }),
            ..PipelineParams::default()
        }
    }

    #[test]
    fn test_current_starts_as_original() {
        let s = session();
        assert_eq!(s.current(), s.original());
    }

    #[test]
    fn test_render_replaces_current() {
        let mut s = session();
        assert_eq!(s.render(&thumbnail(10)).unwrap().dimensions(), (10, 5));
        assert_eq!(s.current().dimensions(), (10, 5));

        // Renders restart from the original, not the previous result
        assert_eq!(s.render(&thumbnail(20)).unwrap().dimensions(), (20, 10));
    }

    #[test]
    fn test_failed_render_keeps_previous() {
        let mut s = session();
        s.render(&thumbnail(10)).unwrap();

        let bad = PipelineParams {
            crop: Slot::enabled(CropParams {
                bounds: Bounds::new(0, 0, 500, 5),
            }),
            ..PipelineParams::default()
        };
        assert!(s.render(&bad).is_err());
        assert_eq!(s.current().dimensions(), (10, 5));
    }

    #[test]
    fn test_export_current() {
        let mut s = session();
        s.render(&thumbnail(8)).unwrap();
        let png = s.export(ExportFormat::Png).unwrap();
        let decoded = decode_image(&png).unwrap();
        assert_eq!(decoded.dimensions(), (8, 4));
    }

    #[test]
    fn test_from_bytes_rejects_garbage() {
        assert!(EditSession::from_bytes(b"not an image").is_err());
    }
}
