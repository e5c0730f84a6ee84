//! Off-screen rendering into RGB frames, PNG bytes and SVG documents

use deming_common::{DemingError, Result};
use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder};
use plotters::coord::Shift;
use plotters::prelude::*;

/// Draw into an in-memory RGB frame of `size` pixels (3 bytes per pixel,
/// row major).
pub fn render_rgb<F>(size: (u32, u32), draw: F) -> Result<Vec<u8>>
where
    F: for<'a> FnOnce(&DrawingArea<BitMapBackend<'a>, Shift>) -> Result<()>,
{
    let (width, height) = size;
    if width == 0 || height == 0 {
        return Err(DemingError::render(format!("Canvas {width}x{height} has no pixels")));
    }
    let mut buffer = vec![0u8; width as usize * height as usize * 3];

    {
        let root = BitMapBackend::with_buffer(&mut buffer, size).into_drawing_area();
        draw(&root)?;
    }

    Ok(buffer)
}

/// Draw into a frame and encode it as PNG
pub fn render_png<F>(size: (u32, u32), draw: F) -> Result<Vec<u8>>
where
    F: for<'a> FnOnce(&DrawingArea<BitMapBackend<'a>, Shift>) -> Result<()>,
{
    let frame = render_rgb(size, draw)?;
    encode_png(&frame, size)
}

/// Encode an RGB frame as PNG
pub fn encode_png(frame: &[u8], (width, height): (u32, u32)) -> Result<Vec<u8>> {
    let expected = width as usize * height as usize * 3;
    if frame.len() != expected {
        return Err(DemingError::encode(format!(
            "RGB frame holds {} bytes, expected {expected} for {width}x{height}",
            frame.len()
        )));
    }

    let mut bytes = Vec::new();
    PngEncoder::new(&mut bytes).write_image(frame, width, height, ColorType::Rgb8)?;

    tracing::debug!(width, height, bytes = bytes.len(), "Encoded PNG");
    Ok(bytes)
}

/// Draw into an SVG document and return it as UTF-8 bytes
pub fn render_svg<F>(size: (u32, u32), draw: F) -> Result<Vec<u8>>
where
    F: for<'a> FnOnce(&DrawingArea<SVGBackend<'a>, Shift>) -> Result<()>,
{
    let mut document = String::new();

    {
        let root = SVGBackend::with_string(&mut document, size).into_drawing_area();
        draw(&root)?;
    }

    if document.is_empty() {
        return Err(DemingError::encode("SVG backend produced an empty document"));
    }
    Ok(document.into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill_red<DB>(root: &DrawingArea<DB, Shift>) -> Result<()>
    where
        DB: DrawingBackend,
        DB::ErrorType: 'static,
    {
        root.fill(&RED)?;
        root.present()?;
        Ok(())
    }

    #[test]
    fn test_rgb_frame_size_and_content() {
        let frame = render_rgb((4, 3), |root| fill_red(root)).unwrap();
        assert_eq!(frame.len(), 4 * 3 * 3);
        assert_eq!(&frame[..3], &[255, 0, 0]);
    }

    #[test]
    fn test_png_signature() {
        let png = render_png((8, 8), |root| fill_red(root)).unwrap();
        assert_eq!(&png[..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
    }

    #[test]
    fn test_svg_document() {
        let svg = render_svg((20, 10), |root| fill_red(root)).unwrap();
        let text = String::from_utf8(svg).unwrap();
        assert!(text.starts_with("<svg"));
        assert!(text.contains("</svg>"));
    }

    #[test]
    fn test_empty_canvas_rejected() {
        let err = render_png((0, 10), |root| fill_red(root)).unwrap_err();
        assert!(matches!(err, DemingError::Render { .. }));
    }

    #[test]
    fn test_draw_errors_propagate() {
        let err = render_svg((10, 10), |_| Err(DemingError::computation("boom"))).unwrap_err();
        assert!(matches!(err, DemingError::Computation { .. }));
    }

    #[test]
    fn test_short_frame_is_encode_error() {
        let err = encode_png(&[0, 0, 0], (4, 4)).unwrap_err();
        assert!(matches!(err, DemingError::Encode { .. }));
    }
}
