//! Result export pipeline.
//!
//! A stored result becomes an [`ExportDocument`], is laid out as an SVG
//! fragment, rasterized at the configured scale, cut into page slices and
//! written into an A4 PDF.

pub mod bitmap;
pub mod document;
pub mod fonts;
pub mod layout;
pub mod paginate;
pub mod pdf;
pub mod raster;

use thiserror::Error;

use crate::core::config::ExportConfig;
use bitmap::Bitmap;
pub use document::ExportDocument;
use pdf::{PageSize, PdfDocumentBuilder, PdfFile, Placement};
pub use raster::{platform_rasterizer, Rasterizer};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("export capability unavailable: {0}")]
    Unavailable(String),
    #[error("rasterization failed: {0}")]
    Raster(String),
    #[error("rasterizer produced an empty bitmap")]
    EmptyBitmap,
    #[error("encoding failed: {0}")]
    Encode(String),
    #[error("layout failed: {0}")]
    Layout(String),
    #[error("saving failed: {0}")]
    Save(String),
    #[error(transparent)]
    Fetch(#[from] api::ApiError),
}

/// Render `doc` to a bitmap, probing the rasterizer first.
pub async fn rasterize_document<R: Rasterizer>(
    rasterizer: &R,
    doc: &ExportDocument,
    config: &ExportConfig,
) -> Result<Bitmap, ExportError> {
    rasterizer.ensure_available()?;
    let fragment = layout::render_fragment(doc, config);
    log::debug!(
        "Rasterizing {}x{} fragment at {}x",
        fragment.width,
        fragment.height,
        config.scale
    );
    rasterizer.rasterize(&fragment, config.scale).await
}

/// Cut `bitmap` into page slices and write them into a PDF.
pub fn bitmap_to_pdf(
    bitmap: &Bitmap,
    config: &ExportConfig,
    filename: &str,
) -> Result<PdfFile, ExportError> {
    let pagination = paginate::paginate(
        bitmap.width(),
        bitmap.height(),
        config.printable_width_mm(),
        config.printable_height_mm(),
    )?;

    let mut builder = PdfDocumentBuilder::new(PageSize {
        width_mm: config.page_width_mm,
        height_mm: config.page_height_mm,
    });
    for slice in &pagination.slices {
        let jpeg = bitmap.rows_to_jpeg(slice.top, slice.rows, config.jpeg_quality)?;
        builder.add_page();
        builder.place_image(
            jpeg,
            Placement {
                x: config.margin_mm,
                y: config.margin_mm,
                width: config.printable_width_mm(),
                height: slice.placed_height,
            },
        )?;
    }

    builder.finish(filename)
}

pub async fn document_to_pdf<R: Rasterizer>(
    rasterizer: &R,
    doc: &ExportDocument,
    config: &ExportConfig,
    filename: &str,
) -> Result<PdfFile, ExportError> {
    let bitmap = rasterize_document(rasterizer, doc, config).await?;
    bitmap_to_pdf(&bitmap, config, filename)
}

pub async fn document_to_png<R: Rasterizer>(
    rasterizer: &R,
    doc: &ExportDocument,
    config: &ExportConfig,
) -> Result<Vec<u8>, ExportError> {
    rasterize_document(rasterizer, doc, config).await?.to_png()
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::layout::Fragment;
    use super::*;

    /// Produces a solid bitmap of the requested size.
    struct FakeRasterizer {
        available: bool,
        height: u32,
        calls: Cell<usize>,
    }

    impl FakeRasterizer {
        fn new(available: bool, height: u32) -> Self {
            Self {
                available,
                height,
                calls: Cell::new(0),
            }
        }
    }

    impl Rasterizer for FakeRasterizer {
        fn ensure_available(&self) -> Result<(), ExportError> {
            if self.available {
                Ok(())
            } else {
                Err(ExportError::Unavailable("not loaded".into()))
            }
        }

        async fn rasterize(&self, _fragment: &Fragment, _scale: f64) -> Result<Bitmap, ExportError> {
            self.calls.set(self.calls.get() + 1);
            let width = 1620;
            Bitmap::from_rgba(width, self.height, vec![200; (width * self.height * 4) as usize])
        }
    }

    fn sample_doc() -> ExportDocument {
        ExportDocument::single(&api::SingleResult {
            numbers: vec![1, 2, 3],
            hissatsu_numbers: vec![2],
            ..Default::default()
        })
    }

    fn page_objects(bytes: &[u8]) -> usize {
        bytes.windows(12).filter(|w| *w == b"/Type /Page\n").count()
    }

    #[test]
    fn unavailable_rasterizer_aborts_before_rendering() {
        let rasterizer = FakeRasterizer::new(false, 100);
        let outcome = futures::executor::block_on(document_to_pdf(
            &rasterizer,
            &sample_doc(),
            &ExportConfig::A4,
            "x.pdf",
        ));
        assert!(matches!(outcome, Err(ExportError::Unavailable(_))));
        assert_eq!(rasterizer.calls.get(), 0);
    }

    #[test]
    fn tall_bitmap_spans_several_pages() {
        // 1620px wide at 180mm printable: 2403 rows per 267mm page.
        let rasterizer = FakeRasterizer::new(true, 5000);
        let file = futures::executor::block_on(document_to_pdf(
            &rasterizer,
            &sample_doc(),
            &ExportConfig::A4,
            "mydungeon_details_20240101_0000.pdf",
        ))
        .expect("pdf");
        assert_eq!(page_objects(&file.bytes), 3);
    }

    #[test]
    fn short_bitmap_is_single_page() {
        let rasterizer = FakeRasterizer::new(true, 400);
        let file = futures::executor::block_on(document_to_pdf(
            &rasterizer,
            &sample_doc(),
            &ExportConfig::A4,
            "one.pdf",
        ))
        .expect("pdf");
        assert_eq!(page_objects(&file.bytes), 1);
    }

    #[test]
    fn png_export_encodes_the_whole_bitmap() {
        let rasterizer = FakeRasterizer::new(true, 40);
        let png = futures::executor::block_on(document_to_png(
            &rasterizer,
            &sample_doc(),
            &ExportConfig::A4,
        ))
        .expect("png");
        assert!(png.starts_with(&[0x89, b'P', b'N', b'G']));
    }
}
