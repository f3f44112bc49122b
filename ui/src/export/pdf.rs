//! Minimal image-only PDF writer.
//!
//! Pages hold nothing but JPEG images placed in millimetre coordinates
//! measured from the top-left corner of the page.

use pdf_writer::{Content, Filter, Name, Pdf, Rect, Ref};

use super::bitmap::JpegImage;
use super::ExportError;

const PT_PER_MM: f64 = 72.0 / 25.4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width_mm: f64,
    pub height_mm: f64,
}

impl PageSize {
    pub const A4_PORTRAIT: PageSize = PageSize {
        width_mm: 210.0,
        height_mm: 297.0,
    };
}

/// Target rectangle in millimetres, origin top-left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

struct PlacedImage {
    image: JpegImage,
    at: Placement,
}

/// Finished document ready to hand to the host for saving.
#[derive(Debug, Clone, PartialEq)]
pub struct PdfFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

pub struct PdfDocumentBuilder {
    page_size: PageSize,
    pages: Vec<Vec<PlacedImage>>,
}

impl PdfDocumentBuilder {
    pub fn new(page_size: PageSize) -> Self {
        Self {
            page_size,
            pages: Vec::new(),
        }
    }

    pub fn add_page(&mut self) {
        self.pages.push(Vec::new());
    }

    /// Place `image` on the most recently added page.
    pub fn place_image(&mut self, image: JpegImage, at: Placement) -> Result<(), ExportError> {
        let page = self
            .pages
            .last_mut()
            .ok_or_else(|| ExportError::Layout("image placed before any page".into()))?;
        page.push(PlacedImage { image, at });
        Ok(())
    }

    pub fn finish(self, filename: &str) -> Result<PdfFile, ExportError> {
        if self.pages.is_empty() {
            return Err(ExportError::Layout("document has no pages".into()));
        }

        let mut next_id = 1;
        let mut alloc = || {
            let id = Ref::new(next_id);
            next_id += 1;
            id
        };

        let mut pdf = Pdf::new();
        let catalog_id = alloc();
        let pages_id = alloc();
        let page_w = self.page_size.width_mm * PT_PER_MM;
        let page_h = self.page_size.height_mm * PT_PER_MM;

        let mut page_ids = Vec::with_capacity(self.pages.len());
        for placed in &self.pages {
            let page_id = alloc();
            let content_id = alloc();
            page_ids.push(page_id);

            let mut content = Content::new();
            let mut xobjects: Vec<(String, Ref)> = Vec::with_capacity(placed.len());
            for (index, item) in placed.iter().enumerate() {
                let image_id = alloc();
                let name = format!("Im{}", index + 1);

                let mut xobj = pdf.image_xobject(image_id, &item.image.data);
                xobj.filter(Filter::DctDecode);
                xobj.width(item.image.width as i32);
                xobj.height(item.image.height as i32);
                xobj.color_space().device_rgb();
                xobj.bits_per_component(8);
                drop(xobj);

                let w = (item.at.width * PT_PER_MM) as f32;
                let h = (item.at.height * PT_PER_MM) as f32;
                let x = (item.at.x * PT_PER_MM) as f32;
                let y = (page_h - (item.at.y + item.at.height) * PT_PER_MM) as f32;
                content.save_state();
                content.transform([w, 0.0, 0.0, h, x, y]);
                content.x_object(Name(name.as_bytes()));
                content.restore_state();

                xobjects.push((name, image_id));
            }
            pdf.stream(content_id, &content.finish());

            let mut page = pdf.page(page_id);
            page.media_box(Rect::new(0.0, 0.0, page_w as f32, page_h as f32))
                .parent(pages_id)
                .contents(content_id);
            let mut resources = page.resources();
            let mut objects = resources.x_objects();
            for (name, id) in &xobjects {
                objects.pair(Name(name.as_bytes()), *id);
            }
        }

        pdf.catalog(catalog_id).pages(pages_id);
        pdf.pages(pages_id)
            .kids(page_ids.iter().copied())
            .count(page_ids.len() as i32);

        log::info!("PDF {filename} assembled with {} page(s)", page_ids.len());
        Ok(PdfFile {
            filename: filename.to_string(),
            bytes: pdf.finish(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny_jpeg() -> JpegImage {
        JpegImage {
            data: vec![0xFF, 0xD8, 0xFF, 0xD9],
            width: 4,
            height: 2,
        }
    }

    fn count(haystack: &[u8], needle: &[u8]) -> usize {
        haystack.windows(needle.len()).filter(|w| *w == needle).count()
    }

    #[test]
    fn placing_before_a_page_fails() {
        let mut builder = PdfDocumentBuilder::new(PageSize::A4_PORTRAIT);
        let at = Placement { x: 15.0, y: 15.0, width: 180.0, height: 90.0 };
        assert!(builder.place_image(tiny_jpeg(), at).is_err());
    }

    #[test]
    fn empty_document_is_rejected() {
        let builder = PdfDocumentBuilder::new(PageSize::A4_PORTRAIT);
        assert!(builder.finish("empty.pdf").is_err());
    }

    #[test]
    fn each_page_gets_its_own_page_object() {
        let mut builder = PdfDocumentBuilder::new(PageSize::A4_PORTRAIT);
        for _ in 0..3 {
            builder.add_page();
            builder
                .place_image(
                    tiny_jpeg(),
                    Placement { x: 15.0, y: 15.0, width: 180.0, height: 90.0 },
                )
                .expect("place");
        }
        let file = builder.finish("mydungeon_details_20240101_0000.pdf").expect("finish");
        assert_eq!(file.filename, "mydungeon_details_20240101_0000.pdf");
        assert!(file.bytes.starts_with(b"%PDF-"));
        assert_eq!(count(&file.bytes, b"/Type /Page\n"), 3);
        assert_eq!(count(&file.bytes, b"/DCTDecode"), 3);
        assert_eq!(count(&file.bytes, b"/Count 3"), 1);
    }

    #[test]
    fn media_box_is_a4_in_points() {
        let mut builder = PdfDocumentBuilder::new(PageSize::A4_PORTRAIT);
        builder.add_page();
        let file = builder.finish("blank.pdf").expect("finish");
        let text = String::from_utf8_lossy(&file.bytes);
        assert!(text.contains("/MediaBox ["));
        assert!(text.contains("595.27"));
        assert!(text.contains("841.8"));
    }
}
