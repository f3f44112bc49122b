//! Rasterizer adapters: SVG fragment in, RGBA bitmap out.

use super::bitmap::Bitmap;
use super::layout::Fragment;
use super::ExportError;

/// Renders a laid-out fragment to pixels.
///
/// `ensure_available` must be called before any host state is touched so a
/// missing capability aborts the export up front.
#[allow(async_fn_in_trait)]
pub trait Rasterizer {
    fn ensure_available(&self) -> Result<(), ExportError>;

    async fn rasterize(&self, fragment: &Fragment, scale: f64) -> Result<Bitmap, ExportError>;
}

fn scaled(px: f64, scale: f64) -> u32 {
    (px * scale).ceil().max(1.0) as u32
}

#[cfg(target_arch = "wasm32")]
pub type PlatformRasterizer = web::WebRasterizer;
#[cfg(not(target_arch = "wasm32"))]
pub type PlatformRasterizer = native::NativeRasterizer;

pub fn platform_rasterizer() -> PlatformRasterizer {
    PlatformRasterizer::default()
}

#[cfg(target_arch = "wasm32")]
pub mod web {
    use wasm_bindgen::{JsCast, JsValue};
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{
        Blob, BlobPropertyBag, CanvasRenderingContext2d, Document, HtmlCanvasElement,
        HtmlImageElement, Url,
    };

    use super::{scaled, Bitmap, ExportError, Fragment, Rasterizer};

    /// Draws the SVG through an off-screen `<img>` into a canvas.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct WebRasterizer;

    /// Attached image node and its object URL, released on drop.
    struct AttachedImage {
        image: HtmlImageElement,
        url: String,
    }

    impl Drop for AttachedImage {
        fn drop(&mut self) {
            self.image.remove();
            Url::revoke_object_url(&self.url).ok();
        }
    }

    fn document() -> Result<Document, ExportError> {
        web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| ExportError::Unavailable("document unavailable".into()))
    }

    fn canvas_with_context(
        document: &Document,
    ) -> Result<(HtmlCanvasElement, CanvasRenderingContext2d), ExportError> {
        let canvas: HtmlCanvasElement = document
            .create_element("canvas")
            .map_err(|_| ExportError::Unavailable("unable to create canvas".into()))?
            .dyn_into()
            .map_err(|_| ExportError::Unavailable("canvas cast failed".into()))?;
        let context: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .map_err(|_| ExportError::Unavailable("canvas context unavailable".into()))?
            .ok_or_else(|| ExportError::Unavailable("canvas context missing".into()))?
            .dyn_into()
            .map_err(|_| ExportError::Unavailable("context cast failed".into()))?;
        Ok((canvas, context))
    }

    impl Rasterizer for WebRasterizer {
        fn ensure_available(&self) -> Result<(), ExportError> {
            let document = document()?;
            document
                .body()
                .ok_or_else(|| ExportError::Unavailable("missing body".into()))?;
            canvas_with_context(&document).map(|_| ())
        }

        async fn rasterize(&self, fragment: &Fragment, scale: f64) -> Result<Bitmap, ExportError> {
            let document = document()?;
            let body = document
                .body()
                .ok_or_else(|| ExportError::Unavailable("missing body".into()))?;

            let opts = BlobPropertyBag::new();
            opts.set_type("image/svg+xml;charset=utf-8");
            let parts = js_sys::Array::new();
            parts.push(&JsValue::from_str(&fragment.svg));
            let blob = Blob::new_with_str_sequence_and_options(&parts, &opts)
                .map_err(|_| ExportError::Raster("unable to build SVG blob".into()))?;
            let url = Url::create_object_url_with_blob(&blob)
                .map_err(|_| ExportError::Raster("unable to create SVG URL".into()))?;

            let image = HtmlImageElement::new()
                .map_err(|_| ExportError::Raster("unable to create image".into()))?;
            let attached = AttachedImage {
                image: image.clone(),
                url: url.clone(),
            };
            image.set_cross_origin(Some("anonymous"));
            let style = image.style();
            style.set_property("position", "absolute").ok();
            style.set_property("left", "-10000px").ok();
            style.set_property("top", "0").ok();
            body.append_child(&image)
                .map_err(|_| ExportError::Raster("unable to attach image".into()))?;

            image.set_src(&url);
            JsFuture::from(image.decode())
                .await
                .map_err(|_| ExportError::Raster("image decode failed".into()))?;

            let width = scaled(fragment.width, scale);
            let height = scaled(fragment.height, scale);
            let (canvas, context) = canvas_with_context(&document)?;
            canvas.set_width(width);
            canvas.set_height(height);
            context
                .scale(scale, scale)
                .map_err(|_| ExportError::Raster("unable to scale canvas".into()))?;
            context
                .draw_image_with_html_image_element_and_dw_and_dh(
                    &image,
                    0.0,
                    0.0,
                    fragment.width,
                    fragment.height,
                )
                .map_err(|_| ExportError::Raster("unable to draw image".into()))?;
            drop(attached);

            let data = context
                .get_image_data(0.0, 0.0, f64::from(width), f64::from(height))
                .map_err(|_| ExportError::Raster("canvas pixels unreadable".into()))?
                .data();
            Bitmap::from_rgba(width, height, data.0)
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub mod native {
    use std::sync::Arc;

    use once_cell::sync::Lazy;
    use usvg::fontdb;

    use super::{scaled, Bitmap, ExportError, Fragment, Rasterizer};

    static SYSTEM_FONTS: Lazy<Arc<fontdb::Database>> = Lazy::new(|| {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();
        log::debug!("Loaded {} system font faces for export", db.len());
        Arc::new(db)
    });

    /// Renders with resvg into a tiny-skia pixmap.
    #[derive(Clone)]
    pub struct NativeRasterizer {
        fontdb: Arc<fontdb::Database>,
    }

    impl Default for NativeRasterizer {
        fn default() -> Self {
            Self {
                fontdb: SYSTEM_FONTS.clone(),
            }
        }
    }

    impl NativeRasterizer {
        pub fn with_fonts(fontdb: Arc<fontdb::Database>) -> Self {
            Self { fontdb }
        }
    }

    impl Rasterizer for NativeRasterizer {
        fn ensure_available(&self) -> Result<(), ExportError> {
            if self.fontdb.len() == 0 {
                return Err(ExportError::Unavailable("no fonts available for text".into()));
            }
            Ok(())
        }

        async fn rasterize(&self, fragment: &Fragment, scale: f64) -> Result<Bitmap, ExportError> {
            let options = usvg::Options {
                fontdb: self.fontdb.clone(),
                ..usvg::Options::default()
            };
            let tree = usvg::Tree::from_str(&fragment.svg, &options)
                .map_err(|err| ExportError::Raster(err.to_string()))?;

            let width = scaled(fragment.width, scale);
            let height = scaled(fragment.height, scale);
            let mut pixmap = tiny_skia::Pixmap::new(width, height)
                .ok_or_else(|| ExportError::Raster(format!("cannot allocate {width}x{height}")))?;
            pixmap.fill(tiny_skia::Color::WHITE);
            resvg::render(
                &tree,
                tiny_skia::Transform::from_scale(scale as f32, scale as f32),
                &mut pixmap.as_mut(),
            );

            // Opaque after the white fill, so premultiplied equals straight alpha.
            Bitmap::from_rgba(width, height, pixmap.take())
        }
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use std::sync::Arc;

    use super::native::NativeRasterizer;
    use super::*;

    fn fragment(width: f64, height: f64) -> Fragment {
        Fragment {
            svg: format!(
                "<svg xmlns='http://www.w3.org/2000/svg' width='{width}' height='{height}'><rect x='0' y='0' width='{width}' height='{height}' fill='#ff0000'/></svg>"
            ),
            width,
            height,
        }
    }

    #[test]
    fn empty_font_database_is_unavailable() {
        let rasterizer = NativeRasterizer::with_fonts(Arc::new(usvg::fontdb::Database::new()));
        assert!(matches!(
            rasterizer.ensure_available(),
            Err(ExportError::Unavailable(_))
        ));
    }

    #[test]
    fn shapes_render_at_double_scale() {
        let rasterizer = NativeRasterizer::with_fonts(Arc::new(usvg::fontdb::Database::new()));
        let bitmap = futures::executor::block_on(rasterizer.rasterize(&fragment(30.0, 12.5), 2.0))
            .expect("rasterize");
        assert_eq!((bitmap.width(), bitmap.height()), (60, 25));
    }

    #[test]
    fn invalid_svg_is_a_raster_error() {
        let rasterizer = NativeRasterizer::with_fonts(Arc::new(usvg::fontdb::Database::new()));
        let broken = Fragment {
            svg: "<svg".into(),
            width: 10.0,
            height: 10.0,
        };
        let outcome = futures::executor::block_on(rasterizer.rasterize(&broken, 2.0));
        assert!(matches!(outcome, Err(ExportError::Raster(_))));
    }
}
