//! Font metrics for export layout.
//!
//! With the `embed_noto` feature the layout measures glyphs from an embedded
//! Noto Sans JP via `fontdue`. Without it, widths and line heights come from
//! fixed ratios that match Noto Sans JP closely enough for wrapping: full
//! width glyphs advance one em, Latin glyphs a bit over half an em.
//!
//! Expected font location (relative to this file):
//! - ../../assets/fonts/NotoSansJP-Regular.ttf

#[cfg(feature = "embed_noto")]
use fontdue::Font;
use once_cell::sync::Lazy;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FontWeight {
    Regular,
    Bold,
}

/// Vertical metrics used by the layout.
#[derive(Clone, Copy, Debug)]
pub struct TextMetrics {
    /// Line advance.
    pub line_h: f64,
    /// Distance from the top of the line box to the baseline.
    pub asc: f64,
}

pub struct Fonts {
    #[cfg(feature = "embed_noto")]
    font: Option<Font>,
}

impl Fonts {
    pub fn load() -> Self {
        #[cfg(feature = "embed_noto")]
        {
            const NOTO_BYTES: &[u8] = include_bytes!("../../assets/fonts/NotoSansJP-Regular.ttf");
            let font = match Font::from_bytes(NOTO_BYTES, Default::default()) {
                Ok(font) => Some(font),
                Err(err) => {
                    log::warn!("Embedded font failed to parse ({err}); using ratio metrics");
                    None
                }
            };
            Fonts { font }
        }
        #[cfg(not(feature = "embed_noto"))]
        {
            Fonts {}
        }
    }

    pub fn metrics(&self, _weight: FontWeight, size_px: f64) -> TextMetrics {
        let line_h = (size_px * 1.5).round();
        let asc = (size_px * 1.16).round();
        TextMetrics { line_h, asc }
    }

    /// Horizontal advance of `ch` in px.
    pub fn advance(&self, ch: char, weight: FontWeight, size_px: f64) -> f64 {
        #[cfg(feature = "embed_noto")]
        {
            if let Some(font) = &self.font {
                let width = font.metrics(ch, size_px as f32).advance_width as f64;
                return match weight {
                    FontWeight::Bold => width * 1.04,
                    FontWeight::Regular => width,
                };
            }
        }

        let base = if is_wide(ch) {
            size_px
        } else if ch == ' ' {
            size_px * 0.25
        } else {
            size_px * 0.58
        };
        match weight {
            FontWeight::Bold => base * 1.04,
            FontWeight::Regular => base,
        }
    }

    pub fn text_width(&self, text: &str, weight: FontWeight, size_px: f64) -> f64 {
        text.chars().map(|ch| self.advance(ch, weight, size_px)).sum()
    }
}

/// Full width glyphs: CJK, kana, full width forms and symbols such as ★.
fn is_wide(ch: char) -> bool {
    matches!(ch as u32,
        0x1100..=0x115F
        | 0x2600..=0x27BF
        | 0x2E80..=0x303E
        | 0x3041..=0x33FF
        | 0x3400..=0x4DBF
        | 0x4E00..=0x9FFF
        | 0xAC00..=0xD7A3
        | 0xF900..=0xFAFF
        | 0xFE30..=0xFE4F
        | 0xFF00..=0xFF60
        | 0xFFE0..=0xFFE6)
}

static FONTS: Lazy<Fonts> = Lazy::new(Fonts::load);

/// Shared instance, loaded on first use.
pub fn fonts() -> &'static Fonts {
    &FONTS
}

pub fn measure(weight: FontWeight, size_px: f64) -> TextMetrics {
    fonts().metrics(weight, size_px)
}
