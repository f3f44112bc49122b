//! Runtime configuration shared by the views and the export pipeline.

/// Backend location. `DUNGEON_API_BASE` is read at compile time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api_base: String,
}

impl AppConfig {
    pub fn resolve() -> Self {
        let api_base = option_env!("DUNGEON_API_BASE")
            .map(str::to_string)
            .filter(|base| !base.trim().is_empty())
            .unwrap_or_else(default_api_base);
        Self { api_base }
    }

    pub fn client(&self) -> api::Result<api::ApiClient> {
        api::ApiClient::new(&self.api_base)
    }

    /// Absolute URL for a server-relative asset path such as `/output/x.png`.
    pub fn asset_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        format!(
            "{}/{}",
            self.api_base.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[cfg(target_arch = "wasm32")]
fn default_api_base() -> String {
    web_sys::window()
        .and_then(|window| window.location().origin().ok())
        .unwrap_or_else(|| "http://localhost:8000".to_string())
}

#[cfg(not(target_arch = "wasm32"))]
fn default_api_base() -> String {
    "http://localhost:8000".to_string()
}

/// Fixed export geometry. Lengths are in millimetres unless noted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExportConfig {
    pub page_width_mm: f64,
    pub page_height_mm: f64,
    pub margin_mm: f64,
    /// Rasterization scale relative to CSS pixels.
    pub scale: f64,
    /// JPEG quality, 1-100.
    pub jpeg_quality: u8,
    /// Fragment width in CSS pixels.
    pub fragment_width: f64,
    pub fragment_padding: f64,
}

impl ExportConfig {
    pub const A4: ExportConfig = ExportConfig {
        page_width_mm: 210.0,
        page_height_mm: 297.0,
        margin_mm: 15.0,
        scale: 2.0,
        jpeg_quality: 95,
        fragment_width: 750.0,
        fragment_padding: 30.0,
    };

    pub fn printable_width_mm(&self) -> f64 {
        self.page_width_mm - 2.0 * self.margin_mm
    }

    pub fn printable_height_mm(&self) -> f64 {
        self.page_height_mm - 2.0 * self.margin_mm
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self::A4
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a4_printable_area_excludes_margins() {
        let cfg = ExportConfig::default();
        assert_eq!(cfg.printable_width_mm(), 180.0);
        assert_eq!(cfg.printable_height_mm(), 267.0);
    }

    #[test]
    fn asset_urls_resolve_against_base() {
        let cfg = AppConfig {
            api_base: "http://localhost:8000/".into(),
        };
        assert_eq!(
            cfg.asset_url("/output/result.png"),
            "http://localhost:8000/output/result.png"
        );
        assert_eq!(cfg.asset_url("https://cdn/x.png"), "https://cdn/x.png");
    }

    #[test]
    fn resolved_base_is_absolute() {
        let cfg = AppConfig::resolve();
        assert!(cfg.api_base.starts_with("http"));
        assert!(cfg.client().is_ok());
    }
}
