use api::{CompatibilityResult, SingleResult};
use dioxus::logger::tracing;
use dioxus::prelude::*;

use crate::core::config::{AppConfig, ExportConfig};
use crate::core::format::{export_filename, local_now};
use crate::core::platform;
use crate::export::{self, platform_rasterizer, ExportDocument, ExportError};
use crate::t;

/// Result an export panel works on.
#[derive(Clone, Debug, PartialEq)]
pub enum ExportTarget {
    Single(SingleResult),
    Compatibility(CompatibilityResult),
}

impl ExportTarget {
    pub fn document(&self) -> ExportDocument {
        match self {
            ExportTarget::Single(result) => ExportDocument::single(result),
            ExportTarget::Compatibility(result) => ExportDocument::compatibility(result),
        }
    }

    pub fn image_url(&self) -> Option<&str> {
        let url = match self {
            ExportTarget::Single(result) => result.image_url.as_deref(),
            ExportTarget::Compatibility(result) => result.image_url.as_deref(),
        };
        url.filter(|u| !u.is_empty())
    }

    /// File name stem of the image download.
    pub fn image_stem(&self) -> &'static str {
        match self {
            ExportTarget::Single(_) => "result",
            ExportTarget::Compatibility(_) => "compatibility",
        }
    }

    /// File name stem of the PDF download.
    pub fn pdf_stem(&self) -> &'static str {
        match self {
            ExportTarget::Single(_) => "details",
            ExportTarget::Compatibility(_) => "compatibility",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportKind {
    Image,
    Pdf,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum ExportStatus {
    #[default]
    Idle,
    Working(ExportKind),
    Done(String),
    Error(String),
}

#[derive(Clone, Debug, PartialEq)]
pub enum ExportEvent {
    Started(ExportKind),
    Succeeded(String),
    Failed(String),
}

/// View state of the export panel. Buttons are disabled while busy.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExportViewState {
    pub status: ExportStatus,
}

impl ExportViewState {
    pub fn busy(&self) -> bool {
        matches!(self.status, ExportStatus::Working(_))
    }

    /// Apply `event`, returning `false` when it does not fit the current
    /// state (a second start while busy, or a completion with nothing
    /// running).
    pub fn apply(&mut self, event: ExportEvent) -> bool {
        let next = match (event, self.busy()) {
            (ExportEvent::Started(_), true) => return false,
            (ExportEvent::Started(kind), false) => ExportStatus::Working(kind),
            (ExportEvent::Succeeded(message), true) => ExportStatus::Done(message),
            (ExportEvent::Failed(message), true) => ExportStatus::Error(message),
            (_, false) => return false,
        };
        self.status = next;
        true
    }
}

#[component]
pub fn ExportPanel(target: ExportTarget) -> Element {
    let state = use_signal(ExportViewState::default);
    let busy = state.read().busy();

    let feedback = match &state.read().status {
        ExportStatus::Idle => None,
        ExportStatus::Working(_) => Some(("export-panel__meta".to_string(), t!("export-working"))),
        ExportStatus::Done(message) => Some((
            "export-panel__meta export-panel__meta--success".to_string(),
            format!("✅ {message}"),
        )),
        ExportStatus::Error(err) => Some((
            "export-panel__meta export-panel__meta--error".to_string(),
            format!("⚠️ {err}"),
        )),
    };

    let image_label = match state.read().status {
        ExportStatus::Working(ExportKind::Image) => t!("export-working"),
        _ => t!("export-image-button"),
    };
    let pdf_label = match state.read().status {
        ExportStatus::Working(ExportKind::Pdf) => t!("export-working"),
        _ => t!("export-pdf-button"),
    };

    let image_handler = {
        let target = target.clone();
        move |_| run_export(state, target.clone(), ExportKind::Image)
    };
    let pdf_handler = {
        let target = target.clone();
        move |_| run_export(state, target.clone(), ExportKind::Pdf)
    };

    rsx! {
        section { class: "export-panel",
            h2 { {t!("export-title")} }
            div { class: "export-panel__actions",
                button {
                    r#type: "button",
                    class: "button button--primary",
                    disabled: busy,
                    onclick: image_handler,
                    "{image_label}"
                }
                button {
                    r#type: "button",
                    class: "button button--accent",
                    disabled: busy,
                    onclick: pdf_handler,
                    "{pdf_label}"
                }
            }
            if let Some((class_name, message)) = feedback {
                p { class: "{class_name}", "{message}" }
            }
        }
    }
}

fn run_export(mut state: Signal<ExportViewState>, target: ExportTarget, kind: ExportKind) {
    if !state.write().apply(ExportEvent::Started(kind)) {
        return;
    }

    platform::spawn_future(async move {
        let outcome = match kind {
            ExportKind::Image => perform_image_export(&target).await,
            ExportKind::Pdf => perform_pdf_export(&target).await,
        };
        let event = match outcome {
            Ok(Some(path)) => ExportEvent::Succeeded(t!("export-saved", path = path)),
            Ok(None) => ExportEvent::Succeeded(t!("export-started")),
            Err(err) => {
                tracing::warn!("Export failed: {err}");
                let message = failure_message(kind, &err);
                platform::notify_blocking(&message);
                ExportEvent::Failed(message)
            }
        };
        state.write().apply(event);
    });
}

fn failure_message(kind: ExportKind, err: &ExportError) -> String {
    match (kind, err) {
        (_, ExportError::Unavailable(_)) => t!("export-unavailable"),
        (ExportKind::Pdf, _) => t!("export-pdf-failed"),
        (ExportKind::Image, _) => t!("export-image-failed"),
    }
}

async fn perform_pdf_export(target: &ExportTarget) -> Result<Option<String>, ExportError> {
    let config = ExportConfig::default();
    let filename = export_filename(target.pdf_stem(), "pdf", local_now());
    let rasterizer = platform_rasterizer();
    let file =
        export::document_to_pdf(&rasterizer, &target.document(), &config, &filename).await?;
    tracing::info!("PDF ready: {} ({} bytes)", file.filename, file.bytes.len());
    download_bytes(&file.filename, "application/pdf", file.bytes).await
}

/// Prefer the server-rendered image; without one, rasterize the details.
async fn perform_image_export(target: &ExportTarget) -> Result<Option<String>, ExportError> {
    let filename = export_filename(target.image_stem(), "png", local_now());
    let bytes = match target.image_url() {
        Some(url) => {
            let client = AppConfig::resolve().client()?;
            client.fetch_bytes(url).await?
        }
        None => {
            let rasterizer = platform_rasterizer();
            export::document_to_png(&rasterizer, &target.document(), &ExportConfig::default())
                .await?
        }
    };
    download_bytes(&filename, "image/png", bytes).await
}

async fn download_bytes(
    filename: &str,
    mime: &str,
    bytes: Vec<u8>,
) -> Result<Option<String>, ExportError> {
    #[cfg(target_arch = "wasm32")]
    {
        use wasm_bindgen::JsCast;
        use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

        let save_err = |what: &str| ExportError::Save(what.to_string());

        let array = js_sys::Uint8Array::from(bytes.as_slice());
        let parts = js_sys::Array::new();
        parts.push(&array.buffer());

        let opts = BlobPropertyBag::new();
        opts.set_type(mime);
        let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &opts)
            .map_err(|_| save_err("failed to create blob"))?;
        let url = Url::create_object_url_with_blob(&blob)
            .map_err(|_| save_err("unable to create download"))?;

        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| save_err("document unavailable"))?;
        let anchor: HtmlAnchorElement = document
            .create_element("a")
            .map_err(|_| save_err("unable to create anchor"))?
            .dyn_into()
            .map_err(|_| save_err("anchor cast failed"))?;
        anchor.set_href(&url);
        anchor.set_download(filename);
        anchor.style().set_property("display", "none").ok();

        document
            .body()
            .ok_or_else(|| save_err("missing body"))?
            .append_child(&anchor)
            .ok();
        anchor.click();
        anchor.remove();
        Url::revoke_object_url(&url).ok();

        Ok(None)
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        use std::fs;
        use std::io::Write;

        let _ = mime;
        let dir = desktop_export_dir()?;
        let save_err = |err: std::io::Error| ExportError::Save(err.to_string());
        fs::create_dir_all(&dir).map_err(save_err)?;
        let path = dir.join(filename);
        let mut file = fs::File::create(&path).map_err(save_err)?;
        file.write_all(&bytes).map_err(save_err)?;
        Ok(Some(path.to_string_lossy().to_string()))
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn desktop_export_dir() -> Result<std::path::PathBuf, ExportError> {
    let dirs = directories::ProjectDirs::from("com", "MyDungeon", "MyDungeon")
        .ok_or_else(|| ExportError::Save("unable to determine export directory".into()))?;
    Ok(dirs.data_dir().join("exports"))
}
