//! Result presentation: number markers, color tallies, cards and the export
//! panel shared by both result pages.

pub mod cards;
pub mod numbers;
pub mod tally;

mod export;
pub use export::{ExportEvent, ExportKind, ExportPanel, ExportStatus, ExportTarget, ExportViewState};
