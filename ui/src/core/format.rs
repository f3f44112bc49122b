//! Formatting helpers for export file names.

use time::{macros::format_description, OffsetDateTime};

/// Local wall-clock time, UTC when the offset cannot be determined.
pub fn local_now() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}

/// `YYYYMMDD_HHMM`
pub fn timestamp_slug(at: OffsetDateTime) -> String {
    at.format(&format_description!("[year][month][day]_[hour][minute]"))
        .unwrap_or_else(|_| "export".into())
}

/// `mydungeon_<stem>_YYYYMMDD_HHMM.<ext>`
pub fn export_filename(stem: &str, ext: &str, at: OffsetDateTime) -> String {
    format!("mydungeon_{stem}_{}.{ext}", timestamp_slug(at))
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn slug_is_zero_padded() {
        let at = datetime!(2024-03-05 07:09:59 UTC);
        assert_eq!(timestamp_slug(at), "20240305_0709");
    }

    #[test]
    fn filenames_follow_app_prefix() {
        let at = datetime!(2025-12-31 23:45 UTC);
        assert_eq!(
            export_filename("details", "pdf", at),
            "mydungeon_details_20251231_2345.pdf"
        );
        assert_eq!(
            export_filename("compatibility", "png", at),
            "mydungeon_compatibility_20251231_2345.png"
        );
    }
}
