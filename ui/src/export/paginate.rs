//! Splits one tall bitmap into page-sized, pixel-contiguous row slices.
//!
//! With bitmap width `bw`, printable width `pw` and printable height `ph`,
//! the bitmap is scaled by `r = pw / bw`. The page count is
//! `ceil(bh * r / ph)` and each page holds `ph / r` source rows. Slice
//! boundaries are those capacities floored to whole pixels, so slices
//! tile the bitmap exactly and the last one carries the remainder. A page
//! must hold at least one source row.

use super::ExportError;

/// Tolerance for float error when a bitmap fills an exact number of pages.
const PAGE_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSlice {
    /// First source row.
    pub top: u32,
    /// Rows in this slice.
    pub rows: u32,
    /// Height on the page, in the printable-area unit: `rows * r`.
    pub placed_height: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Pagination {
    /// Bitmap pixel to page unit ratio.
    pub ratio: f64,
    pub slices: Vec<PageSlice>,
}

impl Pagination {
    pub fn page_count(&self) -> usize {
        self.slices.len()
    }
}

pub fn paginate(
    bitmap_width: u32,
    bitmap_height: u32,
    printable_width: f64,
    printable_height: f64,
) -> Result<Pagination, ExportError> {
    if bitmap_width == 0 || bitmap_height == 0 {
        return Err(ExportError::EmptyBitmap);
    }
    if !(printable_width > 0.0 && printable_height > 0.0) {
        return Err(ExportError::Layout(format!(
            "printable area {printable_width}x{printable_height} is empty"
        )));
    }

    let ratio = printable_width / f64::from(bitmap_width);
    let capacity = printable_height / ratio;
    if capacity < 1.0 {
        return Err(ExportError::Layout(format!(
            "page holds {capacity:.3} source rows; at least one is required"
        )));
    }
    let scaled_height = f64::from(bitmap_height) * ratio;
    let pages = ((scaled_height / printable_height) - PAGE_EPSILON).ceil().max(1.0) as u32;

    let boundary = |page: u32| -> u32 {
        if page >= pages {
            bitmap_height
        } else {
            ((f64::from(page) * capacity).floor() as u32).min(bitmap_height)
        }
    };

    let slices = (0..pages)
        .map(|page| (boundary(page), boundary(page + 1)))
        .filter(|(top, bottom)| bottom > top)
        .map(|(top, bottom)| PageSlice {
            top,
            rows: bottom - top,
            placed_height: f64::from(bottom - top) * ratio,
        })
        .collect();

    Ok(Pagination { ratio, slices })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_contiguous(p: &Pagination, height: u32) {
        let mut next = 0;
        for slice in &p.slices {
            assert_eq!(slice.top, next, "slices must be contiguous");
            assert!(slice.rows > 0);
            next = slice.top + slice.rows;
        }
        assert_eq!(next, height, "slices must cover the bitmap");
    }

    #[test]
    fn worked_example_produces_four_pages() {
        // r = 0.9, ph = 800: scaled height 2700 needs four pages.
        let p = paginate(1000, 3000, 900.0, 800.0).expect("paginate");
        assert_eq!(p.page_count(), 4);
        assert!((p.ratio - 0.9).abs() < 1e-12);
        assert_contiguous(&p, 3000);
        let last = p.slices[3];
        assert_eq!(last.top, 2666);
        assert_eq!(last.rows, 334);
    }

    #[test]
    fn short_bitmap_is_one_page() {
        let p = paginate(1500, 200, 180.0, 267.0).expect("paginate");
        assert_eq!(p.page_count(), 1);
        assert_eq!((p.slices[0].top, p.slices[0].rows), (0, 200));
        assert!((p.slices[0].placed_height - 24.0).abs() < 1e-9);
    }

    #[test]
    fn exact_fit_has_no_trailing_page() {
        // r = 0.12, capacity = 2225 rows per page.
        let p = paginate(1500, 2225, 180.0, 267.0).expect("paginate");
        assert_eq!(p.page_count(), 1);

        let p = paginate(1500, 4450, 180.0, 267.0).expect("paginate");
        assert_eq!(p.page_count(), 2);
        assert_contiguous(&p, 4450);
    }

    #[test]
    fn page_count_matches_ceiling_rule_across_heights() {
        let (bw, pw, ph) = (1620u32, 180.0, 267.0);
        for bh in [1u32, 17, 999, 2402, 2403, 2404, 4805, 9000, 12_345, 40_000] {
            let p = paginate(bw, bh, pw, ph).expect("paginate");
            let ratio = pw / f64::from(bw);
            let expected = ((f64::from(bh) * ratio / ph) - 1e-9).ceil().max(1.0) as usize;
            assert_eq!(p.page_count(), expected, "height {bh}");
            assert_contiguous(&p, bh);
            let total: u32 = p.slices.iter().map(|s| s.rows).sum();
            assert_eq!(total, bh);
        }
    }

    #[test]
    fn slices_stay_within_one_pixel_of_the_page() {
        let p = paginate(1620, 12_345, 180.0, 267.0).expect("paginate");
        for slice in &p.slices {
            assert!(slice.placed_height <= 267.0 + p.ratio + 1e-9);
        }
    }

    #[test]
    fn empty_bitmap_is_rejected() {
        assert!(matches!(paginate(0, 10, 180.0, 267.0), Err(ExportError::EmptyBitmap)));
        assert!(matches!(paginate(10, 0, 180.0, 267.0), Err(ExportError::EmptyBitmap)));
        assert!(paginate(10, 10, 0.0, 267.0).is_err());
    }

    #[test]
    fn page_smaller_than_one_row_is_rejected() {
        // r = 900, so a page holds 800 / 900 of a row.
        assert!(matches!(
            paginate(1, 8, 900.0, 800.0),
            Err(ExportError::Layout(_))
        ));
        // Exactly one row per page still paginates.
        let p = paginate(1, 8, 800.0, 800.0).expect("paginate");
        assert_eq!(p.page_count(), 8);
        assert_contiguous(&p, 8);
    }
}
