use crate::foundation::core::{Point, Viewport};

/// Arrange sized entities along one horizontal row, centered vertically.
///
/// Precondition (not enforced here): `sizes` is already sorted ascending;
/// the caller owns the ordering. The gap between and around entities is
/// derived so that `n + 1` equal gaps exactly fill the leftover width:
/// `gap = (width - total_size) / (n + 1)`. A negative gap is allowed and
/// simply produces overlapping placement; no collision avoidance is done.
///
/// Returns one center point per input size, in input order. Empty input
/// yields empty output.
pub fn pack_row(sizes: &[f64], viewport: Viewport) -> Vec<Point> {
    if sizes.is_empty() {
        return Vec::new();
    }

    let total_size: f64 = sizes.iter().sum();
    let gap = (viewport.width - total_size) / (sizes.len() as f64 + 1.0);
    let y = viewport.height / 2.0;

    let mut centers = Vec::with_capacity(sizes.len());
    let mut cursor = gap;
    for &size in sizes {
        centers.push(Point::new(cursor + size / 2.0, y));
        cursor += size + gap;
    }
    centers
}

#[cfg(test)]
#[path = "../../tests/unit/layout/pack.rs"]
mod tests;
