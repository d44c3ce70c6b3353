//! Column skyline used to stack elements without vertical overlap.

use std::ops::Range;

const EDGE_EPSILON: f64 = 1e-6;

/// Tracks, for each of a fixed number of equal-width columns spanning the canvas, the
/// lowest bottom edge placed so far.
#[derive(Debug, Clone, PartialEq)]
pub struct Skyline {
    levels: Vec<f64>,
}

impl Skyline {
    pub fn new(columns: usize) -> Self {
        Skyline {
            levels: vec![0.0; columns.max(1)],
        }
    }

    pub fn columns(&self) -> usize {
        self.levels.len()
    }

    /// Columns touched by a box spanning `left..left + width` (percent).
    ///
    /// A box touching a column boundary does not claim the next column. Every box
    /// claims at least one column.
    pub fn span(&self, left: f64, width: f64) -> Range<usize> {
        let n = self.levels.len();
        let scale = n as f64 / 100.0;
        let start = ((left * scale).floor().max(0.0) as usize).min(n - 1);
        let end = ((left + width) * scale - EDGE_EPSILON).ceil().max(0.0) as usize;
        start..end.clamp(start + 1, n)
    }

    /// The lowest bottom edge across `span`.
    pub fn level(&self, span: Range<usize>) -> f64 {
        self.levels[span].iter().copied().fold(0.0, f64::max)
    }

    pub fn raise(&mut self, span: Range<usize>, bottom: f64) {
        for level in &mut self.levels[span] {
            *level = level.max(bottom);
        }
    }

    /// Places a box and returns its top, pushed below everything already placed in the
    /// columns it spans (plus `padding`) when it would otherwise overlap.
    pub fn place(&mut self, left: f64, top: f64, width: f64, height: f64, padding: f64) -> f64 {
        let span = self.span(left, width);
        let level = self.level(span.clone());
        let top = if top < level { level + padding } else { top };
        self.raise(span, top + height);
        top
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spans_cover_the_box_conservatively() {
        let skyline = Skyline::new(50);
        assert_eq!(skyline.span(0.0, 30.0), 0..15);
        assert_eq!(skyline.span(30.0, 10.0), 15..20);
        assert_eq!(skyline.span(0.0, 30.5), 0..16);
        assert_eq!(skyline.span(99.5, 0.0), 49..50);
        assert_eq!(skyline.span(8.0, 200.0), 4..50);
    }

    #[test]
    fn overlapping_boxes_are_pushed_down() {
        let mut skyline = Skyline::new(50);
        assert_eq!(skyline.place(10.0, 20.0, 80.0, 30.0, 1.5), 20.0);
        assert_eq!(skyline.place(10.0, 25.0, 40.0, 10.0, 1.5), 51.5);
        // Disjoint columns are unaffected.
        assert_eq!(skyline.place(92.0, 25.0, 6.0, 10.0, 1.5), 25.0);
        // Boxes already below the skyline keep their position.
        assert_eq!(skyline.place(10.0, 70.0, 80.0, 5.0, 1.5), 70.0);
    }
}
