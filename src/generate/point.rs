//! Generated points and their provenance labels.

use core::fmt;

/// Origin of one recursive expansion step, as `[x, y]`.
pub type Center = [f64; 2];

/// Provenance of a generated point: which leaf batch produced it, and at
/// what recursion depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Label {
    /// Leaf batch id, unique within one generation run (starts at 1).
    pub group: usize,
    /// Recursion depth of the batch (root call is 0).
    pub depth: usize,
}

impl Label {
    /// Create a label.
    pub fn new(group: usize, depth: usize) -> Self {
        Self { group, depth }
    }
}

/// Renders as `group:depth`, the annotation used next to scatter markers.
impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group, self.depth)
    }
}

/// A generated 2D point tagged with its provenance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    /// First coordinate.
    pub x: f64,
    /// Second coordinate.
    pub y: f64,
    /// Leaf batch id.
    pub group: usize,
    /// Recursion depth of the batch.
    pub depth: usize,
}

impl Point {
    /// Coordinates as `[x, y]`.
    pub fn coordinates(&self) -> [f64; 2] {
        [self.x, self.y]
    }

    /// Provenance label.
    pub fn label(&self) -> Label {
        Label::new(self.group, self.depth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_display() {
        assert_eq!(Label::new(3, 1).to_string(), "3:1");
        assert_eq!(Label::new(12, 0).to_string(), "12:0");
    }

    #[test]
    fn test_point_accessors() {
        let p = Point {
            x: 1.5,
            y: -2.0,
            group: 4,
            depth: 2,
        };
        assert_eq!(p.coordinates(), [1.5, -2.0]);
        assert_eq!(p.label(), Label::new(4, 2));
    }
}
