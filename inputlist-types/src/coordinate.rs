use std::fmt;

/// Position of an input inside a [`SectionTree`](crate::SectionTree).
///
/// Derived on demand by [`SectionTree::locate`](crate::SectionTree::locate);
/// a coordinate is only meaningful for the tree it was computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coordinate {
    /// Index of the section within the tree.
    pub section: usize,
    /// Index of the group within the section.
    pub group: usize,
    /// Index of the input within the group.
    pub item: usize,
}

impl Coordinate {
    pub const fn new(section: usize, group: usize, item: usize) -> Self {
        Self {
            section,
            group,
            item,
        }
    }

    /// The (section, group) pair that addresses the grid cell.
    pub const fn index_path(&self) -> (usize, usize) {
        (self.section, self.group)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.section, self.group, self.item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_path_drops_the_item() {
        let coordinate = Coordinate::new(1, 2, 3);
        assert_eq!(coordinate.index_path(), (1, 2));
        assert_eq!(coordinate.to_string(), "(1, 2, 3)");
    }
}
