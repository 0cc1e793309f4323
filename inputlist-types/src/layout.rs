//! Content height computation.
//!
//! The height of an input list is the sum of every group's largest height,
//! plus item spacing between groups, section spacing around sections, and a
//! header row per section. Headers only exist when there are at least two
//! sections to tell apart.

use crate::{InputGroup, SectionTree};

/// Spacing applied between groups, around sections and for headers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spacing {
    item_spacing: f64,
    section_spacing: f64,
    section_header_height: f64,
}

impl Spacing {
    pub const DEFAULT_ITEM_SPACING: f64 = 8.0;
    pub const DEFAULT_SECTION_SPACING: f64 = 4.0;
    pub const DEFAULT_SECTION_HEADER_HEIGHT: f64 = 32.0;

    /// Create a spacing configuration. Negative values are clamped to 0.
    pub fn new(item_spacing: f64, section_spacing: f64, section_header_height: f64) -> Self {
        Self {
            item_spacing: non_negative(item_spacing),
            section_spacing: non_negative(section_spacing),
            section_header_height: non_negative(section_header_height),
        }
    }

    /// No spacing and no headers.
    pub fn none() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// Gap between consecutive groups.
    pub fn with_item_spacing(mut self, spacing: f64) -> Self {
        self.item_spacing = non_negative(spacing);
        self
    }

    /// Gap above and below each section.
    pub fn with_section_spacing(mut self, spacing: f64) -> Self {
        self.section_spacing = non_negative(spacing);
        self
    }

    /// Height reserved for each section header.
    pub fn with_section_header_height(mut self, height: f64) -> Self {
        self.section_header_height = non_negative(height);
        self
    }

    pub fn item_spacing(&self) -> f64 {
        self.item_spacing
    }

    pub fn section_spacing(&self) -> f64 {
        self.section_spacing
    }

    pub fn section_header_height(&self) -> f64 {
        self.section_header_height
    }
}

impl Default for Spacing {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_ITEM_SPACING,
            Self::DEFAULT_SECTION_SPACING,
            Self::DEFAULT_SECTION_HEADER_HEIGHT,
        )
    }
}

fn non_negative(value: f64) -> f64 {
    if value.is_nan() { 0.0 } else { value.max(0.0) }
}

/// A width and height pair.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const ZERO: Self = Self::new(0.0, 0.0);

    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Header height in effect for `tree`: 0 unless there are at least two sections.
pub fn header_height(tree: &SectionTree, spacing: &Spacing) -> f64 {
    if tree.section_count() > 1 {
        spacing.section_header_height()
    } else {
        0.0
    }
}

/// Total content height of `tree`, never negative.
pub fn fit_height(tree: &SectionTree, spacing: &Spacing) -> f64 {
    let section_count = tree.section_count() as f64;
    let group_count = tree.group_count() as f64;

    let items = tree.total_height();
    let item_gaps = spacing.item_spacing() * (group_count - 1.0);
    let section_gaps = spacing.section_spacing() * 2.0 * (section_count - 1.0);
    let headers = header_height(tree, spacing) * section_count;

    // With no groups or no sections the gap terms go negative.
    (items + item_gaps + section_gaps + headers).max(0.0)
}

/// Size of the cell showing `group`: its largest height at full width.
pub fn cell_size(group: &InputGroup, available_width: f64) -> Size {
    Size::new(available_width, group.largest_height())
}

/// Size of every section header in `tree` at full width.
pub fn header_size(tree: &SectionTree, spacing: &Spacing, available_width: f64) -> Size {
    Size::new(available_width, header_height(tree, spacing))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Input, InputSection, SectionEntry, TextInput};

    fn input(id: &str, section: &InputSection, height: f64) -> Input {
        TextInput::new(id)
            .required()
            .in_section(section.clone())
            .with_height(height)
            .into_input()
    }

    fn group(items: Vec<Input>) -> InputGroup {
        InputGroup::builder().with_items(items).build()
    }

    #[test]
    fn single_section_scenario() {
        let personal = InputSection::new("personal", "Personal");
        let tree = SectionTree::from_groups([group(vec![
            input("firstName", &personal, 44.0),
            input("lastName", &personal, 44.0),
        ])]);
        let spacing = Spacing::new(8.0, 4.0, 20.0);

        assert_eq!(header_height(&tree, &spacing), 0.0);
        assert_eq!(fit_height(&tree, &spacing), 44.0);
    }

    #[test]
    fn two_section_scenario() {
        let a = InputSection::new("a", "A");
        let b = InputSection::new("b", "B");
        let tree = SectionTree::from_groups([
            group(vec![input("x", &a, 40.0)]),
            group(vec![input("y", &b, 60.0)]),
        ]);
        let spacing = Spacing::new(8.0, 4.0, 20.0);

        assert_eq!(fit_height(&tree, &spacing), 156.0);
    }

    #[test]
    fn empty_tree_is_zero() {
        let spacing = Spacing::new(8.0, 4.0, 20.0);
        assert_eq!(fit_height(&SectionTree::empty(), &spacing), 0.0);
    }

    #[test]
    fn section_without_groups_is_clamped() {
        let tree = SectionTree::new([SectionEntry::new(InputSection::new("a", "A"), vec![])]);
        assert_eq!(fit_height(&tree, &Spacing::default()), 0.0);
    }

    #[test]
    fn adding_groups_never_decreases_height() {
        let a = InputSection::new("a", "A");
        let b = InputSection::new("b", "B");
        let spacing = Spacing::new(8.0, 4.0, 20.0);
        let heights = [0.0, 12.0, 0.0, 30.0, 5.0];

        let mut groups_a = Vec::new();
        let mut groups_b = Vec::new();
        let mut previous = fit_height(
            &SectionTree::new([
                SectionEntry::new(a.clone(), vec![]),
                SectionEntry::new(b.clone(), vec![]),
            ]),
            &spacing,
        );

        for (index, height) in heights.into_iter().enumerate() {
            let target = if index % 2 == 0 { &mut groups_a } else { &mut groups_b };
            target.push(group(vec![input(&format!("i{index}"), &a, height)]));

            let tree = SectionTree::new([
                SectionEntry::new(a.clone(), groups_a.clone()),
                SectionEntry::new(b.clone(), groups_b.clone()),
            ]);
            let current = fit_height(&tree, &spacing);
            assert!(current >= previous, "{current} < {previous}");
            assert!(current >= 0.0);
            previous = current;
        }
    }

    #[test]
    fn negative_spacing_is_clamped() {
        let spacing = Spacing::new(-3.0, -1.0, f64::NAN);
        assert_eq!(spacing, Spacing::none());
    }

    #[test]
    fn sizes_use_full_width() {
        let a = InputSection::new("a", "A");
        let b = InputSection::new("b", "B");
        let g = group(vec![input("x", &a, 40.0), input("y", &a, 52.0)]);
        let tree = SectionTree::from_groups([g.clone(), group(vec![input("z", &b, 1.0)])]);
        let spacing = Spacing::new(0.0, 0.0, 24.0);

        assert_eq!(cell_size(&g, 320.0), Size::new(320.0, 52.0));
        assert_eq!(header_size(&tree, &spacing, 320.0), Size::new(320.0, 24.0));
    }
}
