use std::collections::HashSet;

use tracing::{debug, warn};

use crate::{Coordinate, Input, InputGroup, InputSection};

/// A section together with the groups displayed under it.
#[derive(Debug, Clone)]
pub struct SectionEntry {
    section: InputSection,
    groups: Vec<InputGroup>,
}

impl SectionEntry {
    pub fn new(section: InputSection, groups: Vec<InputGroup>) -> Self {
        Self { section, groups }
    }

    pub fn section(&self) -> &InputSection {
        &self.section
    }

    pub fn groups(&self) -> &[InputGroup] {
        &self.groups
    }

    pub fn group(&self, index: usize) -> Option<&InputGroup> {
        self.groups.get(index)
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Sum of the largest height of every group.
    pub fn total_height(&self) -> f64 {
        self.groups.iter().map(InputGroup::largest_height).sum()
    }
}

/// The full section → group → input model bound to an input list.
///
/// Holds at most one entry per section identifier. Trees are values: the
/// list replaces its tree wholesale on every update instead of editing it.
#[derive(Debug, Clone, Default)]
pub struct SectionTree {
    entries: Vec<SectionEntry>,
}

impl SectionTree {
    /// A tree with no sections.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a tree from explicit entries.
    ///
    /// Entries sharing a section identifier are merged into the first one:
    /// the first-seen section metadata wins and groups accumulate in order.
    pub fn new(entries: impl IntoIterator<Item = SectionEntry>) -> Self {
        let mut tree = Self::empty();
        for entry in entries {
            tree.push_merged(entry.section, entry.groups);
        }
        tree
    }

    /// Build a tree from pre-grouped inputs, grouped by each group's section.
    ///
    /// Sections appear in first-seen order. Groups whose first input has no
    /// section cannot be placed and are skipped.
    pub fn from_groups(groups: impl IntoIterator<Item = InputGroup>) -> Self {
        let mut tree = Self::empty();
        for group in groups {
            let Some(section) = group.section() else {
                warn!(group = ?group, "input group has no section, skipping it");
                continue;
            };
            tree.push_merged(section, vec![group]);
        }
        tree
    }

    /// Build a tree from ungrouped inputs, one input per group.
    pub fn from_items(items: impl IntoIterator<Item = Input>) -> Self {
        Self::from_groups(items.into_iter().map(InputGroup::single))
    }

    fn push_merged(&mut self, section: InputSection, groups: Vec<InputGroup>) {
        match self
            .entries
            .iter_mut()
            .find(|entry| entry.section == section)
        {
            Some(existing) => {
                if !existing.section.has_same_metadata(&section) {
                    warn!(
                        section = section.identifier(),
                        kept = existing.section.header(),
                        dropped = section.header(),
                        "sections share an identifier but not their metadata, keeping the first"
                    );
                }
                debug!(
                    section = section.identifier(),
                    groups = groups.len(),
                    "merging groups into existing section"
                );
                existing.groups.extend(groups);
            }
            None => self.entries.push(SectionEntry { section, groups }),
        }
    }

    pub fn entries(&self) -> &[SectionEntry] {
        &self.entries
    }

    pub fn entry(&self, section: usize) -> Option<&SectionEntry> {
        self.entries.get(section)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn section_count(&self) -> usize {
        self.entries.len()
    }

    /// Number of groups across all sections.
    pub fn group_count(&self) -> usize {
        self.entries.iter().map(SectionEntry::group_count).sum()
    }

    pub fn group(&self, section: usize, group: usize) -> Option<&InputGroup> {
        self.entry(section).and_then(|entry| entry.group(group))
    }

    /// Every input, in tree order.
    pub fn items(&self) -> impl Iterator<Item = &Input> {
        self.entries
            .iter()
            .flat_map(|entry| entry.groups.iter())
            .flat_map(|group| group.items().iter())
    }

    /// Sum of the largest height of every group in every section.
    pub fn total_height(&self) -> f64 {
        self.entries.iter().map(SectionEntry::total_height).sum()
    }

    /// Identifiers that occur more than once, in order of their second occurrence.
    pub fn duplicate_identifiers(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut duplicates = Vec::new();
        for item in self.items() {
            let identifier = item.identifier();
            if !seen.insert(identifier) && !duplicates.iter().any(|d| d == identifier) {
                duplicates.push(identifier.to_string());
            }
        }
        duplicates
    }

    /// Find where an input lives, scanning sections, then groups, then inputs.
    ///
    /// Returns the first match.
    pub fn locate(&self, identifier: &str) -> Option<Coordinate> {
        self.entries
            .iter()
            .enumerate()
            .find_map(|(section, entry)| {
                entry
                    .groups
                    .iter()
                    .enumerate()
                    .find_map(|(group, inputs)| {
                        inputs
                            .position_of(identifier)
                            .map(|item| Coordinate::new(section, group, item))
                    })
            })
    }
}
