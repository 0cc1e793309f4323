use std::cell::RefCell;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::{Rc, Weak};

use indexmap::IndexMap;
use indexmap::map::Entry;
use tracing::warn;

use crate::{ChangeStream, Input, InputItem, REQUIRED_ERROR, ScopeRef, SectionTree, ValidationReport};

struct DataCell {
    item: Input,
    content: RefCell<String>,
    changes: ChangeStream<str>,
}

/// Live content of a single input.
///
/// Cloning yields another handle to the same cell. Equality and hashing go
/// by the input's identifier.
#[derive(Clone)]
pub struct InputData {
    cell: Rc<DataCell>,
}

impl InputData {
    /// A cell for `item` with empty content.
    pub fn new(item: Input) -> Self {
        Self {
            cell: Rc::new(DataCell {
                item,
                content: RefCell::new(String::new()),
                changes: ChangeStream::new(),
            }),
        }
    }

    pub fn identifier(&self) -> &str {
        self.cell.item.identifier()
    }

    pub fn item(&self) -> &Input {
        &self.cell.item
    }

    pub fn is_required(&self) -> bool {
        self.cell.item.is_required()
    }

    /// Current content; empty until something is pushed.
    pub fn content(&self) -> String {
        self.cell.content.borrow().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.cell.content.borrow().is_empty()
    }

    /// Store new content, then notify listeners.
    pub fn push(&self, content: &str) {
        {
            let mut current = self.cell.content.borrow_mut();
            current.clear();
            current.push_str(content);
        }
        self.cell.changes.emit(content);
    }

    /// Content changes, emitted after the new content is stored.
    pub fn changes(&self) -> &ChangeStream<str> {
        &self.cell.changes
    }

    /// Validate the current content against its siblings.
    ///
    /// Empty content fails only when the input is required; non-empty
    /// content is handed to the input's own rule.
    pub fn validate(&self, inputs: &BindingRegistry) -> Result<(), String> {
        let content = self.content();
        if content.is_empty() {
            if self.is_required() {
                Err(REQUIRED_ERROR.to_string())
            } else {
                Ok(())
            }
        } else {
            self.cell.item.validate(&content, inputs)
        }
    }

    pub fn downgrade(&self) -> WeakInputData {
        WeakInputData(Rc::downgrade(&self.cell))
    }
}

impl PartialEq for InputData {
    fn eq(&self, other: &Self) -> bool {
        self.identifier() == other.identifier()
    }
}

impl Eq for InputData {}

impl Hash for InputData {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identifier().hash(state);
    }
}

impl fmt::Debug for InputData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputData")
            .field("identifier", &self.identifier())
            .field("content", &*self.cell.content.borrow())
            .field("required", &self.is_required())
            .finish()
    }
}

/// Weak handle to an [`InputData`] cell.
#[derive(Clone)]
pub struct WeakInputData(Weak<DataCell>);

impl WeakInputData {
    pub fn upgrade(&self) -> Option<InputData> {
        self.0.upgrade().map(|cell| InputData { cell })
    }
}

impl fmt::Debug for WeakInputData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("WeakInputData")
            .field(&self.upgrade().as_ref().map(InputData::identifier))
            .finish()
    }
}

/// One [`InputData`] cell per input, keyed by identifier, in tree order.
///
/// Registries are rebuilt from scratch whenever the list's tree changes;
/// content never carries over from a previous registry.
#[derive(Clone, Default)]
pub struct BindingRegistry {
    cells: IndexMap<String, InputData>,
}

impl BindingRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A fresh registry with one empty cell per input in `tree`.
    pub fn from_tree(tree: &SectionTree) -> Self {
        Self::from_items(tree.items().cloned())
    }

    /// A fresh registry with one empty cell per input.
    ///
    /// Inputs repeating an identifier already seen are ignored.
    pub fn from_items(items: impl IntoIterator<Item = Input>) -> Self {
        let mut cells = IndexMap::new();
        for item in items {
            match cells.entry(item.identifier().to_string()) {
                Entry::Occupied(entry) => {
                    warn!(
                        identifier = entry.key().as_str(),
                        "duplicate input identifier, keeping the first binding"
                    );
                }
                Entry::Vacant(entry) => {
                    entry.insert(InputData::new(item));
                }
            }
        }
        Self { cells }
    }

    pub fn get(&self, identifier: &str) -> Option<&InputData> {
        self.cells.get(identifier)
    }

    /// The cell bound to `item`, matched by identifier.
    pub fn get_item(&self, item: &dyn InputItem) -> Option<&InputData> {
        self.get(item.identifier())
    }

    /// Current content of the input with the given identifier.
    pub fn content_of(&self, identifier: &str) -> Option<String> {
        self.get(identifier).map(InputData::content)
    }

    pub fn iter(&self) -> impl Iterator<Item = &InputData> {
        self.cells.values()
    }

    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.cells.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Snapshot of every identifier and its content.
    pub fn contents(&self) -> IndexMap<String, String> {
        self.cells
            .iter()
            .map(|(identifier, data)| (identifier.clone(), data.content()))
            .collect()
    }

    /// Validate every cell against the others.
    pub fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::new();
        for data in self.cells.values() {
            if let Err(message) = data.validate(self) {
                report.insert(data.identifier(), message);
            }
        }
        report
    }

    /// Whether every required input has content.
    pub fn all_required_filled(&self) -> bool {
        self.cells
            .values()
            .filter(|data| data.is_required())
            .all(|data| !data.is_empty())
    }

    /// Push a fresh [`ValidationReport`] to `listener` whenever any cell changes.
    pub fn on_validation(
        &self,
        scope: &ScopeRef,
        listener: impl FnMut(&ValidationReport) + 'static,
    ) {
        self.on_any_change(scope, BindingRegistry::validate, listener);
    }

    /// Push [`all_required_filled`](Self::all_required_filled) to `listener`
    /// whenever any cell changes.
    pub fn on_required_filled(&self, scope: &ScopeRef, mut listener: impl FnMut(bool) + 'static) {
        self.on_any_change(scope, BindingRegistry::all_required_filled, move |filled| {
            listener(*filled)
        });
    }

    fn on_any_change<T: 'static>(
        &self,
        scope: &ScopeRef,
        compute: fn(&BindingRegistry) -> T,
        listener: impl FnMut(&T) + 'static,
    ) {
        let listener = Rc::new(RefCell::new(listener));
        let registry = self.downgrade();
        for data in self.cells.values() {
            let listener = Rc::clone(&listener);
            let registry = registry.clone();
            data.changes().subscribe(scope, move |_: &str| {
                let Some(registry) = registry.upgrade() else {
                    return;
                };
                let value = compute(&registry);
                // A listener that pushes into another cell would re-enter itself.
                if let Ok(mut listener) = listener.try_borrow_mut() {
                    (&mut *listener)(&value);
                }
            });
        }
    }

    pub fn downgrade(&self) -> WeakBindingRegistry {
        WeakBindingRegistry {
            cells: self
                .cells
                .iter()
                .map(|(identifier, data)| (identifier.clone(), data.downgrade()))
                .collect(),
        }
    }
}

impl fmt::Debug for BindingRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.cells.values()).finish()
    }
}

impl<'a> IntoIterator for &'a BindingRegistry {
    type Item = &'a InputData;
    type IntoIter = indexmap::map::Values<'a, String, InputData>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.values()
    }
}

/// A registry made of weak cell handles.
#[derive(Debug, Clone, Default)]
pub struct WeakBindingRegistry {
    cells: Vec<(String, WeakInputData)>,
}

impl WeakBindingRegistry {
    /// The registry, if every one of its cells is still alive.
    pub fn upgrade(&self) -> Option<BindingRegistry> {
        let cells = self
            .cells
            .iter()
            .map(|(identifier, data)| Some((identifier.clone(), data.upgrade()?)))
            .collect::<Option<IndexMap<_, _>>>()?;
        Some(BindingRegistry { cells })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{InputGroup, InputSection, Scope, TextInput};
    use std::cell::Cell;

    fn account() -> InputSection {
        InputSection::new("account", "Account")
    }

    fn password() -> Input {
        TextInput::new("password")
            .required()
            .in_section(account())
            .with_validator(|content, _| {
                if content.chars().count() < 8 {
                    Err("Password too short".to_string())
                } else {
                    Ok(())
                }
            })
            .into_input()
    }

    fn confirm() -> Input {
        TextInput::new("confirmPassword")
            .required()
            .in_section(account())
            .with_validator(|content, inputs| {
                match inputs.content_of("password") {
                    Some(password) if password == content => Ok(()),
                    _ => Err("Passwords do not match".to_string()),
                }
            })
            .into_input()
    }

    fn nickname() -> Input {
        TextInput::new("nickname").in_section(account()).into_input()
    }

    fn registry() -> BindingRegistry {
        let tree = SectionTree::from_groups([
            InputGroup::single(password()),
            InputGroup::single(confirm()),
            InputGroup::single(nickname()),
        ]);
        BindingRegistry::from_tree(&tree)
    }

    #[test]
    fn cells_start_empty_in_tree_order() {
        let registry = registry();
        let ids: Vec<_> = registry.identifiers().collect();
        assert_eq!(ids, vec!["password", "confirmPassword", "nickname"]);
        assert!(registry.iter().all(InputData::is_empty));
    }

    #[test]
    fn push_updates_content_and_notifies() {
        let scope = Scope::new();
        let registry = registry();
        let data = registry.get("nickname").unwrap();
        let seen = Rc::new(RefCell::new(Vec::new()));
        {
            let seen = Rc::clone(&seen);
            data.changes()
                .subscribe(&scope.handle(), move |c: &str| seen.borrow_mut().push(c.to_string()));
        }

        data.push("neo");
        assert_eq!(registry.content_of("nickname").as_deref(), Some("neo"));
        assert_eq!(*seen.borrow(), vec!["neo"]);
    }

    #[test]
    fn required_and_optional_empty_values() {
        let registry = registry();
        let report = registry.validate();

        assert!(report.has_errors());
        assert_eq!(report.error_for("password"), Some(REQUIRED_ERROR));
        assert_eq!(report.error_for("confirmPassword"), Some(REQUIRED_ERROR));
        assert_eq!(report.error_for("nickname"), None);
        assert!(!registry.all_required_filled());
    }

    #[test]
    fn cross_field_validation() {
        let registry = registry();
        registry.get("password").unwrap().push("abcdefgh");
        registry.get("confirmPassword").unwrap().push("abcdefg");

        let report = registry.validate();
        assert!(report.has_errors());
        assert_eq!(report.error_for("password"), None);
        assert_eq!(
            report.error_for("confirmPassword"),
            Some("Passwords do not match")
        );

        registry.get("confirmPassword").unwrap().push("abcdefgh");
        let report = registry.validate();
        assert!(!report.has_errors());
        assert!(registry.all_required_filled());
    }

    #[test]
    fn validation_listener_follows_changes() {
        let scope = Scope::new();
        let registry = registry();
        let reports = Rc::new(RefCell::new(Vec::new()));
        {
            let reports = Rc::clone(&reports);
            registry.on_validation(&scope.handle(), move |report| {
                reports.borrow_mut().push(report.clone());
            });
        }

        registry.get("password").unwrap().push("short");
        registry.get("password").unwrap().push("long enough");
        registry.get("confirmPassword").unwrap().push("long enough");

        let reports = reports.borrow();
        assert_eq!(reports.len(), 3);
        assert_eq!(reports[0].error_for("password"), Some("Password too short"));
        assert_eq!(reports[1].error_for("password"), None);
        assert!(!reports[2].has_errors());
    }

    #[test]
    fn required_filled_listener_stops_with_scope() {
        let scope = Scope::new();
        let registry = registry();
        let last = Rc::new(Cell::new(None));
        {
            let last = Rc::clone(&last);
            registry.on_required_filled(&scope.handle(), move |filled| last.set(Some(filled)));
        }

        registry.get("password").unwrap().push("abcdefgh");
        assert_eq!(last.get(), Some(false));
        registry.get("confirmPassword").unwrap().push("abcdefgh");
        assert_eq!(last.get(), Some(true));

        drop(scope);
        registry.get("password").unwrap().push("");
        assert_eq!(last.get(), Some(true));
    }

    #[test]
    fn duplicate_identifiers_keep_first_cell() {
        let registry = BindingRegistry::from_items([password(), password(), nickname()]);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn equality_by_identifier() {
        let a = InputData::new(nickname());
        let b = InputData::new(nickname());
        b.push("different content");
        assert_eq!(a, b);
    }

    #[test]
    fn weak_registry_upgrades_while_cells_live() {
        let registry = registry();
        let weak = registry.downgrade();
        assert_eq!(weak.upgrade().map(|r| r.len()), Some(3));

        drop(registry);
        assert!(weak.upgrade().is_none());
    }
}
