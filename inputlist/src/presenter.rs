//! The input list presenter.
//!
//! [`InputListView`] owns the current [`SectionTree`] and keeps everything
//! derived from it in sync. Every tree replacement runs four phases:
//!
//! 1. **Teardown** - drop the subscription scope of the previous tree.
//! 2. **Rebuild** - build a fresh [`BindingRegistry`] from the new tree.
//! 3. **Resize** - compute the content height and hand it to the renderer.
//! 4. **Reload** - let the renderer re-fetch cells and headers.
//!
//! Updates are queued and drained by a single dispatcher, so one update
//! always completes before the next starts, even when a listener replaces
//! the tree while being notified.

use std::cell::{Cell, RefCell};
use std::collections::{HashSet, VecDeque};
use std::fmt;
use std::rc::{Rc, Weak};
use std::time::Duration;

use inputlist_types::{
    BindingRegistry, ChangeStream, Coordinate, HeaderView, InputGroup, InputItem, Scope, ScopeRef,
    SectionEntry, SectionTree, Size, Spacing, fit_height, layout,
};
use tracing::{debug, trace, warn};

use crate::{
    FieldLookupError, FieldWidget, GridCell, GridDataSource, GridRenderer, IndexPath,
    InputListDelegate, ViewKind,
};

/// Default duration of the re-layout that follows a height change.
pub const RESIZE_ANIMATION: Duration = Duration::from_millis(200);

/// A step of the update pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Teardown,
    Rebuild,
    Resize,
    Reload,
}

/// Emitted on [`InputListView::phases`] after a phase completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PhaseEvent {
    /// Counts tree replacements; the initial empty tree is generation 0.
    pub generation: u64,
    pub phase: Phase,
}

enum Event {
    ReplaceTree(SectionTree),
    Respace(Option<Spacing>),
}

struct State {
    inputs: SectionTree,
    bindings: BindingRegistry,
    scope: Scope,
    spacing: Option<Spacing>,
    generation: u64,
    /// Inputs whose widget was already seeded since the last rebuild.
    seeded: HashSet<String>,
}

struct Shared<R> {
    renderer: RefCell<R>,
    state: RefCell<State>,
    delegate: RefCell<Option<Weak<dyn InputListDelegate>>>,
    pending: RefCell<VecDeque<Event>>,
    dispatching: Cell<bool>,
    next_generation: Cell<u64>,
    resize_animation: Cell<Duration>,
    inputs_changed: ChangeStream<SectionTree>,
    phases: ChangeStream<PhaseEvent>,
}

/// Restores the dispatch flag when a dispatch or exclusive section ends.
struct DispatchGuard<'a> {
    flag: &'a Cell<bool>,
    restore: bool,
}

impl Drop for DispatchGuard<'_> {
    fn drop(&mut self) {
        self.flag.set(self.restore);
    }
}

impl<R: GridRenderer> Shared<R> {
    fn enqueue(&self, event: Event) {
        self.pending.borrow_mut().push_back(event);
        self.drain();
    }

    fn drain(&self) {
        if self.dispatching.replace(true) {
            return;
        }
        let _guard = DispatchGuard {
            flag: &self.dispatching,
            restore: false,
        };
        while let Some(event) = self.next_event() {
            match event {
                Event::ReplaceTree(tree) => self.replace_tree(tree),
                Event::Respace(spacing) => self.respace(spacing),
            }
        }
    }

    fn next_event(&self) -> Option<Event> {
        self.pending.borrow_mut().pop_front()
    }

    /// Run `work` with events deferred until it returns.
    fn exclusive<T>(&self, work: impl FnOnce() -> T) -> T {
        let nested = self.dispatching.replace(true);
        let output = {
            let _guard = DispatchGuard {
                flag: &self.dispatching,
                restore: nested,
            };
            work()
        };
        if !nested {
            self.drain();
        }
        output
    }

    fn replace_tree(&self, tree: SectionTree) {
        let generation = self.next_generation.get();
        self.next_generation.set(generation + 1);

        let previous = {
            let mut state = self.state.borrow_mut();
            state.generation = generation;
            std::mem::replace(&mut state.scope, Scope::new())
        };
        drop(previous);
        trace!(generation, "teardown");
        self.emit_phase(generation, Phase::Teardown);

        let bindings = BindingRegistry::from_tree(&tree);
        trace!(
            generation,
            sections = tree.section_count(),
            bindings = bindings.len(),
            "rebuild"
        );
        {
            let mut state = self.state.borrow_mut();
            state.inputs = tree;
            state.bindings = bindings;
            state.seeded.clear();
        }
        self.emit_phase(generation, Phase::Rebuild);

        self.resize(generation);
        self.reload(generation);

        let current = self.state.borrow().inputs.clone();
        self.inputs_changed.emit(&current);
    }

    fn respace(&self, spacing: Option<Spacing>) {
        let generation = {
            let mut state = self.state.borrow_mut();
            state.spacing = spacing;
            state.generation
        };
        debug!(generation, ?spacing, "spacing changed");
        self.resize(generation);
        self.reload(generation);
    }

    fn resize(&self, generation: u64) {
        let height = self.fit_height();
        trace!(generation, height, "resize");
        match self.renderer.try_borrow_mut() {
            Ok(mut renderer) => {
                renderer.set_height_constraint(height);
                renderer.layout_if_needed(self.resize_animation.get());
            }
            Err(_) => warn!(generation, "renderer is borrowed, skipping resize"),
        }
        self.emit_phase(generation, Phase::Resize);
    }

    fn reload(&self, generation: u64) {
        trace!(generation, "reload");
        match self.renderer.try_borrow_mut() {
            Ok(mut renderer) => renderer.reload(self),
            Err(_) => warn!(generation, "renderer is borrowed, skipping reload"),
        }
        self.emit_phase(generation, Phase::Reload);
    }

    fn emit_phase(&self, generation: u64, phase: Phase) {
        self.phases.emit(&PhaseEvent { generation, phase });
    }
}

impl<R> Shared<R> {
    fn fit_height(&self) -> f64 {
        let state = self.state.borrow();
        fit_height(&state.inputs, &state.spacing.unwrap_or_default())
    }

    fn delegate(&self) -> Option<Rc<dyn InputListDelegate>> {
        self.delegate.borrow().as_ref().and_then(Weak::upgrade)
    }

    fn cell_context(&self, path: IndexPath) -> Option<(InputGroup, BindingRegistry, ScopeRef)> {
        let state = self.state.borrow();
        let group = state.inputs.group(path.section, path.item)?;
        Some((group.clone(), state.bindings.clone(), state.scope.handle()))
    }
}

impl<R> GridDataSource for Shared<R> {
    fn section_count(&self) -> usize {
        self.state.borrow().inputs.section_count()
    }

    fn item_count(&self, section: usize) -> usize {
        self.state
            .borrow()
            .inputs
            .entry(section)
            .map_or(0, SectionEntry::group_count)
    }

    fn configure_cell(&self, path: IndexPath, cell: &mut dyn GridCell) {
        let Some((group, bindings, scope)) = self.cell_context(path) else {
            warn!(%path, "cell requested outside the section tree");
            cell.clear();
            return;
        };

        cell.clear();
        cell.mount(&group);
        if cell.field_count() != group.len() {
            warn!(
                %path,
                widgets = cell.field_count(),
                inputs = group.len(),
                "cell widgets do not match the group's inputs"
            );
        }

        let delegate = self.delegate();
        for (index, input) in group.items().iter().enumerate() {
            let Some(field) = cell.field_mut(index) else {
                continue;
            };
            let Some(data) = bindings.get_item(input.as_ref()) else {
                warn!(
                    %path,
                    identifier = input.identifier(),
                    "input has no binding, leaving its widget unwired"
                );
                continue;
            };

            let target = data.downgrade();
            field.subscribe_text(
                &scope,
                Box::new(move |text: &str| {
                    if let Some(data) = target.upgrade() {
                        data.push(text);
                    }
                }),
            );

            // Later mounts restore the binding, even when it was cleared.
            let first_mount = self
                .state
                .borrow_mut()
                .seeded
                .insert(input.identifier().to_string());
            let initial = if first_mount && data.is_empty() {
                delegate
                    .as_ref()
                    .and_then(|delegate| delegate.default_value_for(input.as_ref()))
            } else {
                Some(data.content())
            };
            if let Some(value) = initial
                && field.text() != value
            {
                field.set_text(&value);
            }
        }
        debug!(%path, inputs = group.len(), "configured cell");
    }

    fn configure_header(&self, section: usize, header: &mut dyn HeaderView) {
        header.clear();
        let model = self
            .state
            .borrow()
            .inputs
            .entry(section)
            .map(|entry| entry.section().clone());
        let Some(model) = model else {
            warn!(section, "header requested outside the section tree");
            return;
        };
        model.header_builder().build_header(&model, header);
        model
            .header_config()
            .configure_header(model.decorator(), header);
        debug!(section = model.identifier(), "configured header");
    }

    fn cell_size(&self, path: IndexPath, available_width: f64) -> Size {
        let state = self.state.borrow();
        match state.inputs.group(path.section, path.item) {
            Some(group) => layout::cell_size(group, available_width),
            None => {
                warn!(%path, "size requested for a cell outside the section tree");
                Size::ZERO
            }
        }
    }

    fn header_size(&self, section: usize, available_width: f64) -> Size {
        let state = self.state.borrow();
        if section >= state.inputs.section_count() {
            return Size::ZERO;
        }
        layout::header_size(
            &state.inputs,
            &state.spacing.unwrap_or_default(),
            available_width,
        )
    }

    fn item_spacing(&self, _section: usize) -> f64 {
        self.state
            .borrow()
            .spacing
            .unwrap_or_default()
            .item_spacing()
    }

    fn section_spacing(&self, _section: usize) -> f64 {
        self.state
            .borrow()
            .spacing
            .unwrap_or_default()
            .section_spacing()
    }
}

/// A sectioned list of input fields bound to a [`GridRenderer`].
///
/// Cloning yields another handle to the same list. The list is
/// single-threaded; listeners run synchronously on the calling thread.
///
/// ```
/// use inputlist::{InputGroup, InputListView, InputSection, SectionTree, TestRenderer, TextInput};
///
/// let contact = InputSection::new("contact", "Contact information");
/// let email = TextInput::new("email")
///     .required()
///     .in_section(contact)
///     .with_height(44.0)
///     .into_input();
///
/// let view = InputListView::new(TestRenderer::new());
/// view.set_inputs(SectionTree::from_groups([InputGroup::single(email.clone())]));
///
/// view.enter_value(email.as_ref(), "me@example.com").unwrap();
/// assert_eq!(
///     view.binding_registry().content_of("email").as_deref(),
///     Some("me@example.com")
/// );
/// ```
pub struct InputListView<R> {
    shared: Rc<Shared<R>>,
}

impl<R> Clone for InputListView<R> {
    fn clone(&self) -> Self {
        Self {
            shared: Rc::clone(&self.shared),
        }
    }
}

impl<R: GridRenderer> InputListView<R> {
    /// Wrap `renderer` and process the initial, empty tree.
    pub fn new(mut renderer: R) -> Self {
        renderer.set_scroll_enabled(false);
        renderer.register(ViewKind::INPUT_CELL);
        renderer.register(ViewKind::INPUT_HEADER);

        let view = Self {
            shared: Rc::new(Shared {
                renderer: RefCell::new(renderer),
                state: RefCell::new(State {
                    inputs: SectionTree::empty(),
                    bindings: BindingRegistry::new(),
                    scope: Scope::new(),
                    spacing: None,
                    generation: 0,
                    seeded: HashSet::new(),
                }),
                delegate: RefCell::new(None),
                pending: RefCell::new(VecDeque::new()),
                dispatching: Cell::new(false),
                next_generation: Cell::new(0),
                resize_animation: Cell::new(RESIZE_ANIMATION),
                inputs_changed: ChangeStream::new(),
                phases: ChangeStream::new(),
            }),
        };
        view.shared.enqueue(Event::ReplaceTree(SectionTree::empty()));
        view
    }

    /// Set the duration of the re-layout that follows a height change.
    pub fn with_resize_animation(self, duration: Duration) -> Self {
        self.shared.resize_animation.set(duration);
        self
    }

    /// Replace the section tree.
    ///
    /// Every previous binding and subscription is discarded, so content
    /// entered into the previous tree is gone even if `tree` is identical.
    pub fn set_inputs(&self, tree: SectionTree) {
        self.shared.enqueue(Event::ReplaceTree(tree));
    }

    /// Replace the section tree with one derived from `groups`.
    pub fn set_groups(&self, groups: impl IntoIterator<Item = InputGroup>) {
        self.set_inputs(SectionTree::from_groups(groups));
    }

    /// The current section tree.
    pub fn inputs(&self) -> SectionTree {
        self.shared.state.borrow().inputs.clone()
    }

    /// Spacing in effect.
    pub fn spacing(&self) -> Spacing {
        self.shared.state.borrow().spacing.unwrap_or_default()
    }

    /// Change spacing, then resize and reload. `None` restores the defaults.
    ///
    /// Bindings survive a spacing change.
    pub fn set_spacing(&self, spacing: Option<Spacing>) {
        self.shared.enqueue(Event::Respace(spacing));
    }

    /// Number of the most recent tree replacement.
    pub fn generation(&self) -> u64 {
        self.shared.state.borrow().generation
    }

    /// Emits the new tree after each replacement completes.
    pub fn inputs_changed(&self) -> &ChangeStream<SectionTree> {
        &self.shared.inputs_changed
    }

    /// Emits after each pipeline phase completes.
    pub fn phases(&self) -> &ChangeStream<PhaseEvent> {
        &self.shared.phases
    }

    /// Bindings of the current tree.
    ///
    /// The returned registry shares its cells with the list until the next
    /// tree replacement.
    pub fn binding_registry(&self) -> BindingRegistry {
        self.shared.state.borrow().bindings.clone()
    }

    /// Hold `delegate` weakly and consult it for default values.
    pub fn set_delegate<D: InputListDelegate + 'static>(&self, delegate: &Rc<D>) {
        let delegate: Weak<D> = Rc::downgrade(delegate);
        *self.shared.delegate.borrow_mut() = Some(delegate);
    }

    pub fn clear_delegate(&self) {
        *self.shared.delegate.borrow_mut() = None;
    }

    /// Access the renderer.
    ///
    /// Fails with [`FieldLookupError::RendererBusy`] when called from a
    /// listener while the renderer is reloading.
    pub fn with_renderer<T>(&self, read: impl FnOnce(&R) -> T) -> Result<T, FieldLookupError> {
        self.shared.exclusive(|| {
            let renderer = self
                .shared
                .renderer
                .try_borrow()
                .map_err(|_| FieldLookupError::RendererBusy)?;
            Ok(read(&renderer))
        })
    }

    /// Mutably access the renderer, e.g. to feed it input events.
    ///
    /// Updates requested by listeners meanwhile run after `write` returns.
    pub fn with_renderer_mut<T>(
        &self,
        write: impl FnOnce(&mut R) -> T,
    ) -> Result<T, FieldLookupError> {
        self.shared.exclusive(|| {
            let mut renderer = self
                .shared
                .renderer
                .try_borrow_mut()
                .map_err(|_| FieldLookupError::RendererBusy)?;
            Ok(write(&mut renderer))
        })
    }

    /// Content height of the current tree.
    pub fn fit_height(&self) -> f64 {
        self.shared.fit_height()
    }

    /// Where `input` lives in the current tree.
    pub fn locate(&self, input: &dyn InputItem) -> Option<Coordinate> {
        self.shared.state.borrow().inputs.locate(input.identifier())
    }

    /// Type `value` into the widget of `input`.
    ///
    /// The widget's binding observes the value like any user edit.
    pub fn enter_value(&self, input: &dyn InputItem, value: &str) -> Result<(), FieldLookupError> {
        self.with_field_mut(input, |field| field.set_text(value))
    }

    /// Empty the widget of `input`.
    pub fn clear_value(&self, input: &dyn InputItem) -> Result<(), FieldLookupError> {
        self.enter_value(input, "")
    }

    /// Empty every instantiated widget, then the bindings of inputs whose
    /// cells are not instantiated.
    ///
    /// Returns the number of widgets cleared.
    pub fn clear_all_values(&self) -> Result<usize, FieldLookupError> {
        let cleared = self.shared.exclusive(|| {
            let mut renderer = self
                .shared
                .renderer
                .try_borrow_mut()
                .map_err(|_| FieldLookupError::RendererBusy)?;
            let mut cleared = 0;
            for cell in renderer.cells_mut() {
                for index in 0..cell.field_count() {
                    if let Some(field) = cell.field_mut(index) {
                        field.set_text("");
                        cleared += 1;
                    }
                }
            }
            Ok(cleared)
        })?;

        let bindings = self.binding_registry();
        self.shared.exclusive(|| {
            for data in bindings.iter() {
                if !data.is_empty() {
                    debug!(
                        identifier = data.identifier(),
                        "clearing binding without a widget"
                    );
                    data.push("");
                }
            }
        });
        Ok(cleared)
    }

    /// Run `read` over every instantiated field widget, in display order.
    pub fn with_field_widgets<T>(
        &self,
        read: impl FnOnce(&[&dyn FieldWidget]) -> T,
    ) -> Result<T, FieldLookupError> {
        self.shared.exclusive(|| {
            let renderer = self
                .shared
                .renderer
                .try_borrow()
                .map_err(|_| FieldLookupError::RendererBusy)?;
            let fields: Vec<&dyn FieldWidget> = renderer
                .cells()
                .into_iter()
                .flat_map(|cell| (0..cell.field_count()).filter_map(move |index| cell.field(index)))
                .collect();
            Ok(read(&fields))
        })
    }

    fn with_field_mut<T>(
        &self,
        input: &dyn InputItem,
        update: impl FnOnce(&mut dyn FieldWidget) -> T,
    ) -> Result<T, FieldLookupError> {
        let Some(coordinate) = self.locate(input) else {
            warn!(
                identifier = input.identifier(),
                "input is not part of the current section tree"
            );
            return Err(FieldLookupError::NotInModel(input.identifier().to_string()));
        };
        let path = IndexPath::from(coordinate);

        self.shared.exclusive(|| {
            let mut renderer = self
                .shared
                .renderer
                .try_borrow_mut()
                .map_err(|_| FieldLookupError::RendererBusy)?;
            let Some(cell) = renderer.cell_mut(path) else {
                debug!(%coordinate, "cell is not instantiated");
                return Err(FieldLookupError::CellNotInstantiated {
                    section: path.section,
                    item: path.item,
                });
            };
            let Some(field) = cell.field_mut(coordinate.item) else {
                warn!(%coordinate, "cell has no widget for the input");
                return Err(FieldLookupError::FieldMissing {
                    section: path.section,
                    item: path.item,
                    index: coordinate.item,
                });
            };
            Ok(update(field))
        })
    }
}

impl<R> GridDataSource for InputListView<R> {
    fn section_count(&self) -> usize {
        self.shared.section_count()
    }

    fn item_count(&self, section: usize) -> usize {
        self.shared.item_count(section)
    }

    fn configure_cell(&self, path: IndexPath, cell: &mut dyn GridCell) {
        self.shared.configure_cell(path, cell);
    }

    fn configure_header(&self, section: usize, header: &mut dyn HeaderView) {
        self.shared.configure_header(section, header);
    }

    fn cell_size(&self, path: IndexPath, available_width: f64) -> Size {
        self.shared.cell_size(path, available_width)
    }

    fn header_size(&self, section: usize, available_width: f64) -> Size {
        self.shared.header_size(section, available_width)
    }

    fn item_spacing(&self, section: usize) -> f64 {
        self.shared.item_spacing(section)
    }

    fn section_spacing(&self, section: usize) -> f64 {
        self.shared.section_spacing(section)
    }
}

impl<R> fmt::Debug for InputListView<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("InputListView");
        match self.shared.state.try_borrow() {
            Ok(state) => debug
                .field("generation", &state.generation)
                .field("sections", &state.inputs.section_count())
                .field("bindings", &state.bindings.len())
                .field("spacing", &state.spacing),
            Err(_) => debug.field("state", &"<updating>"),
        };
        debug.finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TestRenderer;
    use inputlist_types::{InputSection, TextInput};

    fn tree(ids: &[&str]) -> SectionTree {
        let section = InputSection::new("main", "Main");
        SectionTree::from_items(ids.iter().map(|id| {
            TextInput::new(*id)
                .in_section(section.clone())
                .with_height(10.0)
                .into_input()
        }))
    }

    fn record_phases<R: GridRenderer + 'static>(
        view: &InputListView<R>,
        scope: &Scope,
    ) -> Rc<RefCell<Vec<PhaseEvent>>> {
        let events = Rc::new(RefCell::new(Vec::new()));
        {
            let events = Rc::clone(&events);
            view.phases()
                .subscribe(&scope.handle(), move |event| events.borrow_mut().push(*event));
        }
        events
    }

    #[test]
    fn initial_empty_tree_is_processed() {
        let view = InputListView::new(TestRenderer::new());
        assert_eq!(view.generation(), 0);
        assert!(view.inputs().is_empty());
        view.with_renderer(|renderer| {
            assert_eq!(renderer.reload_count(), 1);
            assert_eq!(renderer.height_writes(), &[0.0]);
            assert!(!renderer.is_scroll_enabled());
            assert_eq!(
                renderer.registered(),
                &[ViewKind::INPUT_CELL, ViewKind::INPUT_HEADER]
            );
        })
        .unwrap();
    }

    #[test]
    fn replacing_from_a_listener_runs_after_the_current_update() {
        let scope = Scope::new();
        let view = InputListView::new(TestRenderer::new());
        let events = record_phases(&view, &scope);

        {
            let inner = view.clone();
            let replaced = Cell::new(false);
            view.phases().subscribe(&scope.handle(), move |event| {
                if event.phase == Phase::Rebuild && !replaced.replace(true) {
                    inner.set_inputs(tree(&["second"]));
                }
            });
        }
        view.set_inputs(tree(&["first"]));

        let phases: Vec<_> = events
            .borrow()
            .iter()
            .map(|event| (event.generation, event.phase))
            .collect();
        assert_eq!(
            phases,
            vec![
                (1, Phase::Teardown),
                (1, Phase::Rebuild),
                (1, Phase::Resize),
                (1, Phase::Reload),
                (2, Phase::Teardown),
                (2, Phase::Rebuild),
                (2, Phase::Resize),
                (2, Phase::Reload),
            ]
        );
        assert!(view.binding_registry().get("second").is_some());
        assert!(view.binding_registry().get("first").is_none());
    }

    #[test]
    fn inputs_changed_follows_reload() {
        let scope = Scope::new();
        let view = InputListView::new(TestRenderer::new());
        let seen = Rc::new(RefCell::new(Vec::new()));
        {
            let seen = Rc::clone(&seen);
            let inner = view.clone();
            view.inputs_changed().subscribe(&scope.handle(), move |tree| {
                let reloads = inner.with_renderer(TestRenderer::reload_count).unwrap();
                seen.borrow_mut().push((tree.group_count(), reloads));
            });
        }

        view.set_inputs(tree(&["a", "b"]));
        assert_eq!(*seen.borrow(), vec![(2, 2)]);
    }

    #[test]
    fn resize_uses_configured_animation() {
        let view = InputListView::new(TestRenderer::new())
            .with_resize_animation(Duration::from_millis(50));
        view.set_inputs(tree(&["a"]));

        view.with_renderer(|renderer| {
            assert_eq!(renderer.layout_requests().last(), Some(&Duration::from_millis(50)));
            assert_eq!(renderer.height_constraint(), 10.0);
        })
        .unwrap();
    }

    #[test]
    fn data_source_reports_spacing() {
        let view = InputListView::new(TestRenderer::new());
        view.set_inputs(tree(&["a", "b"]));
        assert_eq!(view.item_spacing(0), Spacing::DEFAULT_ITEM_SPACING);
        assert_eq!(view.section_spacing(0), Spacing::DEFAULT_SECTION_SPACING);

        view.set_spacing(Some(Spacing::none().with_item_spacing(2.0)));
        assert_eq!(view.item_spacing(0), 2.0);
        assert_eq!(view.cell_size(IndexPath::new(0, 1), 100.0), Size::new(100.0, 10.0));
        assert_eq!(view.cell_size(IndexPath::new(3, 0), 100.0), Size::ZERO);
    }

    #[test]
    fn dropped_delegate_is_ignored() {
        struct Prefill;
        impl InputListDelegate for Prefill {
            fn default_value_for(&self, _input: &dyn InputItem) -> Option<String> {
                Some("prefilled".to_string())
            }
        }

        let view = InputListView::new(TestRenderer::new());
        {
            let delegate = Rc::new(Prefill);
            view.set_delegate(&delegate);
        }
        view.set_inputs(tree(&["a"]));
        assert_eq!(view.binding_registry().content_of("a").as_deref(), Some(""));
    }
}
