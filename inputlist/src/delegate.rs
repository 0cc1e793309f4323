use inputlist_types::InputItem;

/// Host callbacks consulted by an [`InputListView`](crate::InputListView).
///
/// The view holds its delegate weakly. Once the host drops it, the view
/// behaves as if no delegate was ever set.
pub trait InputListDelegate {
    /// Initial value for a freshly built field widget.
    ///
    /// Called once per widget construction, after the widget is already
    /// wired to its binding, so the binding registry sees the value.
    fn default_value_for(&self, input: &dyn InputItem) -> Option<String> {
        let _ = input;
        None
    }
}
