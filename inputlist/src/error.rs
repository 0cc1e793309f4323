/// Why a field widget could not be reached for programmatic access.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldLookupError {
    /// No input with this identifier is part of the current section tree.
    #[error("input '{0}' is not part of the current section tree")]
    NotInModel(String),

    /// The renderer has not instantiated the cell holding the input.
    #[error("cell [{section}, {item}] is not instantiated by the renderer")]
    CellNotInstantiated { section: usize, item: usize },

    /// The cell exists but holds fewer widgets than its group has inputs.
    #[error("cell [{section}, {item}] has no field widget at index {index}")]
    FieldMissing {
        section: usize,
        item: usize,
        index: usize,
    },

    /// Called back into the view while the renderer is being reloaded or accessed.
    #[error("the renderer is busy")]
    RendererBusy,
}

impl FieldLookupError {
    /// Whether the lookup can succeed later without changing the model.
    ///
    /// Virtualised renderers recycle cells, so a cell missing now may be
    /// instantiated after the next scroll or reload.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            FieldLookupError::CellNotInstantiated { .. } | FieldLookupError::RendererBusy
        )
    }
}
