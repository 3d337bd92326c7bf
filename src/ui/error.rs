use super::PaneKind;

/// Errors surfaced by tree operations and layout loading.
///
/// A lookup that finds nothing is not an error; it is `Ok(None)`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UiError {
    #[error("no pane with id '{id}' and kind {expected:?} was found (found {found:?})")]
    TypeMismatch {
        id: String,
        expected: PaneKind,
        found: PaneKind,
    },
    #[error("pane '{id}' is not a view and cannot contain other panes")]
    NotAView { id: String },
    #[error("a view cannot be put inside itself or one of its descendants")]
    WouldCycle,
    #[error("pane handle does not refer to a live pane")]
    UnknownPane,
    #[error("the window root cannot be moved or removed")]
    RootPane,
    #[error("layout: {0}")]
    Layout(String),
}
