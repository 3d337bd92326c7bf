use super::PaneId;

/// Key identifier (decoupled from any windowing library).
/// Printable input arrives as `Other` together with its character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Backspace,
    Delete,
    Left,
    Right,
    Home,
    End,
    Enter,
    Escape,
    Tab,
    Other(u32),
}

/// Notifications produced while dispatching input. Drained by the
/// application once per frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// A button was clicked; `(x, y)` is relative to the button's top-left.
    ButtonClicked {
        pane: PaneId,
        id: String,
        x: i32,
        y: i32,
    },
    FocusGained(PaneId),
    FocusLost(PaneId),
    TextChanged {
        pane: PaneId,
        id: String,
        text: String,
    },
    TextSubmitted {
        pane: PaneId,
        id: String,
        text: String,
    },
    /// The window was closed (Escape or `Window::close`).
    Closed,
}

/// Interaction state for one window: the focus slot, the last-clicked slot,
/// pending events and the debug overlay flag.
#[derive(Debug, Default)]
pub struct UiState {
    focus: Option<PaneId>,
    last_clicked: Option<PaneId>,
    events: Vec<UiEvent>,
    pub debugging: bool,
}

impl UiState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pane currently receiving keyboard input.
    pub fn focus(&self) -> Option<PaneId> {
        self.focus
    }

    pub fn is_focus(&self, id: PaneId) -> bool {
        self.focus == Some(id)
    }

    /// Store the new focus holder and return the previous one. Hooks are
    /// delivered by `PaneTree::set_focus`, which is the only caller.
    pub(crate) fn replace_focus(&mut self, focus: Option<PaneId>) -> Option<PaneId> {
        std::mem::replace(&mut self.focus, focus)
    }

    /// Most recently clicked pane.
    pub fn last_clicked(&self) -> Option<PaneId> {
        self.last_clicked
    }

    pub(crate) fn set_last_clicked(&mut self, id: Option<PaneId>) {
        self.last_clicked = id;
    }

    pub fn push_event(&mut self, event: UiEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[UiEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<UiEvent> {
        std::mem::take(&mut self.events)
    }

    /// Forget slots that point at panes which no longer exist.
    pub(crate) fn forget(&mut self, removed: &[PaneId]) {
        if self.focus.is_some_and(|f| removed.contains(&f)) {
            self.focus = None;
        }
        if self.last_clicked.is_some_and(|c| removed.contains(&c)) {
            self.last_clicked = None;
        }
    }
}
