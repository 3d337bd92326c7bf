use super::clip::ClipStack;
use super::draw::{DrawContext, Renderer};
use super::input::{Key, UiEvent, UiState};
use super::params::PaneParams;
use super::theme::Theme;
use super::widget::{PaneKind, Widget};
use super::{Pane, PaneId, PaneTree, UiError};

/// Root View bound to one surface. Owns the tree and all interaction state,
/// and is the entry point for the frame driver.
///
/// Coordinates passed in are screen space in logical pixels; the window's
/// origin defines that space.
#[derive(Debug)]
pub struct Window {
    tree: PaneTree,
    root: PaneId,
    ui: UiState,
    clip: ClipStack,
    theme: Theme,
    open: bool,
}

impl Window {
    /// Empty window covering `width` x `height` logical pixels.
    pub fn new(width: i32, height: i32) -> Self {
        Self::with_theme(width, height, Theme::default())
    }

    pub fn with_theme(width: i32, height: i32, theme: Theme) -> Self {
        let mut tree = PaneTree::new();
        let root = tree.insert(Pane::new("window", 0, 0, width, height), Widget::view());
        Self {
            tree,
            root,
            ui: UiState::new(),
            clip: ClipStack::new(),
            theme,
            open: true,
        }
    }

    /// Build a window from a parsed layout. The root resolves against the
    /// screen extent and fills it unless it sets its own size; every child
    /// resolves against its parent's interior.
    pub fn from_params(
        mut params: PaneParams,
        screen_width: i32,
        screen_height: i32,
        theme: Theme,
    ) -> Result<Self, UiError> {
        params.set_parent_extent(screen_width, screen_height);
        let children = params.take_children();

        let mut pane = Pane::from_params(&params);
        if !params.has_attr("size") {
            if !params.has_attr("width") {
                pane.width = screen_width;
            }
            if !params.has_attr("height") {
                pane.height = screen_height;
            }
        }
        let widget = Widget::from_params(&params, &theme);
        if !widget.is_view() {
            return Err(UiError::NotAView {
                id: pane.id().to_string(),
            });
        }

        let mut tree = PaneTree::new();
        let root = tree.insert(pane, widget);
        build_children(&mut tree, root, children, &theme)?;
        log::debug!("built window with {} pane(s)", tree.len());

        Ok(Self {
            tree,
            root,
            ui: UiState::new(),
            clip: ClipStack::new(),
            theme,
            open: true,
        })
    }

    pub fn root(&self) -> PaneId {
        self.root
    }

    pub fn tree(&self) -> &PaneTree {
        &self.tree
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn pane(&self, id: PaneId) -> Option<&Pane> {
        self.tree.pane(id)
    }

    pub fn pane_mut(&mut self, id: PaneId) -> Option<&mut Pane> {
        self.tree.pane_mut(id)
    }

    pub fn widget(&self, id: PaneId) -> Option<&Widget> {
        self.tree.widget(id)
    }

    pub fn widget_mut(&mut self, id: PaneId) -> Option<&mut Widget> {
        self.tree.widget_mut(id)
    }

    // ------------------------------------------------------------------
    // Tree editing
    // ------------------------------------------------------------------

    /// Insert a pane directly under the root.
    pub fn add(&mut self, pane: Pane, widget: Widget) -> Result<PaneId, UiError> {
        self.add_to(self.root, pane, widget)
    }

    /// Insert a pane on top of `parent`'s children.
    pub fn add_to(&mut self, parent: PaneId, pane: Pane, widget: Widget) -> Result<PaneId, UiError> {
        let id = self.tree.insert(pane, widget);
        if let Err(e) = self.tree.put_inside(id, Some(parent)) {
            self.tree.remove(id);
            return Err(e);
        }
        Ok(id)
    }

    /// Move a pane into another View, or detach it with `None`. Focus is
    /// dropped when the focused pane is no longer reachable from the root.
    pub fn put_inside(&mut self, id: PaneId, parent: Option<PaneId>) -> Result<(), UiError> {
        if id == self.root {
            return Err(UiError::RootPane);
        }
        self.tree.put_inside(id, parent)?;
        if let Some(focus) = self.ui.focus()
            && self.tree.root_of(focus) != Some(self.root)
        {
            self.clear_focus();
        }
        Ok(())
    }

    /// Remove a pane and its subtree, clearing the focus and last-clicked
    /// slots if they pointed into it.
    pub fn remove(&mut self, id: PaneId) -> Result<(), UiError> {
        if id == self.root {
            return Err(UiError::RootPane);
        }
        if !self.tree.contains(id) {
            return Err(UiError::UnknownPane);
        }
        let removed = self.tree.remove(id);
        self.ui.forget(&removed);
        Ok(())
    }

    pub fn find_pane_by_id(&self, id: &str) -> Option<PaneId> {
        self.tree.find_pane_by_id(self.root, id)
    }

    pub fn find_pane_of_type_by_id(&self, id: &str, kind: PaneKind) -> Result<Option<PaneId>, UiError> {
        self.tree.find_pane_of_type_by_id(self.root, id, kind)
    }

    // ------------------------------------------------------------------
    // Frame driver entry points
    // ------------------------------------------------------------------

    pub fn draw(&mut self, renderer: &mut dyn Renderer, mx: i32, my: i32) {
        if !self.open {
            return;
        }
        let depth = self.clip.depth();
        let mut ctx = DrawContext::new(renderer, &mut self.clip, self.ui.debugging);
        self.tree.draw(&mut ctx, self.root, mx, my, self.ui.focus());
        debug_assert_eq!(ctx.clip_depth(), depth, "clip stack left unbalanced");
    }

    pub fn click(&mut self, mx: i32, my: i32) {
        if !self.open {
            return;
        }
        self.tree.click(&mut self.ui, self.root, mx, my);
    }

    /// Route a key to the focused pane. Escape closes the window when the
    /// focused pane does not consume it.
    pub fn on_key_typed(&mut self, ch: char, key: Key) -> bool {
        if !self.open {
            return false;
        }
        if let Some(focus) = self.ui.focus()
            && self.tree.key_typed(&mut self.ui, focus, ch, key)
        {
            return true;
        }
        if key == Key::Escape {
            self.close();
            return true;
        }
        false
    }

    pub fn on_update(&mut self) {
        if self.open {
            self.tree.on_update(self.root);
        }
    }

    // ------------------------------------------------------------------
    // Interaction state
    // ------------------------------------------------------------------

    pub fn set_focus(&mut self, id: Option<PaneId>) {
        self.tree.set_focus(&mut self.ui, id);
    }

    pub fn clear_focus(&mut self) {
        self.set_focus(None);
    }

    pub fn focus(&self) -> Option<PaneId> {
        self.ui.focus()
    }

    pub fn is_focus(&self, id: PaneId) -> bool {
        self.ui.is_focus(id)
    }

    pub fn last_clicked(&self) -> Option<PaneId> {
        self.ui.last_clicked()
    }

    pub fn set_debugging(&mut self, debugging: bool) {
        self.ui.debugging = debugging;
    }

    pub fn is_debugging(&self) -> bool {
        self.ui.debugging
    }

    /// Close the window, dropping focus. Emits `UiEvent::Closed` once.
    pub fn close(&mut self) {
        if !self.open {
            return;
        }
        self.clear_focus();
        self.open = false;
        self.ui.push_event(UiEvent::Closed);
        log::debug!("window closed");
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn events(&self) -> &[UiEvent] {
        self.ui.events()
    }

    pub fn drain_events(&mut self) -> Vec<UiEvent> {
        self.ui.drain_events()
    }
}

/// Materialize `children` under `parent`, each resolved against the
/// parent's interior extent.
fn build_children(
    tree: &mut PaneTree,
    parent: PaneId,
    children: Vec<PaneParams>,
    theme: &Theme,
) -> Result<(), UiError> {
    let (width, height) = tree.interior_size(parent);
    for mut params in children {
        params.set_parent_extent(width, height);
        let grandchildren = params.take_children();
        let id = tree.insert(Pane::from_params(&params), Widget::from_params(&params, theme));
        tree.put_inside(id, Some(parent))?;
        if !grandchildren.is_empty() {
            build_children(tree, id, grandchildren, theme)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::DrawList;

    fn window_with_field() -> (Window, PaneId) {
        let mut window = Window::new(320, 240);
        let theme = window.theme().clone();
        let field = window
            .add(
                Pane::new("name", 10, 10, 100, 12),
                Widget::text_field("", &theme),
            )
            .expect("add field");
        (window, field)
    }

    #[test]
    fn escape_closes_when_unhandled() {
        let (mut window, field) = window_with_field();
        window.set_focus(Some(field));
        window.drain_events();

        assert!(window.on_key_typed('\u{1b}', Key::Escape));
        assert!(!window.is_open());
        assert_eq!(window.focus(), None);
        assert_eq!(
            window.drain_events(),
            vec![UiEvent::FocusLost(field), UiEvent::Closed]
        );

        // A closed window ignores input.
        assert!(!window.on_key_typed('a', Key::Other(30)));
        window.close();
        assert!(window.events().is_empty());
    }

    #[test]
    fn keys_go_to_focused_pane() {
        let (mut window, field) = window_with_field();
        assert!(!window.on_key_typed('h', Key::Other(35)));

        window.click(15, 15);
        assert!(window.is_focus(field));
        assert!(window.on_key_typed('h', Key::Other(35)));
        assert!(window.on_key_typed('i', Key::Other(23)));
        assert!(window.on_key_typed('\r', Key::Enter));
        assert_eq!(window.widget(field).and_then(Widget::text), Some("hi"));
        assert_eq!(
            window.events().last(),
            Some(&UiEvent::TextSubmitted {
                pane: field,
                id: "name".into(),
                text: "hi".into(),
            })
        );
    }

    #[test]
    fn remove_forgets_focus_and_last_clicked() {
        let (mut window, field) = window_with_field();
        window.click(15, 15);
        assert_eq!(window.last_clicked(), Some(field));
        window.remove(field).expect("remove");
        assert_eq!(window.focus(), None);
        assert_eq!(window.last_clicked(), None);
        assert_eq!(window.remove(field), Err(UiError::UnknownPane));
    }

    #[test]
    fn detaching_focused_subtree_drops_focus() {
        let mut window = Window::new(200, 100);
        let theme = window.theme().clone();
        let panel = window
            .add(Pane::new("panel", 0, 0, 100, 50), Widget::view())
            .expect("panel");
        let other = window
            .add(Pane::new("other", 100, 0, 100, 50), Widget::view())
            .expect("other");
        let field = window
            .add_to(panel, Pane::new("f", 0, 0, 60, 12), Widget::text_field("", &theme))
            .expect("field");
        window.set_focus(Some(field));
        window.drain_events();

        // Still reachable: focus stays put.
        window.put_inside(field, Some(other)).expect("move");
        assert!(window.is_focus(field));
        assert!(window.events().is_empty());

        window.put_inside(other, None).expect("detach");
        assert_eq!(window.focus(), None);
        assert_eq!(window.drain_events(), vec![UiEvent::FocusLost(field)]);
        assert!(!window.on_key_typed('a', Key::Other(30)));
        assert_eq!(window.widget(field).and_then(Widget::text), Some(""));
    }

    #[test]
    fn root_is_fixed() {
        let mut window = Window::new(100, 100);
        let root = window.root();
        assert_eq!(window.remove(root), Err(UiError::RootPane));
        assert_eq!(window.put_inside(root, None), Err(UiError::RootPane));
    }

    #[test]
    fn add_to_non_view_is_rolled_back() {
        let mut window = Window::new(100, 100);
        let leaf = window
            .add(Pane::new("leaf", 0, 0, 10, 10), Widget::Pane)
            .expect("leaf");
        let before = window.tree().len();
        let err = window
            .add_to(leaf, Pane::new("x", 0, 0, 1, 1), Widget::Pane)
            .expect_err("leaf cannot hold children");
        assert_eq!(err, UiError::NotAView { id: "leaf".into() });
        assert_eq!(window.tree().len(), before);
    }

    #[test]
    fn from_params_resolves_against_interiors() {
        let layout = PaneParams::new("window")
            .with_attr("padding", 10)
            .with_child(
                PaneParams::new("view")
                    .with_attr("id", "panel")
                    .with_attr("size", "50% 100%")
                    .with_child(
                        PaneParams::new("button")
                            .with_attr("id", "ok")
                            .with_attr("width", "50%")
                            .with_attr("height", 20)
                            .with_text("OK"),
                    ),
            );
        let window = Window::from_params(layout, 220, 120, Theme::default()).expect("layout");
        let root = window.pane(window.root()).expect("root");
        assert_eq!((root.width, root.height), (220, 120));

        let panel = window.find_pane_by_id("panel").expect("panel");
        let pane = window.pane(panel).expect("panel pane");
        assert_eq!((pane.width, pane.height), (100, 100));

        let ok = window
            .find_pane_of_type_by_id("ok", PaneKind::Button)
            .expect("typed lookup")
            .expect("ok exists");
        assert_eq!(window.pane(ok).map(|p| p.width), Some(50));
        assert_eq!(window.tree().parent(ok), Some(panel));
    }

    #[test]
    fn from_params_rejects_leaf_root() {
        let err = Window::from_params(PaneParams::new("label"), 100, 100, Theme::default())
            .expect_err("label root");
        assert!(matches!(err, UiError::NotAView { .. }));
    }

    #[test]
    fn draw_pushes_one_region_per_view() {
        let mut window = Window::new(100, 80);
        let theme = window.theme().clone();
        window
            .add(Pane::new("t", 4, 4, 20, 10), Widget::label("hey", &theme))
            .expect("label");

        let mut dl = DrawList::new(2, 160);
        window.draw(&mut dl, 0, 0);
        assert_eq!(dl.texts().count(), 1);
        assert_eq!(dl.scissor(), None);
        assert_eq!(dl.outlines().count(), 0);

        window.set_debugging(true);
        dl.clear();
        window.draw(&mut dl, 0, 0);
        assert_eq!(dl.outlines().count(), 2);
    }

    #[test]
    fn update_ticks_when_open() {
        let (mut window, field) = window_with_field();
        window.on_update();
        match window.widget(field) {
            Some(Widget::TextField { caret_ticks, .. }) => assert_eq!(*caret_ticks, 1),
            other => panic!("unexpected widget {other:?}"),
        }
        window.close();
        window.on_update();
        match window.widget(field) {
            Some(Widget::TextField { caret_ticks, .. }) => assert_eq!(*caret_ticks, 1),
            other => panic!("unexpected widget {other:?}"),
        }
    }
}
