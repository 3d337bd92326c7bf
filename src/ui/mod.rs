mod alignment;
mod clip;
mod draw;
mod error;
mod input;
mod pane;
mod params;
mod theme;
mod widget;
mod window;

pub use alignment::Alignment;
pub use clip::{ClipStack, DeviceRect, ScissorScope};
pub use draw::{DrawCommand, DrawContext, DrawList, RectCommand, Renderer, TextCommand};
pub use error::UiError;
pub use input::{Key, UiEvent, UiState};
pub use pane::Pane;
pub use params::{AttrEnum, AttrValue, PaneParams, SizePair};
pub use theme::Theme;
pub use widget::{KeyOutcome, PaneKind, Widget};
pub use window::Window;

use slotmap::{SlotMap, new_key_type};

new_key_type! {
    /// Handle into the pane arena. Stable across insertions/removals.
    pub struct PaneId;
}

/// Debug outline color while the mouse is over the pane.
const DEBUG_HOVER_COLOR: [f32; 4] = [0.0, 1.0, 0.0, 1.0];
/// Debug outline color otherwise.
const DEBUG_IDLE_COLOR: [f32; 4] = [0.0, 0.0, 1.0, 1.0];

// ---------------------------------------------------------------------------
// Geometry primitives
// ---------------------------------------------------------------------------

/// Integer rectangle. Screen space unless stated otherwise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    /// Returns true if the point (px, py) is inside this rectangle.
    pub fn contains(&self, px: i32, py: i32) -> bool {
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }

    /// Intersection with `outer`. Width and height clamp at zero when the
    /// rectangles do not overlap.
    pub fn intersect(&self, outer: &Rect) -> Rect {
        let x = self.x.max(outer.x);
        let y = self.y.max(outer.y);
        Rect {
            x,
            y,
            width: self.right().min(outer.right()).saturating_sub(x).max(0),
            height: self.bottom().min(outer.bottom()).saturating_sub(y).max(0),
        }
    }

    /// Convert top-down logical pixels to the backend's bottom-up device
    /// pixels.
    pub fn to_device(&self, scale: i32, display_height: i32) -> DeviceRect {
        DeviceRect {
            x: self.x.saturating_mul(scale),
            y: display_height.saturating_sub(self.bottom().saturating_mul(scale)),
            width: self.width.saturating_mul(scale),
            height: self.height.saturating_mul(scale),
        }
    }
}

// ---------------------------------------------------------------------------
// Pane node (arena entry)
// ---------------------------------------------------------------------------

/// Arena entry pairing a pane with its widget behavior and tree links.
///
/// `parent` and `children` only change through `PaneTree::put_inside` and
/// `PaneTree::remove`, so a child's parent always lists it exactly once.
#[derive(Debug)]
pub struct PaneNode {
    pub pane: Pane,
    pub widget: Widget,
    parent: Option<PaneId>,
    children: Vec<PaneId>,
    /// Negative width/height requests resolved by the current parent.
    stretch: [Option<i32>; 2],
}

impl PaneNode {
    pub fn parent(&self) -> Option<PaneId> {
        self.parent
    }

    /// Children in z-order: first drawn first, last is topmost.
    pub fn children(&self) -> &[PaneId] {
        &self.children
    }
}

// ---------------------------------------------------------------------------
// PaneTree
// ---------------------------------------------------------------------------

/// Arena-backed retained pane tree.
#[derive(Debug, Default)]
pub struct PaneTree {
    arena: SlotMap<PaneId, PaneNode>,
}

impl PaneTree {
    pub fn new() -> Self {
        Self {
            arena: SlotMap::with_key(),
        }
    }

    /// Insert an unparented pane. Attach it with `put_inside`.
    pub fn insert(&mut self, pane: Pane, widget: Widget) -> PaneId {
        self.arena.insert(PaneNode {
            pane,
            widget,
            parent: None,
            children: Vec::new(),
            stretch: [None; 2],
        })
    }

    pub fn get(&self, id: PaneId) -> Option<&PaneNode> {
        self.arena.get(id)
    }

    pub fn get_mut(&mut self, id: PaneId) -> Option<&mut PaneNode> {
        self.arena.get_mut(id)
    }

    pub fn pane(&self, id: PaneId) -> Option<&Pane> {
        self.arena.get(id).map(|n| &n.pane)
    }

    pub fn pane_mut(&mut self, id: PaneId) -> Option<&mut Pane> {
        self.arena.get_mut(id).map(|n| &mut n.pane)
    }

    pub fn widget(&self, id: PaneId) -> Option<&Widget> {
        self.arena.get(id).map(|n| &n.widget)
    }

    pub fn widget_mut(&mut self, id: PaneId) -> Option<&mut Widget> {
        self.arena.get_mut(id).map(|n| &mut n.widget)
    }

    pub fn contains(&self, id: PaneId) -> bool {
        self.arena.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn parent(&self, id: PaneId) -> Option<PaneId> {
        self.arena.get(id).and_then(|n| n.parent)
    }

    pub fn children(&self, id: PaneId) -> &[PaneId] {
        self.arena.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Topmost ancestor reached through parent links.
    pub fn root_of(&self, id: PaneId) -> Option<PaneId> {
        let mut current = id;
        self.arena.get(current)?;
        while let Some(parent) = self.parent(current) {
            current = parent;
        }
        Some(current)
    }

    /// True if `ancestor` is `id` or lies on `id`'s parent chain.
    pub fn is_ancestor(&self, ancestor: PaneId, id: PaneId) -> bool {
        let mut current = Some(id);
        while let Some(cid) = current {
            if cid == ancestor {
                return true;
            }
            current = self.parent(cid);
        }
        false
    }

    /// Size of the area a View lays its children out in.
    pub fn interior_size(&self, view: PaneId) -> (i32, i32) {
        let Some(node) = self.arena.get(view) else {
            return (0, 0);
        };
        let inset = node.widget.padding().saturating_mul(2);
        (
            node.pane.width.saturating_sub(inset).max(0),
            node.pane.height.saturating_sub(inset).max(0),
        )
    }

    /// Bounds in screen space, derived from the parent chain.
    pub fn screen_rect(&self, id: PaneId) -> Option<Rect> {
        let node = self.arena.get(id)?;
        let mut x = node.pane.x;
        let mut y = node.pane.y;
        let mut current = node.parent;
        while let Some(pid) = current {
            let parent = self.arena.get(pid)?;
            let padding = parent.widget.padding();
            x = x.saturating_add(parent.pane.x).saturating_add(padding);
            y = y.saturating_add(parent.pane.y).saturating_add(padding);
            current = parent.parent;
        }
        Some(Rect::new(x, y, node.pane.width, node.pane.height))
    }

    // ------------------------------------------------------------------
    // Attachment
    // ------------------------------------------------------------------

    /// Move `id` into `new_parent` (appended on top), or detach it with
    /// `None`. Any previous parent is left first.
    pub fn put_inside(&mut self, id: PaneId, new_parent: Option<PaneId>) -> Result<(), UiError> {
        if !self.arena.contains_key(id) {
            return Err(UiError::UnknownPane);
        }
        if let Some(parent) = new_parent {
            let parent_node = self.arena.get(parent).ok_or(UiError::UnknownPane)?;
            if !parent_node.widget.is_view() {
                return Err(UiError::NotAView {
                    id: parent_node.pane.id().to_string(),
                });
            }
            if self.is_ancestor(id, parent) {
                return Err(UiError::WouldCycle);
            }
        }

        self.detach(id);

        if let Some(parent) = new_parent {
            if let Some(parent_node) = self.arena.get_mut(parent) {
                debug_assert!(!parent_node.children.contains(&id));
                parent_node.children.push(id);
            }
            if let Some(node) = self.arena.get_mut(id) {
                node.parent = Some(parent);
            }
            self.adjust_child(parent, id);
            log::debug!("attached {:?} to {:?}", id, parent);
        }
        Ok(())
    }

    /// Unlink from the current parent. No-op when already unparented.
    fn detach(&mut self, id: PaneId) {
        let Some(parent) = self.parent(id) else {
            return;
        };
        self.release_child(parent, id);
        if let Some(node) = self.arena.get_mut(id) {
            node.parent = None;
        }
        if let Some(parent_node) = self.arena.get_mut(parent) {
            parent_node.children.retain(|c| *c != id);
        }
    }

    /// Resolve a freshly attached child against the View's interior: a
    /// negative width/height means "interior minus that much", and the
    /// alignment anchor turns x/y into offsets from the right/bottom edge
    /// or the centre.
    fn adjust_child(&mut self, view: PaneId, child: PaneId) {
        let (interior_w, interior_h) = self.interior_size(view);
        let Some(node) = self.arena.get_mut(child) else {
            return;
        };
        let pane = &mut node.pane;

        if pane.width < 0 {
            node.stretch[0] = Some(pane.width);
            pane.width = interior_w.saturating_add(pane.width).max(0);
        }
        if pane.height < 0 {
            node.stretch[1] = Some(pane.height);
            pane.height = interior_h.saturating_add(pane.height).max(0);
        }

        let alignment = pane.alignment;
        if alignment.is_right_aligned() {
            pane.x = far_edge_offset(interior_w, pane.width, pane.x);
        } else if alignment.is_horizontal_centered() {
            pane.x = pane.x.saturating_add(interior_w.saturating_sub(pane.width) / 2);
        }
        if alignment.is_bottom_aligned() {
            pane.y = far_edge_offset(interior_h, pane.height, pane.y);
        } else if alignment.is_vertical_centered() {
            pane.y = pane.y.saturating_add(interior_h.saturating_sub(pane.height) / 2);
        }
    }

    /// Inverse of `adjust_child`, run when a child leaves `view`: x/y go back
    /// to anchor offsets and stretched sizes back to their negative request,
    /// so the next parent resolves them afresh.
    fn release_child(&mut self, view: PaneId, child: PaneId) {
        let (interior_w, interior_h) = self.interior_size(view);
        let Some(node) = self.arena.get_mut(child) else {
            return;
        };
        let pane = &mut node.pane;

        let alignment = pane.alignment;
        if alignment.is_right_aligned() {
            pane.x = far_edge_offset(interior_w, pane.width, pane.x);
        } else if alignment.is_horizontal_centered() {
            pane.x = pane.x.saturating_sub(interior_w.saturating_sub(pane.width) / 2);
        }
        if alignment.is_bottom_aligned() {
            pane.y = far_edge_offset(interior_h, pane.height, pane.y);
        } else if alignment.is_vertical_centered() {
            pane.y = pane.y.saturating_sub(interior_h.saturating_sub(pane.height) / 2);
        }

        if let Some(width) = node.stretch[0].take() {
            pane.width = width;
        }
        if let Some(height) = node.stretch[1].take() {
            pane.height = height;
        }
    }

    /// Remove a pane and all its descendants. Returns the removed handles.
    pub fn remove(&mut self, id: PaneId) -> Vec<PaneId> {
        if !self.arena.contains_key(id) {
            return Vec::new();
        }
        self.detach(id);

        let mut removed = Vec::new();
        Self::collect_subtree(&self.arena, id, &mut removed);
        for rid in &removed {
            self.arena.remove(*rid);
        }
        log::debug!("removed {} pane(s) rooted at {:?}", removed.len(), id);
        removed
    }

    fn collect_subtree(arena: &SlotMap<PaneId, PaneNode>, id: PaneId, out: &mut Vec<PaneId>) {
        out.push(id);
        if let Some(node) = arena.get(id) {
            for &child in &node.children {
                Self::collect_subtree(arena, child, out);
            }
        }
    }

    // ------------------------------------------------------------------
    // Lookup
    // ------------------------------------------------------------------

    /// First pane with `id` in a depth-first walk from `start` (self, then
    /// children in order).
    pub fn find_pane_by_id(&self, start: PaneId, id: &str) -> Option<PaneId> {
        let node = self.arena.get(start)?;
        if node.pane.id() == id {
            return Some(start);
        }
        node.children
            .iter()
            .find_map(|&child| self.find_pane_by_id(child, id))
    }

    /// `find_pane_by_id`, failing if the pane found is not a `kind`.
    pub fn find_pane_of_type_by_id(
        &self,
        start: PaneId,
        id: &str,
        kind: PaneKind,
    ) -> Result<Option<PaneId>, UiError> {
        let Some(found) = self.find_pane_by_id(start, id) else {
            return Ok(None);
        };
        let found_kind = self
            .widget(found)
            .map(Widget::kind)
            .ok_or(UiError::UnknownPane)?;
        if kind.accepts(found_kind) {
            Ok(Some(found))
        } else {
            Err(UiError::TypeMismatch {
                id: id.to_string(),
                expected: kind,
                found: found_kind,
            })
        }
    }

    // ------------------------------------------------------------------
    // Draw
    // ------------------------------------------------------------------

    /// Draw `id` and its subtree. `(mx, my)` is the mouse relative to the
    /// parent's origin; the renderer is translated to that origin.
    pub fn draw(&self, ctx: &mut DrawContext<'_>, id: PaneId, mx: i32, my: i32, focus: Option<PaneId>) {
        let Some(node) = self.arena.get(id) else {
            return;
        };
        let pane = &node.pane;
        if !pane.visible {
            return;
        }

        match &node.widget {
            Widget::View { padding } => self.draw_view(ctx, node, *padding, mx, my, focus),
            widget => widget.draw_self(
                pane,
                &mut *ctx.renderer,
                mx.saturating_sub(pane.x),
                my.saturating_sub(pane.y),
                focus == Some(id),
            ),
        }

        if ctx.debugging {
            Self::draw_debug_overlay(ctx, pane, mx, my);
        }
    }

    fn draw_view(
        &self,
        ctx: &mut DrawContext<'_>,
        node: &PaneNode,
        padding: i32,
        mx: i32,
        my: i32,
        focus: Option<PaneId>,
    ) {
        let pane = &node.pane;
        let mut scope = ctx.scissor_scope(pane);
        let ox = pane.x.saturating_add(padding);
        let oy = pane.y.saturating_add(padding);
        scope.renderer.push_translation(ox, oy);
        for &child in &node.children {
            self.draw(&mut scope, child, mx.saturating_sub(ox), my.saturating_sub(oy), focus);
        }
        scope.renderer.pop_translation();
    }

    fn draw_debug_overlay(ctx: &mut DrawContext<'_>, pane: &Pane, mx: i32, my: i32) {
        let over = pane.is_point_in_pane(mx, my);
        let color = if over {
            DEBUG_HOVER_COLOR
        } else {
            DEBUG_IDLE_COLOR
        };
        let right = pane.x.saturating_add(pane.width);
        let bottom = pane.y.saturating_add(pane.height);
        let renderer = &mut *ctx.renderer;
        renderer.outline_rect(pane.x, pane.y, right, bottom, color);
        if over && !pane.id().is_empty() {
            let text_w = renderer.text_width(pane.id());
            let text_h = renderer.font_height();
            renderer.text(
                pane.id(),
                right.saturating_sub(text_w),
                bottom.saturating_sub(text_h),
                color,
            );
        }
    }

    // ------------------------------------------------------------------
    // Input
    // ------------------------------------------------------------------

    /// Click at `(mx, my)` relative to the parent's origin. A View hands the
    /// click to its topmost child that can take it; otherwise the pane
    /// records itself as last clicked and handles the click itself.
    pub fn click(&mut self, ui: &mut UiState, id: PaneId, mx: i32, my: i32) {
        let Some(node) = self.arena.get(id) else {
            return;
        };

        if let Widget::View { padding } = node.widget {
            let cx = mx.saturating_sub(node.pane.x).saturating_sub(padding);
            let cy = my.saturating_sub(node.pane.y).saturating_sub(padding);
            let target = node.children.iter().rev().copied().find(|&child| {
                self.arena
                    .get(child)
                    .is_some_and(|c| c.pane.can_handle_click(cx, cy))
            });
            if let Some(child) = target {
                self.click(ui, child, cx, cy);
                return;
            }
        }

        let (x, y) = (node.pane.x, node.pane.y);
        ui.set_last_clicked(Some(id));
        self.handle_click(ui, id, mx.saturating_sub(x), my.saturating_sub(y));
    }

    /// Widget reaction to a click at `(mx, my)` relative to the pane's
    /// top-left.
    pub fn handle_click(&mut self, ui: &mut UiState, id: PaneId, mx: i32, my: i32) {
        let Some(node) = self.arena.get(id) else {
            return;
        };
        match node.widget.kind() {
            PaneKind::Button => ui.push_event(UiEvent::ButtonClicked {
                pane: id,
                id: node.pane.id().to_string(),
                x: mx,
                y: my,
            }),
            PaneKind::TextField => self.set_focus(ui, Some(id)),
            PaneKind::Pane | PaneKind::View | PaneKind::Label => {}
        }
    }

    /// Offer a key to `id`. Returns true if it was consumed.
    pub fn key_typed(&mut self, ui: &mut UiState, id: PaneId, ch: char, key: Key) -> bool {
        let Some(node) = self.arena.get_mut(id) else {
            return false;
        };
        if !node.pane.is_clickable() {
            return false;
        }
        let outcome = node.widget.on_key_typed(ch, key);
        let text = || node.widget.text().unwrap_or_default().to_string();
        match outcome {
            KeyOutcome::Ignored => false,
            KeyOutcome::Handled => true,
            KeyOutcome::Edited => {
                ui.push_event(UiEvent::TextChanged {
                    pane: id,
                    id: node.pane.id().to_string(),
                    text: text(),
                });
                true
            }
            KeyOutcome::Submitted => {
                ui.push_event(UiEvent::TextSubmitted {
                    pane: id,
                    id: node.pane.id().to_string(),
                    text: text(),
                });
                true
            }
        }
    }

    /// Per-frame tick for `id` and its subtree, in child order.
    pub fn on_update(&mut self, id: PaneId) {
        let Some(node) = self.arena.get_mut(id) else {
            return;
        };
        node.widget.on_update();
        let children = node.children.clone();
        for child in children {
            self.on_update(child);
        }
    }

    /// Move focus to `target` (or clear it with `None`). The previous holder
    /// is notified before the new one. Focusing the current holder again is
    /// a no-op.
    pub fn set_focus(&mut self, ui: &mut UiState, target: Option<PaneId>) {
        if ui.focus() == target {
            return;
        }
        if let Some(t) = target
            && !self.arena.contains_key(t)
        {
            log::warn!("ignoring focus request for stale pane {:?}", t);
            return;
        }

        if let Some(previous) = ui.replace_focus(None) {
            if let Some(node) = self.arena.get_mut(previous) {
                node.widget.on_focus_lost();
            }
            ui.push_event(UiEvent::FocusLost(previous));
        }

        ui.replace_focus(target);
        if let Some(next) = target {
            if let Some(node) = self.arena.get_mut(next) {
                node.widget.on_focus();
            }
            ui.push_event(UiEvent::FocusGained(next));
        }
        log::debug!("focus -> {:?}", target);
    }
}

/// Position measured from the far edge of an `extent`-wide interior. The
/// mapping is its own inverse.
fn far_edge_offset(extent: i32, size: i32, offset: i32) -> i32 {
    extent.saturating_sub(size).saturating_sub(offset)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
