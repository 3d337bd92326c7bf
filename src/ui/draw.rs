use super::clip::{ClipStack, DeviceRect, ScissorScope};
use super::{Pane, Rect};

/// Immediate-mode drawing backend the tree renders through.
///
/// Draw coordinates are relative to the current translation, which Views
/// push before drawing their children.
pub trait Renderer {
    /// Translation component of the cumulative transform, in logical pixels.
    fn translation(&self) -> (i32, i32);
    fn push_translation(&mut self, dx: i32, dy: i32);
    fn pop_translation(&mut self);

    /// Outline of the rectangle spanning `(x1, y1)` to `(x2, y2)`.
    fn outline_rect(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: [f32; 4]);
    fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32, color: [f32; 4]);
    fn text(&mut self, text: &str, x: i32, y: i32, color: [f32; 4]);
    fn text_width(&self, text: &str) -> i32;
    fn font_height(&self) -> i32;

    /// Device pixels per logical pixel.
    fn gui_scale(&self) -> i32;
    /// Surface height in device pixels.
    fn display_height(&self) -> i32;
    /// Enable clipping to `rect`, or disable clipping with `None`.
    fn set_scissor(&mut self, rect: Option<DeviceRect>);
}

// ---------------------------------------------------------------------------
// Recording backend
// ---------------------------------------------------------------------------

/// Rectangle command in screen space.
#[derive(Debug, Clone, PartialEq)]
pub struct RectCommand {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub color: [f32; 4], // sRGB RGBA
}

/// Text run in screen space.
#[derive(Debug, Clone, PartialEq)]
pub struct TextCommand {
    pub text: String,
    pub x: i32,
    pub y: i32,
    pub color: [f32; 4], // sRGB RGBA
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Outline(RectCommand),
    Fill(RectCommand),
    Text(TextCommand),
    /// Scissor state change; `None` disables clipping.
    Scissor(Option<DeviceRect>),
}

/// Approximate glyph advance used by the recording backend.
const GLYPH_WIDTH: i32 = 6;
const FONT_HEIGHT: i32 = 9;

/// Records draw commands in screen space instead of rasterizing them.
/// Decouples the pane tree from any GPU renderer.
#[derive(Debug)]
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
    translations: Vec<(i32, i32)>,
    scissor: Option<DeviceRect>,
    gui_scale: i32,
    display_height: i32,
}

impl DrawList {
    pub fn new(gui_scale: i32, display_height: i32) -> Self {
        Self {
            commands: Vec::new(),
            translations: Vec::new(),
            scissor: None,
            gui_scale,
            display_height,
        }
    }

    pub fn clear(&mut self) {
        self.commands.clear();
        self.translations.clear();
        self.scissor = None;
    }

    /// Scissor state as last set by the tree.
    pub fn scissor(&self) -> Option<DeviceRect> {
        self.scissor
    }

    pub fn texts(&self) -> impl Iterator<Item = &TextCommand> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text(t) => Some(t),
            _ => None,
        })
    }

    pub fn outlines(&self) -> impl Iterator<Item = &RectCommand> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Outline(r) => Some(r),
            _ => None,
        })
    }

    pub fn fills(&self) -> impl Iterator<Item = &RectCommand> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Fill(r) => Some(r),
            _ => None,
        })
    }

    fn offset(&self) -> (i32, i32) {
        self.translations.last().copied().unwrap_or((0, 0))
    }
}

impl Renderer for DrawList {
    fn translation(&self) -> (i32, i32) {
        self.offset()
    }

    fn push_translation(&mut self, dx: i32, dy: i32) {
        let (tx, ty) = self.offset();
        self.translations
            .push((tx.saturating_add(dx), ty.saturating_add(dy)));
    }

    fn pop_translation(&mut self) {
        self.translations.pop();
    }

    fn outline_rect(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: [f32; 4]) {
        let (tx, ty) = self.offset();
        self.commands.push(DrawCommand::Outline(RectCommand {
            x: tx.saturating_add(x1),
            y: ty.saturating_add(y1),
            width: x2.saturating_sub(x1),
            height: y2.saturating_sub(y1),
            color,
        }));
    }

    fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32, color: [f32; 4]) {
        let (tx, ty) = self.offset();
        self.commands.push(DrawCommand::Fill(RectCommand {
            x: tx.saturating_add(x),
            y: ty.saturating_add(y),
            width,
            height,
            color,
        }));
    }

    fn text(&mut self, text: &str, x: i32, y: i32, color: [f32; 4]) {
        let (tx, ty) = self.offset();
        self.commands.push(DrawCommand::Text(TextCommand {
            text: text.to_string(),
            x: tx.saturating_add(x),
            y: ty.saturating_add(y),
            color,
        }));
    }

    fn text_width(&self, text: &str) -> i32 {
        text.chars().count() as i32 * GLYPH_WIDTH
    }

    fn font_height(&self) -> i32 {
        FONT_HEIGHT
    }

    fn gui_scale(&self) -> i32 {
        self.gui_scale
    }

    fn display_height(&self) -> i32 {
        self.display_height
    }

    fn set_scissor(&mut self, rect: Option<DeviceRect>) {
        self.scissor = rect;
        self.commands.push(DrawCommand::Scissor(rect));
    }
}

// ---------------------------------------------------------------------------
// Per-frame draw context
// ---------------------------------------------------------------------------

/// What a draw pass needs besides the tree: the backend, the clip stack and
/// the debug overlay flag.
pub struct DrawContext<'a> {
    pub renderer: &'a mut dyn Renderer,
    clip: &'a mut ClipStack,
    pub debugging: bool,
}

impl<'a> DrawContext<'a> {
    pub fn new(renderer: &'a mut dyn Renderer, clip: &'a mut ClipStack, debugging: bool) -> Self {
        Self {
            renderer,
            clip,
            debugging,
        }
    }

    pub fn clip_depth(&self) -> usize {
        self.clip.depth()
    }

    pub fn clip_top(&self) -> Option<Rect> {
        self.clip.top()
    }

    /// Push `pane`'s screen-space bounds as the active scissor region,
    /// intersected with the enclosing region.
    pub fn scissors_start(&mut self, pane: &Pane) -> Rect {
        let (tx, ty) = self.renderer.translation();
        let requested = Rect::new(
            tx.saturating_add(pane.x),
            ty.saturating_add(pane.y),
            pane.width,
            pane.height,
        );
        let active = self.clip.push(requested);
        self.apply_scissor(Some(active));
        active
    }

    /// Pop the active region and restore the one beneath it, or disable
    /// clipping if the stack is now empty.
    ///
    /// Panics on underflow: an unbalanced pop would leak clip state into
    /// every later draw of the frame.
    pub fn scissors_end(&mut self) {
        if self.clip.pop().is_none() {
            log::error!("scissors_end without a matching scissors_start");
            panic!("clip stack underflow");
        }
        let top = self.clip.top();
        self.apply_scissor(top);
    }

    /// `scissors_start` tied to a guard that calls `scissors_end` when
    /// dropped.
    pub fn scissor_scope(&mut self, pane: &Pane) -> ScissorScope<'_, 'a> {
        self.scissors_start(pane);
        ScissorScope::new(self)
    }

    fn apply_scissor(&mut self, rect: Option<Rect>) {
        let scale = self.renderer.gui_scale();
        let display_height = self.renderer.display_height();
        self.renderer
            .set_scissor(rect.map(|r| r.to_device(scale, display_height)));
    }
}
