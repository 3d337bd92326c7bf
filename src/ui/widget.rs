use super::Pane;
use super::draw::Renderer;
use super::input::Key;
use super::params::PaneParams;
use super::theme::Theme;

/// Frames a text field caret stays on (and then off) while blinking.
const CARET_BLINK_TICKS: u32 = 6;

/// Concrete kind of a pane, used for typed lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaneKind {
    Pane,
    View,
    Label,
    Button,
    TextField,
}

impl PaneKind {
    /// Whether a pane of kind `found` can be used where `self` is requested.
    /// Every kind is a `Pane`.
    pub fn accepts(self, found: PaneKind) -> bool {
        self == PaneKind::Pane || self == found
    }
}

/// Result of offering a key to a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Ignored,
    Handled,
    /// Text content changed.
    Edited,
    /// Enter pressed in a text field.
    Submitted,
}

/// Flat enum widget identity.
/// Closed set: every hook defaults to doing nothing for kinds that don't
/// care about it.
#[derive(Debug, Clone, PartialEq)]
pub enum Widget {
    /// No behavior beyond the common pane attributes.
    Pane,

    /// Container. Children are positioned inside `padding`.
    View { padding: i32 },

    Label {
        text: String,
        color: [f32; 4], // sRGB RGBA
    },

    /// Reports clicks as `UiEvent::ButtonClicked`.
    Button {
        label: String,
        text_color: [f32; 4],
        bg_color: [f32; 4],
        hover_bg_color: [f32; 4],
        disabled_text_color: [f32; 4],
        disabled_bg_color: [f32; 4],
    },

    /// Single-line text input. `cursor` counts chars, not bytes.
    TextField {
        text: String,
        cursor: usize,
        max_length: usize,
        caret_ticks: u32,
        text_color: [f32; 4],
        bg_color: [f32; 4],
        caret_color: [f32; 4],
    },
}

impl Widget {
    pub fn view() -> Self {
        Widget::View { padding: 0 }
    }

    pub fn label(text: impl Into<String>, theme: &Theme) -> Self {
        Widget::Label {
            text: text.into(),
            color: theme.label_color,
        }
    }

    pub fn button(label: impl Into<String>, theme: &Theme) -> Self {
        Widget::Button {
            label: label.into(),
            text_color: theme.button_text,
            bg_color: theme.button_bg,
            hover_bg_color: theme.button_hover_bg,
            disabled_text_color: theme.button_disabled_text,
            disabled_bg_color: theme.button_disabled_bg,
        }
    }

    pub fn text_field(text: impl Into<String>, theme: &Theme) -> Self {
        let text = text.into();
        Widget::TextField {
            cursor: text.chars().count(),
            text,
            max_length: theme.textfield_max_length,
            caret_ticks: 0,
            text_color: theme.textfield_text,
            bg_color: theme.textfield_bg,
            caret_color: theme.textfield_caret,
        }
    }

    /// Materialize the widget part of a layout node. Unknown kinds become a
    /// plain pane.
    pub fn from_params(params: &PaneParams, theme: &Theme) -> Self {
        let extent = params.parent_extent();
        let content = |attr: &str| match params.text() {
            Some(text) => text.to_string(),
            None => params.get_string(attr, ""),
        };
        match params.kind() {
            "view" | "window" | "group" => Widget::View {
                padding: params.get_scaled_int("padding", 0, extent.x.min(extent.y)),
            },
            "label" => Widget::Label {
                text: content("label"),
                color: params.get_color("color", theme.label_color),
            },
            "button" => {
                let mut button = Widget::button(content("label"), theme);
                if let Widget::Button {
                    text_color,
                    bg_color,
                    ..
                } = &mut button
                {
                    *text_color = params.get_color("textcolor", *text_color);
                    *bg_color = params.get_color("color", *bg_color);
                }
                button
            }
            "textfield" | "input" => {
                let mut field = Widget::text_field(content("text"), theme);
                if let Widget::TextField {
                    text,
                    cursor,
                    max_length,
                    text_color,
                    ..
                } = &mut field
                {
                    let limit = params.get_int("maxlength", *max_length as i32).max(0);
                    *max_length = limit as usize;
                    if text.chars().count() > *max_length {
                        *text = text.chars().take(*max_length).collect();
                    }
                    *cursor = text.chars().count();
                    *text_color = params.get_color("textcolor", *text_color);
                }
                field
            }
            "pane" => Widget::Pane,
            other => {
                log::warn!("unknown pane kind '{}', using a plain pane", other);
                Widget::Pane
            }
        }
    }

    pub fn kind(&self) -> PaneKind {
        match self {
            Widget::Pane => PaneKind::Pane,
            Widget::View { .. } => PaneKind::View,
            Widget::Label { .. } => PaneKind::Label,
            Widget::Button { .. } => PaneKind::Button,
            Widget::TextField { .. } => PaneKind::TextField,
        }
    }

    pub fn is_view(&self) -> bool {
        matches!(self, Widget::View { .. })
    }

    /// Padding of a View; zero for every other kind.
    pub fn padding(&self) -> i32 {
        match self {
            Widget::View { padding } => *padding,
            _ => 0,
        }
    }

    /// Current text of a label, button or text field.
    pub fn text(&self) -> Option<&str> {
        match self {
            Widget::Label { text, .. } | Widget::TextField { text, .. } => Some(text.as_str()),
            Widget::Button { label, .. } => Some(label.as_str()),
            Widget::Pane | Widget::View { .. } => None,
        }
    }

    /// Replace the text of a label, button or text field. Returns false for
    /// kinds without text.
    pub fn set_text(&mut self, value: impl Into<String>) -> bool {
        match self {
            Widget::Label { text, .. } | Widget::Button { label: text, .. } => {
                *text = value.into();
                true
            }
            Widget::TextField {
                text,
                cursor,
                max_length,
                ..
            } => {
                *text = value.into().chars().take(*max_length).collect();
                *cursor = text.chars().count();
                true
            }
            Widget::Pane | Widget::View { .. } => false,
        }
    }

    // ------------------------------------------------------------------
    // Hooks
    // ------------------------------------------------------------------

    /// Draw the widget itself. The renderer is translated to the parent's
    /// origin; `(mx, my)` is the mouse relative to this pane's top-left.
    pub fn draw_self(
        &self,
        pane: &Pane,
        renderer: &mut dyn Renderer,
        mx: i32,
        my: i32,
        focused: bool,
    ) {
        match self {
            Widget::Pane | Widget::View { .. } => {}
            Widget::Label { text, color } => {
                renderer.text(text, pane.x, pane.y, *color);
            }
            Widget::Button {
                label,
                text_color,
                bg_color,
                hover_bg_color,
                disabled_text_color,
                disabled_bg_color,
            } => {
                let hovered = mx >= 0 && mx < pane.width && my >= 0 && my < pane.height;
                let (fg, bg) = if !pane.enabled {
                    (disabled_text_color, disabled_bg_color)
                } else if hovered {
                    (text_color, hover_bg_color)
                } else {
                    (text_color, bg_color)
                };
                renderer.fill_rect(pane.x, pane.y, pane.width, pane.height, *bg);
                let text_x = centred(pane.x, pane.width, renderer.text_width(label));
                let text_y = centred(pane.y, pane.height, renderer.font_height());
                renderer.text(label, text_x, text_y, *fg);
            }
            Widget::TextField {
                text,
                cursor,
                caret_ticks,
                text_color,
                bg_color,
                caret_color,
                ..
            } => {
                renderer.fill_rect(pane.x, pane.y, pane.width, pane.height, *bg_color);
                let text_y = centred(pane.y, pane.height, renderer.font_height());
                renderer.text(text, pane.x.saturating_add(2), text_y, *text_color);
                if focused && (caret_ticks / CARET_BLINK_TICKS) % 2 == 0 {
                    let before: String = text.chars().take(*cursor).collect();
                    let caret_x = pane
                        .x
                        .saturating_add(2)
                        .saturating_add(renderer.text_width(&before));
                    let caret_h = renderer.font_height() + 2;
                    renderer.fill_rect(caret_x, text_y.saturating_sub(1), 1, caret_h, *caret_color);
                }
            }
        }
    }

    /// Per-frame tick.
    pub fn on_update(&mut self) {
        if let Widget::TextField { caret_ticks, .. } = self {
            *caret_ticks = caret_ticks.wrapping_add(1);
        }
    }

    pub fn on_focus(&mut self) {
        if let Widget::TextField {
            text,
            cursor,
            caret_ticks,
            ..
        } = self
        {
            *cursor = text.chars().count();
            *caret_ticks = 0;
        }
    }

    pub fn on_focus_lost(&mut self) {
        if let Widget::TextField { caret_ticks, .. } = self {
            *caret_ticks = 0;
        }
    }

    /// Offer a typed key. Only text fields consume keys.
    pub fn on_key_typed(&mut self, ch: char, key: Key) -> KeyOutcome {
        let Widget::TextField {
            text,
            cursor,
            max_length,
            caret_ticks,
            ..
        } = self
        else {
            return KeyOutcome::Ignored;
        };

        let len = text.chars().count();
        let outcome = match key {
            Key::Enter => KeyOutcome::Submitted,
            Key::Backspace => {
                if *cursor > 0 {
                    *cursor -= 1;
                    text.remove(byte_index(text, *cursor));
                    KeyOutcome::Edited
                } else {
                    KeyOutcome::Handled
                }
            }
            Key::Delete => {
                if *cursor < len {
                    text.remove(byte_index(text, *cursor));
                    KeyOutcome::Edited
                } else {
                    KeyOutcome::Handled
                }
            }
            Key::Left => {
                *cursor = cursor.saturating_sub(1);
                KeyOutcome::Handled
            }
            Key::Right => {
                *cursor = (*cursor + 1).min(len);
                KeyOutcome::Handled
            }
            Key::Home => {
                *cursor = 0;
                KeyOutcome::Handled
            }
            Key::End => {
                *cursor = len;
                KeyOutcome::Handled
            }
            Key::Escape | Key::Tab => KeyOutcome::Ignored,
            Key::Other(_) => {
                if ch.is_control() {
                    KeyOutcome::Ignored
                } else if len >= *max_length {
                    KeyOutcome::Handled
                } else {
                    text.insert(byte_index(text, *cursor), ch);
                    *cursor += 1;
                    KeyOutcome::Edited
                }
            }
        };
        if outcome != KeyOutcome::Ignored {
            *caret_ticks = 0;
        }
        outcome
    }
}

/// Start of a run of length `inner` centred in `[start, start + outer)`.
fn centred(start: i32, outer: i32, inner: i32) -> i32 {
    start.saturating_add(outer.saturating_sub(inner) / 2)
}

/// Byte offset of the `char_pos`-th char, or the end of the string.
fn byte_index(text: &str, char_pos: usize) -> usize {
    text.char_indices()
        .nth(char_pos)
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}
