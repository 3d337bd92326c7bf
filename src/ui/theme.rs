/// Default widget colors.
///
/// Widgets copy their colors out of the theme when they are constructed, so
/// an attribute like `color="#FF0000"` only has to override one field.
#[derive(Debug, Clone)]
pub struct Theme {
    // -- Label --
    /// Label text: #404040
    pub label_color: [f32; 4],

    // -- Button --
    pub button_text: [f32; 4],
    pub button_bg: [f32; 4],
    /// Background while the mouse is over an enabled button.
    pub button_hover_bg: [f32; 4],
    pub button_disabled_text: [f32; 4],
    pub button_disabled_bg: [f32; 4],

    // -- Text field --
    pub textfield_text: [f32; 4],
    pub textfield_bg: [f32; 4],
    pub textfield_caret: [f32; 4],
    /// Default maximum number of characters a text field accepts.
    pub textfield_max_length: usize,
}

/// Convert a hex color (#RRGGBB) to sRGB [f32; 4] with alpha 1.0.
const fn hex(r: u8, g: u8, b: u8) -> [f32; 4] {
    [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0]
}

/// Convert a hex color with custom alpha.
const fn hex_a(r: u8, g: u8, b: u8, a: f32) -> [f32; 4] {
    [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, a]
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            label_color: hex(0x40, 0x40, 0x40),

            button_text: hex(0xE0, 0xE0, 0xE0),
            button_bg: hex(0x6F, 0x6F, 0x6F),
            button_hover_bg: hex(0x7E, 0x88, 0xBF),
            button_disabled_text: hex(0xA0, 0xA0, 0xA0),
            button_disabled_bg: hex_a(0x2C, 0x2C, 0x2C, 0.8),

            textfield_text: hex(0xE0, 0xE0, 0xE0),
            textfield_bg: hex(0x00, 0x00, 0x00),
            textfield_caret: hex(0xD0, 0xD0, 0xD0),
            textfield_max_length: 256,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_conversion() {
        let white = hex(0xFF, 0xFF, 0xFF);
        assert!((white[0] - 1.0).abs() < 0.001);
        assert!((white[1] - 1.0).abs() < 0.001);
        assert!((white[2] - 1.0).abs() < 0.001);
        assert!((white[3] - 1.0).abs() < 0.001);

        let half_alpha = hex_a(0x80, 0x80, 0x80, 0.5);
        assert!((half_alpha[3] - 0.5).abs() < 0.001);
    }

    #[test]
    fn hover_differs_from_idle() {
        let t = Theme::default();
        assert_ne!(t.button_bg, t.button_hover_bg);
        assert!(t.button_disabled_bg[3] < 1.0);
    }
}
