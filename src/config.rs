use serde::Deserialize;

/// Display and debug settings for the frame driver, read from RON.
///
/// ```ron
/// (gui_scale: 2, display_width: 854, display_height: 480, debug_overlay: false)
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Device pixels per logical pixel.
    pub gui_scale: i32,
    /// Surface size in device pixels.
    pub display_width: i32,
    pub display_height: i32,
    /// Initial state of the pane outline overlay.
    pub debug_overlay: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            gui_scale: 2,
            display_width: 854,
            display_height: 480,
            debug_overlay: false,
        }
    }
}

impl UiConfig {
    /// Surface size in logical pixels.
    pub fn logical_size(&self) -> (i32, i32) {
        let scale = self.gui_scale.max(1);
        (self.display_width / scale, self.display_height / scale)
    }
}

/// Parse a RON config. Logs a warning and returns None on failure.
pub fn parse_ui_config(source: &str) -> Option<UiConfig> {
    match ron::from_str::<UiConfig>(source) {
        Ok(config) if config.gui_scale < 1 => {
            log::warn!("gui_scale {} is not positive, using 1", config.gui_scale);
            Some(UiConfig {
                gui_scale: 1,
                ..config
            })
        }
        Ok(config) => Some(config),
        Err(e) => {
            log::warn!("failed to parse RON UI config: {}", e);
            None
        }
    }
}

/// Load the UI config from a RON file, falling back to defaults.
pub fn load_ui_config(path: &str) -> UiConfig {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            log::warn!("failed to read {}: {}, using default config", path, e);
            return UiConfig::default();
        }
    };
    parse_ui_config(&content).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let config = parse_ui_config("(gui_scale: 3, debug_overlay: true)").expect("valid RON");
        assert_eq!(config.gui_scale, 3);
        assert!(config.debug_overlay);
        assert_eq!(config.display_height, UiConfig::default().display_height);
    }

    #[test]
    fn logical_size_divides_by_scale() {
        let config = UiConfig {
            gui_scale: 2,
            display_width: 854,
            display_height: 480,
            debug_overlay: false,
        };
        assert_eq!(config.logical_size(), (427, 240));
    }

    #[test]
    fn non_positive_scale_is_clamped() {
        let config = parse_ui_config("(gui_scale: 0)").expect("valid RON");
        assert_eq!(config.gui_scale, 1);
    }

    #[test]
    fn malformed_config_is_none() {
        assert!(parse_ui_config("(gui_scale: \"big\")").is_none());
        assert_eq!(load_ui_config("does/not/exist.ron"), UiConfig::default());
    }
}
