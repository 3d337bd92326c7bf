use super::params::AttrEnum;

/// Anchor a pane's position is measured from inside its parent View.
///
/// `x`/`y` of a right-aligned pane are the distance from the parent's right
/// edge; for centered panes they are an offset from the centre.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Alignment {
    #[default]
    TopLeft,
    TopMiddle,
    TopRight,
    MiddleLeft,
    Middle,
    MiddleRight,
    BottomLeft,
    BottomMiddle,
    BottomRight,
}

impl Alignment {
    pub fn is_right_aligned(self) -> bool {
        matches!(
            self,
            Alignment::TopRight | Alignment::MiddleRight | Alignment::BottomRight
        )
    }

    pub fn is_horizontal_centered(self) -> bool {
        matches!(
            self,
            Alignment::TopMiddle | Alignment::Middle | Alignment::BottomMiddle
        )
    }

    pub fn is_bottom_aligned(self) -> bool {
        matches!(
            self,
            Alignment::BottomLeft | Alignment::BottomMiddle | Alignment::BottomRight
        )
    }

    pub fn is_vertical_centered(self) -> bool {
        matches!(
            self,
            Alignment::MiddleLeft | Alignment::Middle | Alignment::MiddleRight
        )
    }
}

impl AttrEnum for Alignment {
    fn parse_attr(raw: &str) -> Option<Self> {
        // Accept TOP_LEFT, top-left, TopLeft, topleft.
        let key: String = raw
            .chars()
            .filter(|c| *c != '_' && *c != '-' && !c.is_whitespace())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        let alignment = match key.as_str() {
            "topleft" => Alignment::TopLeft,
            "topmiddle" => Alignment::TopMiddle,
            "topright" => Alignment::TopRight,
            "middleleft" => Alignment::MiddleLeft,
            "middle" => Alignment::Middle,
            "middleright" => Alignment::MiddleRight,
            "bottomleft" => Alignment::BottomLeft,
            "bottommiddle" => Alignment::BottomMiddle,
            "bottomright" => Alignment::BottomRight,
            _ => return None,
        };
        Some(alignment)
    }
}
