use super::Alignment;
use super::params::PaneParams;

/// Attributes common to every element of the tree.
///
/// Position and size are always in the parent View's coordinate space;
/// a pane never knows its absolute screen position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pane {
    id: String,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub alignment: Alignment,
    pub visible: bool,
    pub enabled: bool,
}

impl Default for Pane {
    fn default() -> Self {
        Self {
            id: String::new(),
            x: 0,
            y: 0,
            width: 0,
            height: 0,
            alignment: Alignment::TopLeft,
            visible: true,
            enabled: true,
        }
    }
}

impl Pane {
    pub fn new(id: impl Into<String>, x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            id: id.into(),
            x,
            y,
            width,
            height,
            ..Self::default()
        }
    }

    /// Read the common attributes. `size` overrides `width`/`height` and
    /// `pos` overrides `x`/`y` entirely; everything resolves against the
    /// parent extent carried by `params`.
    pub fn from_params(params: &PaneParams) -> Self {
        let defaults = Self::default();
        let extent = params.parent_extent();

        let (width, height) = match params.get_size_pair("size", None, extent) {
            Some(size) => (size.x, size.y),
            None => (
                params.get_scaled_int("width", defaults.width, extent.x),
                params.get_scaled_int("height", defaults.height, extent.y),
            ),
        };
        let (x, y) = match params.get_size_pair("pos", None, extent) {
            Some(pos) => (pos.x, pos.y),
            None => (
                params.get_scaled_int("x", defaults.x, extent.x),
                params.get_scaled_int("y", defaults.y, extent.y),
            ),
        };

        Self {
            id: params.get_string("id", &defaults.id),
            x,
            y,
            width,
            height,
            alignment: params.get_enum("align", defaults.alignment),
            visible: params.get_bool("visible", defaults.visible),
            enabled: params.get_bool("enabled", defaults.enabled),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = id.into();
    }

    pub fn set_size(&mut self, width: i32, height: i32) {
        self.width = width;
        self.height = height;
    }

    pub fn set_position(&mut self, x: i32, y: i32) {
        self.x = x;
        self.y = y;
    }

    pub fn move_by(&mut self, dx: i32, dy: i32) {
        self.x = self.x.saturating_add(dx);
        self.y = self.y.saturating_add(dy);
    }

    pub fn set_alignment(&mut self, alignment: Alignment) {
        self.alignment = alignment;
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn enable(&mut self) {
        self.enabled = true;
    }

    pub fn disable(&mut self) {
        self.enabled = false;
    }

    pub fn is_clickable(&self) -> bool {
        self.visible && self.enabled
    }

    /// Half-open containment test. `(mx, my)` is relative to the parent's
    /// origin, the same frame `x`/`y` are stored in.
    pub fn is_point_in_pane(&self, mx: i32, my: i32) -> bool {
        mx >= self.x
            && mx < self.x.saturating_add(self.width)
            && my >= self.y
            && my < self.y.saturating_add(self.height)
    }

    pub fn can_handle_click(&self, mx: i32, my: i32) -> bool {
        self.is_clickable() && self.is_point_in_pane(mx, my)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_in_pane_is_half_open() {
        let pane = Pane::new("p", 10, 20, 30, 40);
        assert!(pane.is_point_in_pane(10, 20));
        assert!(pane.is_point_in_pane(39, 59));
        assert!(!pane.is_point_in_pane(40, 30)); // x + width is outside
        assert!(!pane.is_point_in_pane(20, 60)); // y + height is outside
        assert!(!pane.is_point_in_pane(9, 30));
        assert!(!pane.is_point_in_pane(20, 19));
    }

    #[test]
    fn empty_pane_contains_nothing() {
        let pane = Pane::new("p", 5, 5, 0, 0);
        assert!(!pane.is_point_in_pane(5, 5));
    }

    #[test]
    fn click_requires_visible_and_enabled() {
        let mut pane = Pane::new("p", 0, 0, 10, 10);
        assert!(pane.can_handle_click(5, 5));
        pane.disable();
        assert!(!pane.can_handle_click(5, 5));
        pane.enable();
        pane.hide();
        assert!(!pane.can_handle_click(5, 5));
        pane.show();
        assert!(!pane.can_handle_click(15, 5));
    }

    #[test]
    fn size_attribute_overrides_width_height() {
        let params = PaneParams::new("pane")
            .with_attr("size", "50% 50%")
            .with_attr("width", 7)
            .with_attr("height", 9)
            .with_parent_extent(200, 100);
        let pane = Pane::from_params(&params);
        assert_eq!((pane.width, pane.height), (100, 50));
    }

    #[test]
    fn pos_attribute_overrides_x_y() {
        let params = PaneParams::new("pane")
            .with_attr("x", 3)
            .with_attr("pos", "10 20")
            .with_parent_extent(200, 100);
        let pane = Pane::from_params(&params);
        assert_eq!((pane.x, pane.y), (10, 20));
    }

    #[test]
    fn discrete_attributes_without_pair() {
        let params = PaneParams::new("pane")
            .with_attr("id", "ok")
            .with_attr("x", "10%")
            .with_attr("width", -20)
            .with_attr("height", 15)
            .with_attr("align", "BOTTOM_RIGHT")
            .with_attr("visible", false)
            .with_attr("enabled", false)
            .with_parent_extent(200, 100);
        let pane = Pane::from_params(&params);
        assert_eq!(pane.id(), "ok");
        assert_eq!(pane.x, 20);
        assert_eq!(pane.y, 0);
        assert_eq!(pane.width, 180);
        assert_eq!(pane.height, 15);
        assert_eq!(pane.alignment, Alignment::BottomRight);
        assert!(!pane.visible);
        assert!(!pane.enabled);
    }

    #[test]
    fn unknown_attributes_are_ignored() {
        let params = PaneParams::new("pane")
            .with_attr("sparkle", "lots")
            .with_attr("width", 4);
        let pane = Pane::from_params(&params);
        assert_eq!(pane.width, 4);
        assert!(pane.visible);
    }
}
