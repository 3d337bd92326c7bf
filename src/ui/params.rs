//! Typed, parent-relative attribute lookups for pane construction.
//!
//! A `PaneParams` node is one entry of a parsed layout description: a widget
//! kind, its attributes, optional text content and child nodes. Every lookup
//! takes a default and falls back to it when the attribute is missing or
//! malformed; resolution never fails.

use std::borrow::Cow;

/// Raw attribute value as it came out of the layout description.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
}

impl AttrValue {
    /// Textual form of the value, used when a string is requested.
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            AttrValue::String(s) => Cow::Borrowed(s.as_str()),
            AttrValue::Integer(i) => Cow::Owned(i.to_string()),
            AttrValue::Float(f) => Cow::Owned(f.to_string()),
            AttrValue::Bool(b) => Cow::Owned(b.to_string()),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::String(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::String(value)
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        AttrValue::Integer(value)
    }
}

impl From<i32> for AttrValue {
    fn from(value: i32) -> Self {
        AttrValue::Integer(i64::from(value))
    }
}

impl From<f64> for AttrValue {
    fn from(value: f64) -> Self {
        AttrValue::Float(value)
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        AttrValue::Bool(value)
    }
}

/// A resolved (x, y) or (width, height) pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SizePair {
    pub x: i32,
    pub y: i32,
}

impl SizePair {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Enumerations that can be read from a textual attribute.
pub trait AttrEnum: Sized {
    fn parse_attr(raw: &str) -> Option<Self>;
}

/// One node of a parsed layout description.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaneParams {
    kind: String,
    attributes: Vec<(String, AttrValue)>,
    text: Option<String>,
    children: Vec<PaneParams>,
    parent_width: i32,
    parent_height: i32,
}

impl PaneParams {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            ..Self::default()
        }
    }

    /// Builder: append an attribute. The first occurrence of a name wins.
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.push_attr(name, value);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_child(mut self, child: PaneParams) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_parent_extent(mut self, width: i32, height: i32) -> Self {
        self.set_parent_extent(width, height);
        self
    }

    pub fn push_attr(&mut self, name: impl Into<String>, value: impl Into<AttrValue>) {
        self.attributes.push((name.into(), value.into()));
    }

    pub fn push_child(&mut self, child: PaneParams) {
        self.children.push(child);
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = Some(text.into());
    }

    /// Set the extent percentages and negative offsets resolve against.
    pub fn set_parent_extent(&mut self, width: i32, height: i32) {
        self.parent_width = width;
        self.parent_height = height;
    }

    /// Widget kind name (`view`, `label`, `button`, ...).
    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn children(&self) -> &[PaneParams] {
        &self.children
    }

    /// Move the child nodes out, leaving this node childless.
    pub fn take_children(&mut self) -> Vec<PaneParams> {
        std::mem::take(&mut self.children)
    }

    pub fn parent_width(&self) -> i32 {
        self.parent_width
    }

    pub fn parent_height(&self) -> i32 {
        self.parent_height
    }

    pub fn parent_extent(&self) -> SizePair {
        SizePair::new(self.parent_width, self.parent_height)
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    pub fn attr(&self, name: &str) -> Option<&AttrValue> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    // ------------------------------------------------------------------
    // Typed accessors
    // ------------------------------------------------------------------

    pub fn get_string(&self, name: &str, default: &str) -> String {
        match self.attr(name) {
            Some(value) => value.as_text().into_owned(),
            None => default.to_string(),
        }
    }

    pub fn get_bool(&self, name: &str, default: bool) -> bool {
        let Some(value) = self.attr(name) else {
            return default;
        };
        let parsed = match value {
            AttrValue::Bool(b) => Some(*b),
            AttrValue::Integer(i) => Some(*i != 0),
            AttrValue::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" => Some(true),
                "false" | "0" | "no" => Some(false),
                _ => None,
            },
            AttrValue::Float(_) => None,
        };
        parsed.unwrap_or_else(|| {
            log::warn!("attribute {}={:?} is not a boolean", name, value);
            default
        })
    }

    pub fn get_int(&self, name: &str, default: i32) -> i32 {
        let Some(value) = self.attr(name) else {
            return default;
        };
        let parsed = match value {
            AttrValue::Integer(i) => i32::try_from(*i).ok(),
            AttrValue::String(s) => s.trim().parse::<i32>().ok(),
            AttrValue::Float(_) | AttrValue::Bool(_) => None,
        };
        parsed.unwrap_or_else(|| {
            log::warn!("attribute {}={:?} is not an integer", name, value);
            default
        })
    }

    pub fn get_enum<E: AttrEnum>(&self, name: &str, default: E) -> E {
        let Some(value) = self.attr(name) else {
            return default;
        };
        E::parse_attr(value.as_text().trim()).unwrap_or_else(|| {
            log::warn!("attribute {}={:?} is not a known value", name, value);
            default
        })
    }

    /// Integer that may be absolute (`12`, `12px`), a percentage of
    /// `extent` (`50%`), a fraction of `extent` (`0.5`), or negative,
    /// meaning `extent` minus the magnitude.
    pub fn get_scaled_int(&self, name: &str, default: i32, extent: i32) -> i32 {
        let Some(value) = self.attr(name) else {
            return default;
        };
        let parsed = match value {
            AttrValue::Integer(i) => i32::try_from(*i).ok().map(|v| scale_absolute(v, extent)),
            AttrValue::Float(f) => Some(scale_fraction(*f, extent)),
            AttrValue::String(s) => parse_scaled(s, extent),
            AttrValue::Bool(_) => None,
        };
        parsed.unwrap_or_else(|| {
            log::warn!("attribute {}={:?} is not a scalable integer", name, value);
            default
        })
    }

    /// Pair of scaled integers written as `"a b"` or `"a, b"`. The first
    /// component resolves against `extent.x`, the second against `extent.y`.
    pub fn get_size_pair(
        &self,
        name: &str,
        default: Option<SizePair>,
        extent: SizePair,
    ) -> Option<SizePair> {
        let Some(value) = self.attr(name) else {
            return default;
        };
        let AttrValue::String(raw) = value else {
            log::warn!("attribute {}={:?} is not a size pair", name, value);
            return default;
        };
        let mut parts = raw
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|part| !part.is_empty());
        let pair = match (parts.next(), parts.next(), parts.next()) {
            (Some(a), Some(b), None) => parse_scaled(a, extent.x)
                .zip(parse_scaled(b, extent.y))
                .map(|(x, y)| SizePair::new(x, y)),
            _ => None,
        };
        if pair.is_none() {
            log::warn!("attribute {}={:?} is not a size pair", name, raw);
            return default;
        }
        pair
    }

    /// sRGB color from `#RRGGBB`, `#AARRGGBB`, an ARGB integer literal, or a
    /// small set of names.
    pub fn get_color(&self, name: &str, default: [f32; 4]) -> [f32; 4] {
        let Some(value) = self.attr(name) else {
            return default;
        };
        let parsed = match value {
            AttrValue::Integer(i) => u32::try_from(*i).ok().map(argb_to_srgba),
            AttrValue::String(s) => parse_color(s.trim()),
            AttrValue::Float(_) | AttrValue::Bool(_) => None,
        };
        parsed.unwrap_or_else(|| {
            log::warn!("attribute {}={:?} is not a color", name, value);
            default
        })
    }
}

// ---------------------------------------------------------------------------
// Scalar parsing
// ---------------------------------------------------------------------------

fn scale_absolute(value: i32, extent: i32) -> i32 {
    if value < 0 {
        extent.saturating_add(value)
    } else {
        value
    }
}

fn scale_percent(percent: i32, extent: i32) -> i32 {
    let clamped = i64::from(percent.clamp(0, 100));
    // Integer math keeps repeated resolution exact.
    (i64::from(extent) * clamped / 100) as i32
}

fn scale_fraction(fraction: f64, extent: i32) -> i32 {
    (f64::from(extent) * fraction.clamp(0.0, 1.0)).floor() as i32
}

fn parse_scaled(raw: &str, extent: i32) -> Option<i32> {
    let raw = raw.trim();
    if let Some(number) = raw.strip_suffix('%') {
        return number.trim().parse::<i32>().ok().map(|p| scale_percent(p, extent));
    }
    let number = raw.strip_suffix("px").unwrap_or(raw).trim();
    if let Ok(value) = number.parse::<i32>() {
        return Some(scale_absolute(value, extent));
    }
    match number.parse::<f64>() {
        Ok(f) if (0.0..=1.0).contains(&f) => Some(scale_fraction(f, extent)),
        _ => None,
    }
}

fn argb_to_srgba(argb: u32) -> [f32; 4] {
    let channel = |shift: u32| ((argb >> shift) & 0xFF) as f32 / 255.0;
    [channel(16), channel(8), channel(0), channel(24)]
}

fn parse_color(raw: &str) -> Option<[f32; 4]> {
    if let Some(hex) = raw.strip_prefix('#') {
        let value = u32::from_str_radix(hex, 16).ok()?;
        return match hex.len() {
            6 => Some(argb_to_srgba(0xFF00_0000 | value)),
            8 => Some(argb_to_srgba(value)),
            _ => None,
        };
    }
    let argb = match raw.to_ascii_lowercase().as_str() {
        "black" => 0xFF00_0000,
        "white" => 0xFFFF_FFFF,
        "red" => 0xFFFF_0000,
        "green" => 0xFF00_FF00,
        "blue" => 0xFF00_00FF,
        "yellow" => 0xFFFF_FF00,
        "gray" | "grey" => 0xFF80_8080,
        "dark_gray" | "dark_grey" => 0xFF40_4040,
        _ => return None,
    };
    Some(argb_to_srgba(argb))
}
