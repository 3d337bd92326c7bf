use crate::ui::{AttrValue, PaneParams, UiError};

/// Parse a KDL layout description into a `PaneParams` tree.
///
/// The first node is the root. A node's name is the widget kind, its
/// properties are attributes, its first unnamed string argument is the text
/// content and its child block holds the children:
///
/// ```kdl
/// window padding=4 {
///     label "Name:" x=0 y=0
///     textfield id="name" pos="40 0" size="-40 12"
///     button "OK" id="ok" align="bottom_right" size="40 14"
/// }
/// ```
pub fn parse_layout(source: &str) -> Result<PaneParams, UiError> {
    let doc = source
        .parse::<kdl::KdlDocument>()
        .map_err(|e| UiError::Layout(e.to_string()))?;
    let root = doc
        .nodes()
        .first()
        .ok_or_else(|| UiError::Layout("layout has no root node".into()))?;
    Ok(node_to_params(root))
}

/// Read and parse a layout file. Logs a warning and returns None on failure.
pub fn load_layout(path: &str) -> Option<PaneParams> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            log::warn!("failed to read {}: {}", path, e);
            return None;
        }
    };
    match parse_layout(&content) {
        Ok(params) => Some(params),
        Err(e) => {
            log::warn!("failed to parse layout {}: {}", path, e);
            None
        }
    }
}

fn node_to_params(node: &kdl::KdlNode) -> PaneParams {
    let mut params = PaneParams::new(node.name().value());

    for entry in node.entries() {
        match entry.name() {
            Some(name) => match kdl_value(entry.value()) {
                Some(value) => params.push_attr(name.value(), value),
                None => log::warn!("ignoring null attribute {} on {}", name.value(), node.name().value()),
            },
            None => {
                // Only the first string argument is meaningful.
                if params.text().is_none()
                    && let Some(text) = entry.value().as_string()
                {
                    params.set_text(text);
                }
            }
        }
    }

    if let Some(children) = node.children() {
        for child in children.nodes() {
            params.push_child(node_to_params(child));
        }
    }
    params
}

fn kdl_value(value: &kdl::KdlValue) -> Option<AttrValue> {
    if let Some(s) = value.as_string() {
        return Some(AttrValue::String(s.to_string()));
    }
    if let Some(i) = value.as_integer() {
        return match i64::try_from(i) {
            Ok(i) => Some(AttrValue::Integer(i)),
            Err(_) => {
                log::warn!("integer {} out of range", i);
                None
            }
        };
    }
    if let Some(f) = value.as_float() {
        return Some(AttrValue::Float(f));
    }
    value.as_bool().map(AttrValue::Bool)
}
