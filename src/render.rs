//! SVG rendering with merged attributes

use indexmap::IndexMap;

use crate::sanitize::sanitize_svg;
use crate::types::{IconRecord, RenderOptions};

/// SVG namespace emitted on every rendered icon
const SVG_XMLNS: &str = "http://www.w3.org/2000/svg";

/// Serialize a resolved icon as a complete inline `<svg>` element.
///
/// The attribute map keeps insertion order, so output is deterministic:
/// base attributes first (`xmlns`, `viewBox`, `width`, `height`,
/// `aria-hidden`, `fill`), then `class`, then caller-supplied data/aria/
/// extra attributes in the order they were added. When an `aria-label`
/// ends up in the map the icon is meaningful rather than decorative, so
/// `aria-hidden` is dropped and `role="img"` is set.
///
/// The body is sanitized before inlining; attribute values are escaped
/// for `&`, `"`, `<`, and `>`.
pub fn render(record: &IconRecord, options: &RenderOptions) -> String {
    let body = sanitize_svg(&record.body);

    let mut attrs: IndexMap<String, String> = IndexMap::new();
    attrs.insert("xmlns".into(), SVG_XMLNS.into());
    attrs.insert(
        "viewBox".into(),
        format!("0 0 {} {}", record.width, record.height),
    );
    attrs.insert("width".into(), "1em".into());
    attrs.insert("height".into(), "1em".into());
    attrs.insert("aria-hidden".into(), "true".into());
    attrs.insert("fill".into(), "none".into());

    if let Some(class) = options.css_class.as_deref() {
        if !class.is_empty() {
            attrs.insert("class".into(), class.to_string());
        }
    }

    for (key, value) in &options.data {
        attrs.insert(format!("data-{}", hyphenate(key)), value.clone());
    }
    for (key, value) in &options.aria {
        attrs.insert(format!("aria-{}", hyphenate(key)), value.clone());
    }
    for (key, value) in &options.attrs {
        attrs.insert(hyphenate(key), value.clone());
    }

    if attrs.contains_key("aria-label") {
        attrs.shift_remove("aria-hidden");
        attrs.insert("role".into(), "img".into());
    }

    let attr_str = attrs
        .iter()
        .map(|(key, value)| format!(r#"{key}="{}""#, escape_attr(value)))
        .collect::<Vec<_>>()
        .join(" ");

    format!("<svg {attr_str}>{body}</svg>")
}

fn hyphenate(key: &str) -> String {
    key.replace('_', "-")
}

fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
