//! SVG body sanitization
//!
//! Icon bodies come from third-party datasets and, with the API fallback
//! enabled, straight from the network. Before a body is inlined into a
//! page it is rewritten through a streaming XML pass that removes markup
//! capable of executing code or navigating to unsafe URIs, while leaving
//! structural and presentational SVG untouched.

use std::io::Cursor;

use quick_xml::events::{BytesStart, Event};
use quick_xml::{Reader, Writer};

/// Elements removed entirely, subtree included. Matched case-insensitively
/// against the local tag name.
const BLOCKED_ELEMENTS: [&str; 5] = ["script", "foreignobject", "iframe", "object", "embed"];

/// Rewrite an SVG fragment with unsafe markup removed.
///
/// - Blocked elements (`script`, `foreignObject`, `iframe`, `object`,
///   `embed`) are dropped with their whole subtree; descendants are
///   skipped without being inspected.
/// - `on*` event handler attributes are stripped from every element.
/// - `href`/`xlink:href` attributes whose value starts with `javascript:`
///   (after optional leading whitespace, any case) are stripped.
///
/// Everything else passes through unchanged. A structurally invalid body
/// sanitizes to an empty string.
pub fn sanitize_svg(body: &str) -> String {
    if body.is_empty() {
        return String::new();
    }

    match sanitize_events(body) {
        Ok(clean) => clean,
        Err(e) => {
            log::warn!("Rejecting malformed SVG body: {e}");
            String::new()
        }
    }
}

fn sanitize_events(body: &str) -> Result<String, quick_xml::Error> {
    let mut reader = Reader::from_str(body);
    // Fragments from icon datasets are not always perfectly balanced;
    // mismatched end tags inside a skipped subtree must not abort the pass.
    reader.config_mut().check_end_names = false;

    let mut writer = Writer::new(Cursor::new(Vec::new()));
    // Depth inside a blocked element; 0 means we are emitting.
    let mut skip_depth = 0usize;

    loop {
        match reader.read_event()? {
            Event::Start(start) => {
                if skip_depth > 0 {
                    skip_depth += 1;
                } else if is_blocked(start.local_name().as_ref()) {
                    skip_depth = 1;
                } else {
                    writer.write_event(Event::Start(filter_attributes(&start)))?;
                }
            }
            Event::Empty(start) => {
                if skip_depth == 0 && !is_blocked(start.local_name().as_ref()) {
                    writer.write_event(Event::Empty(filter_attributes(&start)))?;
                }
            }
            Event::End(end) => {
                if skip_depth > 0 {
                    skip_depth -= 1;
                } else {
                    writer.write_event(Event::End(end))?;
                }
            }
            // Declarations, processing instructions, doctypes, and comments
            // have no business inside an icon body.
            Event::Decl(_) | Event::PI(_) | Event::DocType(_) | Event::Comment(_) => {}
            Event::Eof => break,
            other => {
                if skip_depth == 0 {
                    writer.write_event(other)?;
                }
            }
        }
    }

    let bytes = writer.into_inner().into_inner();
    Ok(String::from_utf8(bytes).unwrap_or_default())
}

fn is_blocked(local_name: &[u8]) -> bool {
    BLOCKED_ELEMENTS
        .iter()
        .any(|blocked| local_name.eq_ignore_ascii_case(blocked.as_bytes()))
}

/// Copy an element, dropping event handler attributes and script-scheme
/// hrefs. Name and attribute order are preserved.
fn filter_attributes(elem: &BytesStart) -> BytesStart<'static> {
    let name = String::from_utf8_lossy(elem.name().as_ref()).into_owned();
    let mut clean = BytesStart::new(name);

    for attr in elem.attributes().with_checks(false).flatten() {
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let key_lower = key.to_ascii_lowercase();
        if key_lower.starts_with("on") {
            continue;
        }

        let value = match attr.unescape_value() {
            Ok(value) => value.into_owned(),
            Err(_) => String::from_utf8_lossy(&attr.value).into_owned(),
        };
        if is_href(&key_lower) && is_javascript_uri(&value) {
            continue;
        }

        clean.push_attribute((key.as_str(), value.as_str()));
    }

    clean
}

fn is_href(key_lower: &str) -> bool {
    key_lower == "href" || key_lower == "xlink:href"
}

fn is_javascript_uri(value: &str) -> bool {
    value
        .trim_start()
        .to_ascii_lowercase()
        .starts_with("javascript:")
}
