//! Core data types for icon resolution and rendering

use indexmap::IndexMap;
use serde::Deserialize;
use std::collections::HashMap;

/// A fully resolved icon: inner SVG markup plus its view box dimensions.
///
/// `body` is the markup *inside* the `<svg>` element, never the outer
/// element itself. Records are immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconRecord {
    /// Inner SVG markup (no outer `<svg>` element)
    pub body: String,
    /// View box width
    pub width: u32,
    /// View box height
    pub height: u32,
}

/// Raw icon entry from an Iconify JSON document.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct IconEntry {
    /// Inner SVG markup for this icon
    pub body: String,
    /// Per-icon width override
    pub width: Option<u32>,
    /// Per-icon height override
    pub height: Option<u32>,
}

/// Alias entry: points at a parent icon, optionally with transform
/// and dimension overrides.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AliasEntry {
    /// Name of the parent icon or alias
    pub parent: String,
    /// Quarter-turn rotation count (1 = 90 degrees)
    pub rotate: Option<i32>,
    /// Horizontal flip
    #[serde(rename = "hFlip")]
    pub h_flip: Option<bool>,
    /// Vertical flip
    #[serde(rename = "vFlip")]
    pub v_flip: Option<bool>,
    /// Width override
    pub width: Option<u32>,
    /// Height override
    pub height: Option<u32>,
}

/// Set-level metadata block (`info` key).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct SetInfo {
    /// Human-readable display name of the set
    pub name: Option<String>,
}

/// Top-level Iconify JSON document for one icon set.
///
/// Every key is optional; missing maps default to empty and missing
/// dimensions fall back to 24 at [`IconSet`](crate::set::IconSet)
/// construction time. Unknown keys are ignored.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct IconSetData {
    /// Concrete icons keyed by name
    pub icons: HashMap<String, IconEntry>,
    /// Aliases keyed by name
    pub aliases: HashMap<String, AliasEntry>,
    /// Set-level default width
    pub width: Option<u32>,
    /// Set-level default height
    pub height: Option<u32>,
    /// Set metadata
    pub info: SetInfo,
}

/// Caller-supplied attribute options for a single render call.
///
/// The three maps are ordered: attributes appear in the output in the
/// order they were inserted. Underscores in keys become hyphens in the
/// rendered attribute names.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Value of the `class` attribute; omitted when empty
    pub css_class: Option<String>,
    /// Expanded to `data-*` attributes
    pub data: IndexMap<String, String>,
    /// Expanded to `aria-*` attributes
    pub aria: IndexMap<String, String>,
    /// Arbitrary extra attributes, emitted as-is (hyphenated)
    pub attrs: IndexMap<String, String>,
}

impl RenderOptions {
    /// Create empty options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the CSS class
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.css_class = Some(class.into());
        self
    }

    /// Add a `data-*` attribute
    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    /// Add an `aria-*` attribute
    pub fn with_aria(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.aria.insert(key.into(), value.into());
        self
    }

    /// Add an arbitrary attribute
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }
}
