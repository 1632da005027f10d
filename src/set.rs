//! Iconify icon set parsing, alias resolution, and transforms
//!
//! An Iconify JSON file contains a flat map of icon bodies, optional
//! aliases (which reference a parent icon and may apply transforms like
//! rotate/flip), and set-level defaults for width/height.
//!
//! Sets are loaded from two sources:
//! - **Vendored** JSON files on disk ([`IconSet::from_vendor`])
//! - **Bundled** gzip archives ([`IconSet::from_bundled`])

use std::collections::HashMap;
use std::fs;
use std::io::Read;
use std::path::Path;

use flate2::read::GzDecoder;

use crate::error::{IconError, IconResult};
use crate::types::{AliasEntry, IconEntry, IconRecord, IconSetData};

/// Maximum alias chain length followed before resolution gives up.
/// Guards against cyclic alias graphs.
pub const MAX_ALIAS_DEPTH: usize = 5;

/// Outcome of following an alias chain.
#[derive(Debug, PartialEq, Eq)]
enum AliasTarget {
    /// Chain ended at this concrete icon name
    Resolved(String),
    /// Chain exceeded [`MAX_ALIAS_DEPTH`] hops (cycle or degenerate data)
    CycleOrTooDeep,
    /// A parent reference is neither an alias nor a concrete icon
    Dangling,
}

/// One parsed Iconify icon set for a single prefix.
///
/// Immutable after construction and safe for unsynchronized concurrent
/// reads; the resolver shares sets across threads behind an `Arc`.
#[derive(Debug, Clone)]
pub struct IconSet {
    prefix: String,
    icons: HashMap<String, IconEntry>,
    aliases: HashMap<String, AliasEntry>,
    default_width: u32,
    default_height: u32,
    display_name: Option<String>,
}

impl IconSet {
    /// Build a set from parsed Iconify JSON data. Missing set-level
    /// dimensions default to 24.
    pub fn new(prefix: impl Into<String>, data: IconSetData) -> Self {
        Self {
            prefix: prefix.into(),
            icons: data.icons,
            aliases: data.aliases,
            default_width: data.width.unwrap_or(24),
            default_height: data.height.unwrap_or(24),
            display_name: data.info.name,
        }
    }

    /// The icon set prefix (e.g. `"lucide"`)
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Default SVG width for icons in this set
    pub fn default_width(&self) -> u32 {
        self.default_width
    }

    /// Default SVG height for icons in this set
    pub fn default_height(&self) -> u32 {
        self.default_height
    }

    /// Human-readable display name from the set metadata, falling back
    /// to the prefix.
    pub fn display_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.prefix)
    }

    /// Look up an icon by name, resolving aliases and applying transforms.
    ///
    /// Concrete icons are returned as-is. Alias lookups follow parent
    /// links up to [`MAX_ALIAS_DEPTH`] hops; only the alias named by the
    /// caller contributes rotate/flip/size overrides, never an ancestor
    /// in a multi-hop chain.
    pub fn icon(&self, name: &str) -> Option<IconRecord> {
        if let Some(entry) = self.icons.get(name) {
            return Some(self.build_record(entry, None));
        }

        match self.resolve_alias(name) {
            AliasTarget::Resolved(parent) => {
                let entry = self.icons.get(&parent)?;
                Some(self.build_record(entry, self.aliases.get(name)))
            }
            AliasTarget::CycleOrTooDeep | AliasTarget::Dangling => None,
        }
    }

    /// All icon names including aliases. Order is unspecified.
    pub fn icon_names(&self) -> Vec<String> {
        self.icons
            .keys()
            .chain(self.aliases.keys())
            .cloned()
            .collect()
    }

    /// Number of concrete (non-alias) icons in the set
    pub fn icon_count(&self) -> usize {
        self.icons.len()
    }

    /// Follow parent links until a concrete icon is found, with a bounded
    /// loop instead of recursion.
    fn resolve_alias(&self, name: &str) -> AliasTarget {
        let mut current = name;
        for _ in 0..=MAX_ALIAS_DEPTH {
            let Some(entry) = self.aliases.get(current) else {
                return AliasTarget::Dangling;
            };
            if self.icons.contains_key(entry.parent.as_str()) {
                return AliasTarget::Resolved(entry.parent.clone());
            }
            current = entry.parent.as_str();
        }
        AliasTarget::CycleOrTooDeep
    }

    /// Build the record for a concrete icon entry, optionally applying an
    /// alias's transforms and dimension overrides. Transform origins use
    /// the pre-override dimensions.
    fn build_record(&self, entry: &IconEntry, alias: Option<&AliasEntry>) -> IconRecord {
        let mut body = entry.body.clone();
        let mut width = entry.width.unwrap_or(self.default_width);
        let mut height = entry.height.unwrap_or(self.default_height);

        if let Some(alias) = alias {
            body = apply_transforms(&body, alias, width, height);
            width = alias.width.unwrap_or(width);
            height = alias.height.unwrap_or(height);
        }

        IconRecord {
            body,
            width,
            height,
        }
    }

    /// Load an icon set from a vendored JSON file on disk.
    ///
    /// Returns `Ok(None)` when the file does not exist; a file that exists
    /// but fails to parse is a hard [`IconError::MalformedDataset`].
    pub fn from_vendor(prefix: &str, vendor_dir: &Path) -> IconResult<Option<IconSet>> {
        let path = vendor_dir.join(format!("{prefix}.json"));
        if !path.exists() {
            return Ok(None);
        }

        let raw = fs::read_to_string(&path)?;
        let data = parse_set_data(prefix, &raw)?;
        Ok(Some(IconSet::new(prefix, data)))
    }

    /// Load an icon set from a bundled gzip archive.
    ///
    /// Decompresses entirely in memory; no temp files are written. Same
    /// existence/parse-failure semantics as [`IconSet::from_vendor`].
    pub fn from_bundled(prefix: &str, bundled_dir: &Path) -> IconResult<Option<IconSet>> {
        let path = bundled_dir.join(format!("{prefix}.json.gz"));
        if !path.exists() {
            return Ok(None);
        }

        let gz_data = fs::read(&path)?;
        let mut raw = String::new();
        GzDecoder::new(gz_data.as_slice()).read_to_string(&mut raw)?;
        let data = parse_set_data(prefix, &raw)?;
        Ok(Some(IconSet::new(prefix, data)))
    }

    /// Prefixes of all vendored icon sets found on disk, sorted ascending.
    /// A missing or unreadable vendor directory yields an empty list.
    pub fn vendored_prefixes(vendor_dir: &Path) -> Vec<String> {
        let Ok(entries) = fs::read_dir(vendor_dir) else {
            return Vec::new();
        };

        let mut prefixes: Vec<String> = entries
            .filter_map(|entry| {
                let path = entry.ok()?.path();
                if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                    return None;
                }
                path.file_stem()
                    .and_then(|stem| stem.to_str())
                    .map(String::from)
            })
            .collect();
        prefixes.sort();
        prefixes
    }
}

fn parse_set_data(prefix: &str, raw: &str) -> IconResult<IconSetData> {
    serde_json::from_str(raw).map_err(|source| IconError::MalformedDataset {
        prefix: prefix.to_string(),
        source,
    })
}

/// Wrap the SVG body in a `<g transform="...">` element to apply rotation
/// and/or flip transforms from an alias definition.
///
/// Transform parts compose left to right: `rotate(degrees cx cy)` first
/// (degrees = quarter turns x 90, centered on the icon), then
/// `translate(tx ty) scale(sx sy)` for flips. A body with no transform
/// flags passes through unwrapped.
fn apply_transforms(body: &str, alias: &AliasEntry, width: u32, height: u32) -> String {
    let mut parts = Vec::new();

    if let Some(rotate) = alias.rotate {
        let degrees = rotate * 90;
        parts.push(format!(
            "rotate({degrees} {} {})",
            format_center(width),
            format_center(height)
        ));
    }

    let scale_x: i32 = if alias.h_flip.unwrap_or(false) { -1 } else { 1 };
    let scale_y: i32 = if alias.v_flip.unwrap_or(false) { -1 } else { 1 };

    if scale_x != 1 || scale_y != 1 {
        let tx = if scale_x == -1 { width } else { 0 };
        let ty = if scale_y == -1 { height } else { 0 };
        if tx != 0 || ty != 0 {
            parts.push(format!("translate({tx} {ty})"));
        }
        parts.push(format!("scale({scale_x} {scale_y})"));
    }

    if parts.is_empty() {
        body.to_string()
    } else {
        format!(r#"<g transform="{}">{body}</g>"#, parts.join(" "))
    }
}

/// Half a dimension, formatted without a trailing `.0` for even values.
fn format_center(value: u32) -> String {
    if value % 2 == 0 {
        (value / 2).to_string()
    } else {
        format!("{}", f64::from(value) / 2.0)
    }
}
