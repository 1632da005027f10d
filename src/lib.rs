//! Inline SVG icon resolution from Iconify JSON icon sets
//!
//! Resolves a named icon (e.g. `"lucide:check"`) to renderable SVG markup
//! by searching, in priority order: an in-memory cache, already-parsed
//! icon sets, vendored JSON files on disk, bundled gzip archives, and
//! optionally a remote API. The result is rendered as a sanitized,
//! attribute-customizable inline `<svg>` string.
//!
//! # Features
//!
//! - **Layered resolution cascade** with per-process set registry and
//!   icon-level memoization
//! - **Alias and transform resolution** for the Iconify JSON schema
//!   (parent links, rotate/flip overrides, dimension overrides)
//! - **Security-focused SVG sanitization** that strips scriptable markup
//!   while preserving visual fidelity
//! - **Thread-safe by construction**: immutable sets, coarse-locked
//!   cache and registry, stateless rendering
//!
//! # Example usage
//!
//! ```no_run
//! use icon_resolver::{Configuration, IconContext, RenderOptions};
//!
//! let ctx = IconContext::new(Configuration::default());
//! let options = RenderOptions::new().with_class("w-5 h-5");
//! if let Some(svg) = ctx.svg("lucide:check", &options).unwrap() {
//!     println!("{svg}");
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod api;
pub mod cache;
pub mod config;
pub mod context;
pub mod error;
pub mod render;
pub mod resolver;
pub mod sanitize;
pub mod set;
pub mod types;

pub use api::{ApiClient, FallbackSource, API_BASE};
pub use cache::Cache;
pub use config::Configuration;
pub use context::IconContext;
pub use error::{IconError, IconResult};
pub use render::render;
pub use resolver::{parse_name, Resolver};
pub use sanitize::sanitize_svg;
pub use set::{IconSet, MAX_ALIAS_DEPTH};
pub use types::{IconRecord, RenderOptions};
