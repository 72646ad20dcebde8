//! Tracing configuration for debugging closure resolution.
//!
//! Supports three output formats controlled by `HERITAGE_LOG_FORMAT`:
//!
//! - `text` (default): standard `tracing-subscriber` flat output
//! - `tree`: hierarchical indented output via `tracing-tree`, one level per
//!   nested `resolve_closure` span
//! - `json`: one JSON object per span/event
//!
//! ## Quick start
//!
//! ```bash
//! HERITAGE_LOG=debug HERITAGE_LOG_FORMAT=tree heritage resolve --hierarchy h.json 'D1'
//! HERITAGE_LOG=debug HERITAGE_LOG_FORMAT=json heritage resolve --hierarchy h.json 'A2[int]'
//! HERITAGE_LOG="heritage_solver::walker=trace" heritage mro --hierarchy h.json D1
//! ```
//!
//! The subscriber is only initialised when `HERITAGE_LOG` (or `RUST_LOG`) is
//! set.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

/// Tracing output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Standard flat text lines (default).
    Text,
    /// Hierarchical indented tree via `tracing-tree`.
    Tree,
    /// Newline-delimited JSON objects.
    Json,
}

impl LogFormat {
    /// Parse a format name; unknown names fall back to `Text`.
    pub fn parse(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "tree" => Self::Tree,
            "json" => Self::Json,
            _ => Self::Text,
        }
    }

    fn from_env() -> Self {
        Self::parse(&std::env::var("HERITAGE_LOG_FORMAT").unwrap_or_default())
    }
}

/// Build an `EnvFilter` from `HERITAGE_LOG`, falling back to `RUST_LOG`.
fn build_filter() -> EnvFilter {
    if let Ok(val) = std::env::var("HERITAGE_LOG") {
        EnvFilter::builder().parse_lossy(val)
    } else {
        EnvFilter::from_default_env()
    }
}

/// Initialise the global tracing subscriber.
///
/// Does nothing when neither `HERITAGE_LOG` nor `RUST_LOG` is set. All
/// output goes to stderr so it never mixes with closures printed on stdout.
pub fn init_tracing() {
    let has_heritage_log = std::env::var("HERITAGE_LOG").is_ok();
    let has_rust_log = std::env::var("RUST_LOG").is_ok();
    if !has_heritage_log && !has_rust_log {
        return;
    }

    let filter = build_filter();

    match LogFormat::from_env() {
        LogFormat::Tree => {
            let tree_layer = tracing_tree::HierarchicalLayer::default()
                .with_indent_amount(2)
                .with_indent_lines(true)
                .with_deferred_spans(true)
                .with_span_retrace(true)
                .with_targets(true);

            Registry::default().with(filter).with(tree_layer).init();
        }
        LogFormat::Json => {
            let json_layer = fmt::layer().json().with_writer(std::io::stderr);

            Registry::default().with(filter).with(json_layer).init();
        }
        LogFormat::Text => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}
