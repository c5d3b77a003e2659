//! # jagung
//!
//! Live section search for static information pages about corn, plus the
//! toy yield predictor those pages carry.
//!
//! A markdown page is built into a small element tree: a header, then a
//! container of content sections split at level-2 headings. A
//! [`SearchFilter`] bound to that tree hides every section whose text does
//! not contain the query and wraps each match in a highlight marker. The
//! markers are removed again before the next query is applied, so the text
//! content of the page never changes.
//!
//! ## Example
//!
//! ```rust
//! use jagung::parser::{PageOptions, build_page};
//! use jagung::search::{FilterOptions, SearchFilter, section_views};
//!
//! let markdown = "## Jenis Jagung\nJagung Hibrida memiliki hasil tinggi.\n\n## Pupuk\nUrea dan SP-36.\n";
//!
//! let mut doc = build_page(markdown, &PageOptions::default());
//! let mut filter = SearchFilter::attach(&doc, FilterOptions::default()).unwrap();
//!
//! let summary = filter.set_query(&mut doc, "hibrida");
//! assert_eq!((summary.visible, summary.hidden), (1, 1));
//!
//! for view in section_views(&doc, &filter).iter().filter(|v| v.visible) {
//!     println!("{} ({} matches)", view.title, view.marker_count());
//! }
//!
//! // Clearing the query shows everything again and leaves no markers
//! let summary = filter.set_query(&mut doc, "");
//! assert_eq!((summary.visible, summary.markers), (2, 0));
//! ```

/// Configuration module for persisting user preferences.
///
/// Holds the dark mode flag and search settings, stored as TOML.
pub mod config;

/// Minimal element tree the page is built into and the filter mutates.
pub mod dom;

pub mod error;

/// Parser module for markdown pages.
///
/// Builds the header, container and content sections of a page.
pub mod parser;

/// Yield predictor with `id-ID` number formatting.
pub mod prediction;

/// Section filter, match highlighting and segment rendering.
pub mod search;

/// TUI module for the interactive search view.
pub mod tui;

// Re-export commonly used types for convenience
pub use config::Config;
pub use dom::Document;
pub use parser::{PageOptions, build_page, parse_file};
pub use search::{FilterOptions, SearchFilter, Segment, render_section};
pub use tui::App;
