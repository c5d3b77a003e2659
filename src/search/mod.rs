//! Search module
//!
//! Filters the content sections of a page by a live query and highlights
//! the matching text. Sections whose text does not contain the query are
//! hidden; matches inside the remaining sections are wrapped in marker
//! elements that are removed again before the next query is applied.

mod filter;
pub mod highlight;
mod matcher;
mod segment;
mod view;

pub use filter::{FilterOptions, FilterSummary, SearchFilter};
pub use matcher::{MatchMode, QueryMatcher};
pub use segment::{Segment, join_segments, render_section, render_with};
pub use view::{SectionView, section_view, section_views};
