///! Orbit uniqueness engine
///!
///! ## Main Components
///! - `SatelliteStore`: read-only records keyed by NORAD ID
///! - `filter_by_class` / `rank_top_bottom`: per-class most/least unique tables
///! - `PathHighlighter`: the only owner of highlighted-path state
///! - `resolve`: search and neighbour lookup, including "random"
///! - `OrbitExplorer`: entry points driven by UI events

mod error;
pub use error::{ExplorerError, RenderError};

mod store;
pub use store::SatelliteStore;

mod filter;
pub use filter::filter_by_class;

mod ranker;
pub use ranker::{rank_top_bottom, Ranking, DEFAULT_RANKING_SIZE};

mod highlight;
pub use highlight::PathHighlighter;

mod resolver;
pub use resolver::{resolve, is_random_query, ResolvedSearch, RANDOM_QUERY};

mod explorer;
pub use explorer::OrbitExplorer;

#[cfg(test)]
mod test_support;
