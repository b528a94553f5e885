//! Shared data types for the orbit explorer: satellite records, orbit classes,
//! path colours and the render instructions sent back to UI clients.

mod types;
pub use types::*;

mod view;
pub use view::*;
