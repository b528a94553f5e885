pub mod handler;
pub mod orbit;
pub mod scene;
pub mod source;
