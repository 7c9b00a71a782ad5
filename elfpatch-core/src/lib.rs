pub mod editor;
pub mod header;
pub mod patch;

pub use editor::*;
pub use patch::*;
