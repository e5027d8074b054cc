pub mod cli;
pub mod config;
pub mod picker;
pub mod render;

pub use cli::*;
pub use config::*;
pub use picker::*;
pub use render::*;
