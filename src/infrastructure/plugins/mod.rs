pub mod recorder;
pub mod simple_logger;

pub use recorder::*;
pub use simple_logger::*;
