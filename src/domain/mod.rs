pub mod calendar;
pub mod date_range;
pub mod hover;
pub mod period;
pub mod validation;
pub mod window;

pub use calendar::*;
pub use date_range::*;
pub use hover::*;
pub use period::*;
pub use validation::*;
pub use window::*;
