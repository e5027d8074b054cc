pub mod availability;
pub mod hooks;
pub mod plugins;

#[cfg(test)]
pub mod test_utils;

pub use availability::*;
pub use hooks::*;
pub use plugins::*;
