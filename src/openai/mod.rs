pub mod client;
pub mod core;

pub use self::client::*;
pub use self::core::*;
