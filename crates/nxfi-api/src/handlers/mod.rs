//! Handler modules

pub mod actions_json;
pub mod health;
pub mod supply;

pub use actions_json::actions_json;
pub use health::health_check;
pub use supply::*;
