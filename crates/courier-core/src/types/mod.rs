//! Core types for Courier

mod delivery;
mod message;
mod notification;

pub use delivery::*;
pub use message::*;
pub use notification::*;
