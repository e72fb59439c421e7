//! # Push Notifications
//!
//! Client for the external push notification endpoint.

pub mod client;
pub mod error;

pub use client::{Message, Notification, PushClient};
pub use error::{PushError, PushResult};
