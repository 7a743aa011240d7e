//! Application handlers.
//!
//! Command handlers that orchestrate domain operations.

pub mod payment;

pub use payment::{
    HandleNotificationCommand, HandleNotificationHandler, HandleNotificationResult,
    ProcessedNotification,
};
