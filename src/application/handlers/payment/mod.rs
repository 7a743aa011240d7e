//! Payment handlers.
//!
//! ## Commands
//! - Processing Adyen notification batches

mod handle_notification;

pub use handle_notification::{
    HandleNotificationCommand, HandleNotificationHandler, HandleNotificationResult,
    ProcessedNotification,
};
