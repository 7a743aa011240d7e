//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `payment` - Notification authentication, normalization and payment results

pub mod payment;
