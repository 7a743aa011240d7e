//! Adyen Gateway - Adyen payment gateway integration
//!
//! Authenticates inbound Adyen notification batches with HMAC-SHA256,
//! normalizes them into provider-agnostic payment details and issues
//! outbound payment operations against the Checkout and Recurring APIs.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
