//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `PaymentGateway` - Outbound payment operations used by the billing layer
//! - `GatewayTransport` - HTTP transport underneath the gateway client

mod gateway_transport;
mod payment_gateway;

pub use gateway_transport::{GatewayTransport, TransportError, TransportResponse};
pub use payment_gateway::{Money, OneTimeChargeRequest, PaymentGateway, RecurringChargeRequest};
