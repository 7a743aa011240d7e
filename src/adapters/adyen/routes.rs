//! Adyen route table and API base URLs.
//!
//! Operations map to routes through an exhaustive match, so a missing route
//! is a compile error rather than a runtime lookup failure.

use crate::domain::payment::GatewayEnvironment;

/// Placeholder substituted with the payment id in path templates.
const PAYMENT_ID_PLACEHOLDER: &str = ":payment_id";

/// Adyen API surface a route lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiSurface {
    /// Checkout API (payments, captures, refunds).
    Checkout,
    /// Classic platform API (recurring contract management).
    Pal,
}

/// Outbound operations supported by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    CapturePayment,
    RefundPayment,
    ChargeRecurringSubscription,
    CancelRecurringSubscription,
    ValidateCredentials,
    ChargeOnetime,
    PaymentDetails,
}

impl Operation {
    pub const ALL: [Operation; 7] = [
        Operation::CapturePayment,
        Operation::RefundPayment,
        Operation::ChargeRecurringSubscription,
        Operation::CancelRecurringSubscription,
        Operation::ValidateCredentials,
        Operation::ChargeOnetime,
        Operation::PaymentDetails,
    ];

    /// Route for this operation.
    pub const fn route(self) -> Route {
        match self {
            Operation::CapturePayment => Route {
                path: "/v67/payments/:payment_id/captures",
                api: ApiSurface::Checkout,
            },
            Operation::RefundPayment => Route {
                path: "/v67/payments/:payment_id/refunds",
                api: ApiSurface::Checkout,
            },
            Operation::ChargeRecurringSubscription => Route {
                path: "/v67/payments",
                api: ApiSurface::Checkout,
            },
            Operation::CancelRecurringSubscription => Route {
                path: "/Recurring/v49/disable",
                api: ApiSurface::Pal,
            },
            Operation::ValidateCredentials => Route {
                path: "/v67/paymentMethods",
                api: ApiSurface::Checkout,
            },
            Operation::ChargeOnetime => Route {
                path: "/v67/payments",
                api: ApiSurface::Checkout,
            },
            Operation::PaymentDetails => Route {
                path: "/v67/payments/details",
                api: ApiSurface::Checkout,
            },
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::CapturePayment => "capture_payment",
            Operation::RefundPayment => "refund_payment",
            Operation::ChargeRecurringSubscription => "charge_recurring_subscription",
            Operation::CancelRecurringSubscription => "cancel_recurring_subscription",
            Operation::ValidateCredentials => "validate_credentials",
            Operation::ChargeOnetime => "charge_onetime",
            Operation::PaymentDetails => "payment_details",
        }
    }
}

/// Path template plus the API surface it is resolved against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub path: &'static str,
    pub api: ApiSurface,
}

impl Route {
    /// Renders the path, substituting the percent-encoded payment id when the
    /// template has one.
    pub fn render_path(&self, payment_id: Option<&str>) -> String {
        match payment_id {
            Some(id) => self
                .path
                .replace(PAYMENT_ID_PLACEHOLDER, &urlencoding::encode(id)),
            None => self.path.to_string(),
        }
    }

    pub fn requires_payment_id(&self) -> bool {
        self.path.contains(PAYMENT_ID_PLACEHOLDER)
    }
}

/// Base URLs of both API surfaces for one environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    checkout: String,
    pal: String,
}

impl Endpoints {
    /// Standard Adyen endpoints for an environment.
    pub fn for_environment(environment: GatewayEnvironment) -> Self {
        match environment {
            GatewayEnvironment::Sandbox => Self {
                checkout: "https://checkout-test.adyen.com/checkout".to_string(),
                pal: "https://pal-test.adyen.com/pal/servlet".to_string(),
            },
            GatewayEnvironment::Live => Self {
                checkout: "https://checkout.adyen.com/checkout".to_string(),
                pal: "https://pal.adyen.com/pal/servlet".to_string(),
            },
        }
    }

    /// Custom base URLs (for testing).
    pub fn custom(checkout: impl Into<String>, pal: impl Into<String>) -> Self {
        Self {
            checkout: checkout.into(),
            pal: pal.into(),
        }
    }

    pub fn base_url(&self, api: ApiSurface) -> &str {
        match api {
            ApiSurface::Checkout => &self.checkout,
            ApiSurface::Pal => &self.pal,
        }
    }

    /// Absolute URL for an operation.
    pub fn url_for(&self, operation: Operation, payment_id: Option<&str>) -> String {
        let route = operation.route();
        format!(
            "{}{}",
            self.base_url(route.api).trim_end_matches('/'),
            route.render_path(payment_id)
        )
    }
}
