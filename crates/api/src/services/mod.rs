//! Business services for the billing portal.
//!
//! - [`auth`] - Google login and session token issuance/verification
//! - [`billing`] - Billing record operations and their business rules
//! - [`google`] - Google ID-token verification against the issuer's keys

pub mod auth;
pub mod billing;
pub mod google;

pub use auth::{AuthError, AuthService};
pub use billing::{BillingError, BillingService};
pub use google::GoogleVerifier;
