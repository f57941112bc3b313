//! Domain models for the billing portal.

pub mod billing;
pub mod claims;

pub use billing::BillingRecord;
pub use claims::SessionClaims;
