//! HTTP middleware stack for the portal.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layers (capture errors, outermost)
//! 2. `TraceLayer` (request tracing)
//! 3. CORS (frontend origin)
//! 4. Access guard: authenticate (bearer session on mutating requests)
//! 5. Access guard: authorize (role table lookup)

pub mod auth;

pub use auth::{authenticate, authorize, required_roles};
