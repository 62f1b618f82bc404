//! `booklend-auth` — authentication/authorization boundary.
//!
//! This crate is intentionally decoupled from HTTP and storage. The rest of
//! the system consumes exactly what the permission contract promises: a user
//! identifier and a staff flag.

pub mod claims;
pub mod jwt;
pub mod principal;

pub use claims::{JwtClaims, TokenValidationError, validate_claims};
pub use jwt::{Hs256JwtValidator, JwtValidator};
pub use principal::{AuthzError, Principal, require_staff};
