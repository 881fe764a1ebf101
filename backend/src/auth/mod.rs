//! Authentication module
//!
//! Validates JWT access tokens issued by the identity backend.

mod jwt;
mod middleware;

pub use jwt::{Claims, JwtService};
pub use middleware::AuthUser;
