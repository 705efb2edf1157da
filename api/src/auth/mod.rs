//! Authentication
//!
//! Password hashing, JWT issuing and the request identity middleware.

pub mod identity;
pub mod jwt;
pub mod password;

pub use identity::{identity_middleware, CurrentUser};
pub use jwt::{IssuedTokens, TokenIssuer};
pub use password::{hash_password, verify_password};
