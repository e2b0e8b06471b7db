//! `aula-auth` — session token handling.
//!
//! The session token is a bearer credential minted by the backend on login.
//! This crate decodes its claims (for UI gating only; the server re-validates
//! every call), checks expiry, and owns the one piece of durable client state:
//! the token store.

pub mod claims;
pub mod roles;
pub mod store;

pub use claims::{SessionClaims, TokenError, decode_claims, validate_session};
pub use roles::Role;
pub use store::{FileTokenStore, MemoryTokenStore, StoreError, TokenStore};
