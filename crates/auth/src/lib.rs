//! `salonops-auth` — authentication boundary and role routing.
//!
//! The hosted identity provider is an external collaborator: this crate
//! models its surface (credential sign-in, sign-out, auth-state stream) as
//! a trait, resolves the signed-in user's profile/role from the `users` and
//! `customers` collections, and decides where each role lands.

pub mod authenticator;
pub mod client;
pub mod roles;
pub mod session;

pub use authenticator::{Authenticator, Profile};
pub use client::{AuthClient, AuthError, AuthUser, InMemoryAuthClient};
pub use roles::Role;
pub use session::{CUSTOMER_AUTH_KEY, InMemorySessionCache, SessionCache, USER_KEY};
