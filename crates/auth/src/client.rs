use std::collections::HashMap;
use std::sync::{Mutex, RwLock, mpsc};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use salonops_core::UserId;
use salonops_store::Subscription;

/// Authentication failure.
///
/// `Display` renders the user-facing message shown on the login form; the
/// provider's raw code travels in the variant payload where one exists.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("User not found")]
    UserNotFound,

    #[error("Incorrect password")]
    WrongPassword,

    #[error("Invalid email address")]
    InvalidEmail,

    #[error("Invalid email or password")]
    InvalidCredential,

    /// Signed in, but no matching profile in the `users` collection.
    #[error("User not found in database")]
    ProfileNotFound,

    /// Signed in as a customer, but no matching `customers` document.
    #[error("Customer not found in database")]
    CustomerNotFound,

    /// Profile lookup against the document store failed.
    #[error("Login failed")]
    ProfileLookup(String),

    /// Any other provider failure.
    #[error("Login failed")]
    Provider(String),
}

/// The provider's view of a signed-in user: uid plus verified email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub uid: UserId,
    pub email: String,
}

/// Hosted authentication provider boundary.
///
/// Sign-in is credential-based; `auth_state` is a standing stream that
/// delivers the current user on subscribe and `Some`/`None` on every
/// subsequent sign-in/sign-out. Dropping the subscription cancels it.
pub trait AuthClient: Send + Sync {
    fn sign_in(&self, email: &str, password: &str) -> Result<AuthUser, AuthError>;

    fn sign_out(&self) -> Result<(), AuthError>;

    fn auth_state(&self) -> Subscription<Option<AuthUser>>;
}

impl<A> AuthClient for std::sync::Arc<A>
where
    A: AuthClient + ?Sized,
{
    fn sign_in(&self, email: &str, password: &str) -> Result<AuthUser, AuthError> {
        (**self).sign_in(email, password)
    }

    fn sign_out(&self) -> Result<(), AuthError> {
        (**self).sign_out()
    }

    fn auth_state(&self) -> Subscription<Option<AuthUser>> {
        (**self).auth_state()
    }
}

/// In-memory authentication provider for tests/dev.
#[derive(Default)]
pub struct InMemoryAuthClient {
    accounts: RwLock<HashMap<String, (String, UserId)>>,
    current: Mutex<Option<AuthUser>>,
    listeners: Mutex<Vec<mpsc::Sender<Option<AuthUser>>>>,
}

impl core::fmt::Debug for InMemoryAuthClient {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("InMemoryAuthClient").finish_non_exhaustive()
    }
}

impl InMemoryAuthClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an account and return its uid.
    pub fn register(&self, email: &str, password: &str) -> UserId {
        let uid = UserId::new();
        if let Ok(mut accounts) = self.accounts.write() {
            accounts.insert(email.to_string(), (password.to_string(), uid.clone()));
        }
        uid
    }

    fn broadcast(&self, state: Option<AuthUser>) {
        if let Ok(mut listeners) = self.listeners.lock() {
            listeners.retain(|tx| tx.send(state.clone()).is_ok());
        }
    }
}

impl AuthClient for InMemoryAuthClient {
    fn sign_in(&self, email: &str, password: &str) -> Result<AuthUser, AuthError> {
        if !email.contains('@') {
            return Err(AuthError::InvalidEmail);
        }

        let accounts = self
            .accounts
            .read()
            .map_err(|_| AuthError::Provider("lock poisoned".to_string()))?;
        let (expected, uid) = accounts.get(email).ok_or(AuthError::UserNotFound)?;
        if expected != password {
            return Err(AuthError::WrongPassword);
        }

        let user = AuthUser {
            uid: uid.clone(),
            email: email.to_string(),
        };
        drop(accounts);

        if let Ok(mut current) = self.current.lock() {
            *current = Some(user.clone());
        }
        self.broadcast(Some(user.clone()));
        Ok(user)
    }

    fn sign_out(&self) -> Result<(), AuthError> {
        if let Ok(mut current) = self.current.lock() {
            *current = None;
        }
        self.broadcast(None);
        Ok(())
    }

    fn auth_state(&self) -> Subscription<Option<AuthUser>> {
        let (tx, rx) = mpsc::channel();

        // Deliver the current state up front, like the hosted provider does.
        if let Ok(current) = self.current.lock() {
            let _ = tx.send(current.clone());
        }
        if let Ok(mut listeners) = self.listeners.lock() {
            listeners.push(tx);
        }

        Subscription::new(rx)
    }
}
