//! Sign-in flows and profile/role resolution.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{Value as JsonValue, json};
use tracing::{info, warn};

use salonops_core::{UserId, fields};
use salonops_store::{DocumentStore, collections};

use crate::client::{AuthClient, AuthError, AuthUser};
use crate::roles::Role;
use crate::session::{CUSTOMER_AUTH_KEY, SessionCache, USER_KEY};

/// The resolved identity of a signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: UserId,
    pub email: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch_name: Option<String>,
}

/// Ties the authentication provider, the document store and the session
/// cache into the sign-in/sign-out flows the dashboard shell drives.
///
/// Role resolution order: `users/{uid}` (admins; role field decides, default
/// `admin`), then `customers/{uid}` (role forced to customer). A user found
/// in neither collection is forcibly signed out and the session markers are
/// cleared.
#[derive(Debug)]
pub struct Authenticator<A, S, C> {
    auth: A,
    store: S,
    cache: C,
}

impl<A, S, C> Authenticator<A, S, C>
where
    A: AuthClient,
    S: DocumentStore,
    C: SessionCache,
{
    pub fn new(auth: A, store: S, cache: C) -> Self {
        Self { auth, store, cache }
    }

    /// Admin sign-in: credentials, then a `users` profile is required.
    pub fn login(&self, email: &str, password: &str) -> Result<Profile, AuthError> {
        let user = self.auth.sign_in(email, password)?;

        let profile = self
            .admin_profile(&user)
            .map_err(|e| AuthError::ProfileLookup(e.to_string()))?
            .ok_or(AuthError::ProfileNotFound)?;

        self.cache.put(USER_KEY, marker(&profile));
        info!(email = %profile.email, role = %profile.role, "admin signed in");
        Ok(profile)
    }

    /// Customer sign-in: credentials, then a `customers` profile is required.
    pub fn login_customer(&self, email: &str, password: &str) -> Result<Profile, AuthError> {
        let user = self.auth.sign_in(email, password)?;

        let profile = self
            .customer_profile(&user)
            .map_err(|e| AuthError::ProfileLookup(e.to_string()))?
            .ok_or(AuthError::CustomerNotFound)?;

        self.cache.put(USER_KEY, marker(&profile));
        self.cache.put(
            CUSTOMER_AUTH_KEY,
            json!({"isAuthenticated": true, "customer": marker(&profile)}),
        );
        info!(email = %profile.email, "customer signed in");
        Ok(profile)
    }

    /// Handle one auth-state delivery from [`AuthClient::auth_state`].
    ///
    /// `None` (signed out) clears the profile marker but deliberately keeps
    /// the customer-portal marker. `Some` resolves the profile; failure to
    /// resolve forces a sign-out.
    pub fn handle_auth_state(
        &self,
        state: Option<AuthUser>,
    ) -> Result<Option<Profile>, AuthError> {
        match state {
            Some(user) => self.resolve(&user).map(Some),
            None => {
                self.cache.remove(USER_KEY);
                Ok(None)
            }
        }
    }

    /// Resolve a signed-in user to a profile.
    pub fn resolve(&self, user: &AuthUser) -> Result<Profile, AuthError> {
        let admin = match self.admin_profile(user) {
            Ok(found) => found,
            Err(e) => return self.fail_resolution(AuthError::ProfileLookup(e.to_string())),
        };
        if let Some(profile) = admin {
            self.cache.put(USER_KEY, marker(&profile));
            info!(email = %profile.email, role = %profile.role, "auth state resolved");
            return Ok(profile);
        }

        let customer = match self.customer_profile(user) {
            Ok(found) => found,
            Err(e) => return self.fail_resolution(AuthError::ProfileLookup(e.to_string())),
        };
        if let Some(profile) = customer {
            self.cache.put(USER_KEY, marker(&profile));
            info!(email = %profile.email, "auth state resolved to customer");
            return Ok(profile);
        }

        // A just-registered customer may not have a document yet; the portal
        // leaves its marker behind so we can create one.
        if let Some(profile) = self.register_cached_customer(user) {
            self.cache.put(USER_KEY, marker(&profile));
            info!(email = %profile.email, "created customer profile from cached registration");
            return Ok(profile);
        }

        self.fail_resolution(AuthError::ProfileNotFound)
    }

    /// Sign out and clear session markers; returns the sign-in route to
    /// send the user back to.
    pub fn logout(&self, role: Option<Role>) -> Result<&'static str, AuthError> {
        self.auth.sign_out()?;
        self.cache.remove(USER_KEY);

        if role == Some(Role::Customer) {
            self.cache.remove(CUSTOMER_AUTH_KEY);
            Ok(Role::Customer.sign_in_route())
        } else {
            Ok("/login")
        }
    }

    /// The provider's auth-state stream, for the shell to subscribe to.
    pub fn auth_state(&self) -> salonops_store::Subscription<Option<AuthUser>> {
        self.auth.auth_state()
    }

    fn admin_profile(
        &self,
        user: &AuthUser,
    ) -> Result<Option<Profile>, salonops_store::StoreError> {
        let Some(doc) = self.store.get(collections::USERS, user.uid.as_str())? else {
            return Ok(None);
        };
        let data = &doc.data;

        Ok(Some(Profile {
            id: user.uid.clone(),
            email: user.email.clone(),
            role: Role::from_profile_field(&fields::str_or(data, "role", "admin")),
            name: opt_str(data, "name"),
            phone: None,
            branch_id: opt_str(data, "branchId"),
            branch_name: opt_str(data, "branchName"),
        }))
    }

    fn customer_profile(
        &self,
        user: &AuthUser,
    ) -> Result<Option<Profile>, salonops_store::StoreError> {
        let Some(doc) = self.store.get(collections::CUSTOMERS, user.uid.as_str())? else {
            return Ok(None);
        };
        let data = &doc.data;

        Ok(Some(Profile {
            id: user.uid.clone(),
            email: user.email.clone(),
            role: Role::Customer,
            name: opt_str(data, "name"),
            phone: opt_str(data, "phone"),
            branch_id: None,
            branch_name: None,
        }))
    }

    /// Create the `customers` document for a registration that only exists
    /// in the portal marker so far.
    fn register_cached_customer(&self, user: &AuthUser) -> Option<Profile> {
        let cached = self.cache.get(CUSTOMER_AUTH_KEY)?;
        let customer = cached.get("customer")?;
        let cached_id = customer.get("id").and_then(JsonValue::as_str)?;
        if cached_id != user.uid.as_str() {
            return None;
        }

        let name = opt_str(customer, "name");
        let phone = opt_str(customer, "phone");
        let created = self.store.set(
            collections::CUSTOMERS,
            user.uid.as_str(),
            json!({
                "email": user.email,
                "name": name.clone().unwrap_or_default(),
                "phone": phone.clone().unwrap_or_default(),
                "role": "customer",
                "createdAt": Utc::now().to_rfc3339(),
                "status": "active",
            }),
        );
        if let Err(e) = created {
            warn!(error = %e, "failed to create customer document from cached registration");
            return None;
        }

        Some(Profile {
            id: user.uid.clone(),
            email: user.email.clone(),
            role: Role::Customer,
            name,
            phone,
            branch_id: None,
            branch_name: None,
        })
    }

    /// Profile resolution failed: force a sign-out and clear every marker.
    fn fail_resolution(&self, err: AuthError) -> Result<Profile, AuthError> {
        warn!(error = %err, "profile resolution failed, forcing sign-out");
        if let Err(e) = self.auth.sign_out() {
            warn!(error = %e, "forced sign-out failed");
        }
        self.cache.remove(USER_KEY);
        self.cache.remove(CUSTOMER_AUTH_KEY);
        Err(err)
    }
}

fn marker(profile: &Profile) -> JsonValue {
    serde_json::to_value(profile).unwrap_or(JsonValue::Null)
}

fn opt_str(data: &JsonValue, key: &str) -> Option<String> {
    data.get(key)
        .and_then(JsonValue::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
