use serde::{Deserialize, Serialize};

/// Role a signed-in user holds.
///
/// Admin roles come from the `users` collection; anyone resolved through
/// the `customers` collection is a [`Role::Customer`] regardless of what
/// the document claims.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    SuperAdmin,
    Customer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::SuperAdmin => "super_admin",
            Role::Customer => "customer",
        }
    }

    /// Where this role lands after sign-in.
    pub fn landing_route(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "/super-admin",
            Role::Admin => "/admin",
            Role::Customer => "/customer/portal",
        }
    }

    /// The sign-in page for this role (used after sign-out).
    pub fn sign_in_route(&self) -> &'static str {
        match self {
            Role::Customer => "/customer/login",
            _ => "/login",
        }
    }

    /// Parse a profile-document role string; anything unrecognized is
    /// treated as a plain admin (the document default).
    pub fn from_profile_field(value: &str) -> Role {
        match value {
            "super_admin" => Role::SuperAdmin,
            "customer" => Role::Customer,
            _ => Role::Admin,
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routes_per_role() {
        assert_eq!(Role::SuperAdmin.landing_route(), "/super-admin");
        assert_eq!(Role::Admin.landing_route(), "/admin");
        assert_eq!(Role::Customer.landing_route(), "/customer/portal");
        assert_eq!(Role::Customer.sign_in_route(), "/customer/login");
        assert_eq!(Role::Admin.sign_in_route(), "/login");
    }

    #[test]
    fn unknown_profile_role_defaults_to_admin() {
        assert_eq!(Role::from_profile_field("manager"), Role::Admin);
        assert_eq!(Role::from_profile_field("super_admin"), Role::SuperAdmin);
    }
}
