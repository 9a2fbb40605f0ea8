use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::shared::constants::{ROLE_ADMIN, ROLE_MANAGEMENT, ROLE_MART_OWNER};

/// Portal roles. Each is unlocked by its own password.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Management,
    MartOwner,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => ROLE_ADMIN,
            Role::Management => ROLE_MANAGEMENT,
            Role::MartOwner => ROLE_MART_OWNER,
        }
    }

    /// Label used in "Invalid <role> password." messages
    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Management => "management",
            Role::MartOwner => "mart owner",
        }
    }
}

/// Roles carried by the caller's session token, inserted into request
/// extensions by the session middleware.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub roles: Vec<Role>,
}

impl Session {
    pub fn new(roles: Vec<Role>) -> Self {
        let mut session = Self::default();
        for role in roles {
            session.grant(role);
        }
        session
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    pub fn grant(&mut self, role: Role) {
        if !self.has_role(role) {
            self.roles.push(role);
        }
    }

    pub fn revoke(&mut self, role: Role) {
        self.roles.retain(|r| *r != role);
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(Role::Admin)
    }

    /// Management or admin
    pub fn can_manage(&self) -> bool {
        self.is_admin() || self.has_role(Role::Management)
    }

    /// Mart owner or admin
    pub fn can_update_mart(&self) -> bool {
        self.is_admin() || self.has_role(Role::MartOwner)
    }
}

/// Signed session token body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,
    pub roles: Vec<Role>,
    pub iat: u64,
    pub exp: u64,
}
