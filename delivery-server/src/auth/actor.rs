//! Actor and Role Types

use serde::{Deserialize, Serialize};

/// Actor role, as asserted by the gateway
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    BranchManager,
    Rider,
    Customer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::BranchManager => "BRANCH_MANAGER",
            Role::Rider => "RIDER",
            Role::Customer => "CUSTOMER",
        }
    }

    /// Parse the header form (case-insensitive)
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_uppercase().as_str() {
            "ADMIN" => Some(Role::Admin),
            "BRANCH_MANAGER" => Some(Role::BranchManager),
            "RIDER" => Some(Role::Rider),
            "CUSTOMER" => Some(Role::Customer),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Authenticated actor for one request.
///
/// `branch_id` is present for branch managers, `rider_id` for riders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    pub role: Role,
    pub user_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rider_id: Option<i64>,
}

impl Actor {
    /// Staff actors may drive the admin/branch status path
    pub fn is_staff(&self) -> bool {
        matches!(self.role, Role::Admin | Role::BranchManager)
    }

    /// Whether this actor may manage orders of `branch_id`
    pub fn can_manage_branch(&self, branch_id: i64) -> bool {
        match self.role {
            Role::Admin => true,
            Role::BranchManager => self.branch_id == Some(branch_id),
            _ => false,
        }
    }

    /// Test helper: an admin actor
    pub fn admin(user_id: i64) -> Self {
        Self {
            role: Role::Admin,
            user_id,
            branch_id: None,
            rider_id: None,
        }
    }

    /// Test helper: a customer actor
    pub fn customer(user_id: i64) -> Self {
        Self {
            role: Role::Customer,
            user_id,
            branch_id: None,
            rider_id: None,
        }
    }

    /// Test helper: a branch manager actor
    pub fn branch_manager(user_id: i64, branch_id: i64) -> Self {
        Self {
            role: Role::BranchManager,
            user_id,
            branch_id: Some(branch_id),
            rider_id: None,
        }
    }

    /// Test helper: a rider actor
    pub fn rider(user_id: i64, rider_id: i64) -> Self {
        Self {
            role: Role::Rider,
            user_id,
            branch_id: None,
            rider_id: Some(rider_id),
        }
    }
}
