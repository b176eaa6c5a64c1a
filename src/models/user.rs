use serde::{Deserialize, Serialize};

/// Roles carried in the JWT claims. Accounts themselves live in an
/// external admin service; the tracker only verifies tokens.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Operator,
    Manager,
}
