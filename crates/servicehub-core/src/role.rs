//! The principal role taxonomy.
//!
//! Roles travel on the wire (token claims, JSON bodies, the client session
//! cache) under their legacy names: customers are `"user"`, service
//! providers are `"provider"`. Every decision that depends on a role matches
//! on [`Role`] exhaustively, so adding a variant is a compile error at each
//! place that has to handle it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A principal's fixed category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Role {
    /// Books services from the marketplace
    #[serde(rename = "user")]
    Customer,
    /// Offers services on the marketplace
    #[serde(rename = "provider")]
    Provider,
}

impl Role {
    pub const ALL: [Role; 2] = [Role::Customer, Role::Provider];

    /// Wire representation used in claims and JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "user",
            Role::Provider => "provider",
        }
    }

    /// Message returned by a role gate that requires this role.
    pub fn denial_message(&self) -> &'static str {
        match self {
            Role::Customer => "Access denied. Customers only.",
            Role::Provider => "Access denied. Service providers only.",
        }
    }

    /// Landing page for this role on the client.
    pub fn home_path(&self) -> &'static str {
        match self {
            Role::Customer => "/",
            Role::Provider => "/dashboard",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseRoleError(pub String);

impl fmt::Display for ParseRoleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown role: {}", self.0)
    }
}

impl std::error::Error for ParseRoleError {}

impl FromStr for Role {
    type Err = ParseRoleError;

    /// Accepts the wire names and the descriptive alias `customer`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" | "customer" => Ok(Role::Customer),
            "provider" => Ok(Role::Provider),
            other => Err(ParseRoleError(other.to_string())),
        }
    }
}
