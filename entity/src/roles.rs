use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(
    Debug,
    Clone,
    Copy,
    Eq,
    PartialEq,
    EnumIter,
    Deserialize,
    Default,
    Serialize,
    DeriveActiveEnum,
    ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "role")]
pub enum Role {
    // Accounts registered through the front desk were historically tagged "staff".
    #[sea_orm(string_value = "user")]
    #[serde(alias = "staff")]
    #[default]
    User,
    #[sea_orm(string_value = "admin")]
    Admin,
}

impl std::fmt::Display for Role {
    fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::User => write!(fmt, "user"),
            Role::Admin => write!(fmt, "admin"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn staff_deserializes_as_user() {
        let role: Role = serde_json::from_str("\"staff\"").unwrap();
        assert_eq!(role, Role::User);
    }

    #[test]
    fn admin_round_trips_through_its_lowercase_name() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        assert_eq!(Role::Admin.to_string(), "admin");
    }
}
