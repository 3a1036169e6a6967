use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Lifecycle of an appointment. New appointments always start as `Scheduled`.
#[derive(
    Debug,
    Clone,
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
#[sea_orm(
    rs_type = "String",
    db_type = "Enum",
    enum_name = "appointment_status"
)]
pub enum AppointmentStatus {
    #[sea_orm(string_value = "scheduled")]
    #[default]
    Scheduled,
    #[sea_orm(string_value = "completed")]
    Completed,
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

impl std::fmt::Display for AppointmentStatus {
    fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppointmentStatus::Scheduled => write!(fmt, "scheduled"),
            AppointmentStatus::Completed => write!(fmt, "completed"),
            AppointmentStatus::Cancelled => write!(fmt, "cancelled"),
        }
    }
}

impl From<&str> for AppointmentStatus {
    fn from(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "completed" => AppointmentStatus::Completed,
            "cancelled" | "canceled" => AppointmentStatus::Cancelled,
            _ => AppointmentStatus::Scheduled,
        }
    }
}
