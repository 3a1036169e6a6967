use domain::{appointment_status::AppointmentStatus, Id};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, IntoParams)]
pub(crate) struct IndexParams {
    /// Only list appointments for this pet
    #[param(value_type = Option<String>, format = Uuid)]
    pub(crate) pet_id: Option<Id>,
}

/// Fields of an appointment that may be changed after booking. Omitted fields
/// keep their stored value.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateParams {
    #[serde(alias = "scheduled_at")]
    #[schema(value_type = Option<String>, format = DateTime)]
    pub scheduled_at: Option<chrono::DateTime<chrono::FixedOffset>>,
    pub status: Option<AppointmentStatus>,
    pub reason: Option<String>,
}
