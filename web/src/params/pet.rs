use serde::Deserialize;
use utoipa::ToSchema;

/// Body for creating or updating a pet.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PetParams {
    pub name: String,
    pub species: Option<String>,
    #[serde(alias = "owner_name")]
    pub owner_name: Option<String>,
    #[serde(alias = "owner_phone")]
    pub owner_phone: Option<String>,
}
