use serde::Deserialize;
use utoipa::ToSchema;

/// Changes a user may make to their own profile. Omitted fields keep their
/// stored value; the role can't be changed here.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ProfileParams {
    pub name: Option<String>,
    pub email: Option<String>,
}
