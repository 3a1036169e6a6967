//! Claims carried by session tokens.

use crate::roles::Role;
use crate::Id;
use serde::{Deserialize, Serialize};

/// Claims for a session token identifying the acting user.
///
/// `id` mirrors the subject; it is optional so that a token without one can
/// still be verified and then rejected by the operation that needs an owner.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct SessionClaims {
    pub(crate) id: Option<Id>,
    #[serde(default)]
    pub(crate) role: Role,
    pub(crate) iat: u64,
    pub(crate) exp: u64,
}
