use crate::roles::Role;
use crate::Id;
use serde::{Deserialize, Serialize};

/// The authenticated identity behind a request.
///
/// `id` is optional because a verified session token may still lack a subject;
/// operations that need an owner reject such actors with a validation error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: Option<Id>,
    #[serde(default)]
    pub role: Role,
}

impl Actor {
    pub fn new(id: Id, role: Role) -> Self {
        Self { id: Some(id), role }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actors_without_a_role_default_to_user() {
        let actor: Actor = serde_json::from_str(r#"{"id": null}"#).unwrap();
        assert_eq!(actor.role, Role::User);
        assert_eq!(actor.id, None);
    }
}
