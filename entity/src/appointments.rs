//! SeaORM Entity for the appointments table.
//! Each appointment links one pet to the user who booked it.

use crate::appointment_status::AppointmentStatus;
use crate::Id;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize, ToSchema)]
#[schema(as = entity::appointments::Model)]
#[sea_orm(schema_name = "vet_scheduler", table_name = "appointments")]
pub struct Model {
    #[serde(skip_deserializing)]
    #[sea_orm(primary_key)]
    #[schema(value_type = String, format = Uuid)]
    pub id: Id,

    #[schema(value_type = String, format = Uuid)]
    pub pet_id: Id,

    /// The user who owns (booked) the appointment
    #[schema(value_type = String, format = Uuid)]
    pub user_id: Id,

    #[schema(value_type = String, format = DateTime)]
    pub scheduled_at: DateTimeWithTimeZone,

    #[serde(default)]
    pub status: AppointmentStatus,

    /// Free-text reason for the visit
    pub reason: Option<String>,

    #[serde(skip_deserializing)]
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTimeWithTimeZone,

    #[serde(skip_deserializing)]
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::pets::Entity",
        from = "Column::PetId",
        to = "super::pets::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Pets,

    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Users,
}

impl Related<super::pets::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Pets.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
