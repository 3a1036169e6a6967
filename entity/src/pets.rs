//! SeaORM Entity for the pets table.

use crate::Id;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize, ToSchema)]
#[schema(as = entity::pets::Model)]
#[sea_orm(schema_name = "vet_scheduler", table_name = "pets")]
pub struct Model {
    #[serde(skip_deserializing)]
    #[sea_orm(primary_key)]
    #[schema(value_type = String, format = Uuid)]
    pub id: Id,

    pub name: String,

    pub species: Option<String>,

    /// Name of the person the pet is registered to
    pub owner_name: Option<String>,

    /// Contact phone of the person the pet is registered to
    pub owner_phone: Option<String>,

    #[serde(skip_deserializing)]
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTimeWithTimeZone,

    #[serde(skip_deserializing)]
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::appointments::Entity")]
    Appointments,
}

impl Related<super::appointments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Appointments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
