use super::error::{EntityApiErrorKind, Error};
use entity::pets::{ActiveModel, Column, Entity, Model};
use entity::Id;
use sea_orm::{
    entity::prelude::*,
    ActiveValue::{Set, Unchanged},
    DatabaseConnection, QueryOrder, TryIntoModel,
};

use log::*;

pub async fn create(db: &DatabaseConnection, pet_model: Model) -> Result<Model, Error> {
    debug!("New Pet Model to be inserted: {pet_model:?}");

    let now = chrono::Utc::now();

    let pet_active_model: ActiveModel = ActiveModel {
        name: Set(pet_model.name),
        species: Set(pet_model.species),
        owner_name: Set(pet_model.owner_name),
        owner_phone: Set(pet_model.owner_phone),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    };

    Ok(pet_active_model.save(db).await?.try_into_model()?)
}

pub async fn update(db: &DatabaseConnection, id: Id, model: Model) -> Result<Model, Error> {
    let pet = find_by_id(db, id).await?;

    debug!("Existing Pet model to be Updated: {pet:?}");

    let active_model: ActiveModel = ActiveModel {
        id: Unchanged(pet.id),
        name: Set(model.name),
        species: Set(model.species),
        owner_name: Set(model.owner_name),
        owner_phone: Set(model.owner_phone),
        created_at: Unchanged(pet.created_at),
        updated_at: Set(chrono::Utc::now().into()),
    };

    Ok(active_model.update(db).await?.try_into_model()?)
}

pub async fn delete_by_id(db: &DatabaseConnection, id: Id) -> Result<(), Error> {
    let result = find_by_id(db, id).await?;

    result.delete(db).await?;

    Ok(())
}

pub async fn find_by_id(db: &DatabaseConnection, id: Id) -> Result<Model, Error> {
    Entity::find_by_id(id).one(db).await?.ok_or_else(|| Error {
        source: None,
        error_kind: EntityApiErrorKind::RecordNotFound,
    })
}

/// Looks a pet up by an id received as raw text. Text that is not a valid id can
/// never match a record and is reported as `InvalidQueryTerm` without a query.
pub async fn find_by_id_str(db: &DatabaseConnection, id: &str) -> Result<Model, Error> {
    let id = crate::uuid_parse_str(id)?;
    find_by_id(db, id).await
}

pub async fn find_all(db: &DatabaseConnection) -> Result<Vec<Model>, Error> {
    Ok(Entity::find().order_by_asc(Column::Name).all(db).await?)
}

#[cfg(test)]
// We need to gate seaORM's mock feature behind conditional compilation because
// the feature removes the Clone trait implementation from seaORM's DatabaseConnection.
// see https://github.com/SeaQL/sea-orm/issues/830
#[cfg(feature = "mock")]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn pet_model() -> Model {
        let now = chrono::Utc::now();
        Model {
            id: Id::new_v4(),
            name: "Biscuit".to_owned(),
            species: Some("dog".to_owned()),
            owner_name: Some("Pat Morgan".to_owned()),
            owner_phone: Some("555-0142".to_owned()),
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    #[tokio::test]
    async fn create_returns_a_new_pet_model() -> Result<(), Error> {
        let pet_model = pet_model();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![pet_model.clone()]])
            .into_connection();

        let pet = create(&db, pet_model.clone()).await?;

        assert_eq!(pet.id, pet_model.id);
        assert_eq!(pet.name, "Biscuit");

        Ok(())
    }

    #[tokio::test]
    async fn update_returns_an_updated_pet_model() -> Result<(), Error> {
        let pet_model = pet_model();
        let renamed = Model {
            name: "Biscuit Jr.".to_owned(),
            ..pet_model.clone()
        };

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![pet_model.clone()], vec![renamed.clone()]])
            .into_connection();

        let pet = update(&db, pet_model.id, renamed.clone()).await?;

        assert_eq!(pet.name, "Biscuit Jr.");

        Ok(())
    }

    #[tokio::test]
    async fn find_by_id_returns_record_not_found_for_unknown_pet() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<Model>::new()])
            .into_connection();

        let result = find_by_id(&db, Id::new_v4()).await;

        assert_eq!(
            result.unwrap_err().error_kind,
            EntityApiErrorKind::RecordNotFound
        );
    }

    #[tokio::test]
    async fn find_by_id_str_does_not_query_for_malformed_ids() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let result = find_by_id_str(&db, "missing").await;

        assert_eq!(
            result.unwrap_err().error_kind,
            EntityApiErrorKind::InvalidQueryTerm
        );
        assert!(db.into_transaction_log().is_empty());
    }

    #[tokio::test]
    async fn delete_by_id_looks_up_then_deletes_the_pet() -> Result<(), Error> {
        let pet_model = pet_model();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![pet_model.clone()]])
            .append_exec_results(vec![MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();

        delete_by_id(&db, pet_model.id).await?;

        assert_eq!(db.into_transaction_log().len(), 2);

        Ok(())
    }
}
