use sea_orm::ActiveValue::Set;
use sea_orm::ConnectionTrait;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use util::period::Period;

use super::tutor::{Entity as TutorEntity, Model as TutorModel};

/// A tutor's registration for one academic period.
///
/// Topics reference this row rather than the tutor directly, so a tutor can only be
/// assigned topics in periods they are registered for.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "tutor_periods")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub tutor_id: i64,
    pub period: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::tutor::Entity",
        from = "Column::TutorId",
        to = "super::tutor::Column::Id",
        on_delete = "Cascade"
    )]
    Tutor,

    #[sea_orm(has_many = "super::topic::Entity")]
    Topics,
}

impl Related<super::tutor::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tutor.def()
    }
}

impl Related<super::topic::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Topics.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn register<C: ConnectionTrait>(
        db: &C,
        tutor_id: i64,
        period: &Period,
    ) -> Result<Model, DbErr> {
        let registration = ActiveModel {
            tutor_id: Set(tutor_id),
            period: Set(period.to_string()),
            ..Default::default()
        };
        registration.insert(db).await
    }

    /// Resolves a tutor email to its registration in `period`.
    ///
    /// `None` when the tutor is unknown or not registered for the period.
    pub async fn find_by_tutor_email<C: ConnectionTrait>(
        db: &C,
        email: &str,
        period: &Period,
    ) -> Result<Option<(Model, TutorModel)>, DbErr> {
        let Some(tutor) = TutorModel::find_by_email(db, email).await? else {
            return Ok(None);
        };

        let registration = Entity::find()
            .filter(Column::TutorId.eq(tutor.id))
            .filter(Column::Period.eq(period.as_str()))
            .one(db)
            .await?;

        Ok(registration.map(|r| (r, tutor)))
    }

    pub async fn find_by_ids_with_tutor<C: ConnectionTrait>(
        db: &C,
        ids: impl IntoIterator<Item = i64>,
    ) -> Result<Vec<(Model, Option<TutorModel>)>, DbErr> {
        Entity::find()
            .filter(Column::Id.is_in(ids))
            .find_also_related(TutorEntity)
            .all(db)
            .await
    }
}
