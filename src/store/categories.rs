use sea_orm::{
    ActiveModelTrait, ActiveValue::Unchanged, Condition, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use super::{FindOptions, contains_ci, now};
use crate::{
    entity::categories::{ActiveModel, Column, Entity as Categories},
    models::{Category, CategoryChanges, NewCategory},
};

fn search_condition(search: Option<&str>) -> Condition {
    match search.filter(|s| !s.is_empty()) {
        Some(search) => Condition::any()
            .add(contains_ci(Column::Name, search))
            .add(contains_ci(Column::Description, search)),
        None => Condition::all(),
    }
}

pub struct CategoryStore<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CategoryStore<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, doc: NewCategory) -> Result<Category, DbErr> {
        let timestamp = now();
        let (image_asset_id, image_url) = match doc.image {
            Some(image) => (image.asset_id, Some(image.url)),
            None => (None, None),
        };
        let active = ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(doc.name),
            description: Set(doc.description),
            image_asset_id: Set(image_asset_id),
            image_url: Set(image_url),
            created_at: Set(timestamp),
            updated_at: Set(timestamp),
        };
        Ok(active.insert(self.db).await?.into())
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>, DbErr> {
        Ok(Categories::find_by_id(id)
            .one(self.db)
            .await?
            .map(Category::from))
    }

    pub async fn find(
        &self,
        search: Option<&str>,
        options: FindOptions,
    ) -> Result<Vec<Category>, DbErr> {
        let items = Categories::find()
            .filter(search_condition(search))
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .offset(options.skip)
            .limit(options.limit)
            .all(self.db)
            .await?;
        Ok(items.into_iter().map(Category::from).collect())
    }

    pub async fn count_documents(&self, search: Option<&str>) -> Result<u64, DbErr> {
        Categories::find()
            .filter(search_condition(search))
            .count(self.db)
            .await
    }

    pub async fn find_by_id_and_update(
        &self,
        id: Uuid,
        changes: CategoryChanges,
    ) -> Result<Option<Category>, DbErr> {
        let mut active = ActiveModel {
            id: Unchanged(id),
            updated_at: Set(now()),
            ..Default::default()
        };
        if let Some(name) = changes.name {
            active.name = Set(name);
        }
        if let Some(description) = changes.description {
            active.description = Set(description);
        }
        if let Some(image) = changes.image {
            active.image_asset_id = Set(image.asset_id);
            active.image_url = Set(Some(image.url));
        }

        match active.update(self.db).await {
            Ok(model) => Ok(Some(model.into())),
            Err(DbErr::RecordNotUpdated) | Err(DbErr::RecordNotFound(_)) => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Leaves product references to this id in place.
    pub async fn find_by_id_and_delete(&self, id: Uuid) -> Result<Option<Uuid>, DbErr> {
        let result = Categories::delete_by_id(id).exec(self.db).await?;
        Ok((result.rows_affected > 0).then_some(id))
    }
}
