use sea_orm::{
    ActiveModelTrait, ActiveValue::Unchanged, Condition, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use super::{FindOptions, contains_ci, now};
use crate::{
    entity::deals::{ActiveModel, Column, Entity as Deals},
    models::{Deal, DealChanges, NewDeal},
};

fn search_condition(search: Option<&str>) -> Condition {
    match search.filter(|s| !s.is_empty()) {
        Some(search) => Condition::any()
            .add(contains_ci(Column::Name, search))
            .add(contains_ci(Column::Description, search))
            .add(contains_ci(Column::Offer, search)),
        None => Condition::all(),
    }
}

pub struct DealStore<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> DealStore<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, doc: NewDeal) -> Result<Deal, DbErr> {
        let timestamp = now();
        let active = ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(doc.name),
            offer: Set(doc.offer),
            description: Set(doc.description),
            price: Set(doc.price),
            image: Set(doc.image),
            created_at: Set(timestamp),
            updated_at: Set(timestamp),
        };
        Ok(active.insert(self.db).await?.into())
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Deal>, DbErr> {
        Ok(Deals::find_by_id(id).one(self.db).await?.map(Deal::from))
    }

    pub async fn find(
        &self,
        search: Option<&str>,
        options: FindOptions,
    ) -> Result<Vec<Deal>, DbErr> {
        let items = Deals::find()
            .filter(search_condition(search))
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .offset(options.skip)
            .limit(options.limit)
            .all(self.db)
            .await?;
        Ok(items.into_iter().map(Deal::from).collect())
    }

    pub async fn count_documents(&self, search: Option<&str>) -> Result<u64, DbErr> {
        Deals::find()
            .filter(search_condition(search))
            .count(self.db)
            .await
    }

    pub async fn find_by_id_and_update(
        &self,
        id: Uuid,
        changes: DealChanges,
    ) -> Result<Option<Deal>, DbErr> {
        let mut active = ActiveModel {
            id: Unchanged(id),
            updated_at: Set(now()),
            ..Default::default()
        };
        if let Some(name) = changes.name {
            active.name = Set(name);
        }
        if let Some(offer) = changes.offer {
            active.offer = Set(offer);
        }
        if let Some(description) = changes.description {
            active.description = Set(description);
        }
        if let Some(price) = changes.price {
            active.price = Set(price);
        }
        if let Some(image) = changes.image {
            active.image = Set(image);
        }

        match active.update(self.db).await {
            Ok(model) => Ok(Some(model.into())),
            Err(DbErr::RecordNotUpdated) | Err(DbErr::RecordNotFound(_)) => Ok(None),
            Err(err) => Err(err),
        }
    }

    pub async fn find_by_id_and_delete(&self, id: Uuid) -> Result<Option<Uuid>, DbErr> {
        let result = Deals::delete_by_id(id).exec(self.db).await?;
        Ok((result.rows_affected > 0).then_some(id))
    }
}
