use sea_orm::{
    ActiveModelTrait, ActiveValue::Unchanged, Condition, DatabaseConnection, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
    sea_query::{Alias, Expr, Func, LikeExpr},
};
use uuid::Uuid;

use super::{FindOptions, contains_ci, now};
use crate::{
    entity::products::{ActiveModel, Column, Entity as Products},
    models::{NewProduct, Product, ProductChanges},
};

#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    /// Exact match against one entry of the product's category list.
    pub category: Option<Uuid>,
    /// Substring of name or description, any case.
    pub search: Option<String>,
}

impl ProductFilter {
    fn condition(&self) -> Condition {
        let mut condition = Condition::all();

        if let Some(category) = self.category {
            // Ids are stored as a JSON string array, so a quoted id is an
            // exact element match.
            let pattern = format!("%\"{}\"%", category.hyphenated());
            condition = condition.add(
                Expr::expr(Func::cast_as(Expr::col(Column::Categories), Alias::new("text")))
                    .like(LikeExpr::new(pattern)),
            );
        }

        if let Some(search) = self.search.as_deref().filter(|s| !s.is_empty()) {
            condition = condition.add(
                Condition::any()
                    .add(contains_ci(Column::Name, search))
                    .add(contains_ci(Column::Description, search)),
            );
        }

        condition
    }
}

pub struct ProductStore<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ProductStore<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, doc: NewProduct) -> Result<Product, DbErr> {
        let timestamp = now();
        let active = ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(doc.name),
            description: Set(doc.description),
            price: Set(doc.price),
            categories: Set(serde_json::json!(doc.categories)),
            image: Set(doc.image),
            created_at: Set(timestamp),
            updated_at: Set(timestamp),
        };
        Ok(active.insert(self.db).await?.into())
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, DbErr> {
        Ok(Products::find_by_id(id).one(self.db).await?.map(Product::from))
    }

    pub async fn find(
        &self,
        filter: &ProductFilter,
        options: FindOptions,
    ) -> Result<Vec<Product>, DbErr> {
        let items = Products::find()
            .filter(filter.condition())
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .offset(options.skip)
            .limit(options.limit)
            .all(self.db)
            .await?;
        Ok(items.into_iter().map(Product::from).collect())
    }

    pub async fn count_documents(&self, filter: &ProductFilter) -> Result<u64, DbErr> {
        Products::find()
            .filter(filter.condition())
            .count(self.db)
            .await
    }

    /// Returns `None` when no document has this id.
    pub async fn find_by_id_and_update(
        &self,
        id: Uuid,
        changes: ProductChanges,
    ) -> Result<Option<Product>, DbErr> {
        let mut active = ActiveModel {
            id: Unchanged(id),
            updated_at: Set(now()),
            ..Default::default()
        };
        if let Some(name) = changes.name {
            active.name = Set(name);
        }
        if let Some(description) = changes.description {
            active.description = Set(Some(description));
        }
        if let Some(price) = changes.price {
            active.price = Set(price);
        }
        if let Some(categories) = changes.categories {
            active.categories = Set(serde_json::json!(categories));
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

    /// Returns the id when a document was removed.
    pub async fn find_by_id_and_delete(&self, id: Uuid) -> Result<Option<Uuid>, DbErr> {
        let result = Products::delete_by_id(id).exec(self.db).await?;
        Ok((result.rows_affected > 0).then_some(id))
    }
}
