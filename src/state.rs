use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::{
    media::MediaUploader,
    store::{CategoryStore, DealStore, ProductStore},
};

/// Long-lived handles shared by every request. The connection pool is opened
/// once at start-up and never torn down while serving.
#[derive(Clone)]
pub struct AppState {
    pub orm: DatabaseConnection,
    pub media: Arc<dyn MediaUploader>,
}

impl AppState {
    pub fn new(orm: DatabaseConnection, media: Arc<dyn MediaUploader>) -> Self {
        Self { orm, media }
    }

    pub fn products(&self) -> ProductStore<'_> {
        ProductStore::new(&self.orm)
    }

    pub fn categories(&self) -> CategoryStore<'_> {
        CategoryStore::new(&self.orm)
    }

    pub fn deals(&self) -> DealStore<'_> {
        DealStore::new(&self.orm)
    }
}
