use utoipa::{OpenApi, openapi::OpenApi as OpenApiSpec};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        categories::CategoryUpload,
        deals::{CreateDealRequest, UpdateDealRequest},
        products::{CreateProductRequest, UpdateProductRequest},
    },
    models::{Category, CategoryImage, Deal, Product},
    response::{ApiResponse, DeletedId, ErrorResponse, Page, Pagination},
    routes::{categories, deals, health, products},
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        products::list_products,
        products::create_product,
        products::get_product,
        products::update_product,
        products::delete_product,
        products::delete_product_by_query,
        categories::list_categories,
        categories::create_category,
        categories::get_category,
        categories::update_category,
        categories::delete_category,
        deals::list_deals,
        deals::create_deal,
        deals::get_deal,
        deals::update_deal,
        deals::delete_deal
    ),
    components(
        schemas(
            Product,
            Category,
            CategoryImage,
            Deal,
            CreateProductRequest,
            UpdateProductRequest,
            CategoryUpload,
            CreateDealRequest,
            UpdateDealRequest,
            Pagination,
            DeletedId,
            ErrorResponse,
            ApiResponse<Product>,
            ApiResponse<Category>,
            ApiResponse<Deal>,
            ApiResponse<Page<Product>>,
            ApiResponse<DeletedId>
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Products", description = "Product endpoints"),
        (name = "Categories", description = "Category endpoints"),
        (name = "Deals", description = "Deal endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
