use catalog_admin_api::{
    config::database_url_from_env,
    db::{create_orm_conn, run_migrations},
    models::{NewCategory, NewDeal, NewProduct},
    store::{CategoryStore, DealStore, ProductFilter, ProductStore},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let database_url = database_url_from_env()?;

    let orm = create_orm_conn(&database_url).await?;
    // Ensure migrations are applied.
    run_migrations(&orm).await?;

    let products = ProductStore::new(&orm);
    if products.count_documents(&ProductFilter::default()).await? > 0 {
        println!("Catalog already has products, skipping seed");
        return Ok(());
    }

    let categories = CategoryStore::new(&orm);
    let mut category_ids = Vec::new();
    for (name, description) in [
        ("Electronics", "Phones, audio and accessories"),
        ("Home", "Furniture and decor"),
        ("Outdoor", ""),
    ] {
        let category = categories
            .create(NewCategory {
                name: name.to_string(),
                description: description.to_string(),
                image: None,
            })
            .await?;
        category_ids.push(category.id.to_string());
    }

    let samples = [
        ("Wireless Headphones", "Over-ear, noise cancelling", 129.0, 0),
        ("Red Table Lamp", "Ceramic base with linen shade", 45.5, 1),
        ("Camping Lantern", "Rechargeable LED lantern", 24.99, 2),
    ];
    for (name, description, price, category) in samples {
        products
            .create(NewProduct {
                name: name.to_string(),
                description: Some(description.to_string()),
                price,
                categories: vec![category_ids[category].clone()],
                image: String::new(),
            })
            .await?;
    }

    let deals = DealStore::new(&orm);
    deals
        .create(NewDeal {
            name: "Summer Sale".to_string(),
            offer: "50% OFF".to_string(),
            description: "Half price on outdoor gear".to_string(),
            price: 19.99,
            image: "https://placehold.co/600x400.png".to_string(),
        })
        .await?;

    println!(
        "Seed completed. {} categories, {} products, {} deals",
        categories.count_documents(None).await?,
        products.count_documents(&ProductFilter::default()).await?,
        deals.count_documents(None).await?
    );
    Ok(())
}
