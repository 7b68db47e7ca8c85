pub mod categories;
pub mod deals;
pub mod products;

pub use categories::Entity as Categories;
pub use deals::Entity as Deals;
pub use products::Entity as Products;
