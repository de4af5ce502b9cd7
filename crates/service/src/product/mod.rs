pub mod repository;
pub mod service;

pub use repository::{ProductRepository, SeaOrmProductRepository};
pub use service::ProductService;
