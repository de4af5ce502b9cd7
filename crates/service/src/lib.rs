//! Service layer providing product CRUD on top of `models`.
//! - `db`: SeaORM queries against the `products` table.
//! - `product`: repository seam and the service used by HTTP handlers.

pub mod errors;
pub mod db;
pub mod product;
#[cfg(any(test, feature = "test-util"))]
pub mod memory;
#[cfg(test)]
pub mod test_support;
