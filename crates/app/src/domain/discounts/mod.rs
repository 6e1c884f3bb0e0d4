//! Discounts

pub mod data;
mod errors;
mod repositories;
pub mod repository;
pub mod service;

pub use errors::{DiscountRepositoryError, ResolveError};
pub use repositories::{InMemoryDiscountRepository, PgDiscountRepository};
pub use repository::DiscountRepository;
pub use service::{CatalogDiscountsService, DiscountsService};
