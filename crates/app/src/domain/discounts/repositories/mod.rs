//! Discount repository implementations.

mod memory;
mod postgres;

pub use memory::InMemoryDiscountRepository;
pub use postgres::PgDiscountRepository;
