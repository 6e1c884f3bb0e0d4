//! Rebate application: repositories, the resolve service and its runtime
//! setup.

pub mod config;
pub mod context;
pub mod database;
pub mod domain;
pub mod observability;

#[cfg(test)]
mod test;
