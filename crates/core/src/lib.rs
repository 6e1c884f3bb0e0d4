//! Rebate
//!
//! Rebate decides whether a discount code applies to a cart and what else it
//! unlocks. It covers the rule-evaluation half of a storefront's discount
//! handling: eligibility checks in a fixed order, scope matching against cart
//! lines, per-kind quantity and amount gates, gift cards, and one-hop
//! activation chains.
//!
//! The crate does no I/O. Callers look the catalog up themselves and pass the
//! records in; see the `rebate-app` crate for an async service built on top.

pub mod cart;
pub mod chain;
pub mod codes;
pub mod customers;
pub mod discounts;
pub mod eligibility;
pub mod evaluator;
pub mod fixtures;
pub mod gift_cards;
pub mod ids;
pub mod prelude;
pub mod rejection;
pub mod resolution;
pub mod scope;
