//! Rebate Domain Concerns

pub mod discounts;
