//! API request handlers

pub mod check;
pub mod health;
