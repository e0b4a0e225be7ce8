//! Read entities definitions.

pub mod health;
pub mod listing;
