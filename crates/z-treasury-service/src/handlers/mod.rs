//! API and page handlers.

pub mod cardholders;
pub mod health;
pub mod onboarding;
pub mod pages;
