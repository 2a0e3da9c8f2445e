//! Gateway reads and writes shaped for the dashboard pages.
//!
//! Each function takes the gateway and the session's account, issues its
//! provider calls one after another, and returns data ready to serialize.

pub mod issuing;
pub mod onboarding;
pub mod treasury;
