//! # Domain Models
//!
//! Pure domain types shared by every slice. The only dependency is `serde`.
//! Keep it lean: no I/O, networking, or heavy logic, just data and simple helpers.

pub mod config;
pub mod constants;
pub mod registry;
