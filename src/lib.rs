//! ConnectCare client: age gate, location, and category-scoped chat and
//! service discovery against the ConnectCare backend.

pub mod api;
pub mod cli;
pub mod config;
pub mod contact;
pub mod error;
pub mod location;
pub mod model;
pub mod session;
pub mod view;
