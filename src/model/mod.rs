//! Domain types shared by the session, adapter, and views.

pub mod age;
pub mod category;
pub mod chat;
pub mod location;
pub mod service;

pub use age::{AgeBracket, AgeCategory, AgeInfo};
pub use category::ServiceCategory;
pub use chat::{ChatMessage, Role, Transcript, WELCOME_MESSAGE};
pub use location::Location;
pub use service::Service;
