//! Terminal rendering. Pure functions of state, no business logic.

pub mod card;
pub mod markup;
pub mod nav;
pub mod transcript;

pub use card::{NO_SERVICES_MESSAGE, ResultsView, render_card};
pub use markup::render_markup;
pub use nav::{Route, render_age_menu, render_category_menu, render_nav};
pub use transcript::{render_message, render_transcript};
