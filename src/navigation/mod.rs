//! View routing.
//!
//! Maps locations to named views and mirrors in-app navigation back into
//! the location bar without reloading the document.

mod history;
mod intent;
mod location;
mod router;
mod routes;
mod view;

pub use history::*;
pub use intent::*;
pub use location::*;
pub use router::*;
pub use routes::{aliases, lookup, resolve_view_from_path, ROUTES};
pub use view::*;
