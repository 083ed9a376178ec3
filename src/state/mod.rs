//! Bot state.
//!
//! - [`IdentityMap`]: nickname → last seen `user@host`
//! - [`MedalStore`]: durable identity token → medal mapping
//! - [`AdminList`]: who may change medals

mod admins;
mod identity;
mod lines;
mod medals;

pub use admins::AdminList;
pub use identity::IdentityMap;
pub use medals::{MedalLevel, MedalStore};
pub(crate) use lines::utf8_lines;
