//! Chat command handlers.
//!
//! Commands arrive as channel messages; the [`Registry`] walks its handler
//! chain in order and the first handler that claims a message answers it.
//!
//! - [`context`]: the [`Handler`] trait, [`Outcome`] and per-dispatch [`Context`]
//! - [`registry`]: the ordered handler chain

pub mod context;
mod gamble;
mod medal;
pub mod registry;

pub use context::{Context, Handler, Outcome};
pub use gamble::GambleHandler;
pub use medal::MedalHandler;
pub use registry::Registry;
