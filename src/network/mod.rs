//! Network layer: line framing, outbound queue, registration, and the
//! session engine that turns inbound lines into outbound ones.

pub mod codec;
mod client;
pub mod handshake;
pub mod outbound;
pub mod session;

pub use client::run;
pub use codec::LineCodec;
pub use handshake::{Action, Handshake};
pub use outbound::Outbound;
pub use session::Session;
