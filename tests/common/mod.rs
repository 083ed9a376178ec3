//! Integration test common infrastructure.
//!
//! A scripted IRC server the bot connects to, and a helper that runs the
//! bot in-process against it.

pub mod bot;
pub mod server;

#[allow(unused_imports)]
pub use bot::{BotOptions, TestBot};
#[allow(unused_imports)]
pub use server::{FakeServer, ServerConn};
