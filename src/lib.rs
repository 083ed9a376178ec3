//! slirc-medalbot - a channel bot that awards medals, voices medallists,
//! and repeats scheduled announcements.

pub mod broadcast;
pub mod config;
pub mod error;
pub mod handlers;
pub mod network;
pub mod protocol;
pub mod services;
pub mod state;
