//! Interaction with network services.

pub mod effect;

pub use effect::ServiceEffect;
