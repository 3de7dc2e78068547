//! Bundled evaluation engines
//!
//! The loop core runs any [`Engine`](crate::engine::Engine); this
//! module ships the one built in. It is compiled only with the `rust`
//! feature, which is on by default.

pub mod rust;

pub use rust::RustEngine;
