#![allow(missing_docs)]

//! Session controller: start, restart and exit transitions around one grid
//! and one timer.

mod controller;
mod tasks;

pub use controller::{Phase, Session};
