#![doc = include_str!("../README.md")]

mod error;
mod prelude;

pub mod deframing;
pub mod doqpsk;

pub use error::{Error, Result};
