//! Differential offset-QPSK decoding.
//!
//! LRPT from Meteor-M N2-2 onwards is transmitted as differential OQPSK, which
//! encodes data in the phase change between consecutive I/Q symbol pairs. The soft
//! symbols must be "fixed" back to absolute values before they can be handed to the
//! LRPT Viterbi decoder.
mod diffcode;
mod isqrt;

pub use diffcode::*;
pub use isqrt::*;
