pub mod buf;
mod seq;

pub use seq::*;
