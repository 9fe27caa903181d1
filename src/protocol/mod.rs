//! # PPP framing
//!
//! The encapsulated protocol can arrive under four negotiated framings:
//!
//! ```text
//! ff 03 00 3d   full (address + control + protocol)
//! ff 03 3d      protocol-field compressed
//! 00 3d         address/control compressed
//! 3d            both compressed
//! ```
//!
//! # MLPPP control header
//!
//! Written immediately after the framing bytes. Short-sequence mode:
//!
//! ```text
//! 0               1               2 (BYTE)
//! +-+-+---+-------+---------------+
//! |B|E|0 0|seq  hi|    seq lo     |
//! +-+-+---+-------+---------------+
//! ```
//!
//! Long-sequence mode:
//!
//! ```text
//! 0               1               2               3               4 (BYTE)
//! +-+-+-----------+---------------+---------------+---------------+
//! |B|E| 0 0 0 0 0 |                  seq (24 bit)                 |
//! +-+-+-----------+---------------+---------------+---------------+
//! ```
//!
//! # Invariants
//!
//! - exactly one fragment of an original packet carries `B`, the first one
//! - exactly one carries `E`, the last one of the chain
//! - sequence numbers wrap silently at 2^12 (short) / 2^24 (long)

pub mod framing;
pub mod mppp_hdr;

#[derive(Debug)]
pub enum DecodingError {
    Decoding { field: &'static str },
}
