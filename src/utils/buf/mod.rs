mod pkt_buf;

pub use pkt_buf::*;
