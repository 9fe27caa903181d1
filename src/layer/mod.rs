pub mod fragment;
pub mod iface;
pub mod link_hdr;
pub mod packet;
pub mod pool;
pub mod tx;
