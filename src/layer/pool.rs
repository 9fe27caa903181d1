use crate::utils::buf::PktBuf;

use super::packet::Packet;

#[derive(Debug)]
pub enum Error {
    BufExhausted,
}

/// Seam to the external packet-buffer pool.
///
/// The engine allocates fragment buffers here and returns packets here when
/// it is done with them; it never drops a `Packet` it did not create.
pub trait BufPool {
    fn alloc(&self, len: usize) -> Result<PktBuf, Error>;

    fn release(&self, pkt: Packet);

    fn release_chain(&self, chain: Vec<Packet>) {
        for pkt in chain {
            self.release(pkt);
        }
    }
}

/// Plain heap-backed pool: allocation is a `Vec`, release is a drop.
pub struct HeapBufPool;

impl BufPool for HeapBufPool {
    fn alloc(&self, len: usize) -> Result<PktBuf, Error> {
        Ok(PktBuf::new(len, 0))
    }

    fn release(&self, pkt: Packet) {
        drop(pkt);
    }
}
