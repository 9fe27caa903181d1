use std::cmp;

use log::{debug, trace};

use super::{
    iface::MpppIface,
    link_hdr::{self, LinkHdrLookup},
    packet::{Packet, PREDATA_LEN},
    pool::{self, BufPool},
};

#[derive(Debug)]
pub enum Error {
    LinkHdrUnavailable,
    BufExhausted,
}

/// Splits one oversized packet into a chain of fragments, each carrying a
/// fresh copy of the resolved link header in front of its payload slice.
///
/// The original packet's data must begin with the link-framing bytes the
/// lookup resolves for it; they are dropped from the original and
/// re-synthesized per fragment. On any failure no chain escapes: fragments
/// already produced go back to the pool and the original is left for the
/// caller to dispose of.
pub fn frag_packet(
    iface: &MpppIface,
    pool: &impl BufPool,
    lookup: &impl LinkHdrLookup,
    pkt: &mut Packet,
    frag_weight: usize,
) -> Result<Vec<Packet>, Error> {
    let link_hdr = match lookup.resolve(iface.iface_id(), pkt.link_type()) {
        Ok(x) => x,
        Err(link_hdr::Error::LinkHdrUnavailable) => {
            debug!(
                "no link header for iface {} link type {}",
                iface.iface_id(),
                pkt.link_type()
            );
            return Err(Error::LinkHdrUnavailable);
        }
    };
    let hdr_len = link_hdr.len();

    // The original carries the same framing in front of its payload.
    assert!(pkt.data_len() >= hdr_len);
    pkt.buf_mut().shrink_front(hdr_len).unwrap();

    let mut chain: Vec<Packet> = Vec::new();
    let mut remain = pkt.data_len();
    while remain > 0 {
        let frag_size = cmp::min(frag_weight, remain);

        let mut buf = match pool.alloc(frag_size + hdr_len + PREDATA_LEN) {
            Ok(x) => x,
            Err(pool::Error::BufExhausted) => {
                debug!("pool exhausted after {} fragments; rolling back", chain.len());
                pool.release_chain(chain);
                return Err(Error::BufExhausted);
            }
        };

        // Head room first, then link header, then the payload slice. The
        // allocation above sized the buffer for exactly these three parts.
        buf.reset_data(PREDATA_LEN);
        buf.append(link_hdr.bytes()).unwrap();
        buf.append(&pkt.data()[..frag_size]).unwrap();
        chain.push(pkt.frag_from(buf));

        pkt.buf_mut().shrink_front(frag_size).unwrap();
        remain -= frag_size;
    }

    trace!("split into {} fragments of weight <= {}", chain.len(), frag_weight);
    Ok(chain)
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, rc::Rc};

    use super::*;
    use crate::{
        layer::{
            iface::{LockPolicy, MpppIfaceBuilder},
            link_hdr::{LinkHdr, LinkHdrBuilder},
            packet::{PacketBuilder, DESC_FLAG_FRAG_BEGIN},
            pool::HeapBufPool,
        },
        utils::buf::PktBuf,
    };

    const LINK_HDR: [u8; 8] = [0xff, 0x03, 0x00, 0x3d, 0, 0, 0, 0];

    struct FixedLookup;

    impl LinkHdrLookup for FixedLookup {
        fn resolve(&self, _iface_id: u32, _link_type: u16) -> Result<LinkHdr, link_hdr::Error> {
            Ok(LinkHdrBuilder {
                bytes: LINK_HDR.to_vec(),
            }
            .build())
        }
    }

    struct FailingLookup;

    impl LinkHdrLookup for FailingLookup {
        fn resolve(&self, _iface_id: u32, _link_type: u16) -> Result<LinkHdr, link_hdr::Error> {
            Err(link_hdr::Error::LinkHdrUnavailable)
        }
    }

    /// Fails the n-th allocation (1-based) and counts buffers still out.
    struct CountingPool {
        fail_at: Cell<Option<usize>>,
        allocs: Cell<usize>,
        outstanding: Rc<Cell<isize>>,
    }

    impl CountingPool {
        fn new(fail_at: Option<usize>) -> Self {
            CountingPool {
                fail_at: Cell::new(fail_at),
                allocs: Cell::new(0),
                outstanding: Rc::new(Cell::new(0)),
            }
        }
    }

    impl BufPool for CountingPool {
        fn alloc(&self, len: usize) -> Result<PktBuf, pool::Error> {
            self.allocs.set(self.allocs.get() + 1);
            if self.fail_at.get() == Some(self.allocs.get()) {
                return Err(pool::Error::BufExhausted);
            }
            self.outstanding.set(self.outstanding.get() + 1);
            Ok(PktBuf::new(len, 0))
        }

        fn release(&self, pkt: Packet) {
            self.outstanding.set(self.outstanding.get() - 1);
            drop(pkt);
        }
    }

    fn iface(frag_weight: usize) -> crate::layer::iface::MpppIface {
        MpppIfaceBuilder {
            iface_id: 3,
            cfg_flags: 0,
            frag_weight,
            lock_policy: LockPolicy::Always,
        }
        .build()
        .unwrap()
    }

    fn packet(payload: &[u8]) -> Packet {
        let mut buf = PktBuf::new(LINK_HDR.len() + payload.len() + 64, 32);
        buf.append(&LINK_HDR).unwrap();
        buf.append(payload).unwrap();
        PacketBuilder {
            buf,
            desc_flags: 0,
            link_type: 1,
        }
        .build()
    }

    #[test]
    fn fragment_count_and_sizes() {
        let iface = iface(100);
        let payload: Vec<u8> = (0..=255).cycle().take(250).map(|x| x as u8).collect();
        let mut pkt = packet(&payload);

        let chain = frag_packet(&iface, &HeapBufPool, &FixedLookup, &mut pkt, 100).unwrap();

        assert_eq!(chain.len(), 3);
        let payload_lens: Vec<usize> = chain
            .iter()
            .map(|frag| frag.data_len() - LINK_HDR.len())
            .collect();
        assert_eq!(payload_lens, vec![100, 100, 50]);

        let mut reassembled = Vec::new();
        for frag in &chain {
            assert_eq!(&frag.data()[..LINK_HDR.len()], &LINK_HDR);
            reassembled.extend_from_slice(&frag.data()[LINK_HDR.len()..]);
        }
        assert_eq!(reassembled, payload);
    }

    #[test]
    fn exact_multiple_has_no_empty_remainder() {
        let iface = iface(100);
        let payload = vec![7u8; 300];
        let mut pkt = packet(&payload);

        let chain = frag_packet(&iface, &HeapBufPool, &FixedLookup, &mut pkt, 100).unwrap();

        assert_eq!(chain.len(), 3);
        for frag in &chain {
            assert_eq!(frag.data_len(), 100 + LINK_HDR.len());
        }
    }

    #[test]
    fn fragments_reserve_head_room() {
        let iface = iface(64);
        let mut pkt = packet(&vec![1u8; 130]);

        let chain = frag_packet(&iface, &HeapBufPool, &FixedLookup, &mut pkt, 64).unwrap();

        for frag in &chain {
            assert_eq!(frag.buf().front_len(), PREDATA_LEN);
        }
    }

    #[test]
    fn begin_latch_cleared_on_fragments() {
        let iface = iface(50);
        let mut pkt = packet(&vec![0u8; 120]);
        pkt.set_desc_flag(DESC_FLAG_FRAG_BEGIN);

        let chain = frag_packet(&iface, &HeapBufPool, &FixedLookup, &mut pkt, 50).unwrap();

        for frag in &chain {
            assert!(!frag.has_desc_flag(DESC_FLAG_FRAG_BEGIN));
        }
    }

    #[test]
    fn link_hdr_failure_is_terminal() {
        let iface = iface(100);
        let mut pkt = packet(&vec![0u8; 300]);
        let len_before = pkt.data_len();

        let result = frag_packet(&iface, &HeapBufPool, &FailingLookup, &mut pkt, 100);

        assert!(matches!(result, Err(Error::LinkHdrUnavailable)));
        // Terminal before any cursor surgery on the original.
        assert_eq!(pkt.data_len(), len_before);
    }

    #[test]
    fn alloc_failure_mid_loop_releases_prior_fragments() {
        let iface = iface(100);
        let mut pkt = packet(&vec![0u8; 500]);
        // 5 fragments needed; fail the 3rd allocation.
        let pool = CountingPool::new(Some(3));
        let outstanding = Rc::clone(&pool.outstanding);

        let result = frag_packet(&iface, &pool, &FixedLookup, &mut pkt, 100);

        assert!(matches!(result, Err(Error::BufExhausted)));
        assert_eq!(outstanding.get(), 0);
    }

    #[test]
    fn success_leaves_all_fragments_outstanding() {
        let iface = iface(100);
        let mut pkt = packet(&vec![0u8; 500]);
        let pool = CountingPool::new(None);
        let outstanding = Rc::clone(&pool.outstanding);

        let chain = frag_packet(&iface, &pool, &FixedLookup, &mut pkt, 100).unwrap();

        assert_eq!(chain.len(), 5);
        assert_eq!(outstanding.get(), 5);
        pool.release_chain(chain);
        assert_eq!(outstanding.get(), 0);
    }

    #[test]
    fn counting_pool_fails_only_the_requested_alloc() {
        let pool = CountingPool::new(Some(1));
        assert!(pool.alloc(8).is_err());
        assert!(pool.alloc(8).is_ok());
    }
}
