use log::trace;

use crate::protocol::{framing, mppp_hdr::MpppHeaderBuilder};

use super::{
    fragment::{self, frag_packet},
    iface::{LockPolicy, MpppIface},
    link_hdr::LinkHdrLookup,
    packet::{Packet, DESC_FLAG_MPPP_ENC},
    pool::BufPool,
};

/// Terminal failure of one transmit call. Ownership of the original packet
/// goes back to the caller; its payload cursor may already have advanced if
/// fragmentation got part-way before failing.
#[derive(Debug)]
pub struct TxError {
    pub kind: fragment::Error,
    pub pkt: Packet,
}

/// Transmit-side encapsulation engine for one forwarding path. Fragmenting
/// and pass-through calls may run concurrently against the same interface.
pub struct MpppTx<P, L> {
    pool: P,
    lookup: L,
}

pub struct MpppTxBuilder<P, L> {
    pub pool: P,
    pub lookup: L,
}

impl<P, L> MpppTxBuilder<P, L> {
    pub fn build(self) -> MpppTx<P, L> {
        MpppTx {
            pool: self.pool,
            lookup: self.lookup,
        }
    }
}

impl<P, L> MpppTx<P, L>
where
    P: BufPool,
    L: LinkHdrLookup,
{
    /// Encapsulates one outbound packet for transmission.
    ///
    /// A packet no longer than the interface's fragment weight passes
    /// through as the single node of the output chain; a longer one is
    /// split, each fragment stamped with a control header under the
    /// interface lock, and the original released back to the pool once its
    /// bytes live in the fragments.
    pub fn encap_for_tx(&self, iface: &MpppIface, mut pkt: Packet) -> Result<Vec<Packet>, TxError> {
        let frag_weight = iface.frag_weight();
        let pkt_len = pkt.data_len();

        if pkt_len <= frag_weight {
            trace!("pass-through, len {} <= weight {}", pkt_len, frag_weight);
            let mut chain = vec![pkt];
            {
                let _guard = match iface.lock_policy() {
                    LockPolicy::Always => Some(iface.lock()),
                    LockPolicy::FragmentedOnly => None,
                };
                let node = &mut chain[0];
                let begin = !node.take_frag_begin();
                encap_hdr(iface, node, begin, true);
            }
            return Ok(chain);
        }

        let mut chain = match frag_packet(iface, &self.pool, &self.lookup, &mut pkt, frag_weight) {
            Ok(x) => x,
            Err(kind) => return Err(TxError { kind, pkt }),
        };

        {
            // Held across the whole chain so two concurrent senders cannot
            // interleave their sequence numbers mid-chain.
            let _guard = iface.lock();
            let last = chain.len() - 1;
            for (i, frag) in chain.iter_mut().enumerate() {
                let begin = !pkt.take_frag_begin();
                encap_hdr(iface, frag, begin, i == last);
            }
        }

        // Fully copied into the fragments by now.
        self.pool.release(pkt);
        Ok(chain)
    }
}

/// Writes one control header into the space the link header reserves after
/// the PPP framing, consuming one sequence number.
fn encap_hdr(iface: &MpppIface, pkt: &mut Packet, begin: bool, end: bool) {
    let offset = framing::classify(pkt.data()).hdr_offset();
    let seq = iface.next_seq();
    let hdr = MpppHeaderBuilder {
        begin,
        end,
        seq,
        mode: iface.seq_mode(),
    }
    .build()
    .unwrap();
    let bytes = hdr.to_bytes();

    assert!(offset + bytes.len() <= pkt.data_len());
    pkt.buf_mut().data_mut()[offset..offset + bytes.len()].copy_from_slice(&bytes);
    pkt.set_desc_flag(DESC_FLAG_MPPP_ENC);
}
