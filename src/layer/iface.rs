use std::sync::{
    atomic::{AtomicU32, Ordering},
    Mutex, MutexGuard,
};

use crate::{protocol::mppp_hdr::SeqMode, utils::Seq};

/// Fragments must preserve arrival order across the bundle.
pub const CFG_FLAG_INPUT_ORDER: u32 = 1 << 0;
/// Use 12-bit instead of 24-bit sequence numbers.
pub const CFG_FLAG_SHORT_SEQ: u32 = 1 << 1;

/// When the transmit path takes the interface lock.
///
/// The original data path locked only while fragmenting, which leaves the
/// pass-through path free to consume a sequence number in the middle of a
/// concurrent chain. `FragmentedOnly` reproduces that historical window;
/// `Always` closes it and is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockPolicy {
    FragmentedOnly,
    Always,
}

/// One multilink-bundle-member configuration entry.
pub struct MpppIface {
    iface_id: u32,
    cfg_flags: u32,
    frag_weight: usize,
    lock_policy: LockPolicy,
    seq: AtomicU32,
    tx_lock: Mutex<()>,
}

pub struct MpppIfaceBuilder {
    pub iface_id: u32,
    pub cfg_flags: u32,
    pub frag_weight: usize,
    pub lock_policy: LockPolicy,
}

impl MpppIfaceBuilder {
    pub fn build(self) -> Result<MpppIface, BuildError> {
        if self.frag_weight == 0 {
            return Err(BuildError::ZeroFragWeight);
        }
        let this = MpppIface {
            iface_id: self.iface_id,
            cfg_flags: self.cfg_flags,
            frag_weight: self.frag_weight,
            lock_policy: self.lock_policy,
            seq: AtomicU32::new(0),
            tx_lock: Mutex::new(()),
        };
        this.check_rep();
        Ok(this)
    }
}

#[derive(Debug)]
pub enum BuildError {
    ZeroFragWeight,
}

impl MpppIface {
    #[inline]
    fn check_rep(&self) {
        assert!(self.frag_weight > 0);
    }

    #[must_use]
    #[inline]
    pub fn iface_id(&self) -> u32 {
        self.iface_id
    }

    #[must_use]
    #[inline]
    pub fn frag_weight(&self) -> usize {
        self.frag_weight
    }

    #[must_use]
    #[inline]
    pub fn lock_policy(&self) -> LockPolicy {
        self.lock_policy
    }

    #[must_use]
    #[inline]
    pub fn input_order(&self) -> bool {
        self.cfg_flags & CFG_FLAG_INPUT_ORDER != 0
    }

    #[must_use]
    #[inline]
    pub fn seq_mode(&self) -> SeqMode {
        match self.cfg_flags & CFG_FLAG_SHORT_SEQ != 0 {
            true => SeqMode::Short,
            false => SeqMode::Long,
        }
    }

    /// Allocates the next sequence number. A single indivisible read-and-
    /// increment: two callers never observe the same value.
    #[inline]
    pub fn next_seq(&self) -> Seq {
        Seq::from_u32(self.seq.fetch_add(1, Ordering::Relaxed))
    }

    /// Serializes a whole chain's header writes. Held across the per-chain
    /// encapsulation loop, not per fragment.
    pub fn lock(&self) -> MutexGuard<'_, ()> {
        self.tx_lock.lock().unwrap()
    }
}
