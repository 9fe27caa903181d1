use crate::utils::buf::PktBuf;

/// This original packet has already emitted its first fragment.
pub const DESC_FLAG_FRAG_BEGIN: u16 = 1 << 0;
/// This fragment's MLPPP control header has been written.
pub const DESC_FLAG_MPPP_ENC: u16 = 1 << 1;

/// Head room reserved in every fragment buffer for headers prepended by
/// lower layers.
pub const PREDATA_LEN: usize = 20;

/// One node of a packet chain: the buffer plus the descriptor state that
/// travels with it.
#[derive(Debug)]
pub struct Packet {
    buf: PktBuf,
    desc_flags: u16,
    link_type: u16,
}

pub struct PacketBuilder {
    pub buf: PktBuf,
    pub desc_flags: u16,
    pub link_type: u16,
}

impl PacketBuilder {
    pub fn build(self) -> Packet {
        let this = Packet {
            buf: self.buf,
            desc_flags: self.desc_flags,
            link_type: self.link_type,
        };
        this.check_rep();
        this
    }
}

impl Packet {
    #[inline]
    fn check_rep(&self) {}

    #[must_use]
    #[inline]
    pub fn data(&self) -> &[u8] {
        self.buf.data()
    }

    #[must_use]
    #[inline]
    pub fn data_len(&self) -> usize {
        self.buf.data_len()
    }

    #[must_use]
    #[inline]
    pub fn link_type(&self) -> u16 {
        self.link_type
    }

    #[must_use]
    #[inline]
    pub fn buf(&self) -> &PktBuf {
        &self.buf
    }

    #[inline]
    pub fn buf_mut(&mut self) -> &mut PktBuf {
        &mut self.buf
    }

    #[must_use]
    #[inline]
    pub fn has_desc_flag(&self, flag: u16) -> bool {
        self.desc_flags & flag != 0
    }

    #[inline]
    pub fn set_desc_flag(&mut self, flag: u16) {
        self.desc_flags |= flag;
    }

    /// Latches the begin marker: returns whether it was already set, setting
    /// it either way. The first caller per original packet sees `false`.
    #[inline]
    pub fn take_frag_begin(&mut self) -> bool {
        let seen = self.has_desc_flag(DESC_FLAG_FRAG_BEGIN);
        self.set_desc_flag(DESC_FLAG_FRAG_BEGIN);
        seen
    }

    /// Builds a fragment around `buf`, copying this packet's descriptor.
    /// The begin latch is not copied; its authoritative home is the original
    /// packet.
    #[must_use]
    pub fn frag_from(&self, buf: PktBuf) -> Packet {
        let this = Packet {
            buf,
            desc_flags: self.desc_flags & !DESC_FLAG_FRAG_BEGIN,
            link_type: self.link_type,
        };
        this.check_rep();
        this
    }

    pub fn into_buf(self) -> PktBuf {
        self.buf
    }
}
