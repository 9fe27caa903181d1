#[derive(Debug)]
pub enum Error {
    LinkHdrUnavailable,
}

/// The resolved link header for one interface/link-type pair: the PPP framing
/// bytes followed by the space reserved for the MLPPP control header.
#[derive(Debug, Clone)]
pub struct LinkHdr {
    bytes: Vec<u8>,
}

pub struct LinkHdrBuilder {
    pub bytes: Vec<u8>,
}

impl LinkHdrBuilder {
    pub fn build(self) -> LinkHdr {
        let this = LinkHdr { bytes: self.bytes };
        this.check_rep();
        this
    }
}

impl LinkHdr {
    #[inline]
    fn check_rep(&self) {
        assert!(!self.bytes.is_empty());
    }

    #[must_use]
    #[inline]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Seam to the external per-interface link-header service.
pub trait LinkHdrLookup {
    fn resolve(&self, iface_id: u32, link_type: u16) -> Result<LinkHdr, Error>;
}
