use num_enum::{IntoPrimitive, TryFromPrimitive};

/// PPP address/control field value marking an uncompressed header.
pub const PPP_ADDR: u8 = 0xff;
/// Low byte of the MLPPP protocol number (0x003d).
pub const PPP_PROTO_MPPP_LO: u8 = 0x3d;

/// Negotiated PPP framing variant. The discriminant is the framing length in
/// bytes, which is also the offset of the MLPPP control header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum Framing {
    BothCompressed = 1,
    AddrCompressed = 2,
    ProtoCompressed = 3,
    Full = 4,
}

impl Framing {
    /// Byte offset of the MLPPP control header within the link header.
    #[must_use]
    #[inline]
    pub fn hdr_offset(&self) -> usize {
        u8::from(*self) as usize
    }
}

/// Classifies the leading framing bytes of a packet.
///
/// An uncompressed address field (`0xff`) skips the two address/control
/// bytes; a leading protocol byte of `0x3d` then means the protocol field is
/// compressed to one byte, anything else is taken as the two-byte protocol
/// field. Unrecognized input is not rejected: it classifies under the
/// two-byte default, same as the original data path.
#[must_use]
pub fn classify(data: &[u8]) -> Framing {
    let mut skip = 0;
    if data.first() == Some(&PPP_ADDR) {
        skip += 2;
    }
    match data.get(skip) {
        Some(&PPP_PROTO_MPPP_LO) => match skip {
            0 => Framing::BothCompressed,
            _ => Framing::ProtoCompressed,
        },
        _ => match skip {
            0 => Framing::AddrCompressed,
            _ => Framing::Full,
        },
    }
}
