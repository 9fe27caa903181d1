use std::io;

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};

use crate::utils::Seq;

use super::DecodingError;

pub const SHORT_HDR_LEN: usize = 2;
pub const LONG_HDR_LEN: usize = 4;

pub const HDR_FLAG_BEGIN: u8 = 1 << 7;
pub const HDR_FLAG_END: u8 = 1 << 6;

const SHORT_SEQ_MASK: u32 = 0x0fff;
const LONG_SEQ_MASK: u32 = 0x00ff_ffff;

/// Negotiated MLPPP sequence-number encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeqMode {
    /// 12-bit sequence numbers, 2-byte control header.
    Short,
    /// 24-bit sequence numbers, 4-byte control header.
    Long,
}

impl SeqMode {
    #[must_use]
    #[inline]
    pub fn hdr_len(&self) -> usize {
        match self {
            SeqMode::Short => SHORT_HDR_LEN,
            SeqMode::Long => LONG_HDR_LEN,
        }
    }

    #[must_use]
    #[inline]
    pub fn seq_mask(&self) -> u32 {
        match self {
            SeqMode::Short => SHORT_SEQ_MASK,
            SeqMode::Long => LONG_SEQ_MASK,
        }
    }
}

pub struct MpppHeader {
    begin: bool,
    end: bool,
    seq: Seq,
    mode: SeqMode,
}

pub struct MpppHeaderBuilder {
    pub begin: bool,
    pub end: bool,
    pub seq: Seq,
    pub mode: SeqMode,
}

impl MpppHeaderBuilder {
    pub fn build(self) -> Result<MpppHeader, Error> {
        let this = MpppHeader {
            begin: self.begin,
            end: self.end,
            seq: self.seq,
            mode: self.mode,
        };
        this.check_rep();
        Ok(this)
    }
}

#[derive(Debug)]
pub enum Error {}

impl MpppHeader {
    #[inline]
    fn check_rep(&self) {}

    pub fn from_bytes(rdr: &mut io::Cursor<&[u8]>, mode: SeqMode) -> Result<Self, DecodingError> {
        let flags = rdr
            .read_u8()
            .map_err(|_e| DecodingError::Decoding { field: "flags" })?;
        let seq = match mode {
            SeqMode::Short => {
                let lo = rdr
                    .read_u8()
                    .map_err(|_e| DecodingError::Decoding { field: "seq" })?;
                (((flags & 0x0f) as u32) << 8) | lo as u32
            }
            SeqMode::Long => rdr
                .read_u24::<BigEndian>()
                .map_err(|_e| DecodingError::Decoding { field: "seq" })?,
        };

        let this = MpppHeader {
            begin: flags & HDR_FLAG_BEGIN != 0,
            end: flags & HDR_FLAG_END != 0,
            seq: Seq::from_u32(seq),
            mode,
        };
        this.check_rep();
        Ok(this)
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut flags = 0u8;
        if self.begin {
            flags |= HDR_FLAG_BEGIN;
        }
        if self.end {
            flags |= HDR_FLAG_END;
        }
        let seq = self.seq.to_u32() & self.mode.seq_mask();

        let mut hdr = Vec::new();
        match self.mode {
            SeqMode::Short => {
                hdr.write_u8(flags | ((seq >> 8) & 0x0f) as u8).unwrap();
                hdr.write_u8((seq & 0xff) as u8).unwrap();
                assert_eq!(hdr.len(), SHORT_HDR_LEN);
            }
            SeqMode::Long => {
                hdr.write_u8(flags).unwrap();
                hdr.write_u24::<BigEndian>(seq).unwrap();
                assert_eq!(hdr.len(), LONG_HDR_LEN);
            }
        }
        hdr
    }

    #[must_use]
    #[inline]
    pub fn begin(&self) -> bool {
        self.begin
    }

    #[must_use]
    #[inline]
    pub fn end(&self) -> bool {
        self.end
    }

    #[must_use]
    #[inline]
    pub fn seq(&self) -> Seq {
        self.seq
    }

    #[must_use]
    #[inline]
    pub fn mode(&self) -> SeqMode {
        self.mode
    }
}
