use std::num::Wrapping;

/// A raw sequence value. Truncation to the 12-bit or 24-bit MLPPP sequence
/// space happens at header-encoding time, never here.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Seq {
    n: u32,
}

impl Seq {
    pub fn from_u32(n: u32) -> Self {
        Seq { n }
    }

    pub fn to_u32(&self) -> u32 {
        self.n
    }

    pub fn add_u32(&self, n: u32) -> Seq {
        let s = Wrapping(self.n) + Wrapping(n);
        Seq { n: s.0 }
    }

    pub fn increment(&mut self) {
        *self = self.add_u32(1);
    }
}
