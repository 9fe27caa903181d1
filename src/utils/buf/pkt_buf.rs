/// A fixed-capacity packet buffer with a movable data window.
///
/// ```text
/// 0        start          end       capacity
/// +--------+--------------+---------+
/// | front  |     data     |  back   |
/// +--------+--------------+---------+
/// ```
///
/// The front region is head room reserved for headers prepended by lower
/// layers; the data window holds the packet bytes. Advancing `start` drops
/// leading bytes in place, without copying.
#[derive(Debug)]
pub struct PktBuf {
    buf: Vec<u8>,
    start: usize,
    end: usize,
}

#[derive(Debug)]
pub enum Error {
    NotEnoughSpace,
}

impl PktBuf {
    #[inline]
    fn check_rep(&self) {
        assert!(self.start <= self.end);
        assert!(self.end <= self.buf.len());
    }

    pub fn new(capacity: usize, start: usize) -> Self {
        let this = Self {
            buf: vec![0; capacity],
            start,
            end: start,
        };
        this.check_rep();
        this
    }

    pub fn from_bytes(buf: Vec<u8>, start: usize, end: usize) -> Self {
        let this = Self { buf, start, end };
        this.check_rep();
        this
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    #[inline]
    pub fn data_len(&self) -> usize {
        self.end - self.start
    }

    #[inline]
    pub fn front_len(&self) -> usize {
        self.start
    }

    #[inline]
    pub fn back_len(&self) -> usize {
        self.buf.len() - self.end
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data_len() == 0
    }

    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.buf[self.start..self.end]
    }

    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.buf[self.start..self.end]
    }

    /// Empties the data window and repositions it at `start`, leaving the
    /// bytes in front as head room.
    #[inline]
    pub fn reset_data(&mut self, start: usize) {
        assert!(start <= self.buf.len());
        self.start = start;
        self.end = start;
        self.check_rep();
    }

    #[inline]
    pub fn grow_front(&mut self, len: usize) -> Result<(), Error> {
        if self.start < len {
            return Err(Error::NotEnoughSpace);
        }
        self.start -= len;
        self.check_rep();
        Ok(())
    }

    /// Advances the data cursor, dropping `len` leading bytes.
    #[inline]
    pub fn shrink_front(&mut self, len: usize) -> Result<(), Error> {
        if self.end < self.start + len {
            return Err(Error::NotEnoughSpace);
        }
        self.start += len;
        self.check_rep();
        Ok(())
    }

    #[inline]
    pub fn append(&mut self, n: &[u8]) -> Result<(), Error> {
        if self.back_len() < n.len() {
            return Err(Error::NotEnoughSpace);
        }
        self.buf[self.end..self.end + n.len()].copy_from_slice(n);
        self.end += n.len();
        self.check_rep();
        Ok(())
    }

    #[inline]
    pub fn prepend(&mut self, n: &[u8]) -> Result<(), Error> {
        if self.front_len() < n.len() {
            return Err(Error::NotEnoughSpace);
        }
        self.buf[self.start - n.len()..self.start].copy_from_slice(n);
        self.start -= n.len();
        self.check_rep();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_prepend() {
        let mut buf = PktBuf::new(1024, 512);
        let tail = vec![1, 2, 3];
        let head = vec![4, 5, 6];
        buf.append(&tail).unwrap();
        buf.prepend(&head).unwrap();
        assert_eq!(buf.data(), vec![4, 5, 6, 1, 2, 3]);
    }

    #[test]
    fn shrink_front_drops_leading_bytes() {
        let mut buf = PktBuf::new(64, 0);
        buf.append(&[9, 9, 1, 2, 3]).unwrap();
        buf.shrink_front(2).unwrap();
        assert_eq!(buf.data(), vec![1, 2, 3]);
        assert_eq!(buf.front_len(), 2);
    }

    #[test]
    fn shrink_front_beyond_data() {
        let mut buf = PktBuf::new(16, 0);
        buf.append(&[1, 2]).unwrap();
        assert!(buf.shrink_front(3).is_err());
    }

    #[test]
    fn reset_data_reserves_head_room() {
        let mut buf = PktBuf::new(32, 0);
        buf.reset_data(20);
        buf.append(&[7, 8]).unwrap();
        assert_eq!(buf.front_len(), 20);
        assert_eq!(buf.data(), vec![7, 8]);
    }

    #[test]
    fn append_over_capacity() {
        let mut buf = PktBuf::new(4, 0);
        assert!(buf.append(&[0; 5]).is_err());
    }
}
