/// A read cursor over a borrowed plane buffer.
///
/// Mirrors the position/remaining model host buffers expose, so a buffer
/// that has been partially read elsewhere can be represented faithfully.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferView<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> BufferView<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        BufferView { data, position: 0 }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// Move the cursor, clamped to the end of the buffer.
    pub fn set_position(&mut self, position: usize) {
        self.position = position.min(self.data.len());
    }

    pub fn rewind(&mut self) {
        self.position = 0;
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.position
    }

    pub fn has_remaining(&self) -> bool {
        self.remaining() > 0
    }

    /// Copy up to `dst.len()` bytes from the cursor and advance it.
    /// Returns the number of bytes copied.
    pub fn get(&mut self, dst: &mut [u8]) -> usize {
        let n = dst.len().min(self.remaining());
        dst[..n].copy_from_slice(&self.data[self.position..self.position + n]);
        self.position += n;
        n
    }

    /// Rewind, then drain every byte into an owned vector.
    ///
    /// The cursor is left at the end of the buffer.
    #[cfg(feature = "alloc")]
    pub fn to_vec(&mut self) -> alloc::vec::Vec<u8> {
        self.rewind();
        let mut out = alloc::vec![0u8; self.remaining()];
        let copied = self.get(&mut out);
        debug_assert_eq!(copied, out.len());
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_advances_cursor() {
        let data = [1u8, 2, 3, 4, 5];
        let mut view = BufferView::new(&data);
        let mut head = [0u8; 2];
        assert_eq!(view.get(&mut head), 2);
        assert_eq!(head, [1, 2]);
        assert_eq!(view.position(), 2);
        assert_eq!(view.remaining(), 3);

        let mut rest = [0u8; 8];
        assert_eq!(view.get(&mut rest), 3);
        assert_eq!(&rest[..3], &[3, 4, 5]);
        assert!(!view.has_remaining());
    }

    #[test]
    fn set_position_clamps() {
        let data = [0u8; 3];
        let mut view = BufferView::new(&data);
        view.set_position(10);
        assert_eq!(view.position(), 3);
        assert_eq!(view.remaining(), 0);
        view.rewind();
        assert_eq!(view.remaining(), 3);
    }

    #[cfg(feature = "alloc")]
    #[test]
    fn to_vec_ignores_prior_position() {
        let data = [9u8, 8, 7, 6];
        let mut view = BufferView::new(&data);
        view.set_position(3);
        assert_eq!(view.to_vec(), alloc::vec![9, 8, 7, 6]);
        assert_eq!(view.position(), data.len());
    }
}
