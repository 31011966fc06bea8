/// Reusable output buffer with explicit in-use length.
///
/// Storage is allocated lazily and kept across [`GrowBuffer::clear`]. When a
/// write would overflow, capacity doubles first; the used prefix is preserved.
#[derive(Clone, Debug, Default)]
pub struct GrowBuffer<T> {
    data: Vec<T>,
    len: usize,
}

impl<T: Copy + Default> GrowBuffer<T> {
    pub fn new() -> Self {
        Self {
            data: Vec::new(),
            len: 0,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: vec![T::default(); capacity],
            len: 0,
        }
    }

    /// Allocates `initial` slots if nothing has been allocated yet.
    pub fn ensure_allocated(&mut self, initial: usize) {
        if self.data.is_empty() && initial > 0 {
            self.data.resize(initial, T::default());
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Grows until `extra` more items fit.
    pub fn reserve_for(&mut self, extra: usize) {
        let need = self.len + extra;
        if need <= self.data.len() {
            return;
        }
        let mut cap = self.data.len().max(1);
        while cap < need {
            cap *= 2;
        }
        log::trace!("grow buffer {} -> {}", self.data.len(), cap);
        self.data.resize(cap, T::default());
    }

    #[inline]
    pub fn push(&mut self, value: T) {
        self.reserve_for(1);
        self.data[self.len] = value;
        self.len += 1;
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data[..self.len]
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data[..self.len]
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.as_slice().to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lazy_until_first_allocation() {
        let mut b: GrowBuffer<u16> = GrowBuffer::new();
        assert_eq!(b.capacity(), 0);
        b.ensure_allocated(512);
        assert_eq!(b.capacity(), 512);
        b.ensure_allocated(8);
        assert_eq!(b.capacity(), 512);
    }

    #[test]
    fn doubling_preserves_prefix() {
        let mut b = GrowBuffer::with_capacity(4);
        for i in 0..4u16 {
            b.push(i);
        }
        assert_eq!(b.capacity(), 4);
        b.push(4);
        assert_eq!(b.capacity(), 8);
        for i in 5..17u16 {
            b.push(i);
        }
        assert_eq!(b.capacity(), 32);
        assert_eq!(b.as_slice(), (0..17u16).collect::<Vec<_>>().as_slice());
    }

    #[test]
    fn push_from_zero_capacity() {
        let mut b: GrowBuffer<u32> = GrowBuffer::new();
        b.push(7);
        assert_eq!(b.as_slice(), &[7]);
        assert_eq!(b.capacity(), 1);
    }

    #[test]
    fn clear_keeps_storage() {
        let mut b = GrowBuffer::with_capacity(6);
        b.reserve_for(13);
        assert_eq!(b.capacity(), 24);
        b.push(1u8);
        b.clear();
        assert!(b.is_empty());
        assert_eq!(b.capacity(), 24);
    }
}
