use alloc::{vec, vec::Vec};

/// Fixed size set of cluster indices, used to catch chains that loop back on themselves.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct BitMap {
    vc: Vec<u64>,
    size: usize,
}

impl BitMap {
    /// Constructs a new bitmap able to hold `size` bits, all of them clear.
    pub fn new(size: usize) -> Self {
        let vec_length = {
            if size % 64 != 0 {
                size / 64 + 1
            } else {
                size / 64
            }
        };

        return Self {
            vc: vec![0; vec_length],
            size,
        };
    }

    /// Sets or clears the bit at index. Returns false if the index is outside the map.
    pub fn set_bit(&mut self, index: usize, value: bool) -> bool {
        if index >= self.size {
            return false;
        }

        let (array_index, bit) = (index / 64, index % 64);

        if value {
            self.vc[array_index] |= 1 << bit;
        } else {
            self.vc[array_index] &= !(1 << bit);
        }

        return true;
    }

    /// Returns whether a bit at a specified index was set.
    pub fn bit_at(&self, index: usize) -> Option<bool> {
        if index >= self.size {
            return None;
        }

        let (array_index, bit) = (index / 64, index % 64);

        return Some((self.vc[array_index] >> bit) & 1 == 1);
    }

    /// Sets the bit at index and reports whether it was already set. Indices outside the map
    /// count as already set.
    pub fn test_and_set(&mut self, index: usize) -> bool {
        return match self.bit_at(index) {
            Some(false) => !self.set_bit(index, true),
            _ => true,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bit_set() {
        let mut map = BitMap::new(30);

        assert!(map.set_bit(3, true));
        assert_eq!(map.bit_at(3), Some(true));
        assert_eq!(map.bit_at(4), Some(false));
    }

    #[test]
    fn test_bit_clear() {
        let mut map = BitMap::new(1024);

        assert!(map.set_bit(342, true));
        assert!(map.set_bit(342, false));
        assert_eq!(map.bit_at(342), Some(false));

        // Clearing an already clear bit must not set it.
        assert!(map.set_bit(342, false));
        assert_eq!(map.bit_at(342), Some(false));
    }

    #[test]
    fn test_out_of_bounds() {
        let mut map = BitMap::new(30);

        assert!(!map.set_bit(30, true));
        assert_eq!(map.bit_at(30), None);
        assert_eq!(map.bit_at(63), None);
    }

    #[test]
    fn test_and_set() {
        let mut map = BitMap::new(255);

        assert!(!map.test_and_set(254));
        assert!(map.test_and_set(254));
        assert!(map.test_and_set(255));
    }
}
