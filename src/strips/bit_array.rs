use std::fmt;

const WORD_BITS: usize = 64;

/// Flat bit vector with a length fixed at construction.
///
/// Bits past `len()` are never touched, so `count_ones` and `iter_ones` only
/// ever see the addressable range.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct BitArray {
    words: Vec<u64>,
    len: usize,
}

impl BitArray {
    pub fn new(len: usize) -> Self {
        Self {
            words: vec![0; (len + WORD_BITS - 1) / WORD_BITS],
            len,
        }
    }

    /// A `len` bit array with exactly the listed bits set.
    pub fn with_ones(len: usize, ones: &[usize]) -> Self {
        let mut bits = Self::new(len);
        ones.iter().for_each(|&i| bits.set(i));
        bits
    }

    #[inline]
    fn locate(&self, idx: usize) -> (usize, u64) {
        assert!(idx < self.len, "bit {} out of range for a BitArray of {} bits", idx, self.len);
        (idx / WORD_BITS, 1u64 << (idx % WORD_BITS))
    }

    #[inline]
    pub fn set(&mut self, idx: usize) {
        let (word, mask) = self.locate(idx);
        self.words[word] |= mask;
    }

    #[inline]
    pub fn unset(&mut self, idx: usize) {
        let (word, mask) = self.locate(idx);
        self.words[word] &= !mask;
    }

    #[inline]
    pub fn isset(&self, idx: usize) -> bool {
        let (word, mask) = self.locate(idx);
        self.words[word] & mask != 0
    }

    /// Clears every bit. Length and storage are kept.
    pub fn reset(&mut self) {
        self.words.iter_mut().for_each(|w| *w = 0);
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Indices of the set bits, ascending.
    pub fn iter_ones(&self) -> impl Iterator<Item = usize> + '_ {
        self.words.iter().enumerate().flat_map(|(i, &word)| {
            let mut rest = word;
            std::iter::from_fn(move || {
                if rest == 0 {
                    None
                } else {
                    let bit = rest.trailing_zeros() as usize;
                    rest &= rest - 1;
                    Some(i * WORD_BITS + bit)
                }
            })
        })
    }
}

impl fmt::Display for BitArray {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        (0..self.len).try_for_each(|i| write!(f, "{}", if self.isset(i) { '1' } else { '0' }))
    }
}
