//! Bit-plane helpers shared by the encoder and the evaluation code.

use std::iter::FusedIterator;

/// Iterates the set bits of a 64-bit mask as square indices, lowest first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BitIter(u64);

impl BitIter {
    #[inline]
    pub fn new(mask: u64) -> Self { Self(mask) }
}

impl Iterator for BitIter {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        if self.0 == 0 { return None; }
        let idx = self.0.trailing_zeros() as usize;
        self.0 &= self.0 - 1;
        Some(idx)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.0.count_ones() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for BitIter {}
impl FusedIterator for BitIter {}

#[inline]
pub fn iterate_bits(mask: u64) -> BitIter { BitIter::new(mask) }

/// Flips a board mask top-to-bottom: rank 1 becomes rank 8 and so on.
#[inline]
pub fn reverse_bytes_in_bytes(mask: u64) -> u64 { mask.swap_bytes() }

#[inline]
pub fn num_bits(mask: u64) -> u32 { mask.count_ones() }
