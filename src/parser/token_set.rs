use std::fmt::{self, Debug, Formatter};
use crate::bnf::TermId;

type BitBlock = u64;

const BLOCK_NBITS: usize = std::mem::size_of::<BitBlock>() * 8;

/// Set of terminals of one grammar.
#[derive(Clone, PartialEq, Eq, Hash)]
pub(crate) struct TokenSet {
  slice: Box<[BitBlock]>,
}

impl TokenSet {
  pub fn new(num_tokens: usize) -> Self {
    let len = (num_tokens + BLOCK_NBITS - 1) / BLOCK_NBITS;
    Self {
      slice: vec![0; len].into_boxed_slice(),
    }
  }

  pub fn clear(&mut self) {
    for x in self.slice.iter_mut() {
      *x = 0;
    }
  }

  /// Returns whether the set has changed.
  pub fn insert(&mut self, token: TermId) -> bool {
    let (block, mask) = Self::locate(token);
    let old = self.slice[block];
    self.slice[block] |= mask;
    old != self.slice[block]
  }

  pub fn contains(&self, token: TermId) -> bool {
    let (block, mask) = Self::locate(token);
    self.slice.get(block).map_or(false, |&x| x & mask != 0)
  }

  /// Returns whether the set has changed.
  pub fn union_with(&mut self, other: &TokenSet) -> bool {
    let mut changed = false;
    for (x, &y) in self.slice.iter_mut().zip(other.slice.iter()) {
      let old = *x;
      *x |= y;
      changed |= old != *x;
    }
    changed
  }

  pub fn iter(&self) -> Iter {
    Iter {
      slice: &*self.slice,
      bit: 0,
      index: 0,
    }
  }

  fn locate(token: TermId) -> (usize, BitBlock) {
    let bit = token.0 as usize;
    (bit / BLOCK_NBITS, 1 << (bit % BLOCK_NBITS))
  }
}

pub(crate) struct Iter<'a> {
  slice: &'a [BitBlock],
  bit: usize,
  index: usize,
}

impl<'a> Iterator for Iter<'a> {
  type Item = TermId;

  fn next(&mut self) -> Option<TermId> {
    while self.index < self.slice.len() {
      if self.bit < BLOCK_NBITS {
        let bit = (self.slice[self.index] & !((1 << self.bit) - 1))
          .trailing_zeros() as usize;
        if bit < BLOCK_NBITS {
          self.bit = bit + 1;
          return Some(TermId((self.index * BLOCK_NBITS + bit) as u32));
        }
      }

      self.index += 1;
      self.bit = 0;
    }
    None
  }
}

impl Debug for TokenSet {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    f.debug_set().entries(self.iter().map(|t| t.0)).finish()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;

  #[test]
  fn insert() {
    let mut set = TokenSet::new(15);

    assert!(set.insert(TermId(7)));
    set.insert(TermId(3));
    assert!(!set.insert(TermId(7)));
    set.insert(TermId(14));

    let vec = set.iter().map(|t| t.0).collect::<Vec<_>>();

    assert_eq!(vec, vec![3, 7, 14]);
    assert!(set.contains(TermId(14)));
    assert!(!set.contains(TermId(4)));
  }

  #[test]
  fn across_blocks() {
    let mut set = TokenSet::new(130);
    set.insert(TermId(63));
    set.insert(TermId(64));
    set.insert(TermId(129));

    let vec = set.iter().map(|t| t.0).collect::<Vec<_>>();
    assert_eq!(vec, vec![63, 64, 129]);
  }

  #[test]
  fn union_reports_change() {
    let mut a = TokenSet::new(10);
    let mut b = TokenSet::new(10);
    a.insert(TermId(1));
    b.insert(TermId(1));

    assert!(!a.union_with(&b));
    b.insert(TermId(9));
    assert!(a.union_with(&b));
    assert_eq!(a, b);
  }
}
