//! 225-cell occupancy set packed into four machine words

use super::{Pos, TOTAL_CELLS};

/// Cells per word
const LANE: usize = u64::BITS as usize;

/// Words needed to cover the board (the last one is partly padding)
const WORDS: usize = TOTAL_CELLS.div_ceil(LANE);

/// Word and bit mask holding `pos`
#[inline]
fn slot(pos: Pos) -> (usize, u64) {
    let idx = pos.to_index();
    (idx / LANE, 1 << (idx % LANE))
}

/// Set of cells occupied by one color, indexed row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Bitboard {
    words: [u64; WORDS],
}

impl Bitboard {
    pub const fn new() -> Self {
        Self { words: [0; WORDS] }
    }

    #[inline]
    pub fn set(&mut self, pos: Pos) {
        let (word, mask) = slot(pos);
        self.words[word] |= mask;
    }

    #[inline]
    pub fn clear(&mut self, pos: Pos) {
        let (word, mask) = slot(pos);
        self.words[word] &= !mask;
    }

    #[inline]
    pub fn get(&self, pos: Pos) -> bool {
        let (word, mask) = slot(pos);
        self.words[word] & mask != 0
    }

    /// Number of occupied cells
    #[inline]
    pub fn count(&self) -> u32 {
        self.words.iter().copied().map(u64::count_ones).sum()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.words == [0; WORDS]
    }

    /// Occupied cells in row-major order
    pub fn iter_ones(&self) -> impl Iterator<Item = Pos> {
        let words = self.words;
        (0..WORDS).flat_map(move |w| Ones(words[w]).map(move |bit| Pos::from_index(w * LANE + bit)))
    }
}

/// Set bit offsets of one word, lowest first
struct Ones(u64);

impl Iterator for Ones {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        if self.0 == 0 {
            return None;
        }
        let bit = self.0.trailing_zeros() as usize;
        self.0 &= self.0 - 1;
        Some(bit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_words_cover_board() {
        assert_eq!(WORDS, 4);
        assert!(WORDS * LANE >= TOTAL_CELLS);
    }

    #[test]
    fn test_set_get_clear() {
        let mut bb = Bitboard::new();
        let pos = Pos::new(14, 14);
        assert!(!bb.get(pos));
        bb.set(pos);
        assert!(bb.get(pos));
        assert_eq!(bb.count(), 1);
        bb.clear(pos);
        assert!(bb.is_empty());
    }

    #[test]
    fn test_iter_row_major_across_words() {
        let mut bb = Bitboard::new();
        // cells 153 and 64 sit in later words than cell 0
        bb.set(Pos::new(10, 3));
        bb.set(Pos::new(0, 0));
        bb.set(Pos::new(4, 4));
        let cells: Vec<Pos> = bb.iter_ones().collect();
        assert_eq!(cells, vec![Pos::new(0, 0), Pos::new(4, 4), Pos::new(10, 3)]);
    }

    #[test]
    fn test_last_cell() {
        let mut bb = Bitboard::new();
        bb.set(Pos::from_index(TOTAL_CELLS - 1));
        assert_eq!(bb.iter_ones().collect::<Vec<_>>(), vec![Pos::new(14, 14)]);
    }
}
