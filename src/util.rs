//! This module contains utility functionality needed for this crate. Most
//! prominently, it contains the definition of the [DigitSet] used for storing
//! cell candidates.

use crate::error::{SudokuError, SudokuResult};

use serde::{Deserialize, Serialize};

use std::ops::{
    BitAnd,
    BitAndAssign,
    BitOr,
    BitOrAssign,
    BitXor,
    BitXorAssign,
    Sub,
    SubAssign
};

/// A set of Sudoku digits (1 to 9) that is implemented as a bit vector inside
/// a single `u16`. Each digit is represented by one bit. This generally has
/// better performance than a `HashSet` and, unlike one, can be copied.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct DigitSet {
    content: u16
}

/// The lowest digit a [DigitSet] can contain.
pub const MIN_DIGIT: usize = 1;

/// The highest digit a [DigitSet] can contain.
pub const MAX_DIGIT: usize = 9;

const FULL_MASK: u16 = (1 << MAX_DIGIT) - 1;

fn mask(digit: usize) -> SudokuResult<u16> {
    if (MIN_DIGIT..=MAX_DIGIT).contains(&digit) {
        Ok(1 << (digit - 1))
    }
    else {
        Err(SudokuError::InvalidNumber)
    }
}

impl DigitSet {

    /// Creates a new, empty `DigitSet`.
    pub fn new() -> DigitSet {
        DigitSet { content: 0 }
    }

    /// Creates a new `DigitSet` that contains only the given digit.
    ///
    /// # Arguments
    ///
    /// * `digit`: The only element contained by the created set. Must be in
    /// the range 1 to 9.
    ///
    /// # Errors
    ///
    /// If `digit` is less than [MIN_DIGIT] or greater than [MAX_DIGIT]. In
    /// that case, a `SudokuError::InvalidNumber` is returned.
    pub fn singleton(digit: usize) -> SudokuResult<DigitSet> {
        Ok(DigitSet { content: mask(digit)? })
    }

    /// Creates a new `DigitSet` that contains all nine digits.
    pub fn full() -> DigitSet {
        DigitSet { content: FULL_MASK }
    }

    /// Indicates whether this set contains the given digit, in which case
    /// this method returns `true`. If it is not contained or outside the
    /// digit range, `false` will be returned.
    pub fn contains(&self, digit: usize) -> bool {
        match mask(digit) {
            Ok(mask) => self.content & mask > 0,
            Err(_) => false
        }
    }

    /// Inserts the given digit into this set, such that [DigitSet::contains]
    /// returns `true` for it afterwards.
    ///
    /// This method returns `true` if the set has changed (i.e. the digit was
    /// not present before) and `false` otherwise.
    ///
    /// # Errors
    ///
    /// If `digit` is less than [MIN_DIGIT] or greater than [MAX_DIGIT]. In
    /// that case, `SudokuError::InvalidNumber` is returned.
    pub fn insert(&mut self, digit: usize) -> SudokuResult<bool> {
        let mask = mask(digit)?;
        let changed = self.content & mask == 0;
        self.content |= mask;
        Ok(changed)
    }

    /// Removes the given digit from this set, such that [DigitSet::contains]
    /// returns `false` for it afterwards.
    ///
    /// This method returns `true` if the set has changed (i.e. the digit was
    /// present before) and `false` otherwise.
    ///
    /// # Errors
    ///
    /// If `digit` is less than [MIN_DIGIT] or greater than [MAX_DIGIT]. In
    /// that case, `SudokuError::InvalidNumber` is returned.
    pub fn remove(&mut self, digit: usize) -> SudokuResult<bool> {
        let mask = mask(digit)?;
        let changed = self.content & mask > 0;
        self.content &= !mask;
        Ok(changed)
    }

    /// Removes all digits from this set, such that [DigitSet::is_empty] will
    /// return `true` afterwards.
    pub fn clear(&mut self) {
        self.content = 0;
    }

    /// Returns the number of digits contained in this set.
    pub fn len(&self) -> usize {
        self.content.count_ones() as usize
    }

    /// Indicates whether this set is empty, i.e. contains no digits.
    pub fn is_empty(&self) -> bool {
        self.content == 0
    }

    /// Returns an iterator over the digits in this set in ascending order.
    pub fn iter(&self) -> DigitSetIter {
        DigitSetIter {
            digit: MIN_DIGIT,
            content: self.content
        }
    }

    /// Computes the set intersection between this set and the given one and
    /// stores the result in this set.
    pub fn intersect_assign(&mut self, other: &DigitSet) {
        self.content &= other.content;
    }

    /// Computes the set union between this set and the given one and stores
    /// the result in this set.
    pub fn union_assign(&mut self, other: &DigitSet) {
        self.content |= other.content;
    }

    /// Computes the set difference between this set and the given one, that
    /// is, removes all digits from this set which are contained in the other
    /// one.
    pub fn difference_assign(&mut self, other: &DigitSet) {
        self.content &= !other.content;
    }

    /// Computes the symmetric set difference between this set and the given
    /// one, that is, retains all digits that are contained in exactly one of
    /// the two sets, and stores the result in this set.
    pub fn symmetric_difference_assign(&mut self, other: &DigitSet) {
        self.content ^= other.content;
    }
}

impl Default for DigitSet {
    fn default() -> DigitSet {
        DigitSet::new()
    }
}

/// An iterator over the content of a [DigitSet].
pub struct DigitSetIter {
    digit: usize,
    content: u16
}

impl Iterator for DigitSetIter {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.content == 0 {
            return None;
        }

        let diff = self.content.trailing_zeros() as usize;
        self.digit += diff;
        self.content >>= diff + 1;
        let result = self.digit;
        self.digit += 1;
        Some(result)
    }
}

impl IntoIterator for DigitSet {
    type Item = usize;
    type IntoIter = DigitSetIter;

    fn into_iter(self) -> DigitSetIter {
        self.iter()
    }
}

impl IntoIterator for &DigitSet {
    type Item = usize;
    type IntoIter = DigitSetIter;

    fn into_iter(self) -> DigitSetIter {
        self.iter()
    }
}

/// Creates a [DigitSet](crate::util::DigitSet) that contains the given
/// digits.
///
/// # Example
///
/// ```
/// use sudoku_chains::digits;
/// use sudoku_chains::util::DigitSet;
///
/// let set = digits!(2, 4);
/// assert!(set.contains(2));
/// assert!(!set.contains(3));
/// ```
#[macro_export]
macro_rules! digits {
    ($set:expr; $e:expr) => {
        ($set).insert($e).unwrap()
    };

    ($set:expr; $e:expr, $($es:expr),+) => {
        $crate::digits!($set; $e);
        $crate::digits!($set; $($es),+)
    };

    ($($es:expr),+) => {
        {
            let mut set = $crate::util::DigitSet::new();
            $crate::digits!(set; $($es),+);
            set
        }
    };
}

impl BitAnd<&DigitSet> for DigitSet {
    type Output = DigitSet;

    fn bitand(mut self, rhs: &DigitSet) -> DigitSet {
        self.intersect_assign(rhs);
        self
    }
}

impl BitAnd<DigitSet> for DigitSet {
    type Output = DigitSet;

    fn bitand(self, rhs: DigitSet) -> DigitSet {
        self & &rhs
    }
}

impl BitAndAssign<&DigitSet> for DigitSet {
    fn bitand_assign(&mut self, rhs: &DigitSet) {
        self.intersect_assign(rhs);
    }
}

impl BitAndAssign<DigitSet> for DigitSet {
    fn bitand_assign(&mut self, rhs: DigitSet) {
        self.intersect_assign(&rhs);
    }
}

impl BitOr<&DigitSet> for DigitSet {
    type Output = DigitSet;

    fn bitor(mut self, rhs: &DigitSet) -> DigitSet {
        self.union_assign(rhs);
        self
    }
}

impl BitOr<DigitSet> for DigitSet {
    type Output = DigitSet;

    fn bitor(self, rhs: DigitSet) -> DigitSet {
        self | &rhs
    }
}

impl BitOrAssign<&DigitSet> for DigitSet {
    fn bitor_assign(&mut self, rhs: &DigitSet) {
        self.union_assign(rhs);
    }
}

impl BitOrAssign<DigitSet> for DigitSet {
    fn bitor_assign(&mut self, rhs: DigitSet) {
        self.union_assign(&rhs);
    }
}

impl BitXor<&DigitSet> for DigitSet {
    type Output = DigitSet;

    fn bitxor(mut self, rhs: &DigitSet) -> DigitSet {
        self.symmetric_difference_assign(rhs);
        self
    }
}

impl BitXor<DigitSet> for DigitSet {
    type Output = DigitSet;

    fn bitxor(self, rhs: DigitSet) -> DigitSet {
        self ^ &rhs
    }
}

impl BitXorAssign<&DigitSet> for DigitSet {
    fn bitxor_assign(&mut self, rhs: &DigitSet) {
        self.symmetric_difference_assign(rhs);
    }
}

impl BitXorAssign<DigitSet> for DigitSet {
    fn bitxor_assign(&mut self, rhs: DigitSet) {
        self.symmetric_difference_assign(&rhs);
    }
}

impl Sub<&DigitSet> for DigitSet {
    type Output = DigitSet;

    fn sub(mut self, rhs: &DigitSet) -> DigitSet {
        self.difference_assign(rhs);
        self
    }
}

impl Sub<DigitSet> for DigitSet {
    type Output = DigitSet;

    fn sub(self, rhs: DigitSet) -> DigitSet {
        self - &rhs
    }
}

impl SubAssign<&DigitSet> for DigitSet {
    fn sub_assign(&mut self, rhs: &DigitSet) {
        self.difference_assign(rhs);
    }
}

impl SubAssign<DigitSet> for DigitSet {
    fn sub_assign(&mut self, rhs: DigitSet) {
        self.difference_assign(&rhs);
    }
}

/// Yields every unordered pair of distinct elements of the given slice, in
/// slice order.
pub(crate) fn zip_every_pair<T: Copy>(items: &[T])
        -> impl Iterator<Item = (T, T)> + '_ {
    items.iter().enumerate().flat_map(move |(i, &a)|
        items[(i + 1)..].iter().map(move |&b| (a, b)))
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn digit_set_initially_empty() {
        let set = DigitSet::new();
        assert!(set.is_empty());
        assert_eq!(0, set.len());
        assert!(!set.contains(1));
    }

    #[test]
    fn digit_set_full_contains_all() {
        let set = DigitSet::full();
        assert_eq!(9, set.len());

        for digit in MIN_DIGIT..=MAX_DIGIT {
            assert!(set.contains(digit));
        }
    }

    #[test]
    fn digit_set_insert_and_remove() {
        let mut set = DigitSet::new();
        assert_eq!(Ok(true), set.insert(3));
        assert_eq!(Ok(false), set.insert(3));
        assert!(set.contains(3));
        assert_eq!(1, set.len());
        assert_eq!(Ok(true), set.remove(3));
        assert_eq!(Ok(false), set.remove(3));
        assert!(set.is_empty());
    }

    #[test]
    fn digit_set_rejects_out_of_range() {
        let mut set = DigitSet::new();
        assert_eq!(Err(SudokuError::InvalidNumber), set.insert(0));
        assert_eq!(Err(SudokuError::InvalidNumber), set.insert(10));
        assert!(!set.contains(0));
        assert!(!set.contains(10));
    }

    #[test]
    fn digit_set_iterates_in_ascending_order() {
        let set = digits!(7, 1, 4, 9);
        let content: Vec<usize> = set.iter().collect();
        assert_eq!(vec![1, 4, 7, 9], content);
    }

    #[test]
    fn digit_set_operators() {
        let a = digits!(1, 2, 3, 4);
        let b = digits!(3, 4, 5, 6);

        assert_eq!(digits!(3, 4), a & b);
        assert_eq!(digits!(1, 2, 3, 4, 5, 6), a | b);
        assert_eq!(digits!(1, 2, 5, 6), a ^ b);
        assert_eq!(digits!(1, 2), a - b);
    }

    #[test]
    fn zip_every_pair_yields_all_pairs() {
        let pairs: Vec<(u32, u32)> = zip_every_pair(&[1, 2, 3]).collect();
        assert_eq!(vec![(1, 2), (1, 3), (2, 3)], pairs);
    }
}
