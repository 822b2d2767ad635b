//! Frequency counting with a deterministic, discovery-order tie-break.

use std::collections::HashMap;

use crate::models::LotteryNumber;

/// Counts numbers, remembering the order they were first seen.
#[derive(Debug, Clone, Default)]
pub struct FrequencyTable {
    entries: Vec<(LotteryNumber, usize)>,
    index: HashMap<LotteryNumber, usize>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, number: &LotteryNumber) {
        match self.index.get(number) {
            Some(&i) => self.entries[i].1 += 1,
            None => {
                self.index.insert(number.clone(), self.entries.len());
                self.entries.push((number.clone(), 1));
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries by descending count; equal counts keep discovery order.
    pub fn ranked(mut self) -> Vec<(LotteryNumber, usize)> {
        // sort_by is stable
        self.entries.sort_by(|a, b| b.1.cmp(&a.1));
        self.entries
    }
}

impl<'a> FromIterator<&'a LotteryNumber> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = &'a LotteryNumber>>(iter: I) -> Self {
        let mut table = Self::new();
        for number in iter {
            table.add(number);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn n(s: &str) -> LotteryNumber {
        LotteryNumber::parse(s).unwrap()
    }

    #[test]
    fn test_ranked_is_stable() {
        let numbers = [n("200"), n("438"), n("001"), n("438"), n("001"), n("777")];
        let ranked = numbers.iter().collect::<FrequencyTable>().ranked();

        assert_eq!(
            ranked,
            vec![(n("438"), 2), (n("001"), 2), (n("200"), 1), (n("777"), 1)]
        );
    }

    #[test]
    fn test_empty() {
        let table = FrequencyTable::new();
        assert!(table.is_empty());
        assert!(table.ranked().is_empty());
    }
}
