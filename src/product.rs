//! Cartesian Product Generator.
//!
//! Combines an ordered list of per-parameter value sets into the lazy,
//! deterministic sequence of argument tuples. Tuple `k` (0-based) is the
//! mixed-radix decomposition of `k` with the *last* parameter as the
//! least-significant digit, so the last parameter varies fastest and the
//! full sequence is lexicographic over set positions. One tuple is
//! materialized per request; the full product never exists in memory at
//! once.
//!
//! The generator is a small state machine: `Initialized` until the first
//! request, `Producing` while tuples remain, `Exhausted` (terminal) after
//! the last tuple. Requests after exhaustion return `None` and are never an
//! error. All traversal state is owned by the generator itself; callers
//! only ever see the next `(index, tuple)` pair.

use crate::set::ValueSet;
use crate::value::Value;

/// Lifecycle of a generator. Terminal state is `Exhausted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratorState {
    Initialized,
    Producing,
    Exhausted,
}

/// Lazy iterator over the n-ary Cartesian product of value sets.
///
/// Yields `(index, tuple)` pairs with a 1-based, gap-free index. Identical
/// input sets always produce the identical sequence; there is no
/// randomization and no dependence on anything but the sets' declared
/// order.
#[derive(Debug)]
pub struct CartesianProduct {
    sets: Vec<ValueSet>,
    /// Odometer position, one digit per set; the last digit rolls first.
    cursor: Vec<usize>,
    produced: usize,
    total: usize,
    state: GeneratorState,
}

impl CartesianProduct {
    /// Builds a generator over `sets`. Returns `None` when the product size
    /// overflows `usize` (the caller reports that as a resolution error).
    ///
    /// An empty dimension makes the whole product empty. Zero dimensions
    /// yield the product identity: a single empty tuple — whether that
    /// invocation is meaningful is the invocation boundary's decision.
    pub fn new(sets: Vec<ValueSet>) -> Option<Self> {
        let total = sets
            .iter()
            .try_fold(1usize, |acc, set| acc.checked_mul(set.len()))?;
        Some(Self {
            cursor: vec![0; sets.len()],
            sets,
            produced: 0,
            total,
            state: GeneratorState::Initialized,
        })
    }

    /// Exact number of tuples the full sequence contains.
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn state(&self) -> GeneratorState {
        self.state
    }

    fn current_tuple(&self) -> Vec<Value> {
        self.cursor
            .iter()
            .zip(&self.sets)
            .map(|(&digit, set)| {
                set.get(digit)
                    .cloned()
                    .expect("cursor digit within set bounds")
            })
            .collect()
    }

    /// Advances the odometer one step, last digit fastest.
    fn advance(&mut self) {
        for position in (0..self.cursor.len()).rev() {
            self.cursor[position] += 1;
            if self.cursor[position] < self.sets[position].len() {
                return;
            }
            self.cursor[position] = 0;
        }
    }
}

impl Iterator for CartesianProduct {
    /// `(1-based index, argument tuple)`.
    type Item = (usize, Vec<Value>);

    fn next(&mut self) -> Option<Self::Item> {
        match self.state {
            GeneratorState::Exhausted => return None,
            GeneratorState::Initialized => {
                self.state = if self.total == 0 {
                    GeneratorState::Exhausted
                } else {
                    GeneratorState::Producing
                };
                if self.total == 0 {
                    return None;
                }
            }
            GeneratorState::Producing => {}
        }

        let tuple = self.current_tuple();
        self.produced += 1;
        let index = self.produced;

        if self.produced == self.total {
            self.state = GeneratorState::Exhausted;
        } else {
            self.advance();
        }

        Some((index, tuple))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.total - self.produced;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for CartesianProduct {}

#[cfg(test)]
mod tests {
    use super::*;

    fn int_set(values: &[i64]) -> ValueSet {
        ValueSet::from_values(values.iter().map(|&n| Value::Int(n)))
    }

    fn str_set(values: &[&str]) -> ValueSet {
        ValueSet::from_values(values.iter().map(|&s| Value::from(s)))
    }

    #[test]
    fn total_is_the_product_of_set_sizes() {
        let product =
            CartesianProduct::new(vec![int_set(&[1, 2]), str_set(&["a", "b", "c"])]).unwrap();
        assert_eq!(product.total(), 6);
        assert_eq!(product.count(), 6);
    }

    #[test]
    fn last_parameter_varies_fastest() {
        let product =
            CartesianProduct::new(vec![int_set(&[1, 2]), str_set(&["a", "b"])]).unwrap();
        let tuples: Vec<String> = product
            .map(|(_, tuple)| {
                tuple
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .collect();
        assert_eq!(tuples, vec!["1a", "1b", "2a", "2b"]);
    }

    #[test]
    fn indices_are_one_based_and_gap_free() {
        let product =
            CartesianProduct::new(vec![int_set(&[1, 2, 3]), int_set(&[1, 2])]).unwrap();
        let indices: Vec<usize> = product.map(|(i, _)| i).collect();
        assert_eq!(indices, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn every_combination_appears_exactly_once() {
        let product = CartesianProduct::new(vec![
            int_set(&[1, 2, 3]),
            str_set(&["x", "y"]),
            int_set(&[0, 9]),
        ])
        .unwrap();
        let mut seen = Vec::new();
        for (_, tuple) in product {
            assert!(!seen.contains(&tuple), "duplicate tuple {tuple:?}");
            seen.push(tuple);
        }
        assert_eq!(seen.len(), 12);
    }

    #[test]
    fn exhaustion_is_a_no_op_not_an_error() {
        let mut product = CartesianProduct::new(vec![int_set(&[1])]).unwrap();
        assert_eq!(product.state(), GeneratorState::Initialized);
        assert!(product.next().is_some());
        assert_eq!(product.state(), GeneratorState::Exhausted);
        assert!(product.next().is_none());
        assert!(product.next().is_none());
    }

    #[test]
    fn empty_dimension_empties_the_product() {
        let mut product = CartesianProduct::new(vec![int_set(&[1, 2]), int_set(&[])]).unwrap();
        assert_eq!(product.total(), 0);
        assert!(product.next().is_none());
        assert_eq!(product.state(), GeneratorState::Exhausted);
    }

    #[test]
    fn zero_dimensions_yield_the_identity_tuple() {
        let mut product = CartesianProduct::new(vec![]).unwrap();
        assert_eq!(product.total(), 1);
        assert_eq!(product.next(), Some((1, vec![])));
        assert!(product.next().is_none());
    }

    #[test]
    fn identical_sets_reproduce_the_identical_sequence() {
        let build = || {
            CartesianProduct::new(vec![int_set(&[4, 7]), str_set(&["p", "q", "r"])]).unwrap()
        };
        let first: Vec<_> = build().collect();
        let second: Vec<_> = build().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn overflowing_product_size_is_reported() {
        let big = ValueSet::from_values((0..2).map(Value::Int));
        let mut sets = Vec::new();
        // 2^64 distinct combinations cannot be indexed by usize.
        for _ in 0..65 {
            sets.push(big.clone());
        }
        assert!(CartesianProduct::new(sets).is_none());
    }
}
