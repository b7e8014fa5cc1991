//! Ordered, duplicate-free value collections.
//!
//! `ValueSet` is the unit every source resolver produces: one candidate set
//! per parameter. `ArgumentSets` is the whole-method factory product: one
//! `ValueSet` per parameter, declared through a builder in parameter order.

use crate::value::Value;

/// An ordered, duplicate-free sequence of candidate values for one
/// parameter.
///
/// Construction deduplicates under value equality, keeping the first
/// occurrence's position; insertion order is otherwise preserved exactly as
/// declared. A set is immutable once built and is consumed by the product
/// generator.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ValueSet {
    values: Vec<Value>,
}

impl ValueSet {
    /// Builds a set from declared values, collapsing equal values onto the
    /// first occurrence.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lattice::{set::ValueSet, value::Value};
    /// let set = ValueSet::from_values([Value::Int(1), Value::Int(1), Value::Int(3)]);
    /// assert_eq!(set.len(), 2);
    /// ```
    pub fn from_values(values: impl IntoIterator<Item = Value>) -> Self {
        let mut deduped: Vec<Value> = Vec::new();
        for value in values {
            if !deduped.contains(&value) {
                deduped.push(value);
            }
        }
        Self { values: deduped }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the value at `index` in declaration order.
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Value> {
        self.values.iter()
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }
}

impl FromIterator<Value> for ValueSet {
    fn from_iter<T: IntoIterator<Item = Value>>(iter: T) -> Self {
        Self::from_values(iter)
    }
}

/// The value a whole-method factory returns: an ordered list of candidate
/// sets, one per test parameter, in parameter order.
///
/// The builder mirrors how factories declare sets, one parameter at a time:
///
/// ```rust
/// use lattice::set::ArgumentSets;
/// use lattice::value::Value;
///
/// let sets = ArgumentSets::new()
///     .for_next_parameter([Value::Int(1), Value::Int(2)])
///     .for_next_parameter([Value::from("left"), Value::from("right")]);
/// assert_eq!(sets.len(), 2);
/// ```
///
/// The engine rejects factories that register more sets than the method has
/// parameters. Registering fewer is legal at this layer; the invocation
/// boundary decides how the remaining parameters are filled.
#[derive(Debug, Clone, Default)]
pub struct ArgumentSets {
    sets: Vec<ValueSet>,
}

impl ArgumentSets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the candidate set for the next parameter in declaration
    /// order. Values are deduplicated like any other set.
    #[must_use]
    pub fn for_next_parameter(mut self, values: impl IntoIterator<Item = Value>) -> Self {
        self.sets.push(ValueSet::from_values(values));
        self
    }

    /// Number of parameter sets registered so far.
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    pub fn sets(&self) -> &[ValueSet] {
        &self.sets
    }

    pub fn into_sets(self) -> Vec<ValueSet> {
        self.sets
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dedup_keeps_first_occurrence_position() {
        let set = ValueSet::from_values([
            Value::Int(2),
            Value::Int(1),
            Value::Int(2),
            Value::Int(3),
        ]);
        let order: Vec<i64> = set.iter().filter_map(Value::as_int).collect();
        assert_eq!(order, vec![2, 1, 3]);
    }

    #[test]
    fn insertion_order_is_not_sorted() {
        let set = ValueSet::from_values([Value::Int(9), Value::Int(1), Value::Int(5)]);
        let order: Vec<i64> = set.iter().filter_map(Value::as_int).collect();
        assert_eq!(order, vec![9, 1, 5]);
    }

    #[test]
    fn argument_sets_preserve_parameter_order() {
        let sets = ArgumentSets::new()
            .for_next_parameter([Value::Int(1)])
            .for_next_parameter([Value::from("a"), Value::from("a"), Value::from("b")]);
        assert_eq!(sets.len(), 2);
        assert_eq!(sets.sets()[1].len(), 2);
    }
}
