//! Literal-values resolver: the declared ordered list, deduplicated.

use crate::set::ValueSet;
use crate::value::Value;

/// Equal values collapse onto the first occurrence's position; nothing else
/// about the declared order changes.
pub fn resolve(values: &[Value]) -> ValueSet {
    ValueSet::from_values(values.iter().cloned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicates_collapse_to_first_position() {
        let set = resolve(&[Value::Int(1), Value::Int(1), Value::Int(3)]);
        let order: Vec<i64> = set.iter().filter_map(Value::as_int).collect();
        assert_eq!(order, vec![1, 3]);
    }

    #[test]
    fn mixed_categories_do_not_collide() {
        let set = resolve(&[Value::Int(1), Value::Float(1.0), Value::from("1")]);
        assert_eq!(set.len(), 3);
    }
}
