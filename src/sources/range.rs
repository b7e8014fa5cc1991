//! Numeric-range resolver.
//!
//! Produces the arithmetic sequence from `from` toward `to` in traversal
//! order; the `closed` flag decides whether `to` itself belongs to the
//! sequence. A zero step, or a step pointing away from `to`, is a
//! configuration error.

use crate::errors::LatticeError;
use crate::set::ValueSet;
use crate::value::Value;

pub fn resolve_int(
    parameter: &str,
    from: i64,
    to: i64,
    step: i64,
    closed: bool,
) -> Result<ValueSet, LatticeError> {
    if step == 0 {
        return Err(LatticeError::ZeroRangeStep {
            parameter: parameter.to_string(),
        });
    }
    if (to > from && step < 0) || (to < from && step > 0) {
        return Err(LatticeError::MisdirectedRangeStep {
            parameter: parameter.to_string(),
            from: from.to_string(),
            to: to.to_string(),
            step: step.to_string(),
        });
    }

    let mut values = Vec::new();
    let ascending = step > 0;
    let mut current = from;
    loop {
        let in_bounds = if ascending {
            if closed { current <= to } else { current < to }
        } else if closed {
            current >= to
        } else {
            current > to
        };
        if !in_bounds {
            break;
        }
        values.push(Value::Int(current));
        // Stepping past the i64 boundary means the bound was already the
        // last representable element.
        match current.checked_add(step) {
            Some(next) => current = next,
            None => break,
        }
    }
    Ok(ValueSet::from_values(values))
}

pub fn resolve_float(
    parameter: &str,
    from: f64,
    to: f64,
    step: f64,
    closed: bool,
) -> Result<ValueSet, LatticeError> {
    if step == 0.0 || !step.is_finite() {
        return Err(LatticeError::ZeroRangeStep {
            parameter: parameter.to_string(),
        });
    }
    if (to > from && step < 0.0) || (to < from && step > 0.0) {
        return Err(LatticeError::MisdirectedRangeStep {
            parameter: parameter.to_string(),
            from: from.to_string(),
            to: to.to_string(),
            step: step.to_string(),
        });
    }

    let mut values = Vec::new();
    let ascending = step > 0.0;
    let mut current = from;
    loop {
        let in_bounds = if ascending {
            if closed { current <= to } else { current < to }
        } else if closed {
            current >= to
        } else {
            current > to
        };
        if !in_bounds {
            break;
        }
        values.push(Value::Float(current));
        current += step;
    }
    Ok(ValueSet::from_values(values))
}
