//! The variant operation set.
//!
//! All arithmetic, logical, relational and conversion behavior of the
//! expression language lives behind the [`VariantOperations`] capability
//! trait. Functions receive the operation set at call time so their bodies
//! can perform typed arithmetic with the same coercion rules as the
//! surrounding expression.
//!
//! The default implementation promotes numeric operands to the widest
//! numeric tag present among {Integer, Long, Float, Double} before
//! computing. A string operand in arithmetic is converted to its peer's
//! numeric tag (never concatenated); a parse failure is a conversion
//! error. `Null` equals only `Null` and fails every arithmetic or
//! relational operation against a non-Null operand. Unsupported tag
//! combinations produce a typed error naming the operation and the
//! offending tags, never a silent coercion.

use std::cmp::Ordering;

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::errors::{ExpressionError, ExpressionResult};
use crate::variant::{Variant, VariantType};

/// The operation capability over [`Variant`] values.
pub trait VariantOperations {
    /// Converts a value to the given target type.
    fn convert(&self, value: &Variant, to: VariantType) -> ExpressionResult<Variant>;

    /// Arithmetic negation.
    fn negative(&self, value: &Variant) -> ExpressionResult<Variant>;

    /// Logical not.
    fn not(&self, value: &Variant) -> ExpressionResult<Variant>;

    /// Addition; also combines `DateTime`/`TimeSpan` values.
    fn add(&self, left: &Variant, right: &Variant) -> ExpressionResult<Variant>;

    /// Subtraction; two `DateTime`s subtract to a `TimeSpan`.
    fn subtract(&self, left: &Variant, right: &Variant) -> ExpressionResult<Variant>;

    /// Multiplication.
    fn multiply(&self, left: &Variant, right: &Variant) -> ExpressionResult<Variant>;

    /// Division.
    fn divide(&self, left: &Variant, right: &Variant) -> ExpressionResult<Variant>;

    /// Remainder.
    fn modulo(&self, left: &Variant, right: &Variant) -> ExpressionResult<Variant>;

    /// Logical and for booleans, bitwise and for integers.
    fn and(&self, left: &Variant, right: &Variant) -> ExpressionResult<Variant>;

    /// Logical or for booleans, bitwise or for integers.
    fn or(&self, left: &Variant, right: &Variant) -> ExpressionResult<Variant>;

    /// Logical xor for booleans, bitwise xor for integers.
    fn xor(&self, left: &Variant, right: &Variant) -> ExpressionResult<Variant>;

    /// Bitwise shift left.
    fn shift_left(&self, left: &Variant, right: &Variant) -> ExpressionResult<Variant>;

    /// Bitwise shift right.
    fn shift_right(&self, left: &Variant, right: &Variant) -> ExpressionResult<Variant>;

    /// Equality. `Null` equals only `Null`.
    fn equal(&self, left: &Variant, right: &Variant) -> ExpressionResult<Variant>;

    /// Inequality.
    fn not_equal(&self, left: &Variant, right: &Variant) -> ExpressionResult<Variant>;

    /// Three-way comparison.
    fn compare(&self, left: &Variant, right: &Variant) -> ExpressionResult<Ordering>;

    /// Less-than.
    fn less(&self, left: &Variant, right: &Variant) -> ExpressionResult<Variant> {
        Ok(Variant::Boolean(self.compare(left, right)? == Ordering::Less))
    }

    /// Less-than-or-equal.
    fn less_or_equal(&self, left: &Variant, right: &Variant) -> ExpressionResult<Variant> {
        Ok(Variant::Boolean(self.compare(left, right)? != Ordering::Greater))
    }

    /// Greater-than.
    fn more(&self, left: &Variant, right: &Variant) -> ExpressionResult<Variant> {
        Ok(Variant::Boolean(self.compare(left, right)? == Ordering::Greater))
    }

    /// Greater-than-or-equal.
    fn more_or_equal(&self, left: &Variant, right: &Variant) -> ExpressionResult<Variant> {
        Ok(Variant::Boolean(self.compare(left, right)? != Ordering::Less))
    }

    /// SQL-style pattern match with `%` and `_` wildcards.
    fn like(&self, left: &Variant, right: &Variant) -> ExpressionResult<Variant>;

    /// Membership test against an `Array`, or plain equality otherwise.
    fn is_in(&self, left: &Variant, right: &Variant) -> ExpressionResult<Variant>;
}

/// The standard promoting implementation of [`VariantOperations`].
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultVariantOperations;

impl DefaultVariantOperations {
    /// Creates the default operation set.
    pub fn new() -> Self {
        Self
    }

    fn numeric_rank(variant_type: VariantType) -> Option<u8> {
        match variant_type {
            VariantType::Integer => Some(0),
            VariantType::Long => Some(1),
            VariantType::Float => Some(2),
            VariantType::Double => Some(3),
            _ => None,
        }
    }

    /// Picks the common numeric type for a pair of operands and converts
    /// both to it. Strings convert to the peer's numeric tag; two strings
    /// compute as doubles.
    fn numeric_pair(
        &self,
        op: &'static str,
        left: &Variant,
        right: &Variant,
    ) -> ExpressionResult<(Variant, Variant)> {
        let unsupported = || ExpressionError::UnsupportedOperation {
            op,
            left: left.type_of(),
            right: right.type_of(),
        };
        let left_type = left.type_of();
        let right_type = right.type_of();

        let target = match (
            Self::numeric_rank(left_type),
            Self::numeric_rank(right_type),
        ) {
            (Some(a), Some(b)) => {
                if a >= b {
                    left_type
                } else {
                    right_type
                }
            },
            (Some(_), None) if right_type == VariantType::String => left_type,
            (None, Some(_)) if left_type == VariantType::String => right_type,
            (None, None)
                if left_type == VariantType::String && right_type == VariantType::String =>
            {
                VariantType::Double
            },
            _ => return Err(unsupported()),
        };

        Ok((self.convert(left, target)?, self.convert(right, target)?))
    }
}

/// Recursive `%`/`_` wildcard matcher.
fn like_match(value: &[char], pattern: &[char]) -> bool {
    match pattern.split_first() {
        None => value.is_empty(),
        Some((&'%', rest)) => (0..=value.len()).any(|skip| like_match(&value[skip..], rest)),
        Some((&'_', rest)) => value
            .split_first()
            .is_some_and(|(_, tail)| like_match(tail, rest)),
        Some((c, rest)) => value
            .split_first()
            .is_some_and(|(first, tail)| first == c && like_match(tail, rest)),
    }
}

impl VariantOperations for DefaultVariantOperations {
    fn convert(&self, value: &Variant, to: VariantType) -> ExpressionResult<Variant> {
        if value.type_of() == to {
            return Ok(value.clone());
        }
        // Null converts to Null for any target.
        if value.is_null() {
            return Ok(Variant::Null);
        }
        let failed = || ExpressionError::ConversionFailed {
            from: value.to_string(),
            to,
        };

        match to {
            VariantType::Integer => match value {
                Variant::Long(v) => i32::try_from(*v).map(Variant::Integer).map_err(|_| failed()),
                Variant::Float(v) => float_to_int(f64::from(*v)).map(Variant::Integer).ok_or_else(failed),
                Variant::Double(v) => float_to_int(*v).map(Variant::Integer).ok_or_else(failed),
                Variant::String(v) => v.trim().parse::<i32>().map(Variant::Integer).map_err(|_| failed()),
                Variant::Boolean(v) => Ok(Variant::Integer(i32::from(*v))),
                _ => Err(failed()),
            },
            VariantType::Long => match value {
                Variant::Integer(v) => Ok(Variant::Long(i64::from(*v))),
                Variant::Float(v) => float_to_long(f64::from(*v)).map(Variant::Long).ok_or_else(failed),
                Variant::Double(v) => float_to_long(*v).map(Variant::Long).ok_or_else(failed),
                Variant::String(v) => v.trim().parse::<i64>().map(Variant::Long).map_err(|_| failed()),
                Variant::Boolean(v) => Ok(Variant::Long(i64::from(*v))),
                _ => Err(failed()),
            },
            VariantType::Float => match value {
                Variant::Integer(v) => Ok(Variant::Float(*v as f32)),
                Variant::Long(v) => Ok(Variant::Float(*v as f32)),
                Variant::Double(v) => Ok(Variant::Float(*v as f32)),
                Variant::String(v) => v.trim().parse::<f32>().map(Variant::Float).map_err(|_| failed()),
                _ => Err(failed()),
            },
            VariantType::Double => match value {
                Variant::Integer(v) => Ok(Variant::Double(f64::from(*v))),
                Variant::Long(v) => Ok(Variant::Double(*v as f64)),
                Variant::Float(v) => Ok(Variant::Double(f64::from(*v))),
                Variant::String(v) => v.trim().parse::<f64>().map(Variant::Double).map_err(|_| failed()),
                _ => Err(failed()),
            },
            VariantType::String => match value {
                Variant::Object(_) => Err(failed()),
                other => Ok(Variant::String(other.to_string())),
            },
            VariantType::Boolean => match value {
                Variant::Integer(v) => Ok(Variant::Boolean(*v != 0)),
                Variant::Long(v) => Ok(Variant::Boolean(*v != 0)),
                Variant::String(v) => match v.trim().to_ascii_lowercase().as_str() {
                    "true" => Ok(Variant::Boolean(true)),
                    "false" => Ok(Variant::Boolean(false)),
                    _ => Err(failed()),
                },
                _ => Err(failed()),
            },
            VariantType::DateTime => match value {
                Variant::String(v) => DateTime::parse_from_rfc3339(v.trim())
                    .map(|d| Variant::DateTime(d.with_timezone(&Utc)))
                    .map_err(|_| failed()),
                Variant::Long(v) => Utc
                    .timestamp_millis_opt(*v)
                    .single()
                    .map(Variant::DateTime)
                    .ok_or_else(failed),
                _ => Err(failed()),
            },
            VariantType::TimeSpan => match value {
                Variant::Integer(v) => Ok(Variant::TimeSpan(Duration::milliseconds(i64::from(*v)))),
                Variant::Long(v) => Ok(Variant::TimeSpan(Duration::milliseconds(*v))),
                _ => Err(failed()),
            },
            VariantType::Null | VariantType::Object | VariantType::Array => Err(failed()),
        }
    }

    fn negative(&self, value: &Variant) -> ExpressionResult<Variant> {
        let unsupported = || ExpressionError::UnsupportedUnary {
            op: "negative",
            operand: value.type_of(),
        };
        match value {
            Variant::Integer(v) => v
                .checked_neg()
                .map(Variant::Integer)
                .ok_or(ExpressionError::Overflow("negative")),
            Variant::Long(v) => v
                .checked_neg()
                .map(Variant::Long)
                .ok_or(ExpressionError::Overflow("negative")),
            Variant::Float(v) => Ok(Variant::Float(-v)),
            Variant::Double(v) => Ok(Variant::Double(-v)),
            Variant::TimeSpan(v) => Duration::zero()
                .checked_sub(v)
                .map(Variant::TimeSpan)
                .ok_or(ExpressionError::Overflow("negative")),
            _ => Err(unsupported()),
        }
    }

    fn not(&self, value: &Variant) -> ExpressionResult<Variant> {
        match value {
            Variant::Boolean(v) => Ok(Variant::Boolean(!v)),
            _ => Err(ExpressionError::UnsupportedUnary {
                op: "not",
                operand: value.type_of(),
            }),
        }
    }

    fn add(&self, left: &Variant, right: &Variant) -> ExpressionResult<Variant> {
        match (left, right) {
            (Variant::DateTime(d), Variant::TimeSpan(t))
            | (Variant::TimeSpan(t), Variant::DateTime(d)) => d
                .checked_add_signed(*t)
                .map(Variant::DateTime)
                .ok_or(ExpressionError::Overflow("add")),
            (Variant::TimeSpan(a), Variant::TimeSpan(b)) => a
                .checked_add(b)
                .map(Variant::TimeSpan)
                .ok_or(ExpressionError::Overflow("add")),
            _ => match self.numeric_pair("add", left, right)? {
                (Variant::Integer(a), Variant::Integer(b)) => a
                    .checked_add(b)
                    .map(Variant::Integer)
                    .ok_or(ExpressionError::Overflow("add")),
                (Variant::Long(a), Variant::Long(b)) => a
                    .checked_add(b)
                    .map(Variant::Long)
                    .ok_or(ExpressionError::Overflow("add")),
                (Variant::Float(a), Variant::Float(b)) => Ok(Variant::Float(a + b)),
                (Variant::Double(a), Variant::Double(b)) => Ok(Variant::Double(a + b)),
                _ => Err(ExpressionError::StackInconsistency),
            },
        }
    }

    fn subtract(&self, left: &Variant, right: &Variant) -> ExpressionResult<Variant> {
        match (left, right) {
            (Variant::DateTime(a), Variant::DateTime(b)) => {
                Ok(Variant::TimeSpan(a.signed_duration_since(*b)))
            },
            (Variant::DateTime(d), Variant::TimeSpan(t)) => d
                .checked_sub_signed(*t)
                .map(Variant::DateTime)
                .ok_or(ExpressionError::Overflow("subtract")),
            (Variant::TimeSpan(a), Variant::TimeSpan(b)) => a
                .checked_sub(b)
                .map(Variant::TimeSpan)
                .ok_or(ExpressionError::Overflow("subtract")),
            _ => match self.numeric_pair("subtract", left, right)? {
                (Variant::Integer(a), Variant::Integer(b)) => a
                    .checked_sub(b)
                    .map(Variant::Integer)
                    .ok_or(ExpressionError::Overflow("subtract")),
                (Variant::Long(a), Variant::Long(b)) => a
                    .checked_sub(b)
                    .map(Variant::Long)
                    .ok_or(ExpressionError::Overflow("subtract")),
                (Variant::Float(a), Variant::Float(b)) => Ok(Variant::Float(a - b)),
                (Variant::Double(a), Variant::Double(b)) => Ok(Variant::Double(a - b)),
                _ => Err(ExpressionError::StackInconsistency),
            },
        }
    }

    fn multiply(&self, left: &Variant, right: &Variant) -> ExpressionResult<Variant> {
        match self.numeric_pair("multiply", left, right)? {
            (Variant::Integer(a), Variant::Integer(b)) => a
                .checked_mul(b)
                .map(Variant::Integer)
                .ok_or(ExpressionError::Overflow("multiply")),
            (Variant::Long(a), Variant::Long(b)) => a
                .checked_mul(b)
                .map(Variant::Long)
                .ok_or(ExpressionError::Overflow("multiply")),
            (Variant::Float(a), Variant::Float(b)) => Ok(Variant::Float(a * b)),
            (Variant::Double(a), Variant::Double(b)) => Ok(Variant::Double(a * b)),
            _ => Err(ExpressionError::StackInconsistency),
        }
    }

    fn divide(&self, left: &Variant, right: &Variant) -> ExpressionResult<Variant> {
        match self.numeric_pair("divide", left, right)? {
            (Variant::Integer(a), Variant::Integer(b)) => {
                if b == 0 {
                    return Err(ExpressionError::DivisionByZero);
                }
                a.checked_div(b)
                    .map(Variant::Integer)
                    .ok_or(ExpressionError::Overflow("divide"))
            },
            (Variant::Long(a), Variant::Long(b)) => {
                if b == 0 {
                    return Err(ExpressionError::DivisionByZero);
                }
                a.checked_div(b)
                    .map(Variant::Long)
                    .ok_or(ExpressionError::Overflow("divide"))
            },
            (Variant::Float(a), Variant::Float(b)) => {
                if b == 0.0 {
                    return Err(ExpressionError::DivisionByZero);
                }
                Ok(Variant::Float(a / b))
            },
            (Variant::Double(a), Variant::Double(b)) => {
                if b == 0.0 {
                    return Err(ExpressionError::DivisionByZero);
                }
                Ok(Variant::Double(a / b))
            },
            _ => Err(ExpressionError::StackInconsistency),
        }
    }

    fn modulo(&self, left: &Variant, right: &Variant) -> ExpressionResult<Variant> {
        match self.numeric_pair("modulo", left, right)? {
            (Variant::Integer(a), Variant::Integer(b)) => {
                if b == 0 {
                    return Err(ExpressionError::DivisionByZero);
                }
                a.checked_rem(b)
                    .map(Variant::Integer)
                    .ok_or(ExpressionError::Overflow("modulo"))
            },
            (Variant::Long(a), Variant::Long(b)) => {
                if b == 0 {
                    return Err(ExpressionError::DivisionByZero);
                }
                a.checked_rem(b)
                    .map(Variant::Long)
                    .ok_or(ExpressionError::Overflow("modulo"))
            },
            (Variant::Float(a), Variant::Float(b)) => {
                if b == 0.0 {
                    return Err(ExpressionError::DivisionByZero);
                }
                Ok(Variant::Float(a % b))
            },
            (Variant::Double(a), Variant::Double(b)) => {
                if b == 0.0 {
                    return Err(ExpressionError::DivisionByZero);
                }
                Ok(Variant::Double(a % b))
            },
            _ => Err(ExpressionError::StackInconsistency),
        }
    }

    fn and(&self, left: &Variant, right: &Variant) -> ExpressionResult<Variant> {
        bitwise_or_logical("and", left, right, |a, b| a && b, |a, b| a & b)
    }

    fn or(&self, left: &Variant, right: &Variant) -> ExpressionResult<Variant> {
        bitwise_or_logical("or", left, right, |a, b| a || b, |a, b| a | b)
    }

    fn xor(&self, left: &Variant, right: &Variant) -> ExpressionResult<Variant> {
        bitwise_or_logical("xor", left, right, |a, b| a ^ b, |a, b| a ^ b)
    }

    fn shift_left(&self, left: &Variant, right: &Variant) -> ExpressionResult<Variant> {
        let bits = shift_amount(left, right, "shift_left")?;
        match left {
            Variant::Integer(v) => v
                .checked_shl(bits)
                .map(Variant::Integer)
                .ok_or(ExpressionError::Overflow("shift_left")),
            Variant::Long(v) => v
                .checked_shl(bits)
                .map(Variant::Long)
                .ok_or(ExpressionError::Overflow("shift_left")),
            _ => Err(ExpressionError::UnsupportedOperation {
                op: "shift_left",
                left: left.type_of(),
                right: right.type_of(),
            }),
        }
    }

    fn shift_right(&self, left: &Variant, right: &Variant) -> ExpressionResult<Variant> {
        let bits = shift_amount(left, right, "shift_right")?;
        match left {
            Variant::Integer(v) => v
                .checked_shr(bits)
                .map(Variant::Integer)
                .ok_or(ExpressionError::Overflow("shift_right")),
            Variant::Long(v) => v
                .checked_shr(bits)
                .map(Variant::Long)
                .ok_or(ExpressionError::Overflow("shift_right")),
            _ => Err(ExpressionError::UnsupportedOperation {
                op: "shift_right",
                left: left.type_of(),
                right: right.type_of(),
            }),
        }
    }

    fn equal(&self, left: &Variant, right: &Variant) -> ExpressionResult<Variant> {
        // Null participates in equality against any tag.
        if left.is_null() || right.is_null() {
            return Ok(Variant::Boolean(left.is_null() && right.is_null()));
        }
        if left.type_of() == right.type_of() {
            return Ok(Variant::Boolean(left == right));
        }
        // Mixed numeric (or string-vs-numeric) tags compare after promotion.
        let (a, b) = self.numeric_pair("equal", left, right)?;
        Ok(Variant::Boolean(a == b))
    }

    fn not_equal(&self, left: &Variant, right: &Variant) -> ExpressionResult<Variant> {
        match self.equal(left, right)? {
            Variant::Boolean(v) => Ok(Variant::Boolean(!v)),
            _ => Err(ExpressionError::StackInconsistency),
        }
    }

    fn compare(&self, left: &Variant, right: &Variant) -> ExpressionResult<Ordering> {
        let unsupported = || ExpressionError::UnsupportedOperation {
            op: "compare",
            left: left.type_of(),
            right: right.type_of(),
        };
        match (left, right) {
            (Variant::String(a), Variant::String(b)) => Ok(a.cmp(b)),
            (Variant::DateTime(a), Variant::DateTime(b)) => Ok(a.cmp(b)),
            (Variant::TimeSpan(a), Variant::TimeSpan(b)) => Ok(a.cmp(b)),
            (Variant::Boolean(a), Variant::Boolean(b)) => Ok(a.cmp(b)),
            _ => match self.numeric_pair("compare", left, right)? {
                (Variant::Integer(a), Variant::Integer(b)) => Ok(a.cmp(&b)),
                (Variant::Long(a), Variant::Long(b)) => Ok(a.cmp(&b)),
                (Variant::Float(a), Variant::Float(b)) => {
                    a.partial_cmp(&b).ok_or_else(unsupported)
                },
                (Variant::Double(a), Variant::Double(b)) => {
                    a.partial_cmp(&b).ok_or_else(unsupported)
                },
                _ => Err(ExpressionError::StackInconsistency),
            },
        }
    }

    fn like(&self, left: &Variant, right: &Variant) -> ExpressionResult<Variant> {
        let value = self.convert(left, VariantType::String)?;
        let pattern = self.convert(right, VariantType::String)?;
        match (value, pattern) {
            (Variant::String(v), Variant::String(p)) => {
                let value_chars: Vec<char> = v.chars().collect();
                let pattern_chars: Vec<char> = p.chars().collect();
                Ok(Variant::Boolean(like_match(&value_chars, &pattern_chars)))
            },
            _ => Err(ExpressionError::UnsupportedOperation {
                op: "like",
                left: left.type_of(),
                right: right.type_of(),
            }),
        }
    }

    fn is_in(&self, left: &Variant, right: &Variant) -> ExpressionResult<Variant> {
        match right {
            Variant::Array(items) => {
                let found = items.iter().any(|item| {
                    matches!(self.equal(left, item), Ok(Variant::Boolean(true)))
                });
                Ok(Variant::Boolean(found))
            },
            _ => self.equal(left, right),
        }
    }
}

/// Truncating finite-float-to-i32 conversion.
fn float_to_int(value: f64) -> Option<i32> {
    if value.is_finite() && value >= f64::from(i32::MIN) && value <= f64::from(i32::MAX) {
        Some(value as i32)
    } else {
        None
    }
}

/// Truncating finite-float-to-i64 conversion.
fn float_to_long(value: f64) -> Option<i64> {
    if value.is_finite() && value >= i64::MIN as f64 && value < i64::MAX as f64 {
        Some(value as i64)
    } else {
        None
    }
}

fn shift_amount(left: &Variant, right: &Variant, op: &'static str) -> ExpressionResult<u32> {
    let bits = match right {
        Variant::Integer(v) => u32::try_from(*v).ok(),
        Variant::Long(v) => u32::try_from(*v).ok(),
        _ => None,
    };
    bits.ok_or(ExpressionError::UnsupportedOperation {
        op,
        left: left.type_of(),
        right: right.type_of(),
    })
}

fn bitwise_or_logical(
    op: &'static str,
    left: &Variant,
    right: &Variant,
    bool_op: fn(bool, bool) -> bool,
    long_op: fn(i64, i64) -> i64,
) -> ExpressionResult<Variant> {
    match (left, right) {
        (Variant::Boolean(a), Variant::Boolean(b)) => Ok(Variant::Boolean(bool_op(*a, *b))),
        (Variant::Integer(a), Variant::Integer(b)) => {
            let result = long_op(i64::from(*a), i64::from(*b));
            Ok(Variant::Integer(result as i32))
        },
        (Variant::Integer(a), Variant::Long(b)) => Ok(Variant::Long(long_op(i64::from(*a), *b))),
        (Variant::Long(a), Variant::Integer(b)) => Ok(Variant::Long(long_op(*a, i64::from(*b)))),
        (Variant::Long(a), Variant::Long(b)) => Ok(Variant::Long(long_op(*a, *b))),
        _ => Err(ExpressionError::UnsupportedOperation {
            op,
            left: left.type_of(),
            right: right.type_of(),
        }),
    }
}
