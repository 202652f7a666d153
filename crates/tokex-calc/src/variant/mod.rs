//! The dynamically typed value model.
//!
//! A [`Variant`] carries exactly one of the tags listed in [`VariantType`];
//! the tag fully determines which payload is valid. Variants are immutable
//! once constructed; all operations on them (see [`ops`]) produce new
//! variants.

pub mod ops;

use std::any::Any;
use std::fmt;
use std::rc::Rc;

use chrono::{DateTime, Duration, Utc};

/// The tag of a [`Variant`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VariantType {
    /// No value.
    Null,
    /// 32-bit signed integer.
    Integer,
    /// 64-bit signed integer.
    Long,
    /// 32-bit floating point.
    Float,
    /// 64-bit floating point.
    Double,
    /// UTF-8 string.
    String,
    /// Boolean.
    Boolean,
    /// Point in time (UTC).
    DateTime,
    /// Signed duration.
    TimeSpan,
    /// Opaque host value, compared by identity.
    Object,
    /// Ordered sequence of variants.
    Array,
}

impl fmt::Display for VariantType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/// A dynamically typed value.
///
/// # Example
///
/// ```
/// use tokex_calc::{Variant, VariantType};
///
/// let value = Variant::from(42);
/// assert_eq!(value.type_of(), VariantType::Integer);
/// assert_eq!(value.as_integer(), Some(42));
/// assert!(!value.is_null());
/// ```
#[derive(Clone)]
pub enum Variant {
    /// No value.
    Null,
    /// 32-bit signed integer.
    Integer(i32),
    /// 64-bit signed integer.
    Long(i64),
    /// 32-bit floating point.
    Float(f32),
    /// 64-bit floating point.
    Double(f64),
    /// UTF-8 string.
    String(String),
    /// Boolean.
    Boolean(bool),
    /// Point in time (UTC).
    DateTime(DateTime<Utc>),
    /// Signed duration.
    TimeSpan(Duration),
    /// Opaque host value, compared by identity.
    Object(Rc<dyn Any>),
    /// Ordered sequence of variants.
    Array(Vec<Variant>),
}

impl Variant {
    /// Returns the tag of this variant.
    pub fn type_of(&self) -> VariantType {
        match self {
            Variant::Null => VariantType::Null,
            Variant::Integer(_) => VariantType::Integer,
            Variant::Long(_) => VariantType::Long,
            Variant::Float(_) => VariantType::Float,
            Variant::Double(_) => VariantType::Double,
            Variant::String(_) => VariantType::String,
            Variant::Boolean(_) => VariantType::Boolean,
            Variant::DateTime(_) => VariantType::DateTime,
            Variant::TimeSpan(_) => VariantType::TimeSpan,
            Variant::Object(_) => VariantType::Object,
            Variant::Array(_) => VariantType::Array,
        }
    }

    /// Returns true for `Variant::Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Variant::Null)
    }

    /// Returns the integer payload, if this is an `Integer`.
    pub fn as_integer(&self) -> Option<i32> {
        match self {
            Variant::Integer(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the long payload, if this is a `Long`.
    pub fn as_long(&self) -> Option<i64> {
        match self {
            Variant::Long(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the float payload, if this is a `Float`.
    pub fn as_float(&self) -> Option<f32> {
        match self {
            Variant::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the double payload, if this is a `Double`.
    pub fn as_double(&self) -> Option<f64> {
        match self {
            Variant::Double(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the string payload, if this is a `String`.
    pub fn as_string(&self) -> Option<&str> {
        match self {
            Variant::String(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the boolean payload, if this is a `Boolean`.
    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            Variant::Boolean(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the timestamp payload, if this is a `DateTime`.
    pub fn as_date_time(&self) -> Option<DateTime<Utc>> {
        match self {
            Variant::DateTime(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the duration payload, if this is a `TimeSpan`.
    pub fn as_time_span(&self) -> Option<Duration> {
        match self {
            Variant::TimeSpan(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the element slice, if this is an `Array`.
    pub fn as_array(&self) -> Option<&[Variant]> {
        match self {
            Variant::Array(v) => Some(v),
            _ => None,
        }
    }
}

impl PartialEq for Variant {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Variant::Null, Variant::Null) => true,
            (Variant::Integer(a), Variant::Integer(b)) => a == b,
            (Variant::Long(a), Variant::Long(b)) => a == b,
            (Variant::Float(a), Variant::Float(b)) => a == b,
            (Variant::Double(a), Variant::Double(b)) => a == b,
            (Variant::String(a), Variant::String(b)) => a == b,
            (Variant::Boolean(a), Variant::Boolean(b)) => a == b,
            (Variant::DateTime(a), Variant::DateTime(b)) => a == b,
            (Variant::TimeSpan(a), Variant::TimeSpan(b)) => a == b,
            (Variant::Object(a), Variant::Object(b)) => Rc::ptr_eq(a, b),
            (Variant::Array(a), Variant::Array(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Debug for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::Null => write!(f, "Null"),
            Variant::Integer(v) => write!(f, "Integer({v})"),
            Variant::Long(v) => write!(f, "Long({v})"),
            Variant::Float(v) => write!(f, "Float({v})"),
            Variant::Double(v) => write!(f, "Double({v})"),
            Variant::String(v) => write!(f, "String({v:?})"),
            Variant::Boolean(v) => write!(f, "Boolean({v})"),
            Variant::DateTime(v) => write!(f, "DateTime({v})"),
            Variant::TimeSpan(v) => write!(f, "TimeSpan({v})"),
            Variant::Object(_) => write!(f, "Object(..)"),
            Variant::Array(v) => f.debug_tuple("Array").field(v).finish(),
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::Null => Ok(()),
            Variant::Integer(v) => write!(f, "{v}"),
            Variant::Long(v) => write!(f, "{v}"),
            Variant::Float(v) => write!(f, "{v}"),
            Variant::Double(v) => write!(f, "{v}"),
            Variant::String(v) => write!(f, "{v}"),
            Variant::Boolean(v) => write!(f, "{v}"),
            Variant::DateTime(v) => write!(f, "{}", v.to_rfc3339()),
            Variant::TimeSpan(v) => write!(f, "{}ms", v.num_milliseconds()),
            Variant::Object(_) => write!(f, "<object>"),
            Variant::Array(items) => {
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            },
        }
    }
}

impl From<i32> for Variant {
    fn from(v: i32) -> Self {
        Variant::Integer(v)
    }
}

impl From<i64> for Variant {
    fn from(v: i64) -> Self {
        Variant::Long(v)
    }
}

impl From<f32> for Variant {
    fn from(v: f32) -> Self {
        Variant::Float(v)
    }
}

impl From<f64> for Variant {
    fn from(v: f64) -> Self {
        Variant::Double(v)
    }
}

impl From<bool> for Variant {
    fn from(v: bool) -> Self {
        Variant::Boolean(v)
    }
}

impl From<&str> for Variant {
    fn from(v: &str) -> Self {
        Variant::String(v.to_string())
    }
}

impl From<String> for Variant {
    fn from(v: String) -> Self {
        Variant::String(v)
    }
}

impl From<Vec<Variant>> for Variant {
    fn from(v: Vec<Variant>) -> Self {
        Variant::Array(v)
    }
}

impl From<DateTime<Utc>> for Variant {
    fn from(v: DateTime<Utc>) -> Self {
        Variant::DateTime(v)
    }
}

impl From<Duration> for Variant {
    fn from(v: Duration) -> Self {
        Variant::TimeSpan(v)
    }
}
