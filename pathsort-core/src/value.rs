//! The loosely typed sort key.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::SortError;
use crate::reflect::{Record, Sequence};
use crate::shape::{Def, ScalarKind, Shape};

/// A runtime view of a value reached along a property path
///
/// Every leaf kind widens into one of these variants so that keys of any
/// declared type share a single accessor signature.
#[derive(Clone)]
pub enum Value<'a> {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Char(char),
    Str(Cow<'a, str>),
    DateTime(NaiveDateTime),
    Date(NaiveDate),
    Record(&'a dyn Record),
    Seq(&'a dyn Sequence),
    /// A JSON object reached through a dynamic member
    Map(&'a serde_json::Map<String, serde_json::Value>),
}

impl<'a> Value<'a> {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Short name of the variant, used in comparison errors
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::UInt(_) => "uint",
            Value::Float(_) => "float",
            Value::Char(_) => "char",
            Value::Str(_) => "string",
            Value::DateTime(_) => "datetime",
            Value::Date(_) => "date",
            Value::Record(_) => "record",
            Value::Seq(_) => "collection",
            Value::Map(_) => "object",
        }
    }

    /// Default ordering between two keys
    ///
    /// `Null` orders before everything else. Keys of the same scalar kind
    /// compare naturally; floats use `total_cmp` and strings compare by
    /// bytes. Numbers compare across `Int`, `UInt` and `Float`: exactly
    /// between the integer variants, through `f64` once a float is involved.
    /// Anything else is incomparable.
    pub fn try_cmp(&self, other: &Value<'_>) -> Result<Ordering, SortError> {
        match (self, other) {
            (Value::Null, Value::Null) => Ok(Ordering::Equal),
            (Value::Null, _) => Ok(Ordering::Less),
            (_, Value::Null) => Ok(Ordering::Greater),
            (Value::Bool(a), Value::Bool(b)) => Ok(a.cmp(b)),
            (Value::Int(a), Value::Int(b)) => Ok(a.cmp(b)),
            (Value::UInt(a), Value::UInt(b)) => Ok(a.cmp(b)),
            (Value::Float(a), Value::Float(b)) => Ok(a.total_cmp(b)),
            (Value::Int(a), Value::UInt(b)) => Ok(cmp_int_uint(*a, *b)),
            (Value::UInt(a), Value::Int(b)) => Ok(cmp_int_uint(*b, *a).reverse()),
            (Value::Int(a), Value::Float(b)) => Ok((*a as f64).total_cmp(b)),
            (Value::Float(a), Value::Int(b)) => Ok(a.total_cmp(&(*b as f64))),
            (Value::UInt(a), Value::Float(b)) => Ok((*a as f64).total_cmp(b)),
            (Value::Float(a), Value::UInt(b)) => Ok(a.total_cmp(&(*b as f64))),
            (Value::Char(a), Value::Char(b)) => Ok(a.cmp(b)),
            (Value::Str(a), Value::Str(b)) => Ok(a.cmp(b)),
            (Value::DateTime(a), Value::DateTime(b)) => Ok(a.cmp(b)),
            (Value::Date(a), Value::Date(b)) => Ok(a.cmp(b)),
            (a, b) => Err(SortError::Incomparable {
                left: a.kind_name(),
                right: b.kind_name(),
            }),
        }
    }
}

fn cmp_int_uint(a: i64, b: u64) -> Ordering {
    match u64::try_from(a) {
        Ok(a) => a.cmp(&b),
        Err(_) => Ordering::Less,
    }
}

/// The key a null intermediate value degrades to, given the leaf shape
pub fn default_key(shape: &Shape) -> Value<'static> {
    match shape.def {
        Def::Scalar(kind) => match kind {
            ScalarKind::Bool => Value::Bool(false),
            ScalarKind::Int => Value::Int(0),
            ScalarKind::UInt => Value::UInt(0),
            ScalarKind::Float => Value::Float(0.0),
            ScalarKind::Char => Value::Char('\0'),
            ScalarKind::Str => Value::Str(Cow::Borrowed("")),
            ScalarKind::DateTime => Value::DateTime(NaiveDateTime::MIN),
            ScalarKind::Date => Value::Date(NaiveDate::MIN),
            ScalarKind::Dynamic => Value::Null,
        },
        Def::Nullable(_) | Def::Collection(..) | Def::Record(_) => Value::Null,
    }
}

impl PartialEq for Value<'_> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Record(_), _) | (Value::Seq(_), _) | (Value::Map(_), _) => false,
            _ => matches!(self.try_cmp(other), Ok(Ordering::Equal)),
        }
    }
}

impl fmt::Debug for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "Null"),
            Value::Bool(b) => write!(f, "Bool({:?})", b),
            Value::Int(i) => write!(f, "Int({:?})", i),
            Value::UInt(u) => write!(f, "UInt({:?})", u),
            Value::Float(fl) => write!(f, "Float({:?})", fl),
            Value::Char(c) => write!(f, "Char({:?})", c),
            Value::Str(s) => write!(f, "Str({:?})", s),
            Value::DateTime(dt) => write!(f, "DateTime({:?})", dt),
            Value::Date(d) => write!(f, "Date({:?})", d),
            Value::Record(_) => write!(f, "Record(..)"),
            Value::Seq(_) => write!(f, "Seq(..)"),
            Value::Map(map) => write!(f, "Map({} keys)", map.len()),
        }
    }
}

impl fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::UInt(u) => write!(f, "{}", u),
            Value::Float(fl) => write!(f, "{}", fl),
            Value::Char(c) => write!(f, "{}", c),
            Value::Str(s) => write!(f, "{}", s),
            Value::DateTime(dt) => write!(f, "{}", dt),
            Value::Date(d) => write!(f, "{}", d),
            Value::Record(_) => write!(f, "{{record}}"),
            Value::Seq(_) => write!(f, "[..]"),
            Value::Map(_) => write!(f, "{{..}}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Reflect;

    #[test]
    fn test_null_orders_first() {
        let null = Value::Null;
        let name = Value::Str("Alpha".into());

        assert_eq!(null.try_cmp(&name), Ok(Ordering::Less));
        assert_eq!(name.try_cmp(&null), Ok(Ordering::Greater));
        assert_eq!(null.try_cmp(&Value::Null), Ok(Ordering::Equal));
    }

    #[test]
    fn test_same_kind_compares_naturally() {
        assert_eq!(Value::Int(-3).try_cmp(&Value::Int(2)), Ok(Ordering::Less));
        assert_eq!(
            Value::Str("b".into()).try_cmp(&Value::Str("a".into())),
            Ok(Ordering::Greater)
        );
        assert_eq!(
            Value::Float(f64::NAN).try_cmp(&Value::Float(1.0)),
            Ok(Ordering::Greater)
        );
    }

    #[test]
    fn test_numbers_compare_across_variants() {
        assert_eq!(Value::Int(1).try_cmp(&Value::Float(2.5)), Ok(Ordering::Less));
        assert_eq!(Value::Float(2.5).try_cmp(&Value::Int(1)), Ok(Ordering::Greater));
        assert_eq!(Value::UInt(3).try_cmp(&Value::Float(3.0)), Ok(Ordering::Equal));
        assert_eq!(
            Value::Int(5).try_cmp(&Value::UInt(u64::MAX)),
            Ok(Ordering::Less)
        );
        assert_eq!(
            Value::UInt(u64::MAX).try_cmp(&Value::Int(i64::MAX)),
            Ok(Ordering::Greater)
        );
        assert_eq!(Value::Int(-1).try_cmp(&Value::UInt(0)), Ok(Ordering::Less));
        assert_eq!(Value::UInt(7).try_cmp(&Value::Int(7)), Ok(Ordering::Equal));
    }

    #[test]
    fn test_mixed_kinds_are_incomparable() {
        let err = Value::Int(1).try_cmp(&Value::Str("1".into())).unwrap_err();
        assert_eq!(
            err,
            SortError::Incomparable {
                left: "int",
                right: "string"
            }
        );
        assert_eq!(err.to_string(), "cannot compare int key with string key");
    }

    #[test]
    fn test_default_key_per_leaf_shape() {
        assert_eq!(default_key(&<String as Reflect>::shape()), Value::Str("".into()));
        assert_eq!(default_key(&<u32 as Reflect>::shape()), Value::UInt(0));
        assert_eq!(default_key(&<i16 as Reflect>::shape()), Value::Int(0));
        assert_eq!(default_key(&<bool as Reflect>::shape()), Value::Bool(false));
        assert_eq!(
            default_key(&<NaiveDateTime as Reflect>::shape()),
            Value::DateTime(NaiveDateTime::MIN)
        );
        assert!(default_key(&<Option<String> as Reflect>::shape()).is_null());
        assert!(default_key(&<Vec<i32> as Reflect>::shape()).is_null());
    }
}
