//! Reflection traits and the implementations for std, chrono and serde_json types.

use std::borrow::Cow;
use std::collections::{BTreeSet, LinkedList, VecDeque};
use std::rc::Rc;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::shape::{CollectionKind, Def, ScalarKind, Shape};
use crate::value::Value;

/// A type whose values can be walked by a property path
pub trait Reflect {
    /// Static description of the type
    fn shape() -> Shape
    where
        Self: Sized;

    /// Runtime view of this value
    fn to_value(&self) -> Value<'_>;
}

/// Member access on a record, by the member's declared name
///
/// Implemented by [`reflect_record!`](crate::reflect_record). Unknown names
/// yield `Value::Null`.
pub trait Record {
    fn member(&self, name: &str) -> Value<'_>;
}

/// Elementwise access to a collection-like value
pub trait Sequence {
    fn items(&self) -> Box<dyn Iterator<Item = Value<'_>> + '_>;
}

/// Conversion of a property getter's return value into a key of the
/// declared type `T`
///
/// A getter declared as `T` may return `T` by value (scalars and `String`),
/// `&T`, or an `Option` of either when `T` is itself an `Option`. Any other
/// return type fails to implement this trait, so a property declared with
/// the wrong type does not compile.
pub trait IntoKey<'a, T: Reflect> {
    fn into_key(self) -> Value<'a>;
}

impl<'a, T: Reflect> IntoKey<'a, T> for &'a T {
    fn into_key(self) -> Value<'a> {
        self.to_value()
    }
}

impl<'a, T: Reflect, R: IntoKey<'a, T>> IntoKey<'a, Option<T>> for Option<R> {
    fn into_key(self) -> Value<'a> {
        match self {
            Some(value) => value.into_key(),
            None => Value::Null,
        }
    }
}

impl<'a> IntoKey<'a, String> for String {
    fn into_key(self) -> Value<'a> {
        Value::Str(Cow::Owned(self))
    }
}

macro_rules! scalar {
    ($kind:ident, $variant:ident as $widened:ty => $($ty:ty),+) => {
        $(
            impl Reflect for $ty {
                fn shape() -> Shape {
                    Shape::new(stringify!($ty), Def::Scalar(ScalarKind::$kind))
                }

                fn to_value(&self) -> Value<'_> {
                    Value::$variant(<$widened>::from(*self))
                }
            }

            impl<'a> IntoKey<'a, $ty> for $ty {
                fn into_key(self) -> Value<'a> {
                    Value::$variant(<$widened>::from(self))
                }
            }
        )+
    };
}

scalar!(Bool, Bool as bool => bool);
scalar!(Int, Int as i64 => i8, i16, i32, i64);
scalar!(UInt, UInt as u64 => u8, u16, u32, u64);
scalar!(Float, Float as f64 => f32, f64);
scalar!(Char, Char as char => char);
scalar!(DateTime, DateTime as NaiveDateTime => NaiveDateTime);
scalar!(Date, Date as NaiveDate => NaiveDate);

impl Reflect for isize {
    fn shape() -> Shape {
        Shape::new("isize", Def::Scalar(ScalarKind::Int))
    }

    fn to_value(&self) -> Value<'_> {
        Value::Int(*self as i64)
    }
}

impl<'a> IntoKey<'a, isize> for isize {
    fn into_key(self) -> Value<'a> {
        Value::Int(self as i64)
    }
}

impl Reflect for usize {
    fn shape() -> Shape {
        Shape::new("usize", Def::Scalar(ScalarKind::UInt))
    }

    fn to_value(&self) -> Value<'_> {
        Value::UInt(*self as u64)
    }
}

impl<'a> IntoKey<'a, usize> for usize {
    fn into_key(self) -> Value<'a> {
        Value::UInt(self as u64)
    }
}

impl Reflect for String {
    fn shape() -> Shape {
        Shape::new("String", Def::Scalar(ScalarKind::Str))
    }

    fn to_value(&self) -> Value<'_> {
        Value::Str(Cow::Borrowed(self.as_str()))
    }
}

impl Reflect for DateTime<Utc> {
    fn shape() -> Shape {
        Shape::new("DateTime<Utc>", Def::Scalar(ScalarKind::DateTime))
    }

    fn to_value(&self) -> Value<'_> {
        Value::DateTime(self.naive_utc())
    }
}

impl<'a> IntoKey<'a, DateTime<Utc>> for DateTime<Utc> {
    fn into_key(self) -> Value<'a> {
        Value::DateTime(self.naive_utc())
    }
}

impl Reflect for serde_json::Value {
    fn shape() -> Shape {
        Shape::new("serde_json::Value", Def::Scalar(ScalarKind::Dynamic))
    }

    fn to_value(&self) -> Value<'_> {
        match self {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else if let Some(u) = n.as_u64() {
                    Value::UInt(u)
                } else if let Some(f) = n.as_f64() {
                    Value::Float(f)
                } else {
                    Value::Null
                }
            }
            serde_json::Value::String(s) => Value::Str(Cow::Borrowed(s.as_str())),
            serde_json::Value::Array(arr) => Value::Seq(arr),
            serde_json::Value::Object(map) => Value::Map(map),
        }
    }
}

impl<T: Reflect> Reflect for Option<T> {
    fn shape() -> Shape {
        Shape::new(std::any::type_name::<Self>(), Def::Nullable(T::shape))
    }

    fn to_value(&self) -> Value<'_> {
        match self {
            Some(value) => value.to_value(),
            None => Value::Null,
        }
    }
}

macro_rules! transparent {
    ($($wrapper:ident),+) => {
        $(
            impl<T: Reflect> Reflect for $wrapper<T> {
                fn shape() -> Shape {
                    T::shape()
                }

                fn to_value(&self) -> Value<'_> {
                    T::to_value(self)
                }
            }
        )+
    };
}

transparent!(Box, Rc, Arc);

impl<T: Reflect> Reflect for &T {
    fn shape() -> Shape {
        T::shape()
    }

    fn to_value(&self) -> Value<'_> {
        T::to_value(self)
    }
}

macro_rules! collection {
    ($($kind:ident => $coll:ident),+) => {
        $(
            impl<T: Reflect> Reflect for $coll<T> {
                fn shape() -> Shape {
                    Shape::new(
                        std::any::type_name::<Self>(),
                        Def::Collection(CollectionKind::$kind, T::shape),
                    )
                }

                fn to_value(&self) -> Value<'_> {
                    Value::Seq(self)
                }
            }

            impl<T: Reflect> Sequence for $coll<T> {
                fn items(&self) -> Box<dyn Iterator<Item = Value<'_>> + '_> {
                    Box::new(self.iter().map(|item| item.to_value()))
                }
            }
        )+
    };
}

collection!(
    Vec => Vec,
    VecDeque => VecDeque,
    LinkedList => LinkedList,
    BTreeSet => BTreeSet
);

/// Implement [`Reflect`] and [`Record`] for a struct
///
/// Fields are listed with their declared types. Properties are `&self`
/// getter methods listed with the type they describe; the getter may return
/// that type by value, by reference, or wrapped in `Option`.
///
/// Both the member's shape and its runtime value are produced through the
/// declared type, so the declaration must match the real field or getter
/// type. A field can only be declared as a type its reference derefs to,
/// which for `Box`, `Rc` and `Arc` is the same shape anyway.
///
/// Path segments are matched with ASCII case folding only, so members whose
/// names contain non-ASCII characters are listed but can never be reached
/// by a path.
///
/// ```
/// use pathsort_core::reflect_record;
///
/// pub struct Author {
///     pub first: String,
///     pub last: String,
/// }
///
/// impl Author {
///     pub fn full_name(&self) -> String {
///         format!("{} {}", self.first, self.last)
///     }
/// }
///
/// reflect_record!(Author {
///     first: String,
///     last: String,
/// } properties {
///     full_name: String,
/// });
/// ```
///
/// A declaration that disagrees with the field type is rejected:
///
/// ```compile_fail
/// use pathsort_core::reflect_record;
///
/// pub struct Inner {
///     pub code: String,
/// }
///
/// reflect_record!(Inner { code: i64 });
/// ```
///
/// and so is a property whose getter returns something else:
///
/// ```compile_fail
/// use pathsort_core::reflect_record;
///
/// pub struct Counter {
///     pub hits: u32,
/// }
///
/// impl Counter {
///     pub fn label(&self) -> String {
///         self.hits.to_string()
///     }
/// }
///
/// reflect_record!(Counter { hits: u32 } properties { label: i64 });
/// ```
#[macro_export]
macro_rules! reflect_record {
    (
        $ty:ident { $( $field:ident : $fty:ty ),* $(,)? }
        $( properties { $( $prop:ident : $pty:ty ),* $(,)? } )?
    ) => {
        impl $crate::Reflect for $ty {
            fn shape() -> $crate::Shape {
                const MEMBERS: &[$crate::Member] = &[
                    $($( $crate::Member::property(
                        stringify!($prop),
                        <$pty as $crate::Reflect>::shape,
                    ), )*)?
                    $( $crate::Member::field(
                        stringify!($field),
                        <$fty as $crate::Reflect>::shape,
                    ), )*
                ];
                $crate::Shape::new(stringify!($ty), $crate::Def::Record(MEMBERS))
            }

            fn to_value(&self) -> $crate::Value<'_> {
                $crate::Value::Record(self)
            }
        }

        impl $crate::Record for $ty {
            #[allow(unreachable_patterns)]
            fn member(&self, name: &str) -> $crate::Value<'_> {
                match name {
                    $($( stringify!($prop) => $crate::IntoKey::<$pty>::into_key(self.$prop()), )*)?
                    $( stringify!($field) => <$fty as $crate::Reflect>::to_value(&self.$field), )*
                    _ => $crate::Value::Null,
                }
            }
        }
    };
}
