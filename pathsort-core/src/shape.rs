//! Static type descriptors for reflectable types.
//!
//! Rust has no runtime introspection, so every type that can appear along a
//! sort path describes itself with a [`Shape`]. Records list their members in a
//! table generated by [`reflect_record!`](crate::reflect_record); scalars,
//! options, collections and smart pointers get their shapes from the blanket
//! implementations in [`crate::reflect`].

use std::fmt;

/// Leaf value kinds a sort key can have
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Bool,
    /// Any signed integer, widened to `i64`
    Int,
    /// Any unsigned integer, widened to `u64`
    UInt,
    /// `f32` or `f64`, widened to `f64`
    Float,
    Char,
    Str,
    DateTime,
    Date,
    /// `serde_json::Value`: the kind is decided per value
    Dynamic,
}

/// Collection types treated as "collection-like" by the resolver
///
/// Only ordered collections with a single type argument qualify, so the
/// "first element" of a projection is deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKind {
    Vec,
    VecDeque,
    LinkedList,
    BTreeSet,
}

/// Where a member's value comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberOrigin {
    /// A `&self` getter method
    Property,
    /// A public struct field
    Field,
}

/// A named member of a record together with its declared shape
#[derive(Debug, Clone, Copy)]
pub struct Member {
    pub name: &'static str,
    pub origin: MemberOrigin,
    pub shape: fn() -> Shape,
}

impl Member {
    pub const fn field(name: &'static str, shape: fn() -> Shape) -> Self {
        Self {
            name,
            origin: MemberOrigin::Field,
            shape,
        }
    }

    pub const fn property(name: &'static str, shape: fn() -> Shape) -> Self {
        Self {
            name,
            origin: MemberOrigin::Property,
            shape,
        }
    }

    /// Declared shape of the member
    pub fn declared_shape(&self) -> Shape {
        (self.shape)()
    }
}

/// Structural definition of a type
#[derive(Debug, Clone, Copy)]
pub enum Def {
    Scalar(ScalarKind),
    /// `Option<T>`, the only nullable form
    Nullable(fn() -> Shape),
    Collection(CollectionKind, fn() -> Shape),
    Record(&'static [Member]),
}

/// Static descriptor of a reflectable type
#[derive(Debug, Clone, Copy)]
pub struct Shape {
    pub type_name: &'static str,
    pub def: Def,
}

impl Shape {
    pub const fn new(type_name: &'static str, def: Def) -> Self {
        Self { type_name, def }
    }

    /// The shape with every `Option` layer removed
    pub fn non_null(self) -> Shape {
        let mut shape = self;
        while let Def::Nullable(inner) = shape.def {
            shape = inner();
        }
        shape
    }

    pub fn is_nullable(&self) -> bool {
        matches!(self.def, Def::Nullable(_))
    }

    /// Members of the record behind this shape, looking through `Option`
    pub fn members(&self) -> &'static [Member] {
        match self.non_null().def {
            Def::Record(members) => members,
            _ => &[],
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.type_name)
    }
}
