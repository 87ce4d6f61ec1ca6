use std::fmt;
use std::marker::PhantomData;

use tracing::trace;

use crate::error::PathError;
use crate::node::{build_node, AccessNode};
use crate::path::PropertyPath;
use crate::reflect::Reflect;
use crate::shape::Shape;
use crate::validation::resolve_segments;
use crate::value::Value;

/// Compiled accessor from an element of type `T` to its sort key
pub struct KeySelector<T> {
    path: PropertyPath,
    root: AccessNode,
    _element: PhantomData<fn(&T)>,
}

impl<T: Reflect> KeySelector<T> {
    /// Validate `path` against `T` and build its access graph
    pub fn compile(path: &str) -> Result<Self, PathError> {
        let path = PropertyPath::parse(path)?;
        let shape = T::shape();

        resolve_segments(&shape, &path.segments)?;
        let root = build_node(shape, &path.segments, 0)?;

        trace!(
            path = %path,
            element = shape.type_name,
            leaf = root.leaf_shape().type_name,
            depth = root.depth(),
            "compiled key selector"
        );

        Ok(Self {
            path,
            root,
            _element: PhantomData,
        })
    }

    /// Extract the key of `item`
    pub fn key<'a>(&self, item: &'a T) -> Value<'a> {
        self.root.eval(item.to_value())
    }
}

impl<T> KeySelector<T> {
    pub fn path(&self) -> &PropertyPath {
        &self.path
    }

    /// Shape of the keys this selector produces
    pub fn leaf_shape(&self) -> Shape {
        self.root.leaf_shape()
    }
}

impl<T> Clone for KeySelector<T> {
    fn clone(&self) -> Self {
        Self {
            path: self.path.clone(),
            root: self.root.clone(),
            _element: PhantomData,
        }
    }
}

impl<T> fmt::Debug for KeySelector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeySelector")
            .field("path", &self.path.raw)
            .field("leaf", &self.root.leaf_shape().type_name)
            .finish()
    }
}
