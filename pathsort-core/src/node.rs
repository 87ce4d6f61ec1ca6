//! Access graph built from a property path.
//!
//! The graph is a small tagged-variant AST evaluated directly at sort time.
//! Each non-leaf node guards against a null current value, so a missing
//! intermediate value degrades to the leaf type's default instead of
//! aborting key extraction.

use crate::error::PathError;
use crate::reflect::Record;
use crate::resolver::{collection_element, resolve_member};
use crate::shape::{Member, Shape};
use crate::value::{default_key, Value};

/// Null test for the value a node is applied to, paired with the leaf
/// shape whose default is produced when it fires
#[derive(Debug, Clone, Copy)]
pub struct NullGuard {
    pub leaf: Shape,
}

impl NullGuard {
    fn new(leaf: Shape) -> Self {
        Self { leaf }
    }

    fn fallback<'a>(&self) -> Value<'a> {
        default_key(&self.leaf)
    }
}

#[derive(Debug, Clone)]
pub enum AccessNode {
    /// End of the path: the current value is the key
    Leaf { shape: Shape },
    /// Read `member` from the current record, then continue with `next`
    Member {
        member: Member,
        shape: Shape,
        guard: NullGuard,
        next: Box<AccessNode>,
    },
    /// Evaluate `body` against each element of the current collection and
    /// keep the first result
    Project {
        element: Shape,
        guard: NullGuard,
        body: Box<AccessNode>,
    },
}

impl AccessNode {
    /// Shape of the key the whole chain produces
    pub fn leaf_shape(&self) -> Shape {
        match self {
            AccessNode::Leaf { shape } => *shape,
            AccessNode::Member { next, .. } => next.leaf_shape(),
            AccessNode::Project { body, .. } => body.leaf_shape(),
        }
    }

    /// Number of member reads along the chain
    pub fn depth(&self) -> usize {
        match self {
            AccessNode::Leaf { .. } => 0,
            AccessNode::Member { next, .. } => 1 + next.depth(),
            AccessNode::Project { body, .. } => body.depth(),
        }
    }

    /// Evaluate the chain against `current`
    pub fn eval<'a>(&self, current: Value<'a>) -> Value<'a> {
        match self {
            AccessNode::Leaf { .. } => current,
            AccessNode::Member {
                member, guard, next, ..
            } => match current {
                Value::Record(record) => next.eval(read_member(record, member)),
                _ => guard.fallback(),
            },
            AccessNode::Project { guard, body, .. } => match current {
                Value::Seq(items) => items
                    .items()
                    .map(|item| body.eval(item))
                    .next()
                    .unwrap_or_else(|| guard.fallback()),
                _ => guard.fallback(),
            },
        }
    }
}

fn read_member<'a>(record: &'a dyn Record, member: &Member) -> Value<'a> {
    record.member(member.name)
}

/// Build the access graph for `segments[depth..]` starting from `shape`
///
/// Collection-like shapes are projected through their first element; every
/// other step reads the resolved member. Each node's guard carries the
/// default of the final leaf shape.
pub fn build_node(shape: Shape, segments: &[String], depth: usize) -> Result<AccessNode, PathError> {
    if depth >= segments.len() {
        return Ok(AccessNode::Leaf { shape });
    }

    if let Some(element) = collection_element(&shape) {
        let body = build_node(element, segments, depth)?;
        let guard = NullGuard::new(body.leaf_shape());
        return Ok(AccessNode::Project {
            element,
            guard,
            body: Box::new(body),
        });
    }

    let segment = &segments[depth];
    let member = resolve_member(&shape, segment).ok_or_else(|| PathError::UnknownMember {
        segment: segment.clone(),
        type_name: shape.non_null().type_name,
    })?;

    let member_shape = member.declared_shape();
    let next = build_node(member_shape, segments, depth + 1)?;
    let guard = NullGuard::new(next.leaf_shape());

    Ok(AccessNode::Member {
        member,
        shape: member_shape,
        guard,
        next: Box::new(next),
    })
}
