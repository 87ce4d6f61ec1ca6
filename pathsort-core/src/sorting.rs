use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use tracing::debug;

use crate::error::SortError;
use crate::reflect::Reflect;
use crate::selector::KeySelector;

/// Sort direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

impl From<bool> for SortDirection {
    fn from(ascending: bool) -> Self {
        if ascending {
            SortDirection::Ascending
        } else {
            SortDirection::Descending
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Ascending => write!(f, "ascending"),
            SortDirection::Descending => write!(f, "descending"),
        }
    }
}

/// A lazily ordered view over `source`
///
/// Nothing is read from the source until the view is iterated or
/// collected. The view is single-pass; ordering again means calling
/// [`order_by_property`] again.
pub struct OrderedView<I>
where
    I: IntoIterator,
{
    source: I,
    selector: Option<KeySelector<I::Item>>,
    direction: SortDirection,
}

impl<I> OrderedView<I>
where
    I: IntoIterator,
    I::Item: Reflect,
{
    /// Whether the path resolved; when it did not, the view yields the
    /// source in its original order
    pub fn is_ordered(&self) -> bool {
        self.selector.is_some()
    }

    /// Materialize the ordered elements, reporting incomparable keys
    pub fn try_into_vec(self) -> Result<Vec<I::Item>, SortError> {
        let items: Vec<I::Item> = self.source.into_iter().collect();
        let Some(selector) = self.selector else {
            return Ok(items);
        };

        let order = sorted_positions(&items, &selector, self.direction)?;
        Ok(reorder(items, &order))
    }
}

impl<I> IntoIterator for OrderedView<I>
where
    I: IntoIterator,
    I::Item: Reflect,
{
    type Item = I::Item;
    type IntoIter = std::vec::IntoIter<I::Item>;

    /// # Panics
    ///
    /// Panics when two extracted keys cannot be compared, for example a
    /// dynamic member holding a number on one element and a string on
    /// another. Use [`OrderedView::try_into_vec`] to handle that case.
    fn into_iter(self) -> Self::IntoIter {
        match self.try_into_vec() {
            Ok(items) => items.into_iter(),
            Err(err) => panic!("order_by_property: {}", err),
        }
    }
}

impl<I> fmt::Debug for OrderedView<I>
where
    I: IntoIterator,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderedView")
            .field("path", &self.selector.as_ref().map(|s| s.path().raw.as_str()))
            .field("direction", &self.direction)
            .finish_non_exhaustive()
    }
}

/// Order `source` by the value at `path`
///
/// Unresolvable paths (unknown members, empty or malformed paths) are not an
/// error: the returned view yields the source unchanged.
pub fn order_by_property<I>(source: I, path: &str, ascending: bool) -> OrderedView<I>
where
    I: IntoIterator,
    I::Item: Reflect,
{
    order_by_property_with(source, path, SortDirection::from(ascending))
}

pub fn order_by_property_with<I>(source: I, path: &str, direction: SortDirection) -> OrderedView<I>
where
    I: IntoIterator,
    I::Item: Reflect,
{
    let selector = match KeySelector::<I::Item>::compile(path) {
        Ok(selector) => Some(selector),
        Err(err) => {
            debug!(path, error = %err, "sort path does not resolve, keeping source order");
            None
        }
    };

    OrderedView {
        source,
        selector,
        direction,
    }
}

/// Method-call form of [`order_by_property`]
pub trait OrderByProperty: IntoIterator + Sized
where
    Self::Item: Reflect,
{
    fn order_by_property(self, path: &str) -> OrderedView<Self> {
        order_by_property_with(self, path, SortDirection::Ascending)
    }

    fn order_by_property_descending(self, path: &str) -> OrderedView<Self> {
        order_by_property_with(self, path, SortDirection::Descending)
    }
}

impl<I> OrderByProperty for I
where
    I: IntoIterator,
    I::Item: Reflect,
{
}

/// Stable sort of element positions by extracted key
///
/// Keys are extracted once per element. Every non-null key must be
/// comparable with every other one before the sort runs, so the comparator
/// always sees a total order.
fn sorted_positions<T: Reflect>(
    items: &[T],
    selector: &KeySelector<T>,
    direction: SortDirection,
) -> Result<Vec<usize>, SortError> {
    let mut keyed: Vec<_> = items
        .iter()
        .enumerate()
        .map(|(position, item)| (selector.key(item), position))
        .collect();

    let mut present = keyed.iter().map(|(key, _)| key).filter(|key| !key.is_null());
    if let Some(first) = present.next() {
        for other in present {
            first.try_cmp(other)?;
        }
    }

    keyed.sort_by(|(a, _), (b, _)| direction.apply(a.try_cmp(b).unwrap_or(Ordering::Equal)));

    Ok(keyed.into_iter().map(|(_, position)| position).collect())
}

fn reorder<T>(items: Vec<T>, order: &[usize]) -> Vec<T> {
    let mut slots: Vec<Option<T>> = items.into_iter().map(Some).collect();
    order
        .iter()
        .filter_map(|&position| slots[position].take())
        .collect()
}
