use crate::shape::{Def, Member, MemberOrigin, Shape};

/// Find a member of `shape` by a case-insensitive name
///
/// Properties are searched before fields. Within each pass an exact
/// case-insensitive match wins; failing that, underscores are ignored too,
/// so `SubCategory` finds a field declared as `sub_category`. Shapes that
/// are not records (after looking through `Option`) have no members.
pub fn resolve_member(shape: &Shape, name: &str) -> Option<Member> {
    let members = shape.members();
    if members.is_empty() || name.is_empty() {
        return None;
    }

    [MemberOrigin::Property, MemberOrigin::Field]
        .into_iter()
        .find_map(|origin| {
            let candidates = || members.iter().filter(move |m| m.origin == origin);

            candidates()
                .find(|m| m.name.eq_ignore_ascii_case(name))
                .or_else(|| candidates().find(|m| loose_eq(m.name, name)))
                .copied()
        })
}

/// ASCII case-insensitive comparison that skips `_`
fn loose_eq(a: &str, b: &str) -> bool {
    a.bytes()
        .filter(|&c| c != b'_')
        .map(|c| c.to_ascii_lowercase())
        .eq(b.bytes().filter(|&c| c != b'_').map(|c| c.to_ascii_lowercase()))
}

/// Element shape of a collection-like shape, looking through `Option`
pub fn collection_element(shape: &Shape) -> Option<Shape> {
    match shape.non_null().def {
        Def::Collection(_, element) => Some(element()),
        _ => None,
    }
}

pub fn is_collection(shape: &Shape) -> bool {
    collection_element(shape).is_some()
}
