//! Differences between token sets.

use std::cmp::Ordering;

use bytes::Bytes;

use super::token::TokenMap;

/// Compute the update that turns `old` into `new`.
///
/// - tokens only in `old` yield a removal marker (`-NAME`, no value)
/// - tokens only in `new`, or present in both with a different value, yield
///   the new value
/// - unchanged tokens are omitted
///
/// Both maps are walked in name order, so the result does not depend on how
/// either map was populated.
pub fn difference(old: &TokenMap, new: &TokenMap) -> TokenMap {
    let mut diff = TokenMap::new();
    let mut old_iter = old.iter().peekable();
    let mut new_iter = new.iter().peekable();

    loop {
        let order = match (old_iter.peek(), new_iter.peek()) {
            (None, None) => break,
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (Some((old_name, _)), Some((new_name, _))) => old_name.cmp(new_name),
        };

        match order {
            Ordering::Less => {
                if let Some((name, _)) = old_iter.next() {
                    diff.insert(name.removal(), Bytes::new());
                }
            }
            Ordering::Greater => {
                if let Some((name, value)) = new_iter.next() {
                    diff.insert(name.clone(), value.clone());
                }
            }
            Ordering::Equal => {
                if let (Some((_, old_value)), Some((name, new_value))) =
                    (old_iter.next(), new_iter.next())
                {
                    if old_value != new_value {
                        diff.insert(name.clone(), new_value.clone());
                    }
                }
            }
        }
    }

    diff
}

/// Apply a difference produced by [`difference`] to `base`.
pub fn apply_difference(base: &mut TokenMap, diff: &TokenMap) {
    for (name, value) in diff {
        match name.removed() {
            Some(removed) => {
                base.remove(removed);
            }
            None => {
                base.insert(name.clone(), value.clone());
            }
        }
    }
}
