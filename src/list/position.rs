use std::sync::atomic::{AtomicU64, Ordering};

/// Identity of a `List`, unique within the process.
///
/// A clone of a list is a different list and gets a fresh id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct ListId(u64);

impl ListId {
    pub(crate) fn next() -> Self {
        static NEXT_ID: AtomicU64 = AtomicU64::new(0);
        ListId(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// A detached handle to a node of a [`List`], or to its end.
///
/// A `Position` does not borrow the list, so it survives mutations of the
/// list and can be passed back to [`List::insert`], [`List::erase`] and the
/// other position-taking methods. In exchange, every use is checked:
/// - a position from another list is rejected with
///   [`ListError::ForeignPosition`];
/// - a position whose node has been erased is rejected with
///   [`ListError::StalePosition`], even if the node's storage has since been
///   reused by a new element.
///
/// Two positions are equal iff they name the same node, regardless of the
/// elements they hold.
///
/// # Examples
///
/// ```
/// use sentinel_list::{List, ListError};
///
/// let mut list = List::from([1, 2, 3]);
/// let two = list.next_position(list.begin()).unwrap();
/// assert_eq!(list.get(two), Ok(&2));
///
/// list.erase(two).unwrap();
/// assert_eq!(list.get(two), Err(ListError::StalePosition));
///
/// // A position on an equal element is still a different position.
/// let other = List::from([1, 2, 3]);
/// assert_ne!(list.begin(), other.begin());
/// ```
///
/// [`List`]: crate::List
/// [`List::insert`]: crate::List::insert
/// [`List::erase`]: crate::List::erase
/// [`ListError::ForeignPosition`]: crate::ListError::ForeignPosition
/// [`ListError::StalePosition`]: crate::ListError::StalePosition
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    pub(crate) list: ListId,
    pub(crate) index: usize,
    pub(crate) generation: u32,
}

#[cfg(test)]
mod tests {
    use super::ListId;
    use crate::List;

    #[test]
    fn list_ids_are_unique() {
        let a = ListId::next();
        let b = ListId::next();
        assert_ne!(a, b);
    }

    #[test]
    fn position_identity() {
        let mut list = List::from([7, 7]);
        let first = list.begin();
        let second = list.next_position(first).unwrap();
        // Same element, different nodes.
        assert_eq!(list.get(first), list.get(second));
        assert_ne!(first, second);
        assert_eq!(list.prev_position(second), Ok(first));

        // A reused slot gets a new generation.
        list.erase(first).unwrap();
        let reused = list.insert(list.begin(), 7).unwrap();
        assert_eq!(reused.index, first.index);
        assert_ne!(reused, first);
    }
}
