use crate::list::List;
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

/// Two lists are equal if they have the same length and pairwise-equal
/// elements. `ne` walks the lists on its own rather than negating `eq`.
impl<T: PartialEq> PartialEq for List<T> {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other)
    }

    #[allow(clippy::partialeq_ne_impl)]
    fn ne(&self, other: &Self) -> bool {
        self.iter().ne(other)
    }
}

impl<T: Eq> Eq for List<T> {}

impl<T: PartialOrd> PartialOrd for List<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other)
    }
}

impl<T: Ord> Ord for List<T> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other)
    }
}

impl<T: Clone> Clone for List<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }

    /// Overwrite the elements of `self` in place with those of `other`,
    /// then drop what is left of `self` or append what is left of `other`.
    fn clone_from(&mut self, other: &Self) {
        let mut others = other.iter();
        let mut cursor_mut = self.cursor_start_mut();
        while let Some(elem) = cursor_mut.current_mut() {
            let Some(elem_other) = others.next() else {
                break;
            };
            elem.clone_from(elem_other);
            // Not at the end, since the cursor has just held an element.
            let _ = cursor_mut.move_next();
        }
        while cursor_mut.remove().is_some() {}
        for elem_other in others {
            cursor_mut.insert(elem_other.clone());
        }
    }
}

impl<T: Hash> Hash for List<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let mut len = 0_usize;
        for elt in self {
            elt.hash(state);
            len += 1;
        }
        len.hash(state);
    }
}

impl<T> List<T> {
    /// Returns `true` if the `List` contains an element equal to the given value.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let mut list = List::new();
    ///
    /// list.push_back(0);
    /// list.push_back(1);
    /// list.push_back(2);
    ///
    /// assert_eq!(list.contains(&0), true);
    /// assert_eq!(list.contains(&10), false);
    /// ```
    pub fn contains(&self, x: &T) -> bool
    where
        T: PartialEq<T>,
    {
        self.iter().any(|e| e == x)
    }
}
