use crate::list::{Entry, List, Node, Slot};
use std::fmt;
use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::ptr::NonNull;

/// An iterator over the elements of a `List`.
///
/// It uses a pair of nodes `start..end` to represent a half-open subrange
/// of the list, where `start` is inclusive and `end` is not. It is created by
/// [`List::iter`] for the whole list and by [`List::range`] for a subrange.
///
/// # Examples
///
/// ```compile_fail
/// use sentinel_list::List;
///
/// let mut list = List::from([1, 2, 3]);
/// let mut iter = list.iter();
///
/// // Won't compile, because list is already borrowed immutably.
/// list.push_back(4);
/// println!("{:?}", iter.next());
/// ```
pub struct Iter<'a, T: 'a> {
    list: &'a List<T>,
    start: usize,
    end: usize,
    len: usize,
}

impl<'a, T: 'a> Iter<'a, T> {
    pub(crate) fn new(list: &'a List<T>, start: usize, end: usize, len: usize) -> Self {
        Self {
            list,
            start,
            end,
            len,
        }
    }
}

impl<'a, T: 'a> Clone for Iter<'a, T> {
    fn clone(&self) -> Self {
        Self { ..*self }
    }
}

impl<'a, T: fmt::Debug + 'a> fmt::Debug for Iter<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut f = f.debug_tuple("Iter");
        for element in self.clone() {
            f.field(element);
        }
        f.finish()
    }
}

impl<'a, T: 'a> Iterator for Iter<'a, T> {
    type Item = &'a T;

    /// Return `*start` and reset the iterating range to `(start.next)..end`,
    /// or return `None` if `start..end` is already empty.
    fn next(&mut self) -> Option<Self::Item> {
        if self.start == self.end {
            return None;
        }
        let current = self.start;
        self.start = self.list.next_of(current);
        self.len -= 1;
        self.list.element(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }

    fn last(mut self) -> Option<Self::Item>
    where
        Self: Sized,
    {
        self.next_back()
    }
}

impl<'a, T: 'a> DoubleEndedIterator for Iter<'a, T> {
    /// Reset the iterating range to `start..(end.prev)` and return `*end`,
    /// or return `None` if `start..end` is already empty.
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.start == self.end {
            return None;
        }
        self.end = self.list.prev_of(self.end);
        self.len -= 1;
        self.list.element(self.end)
    }
}

impl<'a, T: 'a> ExactSizeIterator for Iter<'a, T> {}

impl<'a, T: 'a> FusedIterator for Iter<'a, T> {}

/// A mutable iterator over the elements of a `List`.
///
/// `front..=back` denotes the nodes not yielded yet, and `len` counts them.
/// A node is never read again once its element has been handed out.
///
/// Though the `IterMut` does not hold a reference from the list,
/// it actually *borrows* (mutably) from the list, so a phantom
/// marker of `&'a mut List<T>` is added to protect the list from
/// being read.
///
/// # Examples
///
/// `List` is not readable after an `IterMut` is created.
/// ```compile_fail
/// use sentinel_list::List;
///
/// let mut list = List::from([1, 2, 3]);
/// let mut iter = list.iter_mut();
/// println!("{:?}", list.back());
/// println!("{:?}", iter.next());
/// ```
pub struct IterMut<'a, T: 'a> {
    slots: NonNull<Slot<T>>,
    front: usize,
    back: usize,
    len: usize,
    _marker: PhantomData<&'a mut List<T>>,
}

impl<'a, T: 'a> IterMut<'a, T> {
    pub(crate) fn new(list: &'a mut List<T>) -> Self {
        let front = list.front_node();
        let back = list.back_node();
        let len = list.len();
        let slots = NonNull::from(list.slots.as_mut_slice()).cast();
        Self {
            slots,
            front,
            back,
            len,
            _marker: PhantomData,
        }
    }

    /// # Safety
    ///
    /// `index` must be a node among the `len` nodes not yielded yet.
    unsafe fn node(&self, index: usize) -> &Node<T> {
        match unsafe { &(*self.slots.as_ptr().add(index)).entry } {
            Entry::Occupied(node) => node,
            _ => unreachable!("slot {} holds no element", index),
        }
    }

    /// # Safety
    ///
    /// `index` must be a node among the `len` nodes not yielded yet, and it
    /// must be removed from them before the next call.
    unsafe fn node_mut(&mut self, index: usize) -> &'a mut Node<T> {
        match unsafe { &mut (*self.slots.as_ptr().add(index)).entry } {
            Entry::Occupied(node) => node,
            _ => unreachable!("slot {} holds no element", index),
        }
    }
}

impl<'a, T: fmt::Debug + 'a> fmt::Debug for IterMut<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut f = f.debug_tuple("IterMut");
        let mut index = self.front;
        for _ in 0..self.len {
            // SAFETY: the walk only visits the nodes not yielded yet.
            let node = unsafe { self.node(index) };
            f.field(&node.element);
            index = node.links.next;
        }
        f.finish()
    }
}

impl<'a, T: 'a> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        // SAFETY: `front` is not yielded yet since `len > 0`, and it leaves
        // the remaining nodes right here.
        let node = unsafe { self.node_mut(self.front) };
        self.front = node.links.next;
        self.len -= 1;
        Some(&mut node.element)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }

    fn last(mut self) -> Option<Self::Item>
    where
        Self: Sized,
    {
        self.next_back()
    }
}

impl<'a, T: 'a> DoubleEndedIterator for IterMut<'a, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        // SAFETY: `back` is not yielded yet since `len > 0`, and it leaves
        // the remaining nodes right here.
        let node = unsafe { self.node_mut(self.back) };
        self.back = node.links.prev;
        self.len -= 1;
        Some(&mut node.element)
    }
}

impl<'a, T: 'a> ExactSizeIterator for IterMut<'a, T> {}

impl<'a, T: 'a> FusedIterator for IterMut<'a, T> {}

unsafe impl<T: Send> Send for IterMut<'_, T> {}

unsafe impl<T: Sync> Sync for IterMut<'_, T> {}

/// An owning iterator over the elements of a `List`.
///
/// This `struct` is created by the [`into_iter`] method on [`List`]
/// (provided by the `IntoIterator` trait). See its documentation for more.
///
/// [`into_iter`]: List::into_iter
pub struct IntoIter<T> {
    list: List<T>,
}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntoIter")
            .field("list", &self.list)
            .finish()
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.list.pop_front()
    }

    #[cfg(feature = "length")]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.list.len;
        (len, Some(len))
    }

    fn last(mut self) -> Option<Self::Item>
    where
        Self: Sized,
    {
        self.next_back()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.list.pop_back()
    }
}

#[cfg(feature = "length")]
impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> IntoIterator for List<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { list: self }
    }
}

impl<'a, T> IntoIterator for &'a List<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut List<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T> FromIterator<T> for List<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = List::new();
        list.extend(iter);
        list
    }
}

/// Build a list from a literal sequence, in order.
///
/// # Examples
///
/// ```
/// use sentinel_list::List;
///
/// let list = List::from([1, 2, 3, 4]);
/// assert_eq!(list.len(), 4);
/// assert_eq!(list.front(), Some(&1));
/// assert_eq!(list.back(), Some(&4));
/// ```
impl<T, const N: usize> From<[T; N]> for List<T> {
    fn from(array: [T; N]) -> Self {
        Self::from_iter(array)
    }
}

impl<T> Extend<T> for List<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        iter.into_iter().for_each(|item| self.push_back(item));
    }
}

impl<'a, T: 'a + Copy> Extend<&'a T> for List<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use crate::List;
    use expect_test::expect;
    use std::fmt::Debug;

    #[test]
    fn test_iter() {
        macro_rules! test_iter {
            ($FN:ident, $ITER:ident $(, $REV:ident)?) => {
                fn $FN<T, I>(input: I, mid: usize)
                where
                    T: Eq + Debug + Clone,
                    I: IntoIterator<Item = T>,
                {
                    #[allow(unused_mut)]
                    let mut vec = Vec::from_iter(input);
                    #[allow(unused_mut)]
                    let mut list = List::from_iter(vec.clone());
                    let len = vec.len();
                    let mut iter = list.$ITER() $( .$REV() )?;
                    for (i, item) in vec.$ITER() $( .$REV() )?.enumerate() {
                        assert_eq!(iter.next(), Some(item));
                        assert_eq!(iter.len(), len - i - 1);
                    }
                    assert_eq!(iter.next(), None);
                    assert_eq!(iter.next(), None);
                    assert_eq!(iter.next_back(), None);
                    assert_eq!(iter.len(), 0);

                    let mut iter = list.$ITER() $( .$REV() )?;
                    for (i, item) in vec.$ITER() $( .$REV() )? .take(mid).enumerate() {
                        assert_eq!(iter.next(), Some(item));
                        assert_eq!(iter.len(), len - i - 1);
                    }
                    let mut iter = iter.rev();
                    for (i, item) in vec.$ITER() $( .$REV() )? .skip(mid).rev().enumerate() {
                        assert_eq!(iter.next(), Some(item));
                        assert_eq!(iter.len(), len - mid - i - 1);
                    }
                    assert_eq!(iter.next(), None);
                    assert_eq!(iter.next(), None);
                    assert_eq!(iter.next_back(), None);
                    assert_eq!(iter.len(), 0);
                }
            };
        }
        test_iter!(test_iter, iter);
        test_iter!(test_iter_mut, iter_mut);
        test_iter!(test_back_iter, iter, rev);
        test_iter!(test_back_iter_mut, iter_mut, rev);

        fn test_case<T, I>(input: I, mid: usize)
        where
            T: Eq + Debug + Clone,
            I: IntoIterator<Item = T> + Clone,
        {
            test_iter(input.clone(), mid);
            test_iter_mut(input.clone(), mid);
            test_back_iter(input.clone(), mid);
            test_back_iter_mut(input.clone(), mid);
        }
        test_case(0..10, 10);
        test_case(0..10, 8);
        test_case(0..10, 5);
        test_case(0..10, 2);
        test_case(0..10, 0);
        test_case(0..2, 2);
        test_case(0..2, 1);
        test_case(0..2, 0);
        test_case(0..1, 1);
        test_case(0..1, 0);
        test_case(0..0, 0);
    }

    #[test]
    fn iter_mut_meets_in_the_middle() {
        let mut list = List::from_iter(0..5);
        let mut iter = list.iter_mut();
        let first = iter.next().unwrap();
        let last = iter.next_back().unwrap();
        *first += 100;
        *last += 100;
        for elem in iter.by_ref() {
            *elem = -*elem;
        }
        assert_eq!(iter.next_back(), None);
        assert!(list.iter().eq(&[100, -1, -2, -3, 104]));
    }

    #[test]
    fn range_iter() {
        let list = List::from_iter(0..6);
        let two = list.next_position(list.next_position(list.begin()).unwrap()).unwrap();
        let five = list.prev_position(list.end()).unwrap();

        let range = list.range(two, five).unwrap();
        assert_eq!(range.len(), 3);
        assert!(range.clone().eq(&[2, 3, 4]));
        assert!(range.rev().eq(&[4, 3, 2]));
        assert_eq!(list.range(five, five).unwrap().next(), None);
    }

    #[test]
    fn into_iter_both_ends() {
        let list = List::from(["a", "b", "c", "d"]);
        let mut iter = list.into_iter();
        assert_eq!(iter.next(), Some("a"));
        assert_eq!(iter.next_back(), Some("d"));
        #[cfg(feature = "length")]
        assert_eq!(iter.len(), 2);
        assert_eq!(Vec::from_iter(iter), vec!["b", "c"]);
    }

    #[test]
    fn extend_by_reference() {
        let mut list = List::from([1]);
        list.extend(&[2, 3]);
        list.extend(vec![4]);
        assert!(list.iter().eq(&[1, 2, 3, 4]));
    }

    #[test]
    fn iterator_debug() {
        let mut list = List::from([1, 2, 3]);
        let mut iter = list.iter();
        iter.next();
        expect![["Iter(2, 3)"]].assert_eq(&format!("{:?}", iter));

        let mut iter = list.iter_mut();
        iter.next_back();
        expect![["IterMut(1, 2)"]].assert_eq(&format!("{:?}", iter));

        expect![["IntoIter { list: [1, 2, 3] }"]].assert_eq(&format!("{:?}", list.into_iter()));
    }
}
