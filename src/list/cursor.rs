use crate::list::{List, HEAD, TAIL};
use crate::{ListError, Position};
use std::fmt;
use std::fmt::Formatter;

/// A cursor over a `List`.
///
/// A `Cursor` is like an iterator, except that it can freely seek back-and-forth.
///
/// In a list with length *n*, there are *n* + 1 valid locations for the cursor:
/// the *n* elements, and the end position (the tail sentinel).
///
/// # Examples
///
/// Here is a simple example showing how the cursors work. (The end of the
/// list is denoted by `#`).
/// ```
/// use sentinel_list::List;
///
/// // Create a list: [ A B C D #]
/// let list = List::from(['A', 'B', 'C', 'D']);
///
/// // Create a cursor at start: [|A B C D #]
/// let mut cursor = list.cursor_start();
/// assert_eq!(cursor.current(), Some(&'A'));
///
/// // Move cursor forward: [ A|B C D #]
/// assert!(cursor.move_next().is_ok());
/// assert_eq!(cursor.current(), Some(&'B'));
///
/// // Create a cursor in the end: [ A B C D|#]
/// let mut cursor = list.cursor_end();
/// assert_eq!(cursor.current(), None);
/// assert!(cursor.move_next().is_err());
///
/// // Move cursor backward: [ A B C|D #]
/// assert!(cursor.move_prev().is_ok());
/// assert_eq!(cursor.current(), Some(&'D'));
/// ```
///
/// A `Cursor` only reads the list:
/// ```compile_fail
/// use sentinel_list::List;
///
/// let list = List::from([1, 2, 3]);
/// let cursor = list.cursor_start();
/// *cursor.current().unwrap() = 5;
/// ```
pub struct Cursor<'a, T: 'a> {
    pub(crate) current: usize,
    pub(crate) list: &'a List<T>,
}

impl<'a, T: 'a> Clone for Cursor<'a, T> {
    fn clone(&self) -> Self {
        Self {
            current: self.current,
            list: self.list,
        }
    }
}

/// Compare cursors by the node they point to.
///
/// Only cursors of the same list pointing to the same node are considered
/// equal.
///
/// # Examples
/// ```
/// use sentinel_list::List;
///
/// let list = List::from([1, 2, 3]);
/// let cursor1 = list.cursor_start();
/// let mut cursor2 = cursor1.clone();
/// // The same list, and the same node.
/// assert_eq!(cursor1, cursor2);
///
/// cursor2.move_next().unwrap();
/// // The same list, but different nodes.
/// assert_ne!(cursor1, cursor2);
///
/// let another_list = list.clone();
/// let cursor3 = another_list.cursor_start();
/// // Different lists.
/// assert_ne!(cursor1, cursor3);
/// ```
impl<'a, T: 'a> PartialEq for Cursor<'a, T> {
    fn eq(&self, other: &Self) -> bool {
        self.same_list_with(other) && self.current == other.current
    }
}

impl<'a, T: 'a> Eq for Cursor<'a, T> {}

/// A cursor over a `List` with editing operations.
///
/// A `CursorMut` is like an iterator, except that it can freely seek back-and-forth,
/// and can safely mutate the list during iteration. This is because the lifetime of
/// its yielded references is tied to its own lifetime, instead of just the underlying
/// list. This means cursors cannot yield multiple elements at once.
///
/// For convenience, [`CursorMut::view`] provides a function to temporarily borrow
/// the list and returns an immutable reference whose lifetime is shorter than the
/// iterator. See the documents for details.
///
/// # Examples
///
/// ```compile_fail
/// use sentinel_list::List;
///
/// let mut list = List::from([1, 2, 3]);
/// let mut cursor = list.cursor_start_mut();
/// println!("{:?}", list.back());
/// println!("{:?}", cursor.current());
/// ```
pub struct CursorMut<'a, T: 'a> {
    pub(crate) current: usize,
    pub(crate) list: &'a mut List<T>,
}

macro_rules! impl_cursor {
    ($CURSOR:ident) => {
        // Private methods
        impl<'a, T: 'a> $CURSOR<'a, T> {
            pub(crate) fn is_front_node(&self) -> bool {
                self.prev_node() == HEAD
            }
            pub(crate) fn next_node(&self) -> usize {
                self.list.next_of(self.current)
            }
            pub(crate) fn prev_node(&self) -> usize {
                self.list.prev_of(self.current)
            }
        }

        impl<'a, T: 'a> $CURSOR<'a, T> {
            /// Returns `true` if the `List` is empty. See [`List::is_empty`].
            pub fn is_empty(&self) -> bool {
                self.list.is_empty()
            }

            /// Returns `true` if the cursor is at the end of the list.
            pub fn is_end(&self) -> bool {
                self.current == TAIL
            }

            /// Returns the detached [`Position`] of the node the cursor points to.
            ///
            /// # Examples
            ///
            /// ```
            /// use sentinel_list::List;
            ///
            /// let list = List::from([1, 2, 3]);
            /// let mut cursor = list.cursor_start();
            /// cursor.move_next().unwrap();
            /// assert_eq!(list.get(cursor.position()), Ok(&2));
            /// ```
            pub fn position(&self) -> Position {
                self.list.position_of(self.current)
            }

            /// Move the cursor to the next position, or return an error
            /// if it is at the end.
            ///
            /// This operation should compute in *O*(*1*) time.
            ///
            /// # Examples
            ///
            /// ```
            /// use sentinel_list::{List, ListError};
            ///
            /// let list = List::from([1, 2, 3]);
            /// let mut cursor = list.cursor_end();
            ///
            /// // The cursor is at the end
            /// assert_eq!(cursor.previous(), Some(&3));
            ///
            /// // Forbid to move past the end
            /// assert_eq!(cursor.move_next(), Err(ListError::PastEnd));
            ///
            /// // the cursor is still at the end
            /// assert_eq!(cursor.previous(), Some(&3));
            /// ```
            pub fn move_next(&mut self) -> Result<(), ListError> {
                if self.is_end() {
                    return Err(ListError::PastEnd);
                }
                self.current = self.next_node();
                Ok(())
            }

            /// Move the cursor to the previous position, or return an error
            /// if it is at the first node.
            ///
            /// This operation should compute in *O*(*1*) time.
            ///
            /// # Examples
            ///
            /// ```
            /// use sentinel_list::{List, ListError};
            ///
            /// let list = List::from([1, 2, 3]);
            /// let mut cursor = list.cursor_start();
            ///
            /// // The cursor is at the first node
            /// assert_eq!(cursor.current(), Some(&1));
            ///
            /// // Forbid to move before the first node
            /// assert_eq!(cursor.move_prev(), Err(ListError::BeforeBegin));
            ///
            /// // The cursor is still at the first node
            /// assert_eq!(cursor.current(), Some(&1));
            /// ```
            pub fn move_prev(&mut self) -> Result<(), ListError> {
                if self.is_front_node() {
                    return Err(ListError::BeforeBegin);
                }
                self.current = self.prev_node();
                Ok(())
            }

            /// Move forward the cursor by given steps, or return an error
            /// when it would pass the end.
            ///
            /// If an error occurs, the cursor will stay at the end.
            ///
            /// This operation should compute in *O*(*n*) time.
            ///
            /// # Examples
            ///
            /// ```
            /// use sentinel_list::List;
            ///
            /// let list = List::from([1, 2, 3]);
            /// let mut cursor = list.cursor_start();
            ///
            /// assert!(cursor.seek_forward(2).is_ok());
            /// assert_eq!(cursor.current(), Some(&3));
            ///
            /// assert!(cursor.seek_forward(5).is_err());
            /// assert!(cursor.is_end());
            /// ```
            pub fn seek_forward(&mut self, steps: usize) -> Result<(), ListError> {
                (0..steps).try_for_each(|_| self.move_next())
            }

            /// Move backward the cursor by given steps, or return an error
            /// when it would pass the first node.
            ///
            /// If an error occurs, the cursor will stay at the first node.
            ///
            /// This operation should compute in *O*(*n*) time.
            ///
            /// # Examples
            ///
            /// ```
            /// use sentinel_list::List;
            ///
            /// let list = List::from([1, 2, 3]);
            /// let mut cursor = list.cursor_end();
            ///
            /// assert!(cursor.seek_backward(5).is_err());
            /// assert_eq!(cursor.current(), Some(&1));
            /// ```
            pub fn seek_backward(&mut self, steps: usize) -> Result<(), ListError> {
                (0..steps).try_for_each(|_| self.move_prev())
            }

            /// Set the cursor to the start of the list (i.e. the first node).
            ///
            /// This operation should compute in *O*(*1*) time.
            #[inline]
            pub fn move_to_start(&mut self) {
                self.current = self.list.front_node();
            }

            /// Set the cursor to the end of the list (i.e. the tail sentinel).
            ///
            /// This operation should compute in *O*(*1*) time.
            #[inline]
            pub fn move_to_end(&mut self) {
                self.current = TAIL;
            }
        }

        impl<'a, T: fmt::Debug + 'a> fmt::Debug for $CURSOR<'a, T> {
            fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                f.debug_struct(stringify!($CURSOR))
                    .field("list", &self.list)
                    .field("current", &self.list.element(self.current))
                    .finish()
            }
        }
    };
}

impl_cursor!(CursorMut);
impl_cursor!(Cursor);

impl<'a, T: 'a> Cursor<'a, T> {
    pub(crate) fn new(list: &'a List<T>, current: usize) -> Self {
        Self { current, list }
    }

    fn same_list_with(&self, other: &Self) -> bool {
        std::ptr::eq(self.list, other.list)
    }

    /// Return an immutable reference of current node of the cursor,
    /// or return `None` if it is at the end.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let list = List::from([1, 2, 3]);
    /// assert_eq!(list.cursor_start().current(), Some(&1));
    /// assert_eq!(list.cursor_end().current(), None);
    /// ```
    pub fn current(&self) -> Option<&'a T> {
        self.list.element(self.current)
    }

    /// Like [`Cursor::current`], but fails with [`ListError::DerefEnd`] at
    /// the end instead of returning `None`.
    pub fn get(&self) -> Result<&'a T, ListError> {
        self.current().ok_or(ListError::DerefEnd)
    }

    /// Return an immutable reference of previous node of the cursor,
    /// or return `None` if it is located at the first node.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let list = List::from([1, 2, 3]);
    /// assert_eq!(list.cursor_start().previous(), None);
    /// assert_eq!(list.cursor_end().previous(), Some(&3));
    /// ```
    pub fn previous(&self) -> Option<&'a T> {
        // The head sentinel holds no element.
        self.list.element(self.prev_node())
    }
}

impl<'a, T: 'a> CursorMut<'a, T> {
    pub(crate) fn new(list: &'a mut List<T>, current: usize) -> Self {
        Self { current, list }
    }
}

// Methods that does not change the linking structure of the list.
impl<'a, T: 'a> CursorMut<'a, T> {
    /// Return an immutable reference of current node of the cursor,
    /// or return `None` if it is at the end.
    pub fn current(&self) -> Option<&T> {
        self.list.element(self.current)
    }

    /// Return an immutable reference of previous node of the cursor,
    /// or return `None` if it is located at the first node.
    pub fn previous(&self) -> Option<&T> {
        self.list.element(self.prev_node())
    }

    /// Return a mutable reference of current node of the cursor,
    /// or return `None` if it is at the end.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let mut list = List::from([1, 2, 3]);
    ///
    /// // Create a cursor and mutate the element in the current node.
    /// let mut cursor = list.cursor_start_mut();
    /// *cursor.current_mut().unwrap() *= 5;
    /// assert_eq!(cursor.current(), Some(&5));
    ///
    /// // Cannot mutate the end.
    /// assert!(list.cursor_end_mut().current_mut().is_none());
    /// ```
    pub fn current_mut(&mut self) -> Option<&mut T> {
        self.list.element_mut(self.current)
    }

    /// Return a mutable reference of previous node of the cursor,
    /// or return `None` if it is located at the first node.
    pub fn previous_mut(&mut self) -> Option<&mut T> {
        let prev = self.prev_node();
        self.list.element_mut(prev)
    }

    /// Re-borrow the mutable cursor as a short-lived immutable one.
    pub fn as_cursor(&self) -> Cursor<'_, T> {
        Cursor::new(self.list, self.current)
    }

    /// Convert the mutable cursor to an immutable one.
    pub fn into_cursor(self) -> Cursor<'a, T> {
        Cursor::new(self.list, self.current)
    }

    /// Temporarily view the list via an immutable reference.
    ///
    /// This is useful where the list is not able to read while a
    /// mutable cursor is created and being used.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let mut list = List::from([1, 2, 3]);
    /// let mut cursor = list.cursor_start_mut();
    ///
    /// // Temporarily view the list
    /// assert_eq!(cursor.view().back(), Some(&3));
    ///
    /// cursor.insert(4);
    /// assert_eq!(Vec::from_iter(list), vec![4, 1, 2, 3]);
    /// ```
    pub fn view(&self) -> &List<T> {
        self.list
    }
}

// Methods that might change the linking structure of the list.
impl<'a, T: 'a> CursorMut<'a, T> {
    /// Add an element before the cursor position, and return the position
    /// of the new node. The cursor stays put.
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let mut list = List::from([1, 2, 3]);
    /// let second = list.next_position(list.begin()).unwrap();
    /// let mut cursor = list.cursor_mut(second).unwrap();
    ///
    /// cursor.insert(4); // becomes [1, 4, 2, 3]
    /// assert_eq!(cursor.current(), Some(&2));
    ///
    /// cursor.move_to_end();
    /// let five = cursor.insert(5); // becomes [1, 4, 2, 3, 5]
    /// assert_eq!(cursor.previous(), Some(&5));
    ///
    /// assert_eq!(list.get(five), Ok(&5));
    /// assert_eq!(Vec::from_iter(list), vec![1, 4, 2, 3, 5]);
    /// ```
    pub fn insert(&mut self, item: T) -> Position {
        let node = self.list.insert_before(self.current, item);
        self.list.position_of(node)
    }

    /// Remove the element at the cursor and return it, or return `None`
    /// if the cursor is at the end. After removal, the cursor
    /// is moved to the next node unless no removing is happened.
    ///
    /// This operation should compute in *O*(*1*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let mut list = List::from_iter(0..10);
    /// let mut cursor = list.cursor_start_mut();
    /// cursor.seek_forward(5).unwrap();
    ///
    /// assert_eq!(cursor.remove(), Some(5)); // becomes [0, 1, 2, 3, 4, 6, 7, 8, 9]
    /// assert_eq!(cursor.current(), Some(&6));
    ///
    /// cursor.move_to_start();
    /// assert_eq!(cursor.remove(), Some(0)); // becomes [1, 2, 3, 4, 6, 7, 8, 9]
    /// assert_eq!(cursor.current(), Some(&1));
    ///
    /// cursor.move_to_end();
    /// assert_eq!(cursor.remove(), None);
    /// assert_eq!(cursor.current(), None);
    ///
    /// assert_eq!(Vec::from_iter(list), vec![1, 2, 3, 4, 6, 7, 8, 9]);
    /// ```
    pub fn remove(&mut self) -> Option<T> {
        if self.is_end() {
            return None;
        }
        let next = self.next_node();
        let item = self.list.detach_node(self.current);
        self.current = next;
        Some(item)
    }

    /// Remove the element before the cursor and return it, or return `None` if
    /// the cursor is at the first node. After removal, the cursor is not moved.
    ///
    /// This operation should compute in *O*(*1*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let mut list = List::from_iter(0..10);
    /// let mut cursor = list.cursor_start_mut();
    /// cursor.seek_forward(5).unwrap();
    ///
    /// assert_eq!(cursor.backspace(), Some(4)); // becomes [0, 1, 2, 3, 5, 6, 7, 8, 9]
    /// assert_eq!(cursor.current(), Some(&5));
    ///
    /// cursor.move_to_start();
    /// assert_eq!(cursor.backspace(), None);
    /// assert_eq!(cursor.current(), Some(&0));
    ///
    /// cursor.move_to_end();
    /// assert_eq!(cursor.backspace(), Some(9)); // becomes [0, 1, 2, 3, 5, 6, 7, 8]
    /// assert_eq!(cursor.current(), None);
    ///
    /// assert_eq!(Vec::from_iter(list), vec![0, 1, 2, 3, 5, 6, 7, 8]);
    /// ```
    pub fn backspace(&mut self) -> Option<T> {
        self.move_prev().ok().and_then(|_| self.remove())
    }
}

impl<'a, T: 'a> From<CursorMut<'a, T>> for Cursor<'a, T> {
    fn from(cursor: CursorMut<'a, T>) -> Self {
        cursor.into_cursor()
    }
}
