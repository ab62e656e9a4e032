use std::fmt::{Debug, Formatter};

use tracing::{debug, trace, warn};

use crate::list::cursor::{Cursor, CursorMut};
use crate::list::position::ListId;
use crate::{IntoIter, Iter, IterMut, ListError, Position};

pub mod cursor;
pub mod iterator;
pub mod position;

mod algorithms;

/// Slot of the head sentinel. Its `next` is the first element.
pub(crate) const HEAD: usize = 0;
/// Slot of the tail sentinel, which is also the end position. Its `prev`
/// is the last element.
pub(crate) const TAIL: usize = 1;

/// The `List` is a doubly-linked list whose nodes are anchored by two
/// permanent sentinel nodes, a head and a tail.
///
/// Inserting or erasing at a known [`Position`] takes constant time. In
/// compromise, reaching the *k*-th element takes *O*(*k*) steps.
///
/// The `List` contains:
/// - the node slots, where slot `0` is the head sentinel, slot `1` the tail
///   sentinel and every other slot either holds an element or is vacant;
/// - a free list threading the vacant slots, reused by later insertions;
/// - a length field `len` indicating the length of the list. It can be
///   disabled by disabling the `length` feature in your `Cargo.toml`:
/// ```text
/// [dependencies]
/// sentinel_list = { default-features = false }
/// ```
///
/// # Naming Conventions
///
/// - `first..last`: a half-open range of list nodes, left inclusive and right
///   exclusive (probably the tail sentinel);
/// - `front`, `back`: the first and the last element.
pub struct List<T> {
    slots: Vec<Slot<T>>,
    free: Option<usize>,
    vacant: usize,
    id: ListId,
    #[cfg(feature = "length")]
    /// the length of the list
    pub(crate) len: usize,
}

pub(crate) struct Slot<T> {
    generation: u32,
    entry: Entry<T>,
}

pub(crate) enum Entry<T> {
    Sentinel(Links),
    Occupied(Node<T>),
    Vacant { next_free: Option<usize> },
}

pub(crate) struct Node<T> {
    pub(crate) links: Links,
    pub(crate) element: T,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Links {
    pub(crate) next: usize,
    pub(crate) prev: usize,
}

// private methods
impl<T> List<T> {
    pub(crate) fn links(&self, index: usize) -> Links {
        match &self.slots[index].entry {
            Entry::Sentinel(links) | Entry::Occupied(Node { links, .. }) => *links,
            Entry::Vacant { .. } => vacant_in_chain(index),
        }
    }

    fn links_mut(&mut self, index: usize) -> &mut Links {
        match &mut self.slots[index].entry {
            Entry::Sentinel(links) | Entry::Occupied(Node { links, .. }) => links,
            Entry::Vacant { .. } => vacant_in_chain(index),
        }
    }

    pub(crate) fn next_of(&self, index: usize) -> usize {
        self.links(index).next
    }

    pub(crate) fn prev_of(&self, index: usize) -> usize {
        self.links(index).prev
    }

    pub(crate) fn front_node(&self) -> usize {
        self.next_of(HEAD)
    }

    pub(crate) fn back_node(&self) -> usize {
        self.prev_of(TAIL)
    }

    /// The element held by the node at `index`, or `None` for a sentinel.
    pub(crate) fn element(&self, index: usize) -> Option<&T> {
        match &self.slots[index].entry {
            Entry::Occupied(node) => Some(&node.element),
            _ => None,
        }
    }

    pub(crate) fn element_mut(&mut self, index: usize) -> Option<&mut T> {
        match &mut self.slots[index].entry {
            Entry::Occupied(node) => Some(&mut node.element),
            _ => None,
        }
    }

    pub(crate) fn position_of(&self, index: usize) -> Position {
        Position {
            list: self.id,
            index,
            generation: self.slots[index].generation,
        }
    }

    fn connect(&mut self, prev: usize, next: usize) {
        self.links_mut(prev).next = next;
        self.links_mut(next).prev = prev;
    }

    /// Store `element` in a vacant slot, or in a new one if none is vacant.
    ///
    /// The node is not linked into the chain yet; see [`List::attach_node`].
    fn alloc_node(&mut self, element: T) -> usize {
        let entry = Entry::Occupied(Node {
            links: Links {
                next: TAIL,
                prev: HEAD,
            },
            element,
        });
        match self.free {
            Some(index) => {
                let slot = &mut self.slots[index];
                self.free = match slot.entry {
                    Entry::Vacant { next_free } => next_free,
                    _ => panic!("free list points at live slot {}", index),
                };
                slot.entry = entry;
                self.vacant -= 1;
                index
            }
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    entry,
                });
                self.slots.len() - 1
            }
        }
    }

    /// Attach the detached node at `index` to the list, between `prev` and
    /// `next`.
    ///
    /// The `prev` and `next` must be adjacent nodes of the list (only checked
    /// in `#[cfg(debug_assertions)]`), otherwise the list becomes ill-formed.
    pub(crate) fn attach_node(&mut self, prev: usize, next: usize, index: usize) {
        #[cfg(debug_assertions)]
        self.assert_adjacent(prev, next);
        self.connect(prev, index);
        self.connect(index, next);
        #[cfg(feature = "length")]
        {
            self.len += 1;
        }
        #[cfg(debug_assertions)]
        {
            self.assert_adjacent(prev, index);
            self.assert_adjacent(index, next);
        }
    }

    /// Detach the node at `index` from the list, free its slot and return
    /// its element.
    ///
    /// The slot's generation is bumped, so every [`Position`] issued for this
    /// node becomes stale.
    pub(crate) fn detach_node(&mut self, index: usize) -> T {
        debug_assert!(index != HEAD && index != TAIL, "Cannot detach a sentinel");
        let Links { next, prev } = self.links(index);
        self.connect(prev, next);
        let slot = &mut self.slots[index];
        slot.generation = slot.generation.wrapping_add(1);
        let entry = std::mem::replace(
            &mut slot.entry,
            Entry::Vacant {
                next_free: self.free,
            },
        );
        self.free = Some(index);
        self.vacant += 1;
        #[cfg(feature = "length")]
        {
            self.len -= 1;
        }
        match entry {
            Entry::Occupied(node) => node.element,
            _ => panic!("detached slot {} holds no element", index),
        }
    }

    /// Insert a new node holding `element` before the node `next`, and
    /// return its index.
    pub(crate) fn insert_before(&mut self, next: usize, element: T) -> usize {
        let node = self.alloc_node(element);
        self.attach_node(self.prev_of(next), next, node);
        node
    }

    /// Make sure `additional` nodes can be allocated without growing the
    /// slot storage, so that a following batch of insertions cannot fail
    /// half way.
    fn try_reserve_nodes(&mut self, additional: usize) -> Result<(), ListError> {
        let needed = additional.saturating_sub(self.vacant);
        self.slots.try_reserve(needed).map_err(|err| {
            warn!(requested = additional, %err, "failed to grow list storage");
            ListError::AllocationFailed {
                requested: additional,
            }
        })
    }

    /// Check that `pos` names a live node (or the end) of this list, and
    /// return its slot index.
    pub(crate) fn resolve(&self, pos: Position) -> Result<usize, ListError> {
        if pos.list != self.id {
            debug!(index = pos.index, "rejected position of another list");
            return Err(ListError::ForeignPosition);
        }
        match self.slots.get(pos.index) {
            Some(slot)
                if pos.index != HEAD
                    && slot.generation == pos.generation
                    && !matches!(slot.entry, Entry::Vacant { .. }) =>
            {
                Ok(pos.index)
            }
            _ => {
                debug!(
                    index = pos.index,
                    generation = pos.generation,
                    "rejected stale position"
                );
                Err(ListError::StalePosition)
            }
        }
    }

    /// Count the nodes in `first..last`, or fail if `last` cannot be reached
    /// from `first` without passing the tail sentinel.
    fn range_len(&self, first: usize, last: usize) -> Result<usize, ListError> {
        let mut len = 0;
        let mut current = first;
        while current != last {
            if current == TAIL {
                debug!(first, last, "rejected unreachable range");
                return Err(ListError::InvalidRange);
            }
            current = self.next_of(current);
            len += 1;
        }
        Ok(len)
    }

    #[cfg(debug_assertions)]
    fn assert_adjacent(&self, prev: usize, next: usize) {
        assert_eq!(self.next_of(prev), next);
        assert_eq!(self.prev_of(next), prev);
    }
}

impl<T> List<T> {
    /// Create an empty `List`, holding only its two sentinels.
    ///
    /// # Examples
    /// ```
    /// use sentinel_list::List;
    /// let list: List<u32> = List::new();
    /// assert!(list.is_empty());
    /// ```
    #[inline]
    pub fn new() -> Self {
        // The sentinels close the ring: `head.prev` is the tail and
        // `tail.next` is the head.
        let sentinel = |next, prev| Slot {
            generation: 0,
            entry: Entry::Sentinel(Links { next, prev }),
        };
        Self {
            slots: vec![sentinel(TAIL, TAIL), sentinel(HEAD, HEAD)],
            free: None,
            vacant: 0,
            id: ListId::next(),
            #[cfg(feature = "length")]
            len: 0,
        }
    }

    /// Create a `List` of `count` default values.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let list: List<i32> = List::with_len(3);
    /// assert_eq!(list.len(), 3);
    /// assert!(list.iter().all(|&x| x == 0));
    /// ```
    pub fn with_len(count: usize) -> Self
    where
        T: Default,
    {
        (0..count).map(|_| T::default()).collect()
    }

    /// Create a `List` holding copies of the elements in `first..last` of
    /// `source`.
    ///
    /// # Errors
    ///
    /// Fails if either position is not a live position of `source`, or if
    /// `last` cannot be reached from `first`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let source = List::from([1, 2, 3, 4]);
    /// let first = source.next_position(source.begin()).unwrap();
    /// let list = List::from_range(&source, first, source.end()).unwrap();
    /// assert_eq!(list, List::from([2, 3, 4]));
    /// ```
    pub fn from_range(source: &List<T>, first: Position, last: Position) -> Result<Self, ListError>
    where
        T: Clone,
    {
        Ok(source.range(first, last)?.cloned().collect())
    }

    /// Returns `true` if the `List` is empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let mut list = List::new();
    /// assert!(list.is_empty());
    ///
    /// list.push_front("foo");
    /// assert!(!list.is_empty());
    /// ```
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.front_node() == TAIL
    }

    /// Returns the length of the `List`.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time with the `length`
    /// feature, and in *O*(*n*) time without it.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let mut list = List::new();
    ///
    /// list.push_front(2);
    /// assert_eq!(list.len(), 1);
    ///
    /// list.push_front(1);
    /// assert_eq!(list.len(), 2);
    ///
    /// list.push_back(3);
    /// assert_eq!(list.len(), 3);
    /// ```
    #[cfg(feature = "length")]
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns the length of the `List`, counting the nodes one by one.
    #[cfg(not(feature = "length"))]
    pub fn len(&self) -> usize {
        let mut len = 0;
        let mut current = self.front_node();
        while current != TAIL {
            current = self.next_of(current);
            len += 1;
        }
        len
    }

    /// Removes all elements from the `List`, front to back.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let mut list = List::new();
    ///
    /// list.push_front(2);
    /// list.push_front(1);
    /// assert_eq!(list.len(), 2);
    /// assert_eq!(list.front(), Some(&1));
    ///
    /// list.clear();
    /// assert_eq!(list.len(), 0);
    /// assert_eq!(list.front(), None);
    /// ```
    pub fn clear(&mut self) {
        let mut cleared = 0_usize;
        while self.pop_front().is_some() {
            cleared += 1;
        }
        if cleared > 0 {
            trace!(cleared, "cleared list");
        }
    }

    /// Provides a reference to the front element, or `None` if the list is
    /// empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let mut list = List::new();
    /// assert_eq!(list.front(), None);
    ///
    /// list.push_front(1);
    /// assert_eq!(list.front(), Some(&1));
    /// ```
    #[inline]
    pub fn front(&self) -> Option<&T> {
        self.cursor_start().current()
    }

    /// Provides a mutable reference to the front element, or `None` if the
    /// list is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let mut list = List::new();
    /// assert_eq!(list.front(), None);
    ///
    /// list.push_front(1);
    /// if let Some(x) = list.front_mut() {
    ///     *x = 5;
    /// }
    /// assert_eq!(list.front(), Some(&5));
    /// ```
    #[inline]
    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.element_mut(self.front_node())
    }

    /// Provides a reference to the back element, or `None` if the list is
    /// empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let mut list = List::new();
    /// assert_eq!(list.back(), None);
    ///
    /// list.push_back(1);
    /// assert_eq!(list.back(), Some(&1));
    /// ```
    #[inline]
    pub fn back(&self) -> Option<&T> {
        self.cursor_end().previous()
    }

    /// Provides a mutable reference to the back element, or `None` if the
    /// list is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let mut list = List::new();
    /// list.push_back(1);
    /// if let Some(x) = list.back_mut() {
    ///     *x = 5;
    /// }
    /// assert_eq!(list.back(), Some(&5));
    /// ```
    #[inline]
    pub fn back_mut(&mut self) -> Option<&mut T> {
        self.element_mut(self.back_node())
    }

    /// Adds an element first in the list.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let mut list = List::new();
    ///
    /// list.push_front(2);
    /// assert_eq!(list.front().unwrap(), &2);
    ///
    /// list.push_front(1);
    /// assert_eq!(list.front().unwrap(), &1);
    /// ```
    pub fn push_front(&mut self, elt: T) {
        self.cursor_start_mut().insert(elt);
    }

    /// Removes the first element and returns it, or `None` if the list is
    /// empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let mut list = List::new();
    /// assert_eq!(list.pop_front(), None);
    ///
    /// list.push_front(1);
    /// list.push_front(3);
    /// assert_eq!(list.pop_front(), Some(3));
    /// assert_eq!(list.pop_front(), Some(1));
    /// assert_eq!(list.pop_front(), None);
    /// ```
    pub fn pop_front(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        self.cursor_start_mut().remove()
    }

    /// Appends an element to the back of a list.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let mut list = List::new();
    /// list.push_back(1);
    /// list.push_back(3);
    /// assert_eq!(list.back().unwrap(), &3);
    /// ```
    pub fn push_back(&mut self, elt: T) {
        self.cursor_end_mut().insert(elt);
    }

    /// Removes the last element from a list and returns it, or `None` if
    /// it is empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let mut list = List::new();
    /// assert_eq!(list.pop_back(), None);
    /// list.push_back(1);
    /// list.push_back(3);
    /// assert_eq!(list.pop_back(), Some(3));
    /// ```
    pub fn pop_back(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        self.cursor_end_mut().backspace()
    }

    /// Returns the position of the first element, which is [`List::end`] if
    /// the list is empty.
    #[inline]
    pub fn begin(&self) -> Position {
        self.position_of(self.front_node())
    }

    /// Returns the end position: one past the last element. It never holds
    /// an element, and stays valid for the whole life of the list.
    #[inline]
    pub fn end(&self) -> Position {
        self.position_of(TAIL)
    }

    /// Returns the position following `pos`.
    ///
    /// # Errors
    ///
    /// [`ListError::PastEnd`] if `pos` is the end position, or the errors of
    /// an unusable position.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::{List, ListError};
    ///
    /// let list = List::from([1]);
    /// let end = list.next_position(list.begin()).unwrap();
    /// assert_eq!(end, list.end());
    /// assert_eq!(list.next_position(end), Err(ListError::PastEnd));
    /// ```
    pub fn next_position(&self, pos: Position) -> Result<Position, ListError> {
        let index = self.resolve(pos)?;
        if index == TAIL {
            return Err(ListError::PastEnd);
        }
        Ok(self.position_of(self.next_of(index)))
    }

    /// Returns the position preceding `pos`.
    ///
    /// # Errors
    ///
    /// [`ListError::BeforeBegin`] if `pos` is the first position, or the
    /// errors of an unusable position.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::{List, ListError};
    ///
    /// let list = List::from([1, 2]);
    /// let last = list.prev_position(list.end()).unwrap();
    /// assert_eq!(list.get(last), Ok(&2));
    /// assert_eq!(list.prev_position(list.begin()), Err(ListError::BeforeBegin));
    /// ```
    pub fn prev_position(&self, pos: Position) -> Result<Position, ListError> {
        let index = self.resolve(pos)?;
        let prev = self.prev_of(index);
        if prev == HEAD {
            return Err(ListError::BeforeBegin);
        }
        Ok(self.position_of(prev))
    }

    /// Returns a reference to the element at `pos`.
    ///
    /// # Errors
    ///
    /// [`ListError::DerefEnd`] for the end position,
    /// [`ListError::StalePosition`] if the element has been erased and
    /// [`ListError::ForeignPosition`] if `pos` comes from another list.
    pub fn get(&self, pos: Position) -> Result<&T, ListError> {
        let index = self.resolve(pos)?;
        self.element(index).ok_or(ListError::DerefEnd)
    }

    /// Returns a mutable reference to the element at `pos`. Fails like
    /// [`List::get`].
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let mut list = List::from([1, 2, 3]);
    /// *list.get_mut(list.begin()).unwrap() = 10;
    /// assert_eq!(list.front(), Some(&10));
    /// ```
    pub fn get_mut(&mut self, pos: Position) -> Result<&mut T, ListError> {
        let index = self.resolve(pos)?;
        self.element_mut(index).ok_or(ListError::DerefEnd)
    }

    /// Provides a cursor at the given position.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let list = List::from([1, 2, 3]);
    /// let last = list.prev_position(list.end()).unwrap();
    /// assert_eq!(list.cursor(last).unwrap().current(), Some(&3));
    /// assert_eq!(list.cursor(list.end()).unwrap().current(), None);
    /// ```
    pub fn cursor(&self, pos: Position) -> Result<Cursor<'_, T>, ListError> {
        Ok(Cursor::new(self, self.resolve(pos)?))
    }

    /// Provides a cursor at the first node.
    ///
    /// The cursor is pointing to the end if the list is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let list = List::from([1, 2, 3]);
    /// let cursor = list.cursor_start();
    /// assert_eq!(cursor.current(), Some(&1));
    /// ```
    pub fn cursor_start(&self) -> Cursor<'_, T> {
        Cursor::new(self, self.front_node())
    }

    /// Provides a cursor at the end (the tail sentinel).
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let list = List::from([1, 2, 3]);
    /// let cursor = list.cursor_end();
    /// assert_eq!(cursor.current(), None);
    /// assert_eq!(cursor.previous(), Some(&3));
    /// ```
    pub fn cursor_end(&self) -> Cursor<'_, T> {
        Cursor::new(self, TAIL)
    }

    /// Provides a cursor with editing operations at the given position.
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
    /// if let Some(x) = cursor.current_mut() {
    ///     *x *= 5;
    /// }
    /// assert_eq!(cursor.current(), Some(&10));
    /// ```
    pub fn cursor_mut(&mut self, pos: Position) -> Result<CursorMut<'_, T>, ListError> {
        let index = self.resolve(pos)?;
        Ok(CursorMut::new(self, index))
    }

    /// Provides a cursor with editing operations at the first node.
    ///
    /// The cursor is pointing to the end if the list is empty.
    pub fn cursor_start_mut(&mut self) -> CursorMut<'_, T> {
        let front = self.front_node();
        CursorMut::new(self, front)
    }

    /// Provides a cursor with editing operations at the end.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let mut list = List::from([1, 2, 3]);
    /// let mut cursor = list.cursor_end_mut();
    ///
    /// if let Some(x) = cursor.previous_mut() {
    ///     *x *= 5;
    /// }
    /// assert_eq!(cursor.previous(), Some(&15));
    /// ```
    pub fn cursor_end_mut(&mut self) -> CursorMut<'_, T> {
        CursorMut::new(self, TAIL)
    }

    /// Provides a forward iterator.
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
    /// let mut iter = list.iter();
    /// assert_eq!(iter.next(), Some(&0));
    /// assert_eq!(iter.next(), Some(&1));
    /// assert_eq!(iter.next(), Some(&2));
    /// assert_eq!(iter.next(), None);
    /// ```
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self, self.front_node(), TAIL, self.len())
    }

    /// Provides a forward iterator with mutable references.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let mut list = List::from([0, 1, 2]);
    ///
    /// for element in list.iter_mut() {
    ///     *element += 10;
    /// }
    ///
    /// let mut iter = list.iter();
    /// assert_eq!(iter.next(), Some(&10));
    /// assert_eq!(iter.next(), Some(&11));
    /// assert_eq!(iter.next(), Some(&12));
    /// assert_eq!(iter.next(), None);
    /// ```
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut::new(self)
    }

    /// Provides an iterator over the half-open range `first..last`.
    ///
    /// # Errors
    ///
    /// [`ListError::InvalidRange`] if `last` cannot be reached from `first`
    /// by moving forward, or the errors of an unusable position.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::{List, ListError};
    ///
    /// let list = List::from([1, 2, 3, 4]);
    /// let second = list.next_position(list.begin()).unwrap();
    /// let last = list.prev_position(list.end()).unwrap();
    /// assert!(list.range(second, last).unwrap().eq(&[2, 3]));
    /// assert_eq!(list.range(last, second).err(), Some(ListError::InvalidRange));
    /// ```
    pub fn range(&self, first: Position, last: Position) -> Result<Iter<'_, T>, ListError> {
        let (first, last) = (self.resolve(first)?, self.resolve(last)?);
        let len = self.range_len(first, last)?;
        Ok(Iter::new(self, first, last, len))
    }

    /// Overwrites every element, in place, with a copy of `value`. The
    /// length of the list does not change.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let mut list = List::from([1, 2, 3]);
    /// list.fill(0);
    /// assert_eq!(list, List::from([0, 0, 0]));
    /// ```
    pub fn fill(&mut self, value: T)
    where
        T: Clone,
    {
        self.iter_mut().for_each(|elem| elem.clone_from(&value));
    }

    /// Replaces the contents of the list with `count` copies of `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let mut list = List::from([1, 2]);
    /// list.assign_n(3, 15);
    /// assert_eq!(list, List::from([15, 15, 15]));
    /// ```
    pub fn assign_n(&mut self, count: usize, value: T)
    where
        T: Clone,
    {
        self.clear();
        self.extend(std::iter::repeat(value).take(count));
        trace!(count, "assigned repeated value");
    }

    /// Replaces the contents of the list with the items of `iter`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let mut list = List::from([1, 2, 3, 4, 5]);
    /// list.assign([1, 2, 3]);
    /// assert_eq!(list.len(), 3);
    /// assert_eq!(list, List::from([1, 2, 3]));
    /// ```
    pub fn assign<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.clear();
        self.extend(iter);
        trace!(len = self.len(), "assigned sequence");
    }

    /// Replaces the contents of the list with copies of the elements in
    /// `first..last` of `source`.
    ///
    /// # Errors
    ///
    /// Fails like [`List::range`] on `source`, in which case the list is
    /// left untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let source = List::from([1, 2, 3]);
    /// let mut list = List::from([9, 9, 9, 9]);
    /// list.assign_range(&source, source.begin(), source.end()).unwrap();
    /// assert_eq!(list, source);
    /// ```
    pub fn assign_range(
        &mut self,
        source: &List<T>,
        first: Position,
        last: Position,
    ) -> Result<(), ListError>
    where
        T: Clone,
    {
        let range = source.range(first, last)?;
        self.try_reserve_nodes(range.len())?;
        self.clear();
        self.extend(range.cloned());
        trace!(len = self.len(), "assigned range");
        Ok(())
    }

    /// Inserts `value` immediately before `pos`, and returns the position of
    /// the new element. Inserting before [`List::end`] appends.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Errors
    ///
    /// Fails if `pos` is stale or comes from another list.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let mut list = List::from([1, 2, 3]);
    /// let pos = list.insert(list.end(), 33).unwrap();
    /// assert_eq!(list.get(pos), Ok(&33));
    /// assert_eq!(list.back(), Some(&33));
    /// assert_eq!(list.len(), 4);
    /// ```
    pub fn insert(&mut self, pos: Position, value: T) -> Result<Position, ListError> {
        let next = self.resolve(pos)?;
        self.try_reserve_nodes(1)?;
        let node = self.insert_before(next, value);
        Ok(self.position_of(node))
    }

    /// Inserts the items of `iter`, in order, immediately before `pos`.
    ///
    /// Returns the position of the first inserted element, or `pos` if
    /// `iter` is empty.
    ///
    /// # Errors
    ///
    /// Fails if `pos` is stale or comes from another list. Nothing is
    /// inserted in that case.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let mut list = List::from([1, 5]);
    /// let five = list.next_position(list.begin()).unwrap();
    /// let first = list.insert_iter(five, [2, 3, 4]).unwrap();
    /// assert_eq!(list.get(first), Ok(&2));
    /// assert_eq!(list, List::from([1, 2, 3, 4, 5]));
    /// ```
    pub fn insert_iter<I: IntoIterator<Item = T>>(
        &mut self,
        pos: Position,
        iter: I,
    ) -> Result<Position, ListError> {
        let next = self.resolve(pos)?;
        let items: Vec<T> = iter.into_iter().collect();
        self.try_reserve_nodes(items.len())?;
        let inserted = items.len();
        let mut first = None;
        for item in items {
            let node = self.insert_before(next, item);
            first.get_or_insert(node);
        }
        trace!(inserted, "inserted sequence");
        Ok(self.position_of(first.unwrap_or(next)))
    }

    /// Inserts copies of the elements in `first..last` of `source`, in
    /// order, immediately before `pos`. Returns like [`List::insert_iter`].
    ///
    /// # Errors
    ///
    /// Fails if `pos` is unusable, or like [`List::range`] on `source`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let source = List::from([2, 3]);
    /// let mut list = List::from([1, 4]);
    /// let four = list.next_position(list.begin()).unwrap();
    /// list.insert_range(four, &source, source.begin(), source.end()).unwrap();
    /// assert_eq!(list, List::from([1, 2, 3, 4]));
    /// ```
    pub fn insert_range(
        &mut self,
        pos: Position,
        source: &List<T>,
        first: Position,
        last: Position,
    ) -> Result<Position, ListError>
    where
        T: Clone,
    {
        self.resolve(pos)?;
        let range = source.range(first, last)?;
        self.insert_iter(pos, range.cloned())
    }

    /// Removes the element at `pos`, and returns the position of the element
    /// that followed it.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Errors
    ///
    /// [`ListError::EraseEnd`] for the end position, or the errors of an
    /// unusable position.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::{List, ListError};
    ///
    /// let mut list = List::from([1, 2, 3]);
    /// let next = list.erase(list.begin()).unwrap();
    /// assert_eq!(list.get(next), Ok(&2));
    /// assert_eq!(list.erase(list.end()), Err(ListError::EraseEnd));
    /// ```
    pub fn erase(&mut self, pos: Position) -> Result<Position, ListError> {
        let index = self.resolve(pos)?;
        if index == TAIL {
            return Err(ListError::EraseEnd);
        }
        let next = self.next_of(index);
        self.detach_node(index);
        Ok(self.position_of(next))
    }

    /// Removes every element in `first..last`, and returns `last`.
    ///
    /// The range is checked before anything is removed.
    ///
    /// # Errors
    ///
    /// [`ListError::InvalidRange`] if `last` cannot be reached from `first`,
    /// or the errors of an unusable position.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let mut list = List::from([1, 2, 3, 4]);
    /// let second = list.next_position(list.begin()).unwrap();
    /// let last = list.erase_range(second, list.end()).unwrap();
    /// assert_eq!(last, list.end());
    /// assert_eq!(list, List::from([1]));
    /// ```
    pub fn erase_range(&mut self, first: Position, last: Position) -> Result<Position, ListError> {
        let (mut current, end) = (self.resolve(first)?, self.resolve(last)?);
        let erased = self.range_len(current, end)?;
        for _ in 0..erased {
            let next = self.next_of(current);
            self.detach_node(current);
            current = next;
        }
        if erased > 0 {
            trace!(erased, "erased range");
        }
        Ok(last)
    }
}

impl<T: Debug> Debug for List<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cold]
fn vacant_in_chain(index: usize) -> ! {
    panic!("vacant slot {} is linked into the list", index)
}

impl<T> Drop for List<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

// Ensure that `List` and its read-only iterators are covariant in their type parameters.
#[allow(dead_code)]
fn assert_covariance() {
    fn a<'a>(x: List<&'static str>) -> List<&'a str> {
        x
    }
    fn b<'i, 'a>(x: Iter<'i, &'static str>) -> Iter<'i, &'a str> {
        x
    }
    fn c<'a>(x: IntoIter<&'static str>) -> IntoIter<&'a str> {
        x
    }
}

#[cfg(test)]
mod tests {
    use crate::list::List;
    use crate::ListError;
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::fmt::Debug;
    use std::panic::{self, AssertUnwindSafe};

    fn list_eq<T, I>(list: &List<T>, expected: I)
    where
        T: Debug + Clone + Eq,
        I: IntoIterator<Item = T>,
    {
        assert_eq!(
            Vec::from_iter(list.iter().cloned()),
            Vec::from_iter(expected)
        );
    }

    #[derive(Debug)]
    struct DropChecker<'a, T: Copy> {
        value: T,
        dropped: &'a RefCell<Vec<T>>,
    }

    impl<'a, T: Copy> DropChecker<'a, T> {
        fn new(value: T, dropped: &'a RefCell<Vec<T>>) -> Self {
            Self { value, dropped }
        }
    }

    impl<'a, T: Copy> Drop for DropChecker<'a, T> {
        fn drop(&mut self) {
            self.dropped.borrow_mut().push(self.value);
        }
    }

    #[test]
    fn list_create() {
        let mut list = List::<i32>::new();
        assert!(list.is_empty());
        assert_eq!(list.begin(), list.end());
        list.push_back(1);
        assert!(!list.is_empty());
        assert_eq!(list.pop_back(), Some(1));
        assert!(list.is_empty());
    }

    #[test]
    fn list_with_len() {
        let list = List::<String>::with_len(4);
        assert_eq!(list.len(), 4);
        list_eq(&list, vec![String::new(); 4]);

        let empty = List::<u8>::with_len(0);
        assert!(empty.is_empty());
    }

    #[test]
    fn list_drop() {
        let dropped = RefCell::new(Vec::<i32>::new());
        let mut list = List::new();
        list.push_back(DropChecker::new(2, &dropped));
        list.push_front(DropChecker::new(1, &dropped));
        list.push_back(DropChecker::new(3, &dropped));
        drop(list);
        // List order, not storage order.
        assert_eq!(dropped.borrow().as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn list_drop_on_unwind() {
        let dropped = RefCell::new(Vec::<i32>::new());
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            let mut list = List::new();
            list.push_back(DropChecker::new(1, &dropped));
            list.push_back(DropChecker::new(2, &dropped));
            panic!("unwinding with a live list");
        }));
        assert!(result.is_err());
        assert_eq!(dropped.borrow().as_slice(), &[1, 2]);
    }

    #[test]
    fn list_erase_drops_element() {
        let dropped = RefCell::new(Vec::<i32>::new());
        let mut list = List::new();
        list.push_back(DropChecker::new(1, &dropped));
        list.push_back(DropChecker::new(2, &dropped));
        list.push_back(DropChecker::new(3, &dropped));
        let second = list.next_position(list.begin()).unwrap();
        list.erase(second).unwrap();
        assert_eq!(dropped.borrow().as_slice(), &[2]);
        list.clear();
        assert_eq!(dropped.borrow().as_slice(), &[2, 1, 3]);
    }

    #[test]
    fn list_push_and_pop() {
        let mut list = List::new();
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);

        assert_eq!(list.front(), None);
        assert_eq!(list.back(), None);
        assert_eq!(list.pop_front(), None);
        assert_eq!(list.pop_back(), None);

        list.push_back(1);
        assert_eq!(list.back(), Some(&1));
        assert_eq!(list.pop_front(), Some(1));
        assert_eq!(list.pop_back(), None);
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);

        list.push_front(1);
        list.push_front(2);
        list.push_back(3);
        assert_eq!(list.back(), Some(&3));
        assert_eq!(list.front(), Some(&2));
        assert_eq!(list.pop_front(), Some(2));
        assert_eq!(list.pop_back(), Some(3));

        assert_eq!(list.front(), Some(&1));
        assert_eq!(list.pop_front(), Some(1));
        assert_eq!(list.front(), None);
        assert_eq!(list.back(), None);
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);
    }

    #[test]
    fn list_push_pop_sequence_tracks_len() {
        // A fixed linear congruential sequence drives the operations, and a
        // `VecDeque` models the expected contents.
        let mut seed = 0x2545_f491_u64;
        let mut next = move || {
            seed = seed.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
            (seed >> 33) as u32
        };
        let mut list = List::new();
        let mut model = VecDeque::new();
        for _ in 0..2000 {
            let value = next();
            match value % 4 {
                0 => {
                    list.push_back(value);
                    model.push_back(value);
                }
                1 => {
                    list.push_front(value);
                    model.push_front(value);
                }
                2 => assert_eq!(list.pop_back(), model.pop_back()),
                _ => assert_eq!(list.pop_front(), model.pop_front()),
            }
            assert_eq!(list.len(), model.len());
            assert_eq!(list.is_empty(), model.is_empty());
        }
        list_eq(&list, model.iter().copied());
        assert!(list.iter().rev().eq(model.iter().rev()));
    }

    #[test]
    fn list_insert_and_erase() {
        let mut list = List::from_iter(0..10);
        let mut pos = list.begin();
        for _ in 0..5 {
            pos = list.next_position(pos).unwrap();
        }
        let inserted = list.insert(pos, 10).unwrap();
        assert_eq!(list.get(inserted), Ok(&10));
        assert_eq!(list.len(), 11);
        list_eq(&list, (0..5).chain(Some(10)).chain(5..10));

        // `pos` still names the node holding 5.
        assert_eq!(list.prev_position(pos), Ok(inserted));
        let after = list.erase(inserted).unwrap();
        assert_eq!(after, pos);
        assert_eq!(list.get(after), Ok(&5));
        assert_eq!(list.len(), 10);
        list_eq(&list, 0..10);

        let front = list.insert(list.begin(), 11).unwrap();
        assert_eq!(front, list.begin());
        assert_eq!(list.front(), Some(&11));

        let last = list.prev_position(list.end()).unwrap();
        assert_eq!(list.erase(last), Ok(list.end()));
        assert_eq!(list.back(), Some(&8));
        list_eq(&list, Some(11).into_iter().chain(0..9));
    }

    #[test]
    fn list_insert_iter_and_range() {
        let mut list = List::from([1, 5]);
        let five = list.prev_position(list.end()).unwrap();

        // Nothing to insert: returns the given position.
        assert_eq!(list.insert_iter(five, None), Ok(five));

        let first = list.insert_iter(five, [2, 3, 4]).unwrap();
        assert_eq!(list.get(first), Ok(&2));
        list_eq(&list, 1..=5);

        let source = List::from([6, 7, 8]);
        let eight = source.prev_position(source.end()).unwrap();
        let first = list
            .insert_range(list.end(), &source, source.begin(), eight)
            .unwrap();
        assert_eq!(list.get(first), Ok(&6));
        list_eq(&list, 1..=7);

        assert_eq!(
            list.insert_range(list.end(), &source, eight, source.begin()),
            Err(ListError::InvalidRange)
        );
        assert_eq!(
            list.insert_range(source.end(), &source, source.begin(), eight),
            Err(ListError::ForeignPosition)
        );
        list_eq(&list, 1..=7);
    }

    #[test]
    fn list_erase_range() {
        let mut list = List::from_iter(0..6);
        let two = list.next_position(list.next_position(list.begin()).unwrap()).unwrap();
        let four = list.next_position(list.next_position(two).unwrap()).unwrap();

        // Empty range.
        assert_eq!(list.erase_range(two, two), Ok(two));
        assert_eq!(list.len(), 6);

        // Backward range is rejected before anything is removed.
        assert_eq!(list.erase_range(four, two), Err(ListError::InvalidRange));
        list_eq(&list, 0..6);

        assert_eq!(list.erase_range(two, four), Ok(four));
        list_eq(&list, [0, 1, 4, 5]);
        assert_eq!(list.get(two), Err(ListError::StalePosition));

        assert_eq!(list.erase_range(list.begin(), list.end()), Ok(list.end()));
        assert!(list.is_empty());
    }

    #[test]
    fn list_assign() {
        let mut list = List::from([1, 2, 3, 4, 5]);
        list.assign([1, 2, 3]);
        assert_eq!(list.len(), 3);
        list_eq(&list, [1, 2, 3]);

        list.assign_n(7, 15);
        assert_eq!(list.len(), 7);
        assert!(list.iter().all(|&x| x == 15));

        list.fill(4);
        assert_eq!(list.len(), 7);
        assert!(list.iter().all(|&x| x == 4));

        let source = List::from_iter(0..5);
        let one = source.next_position(source.begin()).unwrap();
        list.assign_range(&source, one, source.end()).unwrap();
        list_eq(&list, 1..5);

        // An unusable range leaves the list untouched.
        assert_eq!(
            list.assign_range(&source, source.end(), one),
            Err(ListError::InvalidRange)
        );
        assert_eq!(
            list.assign_range(&source, list.begin(), list.end()),
            Err(ListError::ForeignPosition)
        );
        list_eq(&list, 1..5);

        let copied = List::from_range(&source, source.begin(), one).unwrap();
        list_eq(&copied, [0]);
    }

    #[test]
    fn list_positions_are_checked() {
        let mut list = List::from([1, 2, 3]);
        let other = List::from([1, 2, 3]);

        assert_eq!(list.get(list.end()), Err(ListError::DerefEnd));
        assert_eq!(list.next_position(list.end()), Err(ListError::PastEnd));
        assert_eq!(
            list.prev_position(list.begin()),
            Err(ListError::BeforeBegin)
        );
        assert_eq!(list.erase(list.end()), Err(ListError::EraseEnd));
        assert_eq!(list.get(other.begin()), Err(ListError::ForeignPosition));

        let first = list.begin();
        list.pop_front();
        assert_eq!(list.get(first), Err(ListError::StalePosition));
        assert_eq!(list.insert(first, 0), Err(ListError::StalePosition));
        assert_eq!(list.erase(first), Err(ListError::StalePosition));
        assert!(list.cursor(first).is_err());

        // The end position survives any amount of editing.
        let end = list.end();
        list.clear();
        list.push_back(9);
        assert_eq!(list.prev_position(end).map(|pos| list.get(pos)), Ok(Ok(&9)));
    }

    #[test]
    fn list_clear() {
        let mut list = List::<i32>::new();
        list.clear();
        assert!(list.is_empty());

        list.extend(0..100);
        let positions: Vec<_> = (0..100)
            .scan(list.begin(), |pos, _| {
                let current = *pos;
                *pos = list.next_position(current).ok()?;
                Some(current)
            })
            .collect();
        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);
        assert!(positions
            .iter()
            .all(|&pos| list.get(pos) == Err(ListError::StalePosition)));

        // Freed slots are reused.
        list.extend(0..100);
        list_eq(&list, 0..100);
    }

    #[test]
    fn list_usage_walkthrough() {
        let _example = List::from([1, 2, 3, 4]);
        let mut list = List::from([1, 2, 3, 4, 5]);

        list.assign([1, 2, 3]);
        assert_eq!(list.len(), 3);

        list.assign_n(7, 15);
        list.push_front(22);
        list.pop_front();
        assert_eq!(list.len(), 7);
        assert_eq!(list.front(), Some(&15));

        list.push_back(4);
        list.pop_back();
        assert_eq!(list.back(), Some(&15));

        list.insert(list.end(), 33).unwrap();
        assert_eq!(list.back(), Some(&33));
        assert_eq!(list.len(), 8);

        let mut empty = List::new();
        empty.push_front(22);
        empty.pop_front();
        assert!(empty.is_empty());
    }
}
