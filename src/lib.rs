//! This crate provides a doubly-linked list anchored by two sentinel nodes, a
//! head and a tail, with checked positions.
//!
//! The [`List`] allows inserting, removing elements at any given position in
//! constant time. In compromise, accessing or mutating elements at any position
//! take *O*(*n*) time.
//!
//! Here is a quick example showing how the list works.
//!
//! ```
//! use sentinel_list::List;
//!
//! let mut list = List::from([1, 2, 3, 4]);
//!
//! // insert 0 at the beginning of the list
//! let zero = list.insert(list.begin(), 0).unwrap();
//! assert_eq!(list, List::from([0, 1, 2, 3, 4]));
//!
//! // walk three positions forward, and erase what is found there
//! let mut pos = zero;
//! for _ in 0..3 {
//!     pos = list.next_position(pos).unwrap();
//! }
//! let after = list.erase(pos).unwrap();
//! assert_eq!(list.get(after), Ok(&4));
//! assert_eq!(list, List::from([0, 1, 2, 4]));
//! ```
//!
//! # Memory Layout
//!
//! The nodes of a list live in a vector of slots owned by the list, and link
//! to each other by slot index:
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────────┐
//!   ↓  (Head) slot 0                                        (Tail) slot 1   │
//!   ┌───────────┐      ╔═══════════╗                        ┌───────────┐   │
//!   │   next    │ ───→ ║   next    ║ ───→ ┄┄ ───→ ┄┄ ─────→ │   next    │ ──┘
//!   ├───────────┤      ╟───────────╢     more nodes         ├───────────┤
//! ┌─│   prev    │ ←─── ║   prev    ║ ←─── ┄┄ ←─── ┄┄ ←───── │   prev    │
//! │ ├───────────┤      ╟───────────╢                        ├───────────┤
//! │ ┊No payload ┊      ║ payload T ║                        ┊No payload ┊
//! │ └╌╌╌╌╌╌╌╌╌╌╌┘      ╚═══════════╝                        └╌╌╌╌╌╌╌╌╌╌╌┘
//! │                    any slot ≥ 2                               ↑
//! └───────────────────────────────────────────────────────────────┘
//! ```
//! The `List` contains:
//! - the slots, where slot 0 is the head sentinel and slot 1 the tail sentinel.
//!   They hold no payload and are never removed;
//! - a free list of vacant slots, reused by later insertions;
//! - a length field `len` indicating the length of the list. It can be disabled by
//!   disabling the `length` feature in your `Cargo.toml`:
//! ```text
//! [dependencies]
//! sentinel_list = { default-features = false }
//! ```
//!
//! `head.next` is the first element (or the tail in an empty list), and
//! `tail.prev` is the last element (or the head). The tail is the end position
//! of the list.
//!
//! Every slot also has a generation, bumped each time its node is removed.
//!
//! # Positions
//!
//! A [`Position`] is a copyable handle to a node. It does not borrow the list,
//! so it can be kept across insertions and removals elsewhere in the list. A
//! position whose node has been removed is detected, and so is a position of
//! another list; see [`ListError`].
//!
//! ```
//! use sentinel_list::{List, ListError};
//!
//! let mut list = List::from([1, 2, 3]);
//! let first = list.begin();
//! let end = list.end();
//!
//! list.push_back(4);
//! list.pop_front();
//! assert_eq!(list.get(first), Err(ListError::StalePosition));
//! // the end position is never invalidated
//! assert_eq!(list.prev_position(end).map(|pos| list.get(pos)), Ok(Ok(&4)));
//! ```
//!
//! # Iteration
//!
//! Iterating over a list is by the [`Iter`] and [`IterMut`] iterators. These are
//! double-ended iterators and iterate the list like an array (fused and non-cyclic).
//! [`IterMut`] provides mutability of the elements (but not the linked structure of
//! the list). [`List::range`] iterates a half-open range of positions.
//!
//! ## Examples
//!
//! ```
//! use sentinel_list::List;
//!
//! let mut list = List::from([1, 2, 3]);
//! let mut iter = list.iter();
//! assert_eq!(iter.next(), Some(&1));
//! assert_eq!(iter.next(), Some(&2));
//! assert_eq!(iter.next(), Some(&3));
//! assert_eq!(iter.next(), None);
//! assert_eq!(iter.next(), None); // Fused and non-cyclic
//!
//! list.iter_mut().for_each(|item| *item *= 2);
//! assert_eq!(Vec::from_iter(list), vec![2, 4, 6]);
//! ```
//!
//! # Cursors
//!
//! The cursors [`Cursor`] and [`CursorMut`] borrow the list and can move forward
//! or backward over it. In a list with length *n*, there are *n* + 1 valid
//! locations for the cursor, the last one being the end.
//!
//! [`CursorMut`] can also edit the list where it stands:
//! - [`insert`]: insert a new item before the cursor;
//! - [`remove`]: remove the item at the cursor;
//! - [`backspace`]: remove the item before the cursor.
//!
//! ## Examples
//!
//! ```
//! use sentinel_list::List;
//!
//! let mut list = List::from([1, 2, 3, 4]);
//!
//! let mut cursor = list.cursor_start_mut();
//!
//! cursor.insert(5); // becomes [5, 1, 2, 3, 4], points to 1
//! assert_eq!(cursor.current(), Some(&1));
//!
//! assert!(cursor.seek_forward(2).is_ok());
//! assert_eq!(cursor.remove(), Some(3)); // becomes [5, 1, 2, 4], points to 4
//! assert_eq!(cursor.current(), Some(&4));
//!
//! assert_eq!(cursor.backspace(), Some(2)); // becomes [5, 1, 4], points to 4
//! assert_eq!(cursor.current(), Some(&4));
//!
//! assert_eq!(Vec::from_iter(list), vec![5, 1, 4]);
//! ```
//!
//! # Logging
//!
//! Bulk edits emit `tracing` events at the `trace` level, rejected positions
//! and ranges at the `debug` level, and failed storage growth at the `warn`
//! level. No subscriber is installed by this crate.
//!
//! [`insert`]: crate::CursorMut::insert
//! [`remove`]: crate::CursorMut::remove
//! [`backspace`]: crate::CursorMut::backspace

#[doc(inline)]
pub use error::ListError;
#[doc(inline)]
pub use list::cursor::{Cursor, CursorMut};
#[doc(inline)]
pub use list::iterator::{IntoIter, Iter, IterMut};
#[doc(inline)]
pub use list::position::Position;
#[doc(inline)]
pub use list::List;

mod error;
pub mod list;
