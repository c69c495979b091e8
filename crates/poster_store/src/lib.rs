//! Page-lifetime observable key/value store shared by every mounted poster component.
//!
//! Keys are the closed [`StoreKey`] set and values are JSON. Writes are synchronous: every
//! subscriber of a key has run before [`PosterStore::set`] returns. Each
//! [`PosterStore::subscribe`] call hands back a [`Subscription`] that releases the callback when
//! dropped, so owners tear down by dropping what they were given.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

mod key;
mod store;

pub use key::{display_string, StoreKey};
pub use store::{poster_store, PosterStore, Subscription};
