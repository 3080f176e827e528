//! # Feeds Module
//!
//! The producer side of the system. A feed is a named, independently running
//! producer of sequentially numbered items backed by one fixed-capacity ring
//! buffer. Readers ask a feed for "everything newer than N" and get whatever
//! is still retained; older items are silently overwritten.
//!
//! ## Contained Modules:
//! - **`item`**: The `Item` value, its `ItemRecord` wire form, and the
//!   `GenerationMode` that shapes payloads.
//! - **`ring_buffer`**: The single-writer, many-reader circular store.
//! - **`feed`**: A ring buffer plus its producer loop.
//! - **`registry`**: The immutable feed name to `Feed` mapping.

#![warn(missing_docs)]

/// Item values, wire records and payload synthesis.
pub mod item;
/// Fixed-capacity circular store with overwrite-on-full semantics.
pub mod ring_buffer;
/// A feed and its producer loop.
pub mod feed;
/// Feed lookup by name.
pub mod registry;

// --- Public API Re-exports ---
pub use feed::Feed;
pub use item::{GenerationMode, Item, ItemRecord};
pub use registry::FeedRegistry;
pub use ring_buffer::{RingBuffer, Sequenced};
