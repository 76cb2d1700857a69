//! Feed data model: items, the per-locale store and the channel envelope.
//!
//! Generators only ever see a [`FeedStore`]; they never touch pages or
//! options directly.

mod channel;
mod item;
mod store;

pub use channel::{FeedChannel, FeedLinks};
pub use item::FeedItem;
pub use store::FeedStore;
