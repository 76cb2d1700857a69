//! Configuration section definitions.
//!
//! | Section            | Purpose                                        |
//! |--------------------|------------------------------------------------|
//! | `[site]`           | hostname, base and per-locale site metadata    |
//! | `[feed]`           | formats, item cap, strategies, overrides       |
//! | `[feed.channel]`   | feed envelope metadata                         |
//! | `[feed.filenames]` | output and stylesheet file names               |

mod channel;
mod feed;
mod filename;
mod site;

pub use channel::{ChannelOptions, ChannelSettings};
pub use feed::{DEFAULT_COUNT, FeedOptions};
pub use filename::{FeedFilenames, FilenameOptions};
pub use site::{SiteLocale, SiteSection};
