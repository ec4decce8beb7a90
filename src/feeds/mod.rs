pub mod catalog;
pub mod client;

pub use catalog::{default_feeds, load_feed_file, FeedSource};
pub use client::{parse_feed, FeedClient};
