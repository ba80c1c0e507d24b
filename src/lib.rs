pub mod config;
pub mod logger;
pub mod server;
pub mod post;
pub mod dates;
pub mod feed;
pub mod presenter;
pub mod content_index;
pub mod comments;
pub mod tags;
mod paginator;
mod query_string;
mod view;
mod test_data;
