///! Badge documents: parsing and retrieval
///!
///! Every service location publishes two shields-style JSON badges
///! (uptime and response time). This module turns their `message` text
///! into typed values and abstracts where the files are read from.

mod file;
mod http;
mod parser;
mod source;

pub use file::FileBadgeSource;
pub use http::HttpBadgeSource;
pub use parser::{OPERATIONAL_UPTIME_PERCENT, derive_status, parse_response_time, parse_uptime};
pub use source::{BadgeKind, BadgeSource, badge_path};
