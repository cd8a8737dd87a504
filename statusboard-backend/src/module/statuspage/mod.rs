///! Optional detailed status from vendor status pages
///!
///! Services backed by a statuspage-style API expose a `summary.json`
///! with an overall indicator, components and open incidents. The result
///! is informational only and never feeds into status derivation.

mod client;
mod parser;

pub use client::{HttpStatusPageSource, StatusPageSource};
pub use parser::parse_summary_json;
