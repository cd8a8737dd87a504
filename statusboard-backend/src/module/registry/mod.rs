///! Service registry
///!
///! Immutable table of monitored services and the badge-source locations
///! each one is queried at. Built once from config (or the compiled-in
///! table) and handed to the aggregator.

mod builtin;
mod types;

pub use builtin::{builtin_services, primary_location};
pub use types::{LocationDescriptor, ServiceDescriptor, ServiceRegistry, normalize_service_dir};
