//! Snapshot data model shared by the aggregator and its consumers.

pub mod status;
pub mod types;

pub use status::{
    AggregatedServiceStatus, Component, DetailedServiceStatus, Incident, Location,
    LocationStatus, RawBadge, StatusOverview,
};
pub use types::{ServiceKind, ServiceStatus, StatusIndicator};
