///! Status aggregation
///!
///! Per poll cycle: fetch each location's badge pair, derive a
///! `LocationStatus`, fold locations into one `AggregatedServiceStatus`
///! per service.

mod derive;
mod fold;
mod manager;

#[cfg(test)]
pub(crate) mod testing;

pub use derive::{UNAVAILABLE, derive_location_status};
pub use fold::{
    aggregate, average_response_time, configuration_missing, overall_status, overall_uptime,
    primary_first,
};
pub use manager::StatusAggregator;
