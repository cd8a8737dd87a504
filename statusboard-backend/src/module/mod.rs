pub mod aggregator;
pub mod badge;
pub mod registry;
pub mod scheduled;
pub mod snapshot;
pub mod statuspage;
