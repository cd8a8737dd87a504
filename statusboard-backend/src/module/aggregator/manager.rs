///! Status aggregator - fan out badge fetches, fold, collect in registry order
use chrono::Utc;
use futures::future::join_all;
use statusboard_common::{AggregatedServiceStatus, DetailedServiceStatus, LocationStatus};
use std::sync::Arc;

use super::derive::derive_location_status;
use super::fold::{aggregate, configuration_missing};
use crate::error::StatusError;
use crate::module::badge::{BadgeKind, BadgeSource};
use crate::module::registry::{LocationDescriptor, ServiceDescriptor, ServiceRegistry};
use crate::module::statuspage::StatusPageSource;

/// Produces one [`AggregatedServiceStatus`] per registered service.
///
/// Cheap to clone; all collaborators are shared.
#[derive(Clone)]
pub struct StatusAggregator {
    registry: Arc<ServiceRegistry>,
    badges: Arc<dyn BadgeSource>,
    status_pages: Option<Arc<dyn StatusPageSource>>,
}

impl StatusAggregator {
    pub fn new(
        registry: ServiceRegistry,
        badges: Arc<dyn BadgeSource>,
        status_pages: Option<Arc<dyn StatusPageSource>>,
    ) -> Self {
        Self {
            registry: Arc::new(registry),
            badges,
            status_pages,
        }
    }

    pub fn registry(&self) -> &ServiceRegistry {
        &self.registry
    }

    /// Aggregate every registered service.
    ///
    /// Services run as independent tasks; the pass waits for all of them and
    /// returns results in registry order. A task that dies still yields an
    /// `unknown` record for its service.
    pub async fn aggregate_all(&self) -> Vec<AggregatedServiceStatus> {
        let services = self.registry.list_services();
        tracing::info!("Aggregating status for {} services", services.len());

        let handles: Vec<_> = services
            .iter()
            .cloned()
            .map(|descriptor| {
                let aggregator = self.clone();
                tokio::spawn(async move { aggregator.aggregate_service(&descriptor).await })
            })
            .collect();

        let results = join_all(handles).await;

        let aggregated: Vec<AggregatedServiceStatus> = results
            .into_iter()
            .zip(services)
            .map(|(result, descriptor)| match result {
                Ok(status) => status,
                Err(e) => {
                    tracing::error!("Aggregation task for '{}' failed: {}", descriptor.id, e);
                    let reason = format!("Aggregation task failed: {}", e);
                    let now = Utc::now();
                    let locations = descriptor
                        .locations
                        .iter()
                        .map(|l| {
                            derive_location_status(
                                &l.location,
                                Err(StatusError::fetch(reason.clone())),
                                Err(StatusError::fetch(reason.clone())),
                                now,
                            )
                        })
                        .collect();
                    aggregate(descriptor, locations, now)
                }
            })
            .collect();

        let unknown = aggregated
            .iter()
            .filter(|s| !s.overall_status.is_known())
            .count();
        tracing::info!(
            "Aggregation complete: {} services, {} without data",
            aggregated.len(),
            unknown
        );

        aggregated
    }

    /// Aggregate a single service by registry id.
    ///
    /// An unregistered id yields an `unknown` record rather than an error.
    pub async fn aggregate_by_id(&self, id: &str) -> AggregatedServiceStatus {
        match self.registry.get(id) {
            Some(descriptor) => self.aggregate_service(descriptor).await,
            None => {
                tracing::warn!("No registry entry for service '{}'", id);
                configuration_missing(id, Utc::now())
            }
        }
    }

    /// Fetch every location's badge pair (and the optional detailed status)
    /// concurrently, then fold.
    pub async fn aggregate_service(&self, descriptor: &ServiceDescriptor) -> AggregatedServiceStatus {
        let service_dir = descriptor.service_dir();

        let locations = join_all(
            descriptor
                .locations
                .iter()
                .map(|location| self.check_location(descriptor, location, &service_dir)),
        );

        let (locations, detailed) = tokio::join!(locations, self.fetch_detailed(descriptor));

        let mut status = aggregate(descriptor, locations, Utc::now());
        status.detailed_status = detailed;

        tracing::debug!(
            "{}: {} ({} locations, uptime {}, avg {}ms)",
            status.id,
            status.overall_status,
            status.locations.len(),
            status.overall_uptime,
            status.average_response_time
        );

        status
    }

    async fn check_location(
        &self,
        descriptor: &ServiceDescriptor,
        location: &LocationDescriptor,
        service_dir: &str,
    ) -> LocationStatus {
        let (uptime, response_time) = tokio::join!(
            self.badges.fetch(location, service_dir, BadgeKind::Uptime),
            self.badges.fetch(location, service_dir, BadgeKind::ResponseTime),
        );

        let status = derive_location_status(&location.location, uptime, response_time, Utc::now());

        if let Some(error) = &status.error {
            tracing::warn!(
                "{} @ {}: {}",
                descriptor.id,
                location.code(),
                error
            );
        }

        status
    }

    async fn fetch_detailed(&self, descriptor: &ServiceDescriptor) -> Option<DetailedServiceStatus> {
        let source = self.status_pages.as_ref()?;
        let url = descriptor.status_api_url.as_deref()?;

        match source.fetch_summary(url).await {
            Ok(detailed) => Some(detailed),
            Err(e) => {
                tracing::warn!("Detailed status for '{}' unavailable: {}", descriptor.id, e);
                None
            }
        }
    }
}
