//! Business logic services

pub mod availability;
pub mod centers;
pub mod courts;
pub mod gateway;
pub mod pricing;
pub mod reservations;

use crate::{
    config::{BookingDefaults, GatewayConfig, PricingSourceConfig},
    error::AppResult,
    repository::Repository,
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub centers: centers::CentersService,
    pub courts: courts::CourtsService,
    pub availability: availability::AvailabilityService,
    pub pricing: pricing::PricingService,
    pub reservations: reservations::ReservationsService,
    pub gateway: gateway::PaymentGateway,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(
        repository: Repository,
        booking_defaults: BookingDefaults,
        gateway_config: GatewayConfig,
        pricing_source: &PricingSourceConfig,
    ) -> AppResult<Self> {
        let availability = availability::AvailabilityService::new(repository.clone());
        let pricing = pricing::PricingService::new(
            repository.clone(),
            booking_defaults.clone(),
            pricing_source,
        )?;
        let gateway = gateway::PaymentGateway::new(gateway_config)?;
        Ok(Self {
            centers: centers::CentersService::new(repository.clone(), booking_defaults),
            courts: courts::CourtsService::new(repository.clone()),
            reservations: reservations::ReservationsService::new(
                repository,
                availability.clone(),
                pricing.clone(),
                gateway.clone(),
            ),
            availability,
            pricing,
            gateway,
        })
    }
}
