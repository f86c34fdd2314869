//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{availability, centers, courts, health, pricing, reservations};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Cancha API",
        version = "1.0.0",
        description = "Sports Center Booking Platform REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html"),
        contact(name = "Cancha Team", email = "dev@cancha.app")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Centers
        centers::list_centers,
        centers::get_center,
        centers::get_settings,
        centers::update_settings,
        // Courts
        courts::list_courts,
        courts::get_court,
        // Availability
        availability::get_availability,
        availability::get_suggestions,
        // Pricing
        pricing::calculate,
        pricing::validate_override,
        // Reservations
        reservations::create_reservation,
        reservations::get_reservation,
        reservations::cancel_reservation,
    ),
    components(
        schemas(
            // Centers
            crate::models::center::Center,
            crate::models::center::CenterSettings,
            crate::models::center::UpdateCenterSettings,
            crate::scheduling::hours::DayHours,
            crate::scheduling::hours::WeeklySchedule,
            crate::scheduling::hours::TimeRange,
            crate::scheduling::hours::ScheduleException,
            crate::scheduling::hours::OperatingHoursConfig,
            crate::scheduling::hours::DayHoursInput,
            crate::scheduling::hours::WeeklyScheduleInput,
            crate::scheduling::hours::OperatingHoursInput,
            crate::scheduling::hours::Segment,
            crate::scheduling::pricing::TaxConfig,
            // Courts
            crate::models::court::Court,
            // Availability
            crate::scheduling::slots::Slot,
            crate::scheduling::suggest::Suggestion,
            availability::AvailabilityResponse,
            availability::SuggestionResponse,
            // Pricing
            crate::scheduling::pricing::LineItem,
            crate::scheduling::pricing::PriceBreakdown,
            crate::scheduling::pricing::OverrideValidation,
            pricing::CalculateRequest,
            pricing::CalculateResponse,
            pricing::ValidateOverrideRequest,
            // Reservations
            crate::models::reservation::Reservation,
            crate::models::reservation::ReservationStatus,
            crate::models::reservation::CreateReservation,
            crate::models::reservation::PriceOverride,
            crate::models::reservation::PaymentInfo,
            reservations::ConflictResponse,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "centers", description = "Center and settings management"),
        (name = "courts", description = "Court management"),
        (name = "availability", description = "Slot availability and alternatives"),
        (name = "pricing", description = "Reservation pricing"),
        (name = "reservations", description = "Reservation lifecycle")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
