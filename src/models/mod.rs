//! Data models for Cancha

pub mod center;
pub mod court;
pub mod reservation;

// Re-export commonly used types
pub use center::{Center, CenterSettings, UpdateCenterSettings};
pub use court::Court;
pub use reservation::{
    CreateReservation, PaymentInfo, PriceOverride, Reservation, ReservationStatus,
};
