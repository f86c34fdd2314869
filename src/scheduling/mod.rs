//! Scheduling and pricing core
//!
//! Pure, request-scoped computations: time normalization, operating-hours
//! resolution, slot generation, price calculation and conflict-alternative
//! ranking. No I/O happens here; the services layer feeds in reservations
//! and persists nothing from this module.

pub mod hours;
pub mod pricing;
pub mod slots;
pub mod suggest;
pub mod time;

pub use hours::{OperatingHoursConfig, Segment};
pub use pricing::{PriceBreakdown, TaxConfig};
pub use slots::Slot;
pub use suggest::Suggestion;
