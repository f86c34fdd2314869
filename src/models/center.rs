//! Center model and settings types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::scheduling::{
    hours::OperatingHoursInput, OperatingHoursConfig, TaxConfig,
};

/// Sports center
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Center {
    pub id: Uuid,
    /// Display name
    pub name: String,
    pub address: Option<String>,
    /// Operating hours, exceptions, granularity and watersheds
    pub operating_hours: OperatingHoursConfig,
    /// Tax configuration; absent means prices carry no tax information
    pub taxes: Option<TaxConfig>,
    pub crea_date: Option<DateTime<Utc>>,
    pub modif_date: Option<DateTime<Utc>>,
}

/// Settings view returned to the admin UI
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CenterSettings {
    pub operating_hours: OperatingHoursConfig,
    pub taxes: Option<TaxConfig>,
}

/// Partial settings update from the admin form.
///
/// Times may arrive in any format the normalizer accepts; the saved config is
/// always complete and canonical.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCenterSettings {
    pub operating_hours: Option<OperatingHoursInput>,
    pub taxes: Option<TaxConfig>,
}
