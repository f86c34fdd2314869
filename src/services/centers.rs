//! Center settings service

use uuid::Uuid;

use crate::{
    config::BookingDefaults,
    error::AppResult,
    models::center::{Center, CenterSettings, UpdateCenterSettings},
    repository::Repository,
    scheduling::hours::{normalize_config, OperatingHoursInput},
};

#[derive(Clone)]
pub struct CentersService {
    repository: Repository,
    defaults: BookingDefaults,
}

impl CentersService {
    pub fn new(repository: Repository, defaults: BookingDefaults) -> Self {
        Self { repository, defaults }
    }

    pub async fn list(&self) -> AppResult<Vec<Center>> {
        self.repository.centers.list().await
    }

    pub async fn get(&self, id: Uuid) -> AppResult<Center> {
        self.repository.centers.get_by_id(id).await
    }

    /// Current settings of a center
    pub async fn get_settings(&self, id: Uuid) -> AppResult<CenterSettings> {
        let center = self.repository.centers.get_by_id(id).await?;
        Ok(CenterSettings {
            operating_hours: center.operating_hours,
            taxes: center.taxes,
        })
    }

    /// Apply a partial settings update.
    ///
    /// The partial input is merged over the stored config into a complete,
    /// canonical replacement value; a day the form did not submit keeps its
    /// previous hours rather than being dropped.
    pub async fn update_settings(
        &self,
        id: Uuid,
        update: UpdateCenterSettings,
    ) -> AppResult<CenterSettings> {
        let previous = self.repository.centers.get_by_id(id).await?;

        let partial = update.operating_hours.unwrap_or_else(OperatingHoursInput::default);
        let operating_hours =
            normalize_config(&partial, Some(&previous.operating_hours), &self.defaults)?;
        let taxes = update.taxes.or(previous.taxes);

        let center = self
            .repository
            .centers
            .replace_settings(id, &operating_hours, taxes.as_ref())
            .await?;

        tracing::info!(center = %id, "Center settings replaced");
        Ok(CenterSettings {
            operating_hours: center.operating_hours,
            taxes: center.taxes,
        })
    }
}
