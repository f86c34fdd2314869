//! Courts service

use uuid::Uuid;

use crate::{error::AppResult, models::court::Court, repository::Repository};

#[derive(Clone)]
pub struct CourtsService {
    repository: Repository,
}

impl CourtsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Active courts of a center
    pub async fn list_by_center(&self, center_id: Uuid) -> AppResult<Vec<Court>> {
        // Verify center exists
        self.repository.centers.get_by_id(center_id).await?;
        self.repository.courts.list_by_center(center_id).await
    }

    pub async fn get(&self, id: Uuid) -> AppResult<Court> {
        self.repository.courts.get_by_id(id).await
    }
}
