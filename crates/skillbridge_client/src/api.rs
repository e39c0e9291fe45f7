//! Seam between the discovery view and the network.

use async_trait::async_trait;
use skillbridge_core::{ApplicationId, ApplicationStatus, NewApplication, TaskApplication, UserId};

use crate::error::Result;
use crate::types::DiscoverySnapshot;

/// Operations the volunteer dashboard performs against the task service.
#[async_trait]
pub trait TaskApi: Send + Sync {
    /// Matched, applied and catalog fetched together; fails if any fails.
    async fn fetch_discovery(&self, volunteer_id: UserId) -> Result<DiscoverySnapshot>;

    /// Submit an application. The created record is returned when the
    /// server echoes one.
    async fn apply_to_task(&self, application: NewApplication) -> Result<Option<TaskApplication>>;

    async fn update_application_status(
        &self,
        application_id: ApplicationId,
        status: ApplicationStatus,
    ) -> Result<()>;
}
