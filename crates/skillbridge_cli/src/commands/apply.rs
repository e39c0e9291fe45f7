//! `skillbridge apply` and `skillbridge update-status`

use std::sync::Arc;

use anyhow::Result;
use skillbridge_client::DiscoveryView;
use skillbridge_core::{ApplicationId, ApplicationStatus, TaskId, UserId};

use super::{connect, flush_notifications, Reported};

pub async fn handle_apply(
    api_url: Option<String>,
    task: TaskId,
    volunteer: Option<UserId>,
    message: Option<String>,
) -> Result<()> {
    let (client, session) = connect(api_url, volunteer)?;
    let mut view = DiscoveryView::mount(Arc::new(client), &session);

    let result = view.apply_with_message(task, message).await;
    flush_notifications(&mut view);
    result.map_err(|_| anyhow::Error::from(Reported))
}

pub async fn handle_update_status(
    api_url: Option<String>,
    application: ApplicationId,
    status: ApplicationStatus,
) -> Result<()> {
    let (client, session) = connect(api_url, None)?;
    let mut view = DiscoveryView::mount(Arc::new(client), &session);

    let result = view.update_application_status(application, status).await;
    flush_notifications(&mut view);
    result.map_err(|_| anyhow::Error::from(Reported))
}
