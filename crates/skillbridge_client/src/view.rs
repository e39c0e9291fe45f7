//! Volunteer discovery view.
//!
//! Holds the dashboard state for one mount: load status, the fetched
//! snapshot, the current filter and the derived visible list, plus pending
//! notifications. A [`CancellationToken`] tied to the mount guards every
//! state write, so a response arriving after `unmount` is dropped.

use std::collections::HashSet;
use std::sync::Arc;

use skillbridge_core::filter::{self, TaskFilter};
use skillbridge_core::{
    ApplicationId, ApplicationStatus, Match, NewApplication, SessionContext, Task, TaskId, UserId,
};
use skillbridge_observability::{record_error, view_span};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn, Instrument};

use crate::api::TaskApi;
use crate::error::Result;
use crate::types::Notification;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    Loading,
    Ready,
    /// Fetch failed; lists are empty.
    Failed(String),
}

/// Cloneable handle that can unmount a view from elsewhere.
#[derive(Debug, Clone)]
pub struct ViewHandle {
    lifetime: CancellationToken,
}

impl ViewHandle {
    pub fn unmount(&self) {
        self.lifetime.cancel();
    }

    pub fn is_mounted(&self) -> bool {
        !self.lifetime.is_cancelled()
    }
}

pub struct DiscoveryView {
    api: Arc<dyn TaskApi>,
    volunteer_id: UserId,
    state: ViewState,
    tasks: Vec<Task>,
    matches: Vec<Match>,
    applied: HashSet<TaskId>,
    filter: TaskFilter,
    visible: Vec<Task>,
    notifications: Vec<Notification>,
    lifetime: CancellationToken,
}

impl DiscoveryView {
    /// Create the view for the session's user. Nothing is fetched until
    /// [`load`](Self::load).
    pub fn mount(api: Arc<dyn TaskApi>, session: &SessionContext) -> Self {
        Self {
            api,
            volunteer_id: session.user_id(),
            state: ViewState::Loading,
            tasks: Vec::new(),
            matches: Vec::new(),
            applied: HashSet::new(),
            filter: TaskFilter::default(),
            visible: Vec::new(),
            notifications: Vec::new(),
            lifetime: CancellationToken::new(),
        }
    }

    pub fn handle(&self) -> ViewHandle {
        ViewHandle {
            lifetime: self.lifetime.clone(),
        }
    }

    pub fn unmount(&self) {
        self.lifetime.cancel();
    }

    pub fn is_mounted(&self) -> bool {
        !self.lifetime.is_cancelled()
    }

    /// Fetch matches, applied ids and the catalog, then derive the visible
    /// list. On failure the view shows an empty list in `Failed`.
    pub async fn load(&mut self) {
        if !self.is_mounted() {
            return;
        }
        self.state = ViewState::Loading;

        let api = Arc::clone(&self.api);
        let lifetime = self.lifetime.clone();
        let span = view_span!("discovery", self.volunteer_id);
        let result = tokio::select! {
            biased;
            _ = lifetime.cancelled() => {
                debug!(volunteer.id = self.volunteer_id, "View unmounted during load");
                return;
            }
            r = api.fetch_discovery(self.volunteer_id).instrument(span.clone()) => r,
        };
        if !self.is_mounted() {
            return;
        }

        match result {
            Ok(snapshot) => {
                if !snapshot.rejected.is_empty() {
                    warn!(
                        count = snapshot.rejected.len(),
                        "Some task records were excluded as malformed"
                    );
                    self.notifications.push(Notification::info(format!(
                        "{} task(s) could not be displayed",
                        snapshot.rejected.len()
                    )));
                }
                self.tasks = snapshot.tasks;
                self.matches = snapshot.matches;
                self.applied = snapshot.applied;
                self.state = ViewState::Ready;
                self.recompute();
            }
            Err(e) => {
                span.in_scope(|| record_error(&e));
                self.tasks.clear();
                self.matches.clear();
                self.applied.clear();
                self.visible.clear();
                self.state = ViewState::Failed(e.to_string());
                self.notifications
                    .push(Notification::error(format!("Could not load tasks: {}", e)));
            }
        }
    }

    /// Replace the filter and recompute the visible list.
    pub fn set_filter(&mut self, filter: TaskFilter) {
        self.filter = filter;
        self.recompute();
    }

    fn recompute(&mut self) {
        self.visible = filter::apply(&self.tasks, &self.applied, &self.filter);
    }

    /// Submit an application for `task_id`.
    ///
    /// Success marks the task applied (it leaves the visible list); failure
    /// leaves state untouched and queues an error notification with the
    /// server's message.
    pub async fn apply(&mut self, task_id: TaskId) -> Result<()> {
        self.apply_with_message(task_id, None).await
    }

    /// [`apply`](Self::apply) with an optional note to the nonprofit.
    pub async fn apply_with_message(
        &mut self,
        task_id: TaskId,
        message: Option<String>,
    ) -> Result<()> {
        let mut application = NewApplication::new(task_id, self.volunteer_id);
        if let Some(message) = message {
            application = application.message(message);
        }
        let result = self.api.apply_to_task(application).await;
        if !self.is_mounted() {
            debug!(task.id = task_id, "View unmounted before apply confirmed");
            return result.map(|_| ());
        }

        match result {
            Ok(_) => {
                info!(task.id = task_id, "Application submitted");
                self.applied.insert(task_id);
                self.recompute();
                self.notifications
                    .push(Notification::success("Application submitted"));
                Ok(())
            }
            Err(e) => {
                warn!(task.id = task_id, error = %e, "Application failed");
                self.notifications.push(Notification::error(e.user_message()));
                Err(e)
            }
        }
    }

    /// Accept or reject an application (nonprofit/HR review).
    pub async fn update_application_status(
        &mut self,
        application_id: ApplicationId,
        status: ApplicationStatus,
    ) -> Result<()> {
        let result = self
            .api
            .update_application_status(application_id, status)
            .await;
        if !self.is_mounted() {
            return result;
        }
        match result {
            Ok(()) => {
                self.notifications.push(Notification::success(format!(
                    "Application {} marked {}",
                    application_id, status
                )));
                Ok(())
            }
            Err(e) => {
                self.notifications.push(Notification::error(e.user_message()));
                Err(e)
            }
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn filter(&self) -> &TaskFilter {
        &self.filter
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn visible_tasks(&self) -> &[Task] {
        &self.visible
    }

    /// Matches not yet applied to, in server order.
    pub fn visible_matches(&self) -> Vec<&Match> {
        self.matches
            .iter()
            .filter(|m| !self.applied.contains(&m.task.id))
            .collect()
    }

    pub fn applied(&self) -> &HashSet<TaskId> {
        &self.applied
    }

    /// Locations and skills present in the catalog, for filter choices.
    pub fn filter_choices(&self) -> (Vec<String>, Vec<String>) {
        (
            filter::distinct_locations(&self.tasks),
            filter::distinct_skills(&self.tasks),
        )
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }
}

impl Drop for DiscoveryView {
    fn drop(&mut self) {
        self.lifetime.cancel();
    }
}
