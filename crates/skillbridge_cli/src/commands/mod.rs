//! Command dispatch and the setup shared by every subcommand.

pub mod apply;
pub mod discover;
pub mod matches;
pub mod session;
pub mod tasks;

use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use skillbridge_client::{
    ClientError, DiscoveryView, SessionStore, SkillBridgeClient, SkillBridgeConfig, ViewState,
};
use skillbridge_core::{SessionContext, TaskFilter, UserId};

use crate::cli::{Cli, Command};
use crate::output;

/// The failure was already shown to the user; exit non-zero without
/// printing it again.
#[derive(Debug)]
pub struct Reported;

impl std::fmt::Display for Reported {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("error already reported")
    }
}

impl std::error::Error for Reported {}

pub async fn handle(cli: Cli) -> Result<()> {
    let api_url = cli.api_url;
    match cli.command {
        Command::Discover {
            volunteer,
            title,
            location,
            skill,
        } => {
            let filter = TaskFilter {
                title,
                location,
                skill,
            };
            discover::handle(api_url, volunteer, filter).await
        }
        Command::Matches { volunteer, sort } => matches::handle(api_url, volunteer, sort).await,
        Command::Apply {
            task,
            volunteer,
            message,
        } => apply::handle_apply(api_url, task, volunteer, message).await,
        Command::UpdateStatus {
            application,
            status,
        } => apply::handle_update_status(api_url, application, status).await,
        Command::Tasks { action } => tasks::handle(api_url, action).await,
        Command::Session { action } => session::handle(api_url, action).await,
    }
}

/// Resolve client configuration; `--api-url` beats `SKILLBRIDGE_API_URL`.
pub(crate) fn load_config(api_url: Option<String>) -> Result<SkillBridgeConfig> {
    Ok(SkillBridgeConfig::from_env_with_api_url(api_url)?)
}

/// Load the stored session, acting as `volunteer` when given.
pub(crate) fn load_session(
    config: &SkillBridgeConfig,
    volunteer: Option<UserId>,
) -> Result<SessionContext> {
    let store = SessionStore::from_config(config);
    let mut session = match store.load() {
        Ok(session) => session,
        Err(ClientError::MissingSession(_)) => {
            return Err(anyhow!(
                "Not logged in. Run 'skillbridge session set --token <TOKEN> --user-id <ID>' first."
            ))
        }
        Err(e) => {
            return Err(e).with_context(|| format!("Reading session {}", store.path().display()))
        }
    };
    if let Some(id) = volunteer {
        session.user.id = id;
    }
    Ok(session)
}

pub(crate) fn connect(
    api_url: Option<String>,
    volunteer: Option<UserId>,
) -> Result<(SkillBridgeClient, SessionContext)> {
    let config = load_config(api_url)?;
    let session = load_session(&config, volunteer)?;
    let client = SkillBridgeClient::new(config, session.clone())?;
    Ok((client, session))
}

/// Mount a discovery view and load it behind a spinner. Ctrl-C unmounts the
/// view, which abandons the in-flight fetch.
pub(crate) async fn load_view(
    api_url: Option<String>,
    volunteer: Option<UserId>,
) -> Result<DiscoveryView> {
    let (client, session) = connect(api_url, volunteer)?;
    let mut view = DiscoveryView::mount(Arc::new(client), &session);

    let handle = view.handle();
    let interrupt = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            handle.unmount();
        }
    });

    let spinner = output::spinner("Loading tasks...");
    view.load().await;
    output::spinner_done(&spinner);
    interrupt.abort();

    if !view.is_mounted() {
        output::warning("Cancelled.");
        return Err(Reported.into());
    }
    let failed = matches!(view.state(), ViewState::Failed(_));
    flush_notifications(&mut view);
    if failed {
        return Err(Reported.into());
    }
    Ok(view)
}

/// Print the view's pending toasts.
pub(crate) fn flush_notifications(view: &mut DiscoveryView) {
    for note in view.take_notifications() {
        output::notification(&note);
    }
}
