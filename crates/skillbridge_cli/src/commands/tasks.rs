//! `skillbridge tasks` subcommands (nonprofit task administration).

use anyhow::{bail, Result};
use skillbridge_core::{NewTask, TaskStatus, TaskUpdate};

use super::connect;
use crate::cli::TasksAction;
use crate::output;

pub async fn handle(api_url: Option<String>, action: TasksAction) -> Result<()> {
    let (client, _session) = connect(api_url, None)?;
    match action {
        TasksAction::Show { id } => {
            let task = client.task(id).await?;
            output::task_detail(&task);
        }
        TasksAction::Create {
            title,
            description,
            location,
            start_date,
            end_date,
            skills,
            cause,
            volunteers_needed,
        } => {
            if let (Some(start), Some(end)) = (start_date, end_date) {
                if end < start {
                    bail!("--end-date {} is before --start-date {}", end, start);
                }
            }
            let new_task = NewTask {
                title,
                description,
                location,
                start_date,
                end_date,
                required_skills: skills,
                cause,
                volunteers_needed,
                status: TaskStatus::Open,
            };
            let task = client.create_task(&new_task).await?;
            output::success(&format!("Created task #{}", task.id));
            output::task_detail(&task);
        }
        TasksAction::Update {
            id,
            title,
            description,
            location,
            skills,
            volunteers_needed,
            status,
        } => {
            let update = TaskUpdate {
                title,
                description,
                location,
                required_skills: (!skills.is_empty()).then_some(skills),
                volunteers_needed,
                status,
            };
            if update.is_empty() {
                bail!("Nothing to update. Pass at least one field, e.g. --status Completed");
            }
            let task = client.update_task(id, &update).await?;
            output::success(&format!("Updated task #{}", task.id));
            output::task_detail(&task);
        }
        TasksAction::Applications { id } => {
            let apps = client.task_applications(id).await?;
            output::header(&format!("Applications for task #{}", id));
            output::applications(&apps);
        }
    }
    Ok(())
}
