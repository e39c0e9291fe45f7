//! CLI argument definitions using clap derive macros.

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use skillbridge_core::{ApplicationStatus, SkillRequirement, TaskId, TaskStatus, UserId, UserRole};

/// Find volunteer tasks that fit your skills, and manage the ones you post
#[derive(Parser)]
#[command(name = "skillbridge", about, version, propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose (debug) logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format: text (human-readable) or json (machine-readable)
    #[arg(short, long, global = true, default_value = "text")]
    pub output: OutputFormat,

    /// API base URL (overrides SKILLBRIDGE_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,
}

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum OutputFormat {
    /// Colored terminal output for humans
    #[default]
    Text,
    /// Structured JSON for scripts
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Browse open tasks, hiding the ones you already applied to
    Discover {
        /// Volunteer id (default: the logged-in user)
        #[arg(long)]
        volunteer: Option<UserId>,
        /// Title contains this text (case-sensitive)
        #[arg(long)]
        title: Option<String>,
        /// Exact location
        #[arg(long)]
        location: Option<String>,
        /// Exact required skill
        #[arg(long)]
        skill: Option<String>,
    },
    /// Show tasks matched to you, with score tier and reasons
    Matches {
        /// Volunteer id (default: the logged-in user)
        #[arg(long)]
        volunteer: Option<UserId>,
        /// Highest score first instead of server order
        #[arg(long)]
        sort: bool,
    },
    /// Apply to a task
    Apply {
        /// Task id
        #[arg(long)]
        task: TaskId,
        /// Apply on behalf of this volunteer (default: the logged-in user)
        #[arg(long)]
        volunteer: Option<UserId>,
        /// Optional note to the nonprofit
        #[arg(short, long)]
        message: Option<String>,
    },
    /// Accept or reject an application
    UpdateStatus {
        /// Application id
        #[arg(long)]
        application: u64,
        /// New status: accepted or rejected
        #[arg(long)]
        status: ApplicationStatus,
    },
    /// Nonprofit task administration
    Tasks {
        #[command(subcommand)]
        action: TasksAction,
    },
    /// Stored login session
    Session {
        #[command(subcommand)]
        action: SessionAction,
    },
}

#[derive(Subcommand)]
pub enum TasksAction {
    /// Show one task
    Show {
        id: TaskId,
    },
    /// Post a new task
    Create {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long)]
        location: String,
        /// YYYY-MM-DD
        #[arg(long)]
        start_date: Option<NaiveDate>,
        /// YYYY-MM-DD
        #[arg(long)]
        end_date: Option<NaiveDate>,
        /// Required skill as NAME[:LEVEL]; repeatable
        #[arg(long = "skill", value_parser = parse_skill)]
        skills: Vec<SkillRequirement>,
        #[arg(long)]
        cause: Option<String>,
        #[arg(long, default_value_t = 1)]
        volunteers_needed: u32,
    },
    /// Change fields of an existing task
    Update {
        id: TaskId,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        location: Option<String>,
        /// Replace required skills (NAME[:LEVEL]; repeatable)
        #[arg(long = "skill", value_parser = parse_skill)]
        skills: Vec<SkillRequirement>,
        #[arg(long)]
        volunteers_needed: Option<u32>,
        /// Open, Ongoing or Completed
        #[arg(long)]
        status: Option<TaskStatus>,
    },
    /// List applications received for a task
    Applications {
        id: TaskId,
    },
}

#[derive(Subcommand)]
pub enum SessionAction {
    /// Show the stored session (token masked)
    Show,
    /// Store a session after logging in
    Set {
        /// Bearer token issued by the API
        #[arg(long)]
        token: String,
        #[arg(long)]
        user_id: UserId,
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long)]
        email: Option<String>,
        /// volunteer, nonprofit or hr
        #[arg(long, default_value = "volunteer")]
        role: UserRole,
    },
    /// Remove the stored session (log out)
    Clear,
}

/// `Gardening` or `Gardening:Beginner`.
pub fn parse_skill(s: &str) -> Result<SkillRequirement, String> {
    let (skill, level) = match s.split_once(':') {
        Some((skill, level)) => (skill.trim(), level.trim()),
        None => (s.trim(), ""),
    };
    if skill.is_empty() {
        return Err(format!("skill name missing in '{}'", s));
    }
    Ok(SkillRequirement::new(skill, level))
}
