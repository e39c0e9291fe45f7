//! `skillbridge session` subcommands.

use anyhow::Result;
use skillbridge_client::SessionStore;
use skillbridge_core::{SessionContext, SessionUser};

use super::{load_config, load_session};
use crate::cli::SessionAction;
use crate::output;

pub async fn handle(api_url: Option<String>, action: SessionAction) -> Result<()> {
    let config = load_config(api_url)?;
    let store = SessionStore::from_config(&config);
    match action {
        SessionAction::Show => {
            let session = load_session(&config, None)?;
            output::header("Session");
            output::kv("User", &format!("#{} {}", session.user.id, session.user.name));
            if let Some(email) = &session.user.email {
                output::kv("Email", email);
            }
            output::kv("Role", session.user.role.as_str());
            output::kv("Token", &mask_token(&session.token));
            output::kv("File", &store.path().display().to_string());
            output::kv("API", &config.api_url);
        }
        SessionAction::Set {
            token,
            user_id,
            name,
            email,
            role,
        } => {
            let session = SessionContext::new(
                token,
                SessionUser {
                    id: user_id,
                    name,
                    email,
                    role,
                },
            );
            store.save(&session)?;
            output::success(&format!("Logged in as user #{} ({})", user_id, role));
            output::dim(&format!("Saved to {}", store.path().display()));
        }
        SessionAction::Clear => {
            if store.clear()? {
                output::success("Logged out");
            } else {
                output::dim("No session stored.");
            }
        }
    }
    Ok(())
}

fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}
