//! `skillbridge matches`

use anyhow::Result;
use skillbridge_core::tier::sort_matches_by_score;
use skillbridge_core::{Match, UserId};

use super::load_view;
use crate::output;

pub async fn handle(api_url: Option<String>, volunteer: Option<UserId>, sort: bool) -> Result<()> {
    let view = load_view(api_url, volunteer).await?;

    let mut matches: Vec<Match> = view.visible_matches().into_iter().cloned().collect();
    if sort {
        sort_matches_by_score(&mut matches);
    }

    output::header("Matched tasks");
    output::matches(&matches.iter().collect::<Vec<_>>());
    Ok(())
}
