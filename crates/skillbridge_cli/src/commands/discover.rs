//! `skillbridge discover`

use anyhow::Result;
use skillbridge_core::{TaskFilter, UserId};

use super::load_view;
use crate::output;

pub async fn handle(
    api_url: Option<String>,
    volunteer: Option<UserId>,
    filter: TaskFilter,
) -> Result<()> {
    let mut view = load_view(api_url, volunteer).await?;
    view.set_filter(filter);

    output::header("Discover tasks");
    output::tasks(view.visible_tasks());

    if view.visible_tasks().is_empty() && !view.filter().is_empty() {
        let (locations, skills) = view.filter_choices();
        output::dim(&format!("Locations: {}", locations.join(", ")));
        output::dim(&format!("Skills: {}", skills.join(", ")));
    }

    println!();
    output::header("Recommended for you");
    output::matches(&view.visible_matches());

    view.unmount();
    Ok(())
}
