use std::io::{BufRead, Write};

use crate::cli::Console;
use crate::services::{MemberError, MemberService};

pub async fn cmd_group_create<R: BufRead, W: Write>(
    service: &dyn MemberService,
    console: &mut Console<R, W>,
    name: &str,
) -> Result<(), MemberError> {
    let group = service.create_group(name).await?;
    console.success(&format!("Group {} created (ID: {}).", group.name, group.id))
}

pub async fn cmd_group_list<R: BufRead, W: Write>(
    service: &dyn MemberService,
    console: &mut Console<R, W>,
) -> Result<(), MemberError> {
    let groups = service.list_groups().await?;

    if groups.is_empty() {
        console.note("No groups found.")?;
        return console.text("Add one with: memberctl group create \"name\"");
    }

    let headers = vec!["id".to_string(), "name".to_string()];
    let rows: Vec<Vec<String>> = groups
        .into_iter()
        .map(|g| vec![g.id.to_string(), g.name])
        .collect();
    console.table(&headers, &rows)
}
