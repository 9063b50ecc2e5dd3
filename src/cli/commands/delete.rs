use std::io::{BufRead, Write};

use crate::cli::Console;
use crate::services::{MemberError, MemberService};

pub async fn cmd_member_delete<R: BufRead, W: Write>(
    service: &dyn MemberService,
    console: &mut Console<R, W>,
    username: &str,
) -> Result<(), MemberError> {
    let member = service.find_by_username(username).await?;
    let group_names = service.group_names(&member.groups).await?;

    console.text(&format!("Member '{username}' found:"))?;

    let group_header = if group_names.len() > 1 { "groups" } else { "group" };
    let headers: Vec<String> = ["id", "firstname", "lastname", "email", group_header]
        .iter()
        .map(ToString::to_string)
        .collect();
    console.table(
        &headers,
        &[vec![
            member.id.to_string(),
            member.firstname,
            member.lastname,
            member.email,
            group_names.join(", "),
        ]],
    )?;

    if console.is_interactive() {
        let answer = console.choice("Delete member?", &["no", "yes"], 0)?;
        if answer == "no" {
            return console.text("Cancelled.");
        }
    }

    service.delete_member(username).await?;

    console.success(&format!("Member {username} deleted!"))
}
