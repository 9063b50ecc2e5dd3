//! Create member command handler

use std::io::{BufRead, Write};

use crate::cli::{Console, CreateArgs};
use crate::services::validation;
use crate::services::{CreateMemberInput, MemberError, MemberService};

const MISSING_FIELDS: &str =
    "Please provide at least and each of: username, firstname, lastname, email, password";

fn prompt_text<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    value: Option<String>,
    field: &str,
) -> Result<Option<String>, MemberError> {
    if value.is_some() || !console.is_interactive() {
        return Ok(value);
    }

    let answer = console.ask(&format!("Please enter the {field}: "), |v| {
        validation::validate_required(field, v).map(|()| v.to_string())
    })?;
    Ok(Some(answer))
}

pub async fn cmd_member_create<R: BufRead, W: Write>(
    service: &dyn MemberService,
    console: &mut Console<R, W>,
    args: CreateArgs,
) -> Result<(), MemberError> {
    let min_length = service.min_password_length();

    let username = prompt_text(console, args.username, "username")?;
    let firstname = prompt_text(console, args.firstname, "firstname")?;
    let lastname = prompt_text(console, args.lastname, "lastname")?;

    if !console.is_interactive()
        && (username.is_none()
            || firstname.is_none()
            || lastname.is_none()
            || args.email.is_none()
            || args.password.is_none())
    {
        return Err(MemberError::validation(MISSING_FIELDS));
    }

    let (Some(username), Some(firstname), Some(lastname)) = (username, firstname, lastname) else {
        return Err(MemberError::validation(MISSING_FIELDS));
    };

    let email = match args.email {
        Some(email) => validation::validate_email(&email).map(str::to_string)?,
        None => console.ask("Please enter the e-mail address: ", |v| {
            validation::validate_email(v).map(str::to_string)
        })?,
    };

    let password = match args.password {
        Some(password) => {
            validation::validate_new_password(&password, &username, min_length)?;
            password
        }
        None => {
            let password = console.ask_hidden("Please enter the new password: ", |v| {
                validation::validate_new_password(v, &username, min_length).map(str::to_string)
            })?;
            console.ask_hidden("Please confirm the password: ", |v| {
                validation::validate_confirmation(&password, v)
            })?;
            password
        }
    };

    let mut groups = Vec::with_capacity(args.groups.len());
    for reference in &args.groups {
        groups.push(service.resolve_group(reference).await?.id);
    }

    if groups.is_empty() && console.is_interactive() {
        let available = service.list_groups().await?;
        if !available.is_empty() {
            let names: Vec<String> = available.iter().map(|g| g.name.clone()).collect();
            let picked = console.multi_select(
                "Assign which groups to the user (select multiple comma-separated)?",
                &names,
            )?;
            groups = picked.into_iter().map(|i| available[i].id).collect();
        }
    }

    let member = service
        .create_member(CreateMemberInput {
            username,
            firstname,
            lastname,
            email,
            password,
            groups,
        })
        .await?;

    console.success(&format!("Member {} created.", member.username))
}
