use regex::Regex;
use std::sync::OnceLock;

use super::member_service::MemberError;

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$",
        )
        .expect("Invalid regex")
    })
}

pub fn validate_username(username: &str) -> Result<&str, MemberError> {
    if username.trim().is_empty() {
        return Err(MemberError::validation("The username cannot be empty."));
    }
    Ok(username)
}

pub fn validate_required(field: &str, value: &str) -> Result<(), MemberError> {
    if value.trim().is_empty() {
        return Err(MemberError::validation(format!("The {field} cannot be empty.")));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<&str, MemberError> {
    if !email_regex().is_match(email) {
        return Err(MemberError::validation("The e-mail address is invalid."));
    }
    Ok(email)
}

/// Checks a new account password: not blank, long enough, not the username.
pub fn validate_new_password<'a>(
    password: &'a str,
    username: &str,
    min_length: usize,
) -> Result<&'a str, MemberError> {
    if password.trim().is_empty() {
        return Err(MemberError::validation("The password cannot be empty"));
    }

    if password.chars().count() < min_length {
        return Err(MemberError::validation(format!(
            "Please use at least {min_length} characters."
        )));
    }

    if password == username {
        return Err(MemberError::validation(
            "Username and password must not be the same.",
        ));
    }

    Ok(password)
}

pub fn validate_min_length(password: &str, min_length: usize) -> Result<&str, MemberError> {
    if password.chars().count() < min_length {
        return Err(MemberError::validation(format!(
            "The password must be at least {min_length} characters long."
        )));
    }
    Ok(password)
}

pub fn validate_confirmation(password: &str, confirmation: &str) -> Result<(), MemberError> {
    if password != confirmation {
        return Err(MemberError::validation("The passwords do not match."));
    }
    Ok(())
}

pub fn validate_group_name(name: &str) -> Result<&str, MemberError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(MemberError::validation("Group name cannot be empty"));
    }
    if trimmed.contains(',') {
        return Err(MemberError::validation("Group name cannot contain commas"));
    }
    Ok(trimmed)
}
