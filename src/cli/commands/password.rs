use std::io::{BufRead, Write};

use crate::cli::{Console, PasswordArgs};
use crate::services::validation;
use crate::services::{MemberError, MemberService};

pub async fn cmd_member_password<R: BufRead, W: Write>(
    service: &dyn MemberService,
    console: &mut Console<R, W>,
    args: PasswordArgs,
) -> Result<(), MemberError> {
    let password = match args.password {
        Some(password) => password,
        None if console.is_interactive() => {
            let password =
                console.ask_hidden("Please enter the new password: ", |v| Ok(v.to_string()))?;
            let confirmation =
                console.ask_hidden("Please confirm the password: ", |v| Ok(v.to_string()))?;
            validation::validate_confirmation(&password, &confirmation)?;
            password
        }
        None => return Err(MemberError::validation("Please provide the new password.")),
    };

    service.change_password(&args.username, &password).await?;

    console.success("The password has been changed successfully.")
}
