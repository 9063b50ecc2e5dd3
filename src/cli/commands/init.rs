use std::io::{BufRead, Write};
use std::path::Path;

use crate::cli::Console;
use crate::config::Config;
use crate::services::MemberError;

pub fn cmd_init<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    path: &Path,
) -> Result<(), MemberError> {
    if Config::create_default_if_missing(path)? {
        console.success(&format!("Created default config file: {}", path.display()))
    } else {
        console.note(&format!("Config file already exists: {}", path.display()))
    }
}
