//! List members command handler

use std::collections::HashMap;
use std::io::{BufRead, Write};

use serde_json::{Map, Value};

use crate::cli::table::CHECK_MARK;
use crate::cli::{Console, ListArgs};
use crate::models::member::Member;
use crate::services::{MemberError, MemberService};

pub const DEFAULT_COLUMNS: &[MemberColumn] = &[
    MemberColumn::Firstname,
    MemberColumn::Lastname,
    MemberColumn::LoginEnabled,
    MemberColumn::Username,
    MemberColumn::CreatedAt,
    MemberColumn::Groups,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListFormat {
    Txt,
    Json,
}

impl ListFormat {
    pub fn parse(value: &str) -> Result<Self, MemberError> {
        match value {
            "txt" => Ok(Self::Txt),
            "json" => Ok(Self::Json),
            other => Err(MemberError::Logic(format!("Invalid format: {other}"))),
        }
    }
}

/// Listable member fields. `password_hash` is not one of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberColumn {
    Id,
    Username,
    Firstname,
    Lastname,
    Email,
    LoginEnabled,
    Disabled,
    UseTwoFactor,
    Groups,
    LoginAttempts,
    LockedUntil,
    LastLogin,
    CreatedAt,
    UpdatedAt,
}

impl MemberColumn {
    pub const ALL: &[Self] = &[
        Self::Id,
        Self::Username,
        Self::Firstname,
        Self::Lastname,
        Self::Email,
        Self::LoginEnabled,
        Self::Disabled,
        Self::UseTwoFactor,
        Self::Groups,
        Self::LoginAttempts,
        Self::LockedUntil,
        Self::LastLogin,
        Self::CreatedAt,
        Self::UpdatedAt,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Username => "username",
            Self::Firstname => "firstname",
            Self::Lastname => "lastname",
            Self::Email => "email",
            Self::LoginEnabled => "login_enabled",
            Self::Disabled => "disabled",
            Self::UseTwoFactor => "use_two_factor",
            Self::Groups => "groups",
            Self::LoginAttempts => "login_attempts",
            Self::LockedUntil => "locked_until",
            Self::LastLogin => "last_login",
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
        }
    }

    pub fn parse(value: &str) -> Result<Self, MemberError> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.name() == value)
            .ok_or_else(|| MemberError::Logic(format!("Unknown column: {value}")))
    }

    const fn timestamp(self, member: &Member) -> Option<i64> {
        match self {
            Self::LockedUntil => Some(member.locked_until),
            Self::LastLogin => Some(member.last_login),
            Self::CreatedAt => Some(member.created_at),
            Self::UpdatedAt => Some(member.updated_at),
            _ => None,
        }
    }

    const fn flag(self, member: &Member) -> Option<bool> {
        match self {
            Self::LoginEnabled => Some(member.login_enabled),
            Self::Disabled => Some(member.disabled),
            Self::UseTwoFactor => Some(member.use_two_factor),
            _ => None,
        }
    }

    /// Table cell for this column.
    #[must_use]
    pub fn cell(self, member: &Member, group_names: &[String]) -> String {
        if let Some(ts) = self.timestamp(member) {
            return format_timestamp(ts);
        }
        if let Some(flag) = self.flag(member) {
            return if flag { CHECK_MARK.to_string() } else { String::new() };
        }

        match self {
            Self::Id => member.id.to_string(),
            Self::Username => member.username.clone(),
            Self::Firstname => member.firstname.clone(),
            Self::Lastname => member.lastname.clone(),
            Self::Email => member.email.clone(),
            Self::Groups => group_names.join(", "),
            Self::LoginAttempts => member.login_attempts.to_string(),
            _ => String::new(),
        }
    }

    /// JSON value for this column.
    #[must_use]
    pub fn json(self, member: &Member, group_names: &[String]) -> Value {
        if let Some(ts) = self.timestamp(member) {
            return Value::from(ts);
        }
        if let Some(flag) = self.flag(member) {
            return Value::from(flag);
        }

        match self {
            Self::Id => Value::from(member.id),
            Self::Username => Value::from(member.username.as_str()),
            Self::Firstname => Value::from(member.firstname.as_str()),
            Self::Lastname => Value::from(member.lastname.as_str()),
            Self::Email => Value::from(member.email.as_str()),
            Self::Groups => Value::from(group_names.to_vec()),
            Self::LoginAttempts => Value::from(member.login_attempts),
            _ => Value::Null,
        }
    }
}

/// `YYYY-MM-DD HH:MM:SS` in local time, empty for 0.
#[must_use]
pub fn format_timestamp(ts: i64) -> String {
    if ts == 0 {
        return String::new();
    }

    chrono::DateTime::from_timestamp(ts, 0)
        .map(|dt| {
            dt.with_timezone(&chrono::Local)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string()
        })
        .unwrap_or_default()
}

fn parse_columns(requested: &[String]) -> Result<Vec<MemberColumn>, MemberError> {
    if requested.is_empty() {
        return Ok(DEFAULT_COLUMNS.to_vec());
    }

    requested.iter().map(|c| MemberColumn::parse(c.trim())).collect()
}

fn resolve_names(member: &Member, names: &HashMap<i32, String>) -> Vec<String> {
    member
        .groups
        .iter()
        .filter_map(|id| names.get(id).cloned())
        .collect()
}

pub async fn cmd_member_list<R: BufRead, W: Write>(
    service: &dyn MemberService,
    console: &mut Console<R, W>,
    args: ListArgs,
) -> Result<(), MemberError> {
    let format = ListFormat::parse(&args.format)?;
    let columns = parse_columns(&args.columns)?;

    let members = service.list_members().await?;

    let group_names: HashMap<i32, String> = if columns.contains(&MemberColumn::Groups) {
        service
            .list_groups()
            .await?
            .into_iter()
            .map(|g| (g.id, g.name))
            .collect()
    } else {
        HashMap::new()
    };

    match format {
        ListFormat::Txt => {
            if members.is_empty() {
                return console.note("No accounts found.");
            }

            let headers: Vec<String> = columns.iter().map(|c| c.name().to_string()).collect();
            let rows: Vec<Vec<String>> = members
                .iter()
                .map(|member| {
                    let names = resolve_names(member, &group_names);
                    columns.iter().map(|c| c.cell(member, &names)).collect()
                })
                .collect();

            console.table(&headers, &rows)
        }
        ListFormat::Json => {
            let data: Vec<Value> = members
                .iter()
                .map(|member| {
                    let names = resolve_names(member, &group_names);
                    let object: Map<String, Value> = columns
                        .iter()
                        .map(|c| (c.name().to_string(), c.json(member, &names)))
                        .collect();
                    Value::Object(object)
                })
                .collect();

            let encoded = serde_json::to_string(&data)
                .map_err(|e| MemberError::Internal(format!("Failed to encode JSON: {e}")))?;
            console.write_raw(&encoded)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member() -> Member {
        Member {
            id: 7,
            username: "alice".to_string(),
            firstname: "Alice".to_string(),
            lastname: "Liddell".to_string(),
            email: "alice@example.org".to_string(),
            login_enabled: true,
            disabled: false,
            use_two_factor: false,
            groups: vec![2, 1],
            login_attempts: 3,
            locked_until: 0,
            last_login: 0,
            created_at: 1_700_000_000,
            updated_at: 1_700_000_000,
        }
    }

    #[test]
    fn format_is_txt_or_json() {
        assert_eq!(ListFormat::parse("txt").unwrap(), ListFormat::Txt);
        assert_eq!(ListFormat::parse("json").unwrap(), ListFormat::Json);
        assert!(matches!(ListFormat::parse("xml"), Err(MemberError::Logic(_))));
        assert!(matches!(ListFormat::parse("JSON"), Err(MemberError::Logic(_))));
    }

    #[test]
    fn password_hash_is_not_a_column() {
        assert!(matches!(
            MemberColumn::parse("password_hash"),
            Err(MemberError::Logic(_))
        ));
        for column in MemberColumn::ALL {
            assert_eq!(MemberColumn::parse(column.name()).unwrap(), *column);
        }
    }

    #[test]
    fn empty_columns_use_defaults() {
        assert_eq!(parse_columns(&[]).unwrap(), DEFAULT_COLUMNS.to_vec());
    }

    #[test]
    fn zero_timestamp_renders_empty() {
        assert_eq!(format_timestamp(0), "");
        assert_eq!(MemberColumn::LastLogin.cell(&member(), &[]), "");
    }

    #[test]
    fn timestamp_renders_local_datetime() {
        let expected = chrono::DateTime::from_timestamp(1_700_000_000, 0)
            .unwrap()
            .with_timezone(&chrono::Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string();
        assert_eq!(format_timestamp(1_700_000_000), expected);
        assert_eq!(expected.len(), 19);
    }

    #[test]
    fn flags_render_as_check_mark() {
        let m = member();
        assert_eq!(MemberColumn::LoginEnabled.cell(&m, &[]), CHECK_MARK);
        assert_eq!(MemberColumn::Disabled.cell(&m, &[]), "");
        assert_eq!(MemberColumn::LoginEnabled.json(&m, &[]), Value::Bool(true));
    }

    #[test]
    fn groups_resolve_in_stored_order() {
        let names = HashMap::from([(1, "Members".to_string()), (2, "Editors".to_string())]);
        let resolved = resolve_names(&member(), &names);
        assert_eq!(resolved, vec!["Editors", "Members"]);
        assert_eq!(
            MemberColumn::Groups.cell(&member(), &resolved),
            "Editors, Members"
        );
        assert_eq!(
            MemberColumn::Groups.json(&member(), &resolved),
            serde_json::json!(["Editors", "Members"])
        );
    }
}
