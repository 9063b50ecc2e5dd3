mod create;
mod delete;
mod group;
mod init;
mod list;
mod password;

pub use create::cmd_member_create;
pub use delete::cmd_member_delete;
pub use group::{cmd_group_create, cmd_group_list};
pub use init::cmd_init;
pub use list::{DEFAULT_COLUMNS, ListFormat, MemberColumn, cmd_member_list, format_timestamp};
pub use password::cmd_member_password;
