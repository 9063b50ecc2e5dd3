pub mod prelude;

pub mod member_groups;
pub mod members;
