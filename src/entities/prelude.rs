pub use super::member_groups::Entity as MemberGroups;
pub use super::members::Entity as Members;
