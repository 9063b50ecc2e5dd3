pub mod member_service;
pub mod member_service_impl;
pub mod validation;

pub use member_service::{CreateMemberInput, MemberError, MemberService};
pub use member_service_impl::SeaOrmMemberService;
