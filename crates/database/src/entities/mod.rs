//! Domain entities for the database layer

pub mod member;

pub use member::{CreateMemberRequest, MemberRecord};
