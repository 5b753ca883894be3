//! Business logic services for the three endpoints.

pub mod authentication;
pub mod login;
pub mod member;

pub use authentication::{AuthOutcome, AuthenticationResponse, AuthenticationService};
pub use login::{LoginResponse, LoginService};
pub use member::MemberService;
