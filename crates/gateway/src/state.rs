//! Shared application state for the gateway

use std::sync::Arc;

use memberhub_members::{AuthenticationService, LoginService, MemberService};

/// Shared application state containing all services
#[derive(Clone)]
pub struct GatewayState {
    /// Login service
    pub login_service: Arc<LoginService>,
    /// Authentication service
    pub authentication_service: Arc<AuthenticationService>,
    /// Member lookup service
    pub member_service: Arc<MemberService>,
}

impl GatewayState {
    pub fn new(
        login_service: Arc<LoginService>,
        authentication_service: Arc<AuthenticationService>,
        member_service: Arc<MemberService>,
    ) -> Self {
        Self {
            login_service,
            authentication_service,
            member_service,
        }
    }

    pub fn login_service(&self) -> &LoginService {
        &self.login_service
    }

    pub fn authentication_service(&self) -> &AuthenticationService {
        &self.authentication_service
    }

    pub fn member_service(&self) -> &MemberService {
        &self.member_service
    }
}
