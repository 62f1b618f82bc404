use booklend_auth::Principal;
use booklend_core::UserId;

/// Requester context for a request (verified identity + staff flag).
///
/// This is immutable and present for all authenticated routes.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RequesterContext {
    principal: Principal,
}

impl RequesterContext {
    pub fn new(principal: Principal) -> Self {
        Self { principal }
    }

    pub fn user_id(&self) -> UserId {
        self.principal.user_id
    }

    pub fn is_staff(&self) -> bool {
        self.principal.is_staff
    }

    pub fn principal(&self) -> &Principal {
        &self.principal
    }
}
