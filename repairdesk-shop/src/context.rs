//! Per-request caller information.

use uuid::Uuid;

/// Actor recorded when a request does not name one.
pub const SYSTEM_ACTOR: &str = "system";

/// Who is making a request, passed explicitly into service calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    /// Correlation id for logs.
    pub request_id: Uuid,
    /// Authenticated or self-declared caller, if any.
    pub actor: Option<String>,
}

impl RequestContext {
    /// Create a context. Blank actors are treated as absent.
    pub fn new(request_id: Uuid, actor: Option<String>) -> Self {
        let actor = actor
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty());
        Self { request_id, actor }
    }

    /// A context with a fresh request id and no actor.
    pub fn anonymous() -> Self {
        Self::new(Uuid::new_v4(), None)
    }

    /// A context with a fresh request id acting as `actor`.
    pub fn acting_as(actor: impl Into<String>) -> Self {
        Self::new(Uuid::new_v4(), Some(actor.into()))
    }

    /// The actor name to record on writes.
    pub fn actor_or_system(&self) -> &str {
        self.actor.as_deref().unwrap_or(SYSTEM_ACTOR)
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::anonymous()
    }
}
