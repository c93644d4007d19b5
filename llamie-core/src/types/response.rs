//! Handler chain result type.

/// Handler result for the chain. `Reply(text)` carries the generated reply so later handlers can
/// see it in `after()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerResponse {
    /// Pass to next handler.
    Continue,
    /// Stop the chain; no reply body.
    Stop,
    /// Stop the chain and attach the reply text.
    Reply(String),
}

impl HandlerResponse {
    /// True for Stop and Reply.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, HandlerResponse::Continue)
    }

    /// Short name for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            HandlerResponse::Continue => "Continue",
            HandlerResponse::Stop => "Stop",
            HandlerResponse::Reply(_) => "Reply",
        }
    }
}
