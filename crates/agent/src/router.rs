//! Routing — decide whether a model response continues the loop.

use tidydesk_core::Message;

/// Where the loop goes after a model response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    /// The response requests tools; execute them and loop.
    Continue,
    /// The response is a plain reply; the run is done.
    Terminate,
}

/// Inspect the latest assistant message and pick a branch.
///
/// The decision depends only on the shape of the message: any tool calls
/// mean another round of execution, none means the model considers the
/// request answered. The reply text itself is never inspected.
pub fn route(message: &Message) -> RouteDecision {
    if message.requests_tools() {
        RouteDecision::Continue
    } else {
        RouteDecision::Terminate
    }
}
