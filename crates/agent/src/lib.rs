//! The agent control loop — the heart of tidydesk.
//!
//! Each run follows a **Reason → Route → Act** cycle:
//!
//! 1. **Seed** the conversation with the user's request
//! 2. **Send to LLM** via the configured provider (full history every turn)
//! 3. **Route** on the reply's shape: tool calls or plain text
//! 4. **If tool calls**: execute them in order, append the results, loop
//! 5. **If plain text**: the run is done, return the reply
//!
//! The loop continues until the LLM replies without tool calls or the turn
//! cap is reached.

pub mod executor;
pub mod router;
pub mod runner;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use executor::execute_turn;
pub use router::{route, RouteDecision};
pub use runner::{AgentLoop, DEFAULT_MAX_TURNS};
