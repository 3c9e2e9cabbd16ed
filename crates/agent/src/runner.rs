//! The agent control loop implementation.

use std::sync::Arc;

use chrono::Utc;
use tidydesk_core::event::{DomainEvent, EventBus};
use tidydesk_core::message::{Conversation, Message};
use tidydesk_core::provider::{Provider, ProviderRequest};
use tidydesk_core::tool::ToolRegistry;
use tracing::{debug, info, warn};

use crate::executor::execute_turn;
use crate::router::{route, RouteDecision};

/// Default cap on reasoning turns per run.
pub const DEFAULT_MAX_TURNS: u32 = 24;

const TURN_LIMIT_REPLY: &str =
    "I've reached the turn limit for this run without arriving at a final answer. \
     Please narrow the request and try again.";

/// The control loop that alternates model calls with tool execution.
///
/// Owns the run: it seeds the provider with the conversation each turn,
/// routes on the shape of the reply, hands requested tool calls to the
/// executor, and stops when the model answers in plain text (or the turn
/// cap trips).
pub struct AgentLoop {
    /// The LLM provider to use
    provider: Arc<dyn Provider>,

    /// The model driving the loop
    model: String,

    /// Temperature setting
    temperature: f32,

    /// Default max tokens per response
    max_tokens: Option<u32>,

    /// Tool registry
    tools: Arc<ToolRegistry>,

    /// Optional system prompt, sent with every request but never stored
    /// in the conversation history
    system_prompt: Option<String>,

    /// Maximum reasoning turns per run
    max_turns: u32,

    /// Event bus for domain events
    event_bus: Arc<EventBus>,
}

impl AgentLoop {
    /// Create a new control loop.
    pub fn new(
        provider: Arc<dyn Provider>,
        model: impl Into<String>,
        temperature: f32,
        tools: Arc<ToolRegistry>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            provider,
            model: model.into(),
            temperature,
            max_tokens: None,
            tools,
            system_prompt: None,
            max_turns: DEFAULT_MAX_TURNS,
            event_bus,
        }
    }

    /// Set the maximum number of reasoning turns per run.
    pub fn with_max_turns(mut self, max: u32) -> Self {
        self.max_turns = max;
        self
    }

    /// Set the default max tokens per LLM response.
    pub fn with_max_tokens(mut self, max: u32) -> Self {
        self.max_tokens = Some(max);
        self
    }

    /// Set a system prompt to send with every request.
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    /// Drive a conversation to a final reply.
    ///
    /// Each turn sends the full history to the model. A reply with tool
    /// calls is appended and its calls executed; a plain reply ends the run
    /// and is returned. Provider failures abort the run as `Err` — they are
    /// never converted into a reply.
    pub async fn run(
        &self,
        conversation: &mut Conversation,
    ) -> Result<String, tidydesk_core::Error> {
        info!(
            conversation_id = %conversation.id,
            messages = conversation.messages.len(),
            "Starting organizing run"
        );

        self.event_bus.publish(DomainEvent::RunStarted {
            conversation_id: conversation.id.to_string(),
            timestamp: Utc::now(),
        });

        let tool_definitions = self.tools.definitions();
        let mut turn = 0;

        loop {
            turn += 1;

            if turn > self.max_turns {
                warn!(
                    conversation_id = %conversation.id,
                    turns = self.max_turns,
                    "Turn limit reached, forcing a final reply"
                );
                break;
            }

            debug!(
                conversation_id = %conversation.id,
                turn = turn,
                "Control loop turn"
            );

            // The system prompt is request-scoped: prepended here, never
            // pushed into the history.
            let mut messages = Vec::with_capacity(conversation.messages.len() + 1);
            if let Some(prompt) = &self.system_prompt {
                messages.push(Message::system(prompt));
            }
            messages.extend(conversation.messages.iter().cloned());

            let request = ProviderRequest {
                model: self.model.clone(),
                messages,
                temperature: self.temperature,
                max_tokens: self.max_tokens,
                tools: tool_definitions.clone(),
            };

            let response = self.provider.complete(request).await?;

            if let Some(usage) = &response.usage {
                self.event_bus.publish(DomainEvent::ResponseGenerated {
                    conversation_id: conversation.id.to_string(),
                    model: response.model.clone(),
                    tokens_used: usage.total_tokens,
                    requested_tools: response.message.tool_calls.len(),
                    timestamp: Utc::now(),
                });
            }

            match route(&response.message) {
                RouteDecision::Terminate => {
                    let reply = response.message.content.clone();
                    conversation.push(response.message);

                    self.event_bus.publish(DomainEvent::RunCompleted {
                        conversation_id: conversation.id.to_string(),
                        turns: turn,
                        timestamp: Utc::now(),
                    });

                    return Ok(reply);
                }
                RouteDecision::Continue => {
                    debug!(
                        tool_count = response.message.tool_calls.len(),
                        "Executing tool calls"
                    );

                    let tool_calls = response.message.tool_calls.clone();
                    conversation.push(response.message);

                    execute_turn(&self.tools, conversation, &tool_calls, &self.event_bus).await;
                }
            }
        }

        // Turn cap tripped: end with an explanatory reply instead of
        // spinning on tool calls forever
        self.event_bus.publish(DomainEvent::RunCompleted {
            conversation_id: conversation.id.to_string(),
            turns: self.max_turns,
            timestamp: Utc::now(),
        });

        Ok(TURN_LIMIT_REPLY.into())
    }
}
