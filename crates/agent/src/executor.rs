//! Tool execution pass — runs one turn's worth of requested tool calls.

use std::time::Instant;

use chrono::Utc;
use tidydesk_core::event::{DomainEvent, EventBus};
use tidydesk_core::message::{Conversation, Message, MessageToolCall};
use tidydesk_core::tool::{ToolCall, ToolContext, ToolRegistry};
use tracing::{debug, warn};

/// Execute a turn's tool calls in their original order.
///
/// Appends exactly one tool result message per call, tagged with the call's
/// id, whatever happens inside the tool: unknown names and execution faults
/// become error-text results the model can read and recover from. A plan
/// update carried in a result is written to the conversation before the
/// result message is appended, so a later call in the same turn reads the
/// fresh plan.
pub async fn execute_turn(
    registry: &ToolRegistry,
    conversation: &mut Conversation,
    calls: &[MessageToolCall],
    bus: &EventBus,
) {
    for tc in calls {
        let call = ToolCall {
            id: tc.id.clone(),
            name: tc.name.clone(),
            arguments: serde_json::from_str(&tc.arguments).unwrap_or_default(),
        };

        debug!(tool = %tc.name, call_id = %tc.id, "Executing tool call");

        let start = Instant::now();
        let result = registry.execute(&call, ToolContext::of(conversation)).await;
        let duration_ms = start.elapsed().as_millis() as u64;

        match result {
            Ok(tool_result) => {
                bus.publish(DomainEvent::ToolExecuted {
                    tool_name: tc.name.clone(),
                    success: tool_result.success,
                    duration_ms,
                    timestamp: Utc::now(),
                });

                if let Some(plan) = tool_result.plan {
                    bus.publish(DomainEvent::PlanRecorded {
                        plan_chars: plan.len(),
                        timestamp: Utc::now(),
                    });
                    conversation.set_plan(plan);
                }

                conversation.push(Message::tool_result(&tc.id, &tool_result.output));
            }
            Err(e) => {
                warn!(tool = %tc.name, error = %e, "Tool execution failed");

                bus.publish(DomainEvent::ToolExecuted {
                    tool_name: tc.name.clone(),
                    success: false,
                    duration_ms,
                    timestamp: Utc::now(),
                });

                // Report the error to the LLM so it can recover
                conversation.push(Message::tool_result(&tc.id, &format!("Error: {e}")));
            }
        }
    }
}
