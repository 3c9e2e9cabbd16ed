//! Tool trait — the abstraction over agent capabilities.
//!
//! Tools are what let the agent inspect and reshape a directory:
//! list a tree, draft a reorganization plan, generate the move script.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use crate::error::ToolError;
use crate::message::{Conversation, Message};
use crate::provider::ToolDefinition;

/// A request to execute a tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    /// Unique call ID (matches the LLM's tool_call.id)
    pub id: String,

    /// Name of the tool to execute
    pub name: String,

    /// Arguments as a JSON value
    pub arguments: serde_json::Value,
}

/// The result of a tool execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    /// The call ID this result is for
    pub call_id: String,

    /// Whether the tool executed successfully
    pub success: bool,

    /// The output content
    pub output: String,

    /// A plan update for the conversation, if this tool drafted one.
    /// Only the plan-drafting tool sets this; the executor applies it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan: Option<String>,
}

impl ToolResult {
    /// A successful result. The registry fills in the call ID.
    pub fn success(output: impl Into<String>) -> Self {
        Self {
            call_id: String::new(),
            success: true,
            output: output.into(),
            plan: None,
        }
    }

    /// A failed result whose output describes what went wrong.
    pub fn failure(output: impl Into<String>) -> Self {
        Self {
            call_id: String::new(),
            success: false,
            output: output.into(),
            plan: None,
        }
    }

    /// Attach a plan update for the executor to record.
    pub fn with_plan(mut self, plan: impl Into<String>) -> Self {
        self.plan = Some(plan.into());
        self
    }
}

/// Read-only view of conversation state handed to tools.
///
/// Tools never hold a mutable reference to the conversation; anything they
/// want written back travels in the [`ToolResult`].
#[derive(Debug, Clone, Copy)]
pub struct ToolContext<'a> {
    /// The conversation so far, oldest first.
    pub history: &'a [Message],

    /// The reorganization plan drafted earlier in the run, if any.
    pub plan: Option<&'a str>,
}

impl<'a> ToolContext<'a> {
    pub fn new(history: &'a [Message], plan: Option<&'a str>) -> Self {
        Self { history, plan }
    }

    /// Snapshot the relevant parts of a conversation.
    pub fn of(conversation: &'a Conversation) -> Self {
        Self {
            history: &conversation.messages,
            plan: conversation.plan.as_deref(),
        }
    }
}

/// The core Tool trait.
///
/// Each capability (list_directory, draft_plan, generate_script) implements
/// this trait. Tools are registered in the ToolRegistry and made available
/// to the control loop. Each tool validates its own arguments.
#[async_trait]
pub trait Tool: Send + Sync {
    /// The unique name of this tool (e.g., "list_directory").
    fn name(&self) -> &str;

    /// A description of what this tool does (sent to the LLM).
    fn description(&self) -> &str;

    /// JSON Schema describing this tool's parameters.
    fn parameters_schema(&self) -> serde_json::Value;

    /// Execute the tool with the given arguments and a read-only view
    /// of the conversation.
    async fn execute(
        &self,
        arguments: serde_json::Value,
        ctx: ToolContext<'_>,
    ) -> std::result::Result<ToolResult, ToolError>;

    /// Convert this tool into a ToolDefinition for sending to the LLM.
    fn to_definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name().to_string(),
            description: self.description().to_string(),
            parameters: self.parameters_schema(),
        }
    }
}

/// A registry of available tools.
///
/// Registered once at startup and immutable afterwards. The control loop
/// uses it to:
/// 1. Get tool definitions to send to the LLM
/// 2. Look up and execute tools when the LLM requests them
pub struct ToolRegistry {
    tools: HashMap<String, Box<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Register a tool. Replaces any existing tool with the same name.
    pub fn register(&mut self, tool: Box<dyn Tool>) {
        let name = tool.name().to_string();
        self.tools.insert(name, tool);
    }

    /// Get a tool by name.
    pub fn get(&self, name: &str) -> Option<&dyn Tool> {
        self.tools.get(name).map(|t| t.as_ref())
    }

    /// Get all tool definitions (for sending to the LLM).
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools.values().map(|t| t.to_definition()).collect()
    }

    /// Execute a tool call. The returned result is tagged with the call's ID.
    pub async fn execute(
        &self,
        call: &ToolCall,
        ctx: ToolContext<'_>,
    ) -> std::result::Result<ToolResult, ToolError> {
        let tool = self
            .tools
            .get(&call.name)
            .ok_or_else(|| ToolError::NotFound(call.name.clone()))?;
        let mut result = tool.execute(call.arguments.clone(), ctx).await?;
        result.call_id = call.id.clone();
        Ok(result)
    }

    /// List all registered tool names.
    pub fn names(&self) -> Vec<&str> {
        self.tools.keys().map(|s| s.as_str()).collect()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
