//! Plan drafting tool — turn the conversation into a reorganization plan.
//!
//! Reads the whole conversation so far (directory listings included),
//! asks a model to produce a structured plan, and hands the plan back to
//! the executor so it lands on the conversation state.

use async_trait::async_trait;
use std::sync::Arc;
use tidydesk_core::error::ToolError;
use tidydesk_core::message::{Message, Role};
use tidydesk_core::provider::{Provider, ProviderRequest};
use tidydesk_core::tool::{Tool, ToolContext, ToolResult};
use tracing::debug;

const PLANNER_SYSTEM_PROMPT: &str = "You are an expert in organizing file systems and \
automating directory restructuring. Your task is to analyze a detailed description of \
current desktop directories and files, and then produce a comprehensive, structured \
organization plan. The plan should clearly map each folder to a specific category, \
provide a precise new directory structure (including categories and subcategories such \
as 'Projects', 'Research & Data', 'Personal Documents', etc.), and list the specific \
actions needed (like creating new directories and moving existing ones). Your output \
should be detailed enough to directly inform an automated tool for directory creation \
and file movement, and include any recommendations for further improvements (such as \
archiving or cleanup scripts).";

/// Draft a reorganization plan from the conversation so far.
pub struct PlanDrafter {
    provider: Arc<dyn Provider>,
    model: String,
    max_tokens: u32,
}

impl PlanDrafter {
    pub fn new(provider: Arc<dyn Provider>, model: impl Into<String>, max_tokens: u32) -> Self {
        Self {
            provider,
            model: model.into(),
            max_tokens,
        }
    }

    /// Flatten the conversation into a labeled transcript for the planner.
    fn render_transcript(history: &[Message]) -> String {
        let mut out = String::new();
        for msg in history {
            let label = match msg.role {
                Role::User => "User",
                Role::Assistant => "Assistant",
                Role::Tool => "Tool result",
                Role::System => continue,
            };
            if msg.content.is_empty() {
                continue;
            }
            out.push_str(label);
            out.push_str(": ");
            out.push_str(&msg.content);
            out.push_str("\n\n");
        }
        out.trim_end().to_string()
    }
}

#[async_trait]
impl Tool for PlanDrafter {
    fn name(&self) -> &str {
        "draft_plan"
    }

    fn description(&self) -> &str {
        "Draft a structured reorganization plan for the directories discussed so far. \
         Reviews the whole conversation, including directory listings, and maps each \
         folder to a new location. The drafted plan is remembered for later tools."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "notes": {
                    "type": "string",
                    "description": "Extra instructions to take into account when planning"
                }
            }
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Value,
        ctx: ToolContext<'_>,
    ) -> Result<ToolResult, ToolError> {
        let transcript = Self::render_transcript(ctx.history);

        let mut prompt = format!(
            "Below is the conversation so far about the desktop directories and files:\n\n\
             {transcript}\n\n"
        );
        if let Some(notes) = arguments["notes"].as_str() {
            prompt.push_str(&format!("Additional instructions: {notes}\n\n"));
        }
        prompt.push_str(
            "Based on this, generate a detailed organization plan that clearly specifies:\n\
             - The proposed new directory structure with clear categories and subcategories\n\
             - The mapping of each existing folder to its designated new location\n\
             - A list of actions required to create the new folders and move the existing entries\n\
             - Any additional recommendations for improving the overall organization and \
             maintenance of the desktop files\n\
             Ensure that your plan is structured, clear, and comprehensive, so it can be used \
             as a direct guide for automating the directory reorganization process.",
        );

        debug!(model = %self.model, history_len = ctx.history.len(), "Drafting reorganization plan");

        let request = ProviderRequest {
            model: self.model.clone(),
            messages: vec![Message::system(PLANNER_SYSTEM_PROMPT), Message::user(prompt)],
            temperature: 0.7,
            max_tokens: Some(self.max_tokens),
            tools: vec![],
        };

        let response = self.provider.complete(request).await.map_err(|e| {
            ToolError::ExecutionFailed {
                tool_name: "draft_plan".into(),
                reason: e.to_string(),
            }
        })?;

        let plan = response.message.content;
        Ok(ToolResult::success(plan.clone()).with_plan(plan))
    }
}
