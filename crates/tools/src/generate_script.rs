//! Script generation tool — turn a plan into an executable bash script.
//!
//! Takes the target directory and a plan (explicit argument, or the one
//! drafted earlier in the conversation) and asks a model configured with
//! extended thinking to write the move script.

use async_trait::async_trait;
use std::sync::Arc;
use tidydesk_core::error::ToolError;
use tidydesk_core::message::Message;
use tidydesk_core::provider::{Provider, ProviderRequest};
use tidydesk_core::tool::{Tool, ToolContext, ToolResult};
use tracing::debug;

const SCRIPT_SYSTEM_PROMPT: &str = "You are an expert in generating code for automating \
directory restructuring tasks. Your job is to generate a complete, executable bash \
script that, given a base directory and a detailed organization plan, creates the new \
directory structure and moves the specified directories/files into their respective \
locations. The script must include error handling and clear comments explaining each \
step.";

/// Generate the reorganization script for a directory and plan.
pub struct ScriptGenerator {
    provider: Arc<dyn Provider>,
    model: String,
    max_tokens: u32,
}

impl ScriptGenerator {
    pub fn new(provider: Arc<dyn Provider>, model: impl Into<String>, max_tokens: u32) -> Self {
        Self {
            provider,
            model: model.into(),
            max_tokens,
        }
    }
}

#[async_trait]
impl Tool for ScriptGenerator {
    fn name(&self) -> &str {
        "generate_script"
    }

    fn description(&self) -> &str {
        "Generate a complete, runnable bash script that applies a reorganization plan to \
         a directory. Uses the most recently drafted plan unless one is passed explicitly; \
         draft a plan first if none exists."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "directory": {
                    "type": "string",
                    "description": "The base directory the script will reorganize"
                },
                "plan": {
                    "type": "string",
                    "description": "The organization plan to apply. Defaults to the most recently drafted plan."
                }
            },
            "required": ["directory"]
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Value,
        ctx: ToolContext<'_>,
    ) -> Result<ToolResult, ToolError> {
        let directory = arguments["directory"]
            .as_str()
            .ok_or_else(|| ToolError::InvalidArguments("Missing 'directory' argument".into()))?;

        // Explicit argument wins; otherwise fall back to the drafted plan
        let plan = match arguments["plan"].as_str().or(ctx.plan) {
            Some(plan) => plan.to_string(),
            None => {
                return Err(ToolError::MissingPlan(
                    "no plan has been drafted; call draft_plan first or pass one explicitly"
                        .into(),
                ));
            }
        };

        debug!(model = %self.model, directory = %directory, "Generating reorganization script");

        let prompt = format!(
            "Below is the base directory and the detailed organization plan:\n\n\
             Directory: {directory}\n\n\
             Organization Plan:\n{plan}\n\n\
             Please generate a complete bash script that automates the creation of the new \
             directories and moves existing folders/files as specified in the plan. Ensure \
             the script is ready to run and handles potential errors gracefully."
        );

        let request = ProviderRequest {
            model: self.model.clone(),
            messages: vec![Message::system(SCRIPT_SYSTEM_PROMPT), Message::user(prompt)],
            temperature: 0.7,
            max_tokens: Some(self.max_tokens),
            tools: vec![],
        };

        let response = self.provider.complete(request).await.map_err(|e| {
            ToolError::ExecutionFailed {
                tool_name: "generate_script".into(),
                reason: e.to_string(),
            }
        })?;

        Ok(ToolResult::success(response.message.content))
    }
}
