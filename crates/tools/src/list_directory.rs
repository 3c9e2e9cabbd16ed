//! Directory listing tool — render a directory tree as indented text.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tidydesk_core::error::ToolError;
use tidydesk_core::tool::{Tool, ToolContext, ToolResult};

const DEFAULT_MAX_DEPTH: u64 = 2;

/// List a directory as an indented text tree.
///
/// Output format: one entry per line, four spaces of indentation per
/// depth level, directories suffixed with `/`. Directories at the depth
/// limit are listed but not expanded. Unreadable subtrees render a single
/// `[access denied]` leaf and traversal continues with their siblings.
pub struct DirectoryLister;

impl DirectoryLister {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DirectoryLister {
    fn default() -> Self {
        Self::new()
    }
}

/// Append the tree rooted at `path` to `lines`, one line per entry.
/// Entries keep the order the OS returns them in.
fn render_tree(path: &Path, max_depth: u64, current_depth: u64, lines: &mut Vec<String>) {
    let indent = "    ".repeat((current_depth - 1) as usize);
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    lines.push(format!("{indent}{name}/"));

    let entries = match std::fs::read_dir(path) {
        Ok(entries) => entries,
        Err(_) => {
            lines.push(format!("{indent}    [access denied]"));
            return;
        }
    };

    for entry in entries.flatten() {
        let entry_path = entry.path();
        let entry_name = entry.file_name().to_string_lossy().into_owned();
        if entry_path.is_dir() {
            if current_depth >= max_depth {
                lines.push(format!("{indent}    {entry_name}/"));
            } else {
                render_tree(&entry_path, max_depth, current_depth + 1, lines);
            }
        } else {
            lines.push(format!("{indent}    {entry_name}"));
        }
    }
}

#[async_trait]
impl Tool for DirectoryLister {
    fn name(&self) -> &str {
        "list_directory"
    }

    fn description(&self) -> &str {
        "Recursively list a directory and return an indented text tree of its contents. \
         Directories end with '/'. Directories below the depth limit are listed but not expanded."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "path": {
                    "type": "string",
                    "description": "The directory to list"
                },
                "max_depth": {
                    "type": "integer",
                    "minimum": 1,
                    "description": "How many levels to expand (default 2)"
                }
            },
            "required": ["path"]
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Value,
        _ctx: ToolContext<'_>,
    ) -> Result<ToolResult, ToolError> {
        let path = arguments["path"]
            .as_str()
            .ok_or_else(|| ToolError::InvalidArguments("Missing 'path' argument".into()))?;
        let max_depth = arguments["max_depth"]
            .as_u64()
            .unwrap_or(DEFAULT_MAX_DEPTH)
            .max(1);

        let root = PathBuf::from(path);
        let rendered = tokio::task::spawn_blocking(move || {
            if !root.exists() {
                return Err(format!(
                    "Failed to list directory: {} does not exist",
                    root.display()
                ));
            }
            if !root.is_dir() {
                return Err(format!(
                    "Failed to list directory: {} is not a directory",
                    root.display()
                ));
            }
            let mut lines = Vec::new();
            render_tree(&root, max_depth, 1, &mut lines);
            Ok(lines.join("\n"))
        })
        .await
        .map_err(|e| ToolError::ExecutionFailed {
            tool_name: "list_directory".into(),
            reason: e.to_string(),
        })?;

        match rendered {
            Ok(tree) => Ok(ToolResult::success(tree)),
            Err(message) => Ok(ToolResult::failure(message)),
        }
    }
}
