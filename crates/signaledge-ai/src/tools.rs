//! Tool (function) declarations in the shape Gemini expects.

use crate::ToolDefinition;

/// Convert a tool definition into a Gemini `functionDeclarations` entry.
pub fn to_gemini_tool(tool: &ToolDefinition) -> serde_json::Value {
    serde_json::json!({
        "name": tool.name,
        "description": tool.description,
        "parameters": tool.parameters,
    })
}
