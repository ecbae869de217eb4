/// Planning instructions sent as the system prompt, ahead of the catalog.
///
/// The producer is asked for the exact document shape the parser consumes:
/// `FAILURE`/`REASON`/`STEPS` plus one entry per 1-based step index, with
/// references tagged as `{"ref": "<step><letter>"}` so literals that merely
/// look like references stay unambiguous.
pub const PLANNING_GUIDE: &str = "\
Create a plan to accomplish the user's objective using only the available tools.

Respond with a single JSON object and nothing else. The object must contain:
- \"FAILURE\": false, or true if the available tools cannot accomplish the objective
- \"REASON\": when FAILURE is true, a short explanation of what is missing
- \"STEPS\": the number of steps
- one entry per step, keyed \"1\", \"2\", ... in execution order

Each step entry must contain:
- \"TOOL_NAME\": one of the available tool names
- one field per tool input parameter, keyed by the parameter name
- \"OUTPUTS\": an object mapping each tool output letter to a short description

To pass an earlier step's output as an input, use a tagged reference such as
{\"ref\": \"1B\"} for step 1's output B. References may only point to earlier
steps. Plain strings are always taken literally.

The final step should present the result to the user with the to_user tool.
";

/// Assemble the full system prompt handed to the producer backend.
pub fn build_system_prompt(catalog: &str) -> String {
    format!("{PLANNING_GUIDE}\n{catalog}")
}

/// Strip the code fences producers tend to wrap around JSON payloads.
///
/// This lives on the producer side of the boundary: the core parser's input
/// contract begins at "already-structured document".
pub fn extract_plan_payload(raw: &str) -> &str {
    let trimmed = raw.trim();

    let Some(open) = trimmed.find("```") else {
        return trimmed;
    };
    let after_fence = &trimmed[open + 3..];

    // Drop an optional language tag on the opening fence line.
    let body = match after_fence.find('\n') {
        Some(newline) => &after_fence[newline + 1..],
        None => after_fence,
    };

    match body.find("```") {
        Some(close) => body[..close].trim(),
        None => body.trim(),
    }
}
