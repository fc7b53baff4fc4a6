//! Prompt and response schema for engineering-graphics solutions.

use serde_json::{Value, json};

pub const SYSTEM_INSTRUCTION: &str = "\
You are E-Genius, an assistant that solves Engineering Graphics problems for \
the KTU B.Tech syllabus. Reply with a single JSON object matching the schema.

explanation: an array of strings, one numbered construction step per entry \
(for example \"1. Draw the XY line.\"), in standard engineering terminology.

drawingSvg: one self-contained SVG of the finished drawing. Compute every \
length, angle and projection precisely before drawing. Follow BIS line \
conventions: thick continuous outlines, thin projection and dimension lines, \
faint construction lines, dashed hidden edges. Label all points, lines and \
reference planes (A, a, a', HP, VP, XY). Give the main element(s) created in \
explanation step N the id \"step-N\" (1-based), grouping with <g> where a step \
draws several shapes. Fit the viewBox tightly around the drawing with 10-20 \
units of padding on a white or transparent background.

youtubeUrl: the single most relevant tutorial video for the problem's core \
concept (projection of solids, isometric projection, development of \
surfaces, ...), preferring the 'engg tutor' channel.";

const PROBLEM_PREFIX: &str = "Solve the following engineering graphics problem:\n\n";

/// Text part wrapping the user's problem statement.
#[must_use]
pub fn problem_text(text: &str) -> String {
    format!("{PROBLEM_PREFIX}{text}")
}

/// Structured-output schema requiring all three solution fields.
#[must_use]
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "explanation": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "Ordered construction steps, one per entry."
            },
            "drawingSvg": {
                "type": "STRING",
                "description": "Self-contained SVG of the final drawing with step-N element ids."
            },
            "youtubeUrl": {
                "type": "STRING",
                "description": "A relevant YouTube tutorial URL."
            }
        },
        "required": ["explanation", "drawingSvg", "youtubeUrl"]
    })
}
