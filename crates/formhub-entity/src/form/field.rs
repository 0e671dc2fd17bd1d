//! Field value object embedded in a form.

use serde::{Deserialize, Serialize};

/// One input element of a form.
///
/// Fields are stored inline with their form as a JSON array. Field ids are
/// chosen by the form editor and are not checked for uniqueness.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// Editor-assigned field identifier; also the key used in responses.
    pub id: String,
    /// Input type, e.g. `"text"`, `"email"`, `"rating"`.
    #[serde(rename = "type")]
    pub field_type: String,
    /// Either a bubble (display) or an input category.
    pub category: String,
    /// Display content or label.
    #[serde(default)]
    pub content: String,
    /// Whether an answer is required.
    #[serde(default)]
    pub required: bool,
    /// Choices for select-style inputs.
    #[serde(default)]
    pub options: Vec<String>,
    /// Placeholder or help text.
    #[serde(default)]
    pub hint: String,
    /// Media URL for image/video/gif bubbles.
    #[serde(default)]
    pub url: String,
}
