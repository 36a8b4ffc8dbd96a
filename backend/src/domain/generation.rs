//! Prompt construction for the two generation features.
//!
//! The domain decides what to ask; the outbound client decides how to send it.

use std::fmt;

use serde_json::{Value, json};

/// Which structured result a generation call should produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GenerationKind {
    /// Exercise and diet plan, returned inside a fenced JSON block.
    Fitness,
    /// Medication catalogue, returned as a bare JSON object.
    Medication,
}

impl GenerationKind {
    /// Short label used in logs and notices.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fitness => "fitness",
            Self::Medication => "medication",
        }
    }
}

impl fmt::Display for GenerationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Instruction and output constraints for one upstream call.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    prompt: String,
    response_schema: Option<Value>,
}

impl GenerationRequest {
    /// Build the request for `topic`, embedded verbatim.
    ///
    /// # Examples
    /// ```
    /// use carelink::domain::{GenerationKind, GenerationRequest};
    ///
    /// let request = GenerationRequest::for_topic("swimming", GenerationKind::Fitness);
    /// assert!(request.prompt().contains("'swimming'"));
    /// assert!(request.response_schema().is_none());
    /// ```
    pub fn for_topic(topic: &str, kind: GenerationKind) -> Self {
        match kind {
            GenerationKind::Fitness => Self {
                prompt: fitness_prompt(topic),
                response_schema: None,
            },
            GenerationKind::Medication => Self {
                prompt: medication_prompt(topic),
                response_schema: Some(medication_response_schema()),
            },
        }
    }

    /// Natural-language instruction.
    pub fn prompt(&self) -> &str {
        self.prompt.as_str()
    }

    /// Schema constraining a JSON response, when the kind requires one.
    pub fn response_schema(&self) -> Option<&Value> {
        self.response_schema.as_ref()
    }
}

fn fitness_prompt(topic: &str) -> String {
    format!(
        "Provide a detailed fitness plan for someone interested in '{topic}'.\n\
         The response must be a JSON object inside a single markdown code block. \
         The JSON object must have the following keys:\n\
         - \"exercises\": an array of up to 5 exercise names.\n\
         - \"daily_time\": a string indicating the total daily exercise time (e.g., \"30-45 minutes\").\n\
         - \"time_allocation\": a JSON object with exercise names as keys and their allocated time as values.\n\
         - \"calories_burned\": a string with the estimated daily calories burned.\n\
         - \"diet\": a string with dietary recommendations.\n"
    )
}

fn medication_prompt(topic: &str) -> String {
    format!(
        "Provide detailed medication information for the symptom '{topic}'. \
         Categorize them into 'Normal and Low Power Medicines' and \
         'Antibiotics or High Power Medicines'. The format should be a JSON object \
         with two keys, 'low_power_meds' and 'high_power_meds'. Each key should \
         contain a JSON array of objects, with each object having a 'name', 'image', \
         and 'info' key. Use placeholder URLs for images."
    )
}

fn medication_response_schema() -> Value {
    let entry = json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "name": { "type": "STRING" },
                "image": { "type": "STRING" },
                "info": { "type": "STRING" },
            },
        },
    });
    json!({
        "type": "OBJECT",
        "properties": {
            "low_power_meds": entry.clone(),
            "high_power_meds": entry,
        },
    })
}
