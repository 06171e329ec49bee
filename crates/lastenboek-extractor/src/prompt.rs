//! LLM prompt engineering for lastenboek field extraction

/// Instruction for the system role
pub const SYSTEM_PROMPT: &str = "You are an information extraction assistant for Dutch construction specification documents \
(\"lastenboeken\"). Return ONLY valid JSON. No markdown, no explanation.";

/// Target fields with the one-line description given to the model
const FIELD_DESCRIPTIONS: [(&str, &str); 4] = [
    ("architect", "the architect of the project"),
    ("client", "the opdrachtgever / bouwheer (the party commissioning the work)"),
    (
        "date",
        "the document/project date in ISO format YYYY-MM-DD if possible, else null",
    ),
    ("address", "the project address"),
];

const OUTPUT_FORMAT: &str = r#"Return exactly this JSON structure:
{
  "architect": string|null,
  "client": string|null,
  "date": string|null,
  "address": string|null,
  "extractionConfidence": number
}
Use null for any field that cannot be found; never omit a key and never add other keys.
extractionConfidence is your confidence in the extraction as a number between 0 and 1."#;

/// Builds the user prompt for one document
pub struct PromptBuilder<'a> {
    text: &'a str,
}

impl<'a> PromptBuilder<'a> {
    /// Create a new prompt builder for the given document text
    pub fn new(text: &'a str) -> Self {
        Self { text }
    }

    /// Build the complete user prompt
    pub fn build(&self) -> String {
        let mut prompt = String::new();

        // 1. Field list
        prompt.push_str("Extract the following fields from the document text:\n");
        for (name, description) in FIELD_DESCRIPTIONS {
            prompt.push_str(&format!("- {}: {}\n", name, description));
        }
        prompt.push('\n');

        // 2. Output shape
        prompt.push_str(OUTPUT_FORMAT);
        prompt.push_str("\n\n");

        // 3. The document
        prompt.push_str("Document text:\n");
        prompt.push_str(self.text);

        prompt
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lastenboek_domain::FIELD_NAMES;

    #[test]
    fn test_system_prompt_is_narrow() {
        assert!(SYSTEM_PROMPT.contains("lastenboeken"));
        assert!(SYSTEM_PROMPT.contains("ONLY valid JSON"));
        assert!(SYSTEM_PROMPT.contains("No markdown"));
    }

    #[test]
    fn test_prompt_names_every_field() {
        let prompt = PromptBuilder::new("text").build();
        for name in FIELD_NAMES {
            assert!(prompt.contains(&format!("\"{}\"", name)), "missing {}", name);
        }
        assert!(prompt.contains("- client: the opdrachtgever / bouwheer"));
        assert!(prompt.contains("YYYY-MM-DD"));
    }

    #[test]
    fn test_prompt_requires_nulls() {
        let prompt = PromptBuilder::new("text").build();
        assert!(prompt.contains("string|null"));
        assert!(prompt.contains("Use null for any field that cannot be found"));
    }

    #[test]
    fn test_prompt_ends_with_document_text() {
        let text = "--- PAGE 1 ---\nArchitect: Jane Doe";
        let prompt = PromptBuilder::new(text).build();
        assert!(prompt.ends_with(&format!("Document text:\n{}", text)));
    }

    #[test]
    fn test_prompt_with_empty_text() {
        let prompt = PromptBuilder::new("").build();
        assert!(prompt.ends_with("Document text:\n"));
    }
}
