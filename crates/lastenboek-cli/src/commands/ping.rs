//! Ping command implementation.

use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use lastenboek_domain::traits::ExtractionModel;
use lastenboek_domain::{ModelRequest, ResponseMode};
use lastenboek_llm::OpenAiModel;

/// Execute the ping command.
pub fn execute_ping(config: &Config, formatter: &Formatter) -> Result<()> {
    let model = OpenAiModel::new(config.model_settings()?)?;

    let response = model.complete(&ping_request())?;
    let value: serde_json::Value = serde_json::from_str(&response.content).map_err(|e| {
        CliError::InvalidInput(format!("model did not answer with JSON: {}", e))
    })?;

    println!(
        "{}",
        formatter.success(&format!("{} answered {}", model.model_name(), value))
    );

    Ok(())
}

fn ping_request() -> ModelRequest {
    ModelRequest {
        system_prompt: "Return ONLY valid JSON.".to_string(),
        user_prompt: r#"Reply with {"ok": true}"#.to_string(),
        temperature: 0.0,
        max_output_tokens: 20,
        response_mode: ResponseMode::JsonObject,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ping_request_is_small_json_request() {
        let request = ping_request();
        assert_eq!(request.response_mode, ResponseMode::JsonObject);
        assert!(request.max_output_tokens <= 20);
        assert!(request.user_prompt.contains("ok"));
    }
}
