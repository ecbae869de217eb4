mod openai;
mod prompt;
mod traits;

pub use openai::OpenAiProducer;
pub use prompt::{PLANNING_GUIDE, build_system_prompt, extract_plan_payload};
pub use traits::PlanProducer;

use crate::error::ProducerError;
use serde_json::Value;

/// Ask a producer for a plan and turn its raw text into a structured
/// document ready for the core parser.
pub async fn produce_plan_document(
    producer: &dyn PlanProducer,
    objective: &str,
    catalog: &str,
) -> Result<Value, ProducerError> {
    let raw = producer
        .produce(objective, catalog)
        .await
        .map_err(|e| ProducerError::Request {
            producer: producer.name().to_string(),
            message: e.to_string(),
        })?;

    parse_plan_payload(&raw)
}

/// Strip fences and parse the producer's payload as JSON.
pub fn parse_plan_payload(raw: &str) -> Result<Value, ProducerError> {
    let payload = extract_plan_payload(raw);
    serde_json::from_str(payload)
        .map_err(|e| ProducerError::Payload(format!("{e} in payload {payload:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_fenced_payload() {
        let raw = "```json\n{\"FAILURE\": false, \"STEPS\": 0}\n```";
        assert_eq!(
            parse_plan_payload(raw).unwrap(),
            json!({"FAILURE": false, "STEPS": 0})
        );
    }

    #[test]
    fn unparseable_payload_names_the_problem() {
        let err = parse_plan_payload("I could not plan anything, sorry!").unwrap_err();
        assert!(matches!(err, ProducerError::Payload(_)));
    }
}
