//! Request shaping and response validation for inventory analysis.
//!
//! Only a minimal projection of each item leaves the process, and the reply
//! is checked against the same schema the service was asked to follow.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Value as JsonValue, json};

use medswap_inventory::{Category, InventoryItem};

use crate::result::{AiError, AnalysisResult, RiskLevel};

pub const JSON_MIME_TYPE: &str = "application/json";

/// The fields of an item the analysis service is allowed to see.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemProjection {
    pub name: String,
    pub category: Category,
    pub expiry: NaiveDate,
    pub quantity: u32,
}

impl From<&InventoryItem> for ItemProjection {
    fn from(item: &InventoryItem) -> Self {
        Self {
            name: item.name.clone(),
            category: item.category,
            expiry: item.expiration_date,
            quantity: item.quantity,
        }
    }
}

pub fn project(items: &[InventoryItem]) -> Vec<ItemProjection> {
    items.iter().map(ItemProjection::from).collect()
}

/// Natural-language instruction with the projected inventory embedded.
pub fn build_prompt(items: &[InventoryItem]) -> Result<String, AiError> {
    let inventory = serde_json::to_string(&project(items))
        .map_err(|e| AiError::Internal(format!("failed to encode inventory: {e}")))?;

    Ok(format!(
        "You are a medical logistics analyst reviewing a hospital's surplus inventory.\n\
         Identify items at risk of expiring unused (waste risk) and opportunities to swap \
         them with other hospitals before they expire.\n\n\
         Inventory (JSON): {inventory}\n\n\
         Respond with an overall risk level (Low, Medium or High), an ordered list of \
         actionable swap or utilisation steps, and the estimated dollar amount saved by \
         swapping instead of wasting."
    ))
}

/// JSON schema the response must follow (Generative Language API dialect).
pub fn response_schema() -> JsonValue {
    json!({
        "type": "OBJECT",
        "properties": {
            "riskLevel": {
                "type": "STRING",
                "description": "Low, Medium, or High"
            },
            "recommendations": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "Actionable steps for swapping or utilization"
            },
            "potentialSavings": {
                "type": "STRING",
                "description": "Estimated dollar amount saved by swapping instead of wasting"
            }
        },
        "required": ["riskLevel", "recommendations", "potentialSavings"]
    })
}

/// One schema-constrained generation call.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub prompt: String,
    pub response_mime_type: &'static str,
    pub response_schema: JsonValue,
}

impl GenerationRequest {
    pub fn for_items(items: &[InventoryItem]) -> Result<Self, AiError> {
        Ok(Self {
            prompt: build_prompt(items)?,
            response_mime_type: JSON_MIME_TYPE,
            response_schema: response_schema(),
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireAnalysis {
    risk_level: String,
    recommendations: Vec<String>,
    potential_savings: String,
}

/// Validate the service's JSON text and convert it.
///
/// Missing or mistyped fields, non-objects and empty bodies are rejected.
pub fn parse_response(text: &str) -> Result<AnalysisResult, AiError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(AiError::EmptyResponse);
    }

    let wire: WireAnalysis =
        serde_json::from_str(text).map_err(|e| AiError::MalformedResponse(e.to_string()))?;

    Ok(AnalysisResult::generated(
        RiskLevel::coerce(&wire.risk_level),
        wire.recommendations,
        wire.potential_savings,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use medswap_inventory::seed;

    #[test]
    fn projection_drops_private_fields() {
        let items = seed::demo_items();
        let json = serde_json::to_value(project(&items[..1])).unwrap();
        assert_eq!(
            json,
            json!([{
                "name": "Amoxicillin 500mg Capsules",
                "category": "Medicine",
                "expiry": "2025-06-15",
                "quantity": 250
            }])
        );
    }

    #[test]
    fn prompt_embeds_projection_only() {
        let items = seed::demo_items();
        let prompt = build_prompt(&items).unwrap();
        assert!(prompt.contains("medical logistics analyst"));
        assert!(prompt.contains("\"name\":\"N95 Respirator Masks\""));
        assert!(!prompt.contains("item-1"));
        assert!(!prompt.contains("hosp-001"));
        assert!(!prompt.contains("Surplus stock from over-ordering"));
    }

    #[test]
    fn schema_requires_three_fields() {
        let schema = response_schema();
        assert_eq!(
            schema["required"],
            json!(["riskLevel", "recommendations", "potentialSavings"])
        );
        assert_eq!(schema["properties"]["recommendations"]["items"]["type"], "STRING");
    }

    #[test]
    fn well_formed_response_passes_through() {
        let result = parse_response(
            r#"{"riskLevel":"High","recommendations":["Swap amoxicillin","Donate masks"],"potentialSavings":"$12,400"}"#,
        )
        .unwrap();
        assert_eq!(result.risk_level, RiskLevel::High);
        assert_eq!(result.recommendations, vec!["Swap amoxicillin", "Donate masks"]);
        assert_eq!(result.potential_savings, "$12,400");
        assert!(!result.is_fallback());
    }

    #[test]
    fn unrecognised_risk_level_is_coerced() {
        let result =
            parse_response(r#"{"riskLevel":"Severe","recommendations":[],"potentialSavings":"$1"}"#)
                .unwrap();
        assert_eq!(result.risk_level, RiskLevel::Unknown);
    }

    #[test]
    fn rejects_empty_body() {
        assert!(matches!(parse_response("  "), Err(AiError::EmptyResponse)));
    }

    #[test]
    fn rejects_invalid_json() {
        assert!(matches!(parse_response("risk: high"), Err(AiError::MalformedResponse(_))));
        assert!(matches!(parse_response("[]"), Err(AiError::MalformedResponse(_))));
    }

    #[test]
    fn rejects_missing_or_mistyped_fields() {
        assert!(parse_response(r#"{"riskLevel":"Low","recommendations":[]}"#).is_err());
        assert!(parse_response(r#"{}"#).is_err());
        assert!(
            parse_response(r#"{"riskLevel":"Low","recommendations":"none","potentialSavings":"$0"}"#)
                .is_err()
        );
        assert!(
            parse_response(r#"{"riskLevel":"Low","recommendations":[1,2],"potentialSavings":"$0"}"#)
                .is_err()
        );
        assert!(
            parse_response(r#"{"riskLevel":null,"recommendations":[],"potentialSavings":"$0"}"#)
                .is_err()
        );
    }
}
