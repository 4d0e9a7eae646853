//! Response schema for match analysis.
//!
//! Uses Gemini's OpenAPI-subset schema dialect (upper-case type names).

use serde_json::json;

pub fn match_response_schema() -> serde_json::Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "matchedDesignId": {
                "type": "STRING",
                "description": "The id of the single design from the collection that best matches the buyer's request."
            },
            "justification": {
                "type": "STRING",
                "description": "Why this design is the best match for the request."
            },
            "platformRecommendations": {
                "type": "ARRAY",
                "description": "Two or three sales platforms suited to this buyer and design.",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "platformName": {
                            "type": "STRING",
                            "description": "Name of the e-commerce platform or sales channel."
                        },
                        "reason": {
                            "type": "STRING",
                            "description": "Why the platform suits this design."
                        }
                    },
                    "required": ["platformName", "reason"]
                }
            }
        },
        "required": ["matchedDesignId", "justification", "platformRecommendations"]
    })
}
