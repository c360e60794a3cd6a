// ai/evaluator.rs
//
// Scores enriched properties against the client brief. Output is validated
// structurally before any of it is trusted; anything malformed fails the
// whole evaluation rather than passing through partially.

use super::gemini::{strip_json_fence, GeminiClient};
use crate::domain::requests::ClientSearchInput;
use crate::domain::types::EvaluatedProperty;
use crate::errors::ServerError;
use crate::fusion::EnrichedProperty;
use crate::ids::generate_id;
use serde_json::{json, Value};
use std::collections::HashMap;

const SYSTEM_PROMPT: &str = r#"You are a disciplined residential real-estate buyer's agent assistant.

Your job:
- Evaluate each property ONLY based on the provided structured data.
- Compare properties against the client's needs and notes.
- Score each property from 0 to 100 on suitability.
- Identify clear PROS and CONS for each property.
- Select ONLY the best properties ranked by score, with a maximum of 10.
- If fewer than 3 properties are reasonably suitable, return only those that are suitable; otherwise return your top 5-10.

Rules:
- Do NOT invent numbers (beds, baths, price, days on market). Use only the payload.
- Keep analysis concise, analytical, and internal-facing.
- These notes are NOT sent to the client.
- No marketing phrases, no hype, no emojis.

Output:
Return a single JSON object with this exact structure:
{
  "matches": [
    {
      "zillowUrl": "string",
      "score": number,
      "pros": ["string"],
      "cons": ["string"],
      "rationale": "string"
    }
  ]
}
No extra fields. No extra commentary outside the JSON."#;

#[derive(Debug)]
pub struct PropertyMatch {
    pub zillow_url: String,
    pub score: f64,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
    pub rationale: String,
}

/// Structural validation of the model's JSON: 1 to 10 matches, score in
/// 0..=100, at most 10 pros/cons each, rationale capped at 3000 chars.
pub fn parse_match_output(text: &str) -> Option<Vec<PropertyMatch>> {
    let parsed: Value = serde_json::from_str(strip_json_fence(text)).ok()?;
    let matches = parsed.get("matches")?.as_array()?;
    if matches.is_empty() || matches.len() > 10 {
        return None;
    }

    let mut out = Vec::with_capacity(matches.len());
    for entry in matches {
        let zillow_url = entry.get("zillowUrl")?.as_str()?.to_string();
        let score = entry.get("score")?.as_f64()?;
        if !(0.0..=100.0).contains(&score) {
            return None;
        }
        let pros = string_list(entry.get("pros")?)?;
        let cons = string_list(entry.get("cons")?)?;
        if pros.len() > 10 || cons.len() > 10 {
            return None;
        }
        let rationale = entry.get("rationale")?.as_str()?.to_string();
        if rationale.len() > 3000 {
            return None;
        }
        out.push(PropertyMatch {
            zillow_url,
            score,
            pros,
            cons,
            rationale,
        });
    }
    Some(out)
}

fn string_list(value: &Value) -> Option<Vec<String>> {
    value
        .as_array()?
        .iter()
        .map(|v| v.as_str().map(str::to_string))
        .collect()
}

pub fn evaluate_properties(
    gemini: &GeminiClient,
    input: &ClientSearchInput,
    enriched: &[EnrichedProperty],
) -> Result<Vec<EvaluatedProperty>, ServerError> {
    if enriched.is_empty() {
        return Err(ServerError::BadRequest(
            "No properties to evaluate.".to_string(),
        ));
    }

    let properties_for_llm: Vec<Value> = enriched
        .iter()
        .map(|p| {
            json!({
                "zillowUrl": p.zillow_url,
                "address": p.address,
                "price": p.price,
                "beds": p.beds,
                "baths": p.baths,
                "sqft": p.sqft,
                "daysOnMarket": p.days_on_market,
                "description": p.description,
            })
        })
        .collect();

    let user_prompt = format!(
        "Client:\n- Name: {}\n- Email: {}\n- Preferred location: {}\n- Needs and notes:\n{}\n\nProperties:\n{}",
        input.client_name,
        input.client_email,
        input.preferred_location,
        input.client_notes,
        serde_json::to_string_pretty(&properties_for_llm)
            .map_err(|_| ServerError::InternalError)?
    );

    let text = gemini
        .generate_json(SYSTEM_PROMPT, &user_prompt)
        .map_err(|e| ServerError::Upstream(e.to_string()))?;

    let matches = parse_match_output(&text).ok_or_else(|| {
        ServerError::Upstream("AI evaluation failed to return valid JSON.".to_string())
    })?;

    let by_url: HashMap<&str, &EnrichedProperty> = enriched
        .iter()
        .filter_map(|p| p.zillow_url.as_deref().map(|url| (url, p)))
        .collect();

    let mut evaluated = Vec::new();
    for m in matches {
        let Some(base) = by_url.get(m.zillow_url.as_str()) else {
            continue;
        };
        evaluated.push(EvaluatedProperty {
            id: generate_id(),
            zillow_url: base.zillow_url.clone(),
            address: base.address.clone(),
            city: base.city.clone(),
            state: base.state.clone(),
            zipcode: base.zipcode.clone(),
            photos: base.photos.clone(),
            price: base.price,
            beds: base.beds,
            baths: base.baths,
            sqft: base.sqft,
            lot_size_sqft: base.lot_size_sqft,
            days_on_market: base.days_on_market,
            year_built: base.year_built,
            zestimate: base.zestimate,
            description: base.description.clone(),
            nearby_schools: base.nearby_schools.clone(),
            ai_score: m.score,
            ai_pros: m.pros,
            ai_cons: m.cons,
            ai_rationale: m.rationale,
            detail: base.detail.clone(),
        });
    }

    if evaluated.is_empty() {
        return Err(ServerError::Upstream(
            "AI evaluation returned no usable matches.".to_string(),
        ));
    }

    Ok(evaluated)
}
