// ai/composer.rs
//
// Drafts the client-facing email for the agent's selected properties. The
// agent reviews and edits the draft before anything is sent.

use super::gemini::{strip_json_fence, GeminiClient};
use crate::domain::types::{Client, EvaluatedProperty, SearchSession};
use crate::errors::ServerError;
use serde_json::{json, Value};

const SYSTEM_PROMPT: &str = r#"You are a professional real estate agent writing an email to a buyer client.

Your task:
- Write a single coherent email presenting several property options.
- Briefly restate the client's key preferences.
- For each selected property:
  - Give a short heading (address or "Property 1: [address]").
  - Mention the key specs: price, beds, baths, and any standout features or notes.
  - Explain in 2-4 sentences why it might fit the client's needs.
- Keep tone professional, helpful, and concise.
- Do not include internal risk analysis or model uncertainty.
- End the email with the provided agent signature.

Formatting:
- Use short paragraphs and clear section breaks between properties.
- This email is plain text (no HTML tags, no markdown).
- No emojis, no exaggerated marketing language.

You must return a single JSON object with:
{
  "subject": "string",
  "body": "string"
}
No extra fields. No commentary outside JSON."#;

#[derive(Debug, Clone, PartialEq)]
pub struct EmailDraft {
    pub subject: String,
    pub body: String,
}

/// Bounds mirror what a reasonable transactional mail accepts: subject
/// 5..=200 chars, body 50..=10000.
pub fn parse_email_draft(text: &str) -> Option<EmailDraft> {
    let parsed: Value = serde_json::from_str(strip_json_fence(text)).ok()?;
    let subject = parsed.get("subject")?.as_str()?.to_string();
    let body = parsed.get("body")?.as_str()?.to_string();
    if !(5..=200).contains(&subject.len()) || !(50..=10_000).contains(&body.len()) {
        return None;
    }
    Some(EmailDraft { subject, body })
}

/// The model is told to end with the signature but does not always comply.
pub fn ensure_signature(mut draft: EmailDraft, signature: &str) -> EmailDraft {
    if !draft.body.contains(signature) {
        draft.body = format!("{}\n\n{}", draft.body, signature);
    }
    draft
}

pub fn draft_email_for_selection(
    gemini: &GeminiClient,
    client: &Client,
    session: &SearchSession,
    selected: &[EvaluatedProperty],
    signature: &str,
) -> Result<EmailDraft, ServerError> {
    let properties_for_llm: Vec<Value> = selected
        .iter()
        .enumerate()
        .map(|(idx, p)| {
            json!({
                "label": format!("Property {}", idx + 1),
                "address": p.address,
                "city": p.city,
                "state": p.state,
                "zipcode": p.zipcode,
                "price": p.price,
                "beds": p.beds,
                "baths": p.baths,
                "sqft": p.sqft,
                "rationale": p.ai_rationale,
            })
        })
        .collect();

    let user_prompt = format!(
        "Client:\n- Name: {}\n- Email: {}\n- Preferred location: {}\n- Needs and notes:\n{}\n\nSelected properties:\n{}\n\nAgent signature to append at the end:\n\"\"\"\n{}\n\"\"\"",
        client.name,
        client.email,
        session.preferred_location,
        session.client_notes,
        serde_json::to_string_pretty(&properties_for_llm)
            .map_err(|_| ServerError::InternalError)?,
        signature
    );

    let text = gemini
        .generate_json(SYSTEM_PROMPT, &user_prompt)
        .map_err(|e| ServerError::Upstream(e.to_string()))?;

    let draft = parse_email_draft(&text).ok_or_else(|| {
        ServerError::Upstream("Email draft generation returned invalid JSON.".to_string())
    })?;

    Ok(ensure_signature(draft, signature))
}
