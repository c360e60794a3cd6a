// src/domain/requests.rs
//
// Validated request payloads. Validation happens at the edge; everything
// past a `validate()` call can trust the shape.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientSearchInput {
    pub client_name: String,
    pub client_email: String,
    pub preferred_location: String,
    pub client_notes: String,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

impl ClientSearchInput {
    pub fn validate(&self) -> Result<(), String> {
        if self.client_name.trim().is_empty() {
            return Err("Client name is required".into());
        }
        if !looks_like_email(&self.client_email) {
            return Err("Valid email required".into());
        }
        if self.preferred_location.trim().is_empty() {
            return Err("Preferred location is required".into());
        }
        if self.client_notes.trim().is_empty() {
            return Err("Please provide client notes".into());
        }
        if let (Some(min), Some(max)) = (self.min_price, self.max_price) {
            if max < min {
                return Err("Max price must be greater than or equal to min price".into());
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClientUpdateInput {
    pub name: String,
    pub email: String,
    pub notes: Option<String>,
}

impl ClientUpdateInput {
    /// Validate and return a whitespace-trimmed copy.
    pub fn validate(&self) -> Result<ClientUpdateInput, String> {
        if self.name.trim().is_empty() {
            return Err("Name is required".into());
        }
        if !looks_like_email(&self.email) {
            return Err("Valid email required".into());
        }
        Ok(ClientUpdateInput {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            notes: self.notes.as_deref().map(|n| n.trim().to_string()),
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectPropertiesInput {
    pub selected_property_ids: Vec<String>,
}

impl SelectPropertiesInput {
    pub fn validate(&self) -> Result<(), String> {
        if self.selected_property_ids.is_empty() {
            return Err("Select at least one property".into());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmailSendInput {
    pub to: String,
    pub cc: Option<String>,
    pub subject: String,
    pub body: String,
}

impl EmailSendInput {
    pub fn validate(&self) -> Result<(), String> {
        if !looks_like_email(&self.to) {
            return Err("Valid recipient email".into());
        }
        if self.subject.trim().len() < 5 {
            return Err("Subject must be at least 5 characters".into());
        }
        if self.body.trim().len() < 20 {
            return Err("Body must be at least 20 characters".into());
        }
        Ok(())
    }

    /// Split the free-text cc field into individual addresses.
    pub fn cc_list(&self) -> Vec<String> {
        self.cc
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Cheap plausibility check; real validation is the mail provider's job.
fn looks_like_email(raw: &str) -> bool {
    let raw = raw.trim();
    match raw.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn search_input() -> ClientSearchInput {
        ClientSearchInput {
            client_name: "Jane Buyer".into(),
            client_email: "jane@example.com".into(),
            preferred_location: "Pottsville, PA".into(),
            client_notes: "3 beds, quiet street".into(),
            min_price: None,
            max_price: None,
        }
    }

    #[test]
    fn accepts_valid_search_input() {
        assert!(search_input().validate().is_ok());
    }

    #[test]
    fn rejects_blank_name_and_bad_email() {
        let mut input = search_input();
        input.client_name = "  ".into();
        assert!(input.validate().is_err());

        let mut input = search_input();
        input.client_email = "not-an-email".into();
        assert!(input.validate().is_err());
    }

    #[test]
    fn rejects_inverted_price_range() {
        let mut input = search_input();
        input.min_price = Some(500_000.0);
        input.max_price = Some(300_000.0);
        assert!(input.validate().is_err());
    }

    #[test]
    fn equal_min_and_max_price_is_allowed() {
        let mut input = search_input();
        input.min_price = Some(400_000.0);
        input.max_price = Some(400_000.0);
        assert!(input.validate().is_ok());
    }

    #[test]
    fn cc_list_splits_and_trims() {
        let input = EmailSendInput {
            to: "a@b.com".into(),
            cc: Some(" x@y.com , , z@w.com ".into()),
            subject: "Homes for you".into(),
            body: "Here are some properties I think you will like.".into(),
        };
        assert_eq!(input.cc_list(), vec!["x@y.com", "z@w.com"]);
    }
}
