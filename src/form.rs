//! Prediction form inputs and their conversion into a request payload

use crate::types::PredictionRequest;
use std::str::FromStr;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum FormError {
    #[error("Invalid value for {field}: \"{raw}\"")]
    InvalidNumber { field: &'static str, raw: String },
}

/// Raw text of the prediction form, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PredictionForm {
    pub date: String,
    pub item_id: String,
    pub current_stock: String,
    pub rainfall_today: String,
    pub student_count: String,
    pub event_today: bool,
}

impl PredictionForm {
    /// Build the outgoing payload. Blank fields are left out; `event_today`
    /// is always present as 0 or 1.
    pub fn to_request(&self) -> Result<PredictionRequest, FormError> {
        Ok(PredictionRequest {
            date: non_empty(&self.date),
            item_id: non_empty(&self.item_id),
            current_stock: parse_optional("current_stock", &self.current_stock)?,
            rainfall_today: parse_finite("rainfall_today", &self.rainfall_today)?,
            student_count: parse_optional("student_count", &self.student_count)?,
            event_today: i64::from(self.event_today),
        })
    }
}

fn non_empty(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn parse_optional<T: FromStr>(field: &'static str, raw: &str) -> Result<Option<T>, FormError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed.parse().map(Some).map_err(|_| FormError::InvalidNumber {
        field,
        raw: raw.to_string(),
    })
}

/// JSON has no NaN or infinity; serde_json would write them as `null`.
fn parse_finite(field: &'static str, raw: &str) -> Result<Option<f64>, FormError> {
    match parse_optional::<f64>(field, raw)? {
        Some(value) if !value.is_finite() => Err(FormError::InvalidNumber {
            field,
            raw: raw.to_string(),
        }),
        parsed => Ok(parsed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_form() -> PredictionForm {
        PredictionForm {
            date: "2024-01-15".into(),
            item_id: "maggi".into(),
            ..Default::default()
        }
    }

    #[test]
    fn minimal_form_yields_three_keys() {
        let request = base_form().to_request().unwrap();
        let value = serde_json::to_value(&request).unwrap();
        let mut keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        assert_eq!(keys, vec!["date", "event_today", "item_id"]);
        assert_eq!(value["event_today"], 0);
    }

    #[test]
    fn numeric_fields_are_typed() {
        let form = PredictionForm {
            current_stock: "10".into(),
            rainfall_today: " 15.5 ".into(),
            student_count: "280".into(),
            event_today: true,
            ..base_form()
        };
        let value = serde_json::to_value(form.to_request().unwrap()).unwrap();
        assert_eq!(value["current_stock"], serde_json::json!(10));
        assert!(value["current_stock"].is_i64());
        assert_eq!(value["rainfall_today"], serde_json::json!(15.5));
        assert_eq!(value["student_count"], serde_json::json!(280));
        assert_eq!(value["event_today"], serde_json::json!(1));
    }

    #[test]
    fn blank_date_and_item_are_stripped() {
        let form = PredictionForm {
            date: "   ".into(),
            ..Default::default()
        };
        let request = form.to_request().unwrap();
        assert_eq!(request.date, None);
        assert_eq!(request.item_id, None);
    }

    #[test]
    fn unparseable_number_is_rejected() {
        let form = PredictionForm {
            student_count: "lots".into(),
            ..base_form()
        };
        let err = form.to_request().unwrap_err();
        assert_eq!(
            err,
            FormError::InvalidNumber {
                field: "student_count",
                raw: "lots".into()
            }
        );
        assert_eq!(err.to_string(), "Invalid value for student_count: \"lots\"");
    }

    #[test]
    fn non_finite_rainfall_is_rejected() {
        for raw in ["NaN", "inf", "-infinity"] {
            let form = PredictionForm {
                rainfall_today: raw.into(),
                ..base_form()
            };
            assert_eq!(
                form.to_request(),
                Err(FormError::InvalidNumber {
                    field: "rainfall_today",
                    raw: raw.into()
                }),
                "{raw} should not be accepted"
            );
        }
    }
}
