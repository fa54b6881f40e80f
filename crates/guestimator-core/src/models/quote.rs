use serde::{Deserialize, Serialize};

/// Success body returned by the quoting service.
///
/// Both parts are optional; a missing echo or price is rendered, not treated as an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    #[serde(default)]
    pub form_data: Option<FormDataEcho>,
    #[serde(default)]
    pub base_price: Option<serde_json::Value>,
}

/// Form fields as echoed back by the service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormDataEcho {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub number: Option<String>,
    #[serde(default)]
    pub vehicle_type: Option<String>,
}

/// Failure body returned by the quoting service.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServerErrorBody {
    #[serde(default)]
    pub error: Option<serde_json::Value>,
}

impl ServerErrorBody {
    /// The `error` member as display text, if it carries anything.
    pub fn message(&self) -> Option<String> {
        match self.error.as_ref()? {
            serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
            serde_json::Value::Null | serde_json::Value::Bool(false) => None,
            serde_json::Value::String(_) => None,
            other => Some(other.to_string()),
        }
    }
}

impl FormDataEcho {
    /// Read the echo member by member. Non-string scalars are rendered as JSON text.
    fn from_value(value: &serde_json::Value) -> Option<Self> {
        let object = value.as_object()?;
        let text = |key: &str| match object.get(key)? {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        };
        Some(Self {
            name: text("name"),
            email: text("email"),
            number: text("number"),
            vehicle_type: text("vehicleType"),
        })
    }
}

impl QuoteResponse {
    /// Parse a success body. Anything that is not a JSON object yields an empty response;
    /// otherwise `formData` and `basePrice` are taken independently.
    pub fn from_body(body: &str) -> Self {
        let value = match serde_json::from_str::<serde_json::Value>(body) {
            Ok(value) if value.is_object() => value,
            Ok(_) => {
                tracing::debug!("Success body is not a quote object");
                return QuoteResponse::default();
            }
            Err(e) => {
                tracing::debug!(error = %e, "Success body is not JSON");
                return QuoteResponse::default();
            }
        };

        let form_data = value.get("formData").and_then(FormDataEcho::from_value);
        if value.get("formData").is_some() && form_data.is_none() {
            tracing::debug!("Ignoring formData that is not an object");
        }

        QuoteResponse {
            form_data,
            base_price: value.get("basePrice").cloned(),
        }
    }

    /// Price as display text. Null, `false`, `0` and `""` count as absent.
    pub fn base_price_text(&self) -> Option<String> {
        match self.base_price.as_ref()? {
            serde_json::Value::Null | serde_json::Value::Bool(false) => None,
            serde_json::Value::String(s) if s.is_empty() => None,
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Number(n) if n.as_f64() == Some(0.0) => None,
            other => Some(other.to_string()),
        }
    }
}
