use serde_json::Value;

use crate::network::WebhookError;

/// Shown instead of a blank bot message.
pub const EMPTY_REPLY_PLACEHOLDER: &str = "[Resposta vazia]";

/// Fields checked, in order, for the reply text of a JSON response.
const REPLY_FIELDS: [&str; 3] = ["reply", "message", "text"];

/// Turn a successful webhook response into the text shown to the user.
///
/// JSON bodies (any content type containing `application/json`) yield the
/// first truthy `reply`/`message`/`text` field, falling back to the whole
/// body pretty-printed. Everything else is taken verbatim.
pub fn extract_reply_text(content_type: &str, body: &str) -> Result<String, WebhookError> {
    let reply = if content_type.contains("application/json") {
        let data: Value = serde_json::from_str(body)?;
        match REPLY_FIELDS
            .iter()
            .filter_map(|field| data.get(*field))
            .find(|value| is_truthy(value))
        {
            Some(Value::String(text)) => text.clone(),
            Some(other) => serde_json::to_string_pretty(other)?,
            None => serde_json::to_string_pretty(&data)?,
        }
    } else {
        body.to_string()
    };

    if reply.is_empty() {
        Ok(EMPTY_REPLY_PLACEHOLDER.to_string())
    } else {
        Ok(reply)
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
