//! JSON status helpers

use serde::Serialize;
use serde_json::json;
use tagdraw_core::error::Result;

/// Print a JSON status object with optional message and extra fields
///
/// ```rust,ignore
/// print_json_status("ok", Some("Store initialized"), &[("store", json!(path))])?;
/// ```
pub fn print_json_status(
    status: &str,
    message: Option<&str>,
    extra_fields: &[(&str, serde_json::Value)],
) -> Result<()> {
    println!("{}", status_value(status, message, extra_fields));
    Ok(())
}

/// Pretty-print any serializable value as JSON on stdout
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn status_value(
    status: &str,
    message: Option<&str>,
    extra_fields: &[(&str, serde_json::Value)],
) -> serde_json::Value {
    let mut output = json!({ "status": status });

    if let Some(obj) = output.as_object_mut() {
        if let Some(msg) = message {
            obj.insert("message".to_string(), json!(msg));
        }
        for (key, value) in extra_fields {
            obj.insert(key.to_string(), value.clone());
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_with_fields() {
        let value = status_value("ok", Some("done"), &[("id", json!(3))]);
        assert_eq!(value["status"], "ok");
        assert_eq!(value["message"], "done");
        assert_eq!(value["id"], 3);
    }

    #[test]
    fn test_status_without_message() {
        let value = status_value("ok", None, &[]);
        assert!(value.get("message").is_none());
    }
}
