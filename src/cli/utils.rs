use anyhow::Context as _;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{json, Value};
use std::io::{self, IsTerminal, Read, Write};
use std::path::Path;

use crate::api::ListResponse;
use crate::cli::OutputFormat;
use crate::error::ClientError;
use crate::view::{Pager, Table};

/// Output a success message in the appropriate format
pub fn output_success(output_format: &OutputFormat, message: &str, data: Option<Value>) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": true,
                "message": message
            });

            if let (Some(Value::Object(extra)), Some(object)) = (data, response.as_object_mut()) {
                object.extend(extra);
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Output an error message in the appropriate format
pub fn output_error(output_format: &OutputFormat, message: &str, error_code: Option<&str>) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": false,
                "error": message
            });

            if let Some(code) = error_code {
                response["error_code"] = json!(code);
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            eprintln!("Error: {}", message);
        }
    }
    Ok(())
}

/// JSON body for a failed backend call, field errors included
pub fn output_client_error(error: &ClientError, message: &str) -> anyhow::Result<()> {
    let mut response = json!({
        "success": false,
        "error": message,
        "error_code": error.error_code(),
    });
    if let Some(fields) = error.field_errors() {
        response["field_errors"] = json!(fields);
    }
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

/// Notification text plus one indented line per rejected field
pub fn describe_client_error(error: &ClientError, message: &str) -> String {
    let mut text = message.to_string();
    if let Some(fields) = error.field_errors() {
        let mut fields: Vec<_> = fields.iter().collect();
        fields.sort();
        for (field, msg) in fields {
            text.push_str(&format!("\n  {}: {}", field, msg));
        }
    }
    text
}

/// Output an empty collection in the appropriate format
pub fn output_empty_collection(output_format: &OutputFormat, collection_name: &str, message: &str) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&json!({
                    collection_name: []
                }))?
            );
        }
        OutputFormat::Text => {
            println!("{}", message);
        }
    }
    Ok(())
}

/// One page of a list: aligned table plus a footer in text, envelope in JSON
pub fn output_list<R>(
    output_format: &OutputFormat,
    collection_name: &str,
    table: &Table<R>,
    page: &ListResponse<R>,
    pager: Pager,
) -> anyhow::Result<()> {
    if page.items.is_empty() {
        return output_empty_collection(output_format, collection_name, &format!("No {} found", collection_name));
    }

    let window = pager.window(page.total);
    match output_format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&json!({
                    collection_name: table.to_json(&page.items),
                    "pagination": window,
                }))?
            );
        }
        OutputFormat::Text => {
            print!("{}", table.render(&page.items));
            println!("\n{}", window);
        }
    }
    Ok(())
}

/// A single record: pretty JSON, or YAML for reading
pub fn output_item<T: Serialize>(output_format: &OutputFormat, item: &T) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(item)?),
        OutputFormat::Text => print!("{}", serde_yaml::to_string(item)?),
    }
    Ok(())
}

/// Read a create/update payload from stdin. YAML is a superset of JSON, so
/// either works.
pub fn read_payload<T: DeserializeOwned>() -> anyhow::Result<T> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        anyhow::bail!("Expected a YAML or JSON payload on stdin");
    }

    let mut input = String::new();
    stdin.lock().read_to_string(&mut input)?;
    if input.trim().is_empty() {
        anyhow::bail!("Empty payload on stdin");
    }

    parse_payload(&input)
}

pub fn parse_payload<T: DeserializeOwned>(input: &str) -> anyhow::Result<T> {
    serde_yaml::from_str(input).context("Invalid payload")
}

/// `key=value` for `--filter`
pub fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => Ok((key.trim().to_string(), value.trim().to_string())),
        _ => Err(format!("expected key=value, got '{}'", raw)),
    }
}

/// Write binary output to `path`, or to stdout when none is given
pub fn write_bytes(path: Option<&Path>, bytes: &[u8]) -> anyhow::Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, bytes).with_context(|| format!("Failed to write {}", path.display()))?;
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(bytes)?;
            stdout.flush()?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ClientCreate;

    #[test]
    fn test_key_value_filters() {
        assert_eq!(parse_key_value("status=sent"), Ok(("status".into(), "sent".into())));
        assert_eq!(parse_key_value("search=a=b"), Ok(("search".into(), "a=b".into())));
        assert!(parse_key_value("status").is_err());
        assert!(parse_key_value("=x").is_err());
    }

    #[test]
    fn test_field_errors_are_listed_in_order() {
        let err = ClientError::from_response(
            422,
            br#"{"detail": [
                {"loc": ["body", "name"], "msg": "field required"},
                {"loc": ["body", "email"], "msg": "invalid email"}
            ]}"#,
        );
        assert_eq!(
            describe_client_error(&err, "Revisa los campos"),
            "Revisa los campos\n  email: invalid email\n  name: field required"
        );
    }

    #[test]
    fn test_payload_accepts_yaml_and_json() {
        let yaml: ClientCreate = parse_payload("name: Acme\ncity: Sevilla\n").unwrap();
        let json: ClientCreate = parse_payload(r#"{"name": "Acme", "city": "Sevilla"}"#).unwrap();

        assert_eq!(yaml.name, "Acme");
        assert_eq!(json.city.as_deref(), Some("Sevilla"));
    }
}
