//! Stock Tera filters for embedding text blocks in markup.

use std::collections::HashMap;

use tera::{Result, Value};

/// Wrap the input in a `<style>` element.
pub(crate) fn css(value: &Value, _args: &HashMap<String, Value>) -> Result<Value> {
    let s = value
        .as_str()
        .ok_or_else(|| tera::Error::msg("css filter expects a string"))?;
    Ok(Value::String(format!(
        "<style type=\"text/css\">\n{s}\n</style>"
    )))
}

/// Wrap the input in a `<script>` element.
pub(crate) fn js(value: &Value, _args: &HashMap<String, Value>) -> Result<Value> {
    let s = value
        .as_str()
        .ok_or_else(|| tera::Error::msg("js filter expects a string"))?;
    Ok(Value::String(format!(
        "<script type=\"text/javascript\">\n{s}\n</script>"
    )))
}

/// Wrap the input in a CDATA section.
pub(crate) fn cdata(value: &Value, _args: &HashMap<String, Value>) -> Result<Value> {
    let s = value
        .as_str()
        .ok_or_else(|| tera::Error::msg("cdata filter expects a string"))?;
    Ok(Value::String(format!("<![CDATA[{s}]]>")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(filter: fn(&Value, &HashMap<String, Value>) -> Result<Value>, input: &str) -> String {
        let val = Value::String(input.to_string());
        let args = HashMap::new();
        filter(&val, &args).unwrap().as_str().unwrap().to_string()
    }

    #[test]
    fn test_css() {
        let out = apply(css, "body { margin: 0; }");
        assert!(out.starts_with("<style"));
        assert!(out.contains("body { margin: 0; }"));
        assert!(out.ends_with("</style>"));
    }

    #[test]
    fn test_js() {
        let out = apply(js, "console.log(1);");
        assert!(out.starts_with("<script"));
        assert!(out.ends_with("</script>"));
    }

    #[test]
    fn test_cdata() {
        assert_eq!(apply(cdata, "a < b"), "<![CDATA[a < b]]>");
    }

    #[test]
    fn test_filter_rejects_non_string() {
        let val = Value::Number(42.into());
        let args = HashMap::new();
        assert!(css(&val, &args).is_err());
        assert!(js(&val, &args).is_err());
        assert!(cdata(&val, &args).is_err());
    }
}
