//! Minimal redraw instructions for a gauge already on the page.
//!
//! Re-sending a whole SVG for every sample is wasteful when only the needle
//! moved. A [`NeedlePatch`] names the elements to touch and the new attribute
//! and text values; the embedding page applies it as JSON or as a script.

use std::fmt::Write;

use serde::{Deserialize, Serialize};

/// How [`Gauge::update`](crate::Gauge::update) reports a new value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpdateMode {
    /// Re-emit the complete SVG.
    Full,
    /// Emit only the changed needle transform and readout text.
    #[default]
    Patch,
}

/// Result of a value update.
#[derive(Debug, Clone, PartialEq)]
pub enum Redraw {
    /// The complete SVG fragment.
    Markup(String),
    /// Attribute and text changes for the existing fragment.
    Patch(NeedlePatch),
}

/// Attribute and text updates that move an existing needle.
///
/// ```json
/// {
///   "needleId": "ego-speed_needle",
///   "transform": "rotate(90, 110, 110)",
///   "rotation": 90.0,
///   "valueId": "ego-speed_value",
///   "text": "50.0"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct NeedlePatch {
    /// Id of the needle group.
    pub needle_id: String,

    /// New value of the needle's `transform` attribute.
    pub transform: String,

    /// Needle rotation in degrees (0 = up, clockwise).
    pub rotation: f64,

    /// Id of the readout element, when the readout is shown.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_id: Option<String>,

    /// New readout text, when the readout is shown.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl NeedlePatch {
    /// Serializes the patch to a JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserializes a patch from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// A self-contained browser script applying the patch.
    ///
    /// Missing elements are skipped, so the script is harmless if the gauge
    /// was removed from the page in the meantime.
    pub fn to_script(&self) -> String {
        let mut script = String::from("(function() {\n");
        let _ = writeln!(
            script,
            "  const needle = document.getElementById({});",
            js_string(&self.needle_id)
        );
        let _ = writeln!(
            script,
            "  if (needle) {{ needle.setAttribute('transform', {}); }}",
            js_string(&self.transform)
        );
        if let (Some(value_id), Some(text)) = (&self.value_id, &self.text) {
            let _ = writeln!(
                script,
                "  const valueText = document.getElementById({});",
                js_string(value_id)
            );
            let _ = writeln!(
                script,
                "  if (valueText) {{ valueText.textContent = {}; }}",
                js_string(text)
            );
        }
        script.push_str("})();");
        script
    }
}

/// Quotes a string as a JavaScript literal.
fn js_string(value: &str) -> String {
    // A JSON string is a valid JS string literal; only the two line
    // separators JSON leaves raw need escaping for older engines.
    serde_json::Value::from(value)
        .to_string()
        .replace('\u{2028}', "\\u2028")
        .replace('\u{2029}', "\\u2029")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patch() -> NeedlePatch {
        NeedlePatch {
            needle_id: "speed_needle".into(),
            transform: "rotate(180, 110, 110)".into(),
            rotation: 180.0,
            value_id: Some("speed_value".into()),
            text: Some("50.0".into()),
        }
    }

    #[test]
    fn json_uses_camel_case() {
        let json = patch().to_json().unwrap();
        assert!(json.contains(r#""needleId":"speed_needle""#));
        assert!(json.contains(r#""valueId":"speed_value""#));
        assert_eq!(NeedlePatch::from_json(&json).unwrap(), patch());
    }

    #[test]
    fn json_omits_hidden_readout() {
        let mut hidden = patch();
        hidden.value_id = None;
        hidden.text = None;
        let json = hidden.to_json().unwrap();
        assert!(!json.contains("valueId"));
        assert!(!json.contains("text"));
    }

    #[test]
    fn script_sets_transform_and_text() {
        let script = patch().to_script();
        assert!(script.starts_with("(function() {"));
        assert!(script.contains(r#"document.getElementById("speed_needle")"#));
        assert!(script.contains(r#"needle.setAttribute('transform', "rotate(180, 110, 110)")"#));
        assert!(script.contains(r#"valueText.textContent = "50.0""#));
        assert!(script.ends_with("})();"));
    }

    #[test]
    fn script_without_readout_only_moves_needle() {
        let mut hidden = patch();
        hidden.value_id = None;
        hidden.text = None;
        assert!(!hidden.to_script().contains("valueText"));
    }

    #[test]
    fn js_strings_are_quoted() {
        assert_eq!(js_string(r#"a"b"#), r#""a\"b""#);
        assert_eq!(js_string("x\u{2028}y"), "\"x\\u2028y\"");
    }

    #[test]
    fn default_mode_is_patch() {
        assert_eq!(UpdateMode::default(), UpdateMode::Patch);
    }
}
