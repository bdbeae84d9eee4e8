//! Conversion of generated JSON Schemas to the response-schema dialect the
//! Gemini API accepts.
//!
//! The API understands an `OpenAPI` 3.0 subset: upper-case type names,
//! `nullable` instead of `["T", "null"]`, no `$ref`, and no annotation
//! keywords such as `$schema`, `title` or `format`.

use serde_json::{Map, Value};

const DROPPED_KEYS: &[&str] = &[
    "$schema",
    "$defs",
    "definitions",
    "$id",
    "title",
    "format",
    "additionalProperties",
    "default",
    "examples",
];

const MAX_REF_DEPTH: usize = 8;

/// Convert a draft 2020-12 schema (as produced by `schemars`) to a Gemini
/// `responseSchema`.
#[must_use]
pub fn to_response_schema(schema: &Value) -> Value {
    let defs = schema
        .get("$defs")
        .or_else(|| schema.get("definitions"))
        .cloned()
        .unwrap_or(Value::Null);
    convert(schema, &defs, 0)
}

fn convert(node: &Value, defs: &Value, depth: usize) -> Value {
    let Value::Object(map) = node else {
        return node.clone();
    };

    if let Some(Value::String(reference)) = map.get("$ref") {
        let target = reference
            .rsplit('/')
            .next()
            .and_then(|name| defs.get(name))
            .filter(|_| depth < MAX_REF_DEPTH);
        return target.map_or_else(
            || Value::Object(Map::new()),
            |t| convert(t, defs, depth + 1),
        );
    }

    let mut out = Map::new();
    for (key, value) in map {
        if DROPPED_KEYS.contains(&key.as_str()) {
            continue;
        }
        match key.as_str() {
            "type" => {
                let (ty, nullable) = convert_type(value);
                if let Some(ty) = ty {
                    out.insert("type".into(), ty);
                }
                if nullable {
                    out.insert("nullable".into(), Value::Bool(true));
                }
            }
            "properties" => {
                if let Value::Object(props) = value {
                    let props = props
                        .iter()
                        .map(|(name, prop)| (name.clone(), convert(prop, defs, depth)))
                        .collect();
                    out.insert("properties".into(), Value::Object(props));
                }
            }
            "items" => {
                out.insert("items".into(), convert(value, defs, depth));
            }
            "anyOf" | "oneOf" => merge_union(&mut out, value, defs, depth),
            _ => {
                out.insert(key.clone(), value.clone());
            }
        }
    }
    Value::Object(out)
}

/// `"string"` → `"STRING"`; `["integer", "null"]` → `"INTEGER"` + nullable.
fn convert_type(value: &Value) -> (Option<Value>, bool) {
    match value {
        Value::String(s) => (Some(Value::String(s.to_ascii_uppercase())), false),
        Value::Array(types) => {
            let nullable = types.iter().any(|t| t == "null");
            let first = types
                .iter()
                .filter_map(Value::as_str)
                .find(|t| *t != "null")
                .map(|t| Value::String(t.to_ascii_uppercase()));
            (first, nullable)
        }
        _ => (None, false),
    }
}

/// Collapse `anyOf: [X, {"type": "null"}]` into `X` with `nullable: true`;
/// any other union is kept as a converted `anyOf`.
fn merge_union(out: &mut Map<String, Value>, variants: &Value, defs: &Value, depth: usize) {
    let Value::Array(variants) = variants else {
        return;
    };
    let is_null = |v: &Value| v.get("type").is_some_and(|t| t == "null");
    let nullable = variants.iter().any(is_null);
    let rest: Vec<&Value> = variants.iter().filter(|v| !is_null(v)).collect();

    if let [single] = rest.as_slice() {
        if let Value::Object(inner) = convert(single, defs, depth) {
            out.extend(inner);
        }
    } else {
        let converted = rest.iter().map(|v| convert(v, defs, depth)).collect();
        out.insert("anyOf".into(), Value::Array(converted));
    }
    if nullable {
        out.insert("nullable".into(), Value::Bool(true));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use schemars::schema_for;
    use scout_core::structured::{PaperMetadata, RelevanceVerdict};
    use serde_json::json;

    #[test]
    fn verdict_schema_is_flattened() {
        let raw = serde_json::to_value(schema_for!(RelevanceVerdict)).unwrap();
        let converted = to_response_schema(&raw);

        assert!(converted.get("$schema").is_none());
        assert!(converted.get("title").is_none());
        assert_eq!(converted["type"], "OBJECT");
        assert_eq!(converted["properties"]["is_relevant"]["type"], "BOOLEAN");
        assert_eq!(converted["properties"]["summary"]["type"], "STRING");
        let required = converted["required"].as_array().unwrap();
        assert_eq!(required.len(), 3);
    }

    #[test]
    fn optional_year_becomes_nullable_integer() {
        let raw = serde_json::to_value(schema_for!(PaperMetadata)).unwrap();
        let converted = to_response_schema(&raw);
        let year = &converted["properties"]["year"];
        assert_eq!(year["type"], "INTEGER");
        assert_eq!(year["nullable"], true);
        assert!(year.get("format").is_none());
        assert_eq!(converted["properties"]["authors"]["items"]["type"], "STRING");
    }

    #[test]
    fn refs_are_inlined_and_null_unions_collapse() {
        let raw = json!({
            "$schema": "https://json-schema.org/draft/2020-12/schema",
            "type": "object",
            "properties": {
                "verdict": {
                    "anyOf": [{"$ref": "#/$defs/Verdict"}, {"type": "null"}]
                }
            },
            "$defs": {
                "Verdict": {
                    "type": "object",
                    "properties": {"ok": {"type": "boolean"}},
                    "additionalProperties": false
                }
            }
        });
        let converted = to_response_schema(&raw);
        assert_eq!(
            converted,
            json!({
                "type": "OBJECT",
                "properties": {
                    "verdict": {
                        "type": "OBJECT",
                        "properties": {"ok": {"type": "BOOLEAN"}},
                        "nullable": true
                    }
                }
            })
        );
    }

    #[test]
    fn unknown_ref_becomes_empty_schema() {
        let converted = to_response_schema(&json!({"$ref": "#/$defs/Missing"}));
        assert_eq!(converted, json!({}));
    }
}
