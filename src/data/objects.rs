//! Parsing of object rows from JSON into an information table.

use crate::error::{DomlemError, Result};
use crate::table::{
    Attribute, AttributeVariant, Field, Identifier, IdentificationKind, InformationTable,
    ValueType,
};
use crate::value::{MissingKind, Value};
use serde_json::Value as Json;

/// The string standing for a missing value unless overridden.
pub const DEFAULT_MISSING_MARKER: &str = "?";

/// Parses a JSON array of objects keyed by attribute name, using the
/// default missing-value marker.
pub fn parse_objects(attributes: Vec<Attribute>, json: &str) -> Result<InformationTable> {
    parse_objects_with_missing(attributes, json, DEFAULT_MISSING_MARKER)
}

/// Parses a JSON array of objects keyed by attribute name.
///
/// Every attribute must be present in every object unless its value is
/// missing: an absent key or the marker string both map to a missing value
/// of the attribute's declared kind. Values type-check against the declared
/// value types during table construction.
pub fn parse_objects_with_missing(
    attributes: Vec<Attribute>,
    json: &str,
    missing_marker: &str,
) -> Result<InformationTable> {
    let objects: Vec<serde_json::Map<String, Json>> = serde_json::from_str(json)?;

    let mut rows = Vec::with_capacity(objects.len());
    for (row_index, object) in objects.iter().enumerate() {
        let mut row = Vec::with_capacity(attributes.len());
        for attribute in &attributes {
            let field = parse_field(
                attribute,
                object.get(&attribute.name),
                missing_marker,
                row_index,
            )?;
            row.push(field);
        }
        rows.push(row);
    }

    InformationTable::new(attributes, rows)
}

fn parse_field(
    attribute: &Attribute,
    json: Option<&Json>,
    missing_marker: &str,
    row: usize,
) -> Result<Field> {
    let invalid = |reason: String| DomlemError::InvalidObjectDefinition { row, reason };

    match &attribute.variant {
        AttributeVariant::Identification(kind) => {
            let text = match json {
                Some(Json::String(s)) => s.clone(),
                Some(other) => {
                    return Err(invalid(format!(
                        "identifier '{}' must be a string, got {}",
                        attribute.name, other
                    )))
                }
                None => {
                    return Err(invalid(format!(
                        "object lacks identifier '{}'",
                        attribute.name
                    )))
                }
            };
            let identifier = match kind {
                IdentificationKind::Uuid => Identifier::Uuid(text),
                IdentificationKind::Text => Identifier::Text(text),
            };
            Ok(Field::Identification(identifier))
        }
        AttributeVariant::Evaluation(evaluation) => {
            let missing = Field::Evaluation(Value::Missing(evaluation.missing_kind));
            match json {
                None => Ok(missing),
                Some(Json::String(s)) if s == missing_marker => Ok(missing),
                Some(json) => {
                    let value = parse_value(
                        &evaluation.value_type,
                        evaluation.missing_kind,
                        json,
                        missing_marker,
                    )
                    .map_err(|reason| {
                        invalid(format!("attribute '{}': {}", attribute.name, reason))
                    })?;
                    Ok(Field::Evaluation(value))
                }
            }
        }
    }
}

fn parse_value(
    value_type: &ValueType,
    missing_kind: MissingKind,
    json: &Json,
    missing_marker: &str,
) -> std::result::Result<Value, String> {
    match value_type {
        ValueType::Integer => match json {
            Json::Number(n) => n
                .as_i64()
                .map(Value::Int)
                .ok_or_else(|| format!("{} is not an integer", n)),
            Json::String(s) => s
                .parse::<i64>()
                .map(Value::Int)
                .map_err(|_| format!("'{}' is not an integer", s)),
            other => Err(format!("{} is not an integer", other)),
        },
        ValueType::Real => match json {
            Json::Number(n) => n
                .as_f64()
                .map(Value::Real)
                .ok_or_else(|| format!("{} is not a real", n)),
            Json::String(s) => s
                .parse::<f64>()
                .map(Value::Real)
                .map_err(|_| format!("'{}' is not a real", s)),
            other => Err(format!("{} is not a real", other)),
        },
        ValueType::Enumeration(elements) => match json {
            Json::String(s) => elements
                .index_of(s)
                .map(|index| Value::enumeration(index, elements.clone()))
                .ok_or_else(|| format!("'{}' is not in the enumeration domain", s)),
            other => Err(format!("{} is not an enumeration element", other)),
        },
        ValueType::Pair(inner) => match json {
            Json::Array(parts) if parts.len() == 2 => {
                let first = parse_pair_coordinate(inner, missing_kind, &parts[0], missing_marker)?;
                let second = parse_pair_coordinate(inner, missing_kind, &parts[1], missing_marker)?;
                Ok(Value::pair(first, second))
            }
            other => Err(format!("{} is not a two-element pair", other)),
        },
    }
}

fn parse_pair_coordinate(
    inner: &ValueType,
    missing_kind: MissingKind,
    json: &Json,
    missing_marker: &str,
) -> std::result::Result<Value, String> {
    if let Json::String(s) = json {
        if s == missing_marker {
            return Ok(Value::Missing(missing_kind));
        }
    }
    parse_value(inner, missing_kind, json, missing_marker)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::parse_attributes;
    use crate::value::Ternary;

    const ATTRIBUTES_JSON: &str = r#"[
        { "name": "id", "type": "identification", "identifierType": "text" },
        { "name": "quality", "type": "CONDITION", "preferenceType": "GAIN",
          "valueType": "Integer" },
        { "name": "verdict", "type": "CONDITION", "preferenceType": "GAIN",
          "valueType": "Enumeration", "domain": ["bad", "good"],
          "missingValueType": "M15" },
        { "name": "class", "type": "DECISION", "preferenceType": "GAIN",
          "valueType": "Integer" }
    ]"#;

    fn attributes() -> Vec<Attribute> {
        parse_attributes(ATTRIBUTES_JSON).unwrap()
    }

    #[test]
    fn test_parse_objects_into_table() {
        let json = r#"[
            { "id": "a", "quality": 3, "verdict": "good", "class": 2 },
            { "id": "b", "quality": 1, "verdict": "bad", "class": 1 }
        ]"#;
        let table = parse_objects(attributes(), json).unwrap();

        assert_eq!(table.n_objects(), 2);
        assert_eq!(table.identifier(0), Some(&Identifier::Text("a".into())));
        assert_eq!(table.condition_field(0, 0), &Value::Int(3));
        assert_eq!(table.condition_field(1, 1).to_string(), "bad");
        let d0 = table.decision(0).unwrap();
        let d1 = table.decision(1).unwrap();
        assert_eq!(d0.is_at_least_as_good_as(&d1), Ternary::True);
    }

    #[test]
    fn test_missing_marker_and_absent_key() {
        let json = r#"[
            { "id": "a", "quality": "?", "class": 1 }
        ]"#;
        let table = parse_objects(attributes(), json).unwrap();

        // The marker maps to the attribute's declared missing kind, and the
        // absent "verdict" key does too.
        assert_eq!(
            table.condition_field(0, 0),
            &Value::Missing(MissingKind::Mv2)
        );
        assert_eq!(
            table.condition_field(0, 1),
            &Value::Missing(MissingKind::Mv15)
        );
    }

    #[test]
    fn test_custom_missing_marker() {
        let json = r#"[
            { "id": "a", "quality": "N/A", "verdict": "good", "class": 1 }
        ]"#;
        let table = parse_objects_with_missing(attributes(), json, "N/A").unwrap();
        assert_eq!(
            table.condition_field(0, 0),
            &Value::Missing(MissingKind::Mv2)
        );
    }

    #[test]
    fn test_numeric_strings_accepted() {
        let json = r#"[
            { "id": "a", "quality": "7", "verdict": "bad", "class": 1 }
        ]"#;
        let table = parse_objects(attributes(), json).unwrap();
        assert_eq!(table.condition_field(0, 0), &Value::Int(7));
    }

    #[test]
    fn test_unknown_enumeration_element_rejected() {
        let json = r#"[
            { "id": "a", "quality": 1, "verdict": "excellent", "class": 1 }
        ]"#;
        assert!(matches!(
            parse_objects(attributes(), json),
            Err(DomlemError::InvalidObjectDefinition { row: 0, .. })
        ));
    }

    #[test]
    fn test_missing_identifier_rejected() {
        let json = r#"[
            { "quality": 1, "verdict": "bad", "class": 1 }
        ]"#;
        assert!(matches!(
            parse_objects(attributes(), json),
            Err(DomlemError::InvalidObjectDefinition { row: 0, .. })
        ));
    }

    #[test]
    fn test_pair_values_parse() {
        let attributes_json = r#"[
            { "name": "span", "type": "CONDITION", "preferenceType": "GAIN",
              "valueType": ["Pair", "Integer"] },
            { "name": "class", "type": "DECISION", "preferenceType": "GAIN",
              "valueType": "Integer" }
        ]"#;
        let json = r#"[
            { "span": [3, 1], "class": 1 },
            { "span": [5, "?"], "class": 2 }
        ]"#;
        let table =
            parse_objects(parse_attributes(attributes_json).unwrap(), json).unwrap();

        assert_eq!(
            table.condition_field(0, 0),
            &Value::pair(Value::Int(3), Value::Int(1))
        );
        assert_eq!(
            table.condition_field(1, 0),
            &Value::pair(Value::Int(5), Value::Missing(MissingKind::Mv2))
        );
    }
}
