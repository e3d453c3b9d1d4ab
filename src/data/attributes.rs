//! Parsing of attribute definitions from JSON.

use crate::error::{DomlemError, Result};
use crate::table::{Attribute, EvaluationKind, IdentificationKind, ValueType};
use crate::value::{ElementList, MissingKind, Preference};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
struct AttributeDto {
    name: String,
    #[serde(default = "default_active")]
    active: bool,
    #[serde(rename = "type")]
    kind: String,
    #[serde(rename = "preferenceType", default)]
    preference: Option<String>,
    #[serde(rename = "valueType", default)]
    value_type: Option<ValueTypeDto>,
    #[serde(default)]
    domain: Option<Vec<String>>,
    #[serde(rename = "missingValueType", default)]
    missing: Option<String>,
    #[serde(rename = "identifierType", default)]
    identifier_type: Option<String>,
}

fn default_active() -> bool {
    true
}

/// `valueType` is either a plain name or `["Pair", <inner>]`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ValueTypeDto {
    Name(String),
    Composite(Vec<String>),
}

/// Parses a JSON array of attribute definitions.
///
/// Each definition carries `name`, `active`, `type` (one of `CONDITION`,
/// `DECISION`, `DESCRIPTION`, or `identification`), `preferenceType`
/// (`GAIN`/`COST`/`NONE`, default `NONE`), `valueType` (`Integer`, `Real`,
/// `Enumeration` with a `domain`, or `["Pair", <inner>]`), and
/// `missingValueType` (`M15`/`M2`, default `M2`).
pub fn parse_attributes(json: &str) -> Result<Vec<Attribute>> {
    let dtos: Vec<AttributeDto> = serde_json::from_str(json)?;
    dtos.into_iter().map(convert).collect()
}

fn convert(dto: AttributeDto) -> Result<Attribute> {
    let invalid = |reason: &str| DomlemError::InvalidAttributeDefinition {
        name: dto.name.clone(),
        reason: reason.to_string(),
    };

    if dto.kind == "identification" {
        let kind = match dto.identifier_type.as_deref() {
            Some("uuid") | Some("UUID") => IdentificationKind::Uuid,
            Some("text") | Some("TEXT") | None => IdentificationKind::Text,
            Some(other) => {
                return Err(invalid(&format!("unknown identifierType '{}'", other)));
            }
        };
        return Ok(Attribute::identification(dto.name, dto.active, kind));
    }

    let kind = match dto.kind.as_str() {
        "CONDITION" => EvaluationKind::Condition,
        "DECISION" => EvaluationKind::Decision,
        "DESCRIPTION" => EvaluationKind::Description,
        other => return Err(invalid(&format!("unknown attribute type '{}'", other))),
    };

    let preference = match dto.preference.as_deref() {
        Some("GAIN") => Preference::Gain,
        Some("COST") => Preference::Cost,
        Some("NONE") | None => Preference::None,
        Some(other) => return Err(invalid(&format!("unknown preferenceType '{}'", other))),
    };

    let missing_kind = match dto.missing.as_deref() {
        Some("M15") | Some("MV15") => MissingKind::Mv15,
        Some("M2") | Some("MV2") | None => MissingKind::Mv2,
        Some(other) => return Err(invalid(&format!("unknown missingValueType '{}'", other))),
    };

    let value_type = match dto.value_type {
        Some(ValueTypeDto::Name(name)) => simple_value_type(&name, dto.domain.as_deref())
            .ok_or_else(|| invalid(&format!("unknown valueType '{}'", name)))?,
        Some(ValueTypeDto::Composite(parts)) => match parts.as_slice() {
            [tag, inner] if tag.as_str() == "Pair" => {
                let inner = simple_value_type(inner, dto.domain.as_deref())
                    .ok_or_else(|| invalid(&format!("unknown pair valueType '{}'", inner)))?;
                ValueType::Pair(Box::new(inner))
            }
            _ => return Err(invalid("composite valueType must be [\"Pair\", <inner>]")),
        },
        None => return Err(invalid("evaluation attribute lacks a valueType")),
    };

    if matches!(value_type, ValueType::Enumeration(ref list) if list.is_empty()) {
        return Err(invalid("enumeration attribute has an empty domain"));
    }

    Ok(Attribute::evaluation(
        dto.name,
        dto.active,
        kind,
        preference,
        value_type,
        missing_kind,
    ))
}

fn simple_value_type(name: &str, domain: Option<&[String]>) -> Option<ValueType> {
    match name {
        "Integer" => Some(ValueType::Integer),
        "Real" => Some(ValueType::Real),
        "Enumeration" => {
            let elements = domain.unwrap_or(&[]).to_vec();
            Some(ValueType::Enumeration(Arc::new(ElementList::new(elements))))
        }
        _ => None,
    }
}
