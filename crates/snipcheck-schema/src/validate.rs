//! # Snippet Schema Validation
//!
//! Type-checks one metadata block into a [`SnippetMetadata`].
//!
//! ## Checking Order
//!
//! 1. YAML parse (failure is a [`BlockError::Parse`]).
//! 2. `title` and `description` are strings.
//! 3. `schema.decision`, when present.
//! 4. `policy`, when present.
//! 5. `schema.parameters`, when present.
//!
//! Validation is fail-fast: the first violation is returned and nothing
//! after it is checked. Downstream tooling relies on a failing block
//! carrying exactly one schema error.
//!
//! The checks run on the parsed `serde_yaml::Value` tree, so every YAML
//! scalar is accepted as parsed: `.inf` and `.nan` are numbers. An optional
//! field whose value is YAML `null` counts as absent.

use std::collections::BTreeMap;

use serde_yaml::{Mapping, Value};
use thiserror::Error;

use snipcheck_core::{OutcomeError, SchemaError};

use crate::model::{
    DecisionEntry, ItemsSource, ObjectDefaultValue, ObjectParameter, Parameter, ParameterCommon,
    PolicyBinding, QuerySource, SnippetMetadata, ToggleSpec, ValueType,
};

/// Why a block failed.
#[derive(Error, Debug)]
pub enum BlockError {
    /// The block is not well-formed YAML.
    #[error("invalid YAML: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// The metadata violates the snippet schema.
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

impl From<BlockError> for OutcomeError {
    fn from(err: BlockError) -> Self {
        match err {
            BlockError::Schema(schema) => OutcomeError::Schema(schema),
            other => OutcomeError::Parse(other.to_string()),
        }
    }
}

/// Parse and validate the raw text of one metadata block.
pub fn validate_metadata(raw_text: &str) -> Result<SnippetMetadata, BlockError> {
    let document: Value = serde_yaml::from_str(raw_text)?;
    Ok(check_document(&document)?)
}

/// Validate an already-parsed metadata document.
pub fn check_document(document: &Value) -> Result<SnippetMetadata, SchemaError> {
    let root = document.as_mapping();
    let title = root.and_then(|m| m.get("title")).and_then(Value::as_str);
    let description = root
        .and_then(|m| m.get("description"))
        .and_then(Value::as_str);
    let (Some(title), Some(description)) = (title, description) else {
        return Err(SchemaError::new(
            "(root)",
            "title and description of the snippet must be strings",
        ));
    };

    let schema = root
        .and_then(|m| present(m, "schema"))
        .and_then(Value::as_mapping);

    let decision = schema
        .and_then(|s| present(s, "decision"))
        .map(check_decision)
        .transpose()?;

    let policy = root
        .and_then(|m| present(m, "policy"))
        .map(check_policy)
        .transpose()?;

    let parameters = schema
        .and_then(|s| present(s, "parameters"))
        .map(check_parameters)
        .transpose()?;

    Ok(SnippetMetadata {
        title: title.to_string(),
        description: description.to_string(),
        decision,
        policy,
        parameters,
    })
}

// ---------------------------------------------------------------------------
// decision
// ---------------------------------------------------------------------------

fn check_decision(value: &Value) -> Result<Vec<DecisionEntry>, SchemaError> {
    let entries = value
        .as_sequence()
        .ok_or_else(|| SchemaError::new("schema.decision", "decision must be an array"))?;
    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| check_decision_entry(&format!("schema.decision[{i}]"), entry))
        .collect()
}

fn check_decision_entry(path: &str, entry: &Value) -> Result<DecisionEntry, SchemaError> {
    let entry = entry
        .as_mapping()
        .ok_or_else(|| SchemaError::new(path, "every entry in decision must be a mapping"))?;

    let tag = entry.get("type").and_then(Value::as_str);
    match tag {
        Some(tag @ ("rego" | "string")) => {
            let key = entry.get("key").and_then(Value::as_str);
            let value = entry.get("value").and_then(Value::as_str);
            let (Some(key), Some(value)) = (key, value) else {
                return Err(SchemaError::new(
                    path,
                    format!("key and value in decision entry type {tag} should be strings"),
                ));
            };
            let (key, value) = (key.to_string(), value.to_string());
            Ok(if tag == "rego" {
                DecisionEntry::Rego { key, value }
            } else {
                DecisionEntry::String { key, value }
            })
        }
        Some("toggle") => check_toggle(path, entry),
        _ => Err(SchemaError::new(
            format!("{path}.type"),
            format!(
                "unknown entry type {} in decision; expected one of {}",
                describe(entry.get("type")),
                DecisionEntry::TAGS.join(", ")
            ),
        )),
    }
}

fn check_toggle(path: &str, entry: &Mapping) -> Result<DecisionEntry, SchemaError> {
    // Any falsy label (absent, null, false, 0, "") counts as missing.
    let label = entry.get("label").filter(|label| is_truthy(label)).ok_or_else(|| {
        SchemaError::new(path, "decision entry type toggle should have a label field")
    })?;
    let label = label.as_str().ok_or_else(|| {
        SchemaError::new(
            format!("{path}.label"),
            "decision entry type toggle's label should be a string",
        )
    })?;

    let toggles = entry
        .get("toggles")
        .and_then(Value::as_sequence)
        .ok_or_else(|| {
            SchemaError::new(
                format!("{path}.toggles"),
                "decision entry type toggle's toggles should be an array",
            )
        })?;

    let toggles = toggles
        .iter()
        .enumerate()
        .map(|(i, toggle)| {
            let toggle_path = format!("{path}.toggles[{i}]");
            let toggle = toggle.as_mapping().ok_or_else(|| {
                SchemaError::new(&toggle_path, "toggles entry should be a mapping")
            })?;
            let key = toggle.get("key").and_then(Value::as_str).ok_or_else(|| {
                SchemaError::new(format!("{toggle_path}.key"), "toggles entry key should be a string")
            })?;
            let value = toggle.get("value").and_then(Value::as_bool).ok_or_else(|| {
                SchemaError::new(
                    format!("{toggle_path}.value"),
                    format!(
                        "toggles entry value should be a boolean, got {}",
                        describe(toggle.get("value"))
                    ),
                )
            })?;
            Ok(ToggleSpec {
                key: key.to_string(),
                value,
            })
        })
        .collect::<Result<Vec<_>, SchemaError>>()?;

    Ok(DecisionEntry::Toggle {
        label: label.to_string(),
        toggles,
    })
}

// ---------------------------------------------------------------------------
// policy
// ---------------------------------------------------------------------------

fn check_policy(value: &Value) -> Result<PolicyBinding, SchemaError> {
    let policy = value
        .as_mapping()
        .ok_or_else(|| SchemaError::new("policy", "policy must be a mapping"))?;
    let rule = policy
        .get("rule")
        .and_then(Value::as_mapping)
        .ok_or_else(|| SchemaError::new("policy.rule", "rule must be a mapping"))?;
    let rule_type = rule
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| SchemaError::new("policy.rule.type", "rule type must be a string"))?;
    if rule_type != "rego" {
        return Err(SchemaError::new(
            "policy.rule.type",
            format!("unknown rule type \"{rule_type}\"; expected \"rego\""),
        ));
    }
    let rule_value = rule
        .get("value")
        .and_then(Value::as_str)
        .ok_or_else(|| SchemaError::new("policy.rule.value", "rule value must be a string"))?;

    Ok(PolicyBinding {
        rule_value: rule_value.to_string(),
    })
}

// ---------------------------------------------------------------------------
// parameters
// ---------------------------------------------------------------------------

fn check_parameters(value: &Value) -> Result<Vec<Parameter>, SchemaError> {
    let parameters = value
        .as_sequence()
        .ok_or_else(|| SchemaError::new("schema.parameters", "parameters must be an array"))?;
    parameters
        .iter()
        .enumerate()
        .map(|(i, parameter)| check_parameter(&format!("schema.parameters[{i}]"), parameter))
        .collect()
}

fn check_parameter(path: &str, value: &Value) -> Result<Parameter, SchemaError> {
    let param = value
        .as_mapping()
        .ok_or_else(|| SchemaError::new(path, "each parameter in parameters should be a mapping"))?;

    let tag = param
        .get("type")
        .and_then(Value::as_str)
        .filter(|t| Parameter::TAGS.contains(t))
        .ok_or_else(|| {
            SchemaError::new(
                format!("{path}.type"),
                format!(
                    "unknown parameter type {}; expected one of {}",
                    describe(param.get("type")),
                    Parameter::TAGS.join(", ")
                ),
            )
        })?;

    let name = param
        .get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| SchemaError::new(format!("{path}.name"), "parameter name should be a string"))?;

    let ctx = ParamContext { path, tag, name };
    let common = ParameterCommon {
        name: name.to_string(),
        label: ctx.optional_string(param, "label")?,
        required: ctx.optional_bool(param, "required")?,
        placeholder: ctx.optional_string(param, "placeholder")?,
    };

    match tag {
        "string" => Ok(Parameter::String {
            default: ctx.optional_string(param, "default")?,
            items: present(param, "items")
                .map(|items| ctx.check_items(items))
                .transpose()?,
            common,
        }),
        "set_of_strings" => {
            let default = present(param, "default")
                .map(|d| {
                    let list = d
                        .as_sequence()
                        .ok_or_else(|| ctx.error("default", "default should be an array"))?;
                    string_list(list).ok_or_else(|| {
                        ctx.error("default", "default array should have string values")
                    })
                })
                .transpose()?;
            Ok(Parameter::SetOfStrings {
                default,
                items: present(param, "items")
                    .map(|items| ctx.check_items(items))
                    .transpose()?,
                common,
            })
        }
        "number" => {
            let default = present(param, "default")
                .map(|d| {
                    d.as_f64().ok_or_else(|| {
                        ctx.error(
                            "default",
                            format!("default should be a number, got {}", describe(Some(d))),
                        )
                    })
                })
                .transpose()?;
            Ok(Parameter::Number { common, default })
        }
        "set_of_numbers" => {
            let default = present(param, "default")
                .map(|d| {
                    let list = d
                        .as_sequence()
                        .ok_or_else(|| ctx.error("default", "default should be an array"))?;
                    number_list(list).ok_or_else(|| {
                        ctx.error("default", "default array should have number values")
                    })
                })
                .transpose()?;
            Ok(Parameter::SetOfNumbers { common, default })
        }
        _ => check_object_parameter(&ctx, param, common).map(Parameter::Object),
    }
}

fn check_object_parameter(
    ctx: &ParamContext<'_>,
    param: &Mapping,
    common: ParameterCommon,
) -> Result<ObjectParameter, SchemaError> {
    let default = present(param, "default")
        .map(|d| {
            d.as_mapping()
                .ok_or_else(|| ctx.error("default", "default should be a mapping"))
        })
        .transpose()?;

    let key_placeholder = present(param, "key")
        .map(|key| {
            let key = key
                .as_mapping()
                .ok_or_else(|| ctx.error("key", "key should be a mapping"))?;
            key.get("placeholder")
                .and_then(Value::as_str)
                .map(str::to_string)
                .ok_or_else(|| ctx.error("key.placeholder", "key's placeholder should be a string"))
        })
        .transpose()?;

    let value = param
        .get("value")
        .and_then(Value::as_mapping)
        .ok_or_else(|| ctx.error("value", "value should be a mapping"))?;

    let value_placeholder = present(value, "placeholder")
        .map(|placeholder| {
            placeholder
                .as_str()
                .map(str::to_string)
                .ok_or_else(|| ctx.error("value.placeholder", "value's placeholder should be a string"))
        })
        .transpose()?;

    let value_type = value
        .get("type")
        .and_then(Value::as_str)
        .and_then(ValueType::from_tag)
        .ok_or_else(|| {
            let expected: Vec<&str> = ValueType::ALL.iter().map(ValueType::as_str).collect();
            ctx.error(
                "value.type",
                format!(
                    "unknown value type {}; expected one of {}",
                    describe(value.get("type")),
                    expected.join(", ")
                ),
            )
        })?;

    let default = default
        .map(|entries| check_object_default(ctx, entries, value_type))
        .transpose()?;

    Ok(ObjectParameter {
        common,
        default,
        key_placeholder,
        value_type,
        value_placeholder,
    })
}

fn check_object_default(
    ctx: &ParamContext<'_>,
    entries: &Mapping,
    value_type: ValueType,
) -> Result<BTreeMap<String, ObjectDefaultValue>, SchemaError> {
    let mut out = BTreeMap::new();
    for (key, value) in entries {
        let key = scalar_key(key)
            .ok_or_else(|| ctx.error("default", "default object keys should be scalars"))?;
        let field = format!("default.{key}");
        let checked = match value_type {
            ValueType::String => value
                .as_str()
                .map(|s| ObjectDefaultValue::String(s.to_string()))
                .ok_or_else(|| ctx.error(&field, "default object values should be strings"))?,
            ValueType::SetOfStrings => {
                let list = value
                    .as_sequence()
                    .ok_or_else(|| ctx.error(&field, "default object values should be an array"))?;
                string_list(list).map(ObjectDefaultValue::Strings).ok_or_else(|| {
                    ctx.error(&field, "default object values should be an array of strings")
                })?
            }
            ValueType::SetOfNumbers => {
                let list = value
                    .as_sequence()
                    .ok_or_else(|| ctx.error(&field, "default object values should be an array"))?;
                number_list(list).map(ObjectDefaultValue::Numbers).ok_or_else(|| {
                    ctx.error(&field, "default object values should be an array of numbers")
                })?
            }
        };
        out.insert(key, checked);
    }
    Ok(out)
}

/// Names the parameter being checked in every error it produces.
struct ParamContext<'a> {
    path: &'a str,
    tag: &'a str,
    name: &'a str,
}

impl ParamContext<'_> {
    fn error(&self, field: &str, expectation: impl AsRef<str>) -> SchemaError {
        SchemaError::new(
            format!("{}.{field}", self.path),
            format!(
                "{} parameter \"{}\": {}",
                self.tag,
                self.name,
                expectation.as_ref()
            ),
        )
    }

    fn optional_string(&self, map: &Mapping, field: &str) -> Result<Option<String>, SchemaError> {
        present(map, field)
            .map(|value| {
                value.as_str().map(str::to_string).ok_or_else(|| {
                    self.error(
                        field,
                        format!("{field} should be a string, got {}", describe(Some(value))),
                    )
                })
            })
            .transpose()
    }

    fn optional_bool(&self, map: &Mapping, field: &str) -> Result<Option<bool>, SchemaError> {
        present(map, field)
            .map(|value| {
                value.as_bool().ok_or_else(|| {
                    self.error(
                        field,
                        format!("{field} should be a boolean, got {}", describe(Some(value))),
                    )
                })
            })
            .transpose()
    }

    fn check_items(&self, items: &Value) -> Result<ItemsSource, SchemaError> {
        if let Some(list) = items.as_sequence() {
            return string_list(list)
                .map(ItemsSource::List)
                .ok_or_else(|| self.error("items", "items array should contain only strings"));
        }
        let Some(query) = items.as_mapping() else {
            return Err(self.error(
                "items",
                format!("items should be an array or mapping, got {}", describe(Some(items))),
            ));
        };

        let query_text = query
            .get("query")
            .and_then(Value::as_str)
            .ok_or_else(|| self.error("items.query", "items query should be a string"))?;

        let selected: Vec<(&str, &Value)> = QuerySource::KEYS
            .iter()
            .filter_map(|key| query.get(*key).filter(|v| is_truthy(v)).map(|v| (*key, v)))
            .collect();
        let [(key, value)] = selected.as_slice() else {
            return Err(self.error(
                "items",
                format!(
                    "datasource, library and package are mutually exclusive; exactly one must be set, found {}",
                    selected.len()
                ),
            ));
        };
        let source_name = value.as_str().ok_or_else(|| {
            self.error(&format!("items.{key}"), format!("{key} should be a string"))
        })?;
        let source = match *key {
            "datasource" => QuerySource::Datasource(source_name.to_string()),
            "library" => QuerySource::Library(source_name.to_string()),
            _ => QuerySource::Package(source_name.to_string()),
        };
        Ok(ItemsSource::Query {
            query: query_text.to_string(),
            source,
        })
    }
}

// ---------------------------------------------------------------------------
// value helpers
// ---------------------------------------------------------------------------

/// A field that exists and is not `null`.
fn present<'a>(map: &'a Mapping, key: &str) -> Option<&'a Value> {
    map.get(key).filter(|v| !v.is_null())
}

fn string_list(list: &[Value]) -> Option<Vec<String>> {
    list.iter().map(|v| v.as_str().map(str::to_string)).collect()
}

fn number_list(list: &[Value]) -> Option<Vec<f64>> {
    list.iter().map(Value::as_f64).collect()
}

/// A mapping key as text; only scalar keys have one.
fn scalar_key(key: &Value) -> Option<String> {
    match untag(key) {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn untag(mut value: &Value) -> &Value {
    while let Value::Tagged(tagged) = value {
        value = &tagged.value;
    }
    value
}

/// Truthiness used by the source-exclusivity rule and toggle labels:
/// `null`, `false`, `0`, `.nan`, and `""` do not count as set.
fn is_truthy(value: &Value) -> bool {
    match untag(value) {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Sequence(_) | Value::Mapping(_) | Value::Tagged(_) => true,
    }
}

/// Short description of a value for error messages.
fn describe(value: Option<&Value>) -> String {
    match value.map(untag) {
        None | Some(Value::Null) => "missing".to_string(),
        Some(Value::Bool(b)) => format!("boolean {b}"),
        Some(Value::Number(n)) => format!("number {n}"),
        Some(Value::String(s)) => format!("\"{s}\""),
        Some(Value::Sequence(_)) => "an array".to_string(),
        Some(Value::Mapping(_) | Value::Tagged(_)) => "a mapping".to_string(),
    }
}
