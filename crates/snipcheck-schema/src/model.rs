//! # Snippet Metadata Model
//!
//! Typed form of a metadata block that passed validation. Parameter and
//! decision kinds are closed enums with one variant per recognized `type`
//! tag; each variant carries only the fields its tag allows.

use std::collections::BTreeMap;

/// Validated metadata of one library snippet.
#[derive(Debug, Clone, PartialEq)]
pub struct SnippetMetadata {
    pub title: String,
    pub description: String,
    /// `schema.decision`
    pub decision: Option<Vec<DecisionEntry>>,
    pub policy: Option<PolicyBinding>,
    /// `schema.parameters`
    pub parameters: Option<Vec<Parameter>>,
}

/// One entry of `schema.decision`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecisionEntry {
    Toggle {
        label: String,
        toggles: Vec<ToggleSpec>,
    },
    Rego {
        key: String,
        value: String,
    },
    String {
        key: String,
        value: String,
    },
}

impl DecisionEntry {
    /// Tags accepted in `schema.decision[].type`.
    pub const TAGS: [&'static str; 3] = ["toggle", "rego", "string"];
}

/// One switch of a toggle decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleSpec {
    pub key: String,
    pub value: bool,
}

/// `policy` binding. The rule type is always `rego`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyBinding {
    /// Rego rule body bound to the snippet.
    pub rule_value: String,
}

/// Fields every parameter kind carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterCommon {
    pub name: String,
    pub label: Option<String>,
    pub required: Option<bool>,
    pub placeholder: Option<String>,
}

/// One entry of `schema.parameters`.
#[derive(Debug, Clone, PartialEq)]
pub enum Parameter {
    String {
        common: ParameterCommon,
        default: Option<String>,
        items: Option<ItemsSource>,
    },
    SetOfStrings {
        common: ParameterCommon,
        default: Option<Vec<String>>,
        items: Option<ItemsSource>,
    },
    Number {
        common: ParameterCommon,
        default: Option<f64>,
    },
    SetOfNumbers {
        common: ParameterCommon,
        default: Option<Vec<f64>>,
    },
    Object(ObjectParameter),
}

impl Parameter {
    /// Tags accepted in `schema.parameters[].type`.
    pub const TAGS: [&'static str; 5] = [
        "string",
        "set_of_strings",
        "number",
        "set_of_numbers",
        "object",
    ];

    /// Fields shared by every kind.
    pub fn common(&self) -> &ParameterCommon {
        match self {
            Parameter::String { common, .. }
            | Parameter::SetOfStrings { common, .. }
            | Parameter::Number { common, .. }
            | Parameter::SetOfNumbers { common, .. } => common,
            Parameter::Object(object) => &object.common,
        }
    }

    /// The parameter's name.
    pub fn name(&self) -> &str {
        &self.common().name
    }
}

/// Where a string parameter's allowed values come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemsSource {
    /// A fixed list of choices.
    List(Vec<String>),
    /// A query against exactly one source.
    Query { query: String, source: QuerySource },
}

/// The single source a query reads from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuerySource {
    Datasource(String),
    Library(String),
    Package(String),
}

impl QuerySource {
    /// Keys of the mutually exclusive source fields.
    pub const KEYS: [&'static str; 3] = ["datasource", "library", "package"];
}

/// An `object` parameter: a mapping from free-form keys to typed values.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectParameter {
    pub common: ParameterCommon,
    pub default: Option<BTreeMap<String, ObjectDefaultValue>>,
    /// `key.placeholder`
    pub key_placeholder: Option<String>,
    pub value_type: ValueType,
    /// `value.placeholder`
    pub value_placeholder: Option<String>,
}

/// Allowed `value.type` of an object parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    String,
    SetOfStrings,
    SetOfNumbers,
}

impl ValueType {
    /// Every accepted value type, in documentation order.
    pub const ALL: [ValueType; 3] = [Self::String, Self::SetOfStrings, Self::SetOfNumbers];

    /// Parse a `value.type` tag.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|value_type| value_type.as_str() == tag)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::SetOfStrings => "set_of_strings",
            Self::SetOfNumbers => "set_of_numbers",
        }
    }
}

/// One value of an object parameter's default mapping.
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectDefaultValue {
    String(String),
    Strings(Vec<String>),
    Numbers(Vec<f64>),
}
