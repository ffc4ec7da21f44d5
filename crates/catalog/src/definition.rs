//! Function definitions in the JSON shape LLM tool-calling APIs expect.
//!
//! These types serialize to the `{name, description, parameters}` structure
//! OpenAI-style chat APIs use to describe callable functions. They carry no
//! behavior beyond construction and serialization; validation and execution
//! live behind the [`QueryExecutor`](crate::QueryExecutor) boundary.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// JSON schema primitive type tags used for function parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonType {
    String,
    Number,
    Integer,
    Boolean,
    Array,
    Object,
}

impl JsonType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            JsonType::String => "string",
            JsonType::Number => "number",
            JsonType::Integer => "integer",
            JsonType::Boolean => "boolean",
            JsonType::Array => "array",
            JsonType::Object => "object",
        }
    }
}

/// One function parameter in JSON schema form.
///
/// Exactly one of `items` and `enum` is ever present, matching the type tag:
/// `items` iff the argument is an array, `enum` iff it maps a GraphQL enum.
/// The constructors enforce this; there is no way to build an argument with
/// both set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionArgument {
    #[serde(rename = "type")]
    json_type: JsonType,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    items: Option<Box<FunctionArgument>>,
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    enum_values: Option<Vec<String>>,
}

impl FunctionArgument {
    /// A plain scalar argument (string, number, integer, boolean).
    #[must_use]
    pub fn scalar(json_type: JsonType) -> Self {
        Self {
            json_type,
            description: None,
            items: None,
            enum_values: None,
        }
    }

    /// An array argument with the given item schema.
    #[must_use]
    pub fn array(items: FunctionArgument) -> Self {
        Self {
            json_type: JsonType::Array,
            description: None,
            items: Some(Box::new(items)),
            enum_values: None,
        }
    }

    /// A string argument restricted to the declared enum value names.
    #[must_use]
    pub fn enumeration(values: Vec<String>) -> Self {
        Self {
            json_type: JsonType::String,
            description: None,
            items: None,
            enum_values: Some(values),
        }
    }

    /// Attaches a description, replacing any existing one. `None` clears it.
    #[must_use]
    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    #[must_use]
    pub fn json_type(&self) -> JsonType {
        self.json_type
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    #[must_use]
    pub fn items(&self) -> Option<&FunctionArgument> {
        self.items.as_deref()
    }

    #[must_use]
    pub fn enum_values(&self) -> Option<&[String]> {
        self.enum_values.as_deref()
    }
}

/// The `parameters` object of a function definition.
///
/// Serializes as `{"type": "object", "properties": {...}, "required": [...]}`.
/// Properties keep first-seen insertion order so generated catalogs are
/// stable across runs; inserting an existing name replaces the argument in
/// place without moving it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FunctionParameters {
    properties: Vec<(String, FunctionArgument)>,
    required: Vec<String>,
}

impl FunctionParameters {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a parameter, appending its name to `required` when asked.
    pub fn insert(&mut self, name: impl Into<String>, argument: FunctionArgument, required: bool) {
        let name = name.into();
        if required && !self.required.contains(&name) {
            self.required.push(name.clone());
        }
        if let Some(slot) = self.properties.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = argument;
        } else {
            self.properties.push((name, argument));
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FunctionArgument> {
        self.properties
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, argument)| argument)
    }

    /// Parameter names in first-seen order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.properties.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FunctionArgument)> {
        self.properties
            .iter()
            .map(|(name, argument)| (name.as_str(), argument))
    }

    #[must_use]
    pub fn required(&self) -> &[String] {
        &self.required
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

impl Serialize for FunctionParameters {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Properties<'a>(
            #[serde(serialize_with = "ordered_map")] &'a [(String, FunctionArgument)],
        );

        let mut map = serializer.serialize_map(Some(3))?;
        map.serialize_entry("type", "object")?;
        map.serialize_entry("properties", &Properties(&self.properties))?;
        map.serialize_entry("required", &self.required)?;
        map.end()
    }
}

fn ordered_map<S: Serializer>(
    entries: &[(String, FunctionArgument)],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_map(entries.iter().map(|(name, argument)| (name, argument)))
}

/// Definition of a function the language model may invoke.
///
/// This mirrors the JSON representation OpenAI and most LLM chat APIs use for
/// functions/tools. It is plain data; wrappers such as
/// [`ApiFunction`](crate::ApiFunction) add behavior on top.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionDefinition {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub parameters: FunctionParameters,
}

impl FunctionDefinition {
    #[must_use]
    pub fn new(name: impl Into<String>, description: Option<String>) -> Self {
        Self {
            name: name.into(),
            description: description.filter(|d| !d.is_empty()),
            parameters: FunctionParameters::new(),
        }
    }
}

/// A fully resolved GraphQL query template.
///
/// All parameters appear as declared variables; callers supply values at
/// execution time keyed by the names recorded in [`FunctionParameters`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiQuery {
    pub query: String,
}

impl ApiQuery {
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
        }
    }
}

impl From<String> for ApiQuery {
    fn from(query: String) -> Self {
        Self::new(query)
    }
}
