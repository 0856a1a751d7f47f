use serde::{Deserialize, Deserializer, Serialize};
use toml::Value;

use crate::error::{PluginError, Result};

pub const PLUGIN_ID: &str = "heroicon";
pub const PLUGIN_NAME: &str = "Heroicon";
pub const PLUGIN_AUTHOR: &str = "tedem";
pub const PLUGIN_VERSION: &str = "1.0.0";
pub const AUTHOR_SITE: &str = "https://tedem.dev";
pub const COMPATIBILITY: &str = "18*";

pub const DESCRIPTION: &str = r#"<div style="margin-top: 1em;">
    It allows you to use heroicons created by the makers of Tailwind CSS in mybb posts as MyCode.
</div>"#;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PluginId(pub String);

impl PluginId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Key this plugin owns inside its author's cache namespace.
    pub fn as_key(&self) -> &str {
        &self.0
    }
}

impl Default for PluginId {
    fn default() -> Self {
        Self::new(PLUGIN_ID)
    }
}

/// Metadata shown in the host's plugin list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PluginInfo {
    pub name: String,
    pub description: String,
    pub website: String,
    pub author: String,
    pub authorsite: String,
    pub version: String,
    pub codename: String,
    pub compatibility: String,
}

impl PluginInfo {
    pub fn new(description: String) -> Self {
        Self {
            name: PLUGIN_NAME.to_string(),
            description,
            website: AUTHOR_SITE.to_string(),
            author: PLUGIN_AUTHOR.to_string(),
            authorsite: AUTHOR_SITE.to_string(),
            version: PLUGIN_VERSION.to_string(),
            codename: format!("{PLUGIN_AUTHOR}_{PLUGIN_ID}"),
            compatibility: COMPATIBILITY.to_string(),
        }
    }
}

/// The entry this plugin keeps in its author's cache namespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistrationRecord {
    pub name: String,
    pub author: String,
    pub version: String,
    #[serde(deserialize_with = "deserialize_flag")]
    pub donation: i64,
}

impl RegistrationRecord {
    pub fn fresh() -> Self {
        Self {
            name: PLUGIN_NAME.to_string(),
            author: PLUGIN_AUTHOR.to_string(),
            version: PLUGIN_VERSION.to_string(),
            donation: 1,
        }
    }

    pub fn to_value(&self) -> Result<Value> {
        Ok(Value::try_from(self)?)
    }

    pub fn from_value(value: Value) -> Result<Self> {
        value
            .try_into::<Self>()
            .map_err(|err| PluginError::Record(err.to_string()))
    }
}

/// Any stored flag form reads back as 0 or 1, agreeing with [`flag_is_set`].
fn deserialize_flag<'de, D>(deserializer: D) -> std::result::Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(i64::from(flag_is_set(&value)))
}

/// Loose "equals 1" test for a stored donation flag.
///
/// Rows written by this crate always hold integer 0/1; other writers may have
/// stored the flag as a bool, float or string.
pub fn flag_is_set(value: &Value) -> bool {
    match value {
        Value::Integer(n) => *n == 1,
        Value::Float(f) => *f == 1.0,
        Value::Boolean(b) => *b,
        Value::String(s) => s.trim().parse::<f64>().is_ok_and(|n| n == 1.0),
        _ => false,
    }
}
