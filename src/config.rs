// Configuration module
// Internal representation of user configuration

use std::collections::HashMap;

/// A `from -> to` redirection, used for both unit and verb aliases
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alias {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub keybindings: HashMap<String, String>,
    pub settings: HashMap<String, ConfigValue>,
    /// Manifest assemblies scanned when building the catalog
    pub assemblies: Vec<String>,
    /// Namespace fragments whose types are never scanned
    pub exclude_namespaces: Vec<String>,
    pub unit_aliases: Vec<Alias>,
    pub command_aliases: Vec<Alias>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValue {
    Bool(bool),
    Int(i64),
    String(String),
}

impl Config {
    pub fn default() -> Self {
        Self {
            keybindings: HashMap::new(),
            settings: HashMap::new(),
            assemblies: Vec::new(),
            exclude_namespaces: Vec::new(),
            unit_aliases: Vec::new(),
            command_aliases: Vec::new(),
        }
    }

    /// Bind a key to a prompt action
    pub fn bind(&mut self, key: &str, action: &str) {
        self.keybindings.insert(key.to_string(), action.to_string());
    }

    /// Set a configuration value
    pub fn set<V: Into<ConfigValue>>(&mut self, key: &str, value: V) {
        self.settings.insert(key.to_string(), value.into());
    }

    /// Expose catalog entry `to` under the extra name `from`
    pub fn alias_unit(&mut self, from: &str, to: &str) {
        self.unit_aliases.push(Alias {
            from: from.to_string(),
            to: to.to_string(),
        });
    }

    /// Register verb `from` as another spelling of verb `to`
    pub fn alias_command(&mut self, from: &str, to: &str) {
        self.command_aliases.push(Alias {
            from: from.to_string(),
            to: to.to_string(),
        });
    }

    /// Get a setting value
    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.settings.get(key)
    }

    /// Get string setting
    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(|v| match v {
            ConfigValue::String(s) => Some(s.as_str()),
            _ => None,
        })
    }

    /// Get boolean setting (Test helper)
    #[cfg(test)]
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(|v| match v {
            ConfigValue::Bool(b) => Some(*b),
            _ => None,
        })
    }

    /// Get integer setting (Test helper)
    #[cfg(test)]
    pub fn get_int(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(|v| match v {
            ConfigValue::Int(i) => Some(*i),
            _ => None,
        })
    }
}

impl From<bool> for ConfigValue {
    fn from(b: bool) -> Self {
        ConfigValue::Bool(b)
    }
}

impl From<i64> for ConfigValue {
    fn from(i: i64) -> Self {
        ConfigValue::Int(i)
    }
}

impl From<&str> for ConfigValue {
    fn from(s: &str) -> Self {
        ConfigValue::String(s.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(s: String) -> Self {
        ConfigValue::String(s)
    }
}
