//! Option tables for the flat configuration map
//!
//! Every recognised option is declared once with its default (as text) and
//! the function that coerces a text value into the configuration. Layout
//! options use bare keys; style options are prefixed with `nodestyle.` or
//! `linestyle.`. An empty value resets an option to its default.
//!
//! The same keys can be given as TOML tables:
//!
//! ```toml
//! [layout]
//! align_angle = 90
//! labels = "numbered"
//!
//! [nodestyle]
//! fill_color = "white"
//!
//! [linestyle]
//! directed = false
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::layout::DEFAULT_SEED;
use crate::style::node::MAX_NODE_SCALE;
use crate::RenderConfig;

/// Errors that can occur when reading configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("unknown option '{0}'")]
    UnknownKey(String),
    #[error("invalid value '{value}' for option '{key}': {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

type Apply = fn(&mut RenderConfig, &str) -> Result<(), String>;

/// One recognised option
pub struct ConfigOption {
    pub key: &'static str,
    /// Default value in the textual form accepted by `apply`
    pub default: &'static str,
    pub description: &'static str,
    apply: Apply,
}

impl std::fmt::Debug for ConfigOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigOption")
            .field("key", &self.key)
            .field("default", &self.default)
            .finish()
    }
}

/// Options of the layout engine and the renderer, under bare keys
pub const LAYOUT_OPTIONS: &[ConfigOption] = &[
    ConfigOption {
        key: "align_angle",
        default: "0",
        description: "direction of the principal axis in degrees",
        apply: |c: &mut RenderConfig, v: &str| {
            c.layout.align_angle = parse_finite(v)?;
            Ok(())
        },
    },
    ConfigOption {
        key: "seed",
        default: "None",
        description: "spring simulation seed",
        apply: |c: &mut RenderConfig, v: &str| {
            c.layout.seed = parse_seed(v)?;
            Ok(())
        },
    },
    ConfigOption {
        key: "loops_are_nodes",
        default: "false",
        description: "simulate self-loops as extra nodes",
        apply: |c: &mut RenderConfig, v: &str| {
            c.layout.loops_are_nodes = parse_bool(v)?;
            Ok(())
        },
    },
    ConfigOption {
        key: "labels",
        default: "none",
        description: "node labels: none or numbered",
        apply: |c: &mut RenderConfig, v: &str| {
            c.labels = v.parse()?;
            Ok(())
        },
    },
    ConfigOption {
        key: "scale",
        default: "3",
        description: "overall drawing scale",
        apply: |c: &mut RenderConfig, v: &str| {
            c.layout.scale = parse_positive(v)?;
            Ok(())
        },
    },
    ConfigOption {
        key: "loop_placement",
        default: "mean",
        description: "self-loops on crowded nodes: mean or largest_gap",
        apply: |c: &mut RenderConfig, v: &str| {
            c.layout.loop_placement = v.parse()?;
            Ok(())
        },
    },
];

/// Node style options, under `nodestyle.`
pub const NODE_OPTIONS: &[ConfigOption] = &[
    ConfigOption {
        key: "shape",
        default: "circle",
        description: "TikZ node shape",
        apply: |c: &mut RenderConfig, v: &str| {
            c.node_style.shape = parse_word(v)?;
            Ok(())
        },
    },
    ConfigOption {
        key: "line_color",
        default: "black",
        description: "node border colour",
        apply: |c: &mut RenderConfig, v: &str| {
            c.node_style.line_color = parse_word(v)?;
            Ok(())
        },
    },
    ConfigOption {
        key: "fill_color",
        default: "black",
        description: "node fill colour",
        apply: |c: &mut RenderConfig, v: &str| {
            c.node_style.fill_color = parse_word(v)?;
            Ok(())
        },
    },
    ConfigOption {
        key: "scale",
        default: "0.3",
        description: "node size, capped at 2",
        apply: |c: &mut RenderConfig, v: &str| {
            c.node_style.scale = parse_positive(v)?.min(MAX_NODE_SCALE);
            Ok(())
        },
    },
    ConfigOption {
        key: "outer_sep",
        default: "auto",
        description: "gap between node and edges in cm, or auto",
        apply: |c: &mut RenderConfig, v: &str| {
            c.node_style.outer_sep = match v.trim() {
                "auto" | "none" | "None" => None,
                other => Some(parse_non_negative(other)?),
            };
            Ok(())
        },
    },
];

/// Line style options, under `linestyle.`
pub const LINE_OPTIONS: &[ConfigOption] = &[
    ConfigOption {
        key: "color",
        default: "black",
        description: "edge colour",
        apply: |c: &mut RenderConfig, v: &str| {
            c.line_style.color = parse_word(v)?;
            Ok(())
        },
    },
    ConfigOption {
        key: "directed",
        default: "true",
        description: "draw arrow tips",
        apply: |c: &mut RenderConfig, v: &str| {
            c.line_style.directed = parse_bool(v)?;
            Ok(())
        },
    },
    ConfigOption {
        key: "arrow_mark_location",
        default: "0.65",
        description: "arrow position along the edge, 1 puts it at the end",
        apply: |c: &mut RenderConfig, v: &str| {
            let location = parse_finite(v)?;
            if !(0.0..=1.0).contains(&location) {
                return Err(format!("must be between 0 and 1, got {}", location));
            }
            c.line_style.arrow_mark_location = location;
            Ok(())
        },
    },
    ConfigOption {
        key: "line_width",
        default: "0.3",
        description: "edge width in points",
        apply: |c: &mut RenderConfig, v: &str| {
            c.line_style.line_width = parse_non_negative(v)?;
            Ok(())
        },
    },
    ConfigOption {
        key: "selfloop_size",
        default: "0.5",
        description: "self-loop size",
        apply: |c: &mut RenderConfig, v: &str| {
            c.line_style.selfloop_size = parse_non_negative(v)?;
            Ok(())
        },
    },
    ConfigOption {
        key: "arrow_tip",
        default: ">",
        description: "TikZ arrow tip",
        apply: |c: &mut RenderConfig, v: &str| {
            c.line_style.arrow_tip = parse_word(v)?;
            Ok(())
        },
    },
];

/// Option tables with the prefix their keys carry in the flat map
pub const SECTIONS: &[(Option<&str>, &[ConfigOption])] = &[
    (None, LAYOUT_OPTIONS),
    (Some("nodestyle"), NODE_OPTIONS),
    (Some("linestyle"), LINE_OPTIONS),
];

/// Every option with its full flat-map key
pub fn all_options() -> impl Iterator<Item = (String, &'static ConfigOption)> {
    SECTIONS.iter().flat_map(|&(prefix, options)| {
        options.iter().map(move |option| (full_key(prefix, option.key), option))
    })
}

fn full_key(prefix: Option<&str>, key: &str) -> String {
    match prefix {
        Some(prefix) => format!("{}.{}", prefix, key),
        None => key.to_string(),
    }
}

fn lookup(key: &str) -> Option<&'static ConfigOption> {
    let (prefix, name) = match key.split_once('.') {
        Some((prefix, name)) => (Some(prefix), name),
        None => (None, key),
    };
    SECTIONS
        .iter()
        .find(|(p, _)| *p == prefix)
        .and_then(|(_, options)| options.iter().find(|o| o.key == name))
}

impl RenderConfig {
    /// Set one option from its flat-map key and textual value
    pub fn set_option(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let option = lookup(key).ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
        let text = if value.trim().is_empty() {
            option.default
        } else {
            value
        };
        (option.apply)(self, text).map_err(|reason| ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            reason,
        })?;
        debug!(key, value = text, "option set");
        Ok(())
    }

    /// Apply every entry of a flat map, in order
    pub fn set_options<I, K, V>(&mut self, options: I) -> Result<(), ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (key, value) in options {
            self.set_option(key.as_ref(), value.as_ref())?;
        }
        Ok(())
    }

    /// Build a configuration from defaults overridden by a flat map
    pub fn from_options<I, K, V>(options: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut config = Self::default();
        config.set_options(options)?;
        Ok(config)
    }

    /// Apply options from a TOML document with `[layout]`, `[nodestyle]` and
    /// `[linestyle]` tables
    pub fn apply_toml_str(&mut self, content: &str) -> Result<(), ConfigError> {
        let parsed: TomlConfig = toml::from_str(content)?;
        let tables = [
            (None, parsed.layout),
            (Some("nodestyle"), parsed.nodestyle),
            (Some("linestyle"), parsed.linestyle),
        ];
        for (prefix, table) in tables {
            for (key, value) in table {
                let key = full_key(prefix, &key);
                let text = toml_value_text(&key, &value)?;
                self.set_option(&key, &text)?;
            }
        }
        Ok(())
    }

    /// Apply options from a TOML file
    pub fn apply_toml_file(&mut self, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path)?;
        self.apply_toml_str(&content)
    }
}

/// TOML structure for deserializing configuration files
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlConfig {
    #[serde(default)]
    layout: BTreeMap<String, toml::Value>,
    #[serde(default)]
    nodestyle: BTreeMap<String, toml::Value>,
    #[serde(default)]
    linestyle: BTreeMap<String, toml::Value>,
}

fn toml_value_text(key: &str, value: &toml::Value) -> Result<String, ConfigError> {
    match value {
        toml::Value::String(s) => Ok(s.clone()),
        toml::Value::Integer(i) => Ok(i.to_string()),
        toml::Value::Float(f) => Ok(f.to_string()),
        toml::Value::Boolean(b) => Ok(b.to_string()),
        other => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: other.to_string(),
            reason: format!("expected a scalar, got {}", other.type_str()),
        }),
    }
}

fn parse_finite(v: &str) -> Result<f64, String> {
    let value: f64 = v
        .trim()
        .parse()
        .map_err(|_| format!("expected a number, got '{}'", v.trim()))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err("must be finite".to_string())
    }
}

fn parse_positive(v: &str) -> Result<f64, String> {
    let value = parse_finite(v)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(format!("must be positive, got {}", value))
    }
}

fn parse_non_negative(v: &str) -> Result<f64, String> {
    let value = parse_finite(v)?;
    if value >= 0.0 {
        Ok(value)
    } else {
        Err(format!("must not be negative, got {}", value))
    }
}

fn parse_bool(v: &str) -> Result<bool, String> {
    match v.trim() {
        "true" | "True" | "1" | "yes" => Ok(true),
        "false" | "False" | "0" | "no" => Ok(false),
        other => Err(format!("expected true or false, got '{}'", other)),
    }
}

fn parse_seed(v: &str) -> Result<u64, String> {
    match v.trim() {
        "none" | "None" => Ok(DEFAULT_SEED),
        other => other
            .parse()
            .map_err(|_| format!("expected a non-negative integer, got '{}'", other)),
    }
}

/// A single TikZ word such as a colour or shape name
fn parse_word(v: &str) -> Result<String, String> {
    let word = v.trim();
    if word.contains(['{', '}', ';', '\\']) {
        return Err(format!("'{}' would break the TikZ output", word));
    }
    Ok(word.to_string())
}
