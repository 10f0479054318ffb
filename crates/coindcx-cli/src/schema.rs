//! Declarative method schema and argument conversion
//!
//! Every callable method is described by a static [`MethodSpec`]. Raw
//! `--name=value` arguments are checked against it and converted with
//! [`convert`], so the dispatcher only ever sees typed values.

use rust_decimal::Decimal;
use std::str::FromStr;

use crate::error::CliError;

/// Expected kind of a parameter value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    Str,
    Int,
    /// Decimal number, kept exact
    Float,
    Bool,
    List,
}

impl ParamKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Str => "string",
            Self::Int => "integer",
            Self::Float => "number",
            Self::Bool => "boolean",
            Self::List => "list",
        }
    }
}

/// One declared parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamSpec {
    pub name: &'static str,
    pub kind: ParamKind,
    pub required: bool,
    /// Raw default, converted like a user-supplied value
    pub default: Option<&'static str>,
}

impl ParamSpec {
    pub const fn required(name: &'static str, kind: ParamKind) -> Self {
        Self {
            name,
            kind,
            required: true,
            default: None,
        }
    }

    pub const fn optional(name: &'static str, kind: ParamKind) -> Self {
        Self {
            name,
            kind,
            required: false,
            default: None,
        }
    }

    pub const fn with_default(name: &'static str, kind: ParamKind, default: &'static str) -> Self {
        Self {
            name,
            kind,
            required: false,
            default: Some(default),
        }
    }

    /// `--name=<value>` or `[--name=default]`
    pub fn usage_fragment(&self) -> String {
        match (self.required, self.default) {
            (true, _) => format!("--{}=<value>", self.name),
            (false, Some(default)) => format!("[--{}={}]", self.name, default),
            (false, None) => format!("[--{}=<{}>]", self.name, self.kind.as_str()),
        }
    }
}

/// One callable client method
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MethodSpec {
    pub name: &'static str,
    pub summary: &'static str,
    pub authenticated: bool,
    pub params: &'static [ParamSpec],
}

impl MethodSpec {
    pub fn param(&self, name: &str) -> Option<&ParamSpec> {
        self.params.iter().find(|p| p.name == name)
    }

    /// Usage line shown on parameter errors
    pub fn usage(&self) -> String {
        let mut line = format!("Usage: coindcx {}", self.name);
        for param in self.params {
            line.push(' ');
            line.push_str(&param.usage_fragment());
        }
        line
    }
}

/// A converted argument value
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    Str(String),
    Int(i64),
    Float(Decimal),
    Bool(bool),
    List(Vec<String>),
}

/// Convert a raw string to the declared kind
///
/// # Errors
/// `CliError::Usage` when the value does not parse as `kind`
pub fn convert(kind: ParamKind, raw: &str) -> Result<ArgValue, CliError> {
    let raw = raw.trim();
    match kind {
        ParamKind::Str => Ok(ArgValue::Str(raw.to_string())),
        ParamKind::Int => raw
            .parse::<i64>()
            .map(ArgValue::Int)
            .map_err(|_| CliError::usage(format!("expected an integer, got '{raw}'"))),
        ParamKind::Float => Decimal::from_str(raw)
            .or_else(|_| Decimal::from_scientific(raw))
            .map(ArgValue::Float)
            .map_err(|_| CliError::usage(format!("expected a number, got '{raw}'"))),
        ParamKind::Bool => parse_bool(raw).map(ArgValue::Bool),
        ParamKind::List => Ok(ArgValue::List(parse_list(raw))),
    }
}

fn parse_bool(raw: &str) -> Result<bool, CliError> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "y" => Ok(true),
        "false" | "0" | "no" | "n" => Ok(false),
        _ => Err(CliError::usage(format!("expected a boolean, got '{raw}'"))),
    }
}

/// JSON array, else comma-separated, else a single item
fn parse_list(raw: &str) -> Vec<String> {
    if raw.starts_with('[') {
        if let Ok(serde_json::Value::Array(items)) = serde_json::from_str::<serde_json::Value>(raw) {
            return items
                .into_iter()
                .map(|item| match item {
                    serde_json::Value::String(s) => s,
                    other => other.to_string(),
                })
                .collect();
        }
    }
    if raw.contains(',') {
        return raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
    }
    if raw.is_empty() {
        Vec::new()
    } else {
        vec![raw.to_string()]
    }
}

/// Split `--name=value` into its parts
///
/// Dashes in the name are normalized to underscores.
pub fn split_arg(arg: &str) -> Result<(String, &str), CliError> {
    let body = arg
        .strip_prefix("--")
        .ok_or_else(|| CliError::usage(format!("Invalid argument format: {arg}. Use --key=value")))?;
    let (name, value) = body
        .split_once('=')
        .ok_or_else(|| CliError::usage(format!("Invalid argument format: {arg}. Use --key=value")))?;
    if name.is_empty() {
        return Err(CliError::usage(format!("Invalid argument format: {arg}. Use --key=value")));
    }
    Ok((name.replace('-', "_"), value))
}

/// Converted arguments for one method call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MethodArgs {
    values: Vec<(&'static str, ArgValue)>,
}

impl MethodArgs {
    /// Check `raw` against `spec`, fill defaults and convert every value
    ///
    /// # Errors
    /// `CliError::Usage` for unknown or repeated parameters, malformed
    /// values and missing required parameters
    pub fn parse(spec: &MethodSpec, raw: &[(String, String)]) -> Result<Self, CliError> {
        let mut args = Self::default();

        for (name, value) in raw {
            let param = spec
                .param(name)
                .ok_or_else(|| CliError::usage(format!("Unknown parameter for {}: --{name}", spec.name)))?;
            if args.get(param.name).is_some() {
                return Err(CliError::usage(format!("Parameter given twice: --{name}")));
            }
            let converted = convert(param.kind, value)
                .map_err(|e| CliError::usage(format!("Invalid value for --{name}: {e}")))?;
            args.values.push((param.name, converted));
        }

        for param in spec.params {
            if args.get(param.name).is_some() {
                continue;
            }
            if param.required {
                return Err(CliError::usage(format!("Missing required parameter: --{}", param.name)));
            }
            if let Some(default) = param.default {
                args.values.push((param.name, convert(param.kind, default)?));
            }
        }

        Ok(args)
    }

    pub fn get(&self, name: &str) -> Option<&ArgValue> {
        self.values.iter().find(|(n, _)| *n == name).map(|(_, v)| v)
    }

    pub fn str(&self, name: &str) -> Option<&str> {
        match self.get(name) {
            Some(ArgValue::Str(s)) => Some(s),
            _ => None,
        }
    }

    pub fn require_str(&self, name: &str) -> Result<&str, CliError> {
        self.str(name).ok_or_else(|| missing(name))
    }

    pub fn decimal(&self, name: &str) -> Option<Decimal> {
        match self.get(name) {
            Some(ArgValue::Float(d)) => Some(*d),
            Some(ArgValue::Int(i)) => Some(Decimal::from(*i)),
            _ => None,
        }
    }

    pub fn require_decimal(&self, name: &str) -> Result<Decimal, CliError> {
        self.decimal(name).ok_or_else(|| missing(name))
    }

    pub fn int(&self, name: &str) -> Option<i64> {
        match self.get(name) {
            Some(ArgValue::Int(i)) => Some(*i),
            _ => None,
        }
    }

    /// Integer narrowed to an unsigned type
    pub fn unsigned<T: TryFrom<i64>>(&self, name: &str) -> Result<Option<T>, CliError> {
        self.int(name)
            .map(|v| {
                T::try_from(v)
                    .map_err(|_| CliError::usage(format!("Invalid value for --{name}: {v} is out of range")))
            })
            .transpose()
    }

    pub fn require_unsigned<T: TryFrom<i64>>(&self, name: &str) -> Result<T, CliError> {
        self.unsigned(name)?.ok_or_else(|| missing(name))
    }

    pub fn bool(&self, name: &str) -> Option<bool> {
        match self.get(name) {
            Some(ArgValue::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    /// List value, empty when absent
    pub fn list(&self, name: &str) -> &[String] {
        match self.get(name) {
            Some(ArgValue::List(items)) => items,
            _ => &[],
        }
    }
}

fn missing(name: &str) -> CliError {
    CliError::usage(format!("Missing required parameter: --{name}"))
}
