// Copyright 2025 Apache Doris Community
// Licensed under the Apache License, Version 2.0

//! Statement templates
//!
//! A template renders itself against a `RuntimeContext`, writing statement
//! text and bind values into the context's `SqlDescriptor`. It also reports
//! which placeholders expand into a variable-length `IN (...)` list so the
//! result contract can be validated when the statement is registered.

use dao_common::constants::{BIND_MARKER, EMPTY_EXPANSION, PLACEHOLDER_PREFIX};
use dao_common::utils::split_property_path;
use dao_common::{DaoError, DataType, Result, Value};
use std::fmt;
use tracing::debug;

use crate::context::RuntimeContext;

/// A reference to a parameter, optionally through a property path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    pub name: String,
    pub property_path: String,
}

impl Placeholder {
    pub fn new(name: impl Into<String>, property_path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            property_path: property_path.into(),
        }
    }

    /// Parse `name` or `name.a.b`
    pub fn parse(full: &str) -> Self {
        let (name, path) = split_property_path(full);
        Self::new(name, path)
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.property_path.is_empty() {
            write!(f, ":{}", self.name)
        } else {
            write!(f, ":{}.{}", self.name, self.property_path)
        }
    }
}

pub trait Template: Send + Sync {
    /// Render into `context.sql_descriptor_mut()`
    fn render(&self, context: &mut RuntimeContext) -> Result<()>;

    /// Placeholders that expand into multiple bind values
    fn iterable_parameters(&self) -> &[Placeholder];
}

#[derive(Debug, Clone, PartialEq)]
enum Segment {
    Text(String),
    Bind(Placeholder),
    Expand(Placeholder),
}

/// Template using `:name` / `:name.path` placeholders.
///
/// A placeholder directly inside `IN (` is expanded into one bind marker per
/// element of its sequence value.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedTemplate {
    sql: String,
    segments: Vec<Segment>,
    iterable_parameters: Vec<Placeholder>,
}

impl NamedTemplate {
    pub fn parse(sql: &str) -> Result<Self> {
        let chars: Vec<char> = sql.chars().collect();
        let mut segments = Vec::new();
        let mut iterable_parameters = Vec::new();
        let mut text = String::new();
        let mut in_quote = false;
        let mut i = 0;

        while i < chars.len() {
            let c = chars[i];
            if c == '\'' {
                in_quote = !in_quote;
                text.push(c);
                i += 1;
                continue;
            }
            if in_quote || c != PLACEHOLDER_PREFIX {
                text.push(c);
                i += 1;
                continue;
            }
            // `::` is a cast, not a placeholder
            if chars.get(i + 1) == Some(&PLACEHOLDER_PREFIX) {
                text.push_str("::");
                i += 2;
                continue;
            }

            let start = i + 1;
            let mut end = start;
            while end < chars.len() && (chars[end].is_ascii_alphanumeric() || chars[end] == '_' || chars[end] == '.') {
                end += 1;
            }
            if end == start {
                text.push(c);
                i += 1;
                continue;
            }

            let full: String = chars[start..end].iter().collect();
            if full.starts_with('.') || full.ends_with('.') || full.contains("..") {
                return Err(DaoError::Template(format!("malformed placeholder :{}", full)));
            }
            let placeholder = Placeholder::parse(&full);
            let expand = ends_with_in_clause(&text);

            if !text.is_empty() {
                segments.push(Segment::Text(std::mem::take(&mut text)));
            }
            if expand {
                iterable_parameters.push(placeholder.clone());
                segments.push(Segment::Expand(placeholder));
            } else {
                segments.push(Segment::Bind(placeholder));
            }
            i = end;
        }

        if in_quote {
            return Err(DaoError::Template(format!("unterminated string literal in {}", sql)));
        }
        if !text.is_empty() {
            segments.push(Segment::Text(text));
        }

        Ok(Self {
            sql: sql.to_string(),
            segments,
            iterable_parameters,
        })
    }

    /// The template source
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Every placeholder in source order
    pub fn placeholders(&self) -> impl Iterator<Item = &Placeholder> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Bind(p) | Segment::Expand(p) => Some(p),
            Segment::Text(_) => None,
        })
    }
}

impl Template for NamedTemplate {
    fn render(&self, context: &mut RuntimeContext) -> Result<()> {
        let mut sql = String::with_capacity(self.sql.len());
        let mut args = Vec::new();

        for segment in &self.segments {
            match segment {
                Segment::Text(text) => sql.push_str(text),
                Segment::Bind(p) => {
                    let data_type = context.parameters().get_property_type(&p.name, &p.property_path)?;
                    if let DataType::Struct(name) = &data_type {
                        return Err(DaoError::Binding(format!(
                            "{} has struct type {} and cannot be bound to a single marker",
                            p, name
                        )));
                    }
                    sql.push_str(BIND_MARKER);
                    args.push(context.get_property_value(&p.name, &p.property_path)?.clone());
                }
                Segment::Expand(p) => {
                    let data_type = context.parameters().get_property_type(&p.name, &p.property_path)?;
                    if !data_type.is_iterable() {
                        return Err(DaoError::NotIterableParameter(format!(
                            "{} has type {}, expected a list, set or array",
                            p, data_type
                        )));
                    }
                    match context.get_property_value(&p.name, &p.property_path)? {
                        Value::List(items) if items.is_empty() => sql.push_str(EMPTY_EXPANSION),
                        Value::List(items) => {
                            let markers = vec![BIND_MARKER; items.len()];
                            sql.push_str(&markers.join(", "));
                            args.extend(items.iter().cloned());
                        }
                        Value::Null => {
                            return Err(DaoError::Binding(format!("{} is null", p)));
                        }
                        other => {
                            return Err(DaoError::NotIterableParameter(format!(
                                "{} holds a {} value",
                                p,
                                other.kind()
                            )))
                        }
                    }
                }
            }
        }

        debug!(sql = %sql, args = args.len(), "template rendered");
        let descriptor = context.sql_descriptor_mut();
        descriptor.push_sql(&sql);
        for arg in args {
            descriptor.push_arg(arg);
        }
        Ok(())
    }

    fn iterable_parameters(&self) -> &[Placeholder] {
        &self.iterable_parameters
    }
}

/// True when `text` ends with `IN (` (any case, optional whitespace)
fn ends_with_in_clause(text: &str) -> bool {
    let Some(before_paren) = text.trim_end().strip_suffix('(') else {
        return false;
    };
    let before_paren = before_paren.trim_end();
    if before_paren.len() < 2 || !before_paren.is_char_boundary(before_paren.len() - 2) {
        return false;
    }
    let (head, keyword) = before_paren.split_at(before_paren.len() - 2);
    keyword.eq_ignore_ascii_case("in")
        && !head
            .chars()
            .next_back()
            .map_or(false, |c| c.is_alphanumeric() || c == '_')
}
