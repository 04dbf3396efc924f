//! Minimal request parsing for the single query/mutation endpoint.
//!
//! This is transport glue, not a full query-language implementation: it
//! extracts the top-level fields of the requested operation together with
//! their arguments, resolving `$variable` references against the request's
//! variables. Sub-selections are scanned only to find where they end - the
//! resolvers always return fully hydrated projections. No schema validation
//! happens here; unknown fields are rejected at dispatch time.

use serde_json::{Map, Number, Value};
use thiserror::Error;

/// A syntax or variable-resolution failure in the incoming request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ParseError(pub String);

/// The kind of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Query,
    Mutation,
}

/// One parsed operation: its kind, optional name, and top-level fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    pub kind: OperationKind,
    pub name: Option<String>,
    pub fields: Vec<Field>,
}

/// One top-level field with its arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub alias: Option<String>,
    pub arguments: Vec<(String, RawValue)>,
}

impl Field {
    /// The key this field's result is serialized under in the response.
    pub fn response_key(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }
}

/// An argument value as written in the request, before variable resolution.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Enum(String),
    List(Vec<RawValue>),
    Object(Vec<(String, RawValue)>),
    Variable(String),
}

impl RawValue {
    /// Resolves this value into plain JSON, substituting variables.
    pub fn resolve(&self, variables: &Map<String, Value>) -> Result<Value, ParseError> {
        match self {
            Self::Null => Ok(Value::Null),
            Self::Bool(b) => Ok(Value::Bool(*b)),
            Self::Int(i) => Ok(Value::Number(Number::from(*i))),
            Self::Float(f) => Number::from_f64(*f)
                .map(Value::Number)
                .ok_or_else(|| ParseError(format!("Non-finite number: {f}"))),
            Self::Str(s) | Self::Enum(s) => Ok(Value::String(s.clone())),
            Self::List(values) => values
                .iter()
                .map(|v| v.resolve(variables))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),
            Self::Object(entries) => {
                let mut map = Map::with_capacity(entries.len());
                for (key, value) in entries {
                    map.insert(key.clone(), value.resolve(variables)?);
                }
                Ok(Value::Object(map))
            }
            Self::Variable(name) => variables.get(name).cloned().ok_or_else(|| {
                ParseError(format!("Variable \"${name}\" is not defined"))
            }),
        }
    }
}

/// Parses a request document into its operations.
pub fn parse(query: &str) -> Result<Vec<Operation>, ParseError> {
    let mut parser = Parser::new(query);
    let mut operations = Vec::new();

    parser.skip_ignored();
    while !parser.at_end() {
        operations.push(parser.parse_operation()?);
        parser.skip_ignored();
    }

    if operations.is_empty() {
        return Err(ParseError(
            "Document must contain at least one operation".to_string(),
        ));
    }
    Ok(operations)
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
}

impl Parser {
    fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            pos: 0,
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn next(&mut self) -> Option<char> {
        let c = self.peek();
        if c.is_some() {
            self.pos += 1;
        }
        c
    }

    fn expect(&mut self, expected: char) -> Result<(), ParseError> {
        match self.next() {
            Some(c) if c == expected => Ok(()),
            Some(c) => Err(ParseError(format!("Expected `{expected}`, found `{c}`"))),
            None => Err(ParseError(format!(
                "Expected `{expected}`, found end of query"
            ))),
        }
    }

    // Whitespace, commas, and # comments are all insignificant.
    fn skip_ignored(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_whitespace() || c == ',' {
                self.pos += 1;
            } else if c == '#' {
                while let Some(c) = self.next() {
                    if c == '\n' {
                        break;
                    }
                }
            } else {
                break;
            }
        }
    }

    fn parse_name(&mut self) -> Result<String, ParseError> {
        let mut name = String::new();
        match self.peek() {
            Some(c) if c.is_ascii_alphabetic() || c == '_' => {
                name.push(c);
                self.pos += 1;
            }
            Some(c) => return Err(ParseError(format!("Expected a name, found `{c}`"))),
            None => {
                return Err(ParseError(
                    "Expected a name, found end of query".to_string(),
                ));
            }
        }
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || c == '_' {
                name.push(c);
                self.pos += 1;
            } else {
                break;
            }
        }
        Ok(name)
    }

    fn parse_operation(&mut self) -> Result<Operation, ParseError> {
        // Shorthand form: a bare selection set is a query.
        if self.peek() == Some('{') {
            return Ok(Operation {
                kind: OperationKind::Query,
                name: None,
                fields: self.parse_selection_set()?,
            });
        }

        let keyword = self.parse_name()?;
        let kind = match keyword.as_str() {
            "query" => OperationKind::Query,
            "mutation" => OperationKind::Mutation,
            other => {
                return Err(ParseError(format!(
                    "Unsupported operation type \"{other}\""
                )));
            }
        };

        self.skip_ignored();
        let name = match self.peek() {
            Some(c) if c.is_ascii_alphabetic() || c == '_' => Some(self.parse_name()?),
            _ => None,
        };

        // Variable definitions carry type information the dispatcher does
        // not need; arguments reference variables by name only.
        self.skip_ignored();
        if self.peek() == Some('(') {
            self.skip_balanced('(', ')')?;
        }
        self.skip_directives()?;

        self.skip_ignored();
        let fields = self.parse_selection_set()?;

        Ok(Operation { kind, name, fields })
    }

    fn parse_selection_set(&mut self) -> Result<Vec<Field>, ParseError> {
        self.expect('{')?;
        let mut fields = Vec::new();
        loop {
            self.skip_ignored();
            match self.peek() {
                Some('}') => {
                    self.pos += 1;
                    break;
                }
                Some('.') => {
                    return Err(ParseError("Fragments are not supported".to_string()));
                }
                Some(_) => fields.push(self.parse_field()?),
                None => {
                    return Err(ParseError(
                        "Unexpected end of query inside a selection set".to_string(),
                    ));
                }
            }
        }
        if fields.is_empty() {
            return Err(ParseError("Selection set cannot be empty".to_string()));
        }
        Ok(fields)
    }

    fn parse_field(&mut self) -> Result<Field, ParseError> {
        let mut name = self.parse_name()?;
        let mut alias = None;

        self.skip_ignored();
        if self.peek() == Some(':') {
            self.pos += 1;
            self.skip_ignored();
            alias = Some(name);
            name = self.parse_name()?;
            self.skip_ignored();
        }

        let mut arguments = Vec::new();
        if self.peek() == Some('(') {
            self.pos += 1;
            loop {
                self.skip_ignored();
                match self.peek() {
                    Some(')') => {
                        self.pos += 1;
                        break;
                    }
                    None => {
                        return Err(ParseError(
                            "Unexpected end of query inside arguments".to_string(),
                        ));
                    }
                    Some(_) => {
                        let argument_name = self.parse_name()?;
                        self.skip_ignored();
                        self.expect(':')?;
                        self.skip_ignored();
                        let value = self.parse_value()?;
                        arguments.push((argument_name, value));
                    }
                }
            }
        }

        self.skip_directives()?;

        // The resolvers return full projections; a sub-selection narrows
        // nothing, so its content is skipped wholesale.
        self.skip_ignored();
        if self.peek() == Some('{') {
            self.skip_balanced('{', '}')?;
        }

        Ok(Field {
            name,
            alias,
            arguments,
        })
    }

    fn skip_directives(&mut self) -> Result<(), ParseError> {
        loop {
            self.skip_ignored();
            if self.peek() != Some('@') {
                return Ok(());
            }
            self.pos += 1;
            self.parse_name()?;
            self.skip_ignored();
            if self.peek() == Some('(') {
                self.skip_balanced('(', ')')?;
            }
        }
    }

    fn parse_value(&mut self) -> Result<RawValue, ParseError> {
        match self.peek() {
            Some('$') => {
                self.pos += 1;
                Ok(RawValue::Variable(self.parse_name()?))
            }
            Some('"') => Ok(RawValue::Str(self.parse_string()?)),
            Some('[') => {
                self.pos += 1;
                let mut values = Vec::new();
                loop {
                    self.skip_ignored();
                    match self.peek() {
                        Some(']') => {
                            self.pos += 1;
                            break;
                        }
                        None => {
                            return Err(ParseError(
                                "Unexpected end of query inside a list".to_string(),
                            ));
                        }
                        Some(_) => values.push(self.parse_value()?),
                    }
                }
                Ok(RawValue::List(values))
            }
            Some('{') => {
                self.pos += 1;
                let mut entries = Vec::new();
                loop {
                    self.skip_ignored();
                    match self.peek() {
                        Some('}') => {
                            self.pos += 1;
                            break;
                        }
                        None => {
                            return Err(ParseError(
                                "Unexpected end of query inside an object".to_string(),
                            ));
                        }
                        Some(_) => {
                            let key = self.parse_name()?;
                            self.skip_ignored();
                            self.expect(':')?;
                            self.skip_ignored();
                            entries.push((key, self.parse_value()?));
                        }
                    }
                }
                Ok(RawValue::Object(entries))
            }
            Some(c) if c == '-' || c.is_ascii_digit() => self.parse_number(),
            Some(c) if c.is_ascii_alphabetic() || c == '_' => {
                let word = self.parse_name()?;
                Ok(match word.as_str() {
                    "true" => RawValue::Bool(true),
                    "false" => RawValue::Bool(false),
                    "null" => RawValue::Null,
                    _ => RawValue::Enum(word),
                })
            }
            Some(c) => Err(ParseError(format!("Unexpected `{c}` in value position"))),
            None => Err(ParseError(
                "Expected a value, found end of query".to_string(),
            )),
        }
    }

    fn parse_string(&mut self) -> Result<String, ParseError> {
        self.expect('"')?;
        let mut out = String::new();
        loop {
            match self.next() {
                None => {
                    return Err(ParseError(
                        "Unterminated string in query".to_string(),
                    ));
                }
                Some('"') => return Ok(out),
                Some('\\') => match self.next() {
                    Some('"') => out.push('"'),
                    Some('\\') => out.push('\\'),
                    Some('/') => out.push('/'),
                    Some('b') => out.push('\u{0008}'),
                    Some('f') => out.push('\u{000C}'),
                    Some('n') => out.push('\n'),
                    Some('r') => out.push('\r'),
                    Some('t') => out.push('\t'),
                    Some('u') => {
                        let mut code = 0u32;
                        for _ in 0..4 {
                            let digit = self
                                .next()
                                .and_then(|c| c.to_digit(16))
                                .ok_or_else(|| {
                                    ParseError("Invalid \\u escape in string".to_string())
                                })?;
                            code = code * 16 + digit;
                        }
                        out.push(char::from_u32(code).ok_or_else(|| {
                            ParseError("Invalid \\u escape in string".to_string())
                        })?);
                    }
                    Some(c) => {
                        return Err(ParseError(format!("Invalid escape `\\{c}` in string")));
                    }
                    None => {
                        return Err(ParseError(
                            "Unterminated string in query".to_string(),
                        ));
                    }
                },
                Some(c) => out.push(c),
            }
        }
    }

    fn parse_number(&mut self) -> Result<RawValue, ParseError> {
        let start = self.pos;
        if self.peek() == Some('-') {
            self.pos += 1;
        }
        while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
            self.pos += 1;
        }

        let mut is_float = false;
        if self.peek() == Some('.') {
            is_float = true;
            self.pos += 1;
            while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
                self.pos += 1;
            }
        }
        if matches!(self.peek(), Some('e' | 'E')) {
            is_float = true;
            self.pos += 1;
            if matches!(self.peek(), Some('+' | '-')) {
                self.pos += 1;
            }
            while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
                self.pos += 1;
            }
        }

        let text: String = self.chars[start..self.pos].iter().collect();
        if is_float {
            text.parse::<f64>()
                .map(RawValue::Float)
                .map_err(|_| ParseError(format!("Invalid number `{text}`")))
        } else {
            text.parse::<i64>()
                .map(RawValue::Int)
                .map_err(|_| ParseError(format!("Invalid number `{text}`")))
        }
    }

    /// Skips a balanced bracket pair, ignoring brackets inside strings and
    /// comments. Used for variable definitions and sub-selections.
    fn skip_balanced(&mut self, open: char, close: char) -> Result<(), ParseError> {
        self.expect(open)?;
        let mut depth = 1usize;
        while depth > 0 {
            match self.next() {
                None => {
                    return Err(ParseError(format!(
                        "Unbalanced `{open}` in query"
                    )));
                }
                Some(c) if c == open => depth += 1,
                Some(c) if c == close => depth -= 1,
                Some('"') => {
                    // Consume the rest of the string so its content cannot
                    // unbalance the scan.
                    loop {
                        match self.next() {
                            None => {
                                return Err(ParseError(
                                    "Unterminated string in query".to_string(),
                                ));
                            }
                            Some('\\') => {
                                self.pos += 1;
                            }
                            Some('"') => break,
                            Some(_) => {}
                        }
                    }
                }
                Some('#') => {
                    while let Some(c) = self.next() {
                        if c == '\n' {
                            break;
                        }
                    }
                }
                Some(_) => {}
            }
        }
        Ok(())
    }
}
