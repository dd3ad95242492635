// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Field tag lookup.
//!
//! Tags are conventionally a space-separated list of `key:"value"` pairs,
//! e.g. `json:"name,omitempty" yaml:"name"`. The raw text is stored as-is on
//! each [`Field`](crate::Field); this module only reads it.

use std::borrow::Cow;

/// Borrowed view over a raw field tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tag<'a>(&'a str);

impl<'a> Tag<'a> {
    pub fn new(raw: &'a str) -> Self {
        Self(raw)
    }

    /// Raw tag text.
    pub fn as_str(&self) -> &'a str {
        self.0
    }

    /// Value associated with `key`, or `None` if the key is absent.
    ///
    /// An explicitly empty value (`key:""`) returns `Some("")`. Parsing stops
    /// at the first malformed pair.
    pub fn lookup(&self, key: &str) -> Option<Cow<'a, str>> {
        let mut rest = self.0;
        loop {
            rest = rest.trim_start_matches(' ');
            if rest.is_empty() {
                return None;
            }

            let name_len = rest
                .find(|c: char| c <= ' ' || c == ':' || c == '"' || c == '\x7f')
                .unwrap_or(rest.len());
            if name_len == 0 {
                return None;
            }
            let name = &rest[..name_len];
            let after = &rest[name_len..];
            let quoted = after.strip_prefix(":\"")?;

            let end = closing_quote(quoted)?;
            let body = &quoted[..end];
            rest = &quoted[end + 1..];

            if name == key {
                return unquote(body);
            }
        }
    }

    /// Value for `key`, empty when absent.
    pub fn get(&self, key: &str) -> Cow<'a, str> {
        self.lookup(key).unwrap_or(Cow::Borrowed(""))
    }

    /// Parse the `key` entry as a serializer directive (`name,opt,opt`).
    pub fn format(&self, key: &str) -> FormatTag {
        match self.lookup(key) {
            Some(value) => FormatTag::parse(&value),
            None => FormatTag::default(),
        }
    }
}

/// Serializer directive parsed from a tag value such as `name,omitempty`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormatTag {
    /// Key override; `None` keeps the field name.
    pub rename: Option<String>,
    /// `-`: never serialized.
    pub skip: bool,
    pub omit_empty: bool,
}

impl FormatTag {
    pub fn parse(value: &str) -> Self {
        if value == "-" {
            return Self {
                skip: true,
                ..Self::default()
            };
        }
        let mut parts = value.split(',');
        let name = parts.next().unwrap_or_default();
        let omit_empty = parts.any(|opt| opt == "omitempty");
        Self {
            rename: (!name.is_empty()).then(|| name.to_string()),
            skip: false,
            omit_empty,
        }
    }

    /// Serialized key for a field called `field_name`.
    pub fn key<'a>(&'a self, field_name: &'a str) -> &'a str {
        self.rename.as_deref().unwrap_or(field_name)
    }
}

fn closing_quote(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'"' => return Some(i),
            _ => i += 1,
        }
    }
    None
}

fn unquote(body: &str) -> Option<Cow<'_, str>> {
    if !body.contains('\\') {
        return Some(Cow::Borrowed(body));
    }
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let escaped = match chars.next()? {
            'n' => '\n',
            't' => '\t',
            'r' => '\r',
            '0' => '\0',
            c @ ('\\' | '"' | '\'') => c,
            _ => return None,
        };
        out.push(escaped);
    }
    Some(Cow::Owned(out))
}
