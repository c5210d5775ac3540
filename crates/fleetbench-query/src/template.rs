//! Parameterized query templates.
//!
//! A template is dialect text with named `{placeholder}` tokens. Values are
//! bound as [`Literal`]s and rendered through [`crate::literal`], so no
//! scenario formats a value by hand.
//!
//! Rendering is strict. It fails on a placeholder with no binding, a binding
//! the template never uses, or an unterminated `{`. A successful render
//! therefore contains no residual placeholder tokens. Substituted values are
//! not rescanned, so a `{` inside a bound string stays literal.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::TemplateError;
use crate::literal::Literal;

/// Query text with named placeholders and their bound values.
#[derive(Debug, Clone)]
pub struct Template<'a> {
    text: &'a str,
    bindings: BTreeMap<&'a str, Literal>,
}

impl<'a> Template<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            bindings: BTreeMap::new(),
        }
    }

    /// Binds `value` to `{name}`. A later binding of the same name wins.
    pub fn bind(mut self, name: &'a str, value: impl Into<Literal>) -> Self {
        self.bindings.insert(name, value.into());
        self
    }

    /// Substitutes every placeholder and returns the final text.
    pub fn render(&self) -> Result<String, TemplateError> {
        let mut out = String::with_capacity(self.text.len() + 64);
        let mut used = BTreeSet::new();
        let mut rest = self.text;
        let mut consumed = 0;

        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);

            let after = &rest[open + 1..];
            let close = after
                .find('}')
                .ok_or(TemplateError::UnterminatedPlaceholder(consumed + open))?;
            let name = &after[..close];

            let value = self
                .bindings
                .get(name)
                .ok_or_else(|| TemplateError::UnboundPlaceholder(name.to_string()))?;
            out.push_str(&value.render()?);
            used.insert(name);

            let advance = open + 1 + close + 1;
            consumed += advance;
            rest = &rest[advance..];
        }
        out.push_str(rest);

        if let Some(unused) = self.bindings.keys().find(|k| !used.contains(*k)) {
            return Err(TemplateError::UnusedBinding((*unused).to_string()));
        }

        Ok(out)
    }
}
