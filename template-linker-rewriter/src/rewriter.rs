//! Hoisting of dynamic references into static imports

use std::collections::{HashMap, HashSet};

use crate::ident;
use crate::scanner::CallScanner;

/// Call name recognized by [`rewrite`]
pub const DEFAULT_CALLEE: &str = "require";

/// A hoisted reference: the raw literal and the identifier bound to it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub literal: String,
    pub identifier: String,
}

impl Binding {
    /// The static import declaration for this binding
    pub fn import_declaration(&self) -> String {
        format!("import {} from {}", self.identifier, self.literal)
    }
}

/// Output of a rewrite pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    /// Import declarations followed by the rewritten body
    pub code: String,
    /// Bindings in first-seen order
    pub bindings: Vec<Binding>,
}

/// Raw literal -> identifier, in first-seen order. Lives for one pass.
#[derive(Debug, Default)]
struct BindingTable {
    entries: Vec<Binding>,
    by_literal: HashMap<String, usize>,
    taken: HashSet<String>,
}

impl BindingTable {
    fn resolve(&mut self, callee: &str, literal: &str) -> &str {
        let index = match self.by_literal.get(literal) {
            Some(&index) => index,
            None => self.insert(callee, literal),
        };
        &self.entries[index].identifier
    }

    fn insert(&mut self, callee: &str, literal: &str) -> usize {
        let mut identifier = ident::synthesize(callee, literal);
        let mut n = 2;
        while self.taken.contains(&identifier) {
            identifier = ident::synthesize_nth(callee, literal, n);
            n += 1;
        }

        let index = self.entries.len();
        self.taken.insert(identifier.clone());
        self.by_literal.insert(literal.to_string(), index);
        self.entries.push(Binding {
            literal: literal.to_string(),
            identifier,
        });
        index
    }
}

/// Rewrites `callee("...")` call sites into hoisted static imports
#[derive(Debug, Clone)]
pub struct Rewriter {
    callee: String,
}

impl Rewriter {
    pub fn new() -> Self {
        Self::with_callee(DEFAULT_CALLEE)
    }

    /// Recognize `callee(...)` instead of `require(...)`
    pub fn with_callee(callee: impl Into<String>) -> Self {
        Self {
            callee: callee.into(),
        }
    }

    /// Replace every call site with its bound identifier and prepend one
    /// import declaration per distinct literal.
    ///
    /// Never fails: text that does not form a complete call site is copied
    /// through unchanged.
    pub fn rewrite(&self, source: &str) -> String {
        self.rewrite_with_bindings(source).code
    }

    /// Like [`Rewriter::rewrite`], also returning the bindings
    pub fn rewrite_with_bindings(&self, source: &str) -> Rewrite {
        let mut table = BindingTable::default();
        let mut body = String::with_capacity(source.len());
        let mut last = 0;
        let mut call_sites = 0usize;

        for site in CallScanner::new(source, &self.callee) {
            body.push_str(&source[last..site.span.start]);
            body.push_str(table.resolve(&self.callee, site.literal));
            last = site.span.end;
            call_sites += 1;
        }
        body.push_str(&source[last..]);

        let bindings = table.entries;
        if call_sites > 0 {
            tracing::debug!(
                "Hoisted {} {}() call sites into {} imports",
                call_sites,
                self.callee,
                bindings.len()
            );
        }

        let mut code = String::with_capacity(body.len() + bindings.len() * 48);
        for binding in &bindings {
            code.push_str(&binding.import_declaration());
            code.push('\n');
        }
        code.push_str(&body);

        Rewrite { code, bindings }
    }
}

impl Default for Rewriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Rewrite `require("...")` calls in `source` into static imports
pub fn rewrite(source: &str) -> String {
    Rewriter::new().rewrite(source)
}
