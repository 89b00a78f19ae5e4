//! Language front ends
//!
//!     A language plugs into the pipeline by implementing [Language]: three operations
//!     covering the batch path and the two streaming paths.
//!
//!         process(input)           tokens, tree and shape in one [Processed] bundle
//!         tokenize_stream(input)   tokens one at a time, ending with EOF
//!         parse_stream(input)      top-level nodes one at a time, over a bounded
//!                                  streaming token source
//!
//!     Languages are looked up by name through a [LanguageRegistry]. The crate ships
//!     one reference language, [expression].

pub mod expression;

pub use expression::Expression;

use crate::ast::Node;
use crate::engines::AnalysisReport;
use crate::fabric::Fabric;
use crate::parsing::ParseDiagnostic;
use crate::token::Token;
use serde_json::json;
use std::collections::BTreeMap;
use wiregram_config::WireGramConfig;

/// A language front end.
pub trait Language: Send + Sync {
    /// The name the registry knows this language by.
    fn name(&self) -> &'static str;

    fn process(&self, input: &str) -> Processed;

    fn tokenize_stream<'a>(&self, input: &'a str) -> Box<dyn Iterator<Item = Token> + 'a>;

    fn parse_stream<'a>(&self, input: &'a str) -> Box<dyn Iterator<Item = Node> + 'a>;
}

/// Everything `process` learned about one input.
#[derive(Debug, Clone, PartialEq)]
pub struct Processed {
    pub fabric: Fabric,
    pub diagnostics: Vec<ParseDiagnostic>,
}

impl Processed {
    /// Node count and depth of the tree.
    pub fn shape(&self) -> AnalysisReport {
        self.fabric.analyze()
    }

    pub fn root(&self) -> &Node {
        self.fabric.root()
    }

    pub fn tokens(&self) -> &[Token] {
        self.fabric.tokens()
    }

    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    /// `{uom, ast, tokens, diagnostics}`, where `uom` is the shape report.
    pub fn to_json(&self) -> serde_json::Value {
        json!({
            "uom": self.shape(),
            "ast": self.root(),
            "tokens": self.tokens(),
            "diagnostics": self.diagnostics,
        })
    }
}

/// Languages by name.
pub struct LanguageRegistry {
    languages: BTreeMap<&'static str, Box<dyn Language>>,
}

impl LanguageRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            languages: BTreeMap::new(),
        }
    }

    /// A registry holding every built-in language, configured from `config`.
    pub fn from_config(config: &WireGramConfig) -> Self {
        let mut registry = Self::new();
        registry.register(Expression::from_config(config));
        registry
    }

    /// Adds a language, replacing any other language of the same name.
    pub fn register<L: Language + 'static>(&mut self, language: L) {
        self.languages.insert(language.name(), Box::new(language));
    }

    pub fn get(&self, name: &str) -> Option<&dyn Language> {
        self.languages.get(name).map(|language| language.as_ref())
    }

    pub fn has(&self, name: &str) -> bool {
        self.languages.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn available(&self) -> Vec<&'static str> {
        self.languages.keys().copied().collect()
    }
}

impl Default for LanguageRegistry {
    fn default() -> Self {
        let mut registry = Self::new();
        registry.register(Expression::default());
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_registry() {
        let registry = LanguageRegistry::default();
        assert_eq!(registry.available(), vec!["expression"]);
        assert!(registry.has("expression"));
        assert!(registry.get("ucl").is_none());
    }

    #[test]
    fn test_registry_from_config() {
        let config = wiregram_config::Loader::new()
            .set_override("languages.expression.preserve_raw_literals", true)
            .unwrap()
            .build()
            .unwrap();
        let registry = LanguageRegistry::from_config(&config);
        let language = registry.get("expression").unwrap();
        let processed = language.process("0010");
        assert_eq!(processed.fabric.to_source(), "0010");
    }

    #[test]
    fn test_processed_projection() {
        let processed = Expression::default().process("1 + 2");
        assert_eq!(
            processed.to_json(),
            json!({
                "uom": {"node_count": 4, "depth": 2},
                "ast": {
                    "type": "program",
                    "value": null,
                    "children": [{
                        "type": "add",
                        "value": null,
                        "children": [
                            {"type": "number", "value": 1, "children": [], "metadata": {}},
                            {"type": "number", "value": 2, "children": [], "metadata": {}}
                        ],
                        "metadata": {}
                    }],
                    "metadata": {}
                },
                "tokens": [
                    {"type": "number", "value": 1, "position": 0},
                    {"type": "plus", "value": null, "position": 2},
                    {"type": "number", "value": 2, "position": 4},
                    {"type": "eof", "value": null, "position": 5}
                ],
                "diagnostics": []
            })
        );
        assert!(!processed.has_errors());
    }

    #[test]
    fn test_diagnostics_are_projected() {
        let processed = Expression::default().process("let = 2");
        assert!(processed.has_errors());
        assert_eq!(
            processed.to_json()["diagnostics"][0],
            json!({"type": "unexpected_token", "expected": "identifier", "got": "equals", "position": 4})
        );
    }
}
