//! Stub storage and placeholder rendering
//!
//! Stubs are plain text with `{{name}}` placeholders. Rendering is a single
//! left-to-right pass: each placeholder token is replaced by its bound text,
//! bound text is never rescanned, and nothing is escaped. Tokens that are
//! not bare identifiers (`{{ foo: 1 }}` in JSX, for instance) are not
//! placeholders and pass through untouched.

mod stubs;

pub use stubs::EmbeddedStubs;

use crate::error::{Result, ScaffoldError};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Names of every stub the generator renders
pub const TEMPLATE_NAMES: &[&str] = &[
    "model",
    "controller",
    "request",
    "seeder",
    "react/index",
    "react/create",
    "react/edit",
    "react/form",
];

/// File extension of stubs on disk
pub const STUB_EXTENSION: &str = "stub";

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{\{([A-Za-z_][A-Za-z0-9_]*)\}\}").expect("valid placeholder pattern")
});

/// Template-storage capability
pub trait TemplateSource {
    /// Read the stub registered under `name`
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::TemplateMissing`] when there is no such stub.
    fn read_template(&self, name: &str) -> Result<String>;
}

/// Stubs read from `{dir}/{name}.stub`
#[derive(Debug, Clone)]
pub struct StubDirectory {
    dir: PathBuf,
}

impl StubDirectory {
    /// Use `dir` as the stub root
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Stub root
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// On-disk location of a stub
    #[must_use]
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.{STUB_EXTENSION}"))
    }
}

impl TemplateSource for StubDirectory {
    fn read_template(&self, name: &str) -> Result<String> {
        let path = self.path_for(name);
        match std::fs::read_to_string(&path) {
            Ok(text) => Ok(text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(ScaffoldError::TemplateMissing {
                    name: name.to_string(),
                    location: path.display().to_string(),
                })
            }
            Err(e) => Err(ScaffoldError::io(path, e)),
        }
    }
}

/// Policy for placeholders left without a binding
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnboundPlaceholders {
    /// Leave the literal token in the output and log a warning
    #[default]
    Keep,
    /// Fail the artifact with [`ScaffoldError::UnboundPlaceholder`]
    Reject,
}

/// Placeholder name to replacement text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bindings {
    values: BTreeMap<String, String>,
}

impl Bindings {
    /// Empty bindings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `key` to `value`
    ///
    /// Binding the same key twice is a programming error in the caller.
    #[must_use]
    pub fn bind(mut self, key: &str, value: impl Into<String>) -> Self {
        let previous = self.values.insert(key.to_string(), value.into());
        debug_assert!(previous.is_none(), "placeholder '{key}' bound twice");
        self
    }

    /// Bound text for `key`
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

/// Result of substituting placeholders in one text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
    /// Rendered text
    pub text: String,
    /// Placeholder keys found without a binding, first-seen order, deduplicated
    pub unbound: Vec<String>,
}

/// Replace every bound `{{key}}` in `template` in a single pass
///
/// # Examples
///
/// ```
/// # use catalog_scaffold::scaffold::templates::{substitute, Bindings};
/// let bindings = Bindings::new().bind("name", "Product");
/// let out = substitute("class {{name}} {{missing}}", &bindings);
/// assert_eq!(out.text, "class Product {{missing}}");
/// assert_eq!(out.unbound, vec!["missing"]);
/// ```
#[must_use]
pub fn substitute(template: &str, bindings: &Bindings) -> Substitution {
    let mut unbound: Vec<String> = Vec::new();
    let text = PLACEHOLDER.replace_all(template, |caps: &Captures<'_>| {
        let key = &caps[1];
        if let Some(value) = bindings.get(key) {
            return value.to_string();
        }
        if !unbound.iter().any(|k| k == key) {
            unbound.push(key.to_string());
        }
        caps[0].to_string()
    });

    Substitution {
        text: text.into_owned(),
        unbound,
    }
}

/// Renders named stubs from a [`TemplateSource`]
pub struct TemplateRenderer {
    source: Box<dyn TemplateSource>,
    unbound: UnboundPlaceholders,
}

impl TemplateRenderer {
    /// Renderer over `source` with the given unbound-placeholder policy
    pub fn new(source: impl TemplateSource + 'static, unbound: UnboundPlaceholders) -> Self {
        Self {
            source: Box::new(source),
            unbound,
        }
    }

    /// Renderer over the compiled-in stubs, or `dir` when given
    #[must_use]
    pub fn from_settings(dir: Option<&Path>, unbound: UnboundPlaceholders) -> Self {
        match dir {
            Some(dir) => Self::new(StubDirectory::new(dir), unbound),
            None => Self::new(EmbeddedStubs, unbound),
        }
    }

    /// Render the stub `name` with `bindings`
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::TemplateMissing`] when the stub does not exist,
    /// and [`ScaffoldError::UnboundPlaceholder`] under the `Reject` policy.
    pub fn render(&self, name: &str, bindings: &Bindings) -> Result<String> {
        let template = self.source.read_template(name)?;
        let Substitution { text, unbound } = substitute(&template, bindings);

        if !unbound.is_empty() {
            match self.unbound {
                UnboundPlaceholders::Keep => {
                    tracing::warn!(
                        template = name,
                        placeholders = %unbound.join(", "),
                        "Unbound placeholders left in rendered output"
                    );
                }
                UnboundPlaceholders::Reject => {
                    return Err(ScaffoldError::UnboundPlaceholder {
                        template: name.to_string(),
                        names: unbound,
                    });
                }
            }
        }

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    struct OneStub(&'static str);

    impl TemplateSource for OneStub {
        fn read_template(&self, name: &str) -> Result<String> {
            if name == "only" {
                Ok(self.0.to_string())
            } else {
                Err(ScaffoldError::TemplateMissing {
                    name: name.to_string(),
                    location: "memory".to_string(),
                })
            }
        }
    }

    #[test]
    fn test_substitute_is_order_independent() {
        let a = Bindings::new().bind("a", "1").bind("b", "2");
        let b = Bindings::new().bind("b", "2").bind("a", "1");
        assert_eq!(substitute("{{a}}-{{b}}-{{a}}", &a), substitute("{{a}}-{{b}}-{{a}}", &b));
        assert_eq!(substitute("{{a}}-{{b}}-{{a}}", &a).text, "1-2-1");
    }

    #[test]
    fn test_bound_text_is_not_rescanned() {
        let bindings = Bindings::new().bind("a", "{{b}}").bind("b", "x");
        let out = substitute("{{a}}", &bindings);
        assert_eq!(out.text, "{{b}}");
        assert!(out.unbound.is_empty());
    }

    #[test]
    fn test_jsx_objects_are_not_placeholders() {
        let template = "<div style={{ color: 'red' }}>{{label}}</div>";
        let out = substitute(template, &Bindings::new().bind("label", "Hi"));
        assert_eq!(out.text, "<div style={{ color: 'red' }}>Hi</div>");
        assert!(out.unbound.is_empty());
    }

    #[test]
    fn test_unbound_keys_deduplicated_in_order() {
        let out = substitute("{{x}} {{y}} {{x}}", &Bindings::new());
        assert_eq!(out.unbound, vec!["x", "y"]);
        assert_eq!(out.text, "{{x}} {{y}} {{x}}");
    }

    #[test]
    fn test_keep_policy_leaves_token() {
        let renderer =
            TemplateRenderer::new(OneStub("{{known}} {{unknown}}"), UnboundPlaceholders::Keep);
        let text = renderer
            .render("only", &Bindings::new().bind("known", "ok"))
            .unwrap();
        assert_eq!(text, "ok {{unknown}}");
    }

    #[test]
    fn test_reject_policy_reports_keys() {
        let renderer =
            TemplateRenderer::new(OneStub("{{known}} {{unknown}}"), UnboundPlaceholders::Reject);
        let err = renderer
            .render("only", &Bindings::new().bind("known", "ok"))
            .unwrap_err();
        match err {
            ScaffoldError::UnboundPlaceholder { template, names } => {
                assert_eq!(template, "only");
                assert_eq!(names, vec!["unknown"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_template() {
        let renderer = TemplateRenderer::new(OneStub(""), UnboundPlaceholders::Keep);
        let err = renderer.render("model", &Bindings::new()).unwrap_err();
        assert!(matches!(err, ScaffoldError::TemplateMissing { name, .. } if name == "model"));
    }

    #[test]
    fn test_stub_directory() {
        let dir = tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("react")).unwrap();
        std::fs::write(dir.path().join("react/index.stub"), "Index of {{tableName}}").unwrap();

        let stubs = StubDirectory::new(dir.path());
        assert_eq!(stubs.read_template("react/index").unwrap(), "Index of {{tableName}}");
        assert!(matches!(
            stubs.read_template("model"),
            Err(ScaffoldError::TemplateMissing { .. })
        ));
    }

    #[test]
    fn test_embedded_stubs_cover_every_template() {
        for name in TEMPLATE_NAMES {
            assert!(EmbeddedStubs.read_template(name).is_ok(), "missing embedded stub {name}");
        }
        assert!(EmbeddedStubs.read_template("react/show").is_err());
    }

    #[test]
    #[should_panic(expected = "bound twice")]
    #[cfg(debug_assertions)]
    fn test_duplicate_binding_is_a_programming_error() {
        let _ = Bindings::new().bind("a", "1").bind("a", "2");
    }
}
