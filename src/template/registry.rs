//! Template store for loading named code templates

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Catalog bundled with the crate
const BUILTIN_CATALOG: &str = include_str!("../../templates/catalog.t");

/// Line that closes a template in a catalog file
const STOP_MARKER: &str = "<STOP>";

/// Errors that can occur during template operations
#[derive(Debug, Error)]
pub enum TemplateError {
    /// Template not found in the store
    #[error("template not found: {name}")]
    NotFound { name: String },

    /// Duplicate template definition within one catalog
    #[error("duplicate template definition: {name} (line {line})")]
    Duplicate { name: String, line: usize },

    /// Template opened but never closed with <STOP>
    #[error("template {name} opened at line {line} is missing its <STOP> line")]
    Unterminated { name: String, line: usize },

    /// Error reading a catalog file
    #[error("error reading template catalog {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Template content unusable for the requested purpose
    #[error("invalid template {name}: {reason}")]
    Invalid { name: String, reason: String },
}

/// A named, immutable sequence of template lines
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    /// Bracketed symbolic name, e.g. `<CHECKBOX_CB_CASE>`
    pub name: String,
    /// Lines without their terminators
    pub lines: Vec<String>,
}

impl Template {
    pub fn new(name: impl Into<String>, lines: Vec<String>) -> Self {
        Self {
            name: name.into(),
            lines,
        }
    }
}

/// Store of templates keyed by name
#[derive(Debug, Default, Clone)]
pub struct TemplateStore {
    templates: HashMap<String, Template>,
}

impl TemplateStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// The catalog bundled with the crate
    pub fn builtin() -> Self {
        Self::from_str(BUILTIN_CATALOG).expect("bundled template catalog should parse")
    }

    /// Load a catalog file
    pub fn from_file(path: &Path) -> Result<Self, TemplateError> {
        let content = std::fs::read_to_string(path).map_err(|source| TemplateError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_str(&content)
    }

    /// Parse a catalog.
    ///
    /// A line holding only a bracketed name opens a template and `<STOP>`
    /// closes it. Lines outside any template are ignored.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, TemplateError> {
        let mut store = Self::new();
        let mut open: Option<(String, usize, Vec<String>)> = None;

        for (idx, raw) in content.lines().enumerate() {
            let line_no = idx + 1;
            let line = raw.strip_suffix('\r').unwrap_or(raw);

            match open.take() {
                Some((name, start, lines)) if line.trim() == STOP_MARKER => {
                    store.insert(Template::new(name, lines), start)?;
                }
                Some((name, start, mut lines)) => {
                    lines.push(line.to_string());
                    open = Some((name, start, lines));
                }
                None => {
                    if let Some(name) = parse_header(line) {
                        open = Some((name.to_string(), line_no, Vec::new()));
                    }
                }
            }
        }

        if let Some((name, line, _)) = open {
            return Err(TemplateError::Unterminated { name, line });
        }
        Ok(store)
    }

    fn insert(&mut self, template: Template, line: usize) -> Result<(), TemplateError> {
        if self.templates.contains_key(&template.name) {
            return Err(TemplateError::Duplicate {
                name: template.name,
                line,
            });
        }
        self.templates.insert(template.name.clone(), template);
        Ok(())
    }

    /// Overlay another store on this one; templates in `other` win
    pub fn with_overrides(mut self, other: TemplateStore) -> Self {
        self.templates.extend(other.templates);
        self
    }

    /// Look up a template by name
    pub fn load_template(&self, name: &str) -> Result<&Template, TemplateError> {
        self.templates.get(name).ok_or_else(|| TemplateError::NotFound {
            name: name.to_string(),
        })
    }

    /// Check if a template exists
    pub fn contains(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }

    /// All template names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.templates.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

/// Recognize a template header line such as `<CHECKBOX>`
fn parse_header(line: &str) -> Option<&str> {
    let name = line.trim();
    let inner = name.strip_prefix('<')?.strip_suffix('>')?;
    let valid = !inner.is_empty()
        && inner
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid && name != STOP_MARKER {
        Some(name)
    } else {
        None
    }
}
