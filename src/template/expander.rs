//! Macro expansion - substitutes placeholders and writes code lines

use std::collections::{HashMap, HashSet};

use crate::lint::{LintCategory, LintWarning};

use super::lexer::{pieces, Piece};
use super::registry::{Template, TemplateError, TemplateStore};

/// Placeholder key -> replacement text
pub type MacroMap = HashMap<String, String>;

/// Result of expanding one template
#[derive(Debug, Clone, PartialEq)]
pub struct Expansion {
    /// Expanded lines; multi-line replacements are split into separate lines
    pub lines: Vec<String>,
    /// Placeholder keys with no entry in the macro map, in first-seen order
    pub unresolved: Vec<String>,
}

/// Substitute every placeholder of `template` that has an entry in `map`.
///
/// Placeholders without an entry stay literal and are listed in
/// [`Expansion::unresolved`].
pub fn expand_macros(template: &Template, map: &MacroMap) -> Expansion {
    let mut lines = Vec::with_capacity(template.lines.len());
    let mut unresolved: Vec<String> = Vec::new();

    for line in &template.lines {
        let mut expanded = String::with_capacity(line.len());
        for (piece, slice) in pieces(line) {
            match piece {
                Piece::Placeholder(key) => match map.get(key) {
                    Some(value) => expanded.push_str(value),
                    None => {
                        if !unresolved.iter().any(|k| k == key) {
                            unresolved.push(key.to_string());
                        }
                        expanded.push_str(slice);
                    }
                },
                Piece::Text | Piece::Dollar => expanded.push_str(slice),
            }
        }
        lines.extend(expanded.split('\n').map(str::to_string));
    }

    Expansion { lines, unresolved }
}

/// Append each line to the buffer followed by a newline
pub fn code_writer(buffer: &mut String, lines: &[String]) {
    for line in lines {
        buffer.push_str(line);
        buffer.push('\n');
    }
}

/// Template lookup and expansion for one generation pass.
///
/// Collects unresolved-placeholder warnings so they can be reported once the
/// pass has succeeded.
#[derive(Debug)]
pub struct Emitter<'a> {
    store: &'a TemplateStore,
    warnings: Vec<LintWarning>,
    reported: HashSet<(String, String)>,
}

impl<'a> Emitter<'a> {
    pub fn new(store: &'a TemplateStore) -> Self {
        Self {
            store,
            warnings: Vec::new(),
            reported: HashSet::new(),
        }
    }

    pub fn load_template(&self, name: &str) -> Result<&'a Template, TemplateError> {
        self.store.load_template(name)
    }

    /// Expand a template, recording any unresolved placeholders
    pub fn expand(&mut self, template: &Template, map: &MacroMap) -> Vec<String> {
        let Expansion { lines, unresolved } = expand_macros(template, map);
        for key in unresolved {
            if self.reported.insert((template.name.clone(), key.clone())) {
                tracing::warn!(template = %template.name, placeholder = %key, "unresolved placeholder");
                self.warnings.push(LintWarning {
                    category: LintCategory::UnresolvedPlaceholder,
                    message: format!("placeholder $<{}> in {} has no value", key, template.name),
                });
            }
        }
        lines
    }

    /// Load `name`, expand it against `map` and append the result to `out`
    pub fn emit(&mut self, out: &mut String, name: &str, map: &MacroMap) -> Result<(), TemplateError> {
        let template = self.load_template(name)?;
        let lines = self.expand(template, map);
        code_writer(out, &lines);
        Ok(())
    }

    /// Record a warning raised outside template expansion
    pub fn warn(&mut self, warning: LintWarning) {
        self.warnings.push(warning);
    }

    pub fn warnings(&self) -> &[LintWarning] {
        &self.warnings
    }

    pub fn into_warnings(self) -> Vec<LintWarning> {
        self.warnings
    }
}
