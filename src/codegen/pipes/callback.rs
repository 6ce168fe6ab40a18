//! Callback regions that survive hand editing.
//!
//! The first time a callback tag receives content, the whole callback
//! function is written from its wrapper template, with the `case` entries
//! enclosed in a nested enum tag. From then on the function belongs to the
//! user: later passes only touch the enum sub-region, where entries for
//! deleted widgets are dropped and entries for new widgets are appended.
//! Existing entries, and any code a user added inside them, are copied
//! through unchanged.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::error::TagError;
use crate::lint::{LintCategory, LintWarning};
use crate::model::{keys, Design, Widget, WidgetKind};
use crate::template::{code_writer, placeholders, MacroMap, Template, TemplateError};
use crate::GenerateError;

use super::super::tag::{copy_lines, locate, locate_within, split_lines, Tag};
use super::{PassContext, Pipe};

/// Placeholder in the wrapper template that receives the case entries
const CALLBACK_MACRO: &str = "CALLBACK";

/// Tag-anchored merge of a switch-style callback function
#[derive(Debug, Clone)]
pub struct CallbackPipe {
    tag: Tag,
    enum_tag: Tag,
    wrapper_template: String,
    case_template: String,
    kinds: Vec<WidgetKind>,
}

impl CallbackPipe {
    pub fn new(
        tag: impl Into<String>,
        enum_tag: impl Into<String>,
        wrapper_template: impl Into<String>,
        case_template: impl Into<String>,
        kinds: Vec<WidgetKind>,
    ) -> Self {
        Self {
            tag: Tag::new(tag),
            enum_tag: Tag::new(enum_tag),
            wrapper_template: wrapper_template.into(),
            case_template: case_template.into(),
            kinds,
        }
    }

    /// `CbCheckbox()`, shared by checkboxes and radio buttons
    pub fn checkbox() -> Self {
        Self::new(
            "Checkbox Callback",
            "Checkbox Enums",
            "<CHECKBOX_CB>",
            "<CHECKBOX_CB_CASE>",
            vec![WidgetKind::Checkbox, WidgetKind::RadioButton],
        )
    }

    /// `CbBtnCommon()`, used by toggle buttons
    pub fn button() -> Self {
        Self::new(
            "Button Callback",
            "Button Enums",
            "<BUTTON_CB>",
            "<BUTTON_CB_CASE>",
            vec![WidgetKind::ToggleButton],
        )
    }

    /// Widgets of this pipe's kinds with callbacks enabled, in design order
    fn callback_list<'d>(&self, design: &'d Design) -> Vec<(&'d str, &'d dyn Widget)> {
        design
            .widgets()
            .filter(|(_, w)| self.kinds.contains(&w.kind()) && w.callback_eligible())
            .map(|(page, w)| (page.enum_id.as_str(), w))
            .collect()
    }

    /// First run: the wrapper with freshly tagged case entries
    fn fresh_generate(
        &self,
        callbacks: &[(&str, &dyn Widget)],
        ctx: &mut PassContext<'_>,
        out: &mut String,
    ) -> Result<(), TemplateError> {
        let case = ctx.emitter.load_template(&self.case_template)?;

        let mut body = String::new();
        body.push_str(self.enum_tag.start());
        body.push('\n');
        for (page, widget) in callbacks {
            let lines = ctx.emitter.expand(case, &widget.properties(page));
            code_writer(&mut body, &lines);
        }
        body.push_str(self.enum_tag.end());

        let mut map = MacroMap::new();
        map.insert(CALLBACK_MACRO.to_string(), body);
        ctx.emitter.emit(out, &self.wrapper_template, &map)
    }

    /// Later runs: rewrite only the entries between the enum markers
    fn merge(
        &self,
        region: &[&str],
        callbacks: &[(&str, &dyn Widget)],
        ctx: &mut PassContext<'_>,
        out: &mut String,
    ) -> Result<(), TemplateError> {
        let case = ctx.emitter.load_template(&self.case_template)?;
        let pattern = EntryPattern::from_template(case, keys::ENUM)?;
        let (preamble, entries) = segment(region, &pattern);

        let live: HashSet<&str> = callbacks.iter().map(|(_, w)| w.enum_id()).collect();
        // false: present in the file, true: already copied forward
        let mut presence: HashMap<&str, bool> = entries.iter().map(|e| (e.id, false)).collect();

        copy_lines(out, preamble);
        for entry in &entries {
            if !live.contains(entry.id) {
                debug!(tag = self.tag.name(), id = entry.id, "dropping stale entry");
                ctx.emitter.warn(LintWarning {
                    category: LintCategory::StaleEntry,
                    message: format!(
                        "removed '{}' case for {} (widget deleted or callback disabled)",
                        self.tag.name(),
                        entry.id
                    ),
                });
                continue;
            }
            match presence.get_mut(entry.id) {
                Some(emitted) if !*emitted => {
                    copy_lines(out, entry.lines);
                    *emitted = true;
                }
                _ => {
                    debug!(tag = self.tag.name(), id = entry.id, "dropping duplicate entry");
                    ctx.emitter.warn(LintWarning {
                        category: LintCategory::DuplicateEntry,
                        message: format!(
                            "removed repeated '{}' case for {}",
                            self.tag.name(),
                            entry.id
                        ),
                    });
                }
            }
        }

        for (page, widget) in callbacks {
            let id = widget.enum_id();
            if presence.contains_key(id) {
                continue;
            }
            debug!(tag = self.tag.name(), id, "adding entry");
            let lines = ctx.emitter.expand(case, &widget.properties(page));
            code_writer(out, &lines);
            presence.insert(id, true);
        }
        Ok(())
    }
}

impl Pipe for CallbackPipe {
    fn tag(&self) -> &Tag {
        &self.tag
    }

    fn check(&self, input: &str) -> Result<(), TagError> {
        let lines = split_lines(input);
        if let Some(region) = locate(&lines, &self.tag)? {
            locate_within(&lines, &region, &self.enum_tag)?;
        }
        Ok(())
    }

    fn process(&self, input: &str, ctx: &mut PassContext<'_>) -> Result<String, GenerateError> {
        let lines = split_lines(input);
        let Some(region) = locate(&lines, &self.tag)? else {
            debug!(tag = self.tag.name(), "tag not present");
            return Ok(input.to_string());
        };
        let enums = locate_within(&lines, &region, &self.enum_tag)?;
        let callbacks = self.callback_list(ctx.design);

        let mut out = String::with_capacity(input.len());
        copy_lines(&mut out, &lines[..=region.start]);

        if callbacks.is_empty() {
            debug!(tag = self.tag.name(), "no callbacks, clearing region");
            copy_lines(&mut out, &lines[region.end..]);
            return Ok(out);
        }

        match enums {
            None => {
                debug!(tag = self.tag.name(), count = callbacks.len(), "generating callback");
                self.fresh_generate(&callbacks, ctx, &mut out)?;
                out.push_str(self.tag.end());
                out.push('\n');
                copy_lines(&mut out, &lines[region.end + 1..]);
            }
            Some(sub) => {
                debug!(tag = self.tag.name(), "merging callback entries");
                copy_lines(&mut out, &lines[region.start + 1..=sub.start]);
                self.merge(&lines[sub.start + 1..sub.end], &callbacks, ctx, &mut out)?;
                copy_lines(&mut out, &lines[sub.end..]);
            }
        }
        Ok(out)
    }
}

/// Recognizes the first line of a case entry, e.g. `case E_CHECK1:`.
///
/// Derived from the line of the case template holding the enum placeholder:
/// the text before it is the prefix, the first word after it (cut at any
/// further placeholder) is the suffix.
#[derive(Debug)]
struct EntryPattern {
    prefix: String,
    suffix: String,
}

impl EntryPattern {
    fn from_template(template: &Template, key: &str) -> Result<Self, TemplateError> {
        let token = format!("$<{}>", key);
        for line in template.lines.iter().filter(|l| placeholders(l).contains(&key)) {
            if let Some(pos) = line.find(&token) {
                let after = &line[pos + token.len()..];
                let suffix = after.split_whitespace().next().unwrap_or("");
                let suffix = suffix.find("$<").map_or(suffix, |p| &suffix[..p]);
                return Ok(Self {
                    prefix: line[..pos].trim_start().to_string(),
                    suffix: suffix.to_string(),
                });
            }
        }
        Err(TemplateError::Invalid {
            name: template.name.clone(),
            reason: format!("case template has no {} placeholder", token),
        })
    }

    /// The enum id this line opens an entry for
    fn match_line<'l>(&self, line: &'l str) -> Option<&'l str> {
        let rest = line.trim().strip_prefix(self.prefix.as_str())?;
        let id_len = rest
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(rest.len());
        if id_len == 0 {
            return None;
        }
        let (id, tail) = rest.split_at(id_len);
        tail.starts_with(self.suffix.as_str()).then_some(id)
    }
}

/// One case entry: its opening line through the line before the next entry
#[derive(Debug)]
struct Entry<'a> {
    id: &'a str,
    lines: &'a [&'a str],
}

fn indent(line: &str) -> usize {
    line.len() - line.trim_start().len()
}

/// Split an enum sub-region into leading text and entries.
///
/// Only case lines at the shallowest indentation open an entry, so a
/// `switch` nested inside a case body stays part of that body.
fn segment<'a>(region: &'a [&'a str], pattern: &EntryPattern) -> (&'a [&'a str], Vec<Entry<'a>>) {
    let candidates: Vec<(usize, &str)> = region
        .iter()
        .copied()
        .enumerate()
        .filter_map(|(i, line)| pattern.match_line(line).map(|id| (i, id)))
        .collect();
    let depth = candidates.iter().map(|&(i, _)| indent(region[i])).min();
    let starts: Vec<(usize, &str)> = candidates
        .into_iter()
        .filter(|&(i, _)| Some(indent(region[i])) == depth)
        .collect();

    let preamble_end = starts.first().map_or(region.len(), |(i, _)| *i);
    let entries = starts
        .iter()
        .enumerate()
        .map(|(k, &(i, id))| {
            let end = starts.get(k + 1).map_or(region.len(), |(j, _)| *j);
            Entry {
                id,
                lines: &region[i..end],
            }
        })
        .collect();

    (&region[..preamble_end], entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CheckBox, Page, RadialGauge, RadioButton, ToggleButton};
    use crate::template::TemplateStore;
    use pretty_assertions::assert_eq;

    const CATALOG: &str = "\
<CB>
bool Cb() {
  switch (id) {
$<CALLBACK>
    default:
      break;
  }
}
<STOP>
<CASE>
    case $<ENUM>:
      break;
<STOP>
";

    const SKELETON: &str = "\
// head
//<Cb !Start!>
//<Cb !End!>
// tail
";

    fn pipe() -> CallbackPipe {
        CallbackPipe::new("Cb", "Cb Enums", "<CB>", "<CASE>", vec![WidgetKind::Checkbox])
    }

    fn design(ids: &[&str]) -> Design {
        let mut page = Page::new("E_PG");
        for id in ids {
            page = page.with_widget(CheckBox::new(*id).with_callback(true));
        }
        Design::new().with_page(page)
    }

    fn run(input: &str, design: &Design) -> Result<(String, Vec<LintWarning>), GenerateError> {
        let store = TemplateStore::from_str(CATALOG).unwrap();
        let mut ctx = PassContext::new(design, &store);
        let out = pipe().process(input, &mut ctx)?;
        Ok((out, ctx.emitter.into_warnings()))
    }

    fn gen(input: &str, design: &Design) -> String {
        run(input, design).unwrap().0
    }

    fn count(text: &str, needle: &str) -> usize {
        text.matches(needle).count()
    }

    #[test]
    fn test_fresh_generate() {
        let out = gen(SKELETON, &design(&["E_CHECK1", "E_CHECK2"]));
        assert_eq!(
            out,
            "\
// head
//<Cb !Start!>
bool Cb() {
  switch (id) {
//<Cb Enums !Start!>
    case E_CHECK1:
      break;
    case E_CHECK2:
      break;
//<Cb Enums !End!>
    default:
      break;
  }
}
//<Cb !End!>
// tail
"
        );
    }

    #[test]
    fn test_regenerate_is_idempotent() {
        let d = design(&["E_CHECK1", "E_CHECK2"]);
        let first = gen(SKELETON, &d);
        let second = gen(&first, &d);
        let third = gen(&second, &d);
        assert_eq!(first, second);
        assert_eq!(second, third);
    }

    #[test]
    fn test_new_widget_appended() {
        let first = gen(SKELETON, &design(&["E_CHECK1", "E_CHECK2"]));
        let second = gen(&first, &design(&["E_CHECK1", "E_CHECK2", "E_CHECK3"]));
        let expected = first.replace(
            "//<Cb Enums !End!>",
            "    case E_CHECK3:\n      break;\n//<Cb Enums !End!>",
        );
        assert_eq!(second, expected);
    }

    #[test]
    fn test_user_edits_preserved() {
        let first = gen(SKELETON, &design(&["E_CHECK1"]));
        let edited = first
            .replace("  switch (id) {\n", "  int hits = 0;\n  switch (id) {\n")
            .replace("    case E_CHECK1:\n      break;\n", "    case E_CHECK1:\n      hits++;\n      break;\n")
            .replace("    default:\n", "    // custom default handling\n    default:\n");
        let second = gen(&edited, &design(&["E_CHECK1", "E_CHECK2"]));
        let expected = edited.replace(
            "//<Cb Enums !End!>",
            "    case E_CHECK2:\n      break;\n//<Cb Enums !End!>",
        );
        assert_eq!(second, expected);
        assert!(second.contains("      hits++;\n"));
    }

    #[test]
    fn test_deleted_widget_removed() {
        let first = gen(SKELETON, &design(&["E_CHECK1", "E_CHECK2", "E_CHECK3"]));
        let (second, warnings) = run(&first, &design(&["E_CHECK1", "E_CHECK3"])).unwrap();
        assert_eq!(count(&second, "E_CHECK2"), 0);
        assert_eq!(count(&second, "case E_CHECK1:"), 1);
        assert_eq!(count(&second, "case E_CHECK3:"), 1);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].category, LintCategory::StaleEntry);
    }

    #[test]
    fn test_empty_callback_list_clears_region() {
        let first = gen(SKELETON, &design(&["E_CHECK1"]));
        let cleared = gen(&first, &design(&[]));
        assert_eq!(cleared, SKELETON);
        assert_eq!(count(&cleared, "Cb Enums"), 0);
    }

    #[test]
    fn test_disabled_callback_counts_as_deleted() {
        let first = gen(SKELETON, &design(&["E_CHECK1"]));
        let d = Design::new().with_page(Page::new("E_PG").with_widget(CheckBox::new("E_CHECK1")));
        assert_eq!(gen(&first, &d), SKELETON);
    }

    #[test]
    fn test_regenerate_after_clearing() {
        let first = gen(SKELETON, &design(&["E_CHECK1"]));
        let cleared = gen(&first, &design(&[]));
        let again = gen(&cleared, &design(&["E_CHECK1"]));
        assert_eq!(again, first);
    }

    #[test]
    fn test_no_duplication_over_many_passes() {
        let d = design(&["E_A", "E_B", "E_C"]);
        let mut text = SKELETON.to_string();
        for _ in 0..5 {
            text = gen(&text, &d);
        }
        for id in ["E_A", "E_B", "E_C"] {
            assert_eq!(count(&text, &format!("case {}:", id)), 1);
        }
    }

    #[test]
    fn test_duplicate_entries_collapse() {
        let first = gen(SKELETON, &design(&["E_A"]));
        let doubled = first.replace(
            "//<Cb Enums !End!>",
            "    case E_A:\n      return false;\n//<Cb Enums !End!>",
        );
        let (second, warnings) = run(&doubled, &design(&["E_A"])).unwrap();
        assert_eq!(second, first);
        assert_eq!(warnings[0].category, LintCategory::DuplicateEntry);
    }

    #[test]
    fn test_reused_enum_id_keeps_existing_entry() {
        let first = gen(SKELETON, &design(&["E_A"]));
        let edited = first.replace("      break;\n//<Cb", "      old_logic();\n      break;\n//<Cb");
        // a different widget that happens to reuse the deleted widget's id
        let d = Design::new().with_page(
            Page::new("E_PG").with_widget(CheckBox::new("E_A").with_callback(true)),
        );
        assert_eq!(gen(&edited, &d), edited);
    }

    #[test]
    fn test_nested_switch_in_case_body_kept() {
        let first = gen(SKELETON, &design(&["E_A", "E_B"]));
        let edited = first.replacen(
            "    case E_A:\n      break;\n",
            "    case E_A:\n      switch (mode) {\n      case 1:\n        go();\n        break;\n      }\n      break;\n",
            1,
        );
        assert_ne!(edited, first);

        let (second, warnings) = run(&edited, &design(&["E_A", "E_B"])).unwrap();
        assert_eq!(second, edited);
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_enum_preamble_preserved() {
        let first = gen(SKELETON, &design(&["E_A"]));
        let edited = first.replace(
            "//<Cb Enums !Start!>\n",
            "//<Cb Enums !Start!>\n    // entries below are managed\n",
        );
        let second = gen(&edited, &design(&["E_A", "E_B"]));
        assert!(second.contains("//<Cb Enums !Start!>\n    // entries below are managed\n    case E_A:"));
        assert!(second.contains("    case E_B:\n      break;\n//<Cb Enums !End!>"));
    }

    #[test]
    fn test_only_matching_kinds_selected() {
        let d = Design::new().with_page(
            Page::new("E_PG")
                .with_widget(CheckBox::new("E_A").with_callback(true))
                .with_widget(ToggleButton::new("E_T").with_callback(true))
                .with_widget(RadioButton::new("E_R").with_callback(true))
                .with_widget(RadialGauge::new("E_G")),
        );
        let out = gen(SKELETON, &d);
        assert!(out.contains("case E_A:"));
        assert!(!out.contains("E_T"));
        assert!(!out.contains("E_R"));
        assert!(!out.contains("E_G"));
    }

    #[test]
    fn test_missing_tag_passes_through() {
        let input = "no tags here\n";
        assert_eq!(gen(input, &design(&["E_A"])), input);
    }

    #[test]
    fn test_start_without_end_is_malformed() {
        let input = "//<Cb !Start!>\n    case E_A:\n";
        let err = run(input, &design(&["E_A"])).unwrap_err();
        assert!(matches!(err, GenerateError::Tag(ref e) if e.line() == 1));
    }

    #[test]
    fn test_enum_start_without_end_is_malformed() {
        let input = "//<Cb !Start!>\n//<Cb Enums !Start!>\n    case E_A:\n//<Cb !End!>\n";
        let err = run(input, &design(&["E_A"])).unwrap_err();
        assert!(matches!(err, GenerateError::Tag(ref e) if e.line() == 2));
    }

    #[test]
    fn test_check_validates_enum_markers() {
        let input = "//<Cb !Start!>\n//<Cb Enums !End!>\n//<Cb !End!>\n";
        assert_eq!(pipe().check(input).unwrap_err().line(), 2);
        assert!(pipe().check(SKELETON).is_ok());
    }

    #[test]
    fn test_malformed_detected_even_with_no_callbacks() {
        let input = "//<Cb !Start!>\n";
        assert!(run(input, &design(&[])).is_err());
    }

    #[test]
    fn test_crlf_lines_copied_verbatim() {
        let first = gen(SKELETON, &design(&["E_A"])).replace('\n', "\r\n");
        let second = gen(&first, &design(&["E_A"]));
        assert_eq!(second, first);
    }

    #[test]
    fn test_case_template_without_enum_is_invalid() {
        let store = TemplateStore::from_str("<CB>\n$<CALLBACK>\n<STOP>\n<CASE>\n  nothing\n<STOP>\n").unwrap();
        let d = design(&["E_A"]);
        let mut ctx = PassContext::new(&d, &store);
        let input = "//<Cb !Start!>\n//<Cb Enums !Start!>\n//<Cb Enums !End!>\n//<Cb !End!>\n";
        let err = pipe().process(input, &mut ctx).unwrap_err();
        assert!(matches!(err, GenerateError::Template(TemplateError::Invalid { .. })));
    }

    #[test]
    fn test_entry_pattern() {
        let t = Template::new("<CASE>", vec!["    case $<ENUM>: // $<ELEMREF>".to_string()]);
        let p = EntryPattern::from_template(&t, "ENUM").unwrap();
        assert_eq!(p.match_line("    case E_A:\n"), Some("E_A"));
        assert_eq!(p.match_line("  case E_B: // note"), Some("E_B"));
        assert_eq!(p.match_line("    case :"), None);
        assert_eq!(p.match_line("    break;"), None);
        assert_eq!(p.match_line("    case E_C;"), None);
    }
}
