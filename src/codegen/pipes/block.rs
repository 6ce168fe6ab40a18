//! Machine-owned regions, rebuilt in full on every pass

use tracing::debug;

use crate::codegen::CodeBlock;
use crate::model::{keys, Widget};
use crate::template::{MacroMap, TemplateError};
use crate::GenerateError;

use super::super::tag::{copy_lines, locate, split_lines, Tag};
use super::{PassContext, Pipe};

const ENUM_LIST_TEMPLATE: &str = "<ENUM_LIST>";
const ELEMENT_REF_DECL_TEMPLATE: &str = "<ELEMENT_REF_DECL>";
const PAGE_INIT_TEMPLATE: &str = "<PAGE_INIT>";

const ENUMS_MACRO: &str = "ENUMS";

/// What a block pipe writes between its markers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    /// One enum declaration listing every page and widget id
    Enums,
    /// A global element reference per widget
    ElementRefs,
    /// Page headers followed by each widget's creation code
    InitGui,
}

#[derive(Debug, Clone)]
pub struct BlockPipe {
    tag: Tag,
    kind: BlockKind,
}

impl BlockPipe {
    pub fn new(tag: impl Into<String>, kind: BlockKind) -> Self {
        Self {
            tag: Tag::new(tag),
            kind,
        }
    }

    pub fn enums() -> Self {
        Self::new("Enum", BlockKind::Enums)
    }

    pub fn element_refs() -> Self {
        Self::new("Save_References", BlockKind::ElementRefs)
    }

    pub fn init_gui() -> Self {
        Self::new("InitGUI", BlockKind::InitGui)
    }

    fn write_body(&self, ctx: &mut PassContext<'_>, out: &mut String) -> Result<(), TemplateError> {
        let design = ctx.design;
        match self.kind {
            BlockKind::Enums => {
                if design.pages.is_empty() {
                    return Ok(());
                }
                let ids: Vec<&str> = design
                    .pages
                    .iter()
                    .map(|p| p.enum_id.as_str())
                    .chain(design.widgets().map(|(_, w)| w.enum_id()))
                    .collect();
                let mut map = MacroMap::new();
                map.insert(ENUMS_MACRO.to_string(), ids.join(","));
                ctx.emitter.emit(out, ENUM_LIST_TEMPLATE, &map)
            }
            BlockKind::ElementRefs => {
                for (page, widget) in design.widgets() {
                    let map = widget.properties(&page.enum_id);
                    ctx.emitter.emit(out, ELEMENT_REF_DECL_TEMPLATE, &map)?;
                }
                Ok(())
            }
            BlockKind::InitGui => {
                for page in &design.pages {
                    let mut map = MacroMap::new();
                    map.insert(keys::PAGE.to_string(), page.enum_id.clone());
                    ctx.emitter.emit(out, PAGE_INIT_TEMPLATE, &map)?;
                    for widget in &page.widgets {
                        widget
                            .as_widget()
                            .write_block(&mut ctx.emitter, out, &page.enum_id)?;
                    }
                }
                Ok(())
            }
        }
    }
}

impl Pipe for BlockPipe {
    fn tag(&self) -> &Tag {
        &self.tag
    }

    fn process(&self, input: &str, ctx: &mut PassContext<'_>) -> Result<String, GenerateError> {
        let lines = split_lines(input);
        let Some(region) = locate(&lines, &self.tag)? else {
            debug!(tag = self.tag.name(), "tag not present");
            return Ok(input.to_string());
        };

        let mut out = String::with_capacity(input.len());
        copy_lines(&mut out, &lines[..=region.start]);
        self.write_body(ctx, &mut out)?;
        copy_lines(&mut out, &lines[region.end..]);
        debug!(tag = self.tag.name(), kind = ?self.kind, "rebuilt block");
        Ok(out)
    }
}
