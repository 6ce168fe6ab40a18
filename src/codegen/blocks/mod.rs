//! Per-widget creation code.
//!
//! Every kind follows the same shape: its primary creation template, then
//! each optional feature template whose flag holds, then the element
//! reference template. All conditions are checked independently and the
//! order is fixed per kind, since later device calls assume earlier ones ran.

mod checkbox;
mod gauge;
mod toggle;

use crate::template::{Emitter, TemplateError};

pub(crate) const ELEMENT_REF_TEMPLATE: &str = "<ELEMENT_REF>";
pub(crate) const COLOR_TEMPLATE: &str = "<COLOR>";
pub(crate) const GROUP_TEMPLATE: &str = "<GROUP>";

/// Writes the creation code for one widget instance
pub trait CodeBlock {
    fn write_block(
        &self,
        emitter: &mut Emitter<'_>,
        out: &mut String,
        page_enum: &str,
    ) -> Result<(), TemplateError>;
}
