//! Code blocks for gslc_ElemXCheckboxCreate() calls

use crate::model::{CheckBox, RadioButton, Widget};
use crate::template::{Emitter, TemplateError};

use super::{CodeBlock, COLOR_TEMPLATE, ELEMENT_REF_TEMPLATE, GROUP_TEMPLATE};

const CHECKBOX_TEMPLATE: &str = "<CHECKBOX>";
const RADIOBUTTON_TEMPLATE: &str = "<RADIOBUTTON>";
const CALLBACK_FUNC_TEMPLATE: &str = "<CHECKBOX_CB_FUNC>";

impl CodeBlock for CheckBox {
    fn write_block(
        &self,
        emitter: &mut Emitter<'_>,
        out: &mut String,
        page_enum: &str,
    ) -> Result<(), TemplateError> {
        let map = self.properties(page_enum);

        emitter.emit(out, CHECKBOX_TEMPLATE, &map)?;
        if self.callback {
            emitter.emit(out, CALLBACK_FUNC_TEMPLATE, &map)?;
        }
        if !self.uses_default_colors() {
            emitter.emit(out, COLOR_TEMPLATE, &map)?;
        }
        emitter.emit(out, ELEMENT_REF_TEMPLATE, &map)
    }
}

impl CodeBlock for RadioButton {
    fn write_block(
        &self,
        emitter: &mut Emitter<'_>,
        out: &mut String,
        page_enum: &str,
    ) -> Result<(), TemplateError> {
        let map = self.properties(page_enum);

        emitter.emit(out, RADIOBUTTON_TEMPLATE, &map)?;
        if self.callback {
            emitter.emit(out, CALLBACK_FUNC_TEMPLATE, &map)?;
        }
        if self.has_group() {
            emitter.emit(out, GROUP_TEMPLATE, &map)?;
        }
        if !self.uses_default_colors() {
            emitter.emit(out, COLOR_TEMPLATE, &map)?;
        }
        emitter.emit(out, ELEMENT_REF_TEMPLATE, &map)
    }
}
