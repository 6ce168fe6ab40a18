//! Code block for gslc_ElemXTogglebtnCreate() calls

use crate::model::{ToggleButton, Widget};
use crate::template::{Emitter, TemplateError};

use super::{CodeBlock, ELEMENT_REF_TEMPLATE, GROUP_TEMPLATE};

const TOGGLE_TEMPLATE: &str = "<TOGGLEBUTTON>";

impl CodeBlock for ToggleButton {
    fn write_block(
        &self,
        emitter: &mut Emitter<'_>,
        out: &mut String,
        page_enum: &str,
    ) -> Result<(), TemplateError> {
        let map = self.properties(page_enum);

        emitter.emit(out, TOGGLE_TEMPLATE, &map)?;
        if self.has_group() {
            emitter.emit(out, GROUP_TEMPLATE, &map)?;
        }
        // colors are arguments of the create call
        emitter.emit(out, ELEMENT_REF_TEMPLATE, &map)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{echo_store, sequence};
    use super::*;
    use crate::template::TemplateStore;

    #[test]
    fn test_toggle_sequence() {
        let store = echo_store(&[TOGGLE_TEMPLATE, GROUP_TEMPLATE, ELEMENT_REF_TEMPLATE]);
        let mut emitter = Emitter::new(&store);

        let mut out = String::new();
        ToggleButton::new("E_T")
            .write_block(&mut emitter, &mut out, "E_PG")
            .unwrap();
        assert_eq!(sequence(&out), vec!["<TOGGLEBUTTON>", "<ELEMENT_REF>"]);

        let mut out = String::new();
        ToggleButton::new("E_T")
            .with_group("GSLC_GROUP_ID_2")
            .write_block(&mut emitter, &mut out, "E_PG")
            .unwrap();
        assert_eq!(
            sequence(&out),
            vec!["<TOGGLEBUTTON>", "<GROUP>", "<ELEMENT_REF>"]
        );
    }

    #[test]
    fn test_callback_fn_follows_flag() {
        let store = TemplateStore::builtin();
        let mut emitter = Emitter::new(&store);

        let mut out = String::new();
        ToggleButton::new("E_T")
            .with_callback(true)
            .write_block(&mut emitter, &mut out, "E_PG")
            .unwrap();
        assert!(out.contains("false,false,&CbBtnCommon);"));

        let mut out = String::new();
        ToggleButton::new("E_T")
            .write_block(&mut emitter, &mut out, "E_PG")
            .unwrap();
        assert!(out.contains("false,false,NULL);"));
        assert!(emitter.warnings().is_empty());
    }

    #[test]
    fn test_colors_go_into_create_call() {
        let store = TemplateStore::builtin();
        let mut emitter = Emitter::new(&store);
        let mut out = String::new();
        ToggleButton::new("E_T")
            .with_on_color("GSLC_COL_GREEN")
            .write_block(&mut emitter, &mut out, "E_PG")
            .unwrap();
        assert!(out.contains("GSLC_COL_GRAY,GSLC_COL_GREEN,GSLC_COL_GRAY_DK2,"));
        assert!(!out.contains("gslc_ElemSetCol"));
    }
}
