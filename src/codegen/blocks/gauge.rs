//! Code block for gslc_ElemXGaugeCreate() calls

use crate::model::{RadialGauge, Widget};
use crate::template::{Emitter, TemplateError};

use super::{CodeBlock, COLOR_TEMPLATE, ELEMENT_REF_TEMPLATE};

const RADIALGAUGE_TEMPLATE: &str = "<RADIALGAUGE>";
const RADIALGAUGEFLIP_TEMPLATE: &str = "<RADIALFLIP>";
const RADIALGAUGEIND_TEMPLATE: &str = "<RADIALIND>";
const RADIALGAUGETICKS_TEMPLATE: &str = "<RADIALTICKS>";

impl CodeBlock for RadialGauge {
    fn write_block(
        &self,
        emitter: &mut Emitter<'_>,
        out: &mut String,
        page_enum: &str,
    ) -> Result<(), TemplateError> {
        let map = self.properties(page_enum);

        emitter.emit(out, RADIALGAUGE_TEMPLATE, &map)?;
        if !self.is_clockwise() {
            emitter.emit(out, RADIALGAUGEFLIP_TEMPLATE, &map)?;
        }
        if !self.uses_default_colors() {
            emitter.emit(out, COLOR_TEMPLATE, &map)?;
        }
        // indicator and ticks only apply to the radial style
        emitter.emit(out, RADIALGAUGEIND_TEMPLATE, &map)?;
        emitter.emit(out, RADIALGAUGETICKS_TEMPLATE, &map)?;
        emitter.emit(out, ELEMENT_REF_TEMPLATE, &map)
    }
}
