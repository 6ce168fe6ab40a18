//! Toggle button model

use serde::Deserialize;

use crate::template::MacroMap;

use super::{default_group, keys, Common, Widget, WidgetKind, GROUP_ID_NONE};

const DEF_THUMB_COLOR: &str = "GSLC_COL_GRAY";
const DEF_ON_COLOR: &str = "GSLC_COL_BLUE_DK2";
const DEF_OFF_COLOR: &str = "GSLC_COL_GRAY_DK2";

/// Name of the button callback generated by the button callback pipe
pub(crate) const BUTTON_CALLBACK_FN: &str = "&CbBtnCommon";

/// An on/off slider-style button
#[derive(Debug, Clone, Deserialize)]
pub struct ToggleButton {
    #[serde(flatten)]
    pub common: Common,
    #[serde(default)]
    pub callback: bool,
    #[serde(default)]
    pub checked: bool,
    #[serde(default)]
    pub circular: bool,
    #[serde(default = "default_group")]
    pub group: String,
    /// Colors are passed to the create call itself, there is no separate
    /// color block for this kind
    #[serde(default)]
    pub thumb_color: Option<String>,
    #[serde(default)]
    pub on_color: Option<String>,
    #[serde(default)]
    pub off_color: Option<String>,
}

impl ToggleButton {
    pub fn new(enum_id: impl Into<String>) -> Self {
        Self {
            common: Common::new(enum_id),
            callback: false,
            checked: false,
            circular: false,
            group: default_group(),
            thumb_color: None,
            on_color: None,
            off_color: None,
        }
    }

    pub fn with_callback(mut self, enabled: bool) -> Self {
        self.callback = enabled;
        self
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = group.into();
        self
    }

    pub fn with_on_color(mut self, color: impl Into<String>) -> Self {
        self.on_color = Some(color.into());
        self
    }

    pub fn has_group(&self) -> bool {
        self.group != GROUP_ID_NONE
    }
}

impl Widget for ToggleButton {
    fn kind(&self) -> WidgetKind {
        WidgetKind::ToggleButton
    }

    fn enum_id(&self) -> &str {
        &self.common.enum_id
    }

    fn callback_eligible(&self) -> bool {
        self.callback
    }

    fn properties(&self, page_enum: &str) -> MacroMap {
        let mut map = self.common.base_map(page_enum);
        map.insert(keys::CHECKED.to_string(), self.checked.to_string());
        map.insert("CIRCULAR".to_string(), self.circular.to_string());
        map.insert(keys::GROUP.to_string(), self.group.clone());
        let pick = |c: &Option<String>, d: &str| c.clone().unwrap_or_else(|| d.to_string());
        map.insert("COL_THUMB".to_string(), pick(&self.thumb_color, DEF_THUMB_COLOR));
        map.insert("COL_ON".to_string(), pick(&self.on_color, DEF_ON_COLOR));
        map.insert("COL_OFF".to_string(), pick(&self.off_color, DEF_OFF_COLOR));
        let callback_fn = if self.callback { BUTTON_CALLBACK_FN } else { "NULL" };
        map.insert("CALLBACK_FN".to_string(), callback_fn.to_string());
        self.common.apply_overrides(&mut map);
        map
    }
}
