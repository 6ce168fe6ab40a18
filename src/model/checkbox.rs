//! Checkbox and radio button models

use serde::Deserialize;

use crate::template::MacroMap;

use super::{default_group, keys, Colors, Common, Widget, WidgetKind, GROUP_ID_NONE};

const DEF_FRAME_COLOR: &str = "GSLC_COL_GRAY";
const DEF_FILL_COLOR: &str = "GSLC_COL_BLACK";
const DEF_GLOW_COLOR: &str = "GSLC_COL_BLACK";
const DEF_MARK_COLOR: &str = "GSLC_COL_ORANGE";

/// A two-state checkbox
#[derive(Debug, Clone, Deserialize)]
pub struct CheckBox {
    #[serde(flatten)]
    pub common: Common,
    #[serde(default)]
    pub callback: bool,
    #[serde(default)]
    pub checked: bool,
    #[serde(default)]
    pub mark_color: Option<String>,
    #[serde(default)]
    pub colors: Colors,
}

impl CheckBox {
    pub fn new(enum_id: impl Into<String>) -> Self {
        Self {
            common: Common::new(enum_id),
            callback: false,
            checked: false,
            mark_color: None,
            colors: Colors::default(),
        }
    }

    pub fn with_callback(mut self, enabled: bool) -> Self {
        self.callback = enabled;
        self
    }

    pub fn uses_default_colors(&self) -> bool {
        self.colors.is_default()
    }
}

/// Keys shared by checkboxes and radio buttons
fn check_map(
    common: &Common,
    page_enum: &str,
    checked: bool,
    mark_color: &Option<String>,
    colors: &Colors,
) -> MacroMap {
    let mut map = common.base_map(page_enum);
    map.insert(keys::CHECKED.to_string(), checked.to_string());
    map.insert(
        "COL_MARK".to_string(),
        mark_color.clone().unwrap_or_else(|| DEF_MARK_COLOR.to_string()),
    );
    colors.insert_into(&mut map, (DEF_FRAME_COLOR, DEF_FILL_COLOR, DEF_GLOW_COLOR));
    map
}

impl Widget for CheckBox {
    fn kind(&self) -> WidgetKind {
        WidgetKind::Checkbox
    }

    fn enum_id(&self) -> &str {
        &self.common.enum_id
    }

    fn callback_eligible(&self) -> bool {
        self.callback
    }

    fn properties(&self, page_enum: &str) -> MacroMap {
        let mut map = check_map(
            &self.common,
            page_enum,
            self.checked,
            &self.mark_color,
            &self.colors,
        );
        self.common.apply_overrides(&mut map);
        map
    }
}

/// A checkbox drawn round and usually grouped with its siblings
#[derive(Debug, Clone, Deserialize)]
pub struct RadioButton {
    #[serde(flatten)]
    pub common: Common,
    #[serde(default)]
    pub callback: bool,
    #[serde(default)]
    pub checked: bool,
    #[serde(default = "default_group")]
    pub group: String,
    #[serde(default)]
    pub mark_color: Option<String>,
    #[serde(default)]
    pub colors: Colors,
}

impl RadioButton {
    pub fn new(enum_id: impl Into<String>) -> Self {
        Self {
            common: Common::new(enum_id),
            callback: false,
            checked: false,
            group: default_group(),
            mark_color: None,
            colors: Colors::default(),
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

    pub fn has_group(&self) -> bool {
        self.group != GROUP_ID_NONE
    }

    pub fn uses_default_colors(&self) -> bool {
        self.colors.is_default()
    }
}

impl Widget for RadioButton {
    fn kind(&self) -> WidgetKind {
        WidgetKind::RadioButton
    }

    fn enum_id(&self) -> &str {
        &self.common.enum_id
    }

    fn callback_eligible(&self) -> bool {
        self.callback
    }

    fn properties(&self, page_enum: &str) -> MacroMap {
        let mut map = check_map(
            &self.common,
            page_enum,
            self.checked,
            &self.mark_color,
            &self.colors,
        );
        map.insert(keys::GROUP.to_string(), self.group.clone());
        self.common.apply_overrides(&mut map);
        map
    }
}
