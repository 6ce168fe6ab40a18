//! Radial gauge model

use serde::Deserialize;

use crate::template::MacroMap;

use super::{default_true, Colors, Common, Widget, WidgetKind};

const DEF_FRAME_COLOR: &str = "GSLC_COL_GRAY";
const DEF_FILL_COLOR: &str = "GSLC_COL_BLACK";
const DEF_GLOW_COLOR: &str = "GSLC_COL_BLACK";

/// A dial with an indicator needle and tick marks
#[derive(Debug, Clone, Deserialize)]
pub struct RadialGauge {
    #[serde(flatten)]
    pub common: Common,
    #[serde(default)]
    pub min: i32,
    #[serde(default = "default_max")]
    pub max: i32,
    #[serde(default)]
    pub value: i32,
    #[serde(default = "default_true")]
    pub clockwise: bool,
    #[serde(default = "default_indicator_len")]
    pub indicator_len: i32,
    #[serde(default = "default_indicator_tip")]
    pub indicator_tip: i32,
    #[serde(default)]
    pub indicator_fill: bool,
    #[serde(default = "default_tick_divisions")]
    pub tick_divisions: i32,
    #[serde(default = "default_tick_len")]
    pub tick_len: i32,
    #[serde(default)]
    pub colors: Colors,
}

fn default_max() -> i32 {
    100
}

fn default_indicator_len() -> i32 {
    80
}

fn default_indicator_tip() -> i32 {
    3
}

fn default_tick_divisions() -> i32 {
    8
}

fn default_tick_len() -> i32 {
    5
}

impl RadialGauge {
    pub fn new(enum_id: impl Into<String>) -> Self {
        Self {
            common: Common::new(enum_id),
            min: 0,
            max: default_max(),
            value: 0,
            clockwise: true,
            indicator_len: default_indicator_len(),
            indicator_tip: default_indicator_tip(),
            indicator_fill: false,
            tick_divisions: default_tick_divisions(),
            tick_len: default_tick_len(),
            colors: Colors::default(),
        }
    }

    pub fn with_clockwise(mut self, clockwise: bool) -> Self {
        self.clockwise = clockwise;
        self
    }

    pub fn with_colors(mut self, colors: Colors) -> Self {
        self.colors = colors;
        self
    }

    pub fn is_clockwise(&self) -> bool {
        self.clockwise
    }

    pub fn uses_default_colors(&self) -> bool {
        self.colors.is_default()
    }
}

impl Widget for RadialGauge {
    fn kind(&self) -> WidgetKind {
        WidgetKind::RadialGauge
    }

    fn enum_id(&self) -> &str {
        &self.common.enum_id
    }

    fn properties(&self, page_enum: &str) -> MacroMap {
        let mut map = self.common.base_map(page_enum);
        let mut put = |k: &str, v: String| {
            map.insert(k.to_string(), v);
        };
        put("MIN", self.min.to_string());
        put("MAX", self.max.to_string());
        put("VALUE", self.value.to_string());
        put("COL_GAUGE", "GSLC_COL_GREEN".to_string());
        put("COL_IND", "GSLC_COL_YELLOW".to_string());
        put("IND_LEN", self.indicator_len.to_string());
        put("IND_TIP", self.indicator_tip.to_string());
        put("IND_FILL", self.indicator_fill.to_string());
        put("COL_TICK", "GSLC_COL_GRAY".to_string());
        put("TICK_DIV", self.tick_divisions.to_string());
        put("TICK_LEN", self.tick_len.to_string());
        self.colors
            .insert_into(&mut map, (DEF_FRAME_COLOR, DEF_FILL_COLOR, DEF_GLOW_COLOR));
        self.common.apply_overrides(&mut map);
        map
    }
}
