//! Widget models and the design they belong to
//!
//! A [`Design`] is an ordered list of pages, each holding the widgets placed on
//! it. Generation only reads models; each widget kind exposes what the code
//! generator needs through the [`Widget`] capability trait.

mod checkbox;
mod gauge;
mod toggle;

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::codegen::CodeBlock;
use crate::template::MacroMap;

pub use checkbox::{CheckBox, RadioButton};
pub use gauge::RadialGauge;
pub use toggle::ToggleButton;

/// Macro keys shared by every widget kind
pub mod keys {
    pub const ENUM: &str = "ENUM";
    pub const PAGE: &str = "PAGE";
    pub const ELEMREF: &str = "ELEMREF";
    pub const X: &str = "X";
    pub const Y: &str = "Y";
    pub const W: &str = "W";
    pub const H: &str = "H";
    pub const COL_FRAME: &str = "COL_FRAME";
    pub const COL_FILL: &str = "COL_FILL";
    pub const COL_GLOW: &str = "COL_GLOW";
    pub const GROUP: &str = "GROUP";
    pub const CHECKED: &str = "CHECKED";
}

/// Group id meaning "not part of a radio group"
pub const GROUP_ID_NONE: &str = "GSLC_GROUP_ID_NONE";

/// Errors that can occur when loading a design manifest
#[derive(Error, Debug)]
pub enum DesignError {
    #[error("failed to read design file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse design TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("duplicate enum id '{0}' in design")]
    DuplicateEnum(String),
    #[error("enum id '{0}' is not a C identifier")]
    InvalidEnum(String),
}

/// Enum ids end up as C enumerators and `case` labels
fn is_identifier(id: &str) -> bool {
    let mut chars = id.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Closed set of widget kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetKind {
    Checkbox,
    RadioButton,
    ToggleButton,
    RadialGauge,
}

impl fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WidgetKind::Checkbox => write!(f, "checkbox"),
            WidgetKind::RadioButton => write!(f, "radio button"),
            WidgetKind::ToggleButton => write!(f, "toggle button"),
            WidgetKind::RadialGauge => write!(f, "radial gauge"),
        }
    }
}

/// What the generator can ask of any widget
pub trait Widget: CodeBlock {
    fn kind(&self) -> WidgetKind;

    /// Stable symbolic identifier
    fn enum_id(&self) -> &str;

    /// Whether this widget wants an entry in its callback function
    fn callback_eligible(&self) -> bool {
        false
    }

    /// Macro map for this widget on the page `page_enum`
    fn properties(&self, page_enum: &str) -> MacroMap;
}

/// Attributes every widget kind carries
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Common {
    #[serde(rename = "enum")]
    pub enum_id: String,
    /// Name of the global element reference; derived from the enum id when absent
    #[serde(default)]
    pub elem_ref: Option<String>,
    #[serde(default)]
    pub x: i32,
    #[serde(default)]
    pub y: i32,
    #[serde(default)]
    pub w: i32,
    #[serde(default)]
    pub h: i32,
    /// Extra macro values; these override anything computed from the model
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
}

impl Common {
    pub fn new(enum_id: impl Into<String>) -> Self {
        Self {
            enum_id: enum_id.into(),
            ..Self::default()
        }
    }

    /// Element reference name, e.g. `m_pCHECK1` for `E_CHECK1`
    pub fn elem_ref(&self) -> String {
        match &self.elem_ref {
            Some(name) => name.clone(),
            None => {
                let stem = self.enum_id.strip_prefix("E_").unwrap_or(&self.enum_id);
                format!("m_p{}", stem)
            }
        }
    }

    /// Macro map with the shared keys filled in
    pub fn base_map(&self, page_enum: &str) -> MacroMap {
        let mut map = MacroMap::new();
        map.insert(keys::ENUM.to_string(), self.enum_id.clone());
        map.insert(keys::PAGE.to_string(), page_enum.to_string());
        map.insert(keys::ELEMREF.to_string(), self.elem_ref());
        map.insert(keys::X.to_string(), self.x.to_string());
        map.insert(keys::Y.to_string(), self.y.to_string());
        map.insert(keys::W.to_string(), self.w.to_string());
        map.insert(keys::H.to_string(), self.h.to_string());
        map
    }

    /// Apply the free-form property overrides last
    pub fn apply_overrides(&self, map: &mut MacroMap) {
        for (k, v) in &self.properties {
            map.insert(k.clone(), v.clone());
        }
    }
}

/// Optional color overrides; all `None` means the kind's defaults are used
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Colors {
    #[serde(default)]
    pub frame: Option<String>,
    #[serde(default)]
    pub fill: Option<String>,
    #[serde(default)]
    pub glow: Option<String>,
}

impl Colors {
    pub fn is_default(&self) -> bool {
        self.frame.is_none() && self.fill.is_none() && self.glow.is_none()
    }

    /// Insert the color keys, falling back to `defaults` (frame, fill, glow)
    pub fn insert_into(&self, map: &mut MacroMap, defaults: (&str, &str, &str)) {
        let pick = |c: &Option<String>, d: &str| c.clone().unwrap_or_else(|| d.to_string());
        map.insert(keys::COL_FRAME.to_string(), pick(&self.frame, defaults.0));
        map.insert(keys::COL_FILL.to_string(), pick(&self.fill, defaults.1));
        map.insert(keys::COL_GLOW.to_string(), pick(&self.glow, defaults.2));
    }
}

pub(crate) fn default_group() -> String {
    GROUP_ID_NONE.to_string()
}

pub(crate) fn default_true() -> bool {
    true
}

/// A widget of any kind, as it appears in a design manifest
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WidgetModel {
    Checkbox(CheckBox),
    RadioButton(RadioButton),
    ToggleButton(ToggleButton),
    RadialGauge(RadialGauge),
}

impl WidgetModel {
    pub fn as_widget(&self) -> &dyn Widget {
        match self {
            WidgetModel::Checkbox(w) => w,
            WidgetModel::RadioButton(w) => w,
            WidgetModel::ToggleButton(w) => w,
            WidgetModel::RadialGauge(w) => w,
        }
    }
}

impl From<CheckBox> for WidgetModel {
    fn from(w: CheckBox) -> Self {
        WidgetModel::Checkbox(w)
    }
}

impl From<RadioButton> for WidgetModel {
    fn from(w: RadioButton) -> Self {
        WidgetModel::RadioButton(w)
    }
}

impl From<ToggleButton> for WidgetModel {
    fn from(w: ToggleButton) -> Self {
        WidgetModel::ToggleButton(w)
    }
}

impl From<RadialGauge> for WidgetModel {
    fn from(w: RadialGauge) -> Self {
        WidgetModel::RadialGauge(w)
    }
}

/// One page of the design
#[derive(Debug, Clone, Deserialize)]
pub struct Page {
    #[serde(rename = "enum")]
    pub enum_id: String,
    #[serde(default)]
    pub widgets: Vec<WidgetModel>,
}

impl Page {
    pub fn new(enum_id: impl Into<String>) -> Self {
        Self {
            enum_id: enum_id.into(),
            widgets: Vec::new(),
        }
    }

    pub fn with_widget(mut self, widget: impl Into<WidgetModel>) -> Self {
        self.widgets.push(widget.into());
        self
    }
}

/// The full model collection for one design
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Design {
    #[serde(default)]
    pub pages: Vec<Page>,
}

impl Design {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, page: Page) -> Self {
        self.pages.push(page);
        self
    }

    /// Load a design manifest from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, DesignError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Parse a design manifest and check that enum ids are unique
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, DesignError> {
        let design: Design = toml::from_str(content)?;
        design.validate()?;
        Ok(design)
    }

    pub fn validate(&self) -> Result<(), DesignError> {
        let mut seen = HashSet::new();
        let ids = self
            .pages
            .iter()
            .map(|p| p.enum_id.as_str())
            .chain(self.widgets().map(|(_, w)| w.enum_id()));
        for id in ids {
            if !is_identifier(id) {
                return Err(DesignError::InvalidEnum(id.to_string()));
            }
            if !seen.insert(id) {
                return Err(DesignError::DuplicateEnum(id.to_string()));
            }
        }
        Ok(())
    }

    /// Every widget in design order, with the page it sits on
    pub fn widgets(&self) -> impl Iterator<Item = (&Page, &dyn Widget)> {
        self.pages
            .iter()
            .flat_map(|page| page.widgets.iter().map(move |w| (page, w.as_widget())))
    }
}
