//! Widget Codegen - round-trip code generation for embedded GUI widgets
//!
//! This library expands named text templates into device-API source code for
//! a design made of pages and widgets, and regenerates a previously generated
//! file without losing code the user wrote inside its callback functions.
//!
//! # Example
//!
//! ```rust
//! use widget_codegen::model::{CheckBox, Design, Page};
//! use widget_codegen::{builtin_skeleton, generate};
//!
//! let design = Design::new().with_page(
//!     Page::new("E_PG_MAIN").with_widget(CheckBox::new("E_CHECK1").with_callback(true)),
//! );
//! let out = generate(builtin_skeleton(), &design).unwrap();
//! assert!(out.text.contains("case E_CHECK1:"));
//! ```

pub mod codegen;
pub mod config;
pub mod error;
pub mod lint;
pub mod model;
pub mod template;

use std::path::PathBuf;

pub use codegen::{builtin_skeleton, Generated, Generator, OutputOptions};
pub use config::{CodegenConfig, ConfigError};
pub use error::TagError;
pub use lint::{LintCategory, LintWarning};
pub use model::{Design, DesignError};
pub use template::{TemplateError, TemplateStore};

use thiserror::Error;

/// Errors that can abort a generation pass
#[derive(Debug, Error)]
pub enum GenerateError {
    /// A template was missing or the catalog was unusable
    #[error("template error: {0}")]
    Template(#[from] TemplateError),

    /// Tag markers in the input are inconsistent
    #[error("{0}")]
    Tag(#[from] TagError),

    #[error("design error: {0}")]
    Design(#[from] DesignError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("error accessing {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Run the standard pipes over `source` with the bundled templates
///
/// `source` is either a previous output or a project skeleton. The returned
/// text is what should replace it on disk.
pub fn generate(source: &str, design: &Design) -> Result<Generated, GenerateError> {
    let store = TemplateStore::builtin();
    generate_with_store(source, design, &store)
}

/// Run the standard pipes with a custom template store
///
/// # Example
///
/// ```rust
/// use widget_codegen::model::{Design, Page, RadialGauge};
/// use widget_codegen::{builtin_skeleton, generate_with_store, TemplateStore};
///
/// let store = TemplateStore::builtin().with_overrides(
///     TemplateStore::from_str("<PAGE_INIT>\n  // page $<PAGE>\n<STOP>\n").unwrap(),
/// );
/// let design = Design::new().with_page(Page::new("E_PG1").with_widget(RadialGauge::new("E_G")));
///
/// let out = generate_with_store(builtin_skeleton(), &design, &store).unwrap();
/// assert!(out.text.contains("  // page E_PG1\n"));
/// assert!(out.warnings.is_empty());
/// ```
pub fn generate_with_store(
    source: &str,
    design: &Design,
    store: &TemplateStore,
) -> Result<Generated, GenerateError> {
    Generator::new(store, design).generate(source)
}
