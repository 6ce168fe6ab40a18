//! Template system for code generation
//!
//! Templates are named, ordered sequences of source lines stored in a
//! catalog. Each line may carry `$<KEY>` placeholders which are substituted
//! from a macro map when the template is expanded.
//!
//! # Example
//!
//! ```text
//! <CHECKBOX_CB_CASE>
//!     case $<ENUM>:
//!       break;
//! <STOP>
//! ```

mod expander;
mod lexer;
mod registry;

pub use expander::{code_writer, expand_macros, Emitter, Expansion, MacroMap};
pub use lexer::{placeholders, Piece};
pub use registry::{Template, TemplateError, TemplateStore};
