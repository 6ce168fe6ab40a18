//! Pipes: one per tagged region of the output file.
//!
//! The generator runs its pipes in a fixed order over the same text. Each
//! pipe reacts only to its own tag and copies every other line verbatim.

mod block;
mod callback;

pub use block::{BlockKind, BlockPipe};
pub use callback::CallbackPipe;

use crate::error::TagError;
use crate::model::Design;
use crate::template::{Emitter, TemplateStore};
use crate::GenerateError;

use super::tag::{locate, split_lines, Tag};

/// State shared by the pipes of a single generation pass
pub struct PassContext<'a> {
    pub design: &'a Design,
    pub emitter: Emitter<'a>,
}

impl<'a> PassContext<'a> {
    pub fn new(design: &'a Design, store: &'a TemplateStore) -> Self {
        Self {
            design,
            emitter: Emitter::new(store),
        }
    }
}

/// A processing stage owning one tag of the output file
pub trait Pipe {
    fn tag(&self) -> &Tag;

    /// Check the structure of this pipe's markers in `input`
    fn check(&self, input: &str) -> Result<(), TagError> {
        locate(&split_lines(input), self.tag()).map(|_| ())
    }

    /// Produce the new text from `input`
    fn process(&self, input: &str, ctx: &mut PassContext<'_>) -> Result<String, GenerateError>;
}
