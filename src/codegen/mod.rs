//! Code generation: widget blocks, tagged regions and the pass driver

pub mod blocks;
pub mod generator;
pub mod pipes;
pub mod tag;

pub use blocks::CodeBlock;
pub use generator::{builtin_skeleton, standard_pipes, Generated, Generator, OutputOptions};
pub use pipes::{BlockKind, BlockPipe, CallbackPipe, PassContext, Pipe};
pub use tag::Tag;
