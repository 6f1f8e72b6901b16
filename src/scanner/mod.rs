mod blocks;
mod braces;
mod cleanup;
mod trigger;
mod types;

pub use blocks::{remove_blocks, BlockOutcome};
pub use braces::{Delimiters, DepthScanner, Scan, BRACES, PARENS};
pub use cleanup::remove_stray_calls;
pub use trigger::{Trigger, DEFAULT_CALL, DEFAULT_IDENTIFIER};
pub use types::{DebugBlock, Document, Opener};
