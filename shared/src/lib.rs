//! Shared types for the fast-ctd toolchain wrappers.
//!
//! Holds the pieces every layer needs: the file kinds each pipeline stage
//! accepts, path validation, and the library error type.

pub mod error;
pub mod file_kind;
pub mod fs;

pub use error::{CtdError, Result};
pub use file_kind::{FileKind, suffix};
pub use fs::{
    DEFAULT_EXISTS_HINT, sibling_with_stem_suffix, validate_file_exists, validate_file_extension,
    validate_input,
};
