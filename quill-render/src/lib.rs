//! # quill-render
//!
//! HTML document shell rendering for quill.
//!
//! The shell wraps a pre-rendered page body with fixed head metadata and the
//! site's external script and stylesheet references. Rendering uses Askama.

pub mod shell;

pub use shell::{render_shell, ExternalResource, ShellProps, EXTERNAL_RESOURCES};
