//! CLI command implementations.

pub mod build;
pub mod init;
pub mod shell;

pub use build::{build_site, show_plan};
pub use init::init_project;
pub use shell::{parse_attribute, render_shell_page, ShellOptions};
