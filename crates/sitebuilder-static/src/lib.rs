//! Static site build pipeline.
//!
//! Loads site data, compiles stylesheets, renders a single page template and
//! mirrors static assets into a distribution directory.

pub mod assets;
pub mod builder;
pub mod layout;
pub mod styles;
pub mod templates;

pub use builder::{BuildConfig, BuildError, BuildResult, BuildStage, SiteBuilder};
pub use layout::Layout;
pub use templates::RenderOptions;
