mod convert;
mod engine;
mod error;
mod fonts;

pub use convert::{Converter, HTML_FILE, OUTPUT_FILE, format_kib, install_engine};
pub use engine::{Engine, Installer, PipInstaller, WeasyPrint};
pub use error::Error;
pub use fonts::FontConfig;
