use std::path::{Path, PathBuf};

const FONTS_ENV: &str = "APEX_PDF_FONTS";

/// Font settings passed to the rendering engine.
///
/// The default configuration carries no extra directories, leaving font
/// discovery entirely to the engine.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FontConfig {
    dirs: Vec<PathBuf>,
}

impl FontConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads extra font directories from `APEX_PDF_FONTS`.
    pub fn from_env() -> Self {
        match std::env::var(FONTS_ENV) {
            Ok(val) => {
                let config = Self::from_dir_list(&val);
                log::debug!("{FONTS_ENV}: {} font dir(s)", config.dirs.len());
                config
            }
            Err(_) => Self::default(),
        }
    }

    /// Parses a `:`-separated (`;` on Windows) list of directories.
    pub fn from_dir_list(val: &str) -> Self {
        let sep = if cfg!(windows) { ';' } else { ':' };
        let dirs = val
            .split(sep)
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(PathBuf::from)
            .collect();
        Self { dirs }
    }

    pub fn with_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dirs.push(dir.into());
        self
    }

    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty()
    }

    /// Fontconfig document that layers the extra directories on top of the
    /// system configuration.
    pub fn to_fontconfig_xml(&self) -> String {
        let mut xml = String::from(
            "<?xml version=\"1.0\"?>\n\
             <!DOCTYPE fontconfig SYSTEM \"fonts.dtd\">\n\
             <fontconfig>\n  \
             <include ignore_missing=\"yes\">/etc/fonts/fonts.conf</include>\n",
        );
        for dir in &self.dirs {
            xml.push_str("  <dir>");
            xml.push_str(&escape_xml(dir));
            xml.push_str("</dir>\n");
        }
        xml.push_str("</fontconfig>\n");
        xml
    }
}

fn escape_xml(path: &Path) -> String {
    let raw = path.to_string_lossy();
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
