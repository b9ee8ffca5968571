use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::engine::{Engine, Installer};
use crate::error::Error;
use crate::fonts::FontConfig;

pub const HTML_FILE: &str = "EXECUTIVE_SUMMARY_PRINT_READY.html";
pub const OUTPUT_FILE: &str = "APEX_OS_EXECUTIVE_SUMMARY_v2.pdf";

const HEADER: &str = "\
╔════════════════════════════════════════════════════════════════╗
║     APEX OS PDF GENERATOR - Print Ready Documents             ║
╚════════════════════════════════════════════════════════════════╝";

const SUCCESS: &str = "\
╔════════════════════════════════════════════════════════════════╗
║  ✅ SUCCESS! Your PDF is ready!                                ║
╚════════════════════════════════════════════════════════════════╝";

/// One HTML-to-PDF conversion rooted at a working directory.
///
/// Relative input and output paths resolve against `work_dir`.
#[derive(Debug, Clone)]
pub struct Converter {
    work_dir: PathBuf,
    input: PathBuf,
    output: PathBuf,
    fonts: FontConfig,
}

impl Converter {
    pub fn new(work_dir: impl Into<PathBuf>) -> Self {
        Self {
            work_dir: work_dir.into(),
            input: PathBuf::from(HTML_FILE),
            output: PathBuf::from(OUTPUT_FILE),
            fonts: FontConfig::default(),
        }
    }

    pub fn input(mut self, input: impl Into<PathBuf>) -> Self {
        self.input = input.into();
        self
    }

    pub fn output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    pub fn fonts(mut self, fonts: FontConfig) -> Self {
        self.fonts = fonts;
        self
    }

    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    pub fn input_path(&self) -> PathBuf {
        self.work_dir.join(&self.input)
    }

    pub fn output_path(&self) -> PathBuf {
        self.work_dir.join(&self.output)
    }

    /// Renders the input with `engine` and checks that a PDF came out,
    /// reporting progress to `out`. Returns the size of the written PDF.
    pub fn convert(&self, engine: &dyn Engine, out: &mut dyn Write) -> Result<u64, Error> {
        let input = self.input_path();
        let output = self.output_path();

        writeln!(out, "{HEADER}")?;
        writeln!(out)?;

        if !input.is_file() {
            writeln!(out, "❌ Error: {} not found!", self.input.display())?;
            writeln!(out, "   Looking in: {}", self.work_dir.display())?;
            return Err(Error::MissingInput {
                path: self.input.clone(),
                searched: self.work_dir.clone(),
            });
        }

        writeln!(out, "📄 Loading: {}", self.input.display())?;
        writeln!(out, "🎨 Generating PDF...")?;
        log::info!(
            "{}: {} -> {}",
            engine.name(),
            input.display(),
            output.display()
        );

        if let Err(e) = engine.render(&input, &output, &self.fonts) {
            writeln!(out, "❌ PDF generation failed!")?;
            return Err(e);
        }

        let bytes = match fs::metadata(&output) {
            Ok(meta) if meta.is_file() => meta.len(),
            _ => {
                writeln!(out, "❌ PDF generation failed!")?;
                return Err(Error::OutputMissing(output));
            }
        };

        writeln!(out)?;
        writeln!(out, "✅ PDF generated successfully!")?;
        writeln!(out, "📁 Saved to: {}", self.output.display())?;
        writeln!(out, "📊 File size: {} KB", format_kib(bytes))?;
        writeln!(out)?;
        writeln!(out, "{SUCCESS}")?;

        Ok(bytes)
    }
}

/// Attempts to install a missing engine once and asks for a re-run.
///
/// A failed install is only logged; the caller cannot tell the difference.
pub fn install_engine(
    package: &str,
    installer: &dyn Installer,
    out: &mut dyn Write,
) -> Result<(), Error> {
    writeln!(out, "📦 Installing {package}...")?;
    if let Err(e) = installer.install() {
        log::warn!("{package}: {e}");
    }
    writeln!(out, "✅ Installation complete. Please run this script again.")?;
    Ok(())
}

/// Size in kibibytes with one decimal place.
pub fn format_kib(bytes: u64) -> String {
    format!("{:.1}", bytes as f64 / 1024.0)
}
