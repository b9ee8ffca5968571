use std::ffi::{OsStr, OsString};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::error::Error;
use crate::fonts::FontConfig;

const WEASYPRINT: &str = "weasyprint";

/// An HTML-to-PDF renderer. Layout and PDF encoding happen entirely inside
/// the implementation; callers only see whether it succeeded.
pub trait Engine {
    fn name(&self) -> &str;

    /// Renders `input` and writes the PDF to `output`, blocking until done.
    fn render(&self, input: &Path, output: &Path, fonts: &FontConfig) -> Result<(), Error>;
}

/// Installs a missing rendering engine.
pub trait Installer {
    fn install(&self) -> Result<(), Error>;
}

/// Drives the `weasyprint` command-line renderer.
#[derive(Debug, Clone)]
pub struct WeasyPrint {
    program: PathBuf,
}

impl WeasyPrint {
    /// Finds `weasyprint` on `PATH`.
    pub fn discover() -> Result<Self, Error> {
        let search_path = std::env::var_os("PATH").unwrap_or_default();
        Self::discover_in(&search_path)
    }

    /// Finds `weasyprint` in a `PATH`-style list of directories.
    pub fn discover_in(search_path: &OsStr) -> Result<Self, Error> {
        let names: &[&str] = if cfg!(windows) {
            &["weasyprint.exe", WEASYPRINT]
        } else {
            &[WEASYPRINT]
        };
        for dir in std::env::split_paths(search_path) {
            for name in names {
                let candidate = dir.join(name);
                if is_executable(&candidate) {
                    log::debug!("found {WEASYPRINT} at {}", candidate.display());
                    return Ok(Self { program: candidate });
                }
            }
        }
        Err(Error::EngineNotFound(WEASYPRINT.to_string()))
    }

    /// Uses an explicit executable instead of searching `PATH`.
    pub fn with_program(program: impl Into<PathBuf>) -> Result<Self, Error> {
        let program = program.into();
        if !is_executable(&program) {
            return Err(Error::EngineNotFound(program.display().to_string()));
        }
        Ok(Self { program })
    }

    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl Engine for WeasyPrint {
    fn name(&self) -> &str {
        WEASYPRINT
    }

    fn render(&self, input: &Path, output: &Path, fonts: &FontConfig) -> Result<(), Error> {
        let mut cmd = Command::new(&self.program);
        cmd.arg(input).arg(output).stdin(Stdio::null());

        let fonts_conf = if fonts.is_empty() {
            None
        } else {
            let path = fonts_conf_path(output);
            fs::write(&path, fonts.to_fontconfig_xml())?;
            cmd.env("FONTCONFIG_FILE", &path);
            log::debug!("font dirs {:?} via {}", fonts.dirs(), path.display());
            Some(path)
        };

        log::debug!("running {cmd:?}");
        let result = cmd.output();

        if let Some(path) = fonts_conf
            && let Err(e) = fs::remove_file(&path)
        {
            log::warn!("could not remove {}: {e}", path.display());
        }

        let out = result?;
        let stderr = String::from_utf8_lossy(&out.stderr);
        if !out.status.success() {
            return Err(Error::Render {
                code: out.status.code(),
                stderr: stderr.into_owned(),
            });
        }
        for line in stderr.lines().filter(|l| !l.trim().is_empty()) {
            log::warn!("{WEASYPRINT}: {line}");
        }
        Ok(())
    }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    fs::metadata(path).is_ok_and(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

fn fonts_conf_path(output: &Path) -> PathBuf {
    let mut name = OsString::from(output.as_os_str());
    name.push(".fonts.conf");
    PathBuf::from(name)
}

/// Installs WeasyPrint for the current user with `pip3 install --user`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PipInstaller;

impl Installer for PipInstaller {
    fn install(&self) -> Result<(), Error> {
        let mut cmd = Command::new("pip3");
        cmd.args(["install", WEASYPRINT, "--user"]);
        log::debug!("running {cmd:?}");
        let status = cmd.status()?;
        if status.success() {
            Ok(())
        } else {
            Err(Error::Install(format!("pip3 exited with {status}")))
        }
    }
}
