use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum Error {
    EngineNotFound(String),
    Install(String),
    MissingInput { path: PathBuf, searched: PathBuf },
    OutputMissing(PathBuf),
    Render { code: Option<i32>, stderr: String },
    Io(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::EngineNotFound(engine) => write!(f, "rendering engine not found: {engine}"),
            Error::Install(reason) => write!(f, "install failed: {reason}"),
            Error::MissingInput { path, searched } => write!(
                f,
                "{} not found (looked in {})",
                path.display(),
                searched.display()
            ),
            Error::OutputMissing(path) => write!(f, "no PDF was written to {}", path.display()),
            Error::Render { code, stderr } => {
                match code {
                    Some(code) => write!(f, "rendering engine exited with status {code}")?,
                    None => write!(f, "rendering engine was terminated by a signal")?,
                }
                let stderr = stderr.trim();
                if !stderr.is_empty() {
                    write!(f, ": {stderr}")?;
                }
                Ok(())
            }
            Error::Io(e) => write!(f, "IO error: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}
