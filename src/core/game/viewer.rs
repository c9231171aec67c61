//! Showing the round's image to the players.

use crate::core::corpus::ImageRecord;
use crate::error::ViewerError;
use std::process::{Command, Stdio};
use std::thread;
use tracing::debug;

/// Presents an image. Failures are reported but never stop a round.
pub trait ImageViewer {
    fn show(&mut self, record: &ImageRecord) -> Result<(), ViewerError>;
}

/// Launches an external program with the image path as last argument
#[derive(Debug, Clone)]
pub struct CommandViewer {
    program: String,
    args: Vec<String>,
}

impl CommandViewer {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Arguments placed before the image path
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// The desktop's "open this file" command
    pub fn system_default() -> Self {
        if cfg!(target_os = "macos") {
            Self::new("open")
        } else if cfg!(target_os = "windows") {
            Self::new("cmd").with_args(["/C", "start", ""])
        } else {
            Self::new("xdg-open")
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl ImageViewer for CommandViewer {
    fn show(&mut self, record: &ImageRecord) -> Result<(), ViewerError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .arg(record.path())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| ViewerError::Launch {
                program: self.program.clone(),
                path: record.path().to_path_buf(),
                source,
            })?;

        // The round goes on while the viewer runs; reap it in the background
        let program = self.program.clone();
        thread::spawn(move || {
            if let Err(e) = child.wait() {
                debug!(program = %program, error = %e, "viewer exit status lost");
            }
        });

        Ok(())
    }
}

/// Shows nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopViewer;

impl ImageViewer for NoopViewer {
    fn show(&mut self, _record: &ImageRecord) -> Result<(), ViewerError> {
        Ok(())
    }
}
