//! Opens flower pictures in an external image viewer.

use crate::error::{AppError, Result};
use std::path::Path;
use std::process::Command;
use std::thread;
use tracing::{debug, error, info, warn};

/// Something that can put an image on screen.
pub trait ImageViewer {
    /// Displays the image at `path`.
    fn show(&mut self, path: &Path) -> Result<()>;
}

/// Launches a desktop program to display images.
///
/// The program is started in the background; the menu does not wait for the
/// viewer window to close.
#[derive(Debug, Clone, Default)]
pub struct SystemImageViewer {
    /// Custom viewer command, split on whitespace. The image path is appended
    /// as the final argument. `None` uses the platform's default opener.
    command: Option<String>,
}

impl SystemImageViewer {
    pub fn new(command: Option<String>) -> Self {
        Self { command }
    }

    fn build_command(&self, path: &Path) -> Command {
        let mut command = match self.command.as_deref().map(str::split_whitespace) {
            Some(mut parts) => match parts.next() {
                Some(program) => {
                    let mut command = Command::new(program);
                    command.args(parts);
                    command
                },
                None => Self::platform_opener(),
            },
            None => Self::platform_opener(),
        };
        command.arg(path);
        command
    }

    fn platform_opener() -> Command {
        if cfg!(target_os = "windows") {
            let mut command = Command::new("cmd");
            command.args(["/C", "start", ""]);
            command
        } else if cfg!(target_os = "macos") {
            Command::new("open")
        } else {
            Command::new("xdg-open")
        }
    }
}

impl ImageViewer for SystemImageViewer {
    /// # Errors
    ///
    /// Returns `AppError::ImageNotFound` if `path` is not an existing file and
    /// `AppError::Viewer` if the viewer program cannot be started.
    fn show(&mut self, path: &Path) -> Result<()> {
        if !path.is_file() {
            error!("Flower image missing: {}", path.display());
            return Err(AppError::ImageNotFound(path.to_path_buf()));
        }

        let mut command = self.build_command(path);
        debug!("Launching image viewer: {:?}", command);

        let mut child = command.spawn().map_err(|e| {
            error!("Failed to launch image viewer: {}", e);
            AppError::Viewer(format!(
                "failed to launch {:?}: {}",
                command.get_program(),
                e
            ))
        })?;

        // Reap the opener in the background so it does not linger as a zombie.
        thread::spawn(move || {
            if let Err(e) = child.wait() {
                warn!("Failed to wait for image viewer: {}", e);
            }
        });

        info!("Opened {} in image viewer", path.display());
        Ok(())
    }
}
