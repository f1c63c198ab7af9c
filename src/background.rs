//! Desktop background integration.
//!
//! One [`BackgroundSetter`] per supported operating system, each delegating to
//! the platform's own tooling. [`for_current_os`] picks the right one at
//! startup.

use std::{
    fmt, io,
    path::{Path, PathBuf},
    process::Command,
};

#[derive(Debug)]
pub enum BackgroundError {
    Unsupported(String),
    IoError(io::Error),
    CommandFailed { program: String, status: String },
}

impl fmt::Display for BackgroundError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackgroundError::Unsupported(os) => {
                write!(f, "setting the background is not supported on {}", os)
            }
            BackgroundError::IoError(e) => write!(f, "cannot set background: {}", e),
            BackgroundError::CommandFailed { program, status } => {
                write!(f, "{} exited with {}", program, status)
            }
        }
    }
}

impl std::error::Error for BackgroundError {}

impl From<io::Error> for BackgroundError {
    fn from(err: io::Error) -> Self {
        BackgroundError::IoError(err)
    }
}

pub trait BackgroundSetter {
    fn set_background(&self, image: &Path) -> Result<(), BackgroundError>;
}

pub struct WindowsBackground;
pub struct MacBackground;
pub struct GnomeBackground;

impl BackgroundSetter for WindowsBackground {
    fn set_background(&self, image: &Path) -> Result<(), BackgroundError> {
        let image = absolute(image)?;
        // SPI_SETDESKWALLPAPER = 20, SPIF_UPDATEINIFILE | SPIF_SENDCHANGE = 3
        let script = format!(
            "Add-Type -TypeDefinition 'using System.Runtime.InteropServices; \
             public class Wallpaper {{ [DllImport(\"user32.dll\", CharSet = CharSet.Unicode)] \
             public static extern int SystemParametersInfo(int a, int b, string c, int d); }}'; \
             Set-ItemProperty -Path 'HKCU:\\Control Panel\\Desktop' -Name WallPaper -Value '{path}'; \
             [Wallpaper]::SystemParametersInfo(20, 0, '{path}', 3)",
            path = image.display()
        );
        run("powershell", &["-NoProfile", "-Command", &script])
    }
}

impl BackgroundSetter for MacBackground {
    fn set_background(&self, image: &Path) -> Result<(), BackgroundError> {
        let image = absolute(image)?;
        let script = format!(
            "tell application \"System Events\" to tell every desktop to set picture to \"{}\"",
            image.display()
        );
        run("osascript", &["-e", &script])
    }
}

impl BackgroundSetter for GnomeBackground {
    fn set_background(&self, image: &Path) -> Result<(), BackgroundError> {
        let uri = format!("file://{}", absolute(image)?.display());
        run(
            "gsettings",
            &["set", "org.gnome.desktop.background", "picture-uri", &uri],
        )?;
        run(
            "gsettings",
            &["set", "org.gnome.desktop.background", "picture-uri-dark", &uri],
        )
    }
}

/// The setter for the operating system this binary was built for.
pub fn for_current_os() -> Result<Box<dyn BackgroundSetter>, BackgroundError> {
    match std::env::consts::OS {
        "windows" => Ok(Box::new(WindowsBackground)),
        "macos" => Ok(Box::new(MacBackground)),
        "linux" => Ok(Box::new(GnomeBackground)),
        other => Err(BackgroundError::Unsupported(other.to_string())),
    }
}

fn absolute(image: &Path) -> Result<PathBuf, BackgroundError> {
    Ok(std::path::absolute(image)?)
}

fn run(program: &str, args: &[&str]) -> Result<(), BackgroundError> {
    let status = Command::new(program).args(args).status()?;
    if status.success() {
        Ok(())
    } else {
        Err(BackgroundError::CommandFailed {
            program: program.to_string(),
            status: status.to_string(),
        })
    }
}
