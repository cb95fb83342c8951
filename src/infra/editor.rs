//! Round trip of notes through the user's text editor.

use crate::domain::Note;
use crate::infra::document::{FormatError, decode_document, encode_document};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;

/// Errors from an editing session.
#[derive(Debug, Error)]
pub enum EditError {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("editor command is empty")]
    EmptyCommand,

    #[error("failed to launch editor '{editor}': {source}")]
    Launch {
        editor: String,
        #[source]
        source: std::io::Error,
    },

    #[error("editor '{editor}' exited with non-zero status")]
    EditorFailed { editor: String },

    #[error("failed to prepare document: {0}")]
    Encode(#[source] FormatError),

    /// The edited document did not parse. The file is left in place.
    #[error("{source}\nyour edits are kept in {}", path.display())]
    Format {
        path: PathBuf,
        #[source]
        source: FormatError,
    },
}

/// Opens a file for the user to edit, returning once they are done.
pub trait EditorLauncher {
    fn open(&self, path: &Path) -> Result<(), EditError>;
}

/// Launches an external editor command such as `vim` or `code --wait`.
#[derive(Debug, Clone)]
pub struct CommandEditor {
    command: String,
}

impl CommandEditor {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    pub fn command(&self) -> &str {
        &self.command
    }
}

impl EditorLauncher for CommandEditor {
    fn open(&self, path: &Path) -> Result<(), EditError> {
        // The command may carry arguments, e.g. "code --wait"
        let mut parts = self.command.split_whitespace();
        let Some(program) = parts.next() else {
            return Err(EditError::EmptyCommand);
        };

        log::debug!("launching editor '{}' on {}", self.command, path.display());
        let status = Command::new(program)
            .args(parts)
            .arg(path)
            .status()
            .map_err(|source| EditError::Launch {
                editor: self.command.clone(),
                source,
            })?;

        if !status.success() {
            return Err(EditError::EditorFailed {
                editor: self.command.clone(),
            });
        }
        Ok(())
    }
}

/// Writes `notes` to a temporary document, lets the user edit it and
/// parses the result.
///
/// The temporary file is removed afterwards unless the edited text fails
/// to parse, in which case it is kept and its path returned in
/// [`EditError::Format`] so no edits are lost.
pub fn edit_notes<E: EditorLauncher + ?Sized>(
    notes: &[Note],
    editor: &E,
) -> Result<Vec<Note>, EditError> {
    let text = encode_document(notes).map_err(EditError::Encode)?;

    let tmp_dir = std::env::temp_dir();
    let io_err = |path: &Path| {
        let path = path.to_path_buf();
        move |source| EditError::Io { path, source }
    };

    let mut file = tempfile::Builder::new()
        .prefix("keep-")
        .suffix(".yaml")
        .tempfile()
        .map_err(io_err(&tmp_dir))?;
    file.write_all(text.as_bytes())
        .and_then(|()| file.flush())
        .map_err(io_err(file.path()))?;

    // Close our handle; some editors replace the file rather than write it
    let temp_path = file.into_temp_path();
    editor.open(&temp_path)?;

    let edited = fs::read_to_string(&temp_path).map_err(io_err(&temp_path))?;
    match decode_document(&edited) {
        Ok(notes) => Ok(notes),
        Err(source) => {
            let path = temp_path
                .keep()
                .map_err(|e| EditError::Io {
                    path: e.path.to_path_buf(),
                    source: e.error,
                })?;
            log::warn!("edited document did not parse; kept {}", path.display());
            Err(EditError::Format { path, source })
        }
    }
}
