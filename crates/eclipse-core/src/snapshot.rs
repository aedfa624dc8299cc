use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::Result;
use crate::frame::Frame;
use crate::io::image_io::save_image;
use crate::timestamp::Timestamp;

/// Image format for saved snapshots.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnapshotFormat {
    #[default]
    Png,
    Jpeg,
    Tiff,
}

impl SnapshotFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::Tiff => "tiff",
        }
    }
}

impl fmt::Display for SnapshotFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Png => write!(f, "PNG"),
            Self::Jpeg => write!(f, "JPEG"),
            Self::Tiff => write!(f, "TIFF"),
        }
    }
}

/// `<event name, spaces as underscores>_<HH-MM-SS>.<ext>`
pub fn snapshot_file_name(event_name: &str, timestamp: &Timestamp, extension: &str) -> String {
    format!(
        "{}_{}.{}",
        event_name.replace(' ', "_"),
        timestamp.file_safe(),
        extension
    )
}

/// Handle to a captured snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SnapshotRef(PathBuf);

impl SnapshotRef {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    pub fn path(&self) -> &Path {
        &self.0
    }

    pub fn file_name(&self) -> Option<&str> {
        self.0.file_name().and_then(|n| n.to_str())
    }
}

/// Persists the frame behind each detected transition.
pub trait SnapshotSink {
    fn capture(&mut self, frame: &Frame, file_name: &str) -> Result<SnapshotRef>;

    /// Drop a snapshot captured earlier in a run that did not complete.
    fn discard(&mut self, snapshot: &SnapshotRef) -> Result<()>;

    fn extension(&self) -> &str;
}

/// Writes snapshots as image files into a directory.
pub struct DirectorySink {
    directory: PathBuf,
    format: SnapshotFormat,
}

impl DirectorySink {
    /// Creates the directory if needed.
    pub fn create(directory: impl Into<PathBuf>, format: SnapshotFormat) -> Result<Self> {
        let directory = directory.into();
        std::fs::create_dir_all(&directory)?;
        Ok(Self { directory, format })
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }
}

impl SnapshotSink for DirectorySink {
    fn capture(&mut self, frame: &Frame, file_name: &str) -> Result<SnapshotRef> {
        let path = self.directory.join(file_name);
        save_image(frame, &path)?;
        debug!(path = %path.display(), "Snapshot saved");
        Ok(SnapshotRef::new(path))
    }

    fn discard(&mut self, snapshot: &SnapshotRef) -> Result<()> {
        match std::fs::remove_file(snapshot.path()) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(path = %snapshot.path().display(), "Snapshot already removed");
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    fn extension(&self) -> &str {
        self.format.extension()
    }
}
