use std::{io, path::PathBuf};

use crate::{image_utils::DEFAULT_MAX_SIDE, session::DEFAULT_THRESHOLD};

#[derive(serde::Deserialize, Debug, PartialEq)]
#[serde(default)]
pub struct Config {
    pub image_dir: Option<PathBuf>,
    /// Longest side of the edited image, larger images are scaled down on load
    pub max_side: u32,
    pub threshold: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            image_dir: None,
            max_side: DEFAULT_MAX_SIDE,
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl Config {
    /// Reads `path`. A missing file gives the defaults.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, crate::app::Error> {
        match std::fs::File::open(path.into()) {
            Ok(f) => Ok(serde_json::from_reader(io::BufReader::new(f))?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Config::default()),
            Err(e) => Err(e.into()),
        }
    }
}
