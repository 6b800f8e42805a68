use std::{io, path::PathBuf};

use log::{info, warn};

use crate::{
    image_utils::encode_png,
    session::{EditSession, Gesture, GestureOutcome},
    storage::{Storage, WardrobeItem},
};

mod native;

pub use native::{run_native, Args};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid config: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Invalid gesture script {path:?}: {source}")]
    Script {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Loads the pending item, replays `gestures` and stores the result on the first export.
/// Gestures after the export are not applied, the session ends there.
pub fn edit_pending(
    storage: &dyn Storage,
    threshold: f32,
    gestures: impl IntoIterator<Item = Gesture>,
) -> Result<EditSession, Error> {
    let pending = futures::executor::block_on(storage.load_pending())?;
    info!(
        "Editing {:?} ({})",
        pending.info.name, pending.info.category
    );

    let mut session = EditSession::new(threshold);
    session.load(pending.image);

    for gesture in gestures {
        if session.handle(gesture) != GestureOutcome::ExportRequested {
            continue;
        }
        let Some(buffer) = session.export() else {
            continue;
        };
        let png = encode_png(buffer)?;
        futures::executor::block_on(storage.store_item(WardrobeItem {
            info: pending.info,
            png,
        }))?;
        info!("Saved to wardrobe");
        return Ok(session);
    }

    warn!("Gestures ended without export, nothing saved");
    Ok(session)
}
