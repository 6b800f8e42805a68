use std::{
    io::{self, ErrorKind},
    path::{Path, PathBuf},
};

use futures::{future::BoxFuture, FutureExt};
use log::info;

use super::{file_stem_for, ItemInfo, PendingImage, Storage, WardrobeEntry, WardrobeItem};
use crate::image_utils::load_image;

const PENDING_FILE: &str = "pending.json";
const WARDROBE_FILE: &str = "wardrobe.json";
const WARDROBE_DIR: &str = "wardrobe";

#[derive(serde::Deserialize, serde::Serialize)]
struct StoredPending {
    #[serde(flatten)]
    info: ItemInfo,
    // Relative to the storage base
    image: PathBuf,
}

/// Layout below `base`:
/// - `pending.json`: `{name, category, image}` of the item to edit
/// - `wardrobe.json`: list of `{name, category, image}`
/// - `wardrobe/*.png`: exported cutouts
pub struct FileStorage {
    base: PathBuf,
    max_side: u32,
}

impl FileStorage {
    pub fn new(base: impl Into<PathBuf>, max_side: u32) -> Self {
        Self {
            base: base.into(),
            max_side,
        }
    }

    fn read_wardrobe(base: &Path) -> io::Result<Vec<WardrobeEntry>> {
        match std::fs::File::open(base.join(WARDROBE_FILE)) {
            Ok(f) => serde_json::from_reader(io::BufReader::new(f))
                .map_err(|e| io::Error::new(ErrorKind::InvalidData, e)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e),
        }
    }

    fn store_item_blocking(base: &Path, item: WardrobeItem) -> io::Result<()> {
        let mut wardrobe = Self::read_wardrobe(base)?;

        std::fs::create_dir_all(base.join(WARDROBE_DIR))?;
        let relative = format!(
            "{WARDROBE_DIR}/{}-{}.png",
            file_stem_for(&item.info.name),
            wardrobe.len()
        );
        let path = base.join(&relative);
        info!("Store at: {path:?}");
        std::fs::write(&path, &item.png)?;

        wardrobe.push(WardrobeEntry {
            info: item.info,
            image: relative,
        });
        let f = std::fs::File::create(base.join(WARDROBE_FILE))?;
        serde_json::to_writer_pretty(f, &wardrobe).map_err(io::Error::other)?;

        match std::fs::remove_file(base.join(PENDING_FILE)) {
            Ok(_) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}

impl Storage for FileStorage {
    fn load_pending(&self) -> BoxFuture<'static, io::Result<PendingImage>> {
        let base = self.base.clone();
        let max_side = self.max_side;
        async move {
            let pending_path = base.join(PENDING_FILE);
            let f = std::fs::File::open(&pending_path).map_err(|e| {
                io::Error::new(e.kind(), format!("No item to edit at {pending_path:?}: {e}"))
            })?;
            let pending: StoredPending = serde_json::from_reader(io::BufReader::new(f))
                .map_err(|e| io::Error::new(ErrorKind::InvalidData, e))?;

            let bytes = std::fs::read(base.join(&pending.image))?;
            let image = load_image(&bytes, max_side)?;
            Ok(PendingImage {
                info: pending.info,
                image,
            })
        }
        .boxed()
    }

    fn store_item(&self, item: WardrobeItem) -> BoxFuture<'static, io::Result<()>> {
        let base = self.base.clone();
        async move { Self::store_item_blocking(&base, item) }.boxed()
    }

    fn list_items(&self) -> BoxFuture<'static, io::Result<Vec<WardrobeEntry>>> {
        let (tx, rx) = futures::channel::oneshot::channel();
        let base = self.base.clone();

        std::thread::spawn(move || {
            tx.send(Self::read_wardrobe(&base))
        });
        async move { rx.await.map_err(io::Error::other).and_then(|a| a) }.boxed()
    }
}
