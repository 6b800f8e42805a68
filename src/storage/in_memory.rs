use futures::{future::BoxFuture, FutureExt};
use std::{
    io,
    sync::{Arc, Mutex, MutexGuard},
};

use super::{file_stem_for, PendingImage, Storage, WardrobeEntry, WardrobeItem};

#[derive(Default, Clone)]
pub struct InMemoryStorage {
    pending: Arc<Mutex<Option<PendingImage>>>,
    items: Arc<Mutex<Vec<(WardrobeEntry, Vec<u8>)>>>,
}

impl InMemoryStorage {
    pub fn new(pending: PendingImage) -> Self {
        Self {
            pending: Arc::new(Mutex::new(Some(pending))),
            items: Default::default(),
        }
    }

    /// Encoded image stored for the wardrobe entry at `idx`.
    pub fn png(&self, idx: usize) -> Option<Vec<u8>> {
        lock(&self.items).ok()?.get(idx).map(|(_, png)| png.clone())
    }
}

fn lock<T>(m: &Mutex<T>) -> io::Result<MutexGuard<'_, T>> {
    m.lock()
        .map_err(|_| io::Error::other("In-memory storage poisoned"))
}

impl Storage for InMemoryStorage {
    fn load_pending(&self) -> BoxFuture<'static, io::Result<PendingImage>> {
        let pending = self.pending.clone();
        async move {
            lock(&pending)?.clone().ok_or_else(|| {
                io::Error::new(io::ErrorKind::NotFound, "No item to edit")
            })
        }
        .boxed()
    }

    fn store_item(&self, item: WardrobeItem) -> BoxFuture<'static, io::Result<()>> {
        let pending = self.pending.clone();
        let items = self.items.clone();
        async move {
            let mut items = lock(&items)?;
            let image = format!("{}-{}.png", file_stem_for(&item.info.name), items.len());
            items.push((
                WardrobeEntry {
                    info: item.info,
                    image,
                },
                item.png,
            ));
            lock(&pending)?.take();
            Ok(())
        }
        .boxed()
    }

    fn list_items(&self) -> BoxFuture<'static, io::Result<Vec<WardrobeEntry>>> {
        let items = self.items.clone();
        async move { Ok(lock(&items)?.iter().map(|(e, _)| e.clone()).collect()) }.boxed()
    }
}
