use pixel_eraser::{
    edit_pending,
    storage::{in_memory::InMemoryStorage, ItemInfo, PendingImage, Storage, WardrobeItem},
    ColorSample, Gesture, PixelBuffer,
};

fn pending() -> PendingImage {
    let mut image = PixelBuffer::from_raw(3, 3, [250, 250, 250, 255].repeat(9)).unwrap();
    image.set(1, 1, ColorSample::new(0, 0, 200, 255));
    PendingImage {
        info: ItemInfo {
            name: "Blue Cap".into(),
            category: "accessories".into(),
        },
        image,
    }
}

#[test]
fn export_stores_png_in_wardrobe() {
    let storage = InMemoryStorage::new(pending());
    let gestures = vec![Gesture::Click { x: 0.0, y: 0.0 }, Gesture::Export];
    let session = edit_pending(&storage, 20.0, gestures).unwrap();
    assert_eq!(session.buffer().unwrap().transparent_count(), 8);

    let items = futures::executor::block_on(storage.list_items()).unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].info.name, "Blue Cap");
    assert_eq!(items[0].image, "blue_cap-0.png");

    let png = storage.png(0).unwrap();
    let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
    assert_eq!(decoded.get_pixel(0, 0).0, [250, 250, 250, 0]);
    assert_eq!(decoded.get_pixel(1, 1).0, [0, 0, 200, 255]);

    // Pending item is consumed by the export
    assert!(futures::executor::block_on(storage.load_pending()).is_err());
}

#[test]
fn gestures_after_export_are_not_applied() {
    let storage = InMemoryStorage::new(pending());
    let gestures = vec![Gesture::Export, Gesture::Click { x: 0.0, y: 0.0 }];
    let session = edit_pending(&storage, 20.0, gestures).unwrap();
    assert_eq!(session.buffer().unwrap().transparent_count(), 0);
}

#[test]
fn without_export_nothing_is_stored() {
    let storage = InMemoryStorage::new(pending());
    edit_pending(&storage, 20.0, vec![Gesture::Click { x: 0.0, y: 0.0 }]).unwrap();
    assert!(futures::executor::block_on(storage.list_items())
        .unwrap()
        .is_empty());
    assert!(futures::executor::block_on(storage.load_pending()).is_ok());
}

#[test]
fn wardrobe_lists_items_in_store_order() {
    let storage = InMemoryStorage::new(pending());
    for (name, category) in [("Red Shirt", "tops"), ("Boots", "shoes")] {
        let item = WardrobeItem {
            info: ItemInfo {
                name: name.into(),
                category: category.into(),
            },
            png: vec![1, 2, 3],
        };
        futures::executor::block_on(storage.store_item(item)).unwrap();
    }

    let items = futures::executor::block_on(storage.list_items()).unwrap();
    let categories = items
        .iter()
        .map(|i| i.info.category.as_str())
        .collect::<Vec<_>>();
    assert_eq!(categories, vec!["tops", "shoes"]);
}
