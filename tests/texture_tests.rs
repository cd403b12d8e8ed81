use std::time::{Duration, Instant};

use image::{Rgba, RgbaImage};

use gallery_walk::texture::{
    decode_data_url, encode_png_data_url, TextureStore, WrapMode,
};

#[cfg(test)]
mod texture_tests {
    use super::*;

    fn poll_until_settled(store: &mut TextureStore, id: gallery_walk::texture::TextureId) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while store.is_pending(id) {
            assert!(Instant::now() < deadline, "loader never completed");
            store.poll();
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn test_file_load_is_placeholder_until_polled() {
        let path = std::env::temp_dir().join("gallery_walk_texture_test.png");
        let image = RgbaImage::from_pixel(8, 4, Rgba([10, 20, 30, 255]));
        image.save(&path).expect("write test fixture");

        let mut store = TextureStore::new();
        let id = store.load_file(path, WrapMode::Clamp, 1.0, 1.0);

        assert!(store.is_pending(id), "load returns before decoding finishes");
        assert_eq!(
            store.dimensions(id),
            None,
            "dimensions are unknown until the image is ready"
        );

        poll_until_settled(&mut store, id);

        assert!(store.is_ready(id));
        assert_eq!(store.dimensions(id), Some((8, 4)));
        assert_eq!(store.aspect_ratio(id), Some(2.0));
    }

    #[test]
    fn test_missing_file_settles_as_failed() {
        let mut store = TextureStore::new();
        let id = store.load_file(
            "definitely/does/not/exist.png".into(),
            WrapMode::Clamp,
            1.0,
            1.0,
        );

        poll_until_settled(&mut store, id);

        assert!(!store.is_ready(id), "missing file must not become ready");
        assert_eq!(store.dimensions(id), None);
    }

    #[test]
    fn test_data_url_resolves_synchronously() {
        let image = RgbaImage::from_fn(3, 5, |x, y| Rgba([x as u8, y as u8, 0, 255]));
        let url = encode_png_data_url(&image).expect("encode");

        let mut store = TextureStore::new();
        let id = store.load_url(&url, WrapMode::Repeat, 2.0, 3.0);

        assert!(store.is_ready(id), "no worker thread for inline pixels");
        assert_eq!(store.dimensions(id), Some((3, 5)));
        let entry = store.entry(id);
        assert!(entry.wrap.is_repeat());
        assert_eq!(entry.scale_s, 2.0);
        assert_eq!(entry.scale_t, 3.0);
    }

    #[test]
    fn test_data_url_round_trip_is_lossless() {
        let image = RgbaImage::from_fn(16, 9, |x, y| {
            Rgba([(x * 16) as u8, (y * 28) as u8, 200, 255])
        });

        let url = encode_png_data_url(&image).expect("encode");
        let decoded = decode_data_url(&url).expect("decode");

        assert_eq!(decoded.dimensions(), (16, 9));
        assert_eq!(decoded, image, "PNG round trip must preserve every pixel");
    }

    #[test]
    fn test_garbage_data_url_is_rejected() {
        assert!(decode_data_url("data:image/png;base64,@@@@").is_err());
        assert!(decode_data_url("data:image/png,plain-not-base64").is_err());
    }

    #[test]
    fn test_poll_reports_changed_ids() {
        let path = std::env::temp_dir().join("gallery_walk_texture_poll_test.png");
        RgbaImage::from_pixel(2, 2, Rgba([0, 0, 0, 255]))
            .save(&path)
            .expect("write test fixture");

        let mut store = TextureStore::new();
        let white = store.white();
        let id = store.load_file(path, WrapMode::Clamp, 1.0, 1.0);

        let deadline = Instant::now() + Duration::from_secs(5);
        let mut changed = Vec::new();
        while changed.is_empty() {
            assert!(Instant::now() < deadline, "loader never completed");
            changed = store.poll();
            std::thread::sleep(Duration::from_millis(5));
        }

        assert_eq!(changed, vec![id], "only the finished load is reported");
        assert!(store.is_ready(white), "eager entries never change state");
    }
}
