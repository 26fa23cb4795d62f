//! Tests for numbered PNG export

#[cfg(test)]
mod tests {
    use glyphcompose::io::image::{
        Exporter, encode_png, output_name, pixels_per_meter, sequence_number,
    };
    use image::{Rgba, RgbaImage};
    use std::fs;
    use std::io::Cursor;
    use std::path::Path;

    // Tests DPI conversion for the pHYs chunk
    #[test]
    fn test_pixels_per_meter() {
        assert_eq!(pixels_per_meter(300), 11_811);
        assert_eq!(pixels_per_meter(72), 2_835);
        assert_eq!(pixels_per_meter(0), 0);
    }

    // Tests output names and parsing them back
    // Verified by formatting without zero padding
    #[test]
    fn test_output_names() {
        assert_eq!(output_name(7), "composition_007.png");
        assert_eq!(output_name(1234), "composition_1234.png");

        assert_eq!(sequence_number("composition_007.png"), Some(7));
        assert_eq!(sequence_number("composition_1234.png"), Some(1234));
        assert_eq!(sequence_number("composition_abc.png"), None);
        assert_eq!(sequence_number("poster_001.png"), None);
    }

    // Tests that encoded files keep transparency and carry the resolution
    #[test]
    fn test_encode_png() {
        let mut image = RgbaImage::new(3, 2);
        image.put_pixel(1, 1, Rgba([10, 20, 30, 40]));

        let bytes = encode_png(&image, 300, Path::new("memory.png")).expect("encodes");
        let decoded = image::load_from_memory(&bytes).expect("decodes").into_rgba8();
        assert_eq!(decoded, image);

        let reader = png::Decoder::new(Cursor::new(bytes)).read_info().expect("valid header");
        let dims = reader.info().pixel_dims.as_ref().expect("pHYs chunk present");
        assert_eq!((dims.xppu, dims.yppu), (11_811, 11_811));
        assert!(matches!(dims.unit, png::Unit::Meter));
    }

    // Tests that numbering continues after existing outputs
    // Verified by always starting the sequence at one
    #[test]
    fn test_exporter_continues_sequence() {
        let dir = tempfile::tempdir().expect("temp dir");
        fs::write(dir.path().join("composition_009.png"), b"old").expect("seed file");
        fs::write(dir.path().join("notes.txt"), b"ignored").expect("seed file");

        let mut exporter = Exporter::new(dir.path(), 300).expect("exporter");
        assert_eq!(exporter.next_index(), 10);

        let image = RgbaImage::from_pixel(4, 4, Rgba([255, 0, 0, 255]));
        let path = exporter.export(&image).expect("export");
        assert_eq!(path, dir.path().join("composition_010.png"));
        assert!(path.exists());
        assert_eq!(exporter.next_path(), dir.path().join("composition_011.png"));
    }

    // Tests that a missing output directory is created and numbered from one
    #[test]
    fn test_exporter_creates_directory() {
        let dir = tempfile::tempdir().expect("temp dir");
        let nested = dir.path().join("a").join("b");

        let mut exporter = Exporter::new(&nested, 72).expect("exporter");
        assert_eq!(exporter.next_index(), 1);
        let path = exporter.export(&RgbaImage::new(2, 2)).expect("export");
        assert_eq!(path.file_name().and_then(|n| n.to_str()), Some("composition_001.png"));
    }
}
