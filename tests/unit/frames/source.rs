use std::io::Cursor;

use super::*;

fn encode_png(rgba: Vec<u8>, w: u32, h: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_raw(w, h, rgba).unwrap();
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_frame_dimensions_and_premul() {
    let buf = encode_png(vec![100, 50, 200, 128], 1, 1);
    let frame = decode_frame(&buf).unwrap();
    assert_eq!((frame.width, frame.height), (1, 1));
    assert_eq!(
        frame.rgba8_premul.as_slice(),
        &[
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128u8
        ]
    );
}

#[test]
fn decode_frame_rejects_garbage() {
    let err = decode_frame(b"not an image").unwrap_err();
    assert!(err.to_string().contains("asset error:"));
}

#[test]
fn path_for_uses_naming_and_rejects_traversal() {
    let src = FsFrameSource::new("/assets", FrameNaming::default());
    let p = src.path_for("camera-sequence", FrameNumber(57)).unwrap();
    assert_eq!(
        p,
        Path::new("/assets")
            .join("camera-sequence")
            .join("frame-057.jpg")
    );
    assert!(src.path_for("../etc", FrameNumber(1)).is_err());
}

#[test]
fn normalize_path_slash_normalization() {
    assert_eq!(normalize_rel_path("a/b").unwrap(), "a/b");
    assert_eq!(normalize_rel_path("a\\b").unwrap(), "a/b");
    assert_eq!(normalize_rel_path("./a//b/").unwrap(), "a/b");
    assert!(normalize_rel_path("../x").is_err());
    assert!(normalize_rel_path("/abs").is_err());
    assert!(normalize_rel_path(".").is_err());
}

#[test]
fn from_premul_checks_length() {
    assert!(FrameImage::from_premul(2, 2, vec![0; 15]).is_err());
    assert!(FrameImage::from_premul(0, 2, vec![]).is_err());
    let f = FrameImage::solid(2, 1, [1, 2, 3, 255]).unwrap();
    assert_eq!(f.pixel(1, 0), [1, 2, 3, 255]);
}
