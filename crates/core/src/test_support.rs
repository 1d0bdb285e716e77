use std::fs;
use std::path::Path;

const TAG_DATETIME: u16 = 0x0132;
const TYPE_ASCII: u16 = 2;

/// Smallest JPEG kamadak-exif accepts: SOI, an APP1 Exif segment whose
/// little-endian TIFF block holds a single IFD0 `DateTime` entry, then EOI.
pub(crate) fn jpeg_with_datetime(stamp: &str) -> Vec<u8> {
    let mut value = stamp.as_bytes().to_vec();
    value.push(0);
    assert!(value.len() > 4, "value must live outside the IFD entry");

    let value_offset: u32 = 8 + 2 + 12 + 4;
    let mut tiff = Vec::new();
    tiff.extend_from_slice(b"II");
    tiff.extend_from_slice(&42u16.to_le_bytes());
    tiff.extend_from_slice(&8u32.to_le_bytes());
    tiff.extend_from_slice(&1u16.to_le_bytes());
    tiff.extend_from_slice(&TAG_DATETIME.to_le_bytes());
    tiff.extend_from_slice(&TYPE_ASCII.to_le_bytes());
    tiff.extend_from_slice(&(value.len() as u32).to_le_bytes());
    tiff.extend_from_slice(&value_offset.to_le_bytes());
    tiff.extend_from_slice(&0u32.to_le_bytes());
    tiff.extend_from_slice(&value);

    let segment_len = (2 + 6 + tiff.len()) as u16;
    let mut jpeg = vec![0xFF, 0xD8, 0xFF, 0xE1];
    jpeg.extend_from_slice(&segment_len.to_be_bytes());
    jpeg.extend_from_slice(b"Exif\0\0");
    jpeg.extend_from_slice(&tiff);
    jpeg.extend_from_slice(&[0xFF, 0xD9]);
    jpeg
}

pub(crate) fn write_jpeg_with_datetime(path: &Path, stamp: &str) {
    fs::write(path, jpeg_with_datetime(stamp)).expect("write jpeg fixture");
}

pub(crate) fn write_jpeg_without_exif(path: &Path) {
    fs::write(path, [0xFF, 0xD8, 0xFF, 0xD9]).expect("write jpeg fixture");
}
