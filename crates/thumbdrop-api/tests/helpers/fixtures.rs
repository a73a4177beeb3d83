//! Real image and archive bytes for upload tests.

use axum_test::multipart::{MultipartForm, Part};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use std::io::{Cursor, Write};
use zip::write::{FileOptions, ZipWriter};

fn encode(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    let mut buffer = Vec::new();
    DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut buffer), format)
        .expect("Failed to encode test image");
    buffer
}

pub fn create_test_jpeg(width: u32, height: u32) -> Vec<u8> {
    encode(width, height, ImageFormat::Jpeg)
}

pub fn create_test_png(width: u32, height: u32) -> Vec<u8> {
    encode(width, height, ImageFormat::Png)
}

/// Zip archive with the given entries, in order. Names ending in `/` become directories.
pub fn create_test_zip(entries: &[(&str, Vec<u8>)]) -> Vec<u8> {
    let mut buffer = Vec::new();
    {
        let mut zip = ZipWriter::new(Cursor::new(&mut buffer));
        for (name, data) in entries {
            if name.ends_with('/') {
                zip.add_directory(*name, FileOptions::default())
                    .expect("Failed to add directory");
            } else {
                zip.start_file(*name, FileOptions::default())
                    .expect("Failed to start zip entry");
                zip.write_all(data).expect("Failed to write zip entry");
            }
        }
        zip.finish().expect("Failed to finalize zip");
    }
    buffer
}

/// Multipart body with a single file part.
pub fn file_form(field: &str, file_name: &str, mime_type: &str, data: Vec<u8>) -> MultipartForm {
    let part = Part::bytes(bytes::Bytes::from(data))
        .file_name(file_name)
        .mime_type(mime_type);
    MultipartForm::new().add_part(field, part)
}
