use galvokit_camtools::{BinaryRaster, CamToolError};
use image::{GrayImage, Luma};
use tempfile::TempDir;

#[test]
fn test_open_png_and_downsample() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("mask.png");

    // Left half white, right half black
    let img = GrayImage::from_fn(8, 4, |x, _| Luma([if x < 4 { 255 } else { 0 }]));
    img.save(&path).unwrap();

    let raster = BinaryRaster::open(&path, 128, false).unwrap();
    assert_eq!((raster.width(), raster.height()), (8, 4));
    assert_eq!(raster.foreground_count(), 16);

    let small = raster.downsample(2).unwrap();
    assert_eq!((small.width(), small.height()), (4, 2));
    assert!(small.get(1, 1));
    assert!(!small.get(2, 1));

    let inverted = BinaryRaster::open(&path, 128, true).unwrap();
    assert!(inverted.get(7, 0));
}

#[test]
fn test_open_missing_file() {
    let dir = TempDir::new().unwrap();
    let err = BinaryRaster::open(dir.path().join("missing.png"), 128, false).unwrap_err();
    assert!(matches!(err, CamToolError::LoadError { .. }));
    assert!(err.to_string().contains("missing.png"));
}
