use crate::error::KernelError;
use crate::resample::{amplify, downsample, normalize, upsample};
use crate::types::image::{ImageGrid, PixelBuffer, Raw};

fn cycling_buffer(width: usize, height: usize) -> PixelBuffer {
    // Every byte of pixel p is p % 10, so each 10-pixel run averages 4.5.
    let data = (0..width * height * 4).map(|i| ((i / 4) % 10) as u8).collect();
    PixelBuffer::new(width, height, data).unwrap()
}

#[test]
fn test_downsample_reference_fixture() {
    let buf = cycling_buffer(280, 280);
    let grid = downsample(&buf, 28, 28).unwrap();

    assert_eq!(grid.width(), 28);
    assert_eq!(grid.height(), 28);
    for y in 0..28 {
        for x in 0..28 {
            assert_eq!(grid.get(y, x), 4.0, "cell ({}, {})", x, y);
        }
    }
}

#[test]
fn test_downsample_uniform_blocks() {
    // 6x4 source, 3x2 target: 2x2 blocks, block (bx, by) holds 10*by + bx.
    let (w, h) = (6, 4);
    let luma: Vec<u8> = (0..w * h)
        .map(|i| {
            let (x, y) = (i % w, i / w);
            (10 * (y / 2) + x / 2) as u8
        })
        .collect();
    let buf = PixelBuffer::from_luma(w, h, &luma).unwrap();
    let grid = downsample(&buf, 3, 2).unwrap();

    assert_eq!(grid.to_rows(), vec![vec![0.0, 1.0, 2.0], vec![10.0, 11.0, 12.0]]);
}

#[test]
fn test_downsample_floors_mean() {
    // Block of [1, 2, 2, 2] averages 1.75.
    let buf = PixelBuffer::from_luma(2, 2, &[1, 2, 2, 2]).unwrap();
    let grid = downsample(&buf, 1, 1).unwrap();
    assert_eq!(grid.as_slice(), &[1.0]);
}

#[test]
fn test_downsample_reads_red_channel_only() {
    let data = vec![200, 0, 0, 255, 100, 255, 255, 0];
    let buf = PixelBuffer::new(2, 1, data).unwrap();
    let grid = downsample(&buf, 1, 1).unwrap();
    assert_eq!(grid.as_slice(), &[150.0]);
}

#[test]
fn test_downsample_rejects_bad_targets() {
    let buf = cycling_buffer(280, 280);
    assert!(matches!(downsample(&buf, 27, 28), Err(KernelError::InvalidDimensions(_))));
    assert!(matches!(downsample(&buf, 28, 27), Err(KernelError::InvalidDimensions(_))));
    assert!(matches!(downsample(&buf, 560, 280), Err(KernelError::InvalidDimensions(_))));
    assert!(matches!(downsample(&buf, 0, 28), Err(KernelError::InvalidDimensions(_))));
}

#[test]
fn test_upsample_reference_fixture() {
    let rows: Vec<Vec<f32>> = (0..28)
        .map(|i| (0..28).map(|j| (28 * i + j) as f32).collect())
        .collect();
    let grid = ImageGrid::<Raw>::from_rows(rows).unwrap();
    let buf = upsample(&grid, 56, 56).unwrap();
    let d = buf.data();

    assert_eq!(buf.width(), 56);
    assert_eq!(buf.height(), 56);

    // First pixel
    assert_eq!(&d[0..4], &[0, 0, 0, 255]);

    // First row
    assert_eq!(d[4], 0);
    assert_eq!(d[2 * 4], 1);
    assert_eq!(d[3 * 4], 1);

    // Next row repeats the first
    assert_eq!(d[56 * 4], 0);
    assert_eq!(d[57 * 4], 0);
    assert_eq!(d[58 * 4], 1);
    assert_eq!(d[59 * 4], 1);
}

#[test]
fn test_upsample_replicates_blocks() {
    let grid = ImageGrid::<Raw>::from_rows(vec![vec![10.0, 20.0], vec![30.0, 40.0]]).unwrap();
    let k = 3;
    let buf = upsample(&grid, 2 * k, 2 * k).unwrap();

    for y in 0..2 * k {
        for x in 0..2 * k {
            let expected = grid.get(y / k, x / k) as u8;
            assert_eq!(buf.pixel(x, y), [expected, expected, expected, 255]);
        }
    }
}

#[test]
fn test_upsample_non_square_repeat() {
    let grid = ImageGrid::<Raw>::from_rows(vec![vec![7.0, 9.0]]).unwrap();
    let buf = upsample(&grid, 4, 3).unwrap();
    let reds: Vec<u8> = buf.data().chunks_exact(4).map(|p| p[0]).collect();
    assert_eq!(reds, vec![7, 7, 9, 9, 7, 7, 9, 9, 7, 7, 9, 9]);
}

#[test]
fn test_upsample_rejects_bad_targets() {
    let grid = ImageGrid::<Raw>::filled(28, 28, 1.0);
    assert!(matches!(upsample(&grid, 14, 28), Err(KernelError::InvalidDimensions(_))));
    assert!(matches!(upsample(&grid, 56, 50), Err(KernelError::InvalidDimensions(_))));

    let empty = ImageGrid::<Raw>::from_rows(vec![]).unwrap();
    assert!(matches!(upsample(&empty, 28, 28), Err(KernelError::EmptyInput)));
}

#[test]
fn test_normalize_amplify_inverse() {
    let cells: Vec<f32> = (0..256).map(|v| v as f32).collect();
    let grid = ImageGrid::<Raw>::from_cells(16, 16, cells.clone()).unwrap();

    let unit = normalize(&grid);
    assert!(unit.as_slice().iter().all(|v| (0.0..=1.0).contains(v)));

    let back = amplify(&unit);
    for (a, b) in back.as_slice().iter().zip(&cells) {
        assert!((a - b).abs() < 1e-3, "{} vs {}", a, b);
    }
}

#[test]
fn test_amplify_does_not_clamp() {
    let unit = ImageGrid::from_cells(2, 1, vec![1.5, -0.5]).unwrap();
    let raw = amplify(&unit);
    assert_eq!(raw.as_slice(), &[382.5, -127.5]);
}

#[test]
fn test_pixel_buffer_validates_length() {
    assert!(matches!(
        PixelBuffer::new(2, 2, vec![0; 15]),
        Err(KernelError::DimensionMismatch { expected: 16, found: 15 })
    ));
}
