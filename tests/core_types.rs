use radonhash::{Digest, ImageView, OwnedImage, RadonHashError};

#[test]
fn image_view_rejects_invalid_dimensions() {
    let data = [0u8; 4];

    let err = ImageView::from_slice(&data, 0, 1).err().unwrap();
    assert_eq!(
        err,
        RadonHashError::InvalidDimensions {
            width: 0,
            height: 1,
        }
    );

    let err = ImageView::from_slice(&data, 1, 0).err().unwrap();
    assert_eq!(
        err,
        RadonHashError::InvalidDimensions {
            width: 1,
            height: 0,
        }
    );
}

#[test]
fn image_view_rejects_invalid_stride() {
    let data = [0u8; 8];

    let err = ImageView::new(&data, 4, 1, 3).err().unwrap();
    assert_eq!(
        err,
        RadonHashError::InvalidStride {
            width: 4,
            stride: 3,
        }
    );
}

#[test]
fn image_view_rejects_small_buffer() {
    let data = [0u8; 3];

    let err = ImageView::new(&data, 2, 2, 2).err().unwrap();
    assert_eq!(err, RadonHashError::BufferTooSmall { needed: 4, got: 3 });
}

#[test]
fn padded_rows_are_skipped() {
    // 3x2 image stored with stride 4; the padding byte is 99.
    let data = [1u8, 2, 3, 99, 4, 5, 6, 99];
    let view = ImageView::new(&data, 3, 2, 4).unwrap();
    assert_eq!(view.row(1).unwrap(), &[4u8, 5, 6]);
    assert_eq!(view.get(2, 1), Some(6));
    assert_eq!(view.get(3, 1), None);

    let owned = OwnedImage::from_view(view).unwrap();
    assert_eq!(owned.data(), &[1u8, 2, 3, 4, 5, 6]);
    assert_eq!((owned.width(), owned.height()), (3, 2));
}

#[test]
fn roi_shares_the_parent_buffer() {
    let data: Vec<u8> = (0u8..16).collect();
    let view = ImageView::from_slice(&data, 4, 4).unwrap();

    let roi = view.roi(1, 1, 2, 2).unwrap();
    assert_eq!(roi.stride(), 4);
    assert_eq!(roi.row(0).unwrap(), &[5u8, 6u8]);
    assert_eq!(roi.row(1).unwrap(), &[9u8, 10u8]);
    assert!(roi.get(2, 0).is_none());

    let err = view.roi(3, 3, 2, 2).err().unwrap();
    assert_eq!(
        err,
        RadonHashError::InvalidDimensions {
            width: 2,
            height: 2,
        }
    );
}

#[test]
fn owned_image_requires_exact_length() {
    let err = OwnedImage::new(vec![0u8; 5], 2, 3).err().unwrap();
    assert_eq!(err, RadonHashError::BufferTooSmall { needed: 6, got: 5 });

    let err = OwnedImage::new(vec![0u8; 7], 2, 3).err().unwrap();
    assert_eq!(
        err,
        RadonHashError::InvalidDimensions {
            width: 2,
            height: 3,
        }
    );

    let filled = OwnedImage::filled(3, 3, 42).unwrap();
    assert!(filled.data().iter().all(|&v| v == 42));
}

#[test]
fn blur_smooths_edges_in_place() {
    let (w, h) = (12, 4);
    let data: Vec<u8> = (0..w * h)
        .map(|i| if i % w < w / 2 { 0 } else { 240 })
        .collect();
    let mut img = OwnedImage::new(data, w, h).unwrap();
    img.blur(1.0);

    let row = img.view().row(2).unwrap().to_vec();
    assert_eq!(row[0], 0);
    assert_eq!(row[w - 1], 240);
    assert!(row[w / 2 - 1] > 0 && row[w / 2 - 1] < 120);
    assert!(row[w / 2] > 120 && row[w / 2] < 240);
    for pair in row.windows(2) {
        assert!(pair[0] <= pair[1]);
    }
}

#[test]
fn digest_accessors_report_contents() {
    let digest = Digest::from_coeffs(vec![0, 128, 255]).unwrap().with_id("a.png");
    assert_eq!(digest.len(), 3);
    assert!(!digest.is_empty());
    assert!(!digest.is_flat());
    assert_eq!(digest.coeffs(), &[0u8, 128, 255]);
    assert_eq!(digest.id(), Some("a.png"));
}
