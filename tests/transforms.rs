//! Negation, orientation normalization and comparison through the public API.

mod common;

use common::*;
use zenbmp::*;

#[test]
fn opposite_row_orders_compare_same() {
    let f = |x: u32, y: u32| ((x * 7 + y * 13) % 256) as u8;
    let mut bottom_up = indexed_from_fn(6, 5, Orientation::BottomUp, gray_palette(), f);
    let mut top_down = indexed_from_fn(6, 5, Orientation::TopDown, gray_palette(), f);
    assert_ne!(bottom_up.buffer(), top_down.buffer());

    let result = compare(&mut bottom_up, &mut top_down).unwrap();
    assert_eq!(result, Comparison::Same);
    assert!(result.is_same());
    // Both sides end up normalized.
    assert_eq!(bottom_up.orientation(), Orientation::TopDown);
    assert_eq!(top_down.orientation(), Orientation::TopDown);
}

#[test]
fn opposite_row_orders_compare_same_after_file_roundtrip() {
    let mut a = decode(&encode(&true_color_from_fn(5, 4, Orientation::BottomUp, checker)).unwrap())
        .unwrap();
    let mut b = decode(&encode(&true_color_from_fn(5, 4, Orientation::TopDown, checker)).unwrap())
        .unwrap();
    assert!(compare(&mut a, &mut b).unwrap().is_same());
}

#[test]
fn single_differing_pixel_is_reported_at_visual_coordinates() {
    let mut a = true_color_from_fn(5, 9, Orientation::BottomUp, checker);
    let mut b = a.clone();
    b.pixel_mut(3, 7).unwrap()[1] ^= 0xFF;

    let result = compare(&mut a, &mut b).unwrap();
    let Comparison::Different(d) = result else {
        panic!("expected a difference");
    };
    assert!(!d.palette_mismatch);
    assert!(!d.capped);
    assert_eq!(d.pixels, vec![PixelCoord { x: 3, y: 7 }]);
}

#[test]
fn padding_differences_are_ignored() {
    // Width 1, 24-bit: one pad byte per row.
    let mut a = true_color_from_fn(1, 2, Orientation::TopDown, checker);
    let mut b = a.clone();
    b.buffer_mut()[3] = 0x55;
    b.buffer_mut()[7] = 0x66;
    assert!(compare(&mut a, &mut b).unwrap().is_same());
}

#[test]
fn palette_mismatch_short_circuits() {
    let mut a = indexed_from_fn(4, 4, Orientation::BottomUp, gray_palette(), |x, _| x as u8);
    let mut other = gray_palette();
    other[200] = PaletteEntry::new(1, 2, 3);
    let mut b = indexed_from_fn(4, 4, Orientation::BottomUp, other, |_, y| y as u8);

    let Comparison::Different(d) = compare(&mut a, &mut b).unwrap() else {
        panic!("expected palette mismatch");
    };
    assert!(d.palette_mismatch);
    assert!(d.pixels.is_empty());
}

#[test]
fn reserved_byte_counts_in_palette_comparison() {
    let mut a = indexed_from_fn(2, 2, Orientation::TopDown, gray_palette(), |_, _| 0);
    let mut other = gray_palette();
    other[3].reserved = 9;
    let mut b = indexed_from_fn(2, 2, Orientation::TopDown, other, |_, _| 0);
    assert!(!compare(&mut a, &mut b).unwrap().is_same());
}

#[test]
fn palettes_of_different_length_differ() {
    let small = vec![PaletteEntry::new(0, 0, 0), PaletteEntry::new(9, 9, 9)];
    let mut a = indexed_from_fn(2, 2, Orientation::TopDown, small.clone(), |_, _| 1);
    let mut longer = small;
    longer.push(PaletteEntry::new(5, 5, 5));
    let mut b = indexed_from_fn(2, 2, Orientation::TopDown, longer, |_, _| 1);

    let Comparison::Different(d) = compare(&mut a, &mut b).unwrap() else {
        panic!("expected palette mismatch");
    };
    assert!(d.palette_mismatch);
}

#[test]
fn bit_depth_mismatch_is_an_error() {
    let mut a = true_color_from_fn(3, 3, Orientation::BottomUp, checker);
    let mut b = indexed_from_fn(3, 3, Orientation::BottomUp, gray_palette(), |_, _| 0);
    let err = compare(&mut a, &mut b).unwrap_err();
    assert!(matches!(
        err,
        BmpError::BitDepthMismatch {
            left: BitDepth::TrueColor24,
            right: BitDepth::Indexed8
        }
    ));
    assert_eq!(err.kind(), ErrorKind::DimensionMismatch);
    // Nothing was normalized.
    assert_eq!(a.orientation(), Orientation::BottomUp);
}

#[test]
fn dimension_mismatch_is_an_error() {
    let mut a = true_color_from_fn(3, 3, Orientation::BottomUp, checker);
    let mut b = true_color_from_fn(3, 4, Orientation::BottomUp, checker);
    let err = compare(&mut a, &mut b).unwrap_err();
    match err {
        BmpError::DimensionMismatch { left, right } => {
            assert_eq!(left, (3, 3));
            assert_eq!(right, (3, 4));
        }
        other => panic!("expected DimensionMismatch, got {other:?}"),
    }

    let mut c = true_color_from_fn(4, 3, Orientation::BottomUp, checker);
    let err = compare(&mut a, &mut c).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DimensionMismatch);
}

#[test]
fn many_differences_are_capped() {
    let mut a = true_color_from_fn(20, 10, Orientation::BottomUp, |_, _| [0, 0, 0]);
    let mut b = true_color_from_fn(20, 10, Orientation::BottomUp, |_, _| [1, 0, 0]);
    let Comparison::Different(d) = compare(&mut a, &mut b).unwrap() else {
        panic!("expected differences");
    };
    assert_eq!(d.pixels.len(), MAX_RECORDED_DIFFERENCES);
    assert!(d.capped);
    // Row-major from the visual top.
    assert_eq!(d.pixels[0], PixelCoord { x: 0, y: 0 });
    assert_eq!(d.pixels[21], PixelCoord { x: 1, y: 1 });
    assert_eq!(d.pixels[99], PixelCoord { x: 19, y: 4 });
}

#[test]
fn compare_is_symmetric() {
    let mut a = true_color_from_fn(7, 3, Orientation::TopDown, checker);
    let mut b = true_color_from_fn(7, 3, Orientation::BottomUp, |x, y| {
        if x == 2 && y == 1 { [0, 0, 0] } else { checker(x, y) }
    });
    let ab = compare(&mut a, &mut b).unwrap();
    let ba = compare(&mut b, &mut a).unwrap();
    assert_eq!(ab, ba);
    assert!(!ab.is_same());
}

#[test]
fn negate_indexed_changes_only_palette() {
    let img = indexed_from_fn(5, 3, Orientation::BottomUp, gray_palette(), |x, y| {
        (x + 10 * y) as u8
    });
    let mut negated = decode(&encode(&img).unwrap()).unwrap();
    negate(&mut negated);

    assert_eq!(negated.buffer(), img.buffer());
    let palette = negated.palette().unwrap();
    for (i, entry) in palette.iter().enumerate() {
        let v = 255 - i as u8;
        assert_eq!((entry.blue, entry.green, entry.red), (v, v, v));
        assert_eq!(entry.reserved, gray_palette()[i].reserved);
    }

    // And it survives another encode.
    let again = decode(&encode(&negated).unwrap()).unwrap();
    assert_eq!(again, negated);
}

#[test]
fn negate_twice_is_identity() {
    let original = true_color_from_fn(7, 5, Orientation::BottomUp, |x, y| {
        [(x * 31) as u8, (y * 17) as u8, 0x80]
    });
    let mut img = original.clone();
    img.negate();
    assert_ne!(img, original);
    img.negate();
    assert_eq!(img, original);
}

#[test]
fn negate_noise_inverts_every_visible_byte() {
    let width = 11u32;
    let height = 6u32;
    let stride = row_stride(width, BitDepth::TrueColor24).unwrap();
    let mut buf = noise_pattern(stride * height as usize, 0xC0FFEE);
    for row in buf.chunks_exact_mut(stride) {
        row[width as usize * 3..].fill(0);
    }
    let original = BmpImage::true_color(width, height, Orientation::TopDown, buf).unwrap();
    let mut img = original.clone();
    negate(&mut img);
    for y in 0..height {
        let before = original.visual_row(y).unwrap();
        let after = img.visual_row(y).unwrap();
        assert!(before.iter().zip(after).all(|(&b, &a)| a == 255 - b));
    }
    for row in img.buffer().chunks_exact(stride) {
        assert!(row[width as usize * 3..].iter().all(|&p| p == 0));
    }
}

#[test]
fn normalize_keeps_visual_content() {
    let mut img = true_color_from_fn(4, 5, Orientation::BottomUp, |x, y| [x as u8, y as u8, 1]);
    let before: Vec<Vec<u8>> = (0..5).map(|y| img.visual_row(y).unwrap().to_vec()).collect();
    normalize_to_top_down(&mut img);
    assert_eq!(img.orientation(), Orientation::TopDown);
    assert_eq!(img.signed_height(), -5);
    for y in 0..5 {
        assert_eq!(img.visual_row(y).unwrap(), &before[y as usize][..]);
    }
    // Stored row 0 is now the visual top.
    assert_eq!(&img.row(0).unwrap()[..3], &[0, 0, 1]);

    let snapshot = img.clone();
    img.normalize_to_top_down();
    assert_eq!(img, snapshot);
}

#[test]
fn set_orientation_back_to_bottom_up() {
    let original = indexed_from_fn(3, 3, Orientation::BottomUp, gray_palette(), |x, y| {
        (x + 3 * y) as u8
    });
    let mut img = original.clone();
    img.set_orientation(Orientation::TopDown);
    img.set_orientation(Orientation::BottomUp);
    assert_eq!(img, original);
}
