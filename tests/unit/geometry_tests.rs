// Label geometry unit tests

use image_labeler::label::{
    compute_geometry, measure_text, Anchor, BoxBounds, FontSize, ImageDimensions, Placement, Position,
};
use rstest::rstest;

fn image(width: u32, height: u32) -> ImageDimensions {
    ImageDimensions { width, height }
}

#[rstest]
#[case(1, 5, 8)]
#[case(2, 6, 13)]
#[case(3, 7, 13)]
#[case(4, 8, 16)]
#[case(5, 9, 15)]
fn test_glyph_metrics_table(#[case] size: u8, #[case] width: u32, #[case] height: u32) {
    let size = FontSize::new(size).unwrap();
    assert_eq!(measure_text("x", size), (width, height));
    assert_eq!(measure_text("xyz", size), (3 * width, height));
    assert_eq!(measure_text("", size), (0, height));
}

#[rstest]
#[case(Position::BottomRight, 160, 82)]
#[case(Position::BottomLeft, 5, 82)]
#[case(Position::BottomCenter, 83, 82)]
#[case(Position::TopRight, 160, 5)]
#[case(Position::TopLeft, 5, 5)]
#[case(Position::TopCenter, 83, 5)]
#[case(Position::Center, 83, 44)]
fn test_positions_on_200x100(#[case] position: Position, #[case] x: i32, #[case] y: i32) {
    // "Hello" at size 3 is 35x13
    let geometry = compute_geometry(
        "Hello",
        FontSize::default(),
        &Placement::anchored(position, 5, 5),
        &image(200, 100),
    );
    assert_eq!(geometry.anchor, Anchor::new(x, y));
    assert_eq!((geometry.width, geometry.height), (35, 13));
}

#[test]
fn test_explicit_placement_drives_box_bounds() {
    let geometry = compute_geometry(
        "abc",
        FontSize::default(),
        &Placement::explicit(10, 20),
        &image(100, 100),
    );
    assert_eq!(geometry.anchor, Anchor::new(10, 20));
    assert_eq!(
        geometry.box_bounds(2),
        BoxBounds {
            left: 8,
            top: 18,
            right: 33,
            bottom: 35,
        }
    );
}

#[test]
fn test_explicit_placement_never_shrinks() {
    let geometry = compute_geometry(
        "far too long for this image",
        FontSize::MAX,
        &Placement::explicit(-4, 300),
        &image(10, 10),
    );
    assert_eq!(geometry.font_size, FontSize::MAX);
    assert_eq!(geometry.anchor, Anchor::new(-4, 300));
}

#[rstest]
#[case(100, 5)]
#[case(41, 5)]
#[case(40, 4)]
#[case(36, 3)]
#[case(32, 2)]
#[case(28, 1)]
#[case(3, 1)]
fn test_auto_shrink_largest_fitting_size(#[case] width: u32, #[case] expected: u8) {
    // four characters: 20, 24, 28, 32, 36 px wide for sizes 1-5
    let geometry = compute_geometry(
        "abcd",
        FontSize::MAX,
        &Placement::anchored(Position::TopLeft, 5, 5),
        &image(width, 50),
    );
    assert_eq!(geometry.font_size.get(), expected);
}

#[test]
fn test_empty_text_is_zero_width() {
    let geometry = compute_geometry(
        "",
        FontSize::default(),
        &Placement::default(),
        &image(200, 100),
    );
    assert_eq!(geometry.width, 0);
    assert_eq!(geometry.anchor, Anchor::new(195, 82));
}
