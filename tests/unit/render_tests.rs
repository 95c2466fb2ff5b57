// End-to-end render unit tests

use std::io::Cursor;

use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use image_labeler::config::{configure, LabelConfig, LabelOptions};
use image_labeler::error::{ErrorKind, LabelError};
use image_labeler::label::{render, Color, Labeler, OutputFormat, OutputSink, Position};

const GRAY: Rgba<u8> = Rgba([100, 100, 100, 255]);

fn gray_png(width: u32, height: u32) -> Vec<u8> {
    let mut buffer = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, GRAY))
        .write_to(&mut buffer, ImageFormat::Png)
        .unwrap();
    buffer.into_inner()
}

fn decode(bytes: &[u8]) -> RgbaImage {
    image::load_from_memory(bytes).unwrap().to_rgba8()
}

#[test]
fn test_unsupported_format_fails_before_decode() {
    // the source is not even an image; the format must be rejected first
    let options = LabelOptions {
        format: Some("bmp".to_string()),
        file_content: Some("bm90IGFuIGltYWdl".to_string()),
        ..Default::default()
    };
    let err = configure(&options).unwrap_err();
    assert!(matches!(err, LabelError::UnsupportedFormat { .. }));
}

#[test]
fn test_thickness_zero_draws_no_box() {
    let config = LabelConfig::builder()
        .text("abc")
        .position_xy(10, 10)
        .box_border_color(Color::new(255, 0, 0))
        .box_background_color(Color::new(0, 0, 255))
        .file_content(gray_png(60, 40))
        .build()
        .unwrap();

    let image = decode(render(&config).unwrap().bytes());
    assert!(!image.pixels().any(|p| *p == Rgba([255, 0, 0, 255])));
    assert!(!image.pixels().any(|p| *p == Rgba([0, 0, 255, 255])));
}

#[test]
fn test_box_follows_explicit_placement() {
    let config = LabelConfig::builder()
        .text("abc")
        .position(Position::BottomRight)
        .position_xy(10, 20)
        .box_border_thickness(1)
        .box_padding(2)
        .box_border_color(Color::new(255, 0, 0))
        .box_background_color(Color::new(0, 0, 255))
        .file_content(gray_png(80, 60))
        .build()
        .unwrap();

    let result = render(&config).unwrap();
    let image = decode(result.bytes());

    // box spans [8, 18]..=[33, 35] for a 21x13 label at (10, 20)
    assert_eq!(*image.get_pixel(8, 18), Rgba([255, 0, 0, 255]));
    assert_eq!(*image.get_pixel(33, 35), Rgba([255, 0, 0, 255]));
    assert_eq!(*image.get_pixel(7, 18), GRAY);
    assert_eq!(*image.get_pixel(34, 35), GRAY);
    assert_eq!(*image.get_pixel(8, 36), GRAY);
}

#[test]
fn test_label_near_bottom_right() {
    let config = LabelConfig::builder()
        .text("Hi")
        .font_color(Color::new(0, 0, 0))
        .background_color(Color::new(255, 255, 0))
        .file_content(gray_png(100, 50))
        .build()
        .unwrap();

    let result = render(&config).unwrap();
    // 14x13 label at (100 - 14 - 5, 50 - 13 - 5)
    assert_eq!((result.geometry().anchor.x, result.geometry().anchor.y), (81, 32));

    let image = decode(result.bytes());
    for (x, y, pixel) in image.enumerate_pixels() {
        let inside = (80..=96).contains(&x) && (31..=46).contains(&y);
        if !inside {
            assert_eq!(*pixel, GRAY, "({}, {})", x, y);
        }
    }
}

#[test]
fn test_file_source_and_file_sink() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.png");
    let output = dir.path().join("out.jpg");
    std::fs::write(&input, gray_png(50, 50)).unwrap();

    let config = LabelConfig::builder()
        .text("file")
        .format(OutputFormat::Jpeg)
        .quality(90)
        .file_path(&input)
        .build()
        .unwrap();

    let result = Labeler::new(config)
        .with_sink(OutputSink::File(output.clone()))
        .render()
        .unwrap();

    assert_eq!(result.path(), Some(output.as_path()));
    let written = std::fs::read(&output).unwrap();
    assert_eq!(written, result.bytes());
    assert_eq!(image::guess_format(&written).unwrap(), ImageFormat::Jpeg);
}

#[test]
fn test_missing_input_file() {
    let config = LabelConfig::builder()
        .text("x")
        .file_path("/nonexistent/image-labeler/in.png")
        .build()
        .unwrap();

    let err = render(&config).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Config);
}

#[test]
fn test_sink_failure_is_output_error() {
    let config = LabelConfig::builder()
        .text("x")
        .file_content(gray_png(20, 20))
        .build()
        .unwrap();

    let err = Labeler::new(config)
        .with_sink(OutputSink::File("/nonexistent/image-labeler/out.png".into()))
        .render()
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Output);
}

#[test]
fn test_http_response_for_render() {
    let config = LabelConfig::builder()
        .text("x")
        .format(OutputFormat::Gif)
        .file_content(gray_png(20, 20))
        .build()
        .unwrap();

    let response = render(&config).unwrap().to_http_response();
    assert_eq!(response.headers()[http::header::CONTENT_TYPE], "image/gif");
    assert_eq!(image::guess_format(response.body()).unwrap(), ImageFormat::Gif);
}

#[test]
fn test_concurrent_renders_share_nothing() {
    let config = LabelConfig::builder()
        .text("thread")
        .file_content(gray_png(120, 40))
        .build()
        .unwrap();

    let results: Vec<Vec<u8>> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| render(&config).unwrap().bytes().to_vec()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert!(results.windows(2).all(|w| w[0] == w[1]));
}

#[test]
fn test_box_near_coordinate_limits_renders() {
    let huge_padding = LabelConfig::builder()
        .text("abc")
        .box_border_thickness(1)
        .box_padding(i32::MAX)
        .file_content(gray_png(40, 30))
        .build()
        .unwrap();
    assert!(render(&huge_padding).is_ok());

    let far_anchor = LabelConfig::builder()
        .text("abc")
        .position_xy(i32::MAX - 3, 0)
        .box_border_thickness(4_000_000_000)
        .box_padding(2)
        .file_content(gray_png(40, 30))
        .build()
        .unwrap();
    assert!(render(&far_anchor).is_ok());
}
