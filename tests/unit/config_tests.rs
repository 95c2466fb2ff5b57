// Configuration unit tests

use image_labeler::config::*;
use image_labeler::error::{ErrorKind, LabelError};
use image_labeler::label::{Color, OutputFormat, Placement, Position, SourceImage};
use rstest::rstest;
use serde_json::json;

#[test]
fn test_configure_from_yaml_document() {
    let yaml = r##"
text: "Copyright"
position: bottom-left
fontSize: 4
fontColor: "#FFCC00"
backgroundColor: "101010"
format: jpeg
filePath: /srv/images/in.png
targetFileQuality: 60
labelOffsetX: 8
labelOffsetY: 9
boxPadding: 3
boxBorderThickness: 2
boxBorderColor: "000000"
boxBackgroundColor: "ffffff"
"##;
    let options = LabelOptions::from_yaml_with_env(yaml).unwrap();
    let config = configure(&options).unwrap();

    assert_eq!(config.text, "Copyright");
    assert_eq!(config.placement, Placement::anchored(Position::BottomLeft, 8, 9));
    assert_eq!(config.font_size.get(), 4);
    assert_eq!(config.font_color, Color::new(0xff, 0xcc, 0x00));
    assert_eq!(config.background_color, Color::new(0x10, 0x10, 0x10));
    assert_eq!(config.format, OutputFormat::Jpeg);
    assert_eq!(config.quality, 60);
    assert_eq!(config.box_style.padding, 3);
    assert_eq!(config.box_style.border_thickness, 2);
    assert_eq!(config.box_style.border_color, Color::black());
}

#[test]
fn test_configure_from_json_value() {
    let options = LabelOptions::from_json_value(json!({
        "text": "json",
        "positionX": 12,
        "positionY": -3,
        "position": "center",
        "fileContent": "iVBORw0K",
        "someFutureOption": true,
    }))
    .unwrap();

    let config = configure(&options).unwrap();
    assert_eq!(config.placement, Placement::explicit(12, -3));
    assert!(matches!(config.source, SourceImage::Bytes(_)));
}

#[rstest]
#[case("png", OutputFormat::Png)]
#[case("PNG", OutputFormat::Png)]
#[case("gif", OutputFormat::Gif)]
#[case("jpg", OutputFormat::Jpeg)]
#[case("Jpeg", OutputFormat::Jpeg)]
fn test_format_names(#[case] name: &str, #[case] expected: OutputFormat) {
    let options = LabelOptions {
        format: Some(name.to_string()),
        file_path: Some("in.png".into()),
        ..Default::default()
    };
    assert_eq!(configure(&options).unwrap().format, expected);
}

#[rstest]
#[case("bmp")]
#[case("webp")]
#[case("")]
fn test_unsupported_format_is_config_error(#[case] name: &str) {
    let options = LabelOptions {
        format: Some(name.to_string()),
        file_path: Some("in.png".into()),
        ..Default::default()
    };
    let err = configure(&options).unwrap_err();
    assert!(matches!(err, LabelError::UnsupportedFormat { .. }));
    assert_eq!(err.kind(), ErrorKind::Config);
    assert_eq!(err.to_http_status(), 415);
}

#[rstest]
#[case(json!(0), Position::BottomRight)]
#[case(json!(1), Position::BottomLeft)]
#[case(json!(2), Position::BottomCenter)]
#[case(json!(3), Position::TopRight)]
#[case(json!(4), Position::TopLeft)]
#[case(json!(5), Position::TopCenter)]
#[case(json!(6), Position::Center)]
#[case(json!("top_right"), Position::TopRight)]
#[case(json!("TopCenter"), Position::TopCenter)]
fn test_position_values(#[case] value: serde_json::Value, #[case] expected: Position) {
    let options = LabelOptions::from_json_value(json!({ "position": value, "filePath": "in.png" })).unwrap();
    let config = configure(&options).unwrap();
    assert_eq!(config.placement, Placement::anchored(expected, 5, 5));
}

#[rstest]
#[case(json!(7))]
#[case(json!(-1))]
#[case(json!("middle"))]
fn test_invalid_position_rejected(#[case] value: serde_json::Value) {
    let options = LabelOptions::from_json_value(json!({ "position": value, "filePath": "in.png" })).unwrap();
    let err = configure(&options).unwrap_err();
    assert!(matches!(err, LabelError::InvalidPosition { .. }));
}

#[test]
fn test_colors_parse_case_insensitively() {
    let lower = LabelOptions {
        font_color: Some("abcdef".to_string()),
        file_path: Some("in.png".into()),
        ..Default::default()
    };
    let upper = LabelOptions {
        font_color: Some("ABCDEF".to_string()),
        ..lower.clone()
    };
    assert_eq!(
        configure(&lower).unwrap().font_color,
        configure(&upper).unwrap().font_color
    );
}

#[test]
fn test_missing_source_is_config_error() {
    let options = LabelOptions {
        text: Some("x".to_string()),
        file_path: Some("".into()),
        file_content: Some("".to_string()),
        ..Default::default()
    };
    let err = configure(&options).unwrap_err();
    assert!(matches!(err, LabelError::SourceImage(_)));
}

#[test]
fn test_config_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<LabelConfig>();
    assert_send_sync::<LabelError>();
    assert_send_sync::<image_labeler::label::RenderResult>();
}
