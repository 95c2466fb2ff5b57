// Encoder unit tests

use image::{Rgba, RgbaImage};
use image_labeler::label::encoder::EncoderFactory;
use image_labeler::label::{encode_image, png_compression_level, EncoderSettings, OutputFormat};
use rstest::rstest;

fn sample_image() -> RgbaImage {
    RgbaImage::from_fn(64, 48, |x, y| Rgba([(x * 4) as u8, (y * 5) as u8, 128, 255]))
}

#[rstest]
#[case(100, 0)]
#[case(75, 2)]
#[case(50, 5)]
#[case(25, 7)]
#[case(1, 9)]
fn test_png_compression_levels(#[case] quality: u8, #[case] level: u8) {
    assert_eq!(png_compression_level(quality), level);
}

#[test]
fn test_png_compression_level_is_monotonic() {
    let levels: Vec<u8> = (1..=100).map(png_compression_level).collect();
    assert!(levels.windows(2).all(|w| w[0] >= w[1]));
    assert!(levels.iter().all(|l| *l <= 9));
}

#[rstest]
#[case(OutputFormat::Png, EncoderSettings::CompressionLevel(2))]
#[case(OutputFormat::Jpeg, EncoderSettings::Quality(75))]
#[case(OutputFormat::Gif, EncoderSettings::None)]
fn test_settings_per_format(#[case] format: OutputFormat, #[case] expected: EncoderSettings) {
    assert_eq!(EncoderSettings::for_format(format, 75), expected);
}

#[rstest]
#[case(OutputFormat::Png, image::ImageFormat::Png, "image/png")]
#[case(OutputFormat::Gif, image::ImageFormat::Gif, "image/gif")]
#[case(OutputFormat::Jpeg, image::ImageFormat::Jpeg, "image/jpeg")]
fn test_encoded_output_is_readable(
    #[case] format: OutputFormat,
    #[case] detected: image::ImageFormat,
    #[case] content_type: &str,
) {
    let encoded = encode_image(&sample_image(), format, 80).unwrap();
    assert_eq!(encoded.format, format);
    assert_eq!(encoded.content_type, content_type);
    assert_eq!(image::guess_format(&encoded.data).unwrap(), detected);

    let decoded = image::load_from_memory(&encoded.data).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (64, 48));
}

#[test]
fn test_jpeg_quality_changes_size() {
    let image = sample_image();
    let low = encode_image(&image, OutputFormat::Jpeg, 10).unwrap();
    let high = encode_image(&image, OutputFormat::Jpeg, 95).unwrap();
    assert!(low.data.len() < high.data.len());
}

#[test]
fn test_gif_ignores_quality() {
    let image = sample_image();
    let a = encode_image(&image, OutputFormat::Gif, 1).unwrap();
    let b = encode_image(&image, OutputFormat::Gif, 100).unwrap();
    assert_eq!(a.data, b.data);
}

#[test]
fn test_factory_returns_matching_encoder() {
    for format in [OutputFormat::Png, OutputFormat::Gif, OutputFormat::Jpeg] {
        assert_eq!(EncoderFactory::create(format).format(), format);
    }
}
