//! QR symbol codec for opaque byte payloads.
//!
//! Payloads are always written as a single byte-mode segment so that
//! arbitrary signature bytes come back out of the decoder unchanged.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use image::{DynamicImage, GrayImage, Luma};
use qrcode::bits::Bits;
use qrcode::render::unicode;
use qrcode::{EcLevel, QrCode, Version};
use tracing::debug;

use crate::error::{Error, Result};

/// QR error correction level, `M` unless asked otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorCorrection {
    Low,
    #[default]
    Medium,
    Quartile,
    High,
}

impl ErrorCorrection {
    fn level(self) -> EcLevel {
        match self {
            ErrorCorrection::Low => EcLevel::L,
            ErrorCorrection::Medium => EcLevel::M,
            ErrorCorrection::Quartile => EcLevel::Q,
            ErrorCorrection::High => EcLevel::H,
        }
    }
}

impl fmt::Display for ErrorCorrection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCorrection::Low => "L",
            ErrorCorrection::Medium => "M",
            ErrorCorrection::Quartile => "Q",
            ErrorCorrection::High => "H",
        };
        f.write_str(s)
    }
}

impl FromStr for ErrorCorrection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "L" | "LOW" => Ok(ErrorCorrection::Low),
            "M" | "MEDIUM" => Ok(ErrorCorrection::Medium),
            "Q" | "QUARTILE" => Ok(ErrorCorrection::Quartile),
            "H" | "HIGH" => Ok(ErrorCorrection::High),
            _ => Err(Error::Symbol(format!("unknown error correction level: {}", s))),
        }
    }
}

/// Encode a payload into the smallest QR version that holds it as byte data.
///
/// # Errors
///
/// Returns [`Error::Symbol`] if the payload does not fit in a version 40 symbol.
pub fn encode(payload: &[u8], correction: ErrorCorrection) -> Result<QrCode> {
    let level = correction.level();
    for v in 1..=40i16 {
        let mut bits = Bits::new(Version::Normal(v));
        if bits.push_byte_data(payload).is_err() {
            continue;
        }
        if bits.push_terminator(level).is_ok() {
            debug!(version = v, len = payload.len(), %correction, "encoded QR symbol");
            return Ok(QrCode::with_bits(bits, level)?);
        }
    }
    Err(Error::Symbol(format!(
        "payload of {} bytes does not fit in a QR symbol at level {}",
        payload.len(),
        correction
    )))
}

/// Rasterize a symbol, quiet zone included.
pub fn render_image(code: &QrCode) -> GrayImage {
    code.render::<Luma<u8>>().build()
}

/// Plain ASCII rendering, two columns per module to keep it roughly square.
pub fn render_text(code: &QrCode) -> String {
    code.render::<char>()
        .module_dimensions(2, 1)
        .dark_color('#')
        .light_color(' ')
        .build()
}

/// Compact rendering for a terminal, light modules on a dark background.
pub fn render_terminal(code: &QrCode) -> String {
    code.render::<unicode::Dense1x2>()
        .dark_color(unicode::Dense1x2::Light)
        .light_color(unicode::Dense1x2::Dark)
        .build()
}

/// Write a symbol to `path`: ASCII text for `.txt`, otherwise an image in
/// whatever format the extension names.
pub fn write_symbol(code: &QrCode, path: &Path) -> Result<()> {
    if path.extension().is_some_and(|ext| ext == "txt") {
        let mut text = render_text(code);
        text.push('\n');
        std::fs::write(path, text)?;
    } else {
        render_image(code).save(path)?;
    }
    debug!(path = %path.display(), "wrote QR symbol");
    Ok(())
}

/// Decode the raw bytes of the first readable QR symbol in an image.
///
/// # Errors
///
/// Returns [`Error::NoSymbolFound`] if no grid is detected or none decodes.
pub fn decode_image(image: &DynamicImage) -> Result<Vec<u8>> {
    let gray = image.to_luma8();
    let mut prepared = rqrr::PreparedImage::prepare_from_greyscale(
        gray.width() as usize,
        gray.height() as usize,
        |x, y| gray.get_pixel(x as u32, y as u32).0[0],
    );

    let grids = prepared.detect_grids();
    debug!(count = grids.len(), "detected QR grids");
    for grid in grids {
        let mut payload = Vec::new();
        match grid.decode_to(&mut payload) {
            Ok(_) => {
                debug!(len = payload.len(), "decoded QR grid");
                return Ok(payload);
            }
            Err(e) => debug!(error = ?e, "QR grid failed to decode"),
        }
    }
    Err(Error::NoSymbolFound)
}

/// Open an image file and decode the payload of its QR symbol.
pub fn read_symbol(path: &Path) -> Result<Vec<u8>> {
    let image = image::open(path)?;
    decode_image(&image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn binary_payload() -> Vec<u8> {
        let mut payload = b"hello".to_vec();
        payload.extend((0..128u32).map(|i| (i * 37 % 256) as u8));
        payload
    }

    #[test]
    fn test_image_round_trip_keeps_binary_bytes() {
        let payload = binary_payload();
        let code = encode(&payload, ErrorCorrection::Medium).unwrap();
        let image = DynamicImage::ImageLuma8(render_image(&code));
        assert_eq!(decode_image(&image).unwrap(), payload);
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("symbol.png");
        let payload = binary_payload();

        let code = encode(&payload, ErrorCorrection::High).unwrap();
        write_symbol(&code, &path).unwrap();
        assert_eq!(read_symbol(&path).unwrap(), payload);
    }

    #[test]
    fn test_txt_output_is_ascii_art() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("symbol.txt");
        let code = encode(b"hello", ErrorCorrection::Medium).unwrap();
        write_symbol(&code, &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains('#'));
        assert!(text.chars().all(|c| c == '#' || c == ' ' || c == '\n'));
        assert!(text.lines().count() >= 21);
    }

    #[test]
    fn test_terminal_rendering_not_empty() {
        let code = encode(b"hello", ErrorCorrection::Low).unwrap();
        assert!(!render_terminal(&code).is_empty());
    }

    #[test]
    fn test_blank_image_has_no_symbol() {
        let blank = DynamicImage::ImageLuma8(GrayImage::from_pixel(200, 200, Luma([255u8])));
        assert!(matches!(decode_image(&blank), Err(Error::NoSymbolFound)));
    }

    #[test]
    fn test_oversized_payload_rejected() {
        let payload = vec![0x5a; 4000];
        assert!(matches!(
            encode(&payload, ErrorCorrection::Medium),
            Err(Error::Symbol(_))
        ));
    }

    #[test]
    fn test_error_correction_parse() {
        assert_eq!("m".parse::<ErrorCorrection>().unwrap(), ErrorCorrection::Medium);
        assert_eq!("High".parse::<ErrorCorrection>().unwrap(), ErrorCorrection::High);
        assert!("X".parse::<ErrorCorrection>().is_err());
        assert_eq!(ErrorCorrection::default().to_string(), "M");
    }
}
