//! Process-wide codec capability registry.
//!
//! Maps each [`ImageFormat`] to its decode/encode functions. The table is
//! built once on first use and never changes afterwards, so concurrent
//! pipeline invocations can share it without locking. Adding a format means
//! adding a row to [`build_registry`].

use once_cell::sync::Lazy;

use crate::decode::{self, DecodeError, DecodeOptions, RawImage};
use crate::encode::{self, EncodeError, EncodeOptions};
use crate::format::ImageFormat;

/// Decode bytes of one specific format.
pub type DecodeFn = fn(&[u8], &DecodeOptions) -> Result<RawImage, DecodeError>;

/// Encode a RawImage into one specific format.
pub type EncodeFn = fn(&RawImage, &EncodeOptions) -> Result<Vec<u8>, EncodeError>;

/// The capabilities registered for one format.
#[derive(Clone, Copy)]
pub struct CodecEntry {
    pub format: ImageFormat,
    pub decode: Option<DecodeFn>,
    pub encode: Option<EncodeFn>,
}

impl std::fmt::Debug for CodecEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CodecEntry")
            .field("format", &self.format)
            .field("decode", &self.decode.is_some())
            .field("encode", &self.encode.is_some())
            .finish()
    }
}

/// Read-only table of codec capabilities, one entry per format.
#[derive(Debug)]
pub struct CodecRegistry {
    entries: Vec<CodecEntry>,
}

static REGISTRY: Lazy<CodecRegistry> = Lazy::new(build_registry);

/// The shared registry, initialised on first call.
pub fn registry() -> &'static CodecRegistry {
    &REGISTRY
}

fn build_registry() -> CodecRegistry {
    #[cfg(feature = "avif-decode")]
    let avif_decode = Some(decode::decode_avif as DecodeFn);
    #[cfg(not(feature = "avif-decode"))]
    let avif_decode = None;

    CodecRegistry {
        entries: vec![
            CodecEntry {
                format: ImageFormat::Png,
                decode: Some(decode::decode_png as DecodeFn),
                encode: Some(png_entry as EncodeFn),
            },
            CodecEntry {
                format: ImageFormat::Jpeg,
                decode: Some(decode::decode_jpeg as DecodeFn),
                encode: Some(jpeg_entry as EncodeFn),
            },
            CodecEntry {
                format: ImageFormat::Webp,
                decode: Some(decode::decode_webp as DecodeFn),
                encode: Some(webp_entry as EncodeFn),
            },
            CodecEntry {
                format: ImageFormat::Avif,
                decode: avif_decode,
                encode: Some(avif_entry as EncodeFn),
            },
        ],
    }
}

fn png_entry(image: &RawImage, options: &EncodeOptions) -> Result<Vec<u8>, EncodeError> {
    encode::encode_png(image, &options.png)
}

fn jpeg_entry(image: &RawImage, options: &EncodeOptions) -> Result<Vec<u8>, EncodeError> {
    encode::encode_jpeg(image, &options.jpeg)
}

fn webp_entry(image: &RawImage, options: &EncodeOptions) -> Result<Vec<u8>, EncodeError> {
    encode::encode_webp(image, &options.webp)
}

fn avif_entry(image: &RawImage, options: &EncodeOptions) -> Result<Vec<u8>, EncodeError> {
    encode::encode_avif(image, &options.avif)
}

impl CodecRegistry {
    pub fn entry(&self, format: ImageFormat) -> Option<&CodecEntry> {
        self.entries.iter().find(|entry| entry.format == format)
    }

    /// Decode `bytes` with the decoder registered for `format`.
    pub fn decode(
        &self,
        format: ImageFormat,
        bytes: &[u8],
        options: &DecodeOptions,
    ) -> Result<RawImage, DecodeError> {
        let decode = self
            .entry(format)
            .and_then(|entry| entry.decode)
            .ok_or(DecodeError::UnsupportedFormat(format))?;
        decode(bytes, options)
    }

    /// Encode `image` with the encoder registered for `format`.
    pub fn encode(
        &self,
        format: ImageFormat,
        image: &RawImage,
        options: &EncodeOptions,
    ) -> Result<Vec<u8>, EncodeError> {
        let encode = self
            .entry(format)
            .and_then(|entry| entry.encode)
            .ok_or(EncodeError::UnsupportedFormat(format))?;
        encode(image, options)
    }

    pub fn supports_decode(&self, format: ImageFormat) -> bool {
        self.entry(format).is_some_and(|entry| entry.decode.is_some())
    }

    pub fn supports_encode(&self, format: ImageFormat) -> bool {
        self.entry(format).is_some_and(|entry| entry.encode.is_some())
    }

    /// Formats an upload may be declared as in this build.
    pub fn decodable_formats(&self) -> impl Iterator<Item = ImageFormat> + '_ {
        self.entries
            .iter()
            .filter(|entry| entry.decode.is_some())
            .map(|entry| entry.format)
    }

    /// Formats candidates can be produced in.
    pub fn encodable_formats(&self) -> impl Iterator<Item = ImageFormat> + '_ {
        self.entries
            .iter()
            .filter(|entry| entry.encode.is_some())
            .map(|entry| entry.format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::samples;

    #[test]
    fn test_every_format_has_one_entry() {
        for format in ImageFormat::ALL {
            let count = registry()
                .entries
                .iter()
                .filter(|entry| entry.format == format)
                .count();
            assert_eq!(count, 1, "{} registered {} times", format, count);
        }
    }

    #[test]
    fn test_every_format_encodes() {
        let encodable: Vec<_> = registry().encodable_formats().collect();
        assert_eq!(encodable.len(), ImageFormat::ALL.len());
    }

    #[test]
    fn test_baseline_decoders_registered() {
        assert!(registry().supports_decode(ImageFormat::Png));
        assert!(registry().supports_decode(ImageFormat::Jpeg));
        assert!(registry().supports_decode(ImageFormat::Webp));
        assert_eq!(
            registry().supports_decode(ImageFormat::Avif),
            cfg!(feature = "avif-decode")
        );
    }

    #[cfg(not(feature = "avif-decode"))]
    #[test]
    fn test_missing_decoder_reports_format() {
        let result = registry().decode(ImageFormat::Avif, &[], &DecodeOptions::default());
        assert!(matches!(
            result,
            Err(DecodeError::UnsupportedFormat(ImageFormat::Avif))
        ));
    }

    #[test]
    fn test_registry_is_shared() {
        assert!(std::ptr::eq(registry(), registry()));
    }

    #[test]
    fn test_decode_dispatches_by_format() {
        let img = registry()
            .decode(ImageFormat::Png, &samples::png(5, 3), &DecodeOptions::default())
            .unwrap();
        assert_eq!((img.width(), img.height()), (5, 3));
    }

    #[test]
    fn test_registry_from_many_threads() {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                std::thread::spawn(|| {
                    registry()
                        .decode(ImageFormat::Png, &samples::png(4, 4), &DecodeOptions::default())
                        .map(|img| img.byte_len())
                        .unwrap()
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), 4 * 4 * 4);
        }
    }
}
