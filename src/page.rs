//! Texture page loading and 1-bit packing

use std::{
    fs,
    io::{BufReader, Cursor},
    path::Path,
};

use anyhow::Context;

use crate::error::{BmFontError, BmFontResult};

const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";
const JPEG_SIGNATURE: &[u8] = b"\xff\xd8";

/// 8-bit grayscale bitmap, one byte per pixel, row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrayImage {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl GrayImage {
    pub fn new(width: usize, height: usize, pixels: Vec<u8>) -> BmFontResult<Self> {
        if pixels.len() != width * height {
            anyhow::bail!(BmFontError::PageDataLength {
                expected: width * height,
                found: pixels.len(),
            });
        }

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub const fn width(&self) -> usize {
        self.width
    }

    pub const fn height(&self) -> usize {
        self.height
    }

    /// Packs the low bit of 8 horizontally adjacent pixels into each byte,
    /// most significant bit first. Rows must be byte aligned.
    pub fn pack(&self) -> BmFontResult<Vec<u8>> {
        if self.width % 8 != 0 {
            anyhow::bail!(BmFontError::PageWidthNotByteAligned { width: self.width });
        }

        Ok(self
            .pixels
            .chunks_exact(8)
            .map(|byte| byte.iter().fold(0u8, |acc, px| (acc << 1) | (px & 1)))
            .collect())
    }

    pub fn load(path: &Path) -> BmFontResult<Self> {
        let buffer =
            fs::read(path).with_context(|| format!("failed to load page `{}`", path.display()))?;

        let image = if buffer.starts_with(PNG_SIGNATURE) {
            Self::decode_png(&buffer)
        } else if buffer.starts_with(JPEG_SIGNATURE) {
            Self::decode_jpeg(&buffer)
        } else {
            Err(anyhow::anyhow!(BmFontError::UnsupportedPageImage {
                reason: "only PNG and JPEG pages are supported",
            }))
        };

        image.with_context(|| format!("failed to decode page `{}`", path.display()))
    }

    fn decode_png(buffer: &[u8]) -> BmFontResult<Self> {
        let mut decoder = png::Decoder::new(BufReader::new(Cursor::new(buffer)));
        decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);

        let mut reader = decoder.read_info()?;
        let mut data = vec![0; reader.output_buffer_size()];
        let info = reader.next_frame(&mut data)?;
        data.truncate(info.buffer_size());

        let pixels = match info.color_type {
            png::ColorType::Grayscale => data,
            png::ColorType::GrayscaleAlpha => data.chunks_exact(2).map(|px| px[0]).collect(),
            png::ColorType::Rgb => data.chunks_exact(3).map(luma).collect(),
            png::ColorType::Rgba => data.chunks_exact(4).map(luma).collect(),
            png::ColorType::Indexed => anyhow::bail!(BmFontError::UnsupportedPageImage {
                reason: "indexed color was not expanded",
            }),
        };

        Self::new(info.width as usize, info.height as usize, pixels)
    }

    fn decode_jpeg(buffer: &[u8]) -> BmFontResult<Self> {
        let mut decoder = jpeg_decoder::Decoder::new(BufReader::new(Cursor::new(buffer)));
        let data = decoder.decode()?;
        let info = decoder
            .info()
            .ok_or_else(|| anyhow::anyhow!("jpeg decoder produced no image info"))?;

        let pixels = match info.pixel_format {
            jpeg_decoder::PixelFormat::L8 => data,
            jpeg_decoder::PixelFormat::RGB24 => data.chunks_exact(3).map(luma).collect(),
            _ => anyhow::bail!(BmFontError::UnsupportedPageImage {
                reason: "unsupported jpeg pixel format",
            }),
        };

        Self::new(usize::from(info.width), usize::from(info.height), pixels)
    }
}

/// ITU-R BT.601 luma in 8.8 fixed point; alpha is ignored
fn luma(px: &[u8]) -> u8 {
    let (r, g, b) = (u32::from(px[0]), u32::from(px[1]), u32::from(px[2]));

    ((r * 77 + g * 150 + b * 29) >> 8) as u8
}

#[cfg(test)]
mod test {
    use std::{fs::File, io::BufWriter};

    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn pack_msb_first() {
        let image = GrayImage::new(
            8,
            2,
            vec![
                1, 0, 0, 0, 0, 0, 0, 1, //
                255, 255, 254, 254, 0, 0, 3, 2,
            ],
        )
        .unwrap();

        assert_eq!(image.pack().unwrap(), vec![0b1000_0001, 0b1100_0010]);
    }

    #[test]
    fn packed_length_is_width_over_eight_times_height() {
        let image = GrayImage::new(24, 5, vec![0xff; 24 * 5]).unwrap();

        let packed = image.pack().unwrap();

        assert_eq!(packed.len(), 3 * 5);
        assert!(packed.iter().all(|&b| b == 0xff));
    }

    #[test]
    fn width_must_be_byte_aligned() {
        let image = GrayImage::new(10, 1, vec![1; 10]).unwrap();

        let err = image.pack().unwrap_err();

        let err = err.downcast_ref::<BmFontError>().unwrap();
        assert!(matches!(err, BmFontError::PageWidthNotByteAligned { width: 10 }));
        assert_eq!(err.kind(), ErrorKind::Protocol);
    }

    #[test]
    fn pixel_buffer_must_match_dimensions() {
        assert!(GrayImage::new(8, 2, vec![0; 15]).is_err());
    }

    #[test]
    fn luma_weights() {
        assert_eq!(luma(&[255, 255, 255]), 255);
        assert_eq!(luma(&[0, 0, 0, 255]), 0);
        assert_eq!(luma(&[255, 0, 0]), 76);
    }

    #[test]
    fn load_rgba_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page_0.png");

        let w = BufWriter::new(File::create(&path).unwrap());
        let mut encoder = png::Encoder::new(w, 8, 1);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().unwrap();
        let data = [[255u8, 255, 255, 255], [0, 0, 0, 0]]
            .iter()
            .cycle()
            .take(8)
            .flatten()
            .copied()
            .collect::<Vec<_>>();
        writer.write_image_data(&data).unwrap();
        writer.finish().unwrap();

        let image = GrayImage::load(&path).unwrap();

        assert_eq!((image.width(), image.height()), (8, 1));
        assert_eq!(image.pack().unwrap(), vec![0b1010_1010]);
    }

    #[test]
    fn unknown_image_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page_0.tga");
        fs::write(&path, [0u8; 32]).unwrap();

        let err = GrayImage::load(&path).unwrap_err();

        assert_eq!(crate::error::error_kind(&err), ErrorKind::Protocol);
    }

    #[test]
    fn missing_page_is_io_error() {
        let dir = tempfile::tempdir().unwrap();

        let err = GrayImage::load(&dir.path().join("nope.png")).unwrap_err();

        assert_eq!(crate::error::error_kind(&err), ErrorKind::Io);
    }
}
