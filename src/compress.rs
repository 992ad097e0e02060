use std::fs;
use std::io::Write;
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageReader};
use oxipng::{Deflaters, Options};
use tempfile::NamedTempFile;

use crate::classify::ImageKind;
use crate::config::CompactorConfig;
use crate::constants::{LIBDEFLATER_LEVEL, OXIPNG_PRESET};
use crate::error::{CompactError, Result};

/// What happened to one eligible file. Failure is the `Err` arm of
/// [`compact_file`], caught at the per-file boundary by the orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    /// The file was replaced (or would be, under dry run) with a strictly
    /// smaller version.
    Compressed { original: u64, compressed: u64 },
    /// Recompression did not beat the original; the file was left
    /// byte-for-byte untouched.
    Unchanged { original: u64, attempted: u64 },
}

/// Recompress one file in place.
///
/// The recompressed bytes are produced in memory and compared against the
/// original size first. Only a strictly smaller result is committed, via a
/// temp file in the same directory and an atomic rename over the original.
/// An equal-or-larger result never touches the file.
pub fn compact_file(
    path: &Path,
    kind: ImageKind,
    original: u64,
    config: &CompactorConfig,
) -> Result<FileOutcome> {
    let encoded = match kind {
        ImageKind::Jpeg => encode_jpeg(path, config.jpeg_quality)?,
        ImageKind::Png => optimize_png(path)?,
    };

    let attempted = encoded.len() as u64;
    if attempted >= original {
        return Ok(FileOutcome::Unchanged {
            original,
            attempted,
        });
    }

    if !config.dry_run {
        replace_file(path, &encoded)?;
    }

    Ok(FileOutcome::Compressed {
        original,
        compressed: attempted,
    })
}

fn encode_jpeg(path: &Path, quality: u8) -> Result<Vec<u8>> {
    let img = ImageReader::open(path)?.decode()?;
    let img = prepare_for_jpeg(img);

    let mut buf = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut buf, quality);
    img.write_with_encoder(encoder)?;
    Ok(buf)
}

/// JPEG carries no alpha channel. Anything that is not already 8-bit RGB or
/// grayscale is flattened to RGB before encoding; alpha data is discarded,
/// which is lossy and irreversible. Palette images arrive here already
/// expanded by the decoder.
pub fn prepare_for_jpeg(img: DynamicImage) -> DynamicImage {
    match img {
        DynamicImage::ImageRgb8(_) | DynamicImage::ImageLuma8(_) => img,
        other => DynamicImage::ImageRgb8(other.to_rgb8()),
    }
}

/// Lossless PNG re-optimization of the original file bytes. The decode call
/// exists so a mislabeled or truncated file fails with a decode error here
/// rather than inside oxipng.
fn optimize_png(path: &Path) -> Result<Vec<u8>> {
    ImageReader::open(path)?.decode()?;

    let data = fs::read(path)?;
    let mut options = Options::from_preset(OXIPNG_PRESET);
    options.deflate = Deflaters::Libdeflater {
        compression: LIBDEFLATER_LEVEL,
    };

    oxipng::optimize_from_memory(&data, &options)
        .map_err(|e| CompactError::PngOptimization(e.to_string()))
}

/// Write to a temp sibling, then atomically rename over the original. A
/// failure mid-write leaves the original intact. Temp files are created with
/// restrictive permissions, so the original's permissions are carried over
/// before the rename.
fn replace_file(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
    let mut tmp = NamedTempFile::new_in(dir.unwrap_or_else(|| Path::new(".")))?;
    tmp.write_all(bytes)?;
    tmp.flush()?;
    let permissions = fs::metadata(path)?.permissions();
    tmp.as_file().set_permissions(permissions)?;
    tmp.persist(path).map_err(|e| CompactError::Replace {
        path: path.to_path_buf(),
        source: e.error,
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, ImageBuffer, Rgb, Rgba};
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn test_config(root: PathBuf, quality: u8, dry_run: bool) -> CompactorConfig {
        CompactorConfig {
            root,
            jpeg_quality: quality,
            min_size_bytes: 0,
            recursive: true,
            dry_run,
            protected: Vec::new(),
        }
    }

    fn noisy_rgb(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(ImageBuffer::from_fn(width, height, |x, y| {
            let v = (x.wrapping_mul(31) ^ y.wrapping_mul(17)) as u8;
            Rgb([v, x as u8, y as u8])
        }))
    }

    #[test]
    fn test_prepare_for_jpeg_flattens_alpha() {
        let rgba = DynamicImage::ImageRgba8(ImageBuffer::from_fn(8, 8, |x, y| {
            Rgba([x as u8, y as u8, 0, 128])
        }));
        let prepared = prepare_for_jpeg(rgba);
        assert_eq!(prepared.color(), image::ColorType::Rgb8);
        assert_eq!(prepared.dimensions(), (8, 8));
    }

    #[test]
    fn test_prepare_for_jpeg_keeps_rgb() {
        let rgb = noisy_rgb(8, 8);
        let prepared = prepare_for_jpeg(rgb);
        assert_eq!(prepared.color(), image::ColorType::Rgb8);
    }

    #[test]
    fn test_compact_jpeg_shrinks_and_stays_decodable() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("photo.jpg");

        let img = noisy_rgb(128, 96);
        let mut buf = Vec::new();
        img.write_with_encoder(JpegEncoder::new_with_quality(&mut buf, 95))
            .unwrap();
        fs::write(&path, &buf).unwrap();
        let original = buf.len() as u64;

        let config = test_config(temp_dir.path().to_path_buf(), 30, false);
        let outcome = compact_file(&path, ImageKind::Jpeg, original, &config).unwrap();

        match outcome {
            FileOutcome::Compressed {
                original: o,
                compressed: c,
            } => {
                assert_eq!(o, original);
                assert!(c < o);
                assert_eq!(fs::metadata(&path).unwrap().len(), c);
            }
            other => panic!("expected Compressed, got {:?}", other),
        }

        // Still a valid JPEG with the same pixel dimensions.
        let reread = ImageReader::open(&path).unwrap().decode().unwrap();
        assert_eq!(reread.dimensions(), (128, 96));
    }

    #[test]
    fn test_compact_jpeg_not_smaller_leaves_file_untouched() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("photo.jpg");

        // Already crushed at quality 10; re-encoding at 95 only grows it.
        let img = noisy_rgb(64, 64);
        let mut buf = Vec::new();
        img.write_with_encoder(JpegEncoder::new_with_quality(&mut buf, 10))
            .unwrap();
        fs::write(&path, &buf).unwrap();

        let config = test_config(temp_dir.path().to_path_buf(), 95, false);
        let outcome =
            compact_file(&path, ImageKind::Jpeg, buf.len() as u64, &config).unwrap();

        assert!(matches!(outcome, FileOutcome::Unchanged { .. }));
        assert_eq!(fs::read(&path).unwrap(), buf);
    }

    #[test]
    fn test_compact_dry_run_never_writes() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("photo.jpg");

        let img = noisy_rgb(128, 96);
        let mut buf = Vec::new();
        img.write_with_encoder(JpegEncoder::new_with_quality(&mut buf, 95))
            .unwrap();
        fs::write(&path, &buf).unwrap();

        let config = test_config(temp_dir.path().to_path_buf(), 30, true);
        let outcome =
            compact_file(&path, ImageKind::Jpeg, buf.len() as u64, &config).unwrap();

        assert!(matches!(outcome, FileOutcome::Compressed { .. }));
        assert_eq!(fs::read(&path).unwrap(), buf);
    }

    #[cfg(unix)]
    #[test]
    fn test_compact_preserves_file_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("photo.jpg");

        let img = noisy_rgb(128, 96);
        let mut buf = Vec::new();
        img.write_with_encoder(JpegEncoder::new_with_quality(&mut buf, 95))
            .unwrap();
        fs::write(&path, &buf).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o640)).unwrap();

        let config = test_config(temp_dir.path().to_path_buf(), 30, false);
        let outcome =
            compact_file(&path, ImageKind::Jpeg, buf.len() as u64, &config).unwrap();
        assert!(matches!(outcome, FileOutcome::Compressed { .. }));

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o640);
    }

    #[test]
    fn test_compact_png_is_lossless_and_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("chart.png");

        let img = noisy_rgb(100, 100);
        img.save_with_format(&path, image::ImageFormat::Png).unwrap();
        let original = fs::metadata(&path).unwrap().len();

        let config = test_config(temp_dir.path().to_path_buf(), 80, false);
        let first = compact_file(&path, ImageKind::Png, original, &config).unwrap();

        let after_first = fs::read(&path).unwrap();
        if let FileOutcome::Compressed { compressed, .. } = first {
            assert_eq!(after_first.len() as u64, compressed);
        }

        // Second pass over the already-optimized file must not change it.
        let second =
            compact_file(&path, ImageKind::Png, after_first.len() as u64, &config).unwrap();
        assert!(matches!(second, FileOutcome::Unchanged { .. }));
        assert_eq!(fs::read(&path).unwrap(), after_first);

        let reread = ImageReader::open(&path).unwrap().decode().unwrap();
        assert_eq!(reread.dimensions(), (100, 100));
        // Lossless: pixel content identical to the source image.
        assert_eq!(reread.to_rgb8().as_raw(), img.to_rgb8().as_raw());
    }

    #[test]
    fn test_compact_corrupt_file_fails_without_touching_it() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.jpg");
        let garbage = b"this is not an image at all".to_vec();
        fs::write(&path, &garbage).unwrap();

        let config = test_config(temp_dir.path().to_path_buf(), 80, false);
        let result = compact_file(&path, ImageKind::Jpeg, garbage.len() as u64, &config);

        assert!(matches!(result, Err(CompactError::ImageProcessing(_))));
        assert_eq!(fs::read(&path).unwrap(), garbage);
    }
}
