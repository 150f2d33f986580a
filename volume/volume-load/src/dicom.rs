//! DICOM slice source.

use std::path::Path;

use dicom_dictionary_std::{tags, uids};
use dicom_object::{open_file, DefaultDicomObject, Tag};
use tracing::debug;
use volume_types::{GridShape, PixelSpacing, Rescale, SliceGrid, SliceRecord};

use crate::error::{SliceReadError, SliceReadResult};
use crate::source::SliceSource;

/// Transfer syntaxes whose pixel data is stored natively in little endian.
const NATIVE_SYNTAXES: [&str; 3] = [
    uids::IMPLICIT_VR_LITTLE_ENDIAN,
    uids::EXPLICIT_VR_LITTLE_ENDIAN,
    uids::DEFLATED_EXPLICIT_VR_LITTLE_ENDIAN,
];

/// Reads single-frame grayscale DICOM images with native pixel data.
///
/// Only the first frame of a multi-frame object is used. Compressed
/// (encapsulated) and big-endian transfer syntaxes are rejected as
/// [`SliceReadError::Unsupported`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DicomSliceSource;

impl DicomSliceSource {
    /// Create a DICOM source.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl SliceSource for DicomSliceSource {
    fn read_slice(&self, path: &Path) -> SliceReadResult<SliceRecord> {
        let obj = open_file(path)?;

        let ts = obj.meta().transfer_syntax().trim_end_matches('\0');
        if !NATIVE_SYNTAXES.contains(&ts) {
            return Err(SliceReadError::unsupported(format!(
                "transfer syntax {ts}"
            )));
        }

        let grid = read_pixels(&obj)?;
        let record = SliceRecord {
            grid,
            slice_location: float(&obj, tags::SLICE_LOCATION),
            instance_number: read_i32(&obj, tags::INSTANCE_NUMBER),
            arrival: 0,
            rescale: read_rescale(&obj),
            pixel_spacing: read_pixel_spacing(&obj),
            slice_thickness: float(&obj, tags::SLICE_THICKNESS),
            source: path.to_path_buf(),
        };

        debug!(
            path = %path.display(),
            shape = %record.shape(),
            slice_location = ?record.slice_location,
            instance_number = ?record.instance_number,
            "Parsed DICOM slice"
        );
        Ok(record)
    }
}

fn read_u16(obj: &DefaultDicomObject, tag: Tag) -> Option<u16> {
    obj.element(tag).ok().and_then(|e| e.to_int::<u16>().ok())
}

fn read_i32(obj: &DefaultDicomObject, tag: Tag) -> Option<i32> {
    obj.element(tag).ok().and_then(|e| e.to_int::<i32>().ok())
}

fn float(obj: &DefaultDicomObject, tag: Tag) -> Option<f64> {
    obj.element(tag)
        .ok()
        .and_then(|e| e.to_float64().ok())
        .filter(|v| v.is_finite())
}

fn required_u16(obj: &DefaultDicomObject, tag: Tag, name: &'static str) -> SliceReadResult<u16> {
    let elem = obj
        .element(tag)
        .map_err(|_| SliceReadError::MissingElement { name })?;
    elem.to_int::<u16>()
        .map_err(|e| SliceReadError::invalid(name, e.to_string()))
}

/// Both slope and intercept, or nothing.
fn read_rescale(obj: &DefaultDicomObject) -> Option<Rescale> {
    Some(Rescale {
        slope: float(obj, tags::RESCALE_SLOPE)?,
        intercept: float(obj, tags::RESCALE_INTERCEPT)?,
    })
}

/// Pixel Spacing is stored as `row\column`.
fn read_pixel_spacing(obj: &DefaultDicomObject) -> Option<PixelSpacing> {
    let values = obj
        .element(tags::PIXEL_SPACING)
        .ok()?
        .to_multi_float64()
        .ok()?;
    match values[..] {
        [row, col, ..] if row.is_finite() && col.is_finite() => Some(PixelSpacing { row, col }),
        _ => None,
    }
}

fn read_pixels(obj: &DefaultDicomObject) -> SliceReadResult<SliceGrid> {
    let rows = required_u16(obj, tags::ROWS, "Rows")?;
    let cols = required_u16(obj, tags::COLUMNS, "Columns")?;
    if rows == 0 || cols == 0 {
        return Err(SliceReadError::invalid(
            "Rows",
            format!("empty image {cols}x{rows}"),
        ));
    }

    let samples = read_u16(obj, tags::SAMPLES_PER_PIXEL).unwrap_or(1);
    if samples != 1 {
        return Err(SliceReadError::unsupported(format!(
            "{samples} samples per pixel"
        )));
    }

    let bits_allocated = required_u16(obj, tags::BITS_ALLOCATED, "BitsAllocated")?;
    let bits_stored = read_u16(obj, tags::BITS_STORED).unwrap_or(bits_allocated);
    let signed = read_u16(obj, tags::PIXEL_REPRESENTATION).unwrap_or(0) == 1;
    let layout = SampleLayout::new(bits_allocated, bits_stored, signed)?;

    let pixel_data = obj
        .element(tags::PIXEL_DATA)
        .map_err(|_| SliceReadError::MissingElement { name: "PixelData" })?;
    let bytes = pixel_data
        .to_bytes()
        .map_err(|e| SliceReadError::unsupported(format!("pixel data: {e}")))?;

    let shape = GridShape::new(usize::from(rows), usize::from(cols));
    let frame_len = shape.area() * layout.bytes_per_sample;
    let frame = bytes.get(..frame_len).ok_or_else(|| {
        SliceReadError::invalid(
            "PixelData",
            format!("{} bytes, need {frame_len} for one frame", bytes.len()),
        )
    })?;

    let data = frame
        .chunks_exact(layout.bytes_per_sample)
        .map(|raw| layout.decode(raw))
        .collect();
    SliceGrid::new(shape, data).map_err(|e| SliceReadError::invalid("PixelData", e.to_string()))
}

/// How one stored sample is laid out in the pixel data.
#[derive(Debug, Clone, Copy)]
struct SampleLayout {
    bytes_per_sample: usize,
    bits_stored: u32,
    signed: bool,
}

impl SampleLayout {
    fn new(bits_allocated: u16, bits_stored: u16, signed: bool) -> SliceReadResult<Self> {
        let bytes_per_sample = match bits_allocated {
            8 => 1,
            16 => 2,
            32 => 4,
            other => {
                return Err(SliceReadError::unsupported(format!(
                    "{other} bits allocated"
                )))
            }
        };
        let bits_stored = u32::from(bits_stored);
        if bits_stored == 0 || bits_stored > u32::from(bits_allocated) {
            return Err(SliceReadError::invalid(
                "BitsStored",
                format!("{bits_stored} with {bits_allocated} bits allocated"),
            ));
        }
        Ok(Self {
            bytes_per_sample,
            bits_stored,
            signed,
        })
    }

    /// Decode one little-endian sample, masking to the stored bits and
    /// sign-extending when the representation is signed.
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_wrap)]
    // Precision: 32-bit samples above 2^24 lose low bits in f32, as any
    // single-precision volume does
    fn decode(self, raw: &[u8]) -> f32 {
        let mut word = [0u8; 4];
        word[..raw.len()].copy_from_slice(raw);
        let value = u32::from_le_bytes(word);

        let shift = 32 - self.bits_stored;
        if self.signed {
            (((value << shift) as i32) >> shift) as f32
        } else {
            ((value << shift) >> shift) as f32
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::synth::{write_dicom_slice, SyntheticSlice};
    use approx::assert_relative_eq;
    use tempfile::tempdir;

    #[test]
    fn reads_synthetic_slice_with_metadata() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("slice.dcm");
        let mut slice = SyntheticSlice::from_fn(3, 4, |r, c| i16::try_from(r * 4 + c).unwrap() - 5);
        slice.slice_location = Some(-42.5);
        slice.instance_number = Some(7);
        slice.rescale = Some((2.0, -1024.0));
        slice.spacing = Some((0.5, 0.75, 2.5));
        write_dicom_slice(&path, &slice).unwrap();

        let record = DicomSliceSource::new().read_slice(&path).unwrap();
        assert_eq!(record.shape(), GridShape::new(3, 4));
        assert_relative_eq!(record.grid.data()[0], -5.0);
        assert_relative_eq!(record.grid.get(2, 3).unwrap(), 6.0);
        assert_eq!(record.slice_location, Some(-42.5));
        assert_eq!(record.instance_number, Some(7));
        assert_eq!(
            record.rescale,
            Some(Rescale {
                slope: 2.0,
                intercept: -1024.0
            })
        );
        assert_eq!(record.pixel_spacing, Some(PixelSpacing { row: 0.5, col: 0.75 }));
        assert_eq!(record.slice_thickness, Some(2.5));
    }

    #[test]
    fn optional_metadata_absent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bare.dcm");
        write_dicom_slice(&path, &SyntheticSlice::from_fn(2, 2, |_, _| 100)).unwrap();

        let record = DicomSliceSource::new().read_slice(&path).unwrap();
        assert!(record.slice_location.is_none());
        assert!(record.instance_number.is_none());
        assert!(record.rescale.is_none());
        assert!(record.pixel_spacing.is_none());
        assert!(record.slice_thickness.is_none());
    }

    #[test]
    fn rejects_non_dicom_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, b"definitely not a DICOM file").unwrap();

        let err = DicomSliceSource::new().read_slice(&path).unwrap_err();
        assert!(matches!(err, SliceReadError::Dicom(_)));
    }

    #[test]
    fn decode_unsigned_16() {
        let layout = SampleLayout::new(16, 16, false).unwrap();
        assert!((layout.decode(&[0x34, 0x12]) - 4660.0).abs() < f32::EPSILON);
    }

    #[test]
    fn decode_signed_16() {
        let layout = SampleLayout::new(16, 16, true).unwrap();
        assert!((layout.decode(&(-1024_i16).to_le_bytes()) + 1024.0).abs() < f32::EPSILON);
    }

    #[test]
    fn decode_masks_to_bits_stored() {
        // 12 bits stored, high nibble carries overlay garbage
        let layout = SampleLayout::new(16, 12, false).unwrap();
        assert!((layout.decode(&[0xFF, 0xFF]) - 4095.0).abs() < f32::EPSILON);

        let signed = SampleLayout::new(16, 12, true).unwrap();
        assert!((signed.decode(&[0xFF, 0x0F]) + 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn decode_8_bit() {
        let layout = SampleLayout::new(8, 8, false).unwrap();
        assert!((layout.decode(&[200]) - 200.0).abs() < f32::EPSILON);
    }

    #[test]
    fn rejects_odd_bit_depths() {
        assert!(SampleLayout::new(12, 12, false).is_err());
        assert!(SampleLayout::new(16, 17, false).is_err());
        assert!(SampleLayout::new(16, 0, false).is_err());
    }
}
