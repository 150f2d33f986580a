//! Synthetic DICOM slices for tests.
//!
//! Writes minimal single-frame CT images with signed 16-bit native pixel
//! data in explicit VR little endian.

use std::path::Path;

use dicom_core::value::C;
use dicom_core::{dicom_value, DataElement, PrimitiveValue, Tag, VR};
use dicom_dictionary_std::{tags, uids};
use dicom_object::meta::FileMetaTableBuilder;
use dicom_object::InMemDicomObject;

/// Content of one synthetic slice.
#[derive(Debug, Clone, Default)]
pub struct SyntheticSlice {
    /// Image height.
    pub rows: u16,
    /// Image width.
    pub cols: u16,
    /// Stored values, row-major, `rows * cols` long.
    pub pixels: Vec<i16>,
    /// Slice Location.
    pub slice_location: Option<f64>,
    /// Instance Number.
    pub instance_number: Option<i32>,
    /// Rescale Slope and Rescale Intercept.
    pub rescale: Option<(f64, f64)>,
    /// Pixel Spacing (row, column) and Slice Thickness.
    pub spacing: Option<(f64, f64, f64)>,
}

impl SyntheticSlice {
    /// A slice whose value at `(row, col)` is `f(row, col)`.
    pub fn from_fn(rows: u16, cols: u16, mut f: impl FnMut(usize, usize) -> i16) -> Self {
        let mut pixels = Vec::with_capacity(usize::from(rows) * usize::from(cols));
        for r in 0..usize::from(rows) {
            for c in 0..usize::from(cols) {
                pixels.push(f(r, c));
            }
        }
        Self {
            rows,
            cols,
            pixels,
            ..Self::default()
        }
    }
}

fn ds(value: f64) -> PrimitiveValue {
    PrimitiveValue::from(format!("{value}"))
}

/// Write `slice` as a DICOM file at `path`.
///
/// # Errors
///
/// Returns an error if the object cannot be assembled or written.
pub fn write_dicom_slice(
    path: &Path,
    slice: &SyntheticSlice,
) -> Result<(), Box<dyn std::error::Error>> {
    let instance_uid = format!(
        "2.25.{}",
        slice.instance_number.map_or(0, i64::from).unsigned_abs() + 1
    );

    let mut obj = InMemDicomObject::new_empty();
    let us = |tag: Tag, value: u16| DataElement::new(tag, VR::US, PrimitiveValue::from(value));

    obj.put(DataElement::new(
        tags::SOP_CLASS_UID,
        VR::UI,
        PrimitiveValue::from(uids::CT_IMAGE_STORAGE),
    ));
    obj.put(DataElement::new(
        tags::SOP_INSTANCE_UID,
        VR::UI,
        PrimitiveValue::from(instance_uid.as_str()),
    ));
    obj.put(DataElement::new(
        tags::MODALITY,
        VR::CS,
        PrimitiveValue::from("CT"),
    ));
    obj.put(us(tags::SAMPLES_PER_PIXEL, 1));
    obj.put(DataElement::new(
        tags::PHOTOMETRIC_INTERPRETATION,
        VR::CS,
        PrimitiveValue::from("MONOCHROME2"),
    ));
    obj.put(us(tags::ROWS, slice.rows));
    obj.put(us(tags::COLUMNS, slice.cols));
    obj.put(us(tags::BITS_ALLOCATED, 16));
    obj.put(us(tags::BITS_STORED, 16));
    obj.put(us(tags::HIGH_BIT, 15));
    obj.put(us(tags::PIXEL_REPRESENTATION, 1));

    if let Some(location) = slice.slice_location {
        obj.put(DataElement::new(tags::SLICE_LOCATION, VR::DS, ds(location)));
    }
    if let Some(number) = slice.instance_number {
        obj.put(DataElement::new(
            tags::INSTANCE_NUMBER,
            VR::IS,
            PrimitiveValue::from(number.to_string()),
        ));
    }
    if let Some((slope, intercept)) = slice.rescale {
        obj.put(DataElement::new(tags::RESCALE_SLOPE, VR::DS, ds(slope)));
        obj.put(DataElement::new(tags::RESCALE_INTERCEPT, VR::DS, ds(intercept)));
    }
    if let Some((row, col, thickness)) = slice.spacing {
        obj.put(DataElement::new(
            tags::PIXEL_SPACING,
            VR::DS,
            dicom_value!(Strs, [format!("{row}"), format!("{col}")]),
        ));
        obj.put(DataElement::new(tags::SLICE_THICKNESS, VR::DS, ds(thickness)));
    }

    #[allow(clippy::cast_sign_loss)]
    // Sign loss: stored bit pattern is reinterpreted, not converted
    let words: Vec<u16> = slice.pixels.iter().map(|&p| p as u16).collect();
    obj.put(DataElement::new(
        tags::PIXEL_DATA,
        VR::OW,
        PrimitiveValue::U16(C::from_vec(words)),
    ));

    let file = obj.with_meta(
        FileMetaTableBuilder::new()
            .transfer_syntax(uids::EXPLICIT_VR_LITTLE_ENDIAN)
            .media_storage_sop_class_uid(uids::CT_IMAGE_STORAGE)
            .media_storage_sop_instance_uid(instance_uid.as_str()),
    )?;
    file.write_to_file(path)?;
    Ok(())
}
