//! Parse-or-drop coercion of table cells to numbers
//!
//! Every query reads its columns through this module. A cell becomes
//! `Some(value)` only when it holds a finite number, or text that parses
//! to one; everything else (nulls, null markers, unparseable text, NaN,
//! non-numeric column types) becomes `None`.

use arrow::array::{
    Array, Float32Array, Float64Array, Int32Array, Int64Array, LargeStringArray, StringArray,
};
use arrow::compute::cast;
use arrow::datatypes::DataType;

use hd_core::PatientId;
use crate::config::NullConfig;

/// Row-aligned numeric view of one column
pub fn numeric_values(array: &dyn Array, nulls: &NullConfig) -> Vec<Option<f64>> {
    let finite = |v: f64| if v.is_finite() { Some(v) } else { None };

    if let Some(float_array) = array.as_any().downcast_ref::<Float64Array>() {
        float_array.iter().map(|v| v.and_then(finite)).collect()
    } else if let Some(int_array) = array.as_any().downcast_ref::<Int64Array>() {
        int_array.iter().map(|v| v.map(|i| i as f64)).collect()
    } else if let Some(int_array) = array.as_any().downcast_ref::<Int32Array>() {
        int_array.iter().map(|v| v.map(f64::from)).collect()
    } else if let Some(float_array) = array.as_any().downcast_ref::<Float32Array>() {
        float_array.iter().map(|v| v.and_then(|f| finite(f64::from(f)))).collect()
    } else if let Some(text_array) = array.as_any().downcast_ref::<StringArray>() {
        text_array.iter().map(|v| v.and_then(|s| parse_cell(s, nulls))).collect()
    } else if let Some(text_array) = array.as_any().downcast_ref::<LargeStringArray>() {
        text_array.iter().map(|v| v.and_then(|s| parse_cell(s, nulls))).collect()
    } else if array.data_type().is_numeric() {
        // remaining widths and decimals go through the cast kernel
        match cast(array, &DataType::Float64) {
            Ok(casted) => match casted.as_any().downcast_ref::<Float64Array>() {
                Some(float_array) => float_array.iter().map(|v| v.and_then(finite)).collect(),
                None => vec![None; array.len()],
            },
            Err(_) => vec![None; array.len()],
        }
    } else {
        vec![None; array.len()]
    }
}

/// Parse one text cell, honouring the configured null markers
pub fn parse_cell(text: &str, nulls: &NullConfig) -> Option<f64> {
    if nulls.is_null(text) {
        return None;
    }
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Interpret a coerced value as a patient identifier; fractional values are missing
pub fn as_patient_id(value: f64) -> Option<PatientId> {
    if value.fract() == 0.0 && value >= i64::MIN as f64 && value <= i64::MAX as f64 {
        Some(value as PatientId)
    } else {
        None
    }
}
