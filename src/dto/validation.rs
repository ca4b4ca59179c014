//! Validation helpers for DTOs.

use validator::ValidationError;

use crate::color_map::{self, ColorMapError, EndpointPolicy};

fn color_map_error(code: &'static str, err: ColorMapError) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(err.to_string().into());
    error
}

/// Validates that legend edges are non-empty, finite and strictly increasing.
pub fn validate_edges(edges: &[f64]) -> Result<(), ValidationError> {
    color_map::check_edges(edges).map_err(|err| color_map_error("legend_edges", err))
}

/// Validates that `colors` holds one color per bucket left visible by `policy`.
pub fn validate_color_count(
    edges: &[f64],
    colors: &[String],
    policy: EndpointPolicy,
) -> Result<(), ValidationError> {
    color_map::check_colors(edges.len(), colors.len(), policy)
        .map_err(|err| color_map_error("legend_colors", err))
}

/// Validates the list of values a hazard argument may take.
///
/// # Examples
///
/// ```ignore
/// validate_argument_values(&[10.0, 20.0]) // Ok
/// validate_argument_values(&[])           // Err - nothing to select
/// validate_argument_values(&[f64::NAN])   // Err - not finite
/// ```
pub fn validate_argument_values(values: &[f64]) -> Result<(), ValidationError> {
    if values.is_empty() {
        let mut err = ValidationError::new("argument_values_empty");
        err.message = Some("Argument must offer at least one value".into());
        return Err(err);
    }

    if let Some(value) = values.iter().find(|value| !value.is_finite()) {
        let mut err = ValidationError::new("argument_values_finite");
        err.message = Some(format!("Argument values must be finite (got {value})").into());
        return Err(err);
    }

    Ok(())
}

/// Validates the shape of a UK postcode before it is sent to a lookup service:
/// 5 to 7 alphanumeric characters once spaces are removed.
///
/// # Examples
///
/// ```ignore
/// validate_postcode("EH8 9YL")  // Ok
/// validate_postcode("eh89yl")   // Ok
/// validate_postcode("")         // Err - blank
/// validate_postcode("EH8/9YL")  // Err - invalid character
/// ```
pub fn validate_postcode(postcode: &str) -> Result<(), ValidationError> {
    let compact: String = postcode.chars().filter(|c| !c.is_whitespace()).collect();

    if !(5..=7).contains(&compact.len()) {
        let mut err = ValidationError::new("postcode_length");
        err.message = Some(
            format!(
                "Postcode must have 5 to 7 characters besides spaces (got {})",
                compact.len()
            )
            .into(),
        );
        return Err(err);
    }

    if !compact.chars().all(|c| c.is_ascii_alphanumeric()) {
        let mut err = ValidationError::new("postcode_format");
        err.message = Some("Postcode must contain only letters, digits and spaces".into());
        return Err(err);
    }

    Ok(())
}
