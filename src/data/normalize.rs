use thiserror::Error;

use super::model::Series;

#[derive(Debug, Error, PartialEq)]
pub enum NormalizeError {
    #[error("cannot normalise an empty series")]
    Empty,
    #[error("first and last x are both {0}, chord length is zero")]
    ZeroLength(f64),
}

/// Rescale x in place to the unitless chord coordinate x/c:
/// `(x - x_first) / (x_last - x_first)`.
///
/// The series must already be sorted by x, so the first and last rows are the
/// leading and trailing edge. Afterwards the first x is exactly 0 and the last
/// exactly 1.
pub fn unitless(series: &mut Series) -> Result<(), NormalizeError> {
    let (Some(&x_min), Some(&x_max)) = (series.x.first(), series.x.last()) else {
        return Err(NormalizeError::Empty);
    };
    let length = x_max - x_min;
    if length == 0.0 {
        return Err(NormalizeError::ZeroLength(x_min));
    }

    for x in &mut series.x {
        *x = (*x - x_min) / length;
    }
    Ok(())
}
