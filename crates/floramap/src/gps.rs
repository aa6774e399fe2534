// SPDX-License-Identifier: Apache-2.0
// Copyright © 2025 Au-Zone Technologies. All Rights Reserved.

//! GPS coordinate extraction from EXIF metadata.
//!
//! EXIF stores each GPS coordinate as a degrees/minutes/seconds triple of
//! unsigned rationals plus a hemisphere reference tag (`N`/`S` for latitude,
//! `E`/`W` for longitude). This module converts that representation into
//! signed decimal degrees.

use exif::{Exif, In, Rational, Tag, Value};

/// Convert a degrees/minutes/seconds rational triple to decimal degrees.
///
/// Returns `None` if the value does not hold exactly three rationals or if
/// the result is not a finite number (a zero denominator divides to
/// infinity under IEEE arithmetic and is treated as an absent coordinate).
pub fn dms_to_degrees(values: &[Rational]) -> Option<f64> {
    if values.len() != 3 {
        return None;
    }
    let d = values[0].to_f64();
    let m = values[1].to_f64();
    let s = values[2].to_f64();
    let degrees = d + m / 60.0 + s / 3600.0;
    degrees.is_finite().then_some(degrees)
}

// Southern and western hemispheres carry negative decimal degrees.
fn apply_hemisphere(degrees: f64, reference: char) -> f64 {
    match reference {
        'S' | 'W' => -degrees,
        _ => degrees,
    }
}

/// Extract one signed coordinate from a value/reference tag pair.
///
/// Returns `None` if either tag is missing, the value is not a
/// degrees/minutes/seconds rational triple, or the triple does not decode
/// to a finite number.
pub fn coordinate(exif: &Exif, value_tag: Tag, ref_tag: Tag) -> Option<f64> {
    let field = exif.get_field(value_tag, In::PRIMARY)?;
    let reference = exif.get_field(ref_tag, In::PRIMARY)?;

    let Value::Rational(ref dms) = field.value else {
        return None;
    };
    let degrees = dms_to_degrees(dms)?;

    let reference = reference.display_value().to_string();
    reference
        .chars()
        .next()
        .map(|c| apply_hemisphere(degrees, c))
}

/// Extract the `(latitude, longitude)` pair from parsed EXIF metadata.
///
/// All four GPS tags (`GPSLatitude`, `GPSLatitudeRef`, `GPSLongitude`,
/// `GPSLongitudeRef`) must be present and decodable, otherwise the image
/// has no usable location and `None` is returned.
pub fn location(exif: &Exif) -> Option<(f64, f64)> {
    let latitude = coordinate(exif, Tag::GPSLatitude, Tag::GPSLatitudeRef)?;
    let longitude = coordinate(exif, Tag::GPSLongitude, Tag::GPSLongitudeRef)?;
    Some((latitude, longitude))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dms(d: u32, m: u32, s: u32) -> Vec<Rational> {
        vec![
            Rational { num: d, denom: 1 },
            Rational { num: m, denom: 1 },
            Rational { num: s, denom: 1 },
        ]
    }

    #[test]
    fn test_dms_to_degrees() {
        let degrees = dms_to_degrees(&dms(39, 44, 48)).unwrap();
        assert!((degrees - 39.7467).abs() < 1e-4);
    }

    #[test]
    fn test_fractional_seconds() {
        // 30.5 seconds as 61/2
        let values = vec![
            Rational { num: 39, denom: 1 },
            Rational { num: 44, denom: 1 },
            Rational { num: 61, denom: 2 },
        ];
        let degrees = dms_to_degrees(&values).unwrap();
        assert!((degrees - (39.0 + 44.0 / 60.0 + 30.5 / 3600.0)).abs() < 1e-9);
    }

    #[test]
    fn test_zero_denominator_is_absent() {
        let values = vec![
            Rational { num: 39, denom: 0 },
            Rational { num: 44, denom: 1 },
            Rational { num: 48, denom: 1 },
        ];
        assert_eq!(dms_to_degrees(&values), None);
    }

    #[test]
    fn test_wrong_arity_is_absent() {
        assert_eq!(dms_to_degrees(&[]), None);
        assert_eq!(dms_to_degrees(&dms(39, 44, 48)[..2]), None);
    }

    #[test]
    fn test_hemisphere_sign() {
        let degrees = dms_to_degrees(&dms(39, 44, 48)).unwrap();
        assert!((apply_hemisphere(degrees, 'N') - 39.7467).abs() < 1e-4);
        assert!((apply_hemisphere(degrees, 'S') + 39.7467).abs() < 1e-4);
        assert!((apply_hemisphere(degrees, 'E') - 39.7467).abs() < 1e-4);
        assert!((apply_hemisphere(degrees, 'W') + 39.7467).abs() < 1e-4);
    }
}
