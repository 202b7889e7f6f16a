//! Cache key derivation from forecast request parameters

use md5::{Digest, Md5};

use crate::units::UnitSystem;

/// Decimal places kept from each coordinate (about 11 m)
const COORDINATE_PRECISION: i32 = 4;

/// Rounds a coordinate to the cache key precision
///
/// Negative zero is folded into zero so `-0.00001` and `0.00001` share a key.
fn round_coordinate(value: f64) -> f64 {
    let scale = 10f64.powi(COORDINATE_PRECISION);
    let rounded = (value * scale).round() / scale;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Derives a stable cache key for a forecast request
///
/// Coordinates are rounded to 4 decimal places first, so locations that only
/// differ beyond that share an entry. The key is the lowercase hex MD5 digest
/// of the composed request description (always 32 characters).
pub fn generate_key(
    latitude: f64,
    longitude: f64,
    want_daily: bool,
    want_hourly: bool,
    unit_system: UnitSystem,
) -> String {
    let material = format!(
        "{:.4}-{:.4}-d{}-h{}-u{}",
        round_coordinate(latitude),
        round_coordinate(longitude),
        want_daily,
        want_hourly,
        unit_system.as_str()
    );
    hex::encode(Md5::digest(material.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_is_deterministic() {
        let a = generate_key(40.7128, -74.006, true, false, UnitSystem::Metric);
        let b = generate_key(40.7128, -74.006, true, false, UnitSystem::Metric);
        assert_eq!(a, b);
    }

    #[test]
    fn test_key_is_32_lowercase_hex_chars() {
        let key = generate_key(51.5074, -0.1278, false, true, UnitSystem::Imperial);
        assert_eq!(key.len(), 32);
        assert!(key.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn test_key_matches_md5_of_key_material() {
        let key = generate_key(40.7128, -74.006, true, false, UnitSystem::Metric);
        let expected = hex::encode(Md5::digest(b"40.7128--74.0060-dtrue-hfalse-umetric"));
        assert_eq!(key, expected);
    }

    #[test]
    fn test_fifth_decimal_differences_collide() {
        let a = generate_key(49.28271, -123.12071, false, false, UnitSystem::Metric);
        let b = generate_key(49.28274, -123.12074, false, false, UnitSystem::Metric);
        assert_eq!(a, b);
    }

    #[test]
    fn test_fourth_decimal_differences_do_not_collide() {
        let a = generate_key(49.2827, -123.1207, false, false, UnitSystem::Metric);
        let b = generate_key(49.2828, -123.1207, false, false, UnitSystem::Metric);
        assert_ne!(a, b);
    }

    #[test]
    fn test_negative_zero_shares_key_with_zero() {
        let a = generate_key(-0.00001, 0.00002, false, false, UnitSystem::Metric);
        let b = generate_key(0.00001, -0.00002, false, false, UnitSystem::Metric);
        assert_eq!(a, b);
    }

    #[test]
    fn test_every_parameter_affects_key() {
        let base = generate_key(10.0, 20.0, false, false, UnitSystem::Metric);
        assert_ne!(base, generate_key(10.001, 20.0, false, false, UnitSystem::Metric));
        assert_ne!(base, generate_key(10.0, 20.001, false, false, UnitSystem::Metric));
        assert_ne!(base, generate_key(10.0, 20.0, true, false, UnitSystem::Metric));
        assert_ne!(base, generate_key(10.0, 20.0, false, true, UnitSystem::Metric));
        assert_ne!(base, generate_key(10.0, 20.0, false, false, UnitSystem::Imperial));
    }

    #[test]
    fn test_latitude_and_longitude_are_not_interchangeable() {
        let a = generate_key(10.0, 20.0, false, false, UnitSystem::Metric);
        let b = generate_key(20.0, 10.0, false, false, UnitSystem::Metric);
        assert_ne!(a, b);
    }
}
