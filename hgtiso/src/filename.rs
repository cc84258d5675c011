//! SRTM filename parsing and validation.
//!
//! SRTM tiles follow the naming convention `{N|S}{lat}{E|W}{lon}.hgt`:
//!
//! - Latitude: 2 digits with N/S prefix (e.g., N35, S12)
//! - Longitude: 3 digits with E/W prefix (e.g., E138, W077)
//!
//! The name encodes the **southwest corner** of the 1° × 1° tile. Hemisphere
//! letters are accepted case-insensitively, but the shape of the name is
//! strict: exactly 11 characters ending in `.hgt`.

use crate::error::{HgtError, Result};

/// Parse an SRTM file name into the (latitude, longitude) of the tile's
/// southwest corner.
///
/// The name must be exactly 11 characters (`N28E086.hgt`), with hemisphere
/// letters at positions 0 and 3, a 2-digit latitude ≤ 90 and a 3-digit
/// longitude ≤ 180. Anything else fails with [`HgtError::InvalidFileName`].
///
/// # Examples
///
/// ```
/// use hgtiso::filename::parse_tile_name;
///
/// assert_eq!(parse_tile_name("N28E086.hgt").unwrap(), (28, 86));
/// assert_eq!(parse_tile_name("S33W070.hgt").unwrap(), (-33, -70));
/// assert_eq!(parse_tile_name("s33w070.HGT").unwrap(), (-33, -70));
/// assert!(parse_tile_name("invalid").is_err());
/// ```
pub fn parse_tile_name(name: &str) -> Result<(i32, i32)> {
    let invalid = || HgtError::InvalidFileName {
        name: name.to_string(),
    };

    let lower = name.to_lowercase();
    if lower.len() != 11 || !lower.ends_with(".hgt") || !lower.is_ascii() {
        return Err(invalid());
    }

    let bytes = lower.as_bytes();

    let lat_sign = match bytes[0] {
        b'n' => 1,
        b's' => -1,
        _ => return Err(invalid()),
    };
    let lon_sign = match bytes[3] {
        b'w' => -1,
        b'e' => 1,
        _ => return Err(invalid()),
    };

    // parse() alone would accept signs inside the digit fields.
    if !lower[1..3].bytes().all(|b| b.is_ascii_digit())
        || !lower[4..7].bytes().all(|b| b.is_ascii_digit())
    {
        return Err(invalid());
    }
    let lat: i32 = lower[1..3].parse().map_err(|_| invalid())?;
    let lon: i32 = lower[4..7].parse().map_err(|_| invalid())?;

    if lat > 90 || lon > 180 {
        return Err(invalid());
    }

    Ok((lat * lat_sign, lon * lon_sign))
}

/// Build the SRTM file name covering the given coordinates.
///
/// # Examples
///
/// ```
/// use hgtiso::filename::tile_name_for;
///
/// assert_eq!(tile_name_for(35.5, 138.7), "N35E138.hgt");
/// assert_eq!(tile_name_for(-12.3, -77.1), "S13W078.hgt");
/// ```
pub fn tile_name_for(lat: f64, lon: f64) -> String {
    let lat_int = lat.floor() as i32;
    let lon_int = lon.floor() as i32;

    let lat_prefix = if lat_int >= 0 { 'N' } else { 'S' };
    let lon_prefix = if lon_int >= 0 { 'E' } else { 'W' };

    format!(
        "{}{:02}{}{:03}.hgt",
        lat_prefix,
        lat_int.abs(),
        lon_prefix,
        lon_int.abs()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_names() {
        assert_eq!(parse_tile_name("N28E086.hgt").unwrap(), (28, 86));
        assert_eq!(parse_tile_name("S33W070.hgt").unwrap(), (-33, -70));
        assert_eq!(parse_tile_name("N00E000.hgt").unwrap(), (0, 0));
        assert_eq!(parse_tile_name("S00W000.hgt").unwrap(), (0, 0));
        assert_eq!(parse_tile_name("N90E180.hgt").unwrap(), (90, 180));
    }

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!(parse_tile_name("n35e138.hgt").unwrap(), (35, 138));
        assert_eq!(parse_tile_name("s12w077.HGT").unwrap(), (-12, -77));
    }

    #[test]
    fn test_parse_wrong_length() {
        assert!(parse_tile_name("N35E13.hgt").is_err());
        assert!(parse_tile_name("N35E1388.hgt").is_err());
        assert!(parse_tile_name("invalid").is_err());
        assert!(parse_tile_name("").is_err());
    }

    #[test]
    fn test_parse_wrong_hemisphere_letters() {
        assert!(parse_tile_name("X35E138.hgt").is_err());
        assert!(parse_tile_name("N35X138.hgt").is_err());
        assert!(parse_tile_name("E35N138.hgt").is_err());
    }

    #[test]
    fn test_parse_non_numeric_digits() {
        assert!(parse_tile_name("NAAE138.hgt").is_err());
        assert!(parse_tile_name("N35EABC.hgt").is_err());
        // A sign inside the digit field must not parse.
        assert!(parse_tile_name("N-5E138.hgt").is_err());
    }

    #[test]
    fn test_parse_out_of_range() {
        assert!(parse_tile_name("N91E000.hgt").is_err());
        assert!(parse_tile_name("N00E181.hgt").is_err());
    }

    #[test]
    fn test_parse_wrong_extension() {
        assert!(parse_tile_name("N35E138.tif").is_err());
        assert!(parse_tile_name("N35E138hgt1").is_err());
    }

    #[test]
    fn test_tile_name_for() {
        assert_eq!(tile_name_for(35.5, 138.7), "N35E138.hgt");
        assert_eq!(tile_name_for(0.5, 0.5), "N00E000.hgt");
        // floor(-12.3) = -13, floor(-77.1) = -78
        assert_eq!(tile_name_for(-12.3, -77.1), "S13W078.hgt");
        assert_eq!(tile_name_for(-0.1, -0.1), "S01W001.hgt");
    }

    #[test]
    fn test_roundtrip() {
        for (lat, lon) in [(35.5, 138.7), (-12.3, -77.1), (0.5, -0.5), (-59.9, 179.9)] {
            let name = tile_name_for(lat, lon);
            let (parsed_lat, parsed_lon) = parse_tile_name(&name).unwrap();
            assert_eq!(parsed_lat, lat.floor() as i32);
            assert_eq!(parsed_lon, lon.floor() as i32);
        }
    }
}
