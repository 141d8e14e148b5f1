use anchor_lang::prelude::*;
use crate::errors::HashValleyError;

const HOUR: i64 = 60 * 60;

pub const LOCATION_INDEX: usize = 0;
pub const ELEVATION_INDEX: usize = 1;
pub const SOIL_INDEX: usize = 2;
pub const EXPOSURE_INDEX: usize = 3;

pub const MAX_ATTRIBUTES: usize = 4;
pub const MAX_ELEVATION: u8 = 250;
pub const MAX_EXPOSURE: u8 = 3;

pub struct Climate {
    pub name: &'static str,
    /// Island climates carry a fourth attribute (wind exposure)
    pub attribute_count: usize,
    pub min_water_hours: i64,
    pub water_window_hours: i64,
}

const fn climate(
    name: &'static str,
    attribute_count: usize,
    min_water_hours: i64,
    water_window_hours: i64,
) -> Climate {
    Climate { name, attribute_count, min_water_hours, water_window_hours }
}

pub const CLIMATES: [Climate; 15] = [
    climate("Bordeaux", 3, 24, 24),
    climate("Napa", 3, 20, 20),
    climate("Mendoza", 3, 18, 18),
    climate("Barossa", 3, 18, 20),
    climate("Tuscany", 3, 22, 24),
    climate("Rioja", 3, 22, 22),
    climate("Douro", 3, 20, 22),
    climate("Mosel", 3, 28, 30),
    climate("Marlborough", 3, 26, 26),
    climate("Stellenbosch", 3, 20, 24),
    climate("Willamette", 3, 28, 28),
    climate("Champagne", 3, 30, 30),
    climate("Burgundy", 3, 24, 24),
    climate("Santorini", 4, 16, 16),
    climate("Canary Islands", 4, 16, 18),
];

/// Extra hours of tolerance each soil type adds to the watering window
/// (clay, loam, silt, chalk, gravel, sand)
pub const SOIL_RETENTION_HOURS: [i64; 6] = [6, 3, 2, 1, 0, -4];

/// Checks the attribute count against the location's climate and range-checks
/// every value.
pub fn validate_attributes(attributes: &[u8]) -> Result<()> {
    require!(attributes.len() >= 3, HashValleyError::WrongParamCount);

    let location = attributes[LOCATION_INDEX] as usize;
    require!(location < CLIMATES.len(), HashValleyError::AttributeOutOfRange);
    require!(
        attributes.len() == CLIMATES[location].attribute_count,
        HashValleyError::WrongParamCount
    );

    require!(
        attributes[ELEVATION_INDEX] <= MAX_ELEVATION,
        HashValleyError::AttributeOutOfRange
    );
    require!(
        (attributes[SOIL_INDEX] as usize) < SOIL_RETENTION_HOURS.len(),
        HashValleyError::AttributeOutOfRange
    );
    if let Some(&exposure) = attributes.get(EXPOSURE_INDEX) {
        require!(exposure <= MAX_EXPOSURE, HashValleyError::AttributeOutOfRange);
    }

    Ok(())
}

fn climate_of(attributes: &[u8]) -> &'static Climate {
    let location = attributes.get(LOCATION_INDEX).copied().unwrap_or(0) as usize;
    &CLIMATES[location.min(CLIMATES.len() - 1)]
}

pub fn climate_name(attributes: &[u8]) -> &'static str {
    climate_of(attributes).name
}

/// Minimum gap between two waterings
pub fn min_water_time(attributes: &[u8]) -> i64 {
    climate_of(attributes).min_water_hours * HOUR
}

/// Tolerance after `min_water_time` during which a late watering is accepted
pub fn water_window(attributes: &[u8]) -> i64 {
    let soil = attributes.get(SOIL_INDEX).copied().unwrap_or(0) as usize;
    let retention = SOIL_RETENTION_HOURS[soil.min(SOIL_RETENTION_HOURS.len() - 1)];
    (climate_of(attributes).water_window_hours + retention) * HOUR
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{code_of, error_code};

    #[test]
    fn test_attribute_count() {
        assert!(validate_attributes(&[12, 13, 4]).is_ok());
        assert!(validate_attributes(&[13, 40, 1, 2]).is_ok());

        let too_many = validate_attributes(&[1, 2, 3, 4]).unwrap_err();
        assert_eq!(error_code(too_many), code_of(HashValleyError::WrongParamCount));
        let too_few = validate_attributes(&[1, 2]).unwrap_err();
        assert_eq!(error_code(too_few), code_of(HashValleyError::WrongParamCount));
        let island_short = validate_attributes(&[14, 2, 3]).unwrap_err();
        assert_eq!(error_code(island_short), code_of(HashValleyError::WrongParamCount));
    }

    #[test]
    fn test_attribute_ranges() {
        for attributes in [&[15u8, 0, 0][..], &[0, 251, 0][..], &[0, 0, 6][..], &[13, 0, 0, 4][..]] {
            let err = validate_attributes(attributes).unwrap_err();
            assert_eq!(error_code(err), code_of(HashValleyError::AttributeOutOfRange));
        }
        assert!(validate_attributes(&[12, 250, 5]).is_ok());
    }

    #[test]
    fn test_burgundy_gravel_waters_daily() {
        assert_eq!(climate_name(&[12, 13, 4]), "Burgundy");
        assert_eq!(min_water_time(&[12, 13, 4]), 24 * HOUR);
        assert_eq!(water_window(&[12, 13, 4]), 24 * HOUR);
    }

    #[test]
    fn test_soil_changes_window_only() {
        assert_eq!(min_water_time(&[0, 0, 0]), min_water_time(&[0, 0, 5]));
        assert_eq!(water_window(&[0, 0, 0]), 30 * HOUR);
        assert_eq!(water_window(&[0, 0, 5]), 20 * HOUR);
    }
}
