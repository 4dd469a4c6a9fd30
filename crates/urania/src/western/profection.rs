//! Annual profections: one house per year of life, counted from the Ascendant.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::rulers::sign_ruler;
use super::sign::Sign;
use crate::ephemeris::Body;
use crate::error::InputError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfectionYear {
    /// Profected house, 1-12
    pub profection_year: u8,
    pub profection_sign: Sign,
    pub lord_of_year: Body,
}

/// Completed years between `birth` and `on_date`.
pub fn age_in_years(birth: NaiveDate, on_date: NaiveDate) -> Result<u32, InputError> {
    if on_date < birth {
        return Err(InputError::InvalidDate(format!(
            "{on_date} is before the birth date {birth}"
        )));
    }
    let mut age = on_date.year() - birth.year();
    if (on_date.month(), on_date.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    Ok(age as u32)
}

/// The profected year in force on `on_date` for a chart rising in `ascendant`.
pub fn profection(
    ascendant: Sign,
    birth: NaiveDate,
    on_date: NaiveDate,
) -> Result<ProfectionYear, InputError> {
    let age = age_in_years(birth, on_date)?;
    let profection_year = (age % 12) as u8 + 1;
    let profection_sign = ascendant.offset(profection_year as usize - 1);
    Ok(ProfectionYear {
        profection_year,
        profection_sign,
        lord_of_year: sign_ruler(profection_sign),
    })
}
