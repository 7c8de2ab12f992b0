use jiff::Unit;
use jiff::civil::Date;

use crate::error::CoreError;

/// Completed years between a date of birth and the date of testing.
///
/// Both dates are ISO `YYYY-MM-DD`, as produced by the form's date inputs.
/// A birthday not yet reached in the testing year does not count.
pub fn completed_years(dob: &str, tested_on: &str) -> Result<i16, CoreError> {
    let birth = parse_date(dob)?;
    let testing = parse_date(tested_on)?;

    if birth > testing {
        return Err(CoreError::BirthAfterTesting {
            dob: dob.trim().to_string(),
            tested_on: tested_on.trim().to_string(),
        });
    }

    let span = birth
        .until((Unit::Year, testing))
        .map_err(|e| CoreError::InvalidDate {
            value: tested_on.to_string(),
            reason: e.to_string(),
        })?;

    Ok(span.get_years())
}

fn parse_date(value: &str) -> Result<Date, CoreError> {
    value
        .trim()
        .parse::<Date>()
        .map_err(|e| CoreError::InvalidDate {
            value: value.to_string(),
            reason: e.to_string(),
        })
}
