use crate::choices::{CivilStatus, Sex, Street, SELECT_CIVIL_STATUS};
use crate::Error;
use jiff::civil::{Date, DateTime};

/// Day/month/year, the textual form a date of birth is persisted in.
pub const DOB_FORMAT: &str = "%d/%m/%Y";

/// A resident's registration data in canonical shape: trimmed, validated and
/// with every unselected dropdown turned into an empty value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resident {
    pub surname: String,
    pub firstname: String,
    pub middlename: String,
    pub sex: Sex,
    pub dob: Date,
    pub age: u8,
    pub birthplace: String,
    pub civil_status: Option<CivilStatus>,
    pub nationality: String,
    pub street: Street,
    pub contact_number: String,
    pub email: String,
    pub years_residency: u8,
    pub voter_id: String,
    pub household_relation: String,
    pub emergency_name: String,
    pub emergency_relation: String,
    pub emergency_contact: String,
}

/// A resident as read back from the store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegisteredResident {
    pub id: i32,
    pub created_at: Option<jiff::Timestamp>,
    pub resident: Resident,
}

pub fn format_dob(dob: Date) -> String {
    dob.strftime(DOB_FORMAT).to_string()
}

pub fn parse_dob(text: &str) -> Option<Date> {
    Date::strptime(DOB_FORMAT, text).ok()
}

impl From<&Resident> for brgy_db::models::ResidentFields {
    fn from(resident: &Resident) -> Self {
        Self {
            surname: resident.surname.clone(),
            firstname: resident.firstname.clone(),
            middlename: resident.middlename.clone(),
            sex: resident.sex.name().to_owned(),
            dob: format_dob(resident.dob),
            age: i32::from(resident.age),
            birthplace: resident.birthplace.clone(),
            civil_status: resident
                .civil_status
                .map(|status| status.name().to_owned())
                .unwrap_or_default(),
            nationality: resident.nationality.clone(),
            street: resident.street.name().to_owned(),
            contact_number: resident.contact_number.clone(),
            email: resident.email.clone(),
            years_residency: i32::from(resident.years_residency),
            voter_id: resident.voter_id.clone(),
            household_relation: resident.household_relation.clone(),
            emergency_name: resident.emergency_name.clone(),
            emergency_relation: resident.emergency_relation.clone(),
            emergency_contact: resident.emergency_contact.clone(),
        }
    }
}

impl TryFrom<brgy_db::models::Resident> for RegisteredResident {
    type Error = Error;

    fn try_from(row: brgy_db::models::Resident) -> Result<Self, Self::Error> {
        let id = row.id;
        let invalid = |field: &'static str, value: Option<String>| Error::InvalidStoredValue {
            id,
            field,
            value: value.unwrap_or_default(),
        };
        let sex = match row.sex.as_deref().and_then(Sex::from_name) {
            Some(sex) => sex,
            None => return Err(invalid("sex", row.sex.clone())),
        };
        let dob = match row.dob.as_deref().and_then(parse_dob) {
            Some(dob) => dob,
            None => return Err(invalid("dob", row.dob.clone())),
        };
        let street = match row.street.as_deref().and_then(Street::from_name) {
            Some(street) => street,
            None => return Err(invalid("street", row.street.clone())),
        };
        let civil_status = match row.civil_status.as_deref() {
            None | Some("") | Some(SELECT_CIVIL_STATUS) => None,
            Some(name) => match CivilStatus::from_name(name) {
                Some(status) => Some(status),
                None => return Err(invalid("civil_status", row.civil_status.clone())),
            },
        };
        let age = stored_years(row.age)
            .ok_or_else(|| invalid("age", row.age.map(|v| v.to_string())))?;
        let years_residency = stored_years(row.years_residency).ok_or_else(|| {
            invalid(
                "years_residency",
                row.years_residency.map(|v| v.to_string()),
            )
        })?;
        let created_at = match row.created_at.as_deref() {
            None => None,
            Some(text) => match parse_created_at(text) {
                Some(timestamp) => Some(timestamp),
                None => return Err(invalid("created_at", row.created_at.clone())),
            },
        };
        Ok(Self {
            id,
            created_at,
            resident: Resident {
                surname: row.surname,
                firstname: row.firstname,
                middlename: row.middlename.unwrap_or_default(),
                sex,
                dob,
                age,
                birthplace: row.birthplace.unwrap_or_default(),
                civil_status,
                nationality: row.nationality.unwrap_or_default(),
                street,
                contact_number: row.contact_number.unwrap_or_default(),
                email: row.email.unwrap_or_default(),
                years_residency,
                voter_id: row.voter_id.unwrap_or_default(),
                household_relation: row.household_relation.unwrap_or_default(),
                emergency_name: row.emergency_name.unwrap_or_default(),
                emergency_relation: row.emergency_relation.unwrap_or_default(),
                emergency_contact: row.emergency_contact.unwrap_or_default(),
            },
        })
    }
}

pub(crate) fn stored_years(value: Option<i32>) -> Option<u8> {
    match value {
        None => Some(0),
        Some(years) => u8::try_from(years).ok(),
    }
}

// Rows written by SQLite's CURRENT_TIMESTAMP default carry a UTC civil
// datetime without an offset.
fn parse_created_at(text: &str) -> Option<jiff::Timestamp> {
    if let Ok(timestamp) = text.parse::<jiff::Timestamp>() {
        return Some(timestamp);
    }
    text.parse::<DateTime>()
        .ok()?
        .to_zoned(jiff::tz::TimeZone::UTC)
        .ok()
        .map(|zoned| zoned.timestamp())
}
