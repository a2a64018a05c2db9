use crate::choices::{
    unless_placeholder, CivilStatus, Sex, Street, SELECT_CIVIL_STATUS, SELECT_RELATION,
    SELECT_STREET,
};
use crate::record::Resident;
use crate::validation::{self, ValidationError};

/// Raw values as collected from the registration form or the update dialog.
/// Dropdowns that still show their placeholder are `None`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResidentForm {
    pub surname: String,
    pub firstname: String,
    pub middlename: String,
    pub sex: Option<String>,
    pub dob: Option<jiff::civil::Date>,
    pub age: u32,
    pub birthplace: String,
    pub civil_status: Option<String>,
    pub nationality: String,
    pub street: Option<String>,
    pub contact_number: String,
    pub email: String,
    pub years_residency: u32,
    pub voter_id: String,
    pub household_relation: Option<String>,
    pub emergency_name: String,
    pub emergency_relation: Option<String>,
    pub emergency_contact: String,
}

impl ResidentForm {
    /// Normalizes and validates the form. Checks run in a fixed order and the
    /// first failure is returned; nothing is accepted partially.
    pub fn assemble(&self) -> Result<Resident, ValidationError> {
        let surname = self.surname.trim();
        let firstname = self.firstname.trim();
        let contact_number = self.contact_number.trim();
        let emergency_contact = self.emergency_contact.trim();
        let email = self.email.trim();
        let voter_id = self.voter_id.trim();

        validation::validate_required_text(surname, "Surname")?;
        validation::validate_required_text(firstname, "First Name")?;

        let sex = validation::validate_required_dropdown(trimmed(&self.sex), "Sex")?;
        let sex = choose(sex, "Sex", Sex::from_name)?;
        let dob = validation::validate_required_dropdown(self.dob, "Date of Birth")?;
        let street = selected(&self.street, SELECT_STREET);
        let street = validation::validate_required_dropdown(street, "Street")?;
        let street = choose(&street, "Street", Street::from_name)?;
        let civil_status = selected(&self.civil_status, SELECT_CIVIL_STATUS)
            .map(|status| choose(&status, "Civil Status", CivilStatus::from_name))
            .transpose()?;

        validation::validate_required_text(contact_number, "Contact Number")?;
        validation::validate_phone(contact_number, "Contact Number")?;
        if !emergency_contact.is_empty() {
            validation::validate_phone(emergency_contact, "Emergency Contact Number")?;
        }
        validation::validate_email(email)?;
        validation::validate_voter_id(voter_id)?;

        let age = validation::validate_years(self.age, "Age")?;
        let years_residency =
            validation::validate_years(self.years_residency, "Years of Residency")?;

        Ok(Resident {
            surname: surname.to_owned(),
            firstname: firstname.to_owned(),
            middlename: self.middlename.trim().to_owned(),
            sex,
            dob,
            age,
            birthplace: self.birthplace.trim().to_owned(),
            civil_status,
            nationality: self.nationality.trim().to_owned(),
            street,
            contact_number: contact_number.to_owned(),
            email: email.to_owned(),
            years_residency,
            voter_id: voter_id.to_owned(),
            household_relation: selected(&self.household_relation, SELECT_RELATION)
                .unwrap_or_default(),
            emergency_name: self.emergency_name.trim().to_owned(),
            emergency_relation: selected(&self.emergency_relation, SELECT_RELATION)
                .unwrap_or_default(),
            emergency_contact: emergency_contact.to_owned(),
        })
    }
}

/// Prefills the update dialog from a stored resident.
impl From<&Resident> for ResidentForm {
    fn from(resident: &Resident) -> Self {
        let unless_empty = |text: &str| (!text.is_empty()).then(|| text.to_owned());
        Self {
            surname: resident.surname.clone(),
            firstname: resident.firstname.clone(),
            middlename: resident.middlename.clone(),
            sex: Some(resident.sex.name().to_owned()),
            dob: Some(resident.dob),
            age: u32::from(resident.age),
            birthplace: resident.birthplace.clone(),
            civil_status: resident.civil_status.map(|status| status.name().to_owned()),
            nationality: resident.nationality.clone(),
            street: Some(resident.street.name().to_owned()),
            contact_number: resident.contact_number.clone(),
            email: resident.email.clone(),
            years_residency: u32::from(resident.years_residency),
            voter_id: resident.voter_id.clone(),
            household_relation: unless_empty(&resident.household_relation),
            emergency_name: resident.emergency_name.clone(),
            emergency_relation: unless_empty(&resident.emergency_relation),
            emergency_contact: resident.emergency_contact.clone(),
        }
    }
}

fn trimmed(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|text| !text.is_empty())
}

fn selected(value: &Option<String>, placeholder: &str) -> Option<String> {
    value
        .as_deref()
        .and_then(|text| unless_placeholder(text, placeholder))
}

fn choose<T>(
    name: &str,
    field_label: &str,
    from_name: fn(&str) -> Option<T>,
) -> Result<T, ValidationError> {
    from_name(name).ok_or_else(|| {
        ValidationError::new(
            field_label,
            format!("'{name}' is not a valid {}.", field_label.to_lowercase()),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn juan() -> ResidentForm {
        ResidentForm {
            surname: "Dela Cruz".to_owned(),
            firstname: "Juan".to_owned(),
            sex: Some("Male".to_owned()),
            dob: Some(jiff::civil::date(1990, 1, 15)),
            street: Some("Gold Street".to_owned()),
            contact_number: "09171234567".to_owned(),
            ..Default::default()
        }
    }

    fn rejected(form: ResidentForm) -> ValidationError {
        form.assemble().expect_err("form should be rejected")
    }

    #[test]
    fn it_accepts_a_minimal_submission() {
        let resident = juan().assemble().expect("form should be accepted");
        assert_eq!(resident.surname, "Dela Cruz");
        assert_eq!(resident.street, Street::Gold);
        assert_eq!(resident.civil_status, None);
        assert_eq!(resident.household_relation, "");
        assert_eq!(resident.emergency_relation, "");
    }

    #[test]
    fn it_trims_free_text() {
        let resident = ResidentForm {
            surname: "  Dela Cruz ".to_owned(),
            middlename: " Reyes ".to_owned(),
            birthplace: " Davao City".to_owned(),
            nationality: " Filipino ".to_owned(),
            email: " juan@example.com ".to_owned(),
            household_relation: Some(" Head of Family ".to_owned()),
            ..juan()
        }
        .assemble()
        .expect("form should be accepted");
        assert_eq!(resident.surname, "Dela Cruz");
        assert_eq!(resident.middlename, "Reyes");
        assert_eq!(resident.birthplace, "Davao City");
        assert_eq!(resident.nationality, "Filipino");
        assert_eq!(resident.email, "juan@example.com");
        assert_eq!(resident.household_relation, "Head of Family");
    }

    #[test]
    fn it_rejects_a_short_contact_number() {
        let err = rejected(ResidentForm {
            contact_number: "12345".to_owned(),
            ..juan()
        });
        assert_eq!(err.field, "Contact Number");
        assert!(err.reason.contains("must be exactly 11 digits"));
    }

    #[test]
    fn it_requires_a_street() {
        let err = rejected(ResidentForm {
            street: None,
            ..juan()
        });
        assert_eq!(err.to_string(), "Please select a street.");
    }

    #[test]
    fn it_treats_placeholders_as_unselected() {
        let err = rejected(ResidentForm {
            street: Some("Select Street".to_owned()),
            ..juan()
        });
        assert_eq!(err.to_string(), "Please select a street.");
        let resident = ResidentForm {
            civil_status: Some("Select Civil Status".to_owned()),
            household_relation: Some("Select Relation".to_owned()),
            emergency_relation: Some("Select Relation".to_owned()),
            ..juan()
        }
        .assemble()
        .expect("placeholders on optional dropdowns should be accepted");
        assert_eq!(resident.civil_status, None);
        assert_eq!(resident.household_relation, "");
        assert_eq!(resident.emergency_relation, "");
    }

    #[test]
    fn it_rejects_unknown_choices() {
        let err = rejected(ResidentForm {
            street: Some("Copper Street".to_owned()),
            ..juan()
        });
        assert_eq!(err.to_string(), "'Copper Street' is not a valid street.");
        let err = rejected(ResidentForm {
            civil_status: Some("Complicated".to_owned()),
            ..juan()
        });
        assert_eq!(err.field, "Civil Status");
    }

    #[test]
    fn it_requires_a_contact_number() {
        let err = rejected(ResidentForm {
            contact_number: String::new(),
            ..juan()
        });
        assert_eq!(err.to_string(), "Contact Number is required.");
    }

    #[test]
    fn it_stops_at_the_first_failure_in_order() {
        let everything_wrong = ResidentForm {
            firstname: " ".to_owned(),
            street: None,
            contact_number: "123".to_owned(),
            email: "nope".to_owned(),
            voter_id: "12".to_owned(),
            ..juan()
        };
        assert_eq!(rejected(everything_wrong.clone()).field, "First Name");
        let err = rejected(ResidentForm {
            firstname: "Juan".to_owned(),
            ..everything_wrong.clone()
        });
        assert_eq!(err.field, "Street");
        let err = rejected(ResidentForm {
            firstname: "Juan".to_owned(),
            street: Some("Gold Street".to_owned()),
            ..everything_wrong.clone()
        });
        assert_eq!(err.field, "Contact Number");
        let err = rejected(ResidentForm {
            firstname: "Juan".to_owned(),
            street: Some("Gold Street".to_owned()),
            contact_number: "09171234567".to_owned(),
            emergency_contact: "0817".to_owned(),
            ..everything_wrong.clone()
        });
        assert_eq!(err.field, "Emergency Contact Number");
        let err = rejected(ResidentForm {
            firstname: "Juan".to_owned(),
            street: Some("Gold Street".to_owned()),
            contact_number: "09171234567".to_owned(),
            ..everything_wrong
        });
        assert_eq!(err.field, "Email Address");
    }

    #[test]
    fn it_checks_voter_id_and_ranges_last() {
        let err = rejected(ResidentForm {
            voter_id: "12-34".to_owned(),
            age: 200,
            ..juan()
        });
        assert_eq!(err.field, "Voter's ID");
        let err = rejected(ResidentForm {
            years_residency: 121,
            ..juan()
        });
        assert_eq!(err.field, "Years of Residency");
    }

    #[test]
    fn it_prefills_from_a_stored_resident() {
        let resident = ResidentForm {
            civil_status: Some("Married".to_owned()),
            emergency_relation: Some("Spouse".to_owned()),
            ..juan()
        }
        .assemble()
        .unwrap();
        let form = ResidentForm::from(&resident);
        assert_eq!(form.household_relation, None);
        assert_eq!(form.emergency_relation.as_deref(), Some("Spouse"));
        assert_eq!(form.assemble(), Ok(resident));
    }
}
