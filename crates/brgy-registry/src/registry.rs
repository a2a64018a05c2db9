use crate::form::ResidentForm;
use crate::record::RegisteredResident;
use crate::statistics::Demographics;
use crate::Error;

/// Runs submissions through assembly and validation before they reach the
/// store, and reads them back in typed form.
#[derive(Clone, Debug)]
pub struct Registry {
    store: brgy_db::Store,
}

impl Registry {
    pub fn new(store: brgy_db::Store) -> Self {
        Self { store }
    }

    #[tracing::instrument(skip(self, form))]
    pub fn register(&self, form: &ResidentForm) -> Result<RegisteredResident, Error> {
        let resident = form.assemble().inspect_err(|err| {
            tracing::warn!(field = %err.field, "registration rejected: {err}");
        })?;
        let row = self.store.register_resident((&resident).into())?;
        RegisteredResident::try_from(row)
    }

    #[tracing::instrument(skip(self, form))]
    pub fn update(&self, id: i32, form: &ResidentForm) -> Result<(), Error> {
        let resident = form.assemble().inspect_err(|err| {
            tracing::warn!(field = %err.field, "update rejected: {err}");
        })?;
        match self.store.update_resident(id, (&resident).into()) {
            Ok(()) => Ok(()),
            Err(brgy_db::Error::NotFound) => Err(Error::NotFound(id)),
            Err(err) => Err(err.into()),
        }
    }

    #[tracing::instrument(skip(self))]
    pub fn delete(&self, id: i32) -> Result<(), Error> {
        match self.store.delete_resident(id) {
            Ok(()) => Ok(()),
            Err(brgy_db::Error::NotFound) => Err(Error::NotFound(id)),
            Err(err) => Err(err.into()),
        }
    }

    #[tracing::instrument(skip(self))]
    pub fn get(&self, id: i32) -> Result<Option<RegisteredResident>, Error> {
        self.store
            .load_resident_by_id(id)?
            .map(RegisteredResident::try_from)
            .transpose()
    }

    /// Most recently registered first. Rows that cannot be read back are
    /// logged and left out.
    #[tracing::instrument(skip(self))]
    pub fn list(&self) -> Result<Vec<RegisteredResident>, Error> {
        Ok(readable(self.store.load_all_residents()?))
    }

    /// Matches surname or first name; a blank term lists everyone.
    #[tracing::instrument(skip(self))]
    pub fn search(&self, term: &str) -> Result<Vec<RegisteredResident>, Error> {
        let term = term.trim();
        if term.is_empty() {
            return self.list();
        }
        Ok(readable(self.store.search_residents_by_name(term)?))
    }

    /// Recomputed from the full record set on every call.
    #[tracing::instrument(skip(self))]
    pub fn demographics(&self) -> Result<Demographics, Error> {
        let rows = self.store.load_all_residents()?;
        Ok(Demographics::from_rows(&rows))
    }
}

fn readable(rows: Vec<brgy_db::models::Resident>) -> Vec<RegisteredResident> {
    rows.into_iter()
        .filter_map(|row| match RegisteredResident::try_from(row) {
            Ok(registered) => Some(registered),
            Err(err) => {
                tracing::warn!("skipping stored resident: {err}");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::choices::Sex;

    fn create_registry() -> (tempfile::TempDir, Registry) {
        let dir = tempfile::tempdir().expect("should create a temporary directory");
        let store = brgy_db::create(&brgy_db::Config {
            path: dir.path().join("registry.db"),
        })
        .expect("should create store");
        (dir, Registry::new(store))
    }

    fn form(surname: &str, firstname: &str, sex: Sex, age: u32) -> ResidentForm {
        ResidentForm {
            surname: surname.to_owned(),
            firstname: firstname.to_owned(),
            sex: Some(sex.name().to_owned()),
            dob: Some(jiff::civil::date(1990, 6, 12)),
            age,
            street: Some("Gold Street".to_owned()),
            contact_number: "09171234567".to_owned(),
            ..Default::default()
        }
    }

    #[test]
    fn it_registers_and_lists_the_newest_first() {
        let (_dir, registry) = create_registry();
        registry
            .register(&form("Santos", "Maria", Sex::Female, 30))
            .expect("should register");
        let juan = registry
            .register(&form("Dela Cruz", "Juan", Sex::Male, 34))
            .expect("should register");
        let listed = registry.list().expect("should list");
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0], juan, "latest registration should come first");
    }

    #[test]
    fn it_round_trips_every_field() {
        let (_dir, registry) = create_registry();
        let submitted = ResidentForm {
            middlename: "Reyes".to_owned(),
            birthplace: "Davao City".to_owned(),
            civil_status: Some("Married".to_owned()),
            nationality: "Filipino".to_owned(),
            email: "juan@example.com".to_owned(),
            years_residency: 20,
            voter_id: "1234-5678-9012".to_owned(),
            household_relation: Some("Head of Family".to_owned()),
            emergency_name: "Ana Dela Cruz".to_owned(),
            emergency_relation: Some("Spouse".to_owned()),
            emergency_contact: "09181234567".to_owned(),
            ..form("Dela Cruz", "Juan", Sex::Male, 34)
        };
        let expected = submitted.assemble().unwrap();
        let registered = registry.register(&submitted).unwrap();
        let loaded = registry
            .get(registered.id)
            .expect("should load")
            .expect("should exist");
        assert_eq!(loaded.resident, expected);
        assert!(loaded.created_at.is_some());
    }

    #[test]
    fn it_persists_nothing_when_validation_fails() {
        let (_dir, registry) = create_registry();
        let result = registry.register(&ResidentForm {
            contact_number: "12345".to_owned(),
            ..form("Dela Cruz", "Juan", Sex::Male, 34)
        });
        match result {
            Err(Error::Validation(err)) => {
                assert!(err.reason.contains("must be exactly 11 digits"))
            }
            other => panic!("expected validation error, got {other:?}"),
        }
        assert!(registry.list().unwrap().is_empty());
    }

    #[test]
    fn it_updates_and_deletes_existing_records() {
        let (_dir, registry) = create_registry();
        let juan = registry
            .register(&form("Dela Cruz", "Juan", Sex::Male, 34))
            .unwrap();
        let mut edited = ResidentForm::from(&juan.resident);
        edited.street = Some("Pearl Street".to_owned());
        edited.age = 35;
        registry.update(juan.id, &edited).expect("should update");
        let loaded = registry.get(juan.id).unwrap().unwrap();
        assert_eq!(loaded.resident.age, 35);
        assert_eq!(loaded.resident.street.name(), "Pearl Street");

        registry.delete(juan.id).expect("should delete");
        assert_eq!(registry.get(juan.id).unwrap(), None);
    }

    #[test]
    fn it_reports_missing_ids() {
        let (_dir, registry) = create_registry();
        assert!(matches!(
            registry.update(99, &form("A", "B", Sex::Male, 1)),
            Err(Error::NotFound(99))
        ));
        assert!(matches!(registry.delete(99), Err(Error::NotFound(99))));
    }

    #[test]
    fn it_rejects_invalid_updates_before_touching_the_store() {
        let (_dir, registry) = create_registry();
        let juan = registry
            .register(&form("Dela Cruz", "Juan", Sex::Male, 34))
            .unwrap();
        let mut edited = ResidentForm::from(&juan.resident);
        edited.surname = "  ".to_owned();
        assert!(matches!(
            registry.update(juan.id, &edited),
            Err(Error::Validation(_))
        ));
        assert_eq!(registry.get(juan.id).unwrap().unwrap(), juan);
    }

    #[test]
    fn it_searches_names_and_lists_all_for_blank_terms() {
        let (_dir, registry) = create_registry();
        registry
            .register(&form("Dela Cruz", "Juan", Sex::Male, 34))
            .unwrap();
        registry
            .register(&form("Santos", "Maria", Sex::Female, 30))
            .unwrap();
        let found = registry.search("  santos ").unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].resident.firstname, "Maria");
        assert_eq!(registry.search("   ").unwrap().len(), 2);
    }

    #[test]
    fn it_skips_unreadable_rows_but_still_counts_them() {
        let (_dir, registry) = create_registry();
        let juan = registry
            .register(&form("Dela Cruz", "Juan", Sex::Male, 34))
            .unwrap();
        let legacy = registry
            .store
            .register_resident(brgy_db::models::ResidentFields {
                surname: "Santos".to_owned(),
                firstname: "Maria".to_owned(),
                sex: "Female".to_owned(),
                dob: "15/08/1950".to_owned(),
                age: 74,
                street: "Select Street".to_owned(),
                ..Default::default()
            })
            .expect("store should accept the row as is");

        let listed = registry.list().expect("should list");
        assert_eq!(listed, vec![juan]);
        assert!(registry.search("santos").unwrap().is_empty());
        assert!(matches!(
            registry.get(legacy.id),
            Err(Error::InvalidStoredValue { field: "street", .. })
        ));

        let demographics = registry.demographics().expect("should compute");
        assert_eq!(
            (demographics.total, demographics.male, demographics.female),
            (2, 1, 1)
        );
        assert_eq!(demographics.age_groups[&crate::AgeBucket::Senior], 1);
    }

    #[test]
    fn it_computes_demographics_from_the_store() {
        let (_dir, registry) = create_registry();
        for (name, sex, age) in [
            ("A", Sex::Male, 16),
            ("B", Sex::Female, 45),
            ("C", Sex::Male, 61),
        ] {
            registry.register(&form(name, name, sex, age)).unwrap();
        }
        let demographics = registry.demographics().unwrap();
        assert_eq!(
            (demographics.total, demographics.male, demographics.female),
            (3, 2, 1)
        );
        assert_eq!(
            demographics.age_groups.values().copied().collect::<Vec<_>>(),
            vec![1, 0, 1, 0, 1]
        );
    }
}
