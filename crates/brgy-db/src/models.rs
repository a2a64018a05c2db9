use diesel::prelude::*;

/// A `residents` row as stored. Every column besides the names is nullable so
/// that rows written by earlier releases can still be loaded.
#[derive(Identifiable, Queryable, Selectable, Clone, Debug, PartialEq, Eq)]
#[diesel(table_name = crate::schema::residents)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Resident {
    pub id: i32,
    pub surname: String,
    pub firstname: String,
    pub middlename: Option<String>,
    pub sex: Option<String>,
    pub dob: Option<String>,
    pub age: Option<i32>,
    pub birthplace: Option<String>,
    pub civil_status: Option<String>,
    pub nationality: Option<String>,
    pub street: Option<String>,
    pub contact_number: Option<String>,
    pub email: Option<String>,
    pub years_residency: Option<i32>,
    pub voter_id: Option<String>,
    pub household_relation: Option<String>,
    pub emergency_name: Option<String>,
    pub emergency_relation: Option<String>,
    pub emergency_contact: Option<String>,
    pub created_at: Option<String>,
}

/// The eighteen resident attributes written on both registration and update.
#[derive(Insertable, AsChangeset, Clone, Debug, Default, PartialEq, Eq)]
#[diesel(table_name = crate::schema::residents)]
pub struct ResidentFields {
    pub surname: String,
    pub firstname: String,
    pub middlename: String,
    pub sex: String,
    pub dob: String,
    pub age: i32,
    pub birthplace: String,
    pub civil_status: String,
    pub nationality: String,
    pub street: String,
    pub contact_number: String,
    pub email: String,
    pub years_residency: i32,
    pub voter_id: String,
    pub household_relation: String,
    pub emergency_name: String,
    pub emergency_relation: String,
    pub emergency_contact: String,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::residents)]
pub struct NewResident {
    #[diesel(embed)]
    pub fields: ResidentFields,
    pub created_at: String,
}
