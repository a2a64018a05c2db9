// Mirrors the `residents` table created by `crate::CREATE_RESIDENTS_TABLE`.

diesel::table! {
    /// Contains one row per registered resident of the barangay
    residents (id) {
        id -> Integer,
        surname -> Text,
        firstname -> Text,
        middlename -> Nullable<Text>,
        sex -> Nullable<Text>,
        /// Date of birth as dd/mm/yyyy
        dob -> Nullable<Text>,
        age -> Nullable<Integer>,
        birthplace -> Nullable<Text>,
        civil_status -> Nullable<Text>,
        nationality -> Nullable<Text>,
        street -> Nullable<Text>,
        contact_number -> Nullable<Text>,
        email -> Nullable<Text>,
        years_residency -> Nullable<Integer>,
        voter_id -> Nullable<Text>,
        household_relation -> Nullable<Text>,
        emergency_name -> Nullable<Text>,
        emergency_relation -> Nullable<Text>,
        emergency_contact -> Nullable<Text>,
        created_at -> Nullable<Text>,
    }
}
