use diesel::sql_types::Text;

diesel::define_sql_function! {
    /// Full Unicode lowercase. SQLite's own `lower()` only folds ASCII, so
    /// this one is registered on every connection by [`crate::Store`].
    fn fold_case(x: Text) -> Text;
}

pub(crate) fn register(conn: &mut diesel::SqliteConnection) -> diesel::QueryResult<()> {
    fold_case_utils::register_impl(conn, |text: String| text.to_lowercase())
}
