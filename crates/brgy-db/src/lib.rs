use diesel::prelude::*;
use std::path::PathBuf;

pub mod models;
mod schema;
mod sql_functions;

const CREATE_RESIDENTS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS residents (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        surname TEXT NOT NULL,
        firstname TEXT NOT NULL,
        middlename TEXT,
        sex TEXT,
        dob TEXT,
        age INTEGER,
        birthplace TEXT,
        civil_status TEXT,
        nationality TEXT,
        street TEXT,
        contact_number TEXT,
        email TEXT,
        years_residency INTEGER,
        voter_id TEXT,
        household_relation TEXT,
        emergency_name TEXT,
        emergency_relation TEXT,
        emergency_contact TEXT,
        created_at TEXT DEFAULT CURRENT_TIMESTAMP
    )
"#;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("opening database {path}: {source}")]
    Connection {
        path: String,
        #[source]
        source: diesel::ConnectionError,
    },
    #[error("result failure: {0}")]
    Result(#[from] diesel::result::Error),
    #[error("Not Found")]
    NotFound,
}

/// Handle on the resident database. Holds no open connection: every operation
/// opens the file, runs to completion and closes it again.
#[derive(Clone, Debug)]
pub struct Store {
    database_url: String,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    #[serde(default = "default_database_path")]
    pub path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            path: default_database_path(),
        }
    }
}

fn default_database_path() -> PathBuf {
    PathBuf::from("barangay_registration.db")
}

#[tracing::instrument(skip(config), fields(path = %config.path.display()))]
pub fn create(config: &Config) -> Result<Store, Error> {
    let store = Store {
        database_url: config.path.to_string_lossy().into_owned(),
    };
    let mut conn = store.connection()?;
    diesel::sql_query(CREATE_RESIDENTS_TABLE).execute(&mut conn)?;
    Ok(store)
}

impl Store {
    fn connection(&self) -> Result<SqliteConnection, Error> {
        let mut conn =
            SqliteConnection::establish(&self.database_url).map_err(|source| Error::Connection {
                path: self.database_url.clone(),
                source,
            })?;
        sql_functions::register(&mut conn)?;
        Ok(conn)
    }

    #[tracing::instrument(skip(self, fields))]
    pub fn register_resident(
        &self,
        fields: models::ResidentFields,
    ) -> Result<models::Resident, Error> {
        use schema::residents;
        let new_resident = models::NewResident {
            fields,
            created_at: jiff::Timestamp::now().to_string(),
        };
        let mut conn = self.connection()?;
        let created = diesel::insert_into(residents::table)
            .values(new_resident)
            .returning(models::Resident::as_returning())
            .get_result(&mut conn)?;
        tracing::info!(id = created.id, "resident registered");
        Ok(created)
    }

    #[tracing::instrument(skip(self))]
    pub fn load_all_residents(&self) -> Result<Vec<models::Resident>, Error> {
        use schema::residents::dsl::*;
        let mut conn = self.connection()?;
        residents
            .order(id.desc())
            .select(models::Resident::as_select())
            .load(&mut conn)
            .map_err(Into::into)
    }

    #[tracing::instrument(skip(self))]
    pub fn load_resident_by_id(
        &self,
        resident_id: i32,
    ) -> Result<Option<models::Resident>, Error> {
        use schema::residents::dsl::*;
        let mut conn = self.connection()?;
        match residents
            .filter(id.eq(resident_id))
            .select(models::Resident::as_select())
            .first(&mut conn)
        {
            Ok(loaded) => Ok(Some(loaded)),
            Err(diesel::result::Error::NotFound) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    /// Case-insensitive substring match against surname or first name only.
    #[tracing::instrument(skip(self))]
    pub fn search_residents_by_name(
        &self,
        term: &str,
    ) -> Result<Vec<models::Resident>, Error> {
        use schema::residents::dsl::*;
        use sql_functions::fold_case;
        let pattern = format!("%{}%", escape_like(term));
        let mut conn = self.connection()?;
        residents
            .filter(
                fold_case(surname)
                    .like(fold_case(pattern.clone()))
                    .escape('\\')
                    .or(fold_case(firstname).like(fold_case(pattern)).escape('\\')),
            )
            .order(id.desc())
            .select(models::Resident::as_select())
            .load(&mut conn)
            .map_err(Into::into)
    }

    #[tracing::instrument(skip(self, fields))]
    pub fn update_resident(
        &self,
        resident_id: i32,
        fields: models::ResidentFields,
    ) -> Result<(), Error> {
        use schema::residents::dsl::*;
        let mut conn = self.connection()?;
        match diesel::update(residents.filter(id.eq(resident_id)))
            .set(fields)
            .execute(&mut conn)
        {
            Ok(0) => Err(Error::NotFound),
            Ok(_) => {
                tracing::info!("resident updated");
                Ok(())
            }
            Err(err) => Err(err.into()),
        }
    }

    #[tracing::instrument(skip(self))]
    pub fn delete_resident(&self, resident_id: i32) -> Result<(), Error> {
        use schema::residents::dsl::*;
        let mut conn = self.connection()?;
        match diesel::delete(residents.filter(id.eq(resident_id))).execute(&mut conn) {
            Ok(0) => Err(Error::NotFound),
            Ok(_) => {
                tracing::info!("resident deleted");
                Ok(())
            }
            Err(err) => Err(err.into()),
        }
    }
}

fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
