use crate::choices::Sex;
use crate::record::{stored_years, Resident};
use std::collections::BTreeMap;

/// Age ranges of the distribution chart. Variant order is chart order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AgeBucket {
    Minor,
    YoungAdult,
    Adult,
    MiddleAged,
    Senior,
}

impl AgeBucket {
    pub const ALL: [AgeBucket; 5] = [
        AgeBucket::Minor,
        AgeBucket::YoungAdult,
        AgeBucket::Adult,
        AgeBucket::MiddleAged,
        AgeBucket::Senior,
    ];

    /// Upper bounds are inclusive: 17, 30, 45 and 60 fall in the lower bucket.
    pub fn for_age(age: u8) -> Self {
        match age {
            0..=17 => AgeBucket::Minor,
            18..=30 => AgeBucket::YoungAdult,
            31..=45 => AgeBucket::Adult,
            46..=60 => AgeBucket::MiddleAged,
            _ => AgeBucket::Senior,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AgeBucket::Minor => "0-17",
            AgeBucket::YoungAdult => "18-30",
            AgeBucket::Adult => "31-45",
            AgeBucket::MiddleAged => "46-60",
            AgeBucket::Senior => "61+",
        }
    }
}

impl std::fmt::Display for AgeBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Population figures behind the statistics view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Demographics {
    pub total: usize,
    pub male: usize,
    pub female: usize,
    pub age_groups: BTreeMap<AgeBucket, usize>,
}

impl Demographics {
    fn new() -> Self {
        Self {
            total: 0,
            male: 0,
            female: 0,
            age_groups: AgeBucket::ALL.iter().map(|bucket| (*bucket, 0)).collect(),
        }
    }

    pub fn from_residents<'a>(residents: impl IntoIterator<Item = &'a Resident>) -> Self {
        residents
            .into_iter()
            .fold(Self::new(), |mut demographics, resident| {
                demographics.count(Some(resident.sex), Some(resident.age));
                demographics
            })
    }

    /// Counts stored rows directly. Only sex and age are read, so a row whose
    /// other fields cannot be decoded still counts; a row with an unknown sex
    /// or an out of range age counts toward the total only.
    pub fn from_rows<'a>(rows: impl IntoIterator<Item = &'a brgy_db::models::Resident>) -> Self {
        rows.into_iter()
            .fold(Self::new(), |mut demographics, row| {
                let sex = row.sex.as_deref().map(str::trim).and_then(Sex::from_name);
                let age = stored_years(row.age);
                if sex.is_none() || age.is_none() {
                    tracing::debug!(id = row.id, "resident counted without sex or age");
                }
                demographics.count(sex, age);
                demographics
            })
    }

    fn count(&mut self, sex: Option<Sex>, age: Option<u8>) {
        self.total += 1;
        match sex {
            Some(Sex::Male) => self.male += 1,
            Some(Sex::Female) => self.female += 1,
            None => (),
        }
        if let Some(age) = age {
            *self.age_groups.entry(AgeBucket::for_age(age)).or_insert(0) += 1;
        }
    }

    /// Percentage of the population with the given sex, `None` with no data.
    pub fn share(&self, sex: Sex) -> Option<f64> {
        let count = match sex {
            Sex::Male => self.male,
            Sex::Female => self.female,
        };
        (self.total > 0).then(|| count as f64 * 100.0 / self.total as f64)
    }

    pub fn largest_age_group(&self) -> usize {
        self.age_groups.values().copied().max().unwrap_or(0)
    }
}
