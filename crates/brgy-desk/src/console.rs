use brgy_registry::choices::{self, Sex, Street};
use brgy_registry::navigation::{self, Action, Credentials, Navigator, Screen};
use brgy_registry::record::{format_dob, parse_dob};
use brgy_registry::{RegisteredResident, Registry, ResidentForm};
use itertools::Itertools;
use std::io::{BufRead, Write};

const BAR_WIDTH: usize = 30;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("input closed")]
    Closed,
    #[error("console i/o: {0}")]
    Io(#[from] std::io::Error),
}

/// Line-oriented front end: one prompt per form field, one command per line.
pub struct Console<R, W> {
    registry: Registry,
    navigator: Navigator,
    draft: ResidentForm,
    input: R,
    output: W,
}

enum Flow {
    Continue,
    Quit,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(registry: Registry, navigator: Navigator, input: R, output: W) -> Self {
        Self {
            registry,
            navigator,
            draft: ResidentForm::default(),
            input,
            output,
        }
    }

    pub fn run(mut self) -> Result<(), Error> {
        loop {
            let flow = match self.navigator.screen() {
                Screen::Main => self.main_menu(),
                Screen::Register => self.register(),
                Screen::AdminLogin => self.admin_login(),
                Screen::AdminDashboard => self.dashboard(),
                Screen::Statistics => self.statistics(),
            };
            match flow {
                Ok(Flow::Continue) => (),
                Ok(Flow::Quit) | Err(Error::Closed) => return Ok(()),
                Err(err) => return Err(err),
            }
        }
    }

    fn main_menu(&mut self) -> Result<Flow, Error> {
        writeln!(self.output, "\nBARANGAY REGISTRATION")?;
        writeln!(self.output, "1) Register  2) Admin  3) Statistics  q) Quit")?;
        let action = match self.ask(">")?.as_str() {
            "1" => Action::OpenRegister,
            "2" => Action::OpenAdminLogin,
            "3" => Action::OpenStatistics,
            "q" | "Q" => return Ok(Flow::Quit),
            _ => return Ok(Flow::Continue),
        };
        self.go(action)
    }

    fn register(&mut self) -> Result<Flow, Error> {
        writeln!(self.output, "\nREGISTRATION FORM  (Enter keeps a value, '-' clears it)")?;
        let draft = std::mem::take(&mut self.draft);
        let form = self.fill_form(&draft)?;
        match self.registry.register(&form) {
            Ok(registered) => {
                writeln!(
                    self.output,
                    "Successfully Registered! (record {})",
                    registered.id
                )?;
            }
            Err(err) => {
                self.report(err)?;
                self.draft = form;
            }
        }
        if self.ask("Enter to continue, 'b' to go back")? == "b" {
            self.draft = ResidentForm::default();
            return self.go(Action::Back);
        }
        Ok(Flow::Continue)
    }

    fn admin_login(&mut self) -> Result<Flow, Error> {
        writeln!(self.output, "\nADMIN LOGIN  (blank user name cancels)")?;
        let user_name = self.ask("Username")?;
        if user_name.trim().is_empty() {
            return self.go(Action::CancelLogin);
        }
        let pass_phrase = self.ask("Password")?;
        match self.navigator.apply(Action::SubmitCredentials(Credentials {
            user_name,
            pass_phrase,
        })) {
            Ok(_) => {
                let residents = self.registry.list();
                self.show_residents(residents)?;
            }
            Err(navigation::Error::InvalidCredentials) => writeln!(
                self.output,
                "Invalid username or password!\nPlease check your credentials and try again."
            )?,
            Err(err) => writeln!(self.output, "{err}")?,
        }
        Ok(Flow::Continue)
    }

    fn dashboard(&mut self) -> Result<Flow, Error> {
        writeln!(
            self.output,
            "\nlist | search <name> | update <id> | delete <id> | back"
        )?;
        let line = self.ask("admin>")?;
        let (command, argument) = match line.split_once(' ') {
            Some((command, argument)) => (command, argument.trim()),
            None => (line.as_str(), ""),
        };
        match command {
            "" | "list" => {
                let residents = self.registry.list();
                self.show_residents(residents)?;
            }
            "search" => {
                let residents = self.registry.search(argument);
                self.show_residents(residents)?;
            }
            "update" | "delete" => match argument.parse::<i32>() {
                Ok(id) if command == "update" => self.update(id)?,
                Ok(id) => self.delete(id)?,
                Err(_) => writeln!(self.output, "Please select a record to {command}.")?,
            },
            "back" => return self.go(Action::Back),
            other => writeln!(self.output, "Unknown command '{other}'.")?,
        }
        Ok(Flow::Continue)
    }

    fn update(&mut self, id: i32) -> Result<(), Error> {
        let registered = match self.registry.get(id) {
            Ok(Some(registered)) => registered,
            Ok(None) => {
                writeln!(self.output, "Record not found!")?;
                return Ok(());
            }
            Err(err) => return self.report(err),
        };
        let form = self.fill_form(&ResidentForm::from(&registered.resident))?;
        match self.registry.update(id, &form) {
            Ok(()) => writeln!(self.output, "Record updated successfully!")?,
            Err(err) => self.report(err)?,
        }
        Ok(())
    }

    fn delete(&mut self, id: i32) -> Result<(), Error> {
        if self.ask("Are you sure you want to delete this record? (y/n)")? != "y" {
            return Ok(());
        }
        match self.registry.delete(id) {
            Ok(()) => writeln!(self.output, "Record deleted successfully!")?,
            Err(err) => self.report(err)?,
        }
        Ok(())
    }

    fn statistics(&mut self) -> Result<Flow, Error> {
        writeln!(self.output, "\nBARANGAY STATISTICS")?;
        match self.registry.demographics() {
            Ok(demographics) if demographics.total == 0 => {
                writeln!(self.output, "Total Population: 0")?;
                writeln!(self.output, "No data available")?;
            }
            Ok(demographics) => {
                writeln!(self.output, "Total Population: {}", demographics.total)?;
                for (sex, count) in [
                    (Sex::Male, demographics.male),
                    (Sex::Female, demographics.female),
                ] {
                    let share = demographics.share(sex).unwrap_or_default();
                    writeln!(self.output, "{sex}: {count} ({share:.1}%)")?;
                }
                writeln!(self.output, "Age Distribution")?;
                let largest = demographics.largest_age_group().max(1);
                for (bucket, count) in &demographics.age_groups {
                    let bar = "#".repeat(count * BAR_WIDTH / largest);
                    writeln!(self.output, "  {:<6} {bar} {count}", bucket.label())?;
                }
            }
            Err(err) => self.report(err)?,
        }
        self.ask("Enter to go back")?;
        self.go(Action::Back)
    }

    fn fill_form(&mut self, current: &ResidentForm) -> Result<ResidentForm, Error> {
        let streets = Street::ALL.iter().map(|street| street.name()).collect_vec();
        let civil_statuses = choices::CivilStatus::ALL
            .iter()
            .map(|status| status.name())
            .collect_vec();
        let sexes = Sex::ALL.iter().map(|sex| sex.name()).collect_vec();
        Ok(ResidentForm {
            surname: self.text("Surname *", &current.surname)?,
            firstname: self.text("First Name *", &current.firstname)?,
            middlename: self.text("Middle Name", &current.middlename)?,
            sex: self.pick("Sex *", &sexes, current.sex.as_deref(), false)?,
            dob: self.date("Date of Birth * (dd/mm/yyyy)", current.dob)?,
            age: self.number("Age", current.age)?,
            birthplace: self.text("Place of Birth", &current.birthplace)?,
            civil_status: self.pick(
                "Civil Status",
                &civil_statuses,
                current.civil_status.as_deref(),
                false,
            )?,
            nationality: self
                .pick(
                    "Nationality",
                    choices::NATIONALITIES,
                    Some(current.nationality.as_str()).filter(|text| !text.is_empty()),
                    true,
                )?
                .unwrap_or_default(),
            street: self.pick("Street *", &streets, current.street.as_deref(), false)?,
            contact_number: self
                .text("Contact Number * (09XXXXXXXXX)", &current.contact_number)?,
            email: self.text("Email Address", &current.email)?,
            years_residency: self.number("Years of Residency", current.years_residency)?,
            voter_id: self.text("Voter's ID / No.", &current.voter_id)?,
            household_relation: self.pick(
                "Household Relation",
                choices::HOUSEHOLD_RELATIONS,
                current.household_relation.as_deref(),
                false,
            )?,
            emergency_name: self.text("Emergency Contact Name", &current.emergency_name)?,
            emergency_relation: self.pick(
                "Emergency Contact Relationship",
                choices::EMERGENCY_RELATIONS,
                current.emergency_relation.as_deref(),
                false,
            )?,
            emergency_contact: self.text(
                "Emergency Contact Number",
                &current.emergency_contact,
            )?,
        })
    }

    fn show_residents(
        &mut self,
        residents: Result<Vec<RegisteredResident>, brgy_registry::Error>,
    ) -> Result<(), Error> {
        let residents = match residents {
            Ok(residents) => residents,
            Err(err) => return self.report(err),
        };
        if residents.is_empty() {
            writeln!(self.output, "No records.")?;
        }
        for RegisteredResident { id, resident, .. } in &residents {
            writeln!(
                self.output,
                "{id:>5}  {}, {} {}  {}  {}  {}  {}  {}  {} ({}) - {}",
                resident.surname,
                resident.firstname,
                resident.middlename,
                resident.sex,
                format_dob(resident.dob),
                resident.age,
                resident.street,
                resident.contact_number,
                resident.emergency_name,
                resident.emergency_relation,
                resident.emergency_contact,
            )?;
        }
        Ok(())
    }

    fn go(&mut self, action: Action) -> Result<Flow, Error> {
        if let Err(err) = self.navigator.apply(action) {
            writeln!(self.output, "{err}")?;
        }
        Ok(Flow::Continue)
    }

    fn report(&mut self, err: brgy_registry::Error) -> Result<(), Error> {
        match err {
            brgy_registry::Error::Validation(err) => writeln!(self.output, "{err}")?,
            brgy_registry::Error::NotFound(_) => writeln!(self.output, "Record not found!")?,
            err => {
                tracing::error!("registry operation failed: {err}");
                writeln!(self.output, "Operation failed: {err}")?;
            }
        }
        Ok(())
    }

    fn read_line(&mut self) -> Result<String, Error> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(Error::Closed);
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_owned())
    }

    fn ask(&mut self, label: &str) -> Result<String, Error> {
        write!(self.output, "{label} ")?;
        self.output.flush()?;
        self.read_line()
    }

    fn text(&mut self, label: &str, current: &str) -> Result<String, Error> {
        let line = if current.is_empty() {
            self.ask(&format!("{label}:"))?
        } else {
            self.ask(&format!("{label} [{current}]:"))?
        };
        Ok(match line.trim() {
            "" => current.to_owned(),
            "-" => String::new(),
            _ => line,
        })
    }

    fn number(&mut self, label: &str, current: u32) -> Result<u32, Error> {
        loop {
            let line = self.ask(&format!("{label} [{current}]:"))?;
            let line = line.trim();
            if line.is_empty() {
                return Ok(current);
            }
            match line.parse() {
                Ok(value) => return Ok(value),
                Err(_) => writeln!(self.output, "Please enter a whole number.")?,
            }
        }
    }

    fn date(
        &mut self,
        label: &str,
        current: Option<jiff::civil::Date>,
    ) -> Result<Option<jiff::civil::Date>, Error> {
        loop {
            let shown = current.map(format_dob).unwrap_or_default();
            let line = self.ask(&format!("{label} [{shown}]:"))?;
            match line.trim() {
                "" => return Ok(current),
                "-" => return Ok(None),
                text => match parse_dob(text) {
                    Some(date) => return Ok(Some(date)),
                    None => writeln!(self.output, "Please use the format dd/mm/yyyy.")?,
                },
            }
        }
    }

    /// Numbered choice; with `free_text` anything that is not a number is
    /// taken literally.
    fn pick(
        &mut self,
        label: &str,
        options: &[&str],
        current: Option<&str>,
        free_text: bool,
    ) -> Result<Option<String>, Error> {
        let listing = options
            .iter()
            .enumerate()
            .map(|(index, option)| format!("{}) {option}", index + 1))
            .join("  ");
        writeln!(self.output, "  {listing}")?;
        loop {
            let line = self.ask(&format!("{label} [{}]:", current.unwrap_or("")))?;
            let line = line.trim();
            match line {
                "" => return Ok(current.map(str::to_owned)),
                "-" | "0" => return Ok(None),
                _ => (),
            }
            match line.parse::<usize>() {
                Ok(number) if (1..=options.len()).contains(&number) => {
                    return Ok(Some(options[number - 1].to_owned()))
                }
                Err(_) if free_text => return Ok(Some(line.to_owned())),
                _ => writeln!(self.output, "Choose a number from the list.")?,
            }
        }
    }
}
