//! Which screen the application shows, and the moves allowed between them.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Main,
    Register,
    AdminLogin,
    AdminDashboard,
    Statistics,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    OpenRegister,
    OpenAdminLogin,
    SubmitCredentials(Credentials),
    CancelLogin,
    OpenStatistics,
    Back,
}

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub user_name: String,
    pub pass_phrase: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("user_name", &self.user_name)
            .finish_non_exhaustive()
    }
}

/// The single administrator account.
#[derive(Clone, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct AdminConfig {
    #[serde(default = "default_user_name")]
    pub user_name: String,
    #[serde(default = "default_pass_phrase")]
    pub pass_phrase: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            user_name: default_user_name(),
            pass_phrase: default_pass_phrase(),
        }
    }
}

fn default_user_name() -> String {
    "admin".to_owned()
}

fn default_pass_phrase() -> String {
    "admin123".to_owned()
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid username or password!")]
    InvalidCredentials,
    #[error("cannot {action} from the {from:?} screen")]
    InvalidTransition { from: Screen, action: &'static str },
}

pub struct Navigator {
    screen: Screen,
    admin: AdminConfig,
}

impl Navigator {
    pub fn new(admin: AdminConfig) -> Self {
        Self {
            screen: Screen::Main,
            admin,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Applies `action`, returning the screen now shown. A rejected action
    /// leaves the current screen in place.
    #[tracing::instrument(skip(self), fields(from = ?self.screen))]
    pub fn apply(&mut self, action: Action) -> Result<Screen, Error> {
        let next = match (self.screen, &action) {
            (Screen::Main, Action::OpenRegister) => Screen::Register,
            (Screen::Main, Action::OpenAdminLogin) => Screen::AdminLogin,
            (Screen::Main, Action::OpenStatistics) => Screen::Statistics,
            (Screen::AdminLogin, Action::SubmitCredentials(credentials)) => {
                if !self.accepts(credentials) {
                    tracing::warn!(user_name = %credentials.user_name, "admin login rejected");
                    return Err(Error::InvalidCredentials);
                }
                Screen::AdminDashboard
            }
            (Screen::AdminLogin, Action::CancelLogin) => Screen::Main,
            (Screen::Register | Screen::AdminDashboard | Screen::Statistics, Action::Back) => {
                Screen::Main
            }
            (from, action) => {
                return Err(Error::InvalidTransition {
                    from,
                    action: action.describe(),
                })
            }
        };
        tracing::debug!(to = ?next, "screen changed");
        self.screen = next;
        Ok(next)
    }

    fn accepts(&self, credentials: &Credentials) -> bool {
        credentials.user_name.trim() == self.admin.user_name
            && credentials.pass_phrase.trim() == self.admin.pass_phrase
    }
}

impl Action {
    fn describe(&self) -> &'static str {
        match self {
            Action::OpenRegister => "open registration",
            Action::OpenAdminLogin => "open admin login",
            Action::SubmitCredentials(_) => "submit credentials",
            Action::CancelLogin => "cancel login",
            Action::OpenStatistics => "open statistics",
            Action::Back => "go back",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials(user_name: &str, pass_phrase: &str) -> Action {
        Action::SubmitCredentials(Credentials {
            user_name: user_name.to_owned(),
            pass_phrase: pass_phrase.to_owned(),
        })
    }

    #[test]
    fn it_starts_on_the_main_screen() {
        assert_eq!(Navigator::new(AdminConfig::default()).screen(), Screen::Main);
    }

    #[test]
    fn it_opens_and_leaves_each_screen() {
        let mut navigator = Navigator::new(AdminConfig::default());
        for (open, screen) in [
            (Action::OpenRegister, Screen::Register),
            (Action::OpenStatistics, Screen::Statistics),
        ] {
            assert_eq!(navigator.apply(open), Ok(screen));
            assert_eq!(navigator.apply(Action::Back), Ok(Screen::Main));
        }
    }

    #[test]
    fn it_logs_the_admin_in_with_the_configured_pair() {
        let mut navigator = Navigator::new(AdminConfig::default());
        navigator.apply(Action::OpenAdminLogin).unwrap();
        assert_eq!(
            navigator.apply(credentials("admin", "wrong")),
            Err(Error::InvalidCredentials)
        );
        assert_eq!(navigator.screen(), Screen::AdminLogin);
        assert_eq!(
            navigator.apply(credentials(" admin ", "admin123 ")),
            Ok(Screen::AdminDashboard)
        );
        assert_eq!(navigator.apply(Action::Back), Ok(Screen::Main));
    }

    #[test]
    fn it_cancels_login() {
        let mut navigator = Navigator::new(AdminConfig::default());
        navigator.apply(Action::OpenAdminLogin).unwrap();
        assert_eq!(navigator.apply(Action::CancelLogin), Ok(Screen::Main));
    }

    #[test]
    fn it_rejects_moves_not_offered_by_the_current_screen() {
        let mut navigator = Navigator::new(AdminConfig::default());
        assert_eq!(
            navigator.apply(credentials("admin", "admin123")),
            Err(Error::InvalidTransition {
                from: Screen::Main,
                action: "submit credentials"
            })
        );
        navigator.apply(Action::OpenRegister).unwrap();
        assert!(navigator.apply(Action::OpenStatistics).is_err());
        assert_eq!(navigator.screen(), Screen::Register);
    }
}
