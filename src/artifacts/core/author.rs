use crate::errors::{Error, Result};

/// Commit author identity
///
/// Commits only ever see the rendered string; this type exists so the
/// command layer can build that string from the environment.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Author {
    name: String,
    email: String,
    timestamp: chrono::DateTime<chrono::FixedOffset>,
}

impl Author {
    pub fn new(name: String, email: String) -> Self {
        Author {
            name,
            email,
            timestamp: chrono::Local::now().fixed_offset(),
        }
    }

    pub fn new_with_timestamp(
        name: String,
        email: String,
        timestamp: chrono::DateTime<chrono::FixedOffset>,
    ) -> Self {
        Author {
            name,
            email,
            timestamp,
        }
    }

    /// Load author information from environment variables
    ///
    /// Reads GIT_AUTHOR_NAME, GIT_AUTHOR_EMAIL, and optionally GIT_AUTHOR_DATE
    /// (RFC 2822 or `%Y-%m-%d %H:%M:%S %z`). Without a date the current time
    /// is used.
    pub fn load_from_env() -> Result<Self> {
        let name = required_var("GIT_AUTHOR_NAME")?;
        let email = required_var("GIT_AUTHOR_EMAIL")?;

        let timestamp = match std::env::var("GIT_AUTHOR_DATE").ok() {
            Some(date) => Some(parse_date(&date)?),
            None => None,
        };

        Ok(match timestamp {
            Some(ts) => Author::new_with_timestamp(name, email, ts),
            None => Author::new(name, email),
        })
    }

    pub fn display_name(&self) -> String {
        format!("{} <{}>", self.name, self.email)
    }

    pub fn timestamp(&self) -> chrono::DateTime<chrono::FixedOffset> {
        self.timestamp
    }
}

impl std::fmt::Display for Author {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} <{}> {} {}",
            self.name,
            self.email,
            self.timestamp.timestamp(),
            self.timestamp.format("%z")
        )
    }
}

fn required_var(key: &str) -> Result<String> {
    std::env::var(key)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| Error::invalid_argument(format!("{key} is not set")))
}

fn parse_date(date: &str) -> Result<chrono::DateTime<chrono::FixedOffset>> {
    chrono::DateTime::parse_from_rfc2822(date)
        .or_else(|_| chrono::DateTime::parse_from_str(date, "%Y-%m-%d %H:%M:%S %z"))
        .map_err(|_| Error::invalid_argument(format!("unrecognized GIT_AUTHOR_DATE {date:?}")))
}
