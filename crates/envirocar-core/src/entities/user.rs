//! Users and their profile fields.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, Result};

/// Self-declared gender of a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    /// Male
    Male,
    /// Female
    Female,
    /// Anything else
    Other,
}

impl Gender {
    /// Lowercase name used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }

    /// Parses the lowercase wire name (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "male" | "m" => Some(Gender::Male),
            "female" | "f" => Some(Gender::Female),
            "other" | "o" => Some(Gender::Other),
            _ => None,
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A registered user.
///
/// Every profile field except the name is optional; encoders check for
/// presence before they consult the access rights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique user name (also the public nickname).
    pub name: String,
    /// Mail address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mail: Option<String>,
    /// Authentication token compared against the token header.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// Whether the user holds the admin role.
    #[serde(default)]
    pub is_admin: bool,
    /// Given name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// Family name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Gender.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    /// Day of birth.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_of_birth: Option<NaiveDate>,
    /// Homepage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// ISO country code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// Preferred language tag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Free-form self description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub about_me: Option<String>,
    /// Creation time.
    #[serde(default = "Utc::now")]
    pub created: DateTime<Utc>,
    /// Last modification time.
    #[serde(default = "Utc::now")]
    pub modified: DateTime<Utc>,
}

impl User {
    /// Creates a user with only a name set.
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            name: name.into(),
            mail: None,
            token: None,
            is_admin: false,
            first_name: None,
            last_name: None,
            gender: None,
            day_of_birth: None,
            url: None,
            country: None,
            language: None,
            about_me: None,
            created: now,
            modified: now,
        }
    }

    /// Sets the mail address.
    pub fn with_mail(mut self, mail: impl Into<String>) -> Self {
        self.mail = Some(mail.into());
        self
    }

    /// Sets the token.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Marks the user as admin.
    pub fn as_admin(mut self) -> Self {
        self.is_admin = true;
        self
    }

    /// Sets first and last name.
    pub fn with_full_name(mut self, first: impl Into<String>, last: impl Into<String>) -> Self {
        self.first_name = Some(first.into());
        self.last_name = Some(last.into());
        self
    }

    /// Checks the invariants every stored user satisfies.
    pub fn validate(&self) -> Result<()> {
        validate_name(&self.name)?;
        if let Some(mail) = &self.mail {
            validate_mail(mail)?;
        }
        if let Some(url) = &self.url {
            validate_url(url)?;
        }
        Ok(())
    }

    /// Applies a partial update, bumping `modified`.
    pub fn apply(&mut self, update: UserUpdate) -> Result<()> {
        update.validate()?;
        let UserUpdate {
            mail,
            token,
            first_name,
            last_name,
            gender,
            day_of_birth,
            url,
            country,
            language,
            about_me,
        } = update;
        if mail.is_some() {
            self.mail = mail;
        }
        if token.is_some() {
            self.token = token;
        }
        if first_name.is_some() {
            self.first_name = first_name;
        }
        if last_name.is_some() {
            self.last_name = last_name;
        }
        if gender.is_some() {
            self.gender = gender;
        }
        if day_of_birth.is_some() {
            self.day_of_birth = day_of_birth;
        }
        if url.is_some() {
            self.url = url;
        }
        if country.is_some() {
            self.country = country;
        }
        if language.is_some() {
            self.language = language;
        }
        if about_me.is_some() {
            self.about_me = about_me;
        }
        self.modified = Utc::now();
        Ok(())
    }
}

/// Partial changes to a [`User`]. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserUpdate {
    /// New mail address.
    #[serde(default)]
    pub mail: Option<String>,
    /// New token.
    #[serde(default)]
    pub token: Option<String>,
    /// New given name.
    #[serde(default)]
    pub first_name: Option<String>,
    /// New family name.
    #[serde(default)]
    pub last_name: Option<String>,
    /// New gender.
    #[serde(default)]
    pub gender: Option<Gender>,
    /// New day of birth.
    #[serde(default)]
    pub day_of_birth: Option<NaiveDate>,
    /// New homepage.
    #[serde(default)]
    pub url: Option<String>,
    /// New country.
    #[serde(default)]
    pub country: Option<String>,
    /// New language.
    #[serde(default)]
    pub language: Option<String>,
    /// New self description.
    #[serde(default)]
    pub about_me: Option<String>,
}

impl UserUpdate {
    /// Validates the fields that are present.
    pub fn validate(&self) -> Result<()> {
        if let Some(mail) = &self.mail {
            validate_mail(mail)?;
        }
        if let Some(url) = &self.url {
            validate_url(url)?;
        }
        if let Some(token) = &self.token
            && token.is_empty()
        {
            return Err(Error::validation_field("token", "must not be empty"));
        }
        Ok(())
    }
}

fn validate_name(name: &str) -> Result<()> {
    let len = name.chars().count();
    if !(3..=64).contains(&len) {
        return Err(Error::validation_field(
            "name",
            "must be between 3 and 64 characters",
        ));
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
    {
        return Err(Error::validation_field(
            "name",
            "may only contain letters, digits, '_', '-' and '.'",
        ));
    }
    Ok(())
}

fn validate_mail(mail: &str) -> Result<()> {
    match mail.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(Error::validation_field("mail", "is not a valid mail address")),
    }
}

fn validate_url(url: &str) -> Result<()> {
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        Err(Error::validation_field("url", "must be an http(s) URL"))
    }
}
