use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::models::domain::Profile;

/// Raw registration fields as typed into the shell
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct RegistrationForm {
    #[validate(length(min = 1))]
    #[serde(rename = "userId")]
    pub user_id: String,
    #[validate(custom(function = "validate_name"))]
    pub name: String,
    pub email: String,
    pub gender: String,
    #[validate(custom(function = "validate_age"))]
    pub age: String,
    pub address: String,
    /// Whitespace separated interest tags
    pub interests: String,
}

impl RegistrationForm {
    /// Validate the form and build the profile it describes
    pub fn into_profile(self) -> Result<Profile, ValidationErrors> {
        self.validate()?;

        let age = self.age.parse::<u32>().map_err(|_| {
            let mut errors = ValidationErrors::new();
            errors.add("age", age_error());
            errors
        })?;

        let interests = parse_interests(&self.interests);

        Ok(Profile::new(
            self.user_id,
            self.name,
            self.email,
            self.gender,
            age,
            self.address,
            interests,
        ))
    }
}

/// Split an interest line into tags, keeping order and duplicates
pub fn parse_interests(line: &str) -> Vec<String> {
    line.split_whitespace().map(str::to_string).collect()
}

fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.chars().all(|c| c.is_ascii_alphabetic() || c == ' ') {
        Ok(())
    } else {
        Err(ValidationError::new("name_not_alphabetic")
            .with_message(Cow::from("Name should only contain alphabets.")))
    }
}

fn validate_age(age: &str) -> Result<(), ValidationError> {
    let digits_only = !age.is_empty() && age.chars().all(|c| c.is_ascii_digit());
    if digits_only && age.parse::<u32>().is_ok() {
        Ok(())
    } else {
        Err(age_error())
    }
}

fn age_error() -> ValidationError {
    ValidationError::new("age_not_integer").with_message(Cow::from("Age should be an integer."))
}
