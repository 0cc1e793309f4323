use std::sync::Arc;

use inputlist_types::{
    BindingRegistry, HeaderDecorator, Input, InputGroup, InputItem, InputKind, InputSection, Rgba,
    SectionTree,
};

pub fn personal_information() -> InputSection {
    InputSection::new("personalInformation", "Personal information")
}

pub fn contact_information() -> InputSection {
    InputSection::new("contactInformation", "Contact information")
}

pub fn account_information() -> InputSection {
    InputSection::new("accountInformation", "Account information").with_decorator(
        HeaderDecorator::default().with_title_text_color(Rgba::rgb(200, 60, 60)),
    )
}

/// A sign-up form with every field required.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Registration {
    Title,
    FirstName,
    LastName,
    PhoneExtension,
    PhoneNumber,
    Email,
    Password,
    ConfirmPassword,
    Description,
}

impl Registration {
    pub const ALL: [Registration; 9] = [
        Registration::Title,
        Registration::FirstName,
        Registration::LastName,
        Registration::PhoneExtension,
        Registration::PhoneNumber,
        Registration::Email,
        Registration::Password,
        Registration::ConfirmPassword,
        Registration::Description,
    ];

    pub fn input(self) -> Input {
        Arc::new(self)
    }

    /// The fields as they share rows.
    pub fn layout() -> Vec<Vec<Registration>> {
        use Registration::*;
        vec![
            vec![Title, FirstName, LastName],
            vec![Password],
            vec![ConfirmPassword],
            vec![Email],
            vec![PhoneExtension, PhoneNumber],
            vec![Description],
        ]
    }

    pub fn groups() -> Vec<InputGroup> {
        Self::layout()
            .into_iter()
            .map(|row| row.into_iter().map(Registration::input).collect())
            .collect()
    }

    /// The form grouped by section: personal, then account, then contact.
    pub fn tree() -> SectionTree {
        SectionTree::from_groups(Self::groups())
    }
}

impl InputItem for Registration {
    fn identifier(&self) -> &str {
        match self {
            Registration::Title => "title",
            Registration::FirstName => "firstName",
            Registration::LastName => "lastName",
            Registration::PhoneExtension => "phoneExtension",
            Registration::PhoneNumber => "phoneNumber",
            Registration::Email => "email",
            Registration::Password => "password",
            Registration::ConfirmPassword => "confirmPassword",
            Registration::Description => "description",
        }
    }

    fn is_required(&self) -> bool {
        true
    }

    fn section(&self) -> Option<InputSection> {
        Some(match self {
            Registration::Title
            | Registration::FirstName
            | Registration::LastName
            | Registration::Description => personal_information(),
            Registration::PhoneExtension | Registration::PhoneNumber | Registration::Email => {
                contact_information()
            }
            Registration::Password | Registration::ConfirmPassword => account_information(),
        })
    }

    fn input_height(&self) -> Option<f64> {
        match self {
            Registration::Description => Some(5.0),
            _ => Some(3.0),
        }
    }

    fn placeholder(&self) -> Option<&str> {
        Some(match self {
            Registration::Title => "Title",
            Registration::FirstName => "First name",
            Registration::LastName => "Last name",
            Registration::PhoneExtension => "Ext",
            Registration::PhoneNumber => "Phone number",
            Registration::Email => "Email",
            Registration::Password => "Password",
            Registration::ConfirmPassword => "Confirm password",
            Registration::Description => "About yourself",
        })
    }

    fn kind(&self) -> InputKind {
        match self {
            Registration::Password | Registration::ConfirmPassword => InputKind::Password,
            Registration::Description => InputKind::Multiline,
            _ => InputKind::Text,
        }
    }

    fn shows_required_indicator(&self) -> bool {
        !matches!(self, Registration::Title | Registration::PhoneExtension)
    }

    fn validate(&self, content: &str, inputs: &BindingRegistry) -> Result<(), String> {
        match self {
            Registration::Title => {
                if ["Mr", "Mrs", "Ms"].contains(&content) {
                    Ok(())
                } else {
                    Err("Invalid title".to_string())
                }
            }
            Registration::Email => validate_email(content),
            Registration::Password => {
                if content.chars().count() < 8 {
                    Err("Password too short".to_string())
                } else {
                    Ok(())
                }
            }
            Registration::ConfirmPassword => passwords_match(content, inputs),
            _ => Ok(()),
        }
    }
}

/// Checks the rough shape of an email address: `local@domain.tld`.
pub fn validate_email(email: &str) -> Result<(), String> {
    let Some((local, domain)) = email.split_once('@') else {
        return Err("Not an email".to_string());
    };

    if local.is_empty() || domain.contains('@') {
        return Err("Not an email".to_string());
    }

    match domain.rsplit_once('.') {
        Some((host, tld)) if !host.is_empty() && tld.chars().count() >= 2 => Ok(()),
        _ => Err("Not an email".to_string()),
    }
}

/// A confirmation must equal the content of the password field.
pub fn passwords_match(confirmation: &str, inputs: &BindingRegistry) -> Result<(), String> {
    match inputs.content_of(Registration::Password.identifier()) {
        Some(password) if password == confirmation => Ok(()),
        _ => Err("Passwords do not match".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tree_groups_rows_by_section() {
        let tree = Registration::tree();
        let sections: Vec<_> = tree
            .entries()
            .iter()
            .map(|entry| (entry.section().identifier(), entry.group_count()))
            .collect();

        assert_eq!(
            sections,
            vec![
                ("personalInformation", 2),
                ("accountInformation", 2),
                ("contactInformation", 2),
            ]
        );
        assert_eq!(tree.items().count(), Registration::ALL.len());
    }

    #[test]
    fn title_must_be_known() {
        let inputs = BindingRegistry::new();
        assert!(Registration::Title.validate("Ms", &inputs).is_ok());
        assert_eq!(
            Registration::Title.validate("Dr", &inputs),
            Err("Invalid title".to_string())
        );
    }

    #[test]
    fn email_shape() {
        assert!(validate_email("ada@example.com").is_ok());
        assert!(validate_email("ada.example.com").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("ada@example").is_err());
        assert!(validate_email("ada@ex@ample.com").is_err());
    }

    #[test]
    fn confirmation_follows_password() {
        let inputs = BindingRegistry::from_tree(&Registration::tree());
        inputs.get("password").unwrap().push("abcdefgh");

        assert!(passwords_match("abcdefgh", &inputs).is_ok());
        assert_eq!(
            passwords_match("abcdefg", &inputs),
            Err("Passwords do not match".to_string())
        );
    }

    #[test]
    fn required_indicator_is_hidden_for_short_fields() {
        assert!(!Registration::Title.shows_required_indicator());
        assert!(!Registration::PhoneExtension.shows_required_indicator());
        assert!(Registration::Email.shows_required_indicator());
        assert!(Registration::ALL.iter().all(|input| input.is_required()));
    }
}
