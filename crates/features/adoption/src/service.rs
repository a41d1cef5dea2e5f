use crate::ports::{CaptchaVerifier, Notifier};
use ampa_database::{Database, Tables};
use ampa_domain::config::AmpaConfig;
use ampa_domain::constants::{ADDRESS_MAX, EMAIL_MAX, PERSON_NAME_MAX, PHONE_MAX};
use ampa_domain::{AdopterForm, AdopterId};
use ampa_kernel::validation::{max_chars, require, validate_cpf_format, validate_email, validate_unique};
use ampa_kernel::{ValidationError, Validator};
use ampa_settings::Settings;
use std::sync::Arc;

#[derive(Debug)]
pub(crate) struct AdoptionsInner {
    pub(crate) db: Database,
    pub(crate) settings: Settings,
    pub(crate) validator: Validator,
    pub(crate) captcha: Arc<dyn CaptchaVerifier>,
    pub(crate) notifier: Arc<dyn Notifier>,
    pub(crate) sender: String,
}

/// Adopters, volunteers and adoption records. Cheap to clone.
#[derive(Debug, Clone)]
pub struct Adoptions {
    pub(crate) inner: Arc<AdoptionsInner>,
}

impl Adoptions {
    pub fn new(
        db: Database,
        settings: Settings,
        captcha: Arc<dyn CaptchaVerifier>,
        notifier: Arc<dyn Notifier>,
        config: &AmpaConfig,
    ) -> Self {
        Self {
            inner: Arc::new(AdoptionsInner {
                db,
                settings,
                validator: Validator::new(&config.limits),
                captcha,
                notifier,
                sender: config.notifications.sender.clone(),
            }),
        }
    }

    pub(crate) fn read<T>(&self, f: impl FnOnce(&Tables) -> T) -> T {
        self.inner.db.read(f)
    }
}

/// Field checks of the adopter form that need no other records.
pub(crate) fn check_form(mut form: AdopterForm) -> Result<AdopterForm, ValidationError> {
    form.name = form.name.trim().to_owned();
    form.cpf = form.cpf.trim().to_owned();
    form.phone = form.phone.trim().to_owned();
    form.email = form.email.trim().to_owned();

    require("name", &form.name)?;
    require("cpf", &form.cpf)?;
    require("phone", &form.phone)?;
    require("email", &form.email)?;
    max_chars("name", &form.name, PERSON_NAME_MAX)?;
    validate_cpf_format(&form.cpf)?;
    max_chars("phone", &form.phone, PHONE_MAX)?;
    max_chars("email", &form.email, EMAIL_MAX)?;
    validate_email("email", &form.email)?;
    if let Some(address) = &form.address {
        max_chars("address", address, ADDRESS_MAX)?;
    }
    Ok(form)
}

/// CPF and e-mail must not belong to another adopter. `own` is the adopter being edited.
pub(crate) fn check_unique(
    tables: &Tables,
    form: &AdopterForm,
    own: Option<AdopterId>,
) -> Result<(), ValidationError> {
    validate_unique("cpf", &form.cpf, own, tables.adopters.iter().map(|a| (a.id, a.cpf.as_str())))?;
    validate_unique("email", &form.email, own, tables.adopters.iter().map(|a| (a.id, a.email.as_str())))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> AdopterForm {
        AdopterForm {
            name: " Maria Souza ".to_owned(),
            cpf: "12345678901".to_owned(),
            phone: "(17) 99999-0000".to_owned(),
            email: "maria@example.com".to_owned(),
            address: None,
        }
    }

    #[test]
    fn form_is_trimmed() {
        let checked = check_form(form()).unwrap();
        assert_eq!(checked.name, "Maria Souza");
    }

    #[test]
    fn cpf_is_checked_before_contact_fields() {
        let err = check_form(AdopterForm { cpf: "123.456.789-01".to_owned(), email: "x".to_owned(), ..form() })
            .unwrap_err();
        assert_eq!(err.field(), Some("cpf"));
    }

    #[test]
    fn long_address_is_rejected() {
        let err = check_form(AdopterForm { address: Some("r".repeat(256)), ..form() }).unwrap_err();
        assert_eq!(err.field(), Some("address"));
    }

    #[test]
    fn duplicates_exclude_the_edited_adopter() {
        let mut tables = Tables::default();
        let existing = tables
            .adopters
            .insert_with(|id| ampa_domain::Adopter::from_form(id, form(), chrono::Utc::now()))
            .id;

        let err = check_unique(&tables, &form(), None).unwrap_err();
        assert_eq!(err.field(), Some("cpf"));

        let other_cpf = AdopterForm { cpf: "10987654321".to_owned(), ..form() };
        let err = check_unique(&tables, &other_cpf, None).unwrap_err();
        assert_eq!(err.field(), Some("email"));

        assert!(check_unique(&tables, &form(), Some(existing)).is_ok());
    }
}
