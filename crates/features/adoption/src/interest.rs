//! The public interest form.

use crate::error::AdoptionError;
use crate::ports::Notification;
use crate::service::{Adoptions, check_form, check_unique};
use ampa_domain::{Adopter, AdopterForm, Pet, PetId};
use ampa_kernel::ValidationError;
use chrono::Utc;
use std::fmt::Write as _;
use tracing::{info, instrument, warn};

impl Adoptions {
    /// Registers a prospective adopter and alerts the staff.
    ///
    /// The CAPTCHA is verified before anything else. The adopter is persisted before the alert
    /// goes out; when sending fails the error is returned and the adopter is kept.
    ///
    /// # Errors
    /// * [`ValidationError::CaptchaRejected`] and field errors as [`AdoptionError::Validation`].
    /// * [`AdoptionError::Domain`] when `pet` does not exist.
    /// * [`AdoptionError::Port`] when the CAPTCHA service or the notifier fails.
    #[instrument(skip(self, form, captcha_token), fields(pet = ?pet))]
    pub async fn register_interest(
        &self,
        form: AdopterForm,
        pet: Option<PetId>,
        captcha_token: &str,
    ) -> Result<Adopter, AdoptionError> {
        if !self.inner.captcha.verify(captcha_token).await? {
            warn!("CAPTCHA rejected");
            return Err(ValidationError::CaptchaRejected { context: None }.into());
        }

        let form = check_form(form)?;
        let pet = match pet {
            Some(id) => Some(self.read(|tables| tables.pets.require(id).cloned())?),
            None => None,
        };

        let adopter = self
            .inner
            .db
            .transaction(|tables| {
                check_unique(tables, &form, None)?;
                let adopter = tables.adopters.insert_with(|id| Adopter::from_form(id, form, Utc::now()));
                Ok::<_, AdoptionError>(adopter.clone())
            })
            .await?;
        info!(id = %adopter.id, "Interest registered");

        let notification = Notification {
            sender: self.inner.sender.clone(),
            recipient: self.inner.settings.notification_recipient(),
            subject: format!("Novo Interessado: {}", adopter.name),
            body: interest_message(&adopter, pet.as_ref()),
        };
        self.inner.notifier.send(&notification).await?;
        info!(id = %adopter.id, to = %notification.recipient, "Staff notified");

        Ok(adopter)
    }
}

/// Alert body: the adopter's data and, when given, the pet of interest.
fn interest_message(adopter: &Adopter, pet: Option<&Pet>) -> String {
    let mut body = String::from("Olá equipe AMPA,\n\nUma nova pessoa preencheu a ficha de interesse no site!\n");
    let _ = write!(
        body,
        "\n--- DADOS DO ADOTANTE ---\nNome: {}\nTelefone: {}\nE-mail: {}\nEndereço: {}\nCPF: {}\n",
        adopter.name,
        adopter.phone,
        adopter.email,
        adopter.address.as_deref().unwrap_or("-"),
        adopter.cpf,
    );
    if let Some(pet) = pet {
        let _ = write!(body, "\n--- INTERESSE NO PET ---\nNome: {} (ID: {})\n", pet.name, pet.id.get());
    }
    body
}

#[cfg(test)]
mod tests {
    use super::*;
    use ampa_domain::{AdopterId, PetDraft};

    fn adopter() -> Adopter {
        let form = AdopterForm {
            name: "Maria".to_owned(),
            cpf: "12345678901".to_owned(),
            phone: "17999990000".to_owned(),
            email: "maria@example.com".to_owned(),
            address: None,
        };
        Adopter::from_form(AdopterId(3), form, Utc::now())
    }

    #[test]
    fn message_lists_adopter_data() {
        let body = interest_message(&adopter(), None);
        assert!(body.contains("Nome: Maria"));
        assert!(body.contains("CPF: 12345678901"));
        assert!(body.contains("Endereço: -"));
        assert!(!body.contains("INTERESSE NO PET"));
    }

    #[test]
    fn message_names_the_pet_of_interest() {
        let pet = Pet::from_draft(PetId(7), PetDraft { name: "Rex".to_owned(), ..PetDraft::default() });
        let body = interest_message(&adopter(), Some(&pet));
        assert!(body.contains("Nome: Rex (ID: 7)"));
    }
}
