use crate::error::AdoptionError;
use crate::service::{Adoptions, check_form, check_unique};
use ampa_domain::{Adopter, AdopterForm, AdopterId};
use chrono::Utc;
use tracing::{info, instrument};

impl Adoptions {
    /// Registers an adopter from the admin screen. Same checks as the public form, no CAPTCHA
    /// and no alert.
    #[instrument(skip(self, form))]
    pub async fn create_adopter(&self, form: AdopterForm) -> Result<Adopter, AdoptionError> {
        let form = check_form(form)?;
        let adopter = self
            .inner
            .db
            .transaction(|tables| {
                check_unique(tables, &form, None)?;
                let adopter = tables.adopters.insert_with(|id| Adopter::from_form(id, form, Utc::now()));
                Ok::<_, AdoptionError>(adopter.clone())
            })
            .await?;

        info!(id = %adopter.id, "Adopter created");
        Ok(adopter)
    }

    /// Edits contact data. The registration timestamp never changes.
    #[instrument(skip(self, form))]
    pub async fn update_adopter(&self, id: AdopterId, form: AdopterForm) -> Result<Adopter, AdoptionError> {
        let form = check_form(form)?;
        let adopter = self
            .inner
            .db
            .transaction(|tables| {
                tables.adopters.require(id)?;
                check_unique(tables, &form, Some(id))?;
                let adopter = tables.adopters.require_mut(id)?;
                adopter.apply(form);
                Ok::<_, AdoptionError>(adopter.clone())
            })
            .await?;

        info!(id = %adopter.id, "Adopter updated");
        Ok(adopter)
    }

    /// # Errors
    /// [`AdoptionError::Domain`] with a protected-record error while adoptions reference the
    /// adopter.
    #[instrument(skip(self))]
    pub async fn delete_adopter(&self, id: AdopterId) -> Result<Adopter, AdoptionError> {
        let adopter = self
            .inner
            .db
            .transaction(|tables| Ok::<_, AdoptionError>(tables.delete_adopter(id)?))
            .await?;

        info!(id = %adopter.id, "Adopter deleted");
        Ok(adopter)
    }

    pub fn get_adopter(&self, id: AdopterId) -> Result<Adopter, AdoptionError> {
        Ok(self.read(|tables| tables.adopters.require(id).cloned())?)
    }

    /// Adopters newest first.
    pub fn list_adopters(&self) -> Vec<Adopter> {
        self.read(|tables| tables.adopters.iter().rev().cloned().collect())
    }

    /// Case-insensitive match on name, or a CPF containing the term.
    pub fn search_adopters(&self, term: &str) -> Vec<Adopter> {
        let term = term.trim().to_lowercase();
        self.read(|tables| {
            tables
                .adopters
                .iter()
                .rev()
                .filter(|a| a.name.to_lowercase().contains(&term) || a.cpf.contains(&term))
                .cloned()
                .collect()
        })
    }
}
