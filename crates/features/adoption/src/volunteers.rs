use crate::error::AdoptionError;
use crate::service::Adoptions;
use ampa_domain::constants::PERSON_NAME_MAX;
use ampa_domain::{Volunteer, VolunteerId};
use ampa_kernel::validation::{max_chars, require};
use tracing::{info, instrument};

impl Adoptions {
    /// Registers an active volunteer.
    #[instrument(skip(self))]
    pub async fn create_volunteer(&self, name: &str) -> Result<Volunteer, AdoptionError> {
        let name = check_name(name)?;
        let volunteer = self
            .inner
            .db
            .transaction(|tables| {
                let volunteer = tables.volunteers.insert_with(|id| Volunteer { id, name, active: true });
                Ok::<_, AdoptionError>(volunteer.clone())
            })
            .await?;

        info!(id = %volunteer.id, "Volunteer created");
        Ok(volunteer)
    }

    #[instrument(skip(self))]
    pub async fn rename_volunteer(&self, id: VolunteerId, name: &str) -> Result<Volunteer, AdoptionError> {
        let name = check_name(name)?;
        self.edit_volunteer(id, |volunteer| volunteer.name = name).await
    }

    /// Inactive volunteers stay on the adoptions they handled.
    #[instrument(skip(self))]
    pub async fn set_volunteer_active(&self, id: VolunteerId, active: bool) -> Result<Volunteer, AdoptionError> {
        self.edit_volunteer(id, |volunteer| volunteer.active = active).await
    }

    /// Deletes a volunteer; the adoptions it handled keep their history without it.
    #[instrument(skip(self))]
    pub async fn delete_volunteer(&self, id: VolunteerId) -> Result<Volunteer, AdoptionError> {
        let (volunteer, cleared) = self
            .inner
            .db
            .transaction(|tables| Ok::<_, AdoptionError>(tables.delete_volunteer(id)?))
            .await?;

        info!(id = %volunteer.id, cleared, "Volunteer deleted");
        Ok(volunteer)
    }

    /// Volunteers in alphabetical order.
    pub fn list_volunteers(&self, only_active: bool) -> Vec<Volunteer> {
        let mut volunteers: Vec<Volunteer> = self.read(|tables| {
            tables.volunteers.iter().filter(|v| v.active || !only_active).cloned().collect()
        });
        volunteers.sort_by_key(|v| v.name.to_lowercase());
        volunteers
    }

    async fn edit_volunteer(
        &self,
        id: VolunteerId,
        edit: impl FnOnce(&mut Volunteer),
    ) -> Result<Volunteer, AdoptionError> {
        let volunteer = self
            .inner
            .db
            .transaction(|tables| {
                let volunteer = tables.volunteers.require_mut(id)?;
                edit(volunteer);
                Ok::<_, AdoptionError>(volunteer.clone())
            })
            .await?;

        info!(id = %volunteer.id, active = volunteer.active, "Volunteer updated");
        Ok(volunteer)
    }
}

fn check_name(name: &str) -> Result<String, AdoptionError> {
    let name = name.trim();
    require("name", name)?;
    max_chars("name", name, PERSON_NAME_MAX)?;
    Ok(name.to_owned())
}
