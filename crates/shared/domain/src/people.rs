use crate::ids::{AdopterId, VolunteerId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A person who filled in the interest form or was registered by staff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Adopter {
    pub id: AdopterId,
    pub name: String,
    /// Brazilian national ID (CPF), exactly 11 digits, unique.
    pub cpf: String,
    pub phone: String,
    /// Unique across adopters.
    pub email: String,
    pub address: Option<String>,
    /// Set once at creation and never rewritten.
    pub registered_at: DateTime<Utc>,
}

impl Adopter {
    #[must_use]
    pub fn from_form(id: AdopterId, form: AdopterForm, registered_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: form.name,
            cpf: form.cpf,
            phone: form.phone,
            email: form.email,
            address: form.address.filter(|a| !a.trim().is_empty()),
            registered_at,
        }
    }

    /// Applies edited contact data; the registration timestamp is preserved.
    pub fn apply(&mut self, form: AdopterForm) {
        self.name = form.name;
        self.cpf = form.cpf;
        self.phone = form.phone;
        self.email = form.email;
        self.address = form.address.filter(|a| !a.trim().is_empty());
    }
}

/// Adopter fields as submitted by the public interest form or the admin screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdopterForm {
    pub name: String,
    pub cpf: String,
    pub phone: String,
    pub email: String,
    pub address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Volunteer {
    pub id: VolunteerId,
    pub name: String,
    pub active: bool,
}
