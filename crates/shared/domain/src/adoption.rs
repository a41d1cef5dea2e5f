use crate::ids::{AdopterId, AdoptionId, PetId, VolunteerId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Historical record of a completed adoption.
///
/// Pet and adopter references are protected: neither row may be deleted while this
/// record exists. The volunteer reference is cleared when the volunteer is deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Adoption {
    pub id: AdoptionId,
    pub pet_id: PetId,
    pub adopter_id: AdopterId,
    pub volunteer_id: Option<VolunteerId>,
    pub adopted_at: DateTime<Utc>,
}
