//! Typed record identifiers.
//!
//! Every table hands out its own monotonically increasing `u64`, so each entity gets a
//! distinct newtype and a pet ID can never be passed where an adopter ID is expected.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident, $table:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl $name {
            /// Name of the table this identifier belongs to.
            pub const TABLE: &'static str = $table;

            #[must_use]
            pub const fn get(self) -> u64 {
                self.0
            }
        }

        impl From<u64> for $name {
            fn from(raw: u64) -> Self {
                Self(raw)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}:{}", Self::TABLE, self.0)
            }
        }
    };
}

record_id!(
    /// Identifier of a [`crate::Pet`].
    PetId, "pet"
);
record_id!(
    /// Identifier of a [`crate::PetPhoto`].
    PhotoId, "pet_photo"
);
record_id!(
    /// Identifier of an [`crate::Adopter`].
    AdopterId, "adopter"
);
record_id!(
    /// Identifier of a [`crate::Volunteer`].
    VolunteerId, "volunteer"
);
record_id!(
    /// Identifier of an [`crate::Adoption`].
    AdoptionId, "adoption"
);
record_id!(
    /// Identifier of the [`crate::SiteConfiguration`] row.
    ConfigurationId, "site_configuration"
);
record_id!(
    /// Identifier of a [`crate::TransparencyDocument`].
    DocumentId, "transparency_document"
);
