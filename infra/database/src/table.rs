use ampa_domain::{
    Adopter, AdopterId, Adoption, AdoptionId, ConfigurationId, DocumentId, Pet, PetId, PetPhoto,
    PhotoId, SiteConfiguration, TransparencyDocument, Volunteer, VolunteerId,
};
use ampa_kernel::DomainError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{Debug, Display};

/// A row type stored in a [`Table`].
pub trait Record: Debug + Clone + Serialize + DeserializeOwned {
    type Id: Debug + Display + Copy + Ord + From<u64> + Serialize + DeserializeOwned;

    fn id(&self) -> Self::Id;
}

macro_rules! record {
    ($($record:ty => $id:ty),* $(,)?) => {
        $(
            impl Record for $record {
                type Id = $id;

                fn id(&self) -> $id {
                    self.id
                }
            }
        )*
    };
}

record!(
    Pet => PetId,
    PetPhoto => PhotoId,
    Adopter => AdopterId,
    Volunteer => VolunteerId,
    Adoption => AdoptionId,
    SiteConfiguration => ConfigurationId,
    TransparencyDocument => DocumentId,
);

/// Rows of one entity keyed by ID, iterated in insertion (ID) order.
///
/// IDs start at 1 and are never reused, even after the newest row is deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Table<R: Record> {
    last_id: u64,
    rows: BTreeMap<R::Id, R>,
}

impl<R: Record> Default for Table<R> {
    fn default() -> Self {
        Self { last_id: 0, rows: BTreeMap::new() }
    }
}

impl<R: Record> Table<R> {
    /// Allocates the next ID and inserts the row built from it.
    pub fn insert_with(&mut self, build: impl FnOnce(R::Id) -> R) -> &R {
        self.last_id += 1;
        let id = R::Id::from(self.last_id);
        self.rows.entry(id).or_insert(build(id))
    }

    #[must_use]
    pub fn get(&self, id: R::Id) -> Option<&R> {
        self.rows.get(&id)
    }

    pub fn get_mut(&mut self, id: R::Id) -> Option<&mut R> {
        self.rows.get_mut(&id)
    }

    /// Like [`Table::get`], failing with [`DomainError::NotFound`].
    pub fn require(&self, id: R::Id) -> Result<&R, DomainError> {
        self.rows.get(&id).ok_or_else(|| DomainError::not_found(id))
    }

    /// Like [`Table::get_mut`], failing with [`DomainError::NotFound`].
    pub fn require_mut(&mut self, id: R::Id) -> Result<&mut R, DomainError> {
        self.rows.get_mut(&id).ok_or_else(|| DomainError::not_found(id))
    }

    #[must_use]
    pub fn contains(&self, id: R::Id) -> bool {
        self.rows.contains_key(&id)
    }

    pub(crate) fn remove(&mut self, id: R::Id) -> Result<R, DomainError> {
        self.rows.remove(&id).ok_or_else(|| DomainError::not_found(id))
    }

    pub(crate) fn retain(&mut self, keep: impl FnMut(&R::Id, &mut R) -> bool) {
        self.rows.retain(keep);
    }

    /// Rows in ascending ID order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &R> {
        self.rows.values()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut R> {
        self.rows.values_mut()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl<'a, R: Record> IntoIterator for &'a Table<R> {
    type Item = &'a R;
    type IntoIter = std::collections::btree_map::Values<'a, R::Id, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.values()
    }
}
