#![allow(dead_code)]

use ampa_adoption::{Adoptions, CaptchaVerifier, Notification, Notifier, PortError, TrustedCaptcha};
use ampa_database::{Database, DatabaseError};
use ampa_domain::config::AmpaConfig;
use ampa_domain::{AdopterForm, AdoptionStatus, Pet, PetDraft, PetId};
use ampa_settings::Settings;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;

/// Keeps every notification instead of sending it; fails on demand.
#[derive(Debug, Default)]
pub struct Outbox {
    pub sent: Mutex<Vec<Notification>>,
    pub fail: bool,
}

#[async_trait]
impl Notifier for Outbox {
    async fn send(&self, notification: &Notification) -> Result<(), PortError> {
        if self.fail {
            return Err(PortError::Unavailable { message: "smtp down".into(), context: None });
        }
        self.sent.lock().push(notification.clone());
        Ok(())
    }
}

#[derive(Debug)]
pub struct FixedCaptcha(pub bool);

#[async_trait]
impl CaptchaVerifier for FixedCaptcha {
    async fn verify(&self, _token: &str) -> Result<bool, PortError> {
        Ok(self.0)
    }
}

pub struct Fixture {
    pub db: Database,
    pub settings: Settings,
    pub outbox: Arc<Outbox>,
    pub adoptions: Adoptions,
}

pub async fn fixture() -> Fixture {
    with_ports(Arc::new(TrustedCaptcha), Outbox::default()).await
}

pub async fn with_ports(captcha: Arc<dyn CaptchaVerifier>, outbox: Outbox) -> Fixture {
    let config = AmpaConfig::default();
    let db = Database::builder().init().await.unwrap();
    let settings = Settings::new(db.clone(), &config);
    let outbox = Arc::new(outbox);
    let adoptions = Adoptions::new(db.clone(), settings.clone(), captcha, outbox.clone(), &config);
    Fixture { db, settings, outbox, adoptions }
}

pub async fn add_pet(db: &Database, name: &str) -> PetId {
    db.transaction(|tables| {
        let draft = PetDraft { name: name.to_owned(), ..PetDraft::default() };
        Ok::<_, DatabaseError>(tables.pets.insert_with(|id| Pet::from_draft(id, draft)).id)
    })
    .await
    .unwrap()
}

pub fn pet_status(db: &Database, pet: PetId) -> AdoptionStatus {
    db.read(|tables| tables.pets.get(pet).unwrap().status)
}

pub fn form(name: &str, cpf: &str) -> AdopterForm {
    AdopterForm {
        name: name.to_owned(),
        cpf: cpf.to_owned(),
        phone: "17999990000".to_owned(),
        email: format!("{}@example.com", name.to_lowercase().split_whitespace().collect::<Vec<_>>().join(".")),
        address: Some("Rua das Flores, 10".to_owned()),
    }
}
