use ampa::Platform;
use ampa::domain::config::AmpaConfig;
use ampa::domain::{AdopterForm, AdoptionStatus, PetDraft};
use ampa::features::adoption::{LogNotifier, TrustedCaptcha};
use std::sync::Arc;

fn config(dir: &std::path::Path) -> AmpaConfig {
    let mut config = AmpaConfig::default();
    config.storage.data_dir = dir.join("data");
    config
}

async fn platform(config: &AmpaConfig) -> Platform {
    Platform::init(config, Arc::new(TrustedCaptcha), Arc::new(LogNotifier)).await.unwrap()
}

#[tokio::test]
async fn state_survives_a_restart() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(dir.path());

    let (pet, adoption) = {
        let platform = platform(&config).await;
        let draft = PetDraft {
            name: "Rex".to_owned(),
            color: "preto".to_owned(),
            story: "Encontrado na praça".to_owned(),
            ..PetDraft::default()
        };
        let pet = platform.catalog.create_pet(draft).await.unwrap();
        let form = AdopterForm {
            name: "Maria".to_owned(),
            cpf: "12345678901".to_owned(),
            phone: "17999990000".to_owned(),
            email: "maria@example.com".to_owned(),
            address: None,
        };
        let adopter = platform.adoptions.register_interest(form, Some(pet.id), "token").await.unwrap();
        let adoption = platform.adoptions.create_adoption(pet.id, adopter.id, None, None).await.unwrap();
        platform.settings.create_configuration("adocao@ampa.org.br").await.unwrap();
        (pet.id, adoption.id)
    };

    assert!(dir.path().join("data/database/entities.bin").exists());

    let platform = platform(&config).await;
    assert!(platform.database.is_durable());
    assert_eq!(platform.catalog.get_pet(pet).unwrap().pet.status, AdoptionStatus::Adopted);
    assert_eq!(platform.adoptions.get_adoption(adoption).unwrap().pet_name, "Rex");
    assert_eq!(platform.settings.notification_recipient(), "adocao@ampa.org.br");

    platform.adoptions.delete_adoption(adoption).await.unwrap();
    assert_eq!(platform.catalog.get_pet(pet).unwrap().pet.status, AdoptionStatus::Available);
}

#[tokio::test]
async fn memory_only_store_writes_no_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = config(dir.path());
    config.database.persist = false;

    let platform = platform(&config).await;
    platform.settings.create_configuration("adocao@ampa.org.br").await.unwrap();

    assert!(!platform.database.is_durable());
    assert!(!dir.path().join("data/database").exists());
}
