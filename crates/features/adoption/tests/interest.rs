mod common;

use ampa_adoption::{AdoptionError, PortError};
use ampa_domain::PetId;
use ampa_kernel::{DomainError, ValidationError};
use common::{FixedCaptcha, Outbox, add_pet, fixture, form, with_ports};
use std::sync::Arc;

#[tokio::test]
async fn interest_is_persisted_and_staff_notified() {
    let fx = fixture().await;
    let pet = add_pet(&fx.db, "Rex").await;

    let adopter = fx
        .adoptions
        .register_interest(form("Maria", "12345678901"), Some(pet), "token")
        .await
        .unwrap();

    assert_eq!(fx.adoptions.get_adopter(adopter.id).unwrap(), adopter);
    let sent = fx.outbox.sent.lock();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].recipient, "ampa.mirassol@hotmail.com");
    assert_eq!(sent[0].subject, "Novo Interessado: Maria");
    assert!(sent[0].body.contains("CPF: 12345678901"));
    assert!(sent[0].body.contains("Nome: Rex (ID: 1)"));
}

#[tokio::test]
async fn alerts_go_to_the_configured_inbox() {
    let fx = fixture().await;
    fx.settings.create_configuration("adocao@ampa.org.br").await.unwrap();

    fx.adoptions.register_interest(form("Maria", "12345678901"), None, "token").await.unwrap();

    let sent = fx.outbox.sent.lock();
    assert_eq!(sent[0].recipient, "adocao@ampa.org.br");
    assert!(!sent[0].body.contains("INTERESSE NO PET"));
}

#[tokio::test]
async fn rejected_captcha_persists_nothing() {
    let fx = with_ports(Arc::new(FixedCaptcha(false)), Outbox::default()).await;

    let err = fx
        .adoptions
        .register_interest(form("Maria", "12345678901"), None, "bot")
        .await
        .unwrap_err();

    assert!(matches!(err.as_validation(), Some(ValidationError::CaptchaRejected { .. })));
    assert!(fx.adoptions.list_adopters().is_empty());
    assert!(fx.outbox.sent.lock().is_empty());
}

#[tokio::test]
async fn duplicate_cpf_and_email_are_field_errors() {
    let fx = fixture().await;
    fx.adoptions.register_interest(form("Maria", "12345678901"), None, "t").await.unwrap();

    let err = fx
        .adoptions
        .register_interest(form("Outra", "12345678901"), None, "t")
        .await
        .unwrap_err();
    assert_eq!(err.as_validation().and_then(ValidationError::field), Some("cpf"));

    let mut same_email = form("Outra", "10987654321");
    same_email.email = "maria@example.com".to_owned();
    let err = fx.adoptions.register_interest(same_email, None, "t").await.unwrap_err();
    assert_eq!(err.as_validation().and_then(ValidationError::field), Some("email"));

    assert_eq!(fx.adoptions.list_adopters().len(), 1);
    assert_eq!(fx.outbox.sent.lock().len(), 1);
}

#[tokio::test]
async fn malformed_cpf_is_rejected() {
    let fx = fixture().await;
    let err = fx
        .adoptions
        .register_interest(form("Maria", "123.456.789-01"), None, "t")
        .await
        .unwrap_err();
    assert!(matches!(err.as_validation(), Some(ValidationError::InvalidCpf { .. })));
}

#[tokio::test]
async fn unknown_pet_of_interest_is_not_found() {
    let fx = fixture().await;
    let err = fx
        .adoptions
        .register_interest(form("Maria", "12345678901"), Some(PetId(8)), "t")
        .await
        .unwrap_err();
    assert!(matches!(err, AdoptionError::Domain { source: DomainError::NotFound { .. }, .. }));
    assert!(fx.adoptions.list_adopters().is_empty());
}

#[tokio::test]
async fn failed_notification_keeps_the_adopter() {
    let outbox = Outbox { fail: true, ..Outbox::default() };
    let fx = with_ports(Arc::new(ampa_adoption::TrustedCaptcha), outbox).await;

    let err = fx
        .adoptions
        .register_interest(form("Maria", "12345678901"), None, "t")
        .await
        .unwrap_err();

    assert!(matches!(err, AdoptionError::Port { source: PortError::Unavailable { .. }, .. }));
    assert_eq!(err.kind(), "port");
    assert_eq!(fx.adoptions.list_adopters().len(), 1);
}
