mod common;

use ampa_domain::{AdopterForm, VolunteerId};
use ampa_kernel::ValidationError;
use common::{fixture, form};

#[tokio::test]
async fn updating_an_adopter_keeps_the_registration_time() {
    let fx = fixture().await;
    let adopter = fx.adoptions.create_adopter(form("Maria", "12345678901")).await.unwrap();

    let edited = AdopterForm { phone: "17988887777".to_owned(), address: Some(" ".to_owned()), ..form("Maria", "12345678901") };
    let updated = fx.adoptions.update_adopter(adopter.id, edited).await.unwrap();

    assert_eq!(updated.registered_at, adopter.registered_at);
    assert_eq!(updated.phone, "17988887777");
    assert_eq!(updated.address, None);
}

#[tokio::test]
async fn update_cannot_steal_another_cpf() {
    let fx = fixture().await;
    fx.adoptions.create_adopter(form("Maria", "12345678901")).await.unwrap();
    let joao = fx.adoptions.create_adopter(form("Joao", "10987654321")).await.unwrap();

    let err = fx
        .adoptions
        .update_adopter(joao.id, form("Joao", "12345678901"))
        .await
        .unwrap_err();
    assert!(matches!(err.as_validation(), Some(ValidationError::Duplicate { .. })));
    assert_eq!(fx.adoptions.get_adopter(joao.id).unwrap().cpf, "10987654321");
}

#[tokio::test]
async fn adopters_are_searchable_by_name_and_cpf() {
    let fx = fixture().await;
    let maria = fx.adoptions.create_adopter(form("Maria Souza", "12345678901")).await.unwrap();
    fx.adoptions.create_adopter(form("Joao", "10987654321")).await.unwrap();
    assert_eq!(maria.email, "maria.souza@example.com");

    assert_eq!(fx.adoptions.search_adopters("souza").len(), 1);
    assert_eq!(fx.adoptions.search_adopters("1098").len(), 1);
    assert_eq!(fx.adoptions.search_adopters("").len(), 2);
    assert_eq!(fx.adoptions.list_adopters()[0].name, "Joao");
}

#[tokio::test]
async fn volunteer_roster() {
    let fx = fixture().await;
    let bia = fx.adoptions.create_volunteer("  Bia ").await.unwrap();
    let ana = fx.adoptions.create_volunteer("Ana").await.unwrap();
    assert_eq!(bia.name, "Bia");
    assert!(bia.active);

    fx.adoptions.set_volunteer_active(bia.id, false).await.unwrap();
    let renamed = fx.adoptions.rename_volunteer(ana.id, "Ana Paula").await.unwrap();
    assert_eq!(renamed.name, "Ana Paula");

    let all: Vec<_> = fx.adoptions.list_volunteers(false).into_iter().map(|v| v.name).collect();
    assert_eq!(all, vec!["Ana Paula", "Bia"]);
    assert_eq!(fx.adoptions.list_volunteers(true).len(), 1);

    assert!(fx.adoptions.create_volunteer("   ").await.is_err());
    assert!(fx.adoptions.set_volunteer_active(VolunteerId(42), true).await.is_err());
}
