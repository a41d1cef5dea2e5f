use ampa_catalog::{Catalog, CatalogError};
use ampa_database::Database;
use ampa_domain::config::AmpaConfig;
use ampa_domain::{PetDraft, PetId};
use ampa_kernel::{DomainError, FileUpload, ValidationError};
use ampa_storage::Storage;
use tempfile::TempDir;

const PNG: &[u8] = b"\x89PNG\r\n\x1a\n";

async fn catalog() -> (TempDir, Catalog) {
    let dir = tempfile::tempdir().unwrap();
    let storage = Storage::builder().root(dir.path()).connect().await.unwrap();
    let db = Database::builder().init().await.unwrap();
    let catalog = Catalog::new(db, &storage, &AmpaConfig::default()).unwrap();
    (dir, catalog)
}

async fn pet(catalog: &Catalog) -> PetId {
    let draft = PetDraft {
        name: "Rex".to_owned(),
        color: "caramelo".to_owned(),
        story: "Resgatado".to_owned(),
        ..PetDraft::default()
    };
    catalog.create_pet(draft).await.unwrap().id
}

#[tokio::test]
async fn photo_names_are_normalized_and_stored() {
    let (dir, catalog) = catalog().await;
    let id = pet(&catalog).await;

    let photo = catalog.add_photo(id, FileUpload::new("meu cachorro.PNG", PNG)).await.unwrap();
    assert_eq!(photo.image, "img_pets/meu_cachorro.PNG");
    assert!(dir.path().join("img_pets/meu_cachorro.PNG").exists());

    let again = catalog.add_photo(id, FileUpload::new("meu cachorro.PNG", PNG)).await.unwrap();
    assert_ne!(again.image, photo.image);

    let detail = catalog.get_pet(id).unwrap();
    assert_eq!(detail.photos.len(), 2);
}

#[tokio::test]
async fn invalid_uploads_store_nothing() {
    let (dir, catalog) = catalog().await;
    let id = pet(&catalog).await;

    let err = catalog.add_photo(id, FileUpload::new("scan.gif", PNG)).await.unwrap_err();
    assert!(matches!(
        err.as_validation(),
        Some(ValidationError::UnsupportedFileType { .. })
    ));

    let big = vec![0_u8; 5 * 1024 * 1024 + 1];
    let err = catalog.add_photo(id, FileUpload::new("big.jpg", big)).await.unwrap_err();
    assert!(matches!(err.as_validation(), Some(ValidationError::FileTooLarge { .. })));

    let err = catalog.add_photo(PetId(42), FileUpload::new("rex.png", PNG)).await.unwrap_err();
    assert!(matches!(err, CatalogError::Domain { source: DomainError::NotFound { .. }, .. }));

    assert!(!dir.path().join("img_pets/big.jpg").exists());
    assert!(!dir.path().join("img_pets/rex.png").exists());
    assert!(catalog.get_pet(id).unwrap().photos.is_empty());
}

#[tokio::test]
async fn deleting_a_pet_removes_its_photos() {
    let (dir, catalog) = catalog().await;
    let id = pet(&catalog).await;
    catalog.add_photo(id, FileUpload::new("a.jpg", PNG)).await.unwrap();
    catalog.add_photo(id, FileUpload::new("b.jpeg", PNG)).await.unwrap();

    catalog.delete_pet(id).await.unwrap();

    assert!(!dir.path().join("img_pets/a.jpg").exists());
    assert!(!dir.path().join("img_pets/b.jpeg").exists());
    assert!(catalog.get_pet(id).is_err());
}

#[tokio::test]
async fn removing_a_photo_keeps_the_pet() {
    let (dir, catalog) = catalog().await;
    let id = pet(&catalog).await;
    let photo = catalog.add_photo(id, FileUpload::new("a.png", PNG)).await.unwrap();

    let removed = catalog.remove_photo(photo.id).await.unwrap();
    assert_eq!(removed, photo);
    assert!(!dir.path().join("img_pets/a.png").exists());
    assert!(catalog.get_pet(id).unwrap().photos.is_empty());

    assert!(catalog.remove_photo(photo.id).await.is_err());
}
