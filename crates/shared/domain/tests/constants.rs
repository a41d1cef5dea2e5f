use ampa_domain::constants::{
    DATABASE_NAMESPACE, FEATURED_CAP, IMAGE_EXTENSIONS, PDF_EXTENSION, PET_IMAGES,
    TRANSPARENCY_PDFS,
};

#[test]
fn content_namespaces_match_public_paths() {
    assert_eq!(PET_IMAGES, "img_pets");
    assert_eq!(TRANSPARENCY_PDFS, "transparencia_pdfs");
    assert_eq!(DATABASE_NAMESPACE, "database");
}

#[test]
fn upload_rules_match_the_admin_contract() {
    assert_eq!(FEATURED_CAP, 4);
    assert_eq!(IMAGE_EXTENSIONS, &["jpg", "jpeg", "png"]);
    assert_eq!(PDF_EXTENSION, "pdf");
}
