/// One mebibyte, the unit upload limits are expressed in.
pub const MIB: u64 = 1024 * 1024;

/// Maximum number of pets featured on the home page at the same time.
pub const FEATURED_CAP: usize = 4;
/// Number of pets the home page showcase displays.
pub const SHOWCASE_SIZE: usize = 3;

pub const IMAGE_MAX_BYTES: u64 = 5 * MIB;
pub const PDF_MAX_BYTES: u64 = 3 * MIB;
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];
pub const PDF_EXTENSION: &str = "pdf";

/// Content namespace of pet photos.
pub const PET_IMAGES: &str = "img_pets";
/// Content namespace of transparency PDFs.
pub const TRANSPARENCY_PDFS: &str = "transparencia_pdfs";
/// Storage namespace holding the entity snapshot.
pub const DATABASE_NAMESPACE: &str = "database";

/// Breed pre-filled for mixed-breed animals ("sem raça definida").
pub const DEFAULT_BREED: &str = "SRD";
pub const DEFAULT_NOTIFICATION_EMAIL: &str = "ampa.mirassol@hotmail.com";

pub const CPF_DIGITS: usize = 11;
pub const PET_NAME_MAX: usize = 50;
pub const PET_BREED_MAX: usize = 50;
pub const PET_COLOR_MAX: usize = 30;
pub const PERSON_NAME_MAX: usize = 100;
pub const PHONE_MAX: usize = 20;
pub const EMAIL_MAX: usize = 100;
pub const ADDRESS_MAX: usize = 255;
pub const DOCUMENT_TITLE_MAX: usize = 200;
