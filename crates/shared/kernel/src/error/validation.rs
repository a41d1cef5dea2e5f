use ampa_domain::PetId;
use std::borrow::Cow;

/// A user-correctable rejection, surfaced next to the offending form field.
#[ampa_derive::ampa_error]
#[derive(PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field}: this field is required{}", format_context(.context))]
    Required { field: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("{field}: at most {max} characters allowed, got {actual}{}", format_context(.context))]
    TooLong { field: Cow<'static, str>, max: usize, actual: usize, context: Option<Cow<'static, str>> },

    #[error("{field}: file has {size} bytes, the limit is {max}{}", format_context(.context))]
    FileTooLarge { field: Cow<'static, str>, size: u64, max: u64, context: Option<Cow<'static, str>> },

    #[error("{field}: '.{extension}' files are not accepted, send {allowed}{}", format_context(.context))]
    UnsupportedFileType {
        field: Cow<'static, str>,
        extension: String,
        allowed: Cow<'static, str>,
        context: Option<Cow<'static, str>>,
    },

    #[error("{field}: a CPF has exactly 11 digits{}", format_context(.context))]
    InvalidCpf { field: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("{field}: '{value}' is not a valid e-mail address{}", format_context(.context))]
    InvalidEmail { field: Cow<'static, str>, value: String, context: Option<Cow<'static, str>> },

    #[error("{field}: '{value}' is already registered{}", format_context(.context))]
    Duplicate { field: Cow<'static, str>, value: String, context: Option<Cow<'static, str>> },

    /// Raised on the featured flag; another pet must be unfeatured first.
    #[error("At most {cap} pets can be featured on the home page{}", format_context(.context))]
    FeaturedCapReached { cap: usize, context: Option<Cow<'static, str>> },

    #[error("'{name}' ({pet}) is already adopted{}", format_context(.context))]
    PetAlreadyAdopted { pet: PetId, name: String, context: Option<Cow<'static, str>> },

    #[error("CAPTCHA verification failed{}", format_context(.context))]
    CaptchaRejected { context: Option<Cow<'static, str>> },
}

impl ValidationError {
    /// Form field the message belongs to; `None` for form-level messages.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Required { field, .. }
            | Self::TooLong { field, .. }
            | Self::FileTooLarge { field, .. }
            | Self::UnsupportedFileType { field, .. }
            | Self::InvalidCpf { field, .. }
            | Self::InvalidEmail { field, .. }
            | Self::Duplicate { field, .. } => Some(&**field),
            Self::FeaturedCapReached { .. } => Some("is_featured"),
            Self::PetAlreadyAdopted { .. } | Self::CaptchaRejected { .. } => None,
        }
    }
}
