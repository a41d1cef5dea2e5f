use crate::ids::DocumentId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumMessage, EnumString};

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
    Display, EnumString, AsRefStr, EnumIter, EnumMessage,
)]
#[strum(ascii_case_insensitive)]
pub enum DocumentCategory {
    #[default]
    #[serde(rename = "MENSAL")]
    #[strum(serialize = "MENSAL", message = "Prestação de Contas Mensal")]
    Monthly,
    #[serde(rename = "ANUAL")]
    #[strum(serialize = "ANUAL", message = "Prestação de Contas Anual")]
    Annual,
    #[serde(rename = "ESTATUTO")]
    #[strum(serialize = "ESTATUTO", message = "Estatuto e Atas")]
    Bylaws,
    #[serde(rename = "ATIVIDADES")]
    #[strum(serialize = "ATIVIDADES", message = "Relatórios de Atividades")]
    Activities,
    #[serde(rename = "CERTIDOES")]
    #[strum(serialize = "CERTIDOES", message = "Certidões Negativas")]
    Certificates,
    #[serde(rename = "OUTROS")]
    #[strum(serialize = "OUTROS", message = "Outros Documentos")]
    Other,
}

/// A published financial-transparency PDF.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransparencyDocument {
    pub id: DocumentId,
    pub title: String,
    /// Content path of the stored PDF, e.g. `transparencia_pdfs/balanco.pdf`.
    pub file: String,
    pub category: DocumentCategory,
    /// Reference date used to file the document under a month and year.
    pub published_on: NaiveDate,
}
