//! Form state and multipart field contracts for every mutating screen.
//!
//! The backend binds multipart requests by flat field name (including dotted
//! keys like `servidorPublico.nomeCompleto`), so each form encodes that
//! contract in exactly one `into_parts` function, unit-tested against the
//! literal field set the backend expects.

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

use crate::format::format_phone;
use crate::model::{Process, ProcessStatus, Sector};

/// Client-side attachment cap, enforced before any network call.
pub const MAX_ATTACHMENT_BYTES: u64 = 10 * 1024 * 1024;

#[derive(Error, Debug)]
pub enum FormError {
    #[error("attachment '{name}' is {size} bytes; limit is {MAX_ATTACHMENT_BYTES}")]
    AttachmentTooLarge { name: String, size: u64 },
    #[error("required field missing: {0}")]
    MissingField(&'static str),
    #[error("justification must have at least {min} characters")]
    JustificationTooShort { min: usize },
    #[error("attach at least one document (legal opinion or executive memo)")]
    NoDocumentAttached,
}

/// A file selected for upload.
#[derive(Debug, Clone)]
pub struct Attachment {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl Attachment {
    /// Rejects files over [`MAX_ATTACHMENT_BYTES`].
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Result<Self, FormError> {
        let file_name = file_name.into();
        let size = bytes.len() as u64;
        if size > MAX_ATTACHMENT_BYTES {
            return Err(FormError::AttachmentTooLarge { name: file_name, size });
        }
        Ok(Self { file_name, bytes })
    }
}

/// One field of a flat multipart body.
#[derive(Debug)]
pub enum FormPart {
    Text { name: &'static str, value: String },
    File { name: &'static str, attachment: Attachment },
}

impl FormPart {
    pub fn name(&self) -> &'static str {
        match self {
            FormPart::Text { name, .. } | FormPart::File { name, .. } => name,
        }
    }
}

/// State of the "new process" modal.
#[derive(Debug, Clone, Default)]
pub struct CreateProcessForm {
    pub beneficiary_name: String,
    pub phone: String,
    pub subject: String,
    pub sector: Option<Sector>,
    pub opened_on: Option<NaiveDate>,
    pub estimate_days: i64,
    pub request_doc: Option<Attachment>,
    pub legal_memo: Option<Attachment>,
}

impl CreateProcessForm {
    /// Blank form with the opening date defaulted to today.
    pub fn new(today: NaiveDate) -> Self {
        Self { opened_on: Some(today), ..Default::default() }
    }

    /// Phone input is masked as it is typed.
    pub fn set_phone(&mut self, raw: &str) {
        self.phone = format_phone(raw);
    }

    /// Opening date may not be in the future; later dates are ignored.
    pub fn set_opened_on(&mut self, date: NaiveDate, today: NaiveDate) {
        if date <= today {
            self.opened_on = Some(date);
        }
    }

    /// Estimate is clamped to the 1..=365 day range.
    pub fn set_estimate(&mut self, days: i64) {
        self.estimate_days = days.clamp(1, 365);
    }

    /// Submit gate: every required field at or past its presence threshold.
    pub fn is_valid(&self) -> bool {
        self.beneficiary_name.trim().len() >= 3
            && self.phone.trim().len() >= 8
            && !self.subject.trim().is_empty()
            && self.sector.is_some()
            && self.opened_on.is_some()
            && self.estimate_days > 0
            && self.request_doc.is_some()
            && self.legal_memo.is_some()
    }

    /// Flat multipart field set for `POST /processos`.
    pub fn into_parts(self) -> Result<Vec<FormPart>, FormError> {
        let sector = self.sector.ok_or(FormError::MissingField("setor"))?;
        let opened_on = self.opened_on.ok_or(FormError::MissingField("dataAbertura"))?;
        let request_doc = self.request_doc.ok_or(FormError::MissingField("reqPessoa"))?;
        let legal_memo = self.legal_memo.ok_or(FormError::MissingField("memSolicitacaoJur"))?;

        Ok(vec![
            FormPart::Text {
                name: "servidorPublico.nomeCompleto",
                value: self.beneficiary_name,
            },
            FormPart::Text { name: "servidorPublico.telefone", value: self.phone },
            FormPart::Text { name: "assunto", value: self.subject },
            FormPart::Text { name: "setor", value: sector.wire_name().to_string() },
            FormPart::Text { name: "dataAbertura", value: opened_on.to_string() },
            FormPart::Text { name: "estimativa", value: self.estimate_days.to_string() },
            // New processes always start in legal review.
            FormPart::Text {
                name: "status",
                value: ProcessStatus::InProgressLegal.wire_name().to_string(),
            },
            FormPart::File { name: "reqPessoa", attachment: request_doc },
            FormPart::File { name: "memSolicitacaoJur", attachment: legal_memo },
        ])
    }
}

/// State of the detail-screen editor; mirrors the create form plus optional
/// per-slot document replacements.
#[derive(Debug, Clone, Default)]
pub struct UpdateProcessForm {
    pub beneficiary_name: String,
    pub phone: String,
    pub subject: String,
    pub sector: Option<Sector>,
    pub opened_on: Option<NaiveDate>,
    pub estimate_days: i64,
    pub request_doc: Option<Attachment>,
    pub legal_memo: Option<Attachment>,
    pub legal_opinion: Option<Attachment>,
    pub executive_memo: Option<Attachment>,
    pub executive_decision: Option<Attachment>,
}

impl UpdateProcessForm {
    /// Editor prefilled from the loaded record; document slots start empty so
    /// only files the user re-selects are resubmitted.
    pub fn prefill(process: &Process) -> Self {
        Self {
            beneficiary_name: process.beneficiary.clone(),
            phone: process.phone.clone().unwrap_or_default(),
            subject: process.subject.clone().unwrap_or_default(),
            sector: Some(process.sector),
            opened_on: process.opened_on,
            estimate_days: process.estimate_days.unwrap_or(1),
            ..Default::default()
        }
    }

    pub fn set_phone(&mut self, raw: &str) {
        self.phone = format_phone(raw);
    }

    /// Same presence gate as the create form, minus the attachments (the
    /// record already holds its documents).
    pub fn is_valid(&self) -> bool {
        self.beneficiary_name.trim().len() >= 3
            && !self.subject.trim().is_empty()
            && self.sector.is_some()
            && self.opened_on.is_some()
            && self.estimate_days > 0
    }

    /// Flat multipart field set for `PUT /processos/{id}`. Only replaced
    /// document slots are included.
    pub fn into_parts(self) -> Vec<FormPart> {
        let mut parts = vec![
            FormPart::Text { name: "assunto", value: self.subject },
            FormPart::Text {
                name: "setor",
                value: self.sector.map(|s| s.wire_name().to_string()).unwrap_or_default(),
            },
            FormPart::Text {
                name: "dataAbertura",
                value: self.opened_on.map(|d| d.to_string()).unwrap_or_default(),
            },
            FormPart::Text { name: "estimativa", value: self.estimate_days.to_string() },
            FormPart::Text {
                name: "servidorPublico.nomeCompleto",
                value: self.beneficiary_name,
            },
            FormPart::Text {
                name: "servidorPublico.telefone",
                // The backend rejects a blank phone on update.
                value: if self.phone.trim().is_empty() {
                    "00000000000".to_string()
                } else {
                    self.phone
                },
            },
        ];

        let slots = [
            ("reqPessoa", self.request_doc),
            ("memSolicitacaoJur", self.legal_memo),
            ("parecerJuridico", self.legal_opinion),
            ("memorandoPref", self.executive_memo),
            ("decisaoPrefeito", self.executive_decision),
        ];
        for (name, slot) in slots {
            if let Some(attachment) = slot {
                parts.push(FormPart::File { name, attachment });
            }
        }
        parts
    }
}

/// State of the "transfer sector" modal.
#[derive(Debug, Clone, Default)]
pub struct TransferForm {
    pub legal_opinion: Option<Attachment>,
    pub executive_memo: Option<Attachment>,
}

impl TransferForm {
    pub fn has_document(&self) -> bool {
        self.legal_opinion.is_some() || self.executive_memo.is_some()
    }

    /// Flat multipart field set for `PUT /processos/{id}/transferencia`.
    ///
    /// Each attached document carries a flag asking the backend to sign it
    /// with the configured certificate.
    pub fn into_parts(self) -> Result<Vec<FormPart>, FormError> {
        if !self.has_document() {
            return Err(FormError::NoDocumentAttached);
        }
        let mut parts = Vec::new();
        if let Some(opinion) = self.legal_opinion {
            parts.push(FormPart::File { name: "parecerJuridico", attachment: opinion });
            parts.push(FormPart::Text { name: "assinarParecer", value: "true".into() });
        }
        if let Some(memo) = self.executive_memo {
            parts.push(FormPart::File { name: "memorandoPref", attachment: memo });
            parts.push(FormPart::Text { name: "assinarMemorando", value: "true".into() });
        }
        Ok(parts)
    }
}

/// State of the "finalize process" modal.
#[derive(Debug, Clone, Default)]
pub struct FinalizeForm {
    pub decision: Option<Attachment>,
}

impl FinalizeForm {
    pub fn is_valid(&self) -> bool {
        self.decision.is_some()
    }

    /// Flat multipart field set for `PUT /processos/{id}/finalizar`.
    pub fn into_parts(self) -> Result<Vec<FormPart>, FormError> {
        let decision = self.decision.ok_or(FormError::MissingField("decisaoPrefeito"))?;
        Ok(vec![FormPart::File { name: "decisaoPrefeito", attachment: decision }])
    }
}

pub const CANCEL_JUSTIFICATION_MIN: usize = 5;

/// JSON body of `PUT /processos/{id}/cancelar`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CancelForm {
    #[serde(rename = "observacao")]
    pub justification: String,
}

impl CancelForm {
    pub fn is_valid(&self) -> bool {
        self.justification.trim().len() >= CANCEL_JUSTIFICATION_MIN
    }

    pub fn validate(&self) -> Result<(), FormError> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(FormError::JustificationTooShort { min: CANCEL_JUSTIFICATION_MIN })
        }
    }
}

/// JSON body of the server create/update endpoints.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ServerForm {
    #[serde(rename = "nomeCompleto")]
    pub full_name: String,
    #[serde(rename = "telefone")]
    pub phone: String,
}

impl ServerForm {
    pub fn set_phone(&mut self, raw: &str) {
        self.phone = format_phone(raw);
    }

    /// Masked landline `(xx) xxxx-xxxx` is 14 chars; 10 is the bare minimum.
    pub fn is_valid(&self) -> bool {
        self.full_name.trim().len() >= 3 && self.phone.trim().len() >= 10
    }
}

/// State of the certificate upload form.
#[derive(Debug, Clone, Default)]
pub struct CertificateForm {
    pub archive: Option<Attachment>,
    pub password: String,
}

impl CertificateForm {
    pub fn is_valid(&self) -> bool {
        self.archive.is_some() && !self.password.is_empty()
    }

    /// Flat multipart field set for `POST /api/config/certificado`.
    pub fn into_parts(self) -> Result<Vec<FormPart>, FormError> {
        let archive = self.archive.ok_or(FormError::MissingField("arquivo"))?;
        Ok(vec![
            FormPart::File { name: "arquivo", attachment: archive },
            FormPart::Text { name: "senha", value: self.password },
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pdf(name: &str) -> Attachment {
        Attachment::new(name, vec![0u8; 128]).unwrap()
    }

    fn today() -> NaiveDate {
        "2026-08-26".parse().unwrap()
    }

    fn valid_create_form() -> CreateProcessForm {
        let mut form = CreateProcessForm::new(today());
        form.beneficiary_name = "Maria Souza".into();
        form.set_phone("11987654321");
        form.subject = "Licenca premio".into();
        form.sector = Some(Sector::Legal);
        form.set_estimate(30);
        form.request_doc = Some(pdf("req.pdf"));
        form.legal_memo = Some(pdf("memo.pdf"));
        form
    }

    #[test]
    fn attachment_rejects_oversize() {
        let err = Attachment::new("big.pdf", vec![0u8; (MAX_ATTACHMENT_BYTES + 1) as usize]);
        assert!(matches!(err, Err(FormError::AttachmentTooLarge { .. })));
        assert!(Attachment::new("ok.pdf", vec![0u8; 1024]).is_ok());
    }

    #[test]
    fn create_form_gate_requires_every_field() {
        assert!(valid_create_form().is_valid());

        let mut f = valid_create_form();
        f.beneficiary_name = "Ab".into();
        assert!(!f.is_valid());

        let mut f = valid_create_form();
        f.phone = "1234567".into();
        assert!(!f.is_valid());

        let mut f = valid_create_form();
        f.subject = "   ".into();
        assert!(!f.is_valid());

        let mut f = valid_create_form();
        f.sector = None;
        assert!(!f.is_valid());

        let mut f = valid_create_form();
        f.opened_on = None;
        assert!(!f.is_valid());

        let mut f = valid_create_form();
        f.estimate_days = 0;
        assert!(!f.is_valid());

        let mut f = valid_create_form();
        f.request_doc = None;
        assert!(!f.is_valid());

        let mut f = valid_create_form();
        f.legal_memo = None;
        assert!(!f.is_valid());
    }

    #[test]
    fn create_form_ignores_future_opening_dates() {
        let mut form = CreateProcessForm::new(today());
        form.set_opened_on("2026-12-01".parse().unwrap(), today());
        assert_eq!(form.opened_on, Some(today()));
        form.set_opened_on("2026-08-01".parse().unwrap(), today());
        assert_eq!(form.opened_on, Some("2026-08-01".parse().unwrap()));
    }

    #[test]
    fn create_form_clamps_estimate() {
        let mut form = CreateProcessForm::new(today());
        form.set_estimate(0);
        assert_eq!(form.estimate_days, 1);
        form.set_estimate(1000);
        assert_eq!(form.estimate_days, 365);
    }

    #[test]
    fn create_form_emits_exact_backend_field_set() {
        let parts = valid_create_form().into_parts().unwrap();
        let names: Vec<&str> = parts.iter().map(|p| p.name()).collect();
        assert_eq!(
            names,
            vec![
                "servidorPublico.nomeCompleto",
                "servidorPublico.telefone",
                "assunto",
                "setor",
                "dataAbertura",
                "estimativa",
                "status",
                "reqPessoa",
                "memSolicitacaoJur",
            ]
        );

        let status = parts.iter().find_map(|p| match p {
            FormPart::Text { name: "status", value } => Some(value.clone()),
            _ => None,
        });
        assert_eq!(status.as_deref(), Some("Em_Processamento_Juridico"));
        let date = parts.iter().find_map(|p| match p {
            FormPart::Text { name: "dataAbertura", value } => Some(value.clone()),
            _ => None,
        });
        assert_eq!(date.as_deref(), Some("2026-08-26"));
    }

    #[test]
    fn update_form_prefills_from_record_without_documents() {
        let json = r#"{
            "id_processo": 9, "nomeBeneficiado": "Ana Lima", "telefone": null,
            "assunto": "Gratificacao", "setor": "GABINETE",
            "dataAbertura": "2026-05-10", "estimativa": 20,
            "dataPrevisao": "2026-05-30", "dataFechamento": null,
            "status": "Em_Processamento_Prefeito"
        }"#;
        let process: Process = serde_json::from_str(json).unwrap();
        let form = UpdateProcessForm::prefill(&process);
        assert_eq!(form.beneficiary_name, "Ana Lima");
        assert_eq!(form.phone, "");
        assert_eq!(form.sector, Some(Sector::Cabinet));
        assert_eq!(form.estimate_days, 20);
        assert!(form.request_doc.is_none() && form.legal_opinion.is_none());
        assert!(form.is_valid());
    }

    #[test]
    fn update_form_includes_only_replaced_slots() {
        let form = UpdateProcessForm {
            beneficiary_name: "Jose Santos".into(),
            phone: "(11) 3333-4444".into(),
            subject: "Revisao".into(),
            sector: Some(Sector::Cabinet),
            opened_on: Some("2026-07-01".parse().unwrap()),
            estimate_days: 15,
            legal_opinion: Some(pdf("parecer.pdf")),
            ..Default::default()
        };
        let names: Vec<&str> = form.into_parts().iter().map(|p| p.name()).collect();
        assert_eq!(
            names,
            vec![
                "assunto",
                "setor",
                "dataAbertura",
                "estimativa",
                "servidorPublico.nomeCompleto",
                "servidorPublico.telefone",
                "parecerJuridico",
            ]
        );
    }

    #[test]
    fn update_form_substitutes_blank_phone() {
        let form = UpdateProcessForm { phone: "  ".into(), ..Default::default() };
        let phone = form.into_parts().into_iter().find_map(|p| match p {
            FormPart::Text { name: "servidorPublico.telefone", value } => Some(value),
            _ => None,
        });
        assert_eq!(phone.as_deref(), Some("00000000000"));
    }

    #[test]
    fn transfer_form_requires_at_least_one_document() {
        let empty = TransferForm::default();
        assert!(!empty.has_document());
        assert!(matches!(empty.into_parts(), Err(FormError::NoDocumentAttached)));
    }

    #[test]
    fn transfer_form_pairs_each_file_with_signing_flag() {
        let both = TransferForm {
            legal_opinion: Some(pdf("parecer.pdf")),
            executive_memo: Some(pdf("memorando.pdf")),
        };
        let names: Vec<&str> = both.into_parts().unwrap().iter().map(|p| p.name()).collect();
        assert_eq!(
            names,
            vec!["parecerJuridico", "assinarParecer", "memorandoPref", "assinarMemorando"]
        );

        let only_memo = TransferForm {
            executive_memo: Some(pdf("memorando.pdf")),
            ..Default::default()
        };
        let names: Vec<&str> = only_memo.into_parts().unwrap().iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["memorandoPref", "assinarMemorando"]);
    }

    #[test]
    fn finalize_form_requires_decision() {
        assert!(!FinalizeForm::default().is_valid());
        assert!(FinalizeForm::default().into_parts().is_err());

        let form = FinalizeForm { decision: Some(pdf("decisao.pdf")) };
        let names: Vec<&str> = form.into_parts().unwrap().iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["decisaoPrefeito"]);
    }

    #[test]
    fn cancel_form_minimum_justification() {
        let short = CancelForm { justification: "no".into() };
        assert!(!short.is_valid());
        assert!(short.validate().is_err());

        let padded = CancelForm { justification: "  ab  ".into() };
        assert!(!padded.is_valid());

        let ok = CancelForm { justification: "valid reason".into() };
        assert!(ok.is_valid());
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn cancel_form_wire_body() {
        let form = CancelForm { justification: "duplicated request".into() };
        let json = serde_json::to_string(&form).unwrap();
        assert_eq!(json, r#"{"observacao":"duplicated request"}"#);
    }

    #[test]
    fn server_form_validation_and_wire_body() {
        let mut form = ServerForm { full_name: "Joao da Silva".into(), ..Default::default() };
        form.set_phone("1133334444");
        assert!(form.is_valid());
        assert_eq!(
            serde_json::to_string(&form).unwrap(),
            r#"{"nomeCompleto":"Joao da Silva","telefone":"(11) 3333-4444"}"#
        );

        let short_name = ServerForm { full_name: "Jo".into(), phone: "(11) 3333-4444".into() };
        assert!(!short_name.is_valid());
    }

    #[test]
    fn certificate_form_gate_and_parts() {
        assert!(!CertificateForm::default().is_valid());
        let no_password = CertificateForm {
            archive: Some(pdf("cert.pfx")),
            password: String::new(),
        };
        assert!(!no_password.is_valid());

        let form = CertificateForm {
            archive: Some(pdf("cert.pfx")),
            password: "secret".into(),
        };
        assert!(form.is_valid());
        let names: Vec<&str> = form.into_parts().unwrap().iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["arquivo", "senha"]);
    }
}
