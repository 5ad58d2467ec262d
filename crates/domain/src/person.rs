use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use talentra_core::RecordId;

use crate::dates;
use crate::wire;

/// One managed person, shared by the apprentice, competitor, and expert
/// screens and disambiguated by the `rol` field.
///
/// Field names serialize to the exact remote store contract. Variant-only
/// fields are optional and omitted from payloads when absent so an update
/// never silently resets server-held values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonRecord {
    /// Store-assigned identifier; absent until the record is persisted.
    #[serde(
        default,
        deserialize_with = "wire::optional_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    /// First name.
    #[serde(default)]
    pub name: String,
    /// Last name.
    #[serde(default)]
    pub last_name: String,
    /// Identity document type, one of [`crate::DOCUMENT_TYPES`].
    #[serde(default)]
    pub document_type: String,
    /// Identity document number, digits only.
    #[serde(default)]
    pub document_number: String,
    /// Contact email address.
    #[serde(default)]
    pub email: String,
    /// Birth date, canonical `YYYY-MM-DD`.
    #[serde(default)]
    pub birthdate: String,
    /// Contact phone number, digits only.
    #[serde(default)]
    pub phone: String,
    /// Formation program, one of [`crate::FORMATION_PROGRAMS`].
    #[serde(default)]
    pub program_name: String,
    /// Formation center, one of [`crate::FORMATION_CENTERS`].
    #[serde(default)]
    pub formation_center: String,
    /// Skill the person competes in.
    #[serde(default)]
    pub competition_name: String,
    /// Competition strategy or competence line.
    #[serde(default)]
    pub strategy_competition: String,
    /// Course sheet number.
    #[serde(default)]
    pub index_course: String,
    /// Role label distinguishing apprentices, competitors, and experts.
    #[serde(default)]
    pub rol: String,

    /// Expert-only working area.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,
    /// Expert-only institutional affiliation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sena_vinculation: Option<String>,

    /// Competitor-only blood type, one of [`crate::BLOOD_TYPES`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blood_type: Option<String>,
    /// Competitor-only diet preference, one of [`crate::DIET_PREFERENCES`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diet_preferences: Option<String>,
    /// Competitor-only hiring status, one of [`crate::HIRING_STATUSES`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hiring_status: Option<String>,
    /// Competitor-only productive stage modality.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub productive_stage_modality: Option<String>,
    /// Competitor-only sponsoring company name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    /// Competitor-only sponsoring company tax id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nit: Option<String>,
    /// Competitor-only immediate boss name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub immediate_boss_name: Option<String>,
    /// Competitor-only immediate boss email.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boss_email: Option<String>,
    /// Competitor-only immediate boss phone.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boss_phone: Option<String>,
    /// Competitor-only document date of issue. The serialized name keeps the
    /// store's historical casing.
    #[serde(
        default,
        rename = "documentDateOfissue",
        skip_serializing_if = "Option::is_none"
    )]
    pub document_date_of_issue: Option<String>,
}

impl PersonRecord {
    /// Joined full name shown by the read-only view screens.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.name, self.last_name)
    }

    /// Projects the editable fields into form values keyed by wire name.
    ///
    /// Date fields are canonicalized; absent variant-only fields project as
    /// empty strings so edit screens can fill them in.
    #[must_use]
    pub fn form_values(&self) -> BTreeMap<String, String> {
        let opt = |value: &Option<String>| value.clone().unwrap_or_default();

        BTreeMap::from([
            ("name".to_owned(), self.name.clone()),
            ("lastName".to_owned(), self.last_name.clone()),
            ("documentType".to_owned(), self.document_type.clone()),
            ("documentNumber".to_owned(), self.document_number.clone()),
            ("email".to_owned(), self.email.clone()),
            ("birthdate".to_owned(), dates::normalize(&self.birthdate)),
            ("phone".to_owned(), self.phone.clone()),
            ("programName".to_owned(), self.program_name.clone()),
            ("formationCenter".to_owned(), self.formation_center.clone()),
            ("competitionName".to_owned(), self.competition_name.clone()),
            (
                "strategyCompetition".to_owned(),
                self.strategy_competition.clone(),
            ),
            ("indexCourse".to_owned(), self.index_course.clone()),
            ("rol".to_owned(), self.rol.clone()),
            ("area".to_owned(), opt(&self.area)),
            ("senaVinculation".to_owned(), opt(&self.sena_vinculation)),
            ("bloodType".to_owned(), opt(&self.blood_type)),
            ("dietPreferences".to_owned(), opt(&self.diet_preferences)),
            ("hiringStatus".to_owned(), opt(&self.hiring_status)),
            (
                "productiveStageModality".to_owned(),
                opt(&self.productive_stage_modality),
            ),
            ("companyName".to_owned(), opt(&self.company_name)),
            ("nit".to_owned(), opt(&self.nit)),
            ("immediateBossName".to_owned(), opt(&self.immediate_boss_name)),
            ("bossEmail".to_owned(), opt(&self.boss_email)),
            ("bossPhone".to_owned(), opt(&self.boss_phone)),
            (
                "documentDateOfissue".to_owned(),
                dates::normalize(&opt(&self.document_date_of_issue)),
            ),
        ])
    }

    /// Rebuilds a record from form values, carrying the id through unchanged.
    ///
    /// Blank variant-only values collapse back to `None` so they stay out of
    /// the serialized payload.
    #[must_use]
    pub fn from_form_values(id: Option<&RecordId>, values: &BTreeMap<String, String>) -> Self {
        let text = |key: &str| values.get(key).cloned().unwrap_or_default();
        let opt = |key: &str| {
            values
                .get(key)
                .map(|value| value.trim())
                .filter(|value| !value.is_empty())
                .map(str::to_owned)
        };

        Self {
            id: id.map(|id| id.as_str().to_owned()),
            name: text("name"),
            last_name: text("lastName"),
            document_type: text("documentType"),
            document_number: text("documentNumber"),
            email: text("email"),
            birthdate: dates::normalize(&text("birthdate")),
            phone: text("phone"),
            program_name: text("programName"),
            formation_center: text("formationCenter"),
            competition_name: text("competitionName"),
            strategy_competition: text("strategyCompetition"),
            index_course: text("indexCourse"),
            rol: text("rol"),
            area: opt("area"),
            sena_vinculation: opt("senaVinculation"),
            blood_type: opt("bloodType"),
            diet_preferences: opt("dietPreferences"),
            hiring_status: opt("hiringStatus"),
            productive_stage_modality: opt("productiveStageModality"),
            company_name: opt("companyName"),
            nit: opt("nit"),
            immediate_boss_name: opt("immediateBossName"),
            boss_email: opt("bossEmail"),
            boss_phone: opt("bossPhone"),
            document_date_of_issue: opt("documentDateOfissue").map(|raw| dates::normalize(&raw)),
        }
    }
}
