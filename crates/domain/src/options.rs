//! Fixed option catalogs backing enumerated-choice form fields.

/// Closed set of values for one enumerated-choice field.
///
/// Create screens seed the field with [`OptionCatalog::default_value`];
/// validation only accepts members of the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionCatalog {
    values: &'static [&'static str],
    default_value: &'static str,
}

impl OptionCatalog {
    const fn new(values: &'static [&'static str], default_value: &'static str) -> Self {
        Self {
            values,
            default_value,
        }
    }

    /// Returns every value in display order.
    #[must_use]
    pub fn values(&self) -> &'static [&'static str] {
        self.values
    }

    /// Returns the value create screens are seeded with.
    #[must_use]
    pub fn default_value(&self) -> &'static str {
        self.default_value
    }

    /// Returns whether the value belongs to the catalog.
    #[must_use]
    pub fn contains(&self, value: &str) -> bool {
        self.values.iter().any(|known| *known == value)
    }
}

/// Identity document types.
pub static DOCUMENT_TYPES: OptionCatalog = OptionCatalog::new(
    &[
        "Cédula de ciudadanía",
        "Tarjeta de identidad",
        "Cédula de extranjería",
    ],
    "Cédula de ciudadanía",
);

/// Formation centers a person can be attached to.
pub static FORMATION_CENTERS: OptionCatalog = OptionCatalog::new(
    &[
        "Centro Atención Sector Agropecuario",
        "Centro de Diseño e Innovación Tecnológica Industrial",
        "Centro de comercio y servicios",
    ],
    "Centro de Diseño e Innovación Tecnológica Industrial",
);

/// Formation programs.
pub static FORMATION_PROGRAMS: OptionCatalog = OptionCatalog::new(
    &[
        "Análisis y desarrollo de software",
        "Multimedia",
        "Infraestructura",
    ],
    "Análisis y desarrollo de software",
);

/// Blood types.
pub static BLOOD_TYPES: OptionCatalog = OptionCatalog::new(
    &["O-", "O+", "A+", "A-", "B-", "B+", "AB-", "AB+"],
    "O+",
);

/// Diet preferences.
pub static DIET_PREFERENCES: OptionCatalog = OptionCatalog::new(
    &["Normal", "Vegetariano", "Vegano", "Sin gluten", "Ninguna"],
    "Ninguna",
);

/// Hiring status for competitors in their productive stage.
pub static HIRING_STATUSES: OptionCatalog =
    OptionCatalog::new(&["Patrocinado", "No patrocinado"], "Patrocinado");
