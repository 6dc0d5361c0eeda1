use serde::{Deserialize, Serialize};

/// A volunteer document. `nome` is the only required field; the rest follow
/// the collection schema and stay optional.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Voluntario {
    pub nome: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idade: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telefone: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genero: Option<String>,
}

/// Partial-field match over volunteers. Only the provided fields are
/// compared, each by exact equality.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct VoluntarioFilter {
    pub nome: Option<String>,
    pub idade: Option<u32>,
    pub telefone: Option<u64>,
    pub genero: Option<String>,
}

impl VoluntarioFilter {
    pub fn by_nome(nome: impl Into<String>) -> Self {
        Self {
            nome: Some(nome.into()),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.nome.is_none()
            && self.idade.is_none()
            && self.telefone.is_none()
            && self.genero.is_none()
    }

    pub fn matches(&self, record: &Voluntario) -> bool {
        if let Some(nome) = &self.nome {
            if nome != &record.nome {
                return false;
            }
        }
        if let Some(idade) = self.idade {
            if record.idade != Some(idade) {
                return false;
            }
        }
        if let Some(telefone) = self.telefone {
            if record.telefone != Some(telefone) {
                return false;
            }
        }
        if let Some(genero) = &self.genero {
            if record.genero.as_deref() != Some(genero.as_str()) {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ana() -> Voluntario {
        Voluntario {
            nome: "Ana".to_string(),
            idade: Some(22),
            telefone: Some(912345678),
            genero: Some("Feminino".to_string()),
        }
    }

    #[test]
    fn empty_filter_matches_everything() {
        let filter = VoluntarioFilter::default();
        assert!(filter.is_empty());
        assert!(filter.matches(&ana()));
    }

    #[test]
    fn filter_compares_only_provided_fields() {
        let filter = VoluntarioFilter {
            genero: Some("Feminino".to_string()),
            ..VoluntarioFilter::default()
        };
        assert!(filter.matches(&ana()));

        let filter = VoluntarioFilter {
            genero: Some("Masculino".to_string()),
            ..VoluntarioFilter::default()
        };
        assert!(!filter.matches(&ana()));
    }

    #[test]
    fn filter_on_absent_optional_field_does_not_match() {
        let mut record = ana();
        record.idade = None;
        let filter = VoluntarioFilter {
            idade: Some(22),
            ..VoluntarioFilter::default()
        };
        assert!(!filter.matches(&record));
    }

    #[test]
    fn nome_is_required_on_deserialization() {
        let err = serde_json::from_str::<Voluntario>(r#"{"idade":22}"#).unwrap_err();
        assert!(err.to_string().contains("nome"));
    }

    #[test]
    fn mistyped_field_is_rejected() {
        assert!(serde_json::from_str::<Voluntario>(r#"{"nome":"Ana","idade":"22?"}"#).is_err());
    }
}
