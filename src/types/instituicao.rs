use serde::{Deserialize, Serialize};

/// An institution document. `tarefas` is informally a list of task
/// descriptions kept in one text field; `push_tarefa` appends to it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Instituicao {
    pub nome: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telefone: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub morada: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tarefas: Option<String>,
}

const TAREFA_SEPARATOR: &str = "; ";

impl Instituicao {
    pub fn push_tarefa(&mut self, tarefa: &str) {
        self.tarefas = Some(match self.tarefas.take() {
            Some(existing) if !existing.is_empty() => {
                format!("{existing}{TAREFA_SEPARATOR}{tarefa}")
            }
            _ => tarefa.to_string(),
        });
    }
}

/// Partial-field match over institutions, provided fields only.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct InstituicaoFilter {
    pub nome: Option<String>,
    pub telefone: Option<u64>,
    pub morada: Option<String>,
    pub tarefas: Option<String>,
}

impl InstituicaoFilter {
    pub fn by_nome(nome: impl Into<String>) -> Self {
        Self {
            nome: Some(nome.into()),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.nome.is_none()
            && self.telefone.is_none()
            && self.morada.is_none()
            && self.tarefas.is_none()
    }

    pub fn matches(&self, record: &Instituicao) -> bool {
        if let Some(nome) = &self.nome {
            if nome != &record.nome {
                return false;
            }
        }
        if let Some(telefone) = self.telefone {
            if record.telefone != Some(telefone) {
                return false;
            }
        }
        if let Some(morada) = &self.morada {
            if record.morada.as_deref() != Some(morada.as_str()) {
                return false;
            }
        }
        if let Some(tarefas) = &self.tarefas {
            if record.tarefas.as_deref() != Some(tarefas.as_str()) {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cruz_vermelha() -> Instituicao {
        Instituicao {
            nome: "Cruz Vermelha".to_string(),
            telefone: Some(211234567),
            morada: Some("Lisboa".to_string()),
            tarefas: Some("Distribuir alimentos".to_string()),
        }
    }

    #[test]
    fn push_tarefa_appends_with_separator() {
        let mut record = cruz_vermelha();
        record.push_tarefa("Recolher roupa");
        assert_eq!(
            record.tarefas.as_deref(),
            Some("Distribuir alimentos; Recolher roupa")
        );
    }

    #[test]
    fn push_tarefa_sets_field_when_absent() {
        let mut record = cruz_vermelha();
        record.tarefas = None;
        record.push_tarefa("Distribuir alimentos");
        assert_eq!(record.tarefas.as_deref(), Some("Distribuir alimentos"));
    }

    #[test]
    fn push_tarefa_replaces_empty_field() {
        let mut record = cruz_vermelha();
        record.tarefas = Some(String::new());
        record.push_tarefa("Distribuir alimentos");
        assert_eq!(record.tarefas.as_deref(), Some("Distribuir alimentos"));
    }

    #[test]
    fn filter_by_nome_matches_exactly() {
        assert!(InstituicaoFilter::by_nome("Cruz Vermelha").matches(&cruz_vermelha()));
        assert!(!InstituicaoFilter::by_nome("cruz vermelha").matches(&cruz_vermelha()));
    }
}
