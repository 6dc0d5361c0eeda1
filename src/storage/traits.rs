use crate::types::{Instituicao, InstituicaoFilter, Stored, Voluntario, VoluntarioFilter};

use super::StoreResult;

/// Read side of the two document collections. `list_*` returns every record
/// in insertion order; `find_*` keeps only the records the filter matches;
/// `count_*` is the collection's document count (the backend may answer with
/// a cheap estimate rather than a guaranteed-exact figure).
pub trait StorageRead {
    fn list_voluntarios(&self) -> StoreResult<Vec<Stored<Voluntario>>>;
    fn find_voluntarios(&self, filter: &VoluntarioFilter) -> StoreResult<Vec<Stored<Voluntario>>>;
    fn count_voluntarios(&self) -> StoreResult<u64>;

    fn list_instituicoes(&self) -> StoreResult<Vec<Stored<Instituicao>>>;
    fn find_instituicoes(
        &self,
        filter: &InstituicaoFilter,
    ) -> StoreResult<Vec<Stored<Instituicao>>>;
    fn count_instituicoes(&self) -> StoreResult<u64>;
}

/// Write side. `update_*` replaces the first matching record's fields with
/// the supplied record and `delete_*` removes the first match, both failing
/// with `StoreError::NotFound` when nothing matches. `add_tarefa` appends one
/// task to the first matching institution.
pub trait StorageWrite {
    fn insert_voluntario(&self, record: Voluntario) -> StoreResult<Stored<Voluntario>>;
    fn update_voluntario(
        &self,
        filter: &VoluntarioFilter,
        record: Voluntario,
    ) -> StoreResult<Stored<Voluntario>>;
    fn delete_voluntario(&self, filter: &VoluntarioFilter) -> StoreResult<Stored<Voluntario>>;

    fn insert_instituicao(&self, record: Instituicao) -> StoreResult<Stored<Instituicao>>;
    fn update_instituicao(
        &self,
        filter: &InstituicaoFilter,
        record: Instituicao,
    ) -> StoreResult<Stored<Instituicao>>;
    fn delete_instituicao(&self, filter: &InstituicaoFilter) -> StoreResult<Stored<Instituicao>>;
    fn add_tarefa(
        &self,
        filter: &InstituicaoFilter,
        tarefa: &str,
    ) -> StoreResult<Stored<Instituicao>>;
}

pub trait Storage: StorageRead + StorageWrite {}

impl<S: StorageRead + StorageWrite> Storage for S {}
