mod instituicao;
mod record;
mod voluntario;

pub use instituicao::{Instituicao, InstituicaoFilter};
pub use record::{RecordId, Stored};
pub use voluntario::{Voluntario, VoluntarioFilter};
