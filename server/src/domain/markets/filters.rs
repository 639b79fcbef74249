//! Query parameters accepted by the market search

use crate::domain::query::{FieldSpec, FilterSpec, FilterSpecError};

/// Every market column, bindable under its own name, plus `nome` for `nome_feira`.
/// Integer columns: `id`, `coddist`, `codsubpref`.
pub fn market_filter_spec() -> Result<FilterSpec, FilterSpecError> {
    FilterSpec::new(vec![
        FieldSpec::integer("id"),
        FieldSpec::string("long"),
        FieldSpec::string("lat"),
        FieldSpec::string("setcens"),
        FieldSpec::string("areap"),
        FieldSpec::integer("coddist"),
        FieldSpec::string("distrito"),
        FieldSpec::integer("codsubpref"),
        FieldSpec::string("subprefe"),
        FieldSpec::string("regiao5"),
        FieldSpec::string("regiao8"),
        FieldSpec::string("nome_feira").with_alias("nome"),
        FieldSpec::string("registro"),
        FieldSpec::string("logradouro"),
        FieldSpec::string("numero"),
        FieldSpec::string("bairro"),
        FieldSpec::string("referencia"),
    ])
}
