//! Market row type

use crate::domain::markets::Market;

/// Columns selected for every market read, in table order
pub const MARKET_COLUMNS: &str = "id, long, lat, setcens, areap, coddist, distrito, codsubpref, \
     subprefe, regiao5, regiao8, nome_feira, registro, logradouro, numero, bairro, referencia, \
     created_at, updated_at";

/// A stored market as read from the `markets` table
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct MarketRow {
    pub id: i64,
    pub long: String,
    pub lat: String,
    pub setcens: String,
    pub areap: String,
    pub coddist: i64,
    pub distrito: String,
    pub codsubpref: i64,
    pub subprefe: String,
    pub regiao5: String,
    pub regiao8: String,
    pub nome_feira: String,
    pub registro: String,
    pub logradouro: String,
    pub numero: String,
    pub bairro: String,
    pub referencia: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<MarketRow> for Market {
    fn from(row: MarketRow) -> Self {
        Self {
            id: row.id,
            long: row.long,
            lat: row.lat,
            setcens: row.setcens,
            areap: row.areap,
            coddist: row.coddist,
            distrito: row.distrito,
            codsubpref: row.codsubpref,
            subprefe: row.subprefe,
            regiao5: row.regiao5,
            regiao8: row.regiao8,
            nome_feira: row.nome_feira,
            registro: row.registro,
            logradouro: row.logradouro,
            numero: row.numero,
            bairro: row.bairro,
            referencia: row.referencia,
        }
    }
}
