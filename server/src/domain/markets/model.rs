//! Market value objects

/// A street market record
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Market {
    /// Storage-assigned identifier (0 before the record is stored)
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
    /// Register code, the business key
    pub registro: String,
    pub logradouro: String,
    pub numero: String,
    pub bairro: String,
    pub referencia: String,
}

/// Partial update of a market. `None` leaves the stored value as is.
///
/// The register code is not part of this type: it identifies the record and
/// cannot change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarketChanges {
    pub long: Option<String>,
    pub lat: Option<String>,
    pub setcens: Option<String>,
    pub areap: Option<String>,
    pub coddist: Option<i64>,
    pub distrito: Option<String>,
    pub codsubpref: Option<i64>,
    pub subprefe: Option<String>,
    pub regiao5: Option<String>,
    pub regiao8: Option<String>,
    pub nome_feira: Option<String>,
    pub logradouro: Option<String>,
    pub numero: Option<String>,
    pub bairro: Option<String>,
    pub referencia: Option<String>,
}

impl MarketChanges {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Apply the changes on top of an existing market
    pub fn apply(self, mut market: Market) -> Market {
        fn set<T>(slot: &mut T, value: Option<T>) {
            if let Some(v) = value {
                *slot = v;
            }
        }

        set(&mut market.long, self.long);
        set(&mut market.lat, self.lat);
        set(&mut market.setcens, self.setcens);
        set(&mut market.areap, self.areap);
        set(&mut market.coddist, self.coddist);
        set(&mut market.distrito, self.distrito);
        set(&mut market.codsubpref, self.codsubpref);
        set(&mut market.subprefe, self.subprefe);
        set(&mut market.regiao5, self.regiao5);
        set(&mut market.regiao8, self.regiao8);
        set(&mut market.nome_feira, self.nome_feira);
        set(&mut market.logradouro, self.logradouro);
        set(&mut market.numero, self.numero);
        set(&mut market.bairro, self.bairro);
        set(&mut market.referencia, self.referencia);
        market
    }
}

/// Result of a create request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome {
    /// The market was stored by this request
    Created(Market),
    /// A market with the same register code was already stored; it is returned unchanged
    AlreadyExists(Market),
}

impl CreateOutcome {
    pub fn market(&self) -> &Market {
        match self {
            Self::Created(m) | Self::AlreadyExists(m) => m,
        }
    }

    pub fn into_market(self) -> Market {
        match self {
            Self::Created(m) | Self::AlreadyExists(m) => m,
        }
    }

    pub fn is_created(&self) -> bool {
        matches!(self, Self::Created(_))
    }
}
