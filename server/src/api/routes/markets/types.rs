//! Market API types

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::domain::markets::{Market, MarketChanges};

/// Market DTO for API responses
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MarketDto {
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
}

impl From<Market> for MarketDto {
    fn from(m: Market) -> Self {
        Self {
            id: m.id,
            long: m.long,
            lat: m.lat,
            setcens: m.setcens,
            areap: m.areap,
            coddist: m.coddist,
            distrito: m.distrito,
            codsubpref: m.codsubpref,
            subprefe: m.subprefe,
            regiao5: m.regiao5,
            regiao8: m.regiao8,
            nome_feira: m.nome_feira,
            registro: m.registro,
            logradouro: m.logradouro,
            numero: m.numero,
            bairro: m.bairro,
            referencia: m.referencia,
        }
    }
}

/// Request body for creating a market
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateMarketRequest {
    #[serde(default)]
    #[validate(length(max = 100, message = "long must be at most 100 characters"))]
    pub long: String,
    #[serde(default)]
    #[validate(length(max = 100, message = "lat must be at most 100 characters"))]
    pub lat: String,
    #[serde(default)]
    #[validate(length(max = 100, message = "setcens must be at most 100 characters"))]
    pub setcens: String,
    #[serde(default)]
    #[validate(length(max = 100, message = "areap must be at most 100 characters"))]
    pub areap: String,
    #[serde(default)]
    #[validate(range(min = 0, message = "coddist must not be negative"))]
    pub coddist: i64,
    #[validate(length(min = 1, max = 100, message = "distrito must be 1-100 characters"))]
    pub distrito: String,
    #[serde(default)]
    #[validate(range(min = 0, message = "codsubpref must not be negative"))]
    pub codsubpref: i64,
    #[serde(default)]
    #[validate(length(max = 100, message = "subprefe must be at most 100 characters"))]
    pub subprefe: String,
    #[validate(length(min = 1, max = 100, message = "regiao5 must be 1-100 characters"))]
    pub regiao5: String,
    #[serde(default)]
    #[validate(length(max = 100, message = "regiao8 must be at most 100 characters"))]
    pub regiao8: String,
    #[validate(length(min = 1, max = 100, message = "nome_feira must be 1-100 characters"))]
    pub nome_feira: String,
    /// Register code, unique per market
    #[validate(length(min = 1, max = 20, message = "registro must be 1-20 characters"))]
    pub registro: String,
    #[validate(length(min = 1, max = 100, message = "logradouro must be 1-100 characters"))]
    pub logradouro: String,
    #[serde(default)]
    #[validate(length(max = 100, message = "numero must be at most 100 characters"))]
    pub numero: String,
    #[validate(length(min = 1, max = 100, message = "bairro must be 1-100 characters"))]
    pub bairro: String,
    #[serde(default)]
    #[validate(length(max = 100, message = "referencia must be at most 100 characters"))]
    pub referencia: String,
}

impl From<CreateMarketRequest> for Market {
    fn from(r: CreateMarketRequest) -> Self {
        Self {
            id: 0,
            long: r.long,
            lat: r.lat,
            setcens: r.setcens,
            areap: r.areap,
            coddist: r.coddist,
            distrito: r.distrito,
            codsubpref: r.codsubpref,
            subprefe: r.subprefe,
            regiao5: r.regiao5,
            regiao8: r.regiao8,
            nome_feira: r.nome_feira,
            registro: r.registro,
            logradouro: r.logradouro,
            numero: r.numero,
            bairro: r.bairro,
            referencia: r.referencia,
        }
    }
}

fn reject_register_code<T>(_: T) -> Result<(), ValidationError> {
    Err(ValidationError::new("registro_immutable")
        .with_message("the field 'registro' is not allowed".into()))
}

/// Request body for a partial market update. Omitted fields keep their value.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateMarketRequest {
    #[validate(length(max = 100, message = "long must be at most 100 characters"))]
    pub long: Option<String>,
    #[validate(length(max = 100, message = "lat must be at most 100 characters"))]
    pub lat: Option<String>,
    #[validate(length(max = 100, message = "setcens must be at most 100 characters"))]
    pub setcens: Option<String>,
    #[validate(length(max = 100, message = "areap must be at most 100 characters"))]
    pub areap: Option<String>,
    #[validate(range(min = 0, message = "coddist must not be negative"))]
    pub coddist: Option<i64>,
    #[validate(length(min = 1, max = 100, message = "distrito must be 1-100 characters"))]
    pub distrito: Option<String>,
    #[validate(range(min = 0, message = "codsubpref must not be negative"))]
    pub codsubpref: Option<i64>,
    #[validate(length(max = 100, message = "subprefe must be at most 100 characters"))]
    pub subprefe: Option<String>,
    #[validate(length(min = 1, max = 100, message = "regiao5 must be 1-100 characters"))]
    pub regiao5: Option<String>,
    #[validate(length(max = 100, message = "regiao8 must be at most 100 characters"))]
    pub regiao8: Option<String>,
    #[validate(length(min = 1, max = 100, message = "nome_feira must be 1-100 characters"))]
    pub nome_feira: Option<String>,
    #[validate(length(min = 1, max = 100, message = "logradouro must be 1-100 characters"))]
    pub logradouro: Option<String>,
    #[validate(length(max = 100, message = "numero must be at most 100 characters"))]
    pub numero: Option<String>,
    #[validate(length(min = 1, max = 100, message = "bairro must be 1-100 characters"))]
    pub bairro: Option<String>,
    #[validate(length(max = 100, message = "referencia must be at most 100 characters"))]
    pub referencia: Option<String>,
    /// Not accepted: the register code identifies the market and cannot change
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    #[validate(custom(function = "reject_register_code"))]
    pub registro: Option<serde_json::Value>,
}

impl From<UpdateMarketRequest> for MarketChanges {
    fn from(r: UpdateMarketRequest) -> Self {
        Self {
            long: r.long,
            lat: r.lat,
            setcens: r.setcens,
            areap: r.areap,
            coddist: r.coddist,
            distrito: r.distrito,
            codsubpref: r.codsubpref,
            subprefe: r.subprefe,
            regiao5: r.regiao5,
            regiao8: r.regiao8,
            nome_feira: r.nome_feira,
            logradouro: r.logradouro,
            numero: r.numero,
            bairro: r.bairro,
            referencia: r.referencia,
        }
    }
}

/// Response body of a successful delete
#[derive(Debug, Serialize, ToSchema)]
pub struct DeleteMarketResponse {
    pub deleted: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_body() -> serde_json::Value {
        serde_json::json!({
            "distrito": "VILA FORMOSA",
            "regiao5": "Leste",
            "nome_feira": "VILA FORMOSA",
            "registro": "4041-0",
            "logradouro": "RUA MARAGOJIPE",
            "bairro": "VL FORMOSA",
            "coddist": 87
        })
    }

    #[test]
    fn test_create_request_defaults() {
        let req: CreateMarketRequest = serde_json::from_value(create_body()).unwrap();
        assert!(req.validate().is_ok());

        let market = Market::from(req);
        assert_eq!(market.coddist, 87);
        assert_eq!(market.codsubpref, 0);
        assert_eq!(market.referencia, "");
    }

    #[test]
    fn test_create_request_limits() {
        let mut body = create_body();
        body["registro"] = serde_json::json!("x".repeat(21));
        body["coddist"] = serde_json::json!(-1);
        let req: CreateMarketRequest = serde_json::from_value(body).unwrap();

        let errors = req.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("registro"));
        assert!(fields.contains_key("coddist"));
    }

    #[test]
    fn test_create_request_requires_name() {
        let mut body = create_body();
        body["nome_feira"] = serde_json::json!("");
        let req: CreateMarketRequest = serde_json::from_value(body).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_update_request_rejects_register_code() {
        let req: UpdateMarketRequest =
            serde_json::from_value(serde_json::json!({"registro": "9999-9"})).unwrap();
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("registro"));

        let req: UpdateMarketRequest =
            serde_json::from_value(serde_json::json!({"bairro": "MOOCA"})).unwrap();
        assert!(req.validate().is_ok());
        let changes = MarketChanges::from(req);
        assert_eq!(changes.bairro.as_deref(), Some("MOOCA"));
        assert!(changes.distrito.is_none());
    }
}
