//! Market repository for SQLite operations

use sqlx::SqlitePool;

use crate::data::sqlite::SqliteError;
use crate::data::types::{MARKET_COLUMNS, MarketRow};
use crate::domain::markets::{Market, MarketChanges};
use crate::domain::query::{FilterObject, FilterValue};

/// Columns a filter may reference. Anything else is rejected before it reaches SQL.
const FILTER_COLUMNS: &[&str] = &[
    "id",
    "long",
    "lat",
    "setcens",
    "areap",
    "coddist",
    "distrito",
    "codsubpref",
    "subprefe",
    "regiao5",
    "regiao8",
    "nome_feira",
    "registro",
    "logradouro",
    "numero",
    "bairro",
    "referencia",
];

/// Insert a market keyed by its register code (idempotent).
///
/// Returns the stored row as written by this statement, or None if a market
/// with the same register code already existed.
pub async fn insert_market(
    pool: &SqlitePool,
    market: &Market,
) -> Result<Option<MarketRow>, SqliteError> {
    let now = chrono::Utc::now().timestamp();

    let sql = format!(
        r#"
        INSERT INTO markets (
            long, lat, setcens, areap, coddist, distrito, codsubpref, subprefe,
            regiao5, regiao8, nome_feira, registro, logradouro, numero, bairro, referencia,
            created_at, updated_at
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT(registro) DO NOTHING
        RETURNING {}
        "#,
        MARKET_COLUMNS
    );

    let row = sqlx::query_as::<_, MarketRow>(&sql)
        .bind(&market.long)
        .bind(&market.lat)
        .bind(&market.setcens)
        .bind(&market.areap)
        .bind(market.coddist)
        .bind(&market.distrito)
        .bind(market.codsubpref)
        .bind(&market.subprefe)
        .bind(&market.regiao5)
        .bind(&market.regiao8)
        .bind(&market.nome_feira)
        .bind(&market.registro)
        .bind(&market.logradouro)
        .bind(&market.numero)
        .bind(&market.bairro)
        .bind(&market.referencia)
        .bind(now)
        .bind(now)
        .fetch_optional(pool)
        .await?;

    Ok(row)
}

/// Get a market by register code
pub async fn get_market(
    pool: &SqlitePool,
    registro: &str,
) -> Result<Option<MarketRow>, SqliteError> {
    let sql = format!("SELECT {} FROM markets WHERE registro = ?", MARKET_COLUMNS);
    let row = sqlx::query_as::<_, MarketRow>(&sql)
        .bind(registro)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Find markets matching every criterion in the filter, ordered by id.
/// An empty filter matches all markets.
pub async fn find_markets(
    pool: &SqlitePool,
    filter: &FilterObject,
) -> Result<Vec<MarketRow>, SqliteError> {
    let mut conditions = Vec::with_capacity(filter.len());
    for (column, _) in filter.iter() {
        if !FILTER_COLUMNS.contains(&column) {
            return Err(SqliteError::InvalidFilterColumn(column.to_string()));
        }
        conditions.push(format!("{} = ?", column));
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };
    let sql = format!(
        "SELECT {} FROM markets {} ORDER BY id",
        MARKET_COLUMNS, where_clause
    );

    let mut query = sqlx::query_as::<_, MarketRow>(&sql);
    for (_, value) in filter.iter() {
        query = match value {
            FilterValue::Text(s) => query.bind(s.as_str()),
            FilterValue::Integer(n) => query.bind(*n),
        };
    }

    Ok(query.fetch_all(pool).await?)
}

/// Apply a partial update. Returns None if no market has this register code.
pub async fn update_market(
    pool: &SqlitePool,
    registro: &str,
    changes: &MarketChanges,
) -> Result<Option<MarketRow>, SqliteError> {
    let now = chrono::Utc::now().timestamp();

    let result = sqlx::query(
        r#"
        UPDATE markets SET
            long = COALESCE(?, long),
            lat = COALESCE(?, lat),
            setcens = COALESCE(?, setcens),
            areap = COALESCE(?, areap),
            coddist = COALESCE(?, coddist),
            distrito = COALESCE(?, distrito),
            codsubpref = COALESCE(?, codsubpref),
            subprefe = COALESCE(?, subprefe),
            regiao5 = COALESCE(?, regiao5),
            regiao8 = COALESCE(?, regiao8),
            nome_feira = COALESCE(?, nome_feira),
            logradouro = COALESCE(?, logradouro),
            numero = COALESCE(?, numero),
            bairro = COALESCE(?, bairro),
            referencia = COALESCE(?, referencia),
            updated_at = ?
        WHERE registro = ?
        "#,
    )
    .bind(changes.long.as_deref())
    .bind(changes.lat.as_deref())
    .bind(changes.setcens.as_deref())
    .bind(changes.areap.as_deref())
    .bind(changes.coddist)
    .bind(changes.distrito.as_deref())
    .bind(changes.codsubpref)
    .bind(changes.subprefe.as_deref())
    .bind(changes.regiao5.as_deref())
    .bind(changes.regiao8.as_deref())
    .bind(changes.nome_feira.as_deref())
    .bind(changes.logradouro.as_deref())
    .bind(changes.numero.as_deref())
    .bind(changes.bairro.as_deref())
    .bind(changes.referencia.as_deref())
    .bind(now)
    .bind(registro)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }

    get_market(pool, registro).await
}

/// Delete a market by register code. Returns true if a market was deleted.
pub async fn delete_market(pool: &SqlitePool, registro: &str) -> Result<bool, SqliteError> {
    let result = sqlx::query("DELETE FROM markets WHERE registro = ?")
        .bind(registro)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn count_markets(pool: &SqlitePool) -> Result<i64, SqliteError> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM markets")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn setup_test_pool() -> SqlitePool {
        let pool = sqlx::sqlite::SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        sqlx::query(crate::data::sqlite::schema::SCHEMA)
            .execute(&pool)
            .await
            .unwrap();
        pool
    }

    fn market(registro: &str, distrito: &str, coddist: i64) -> Market {
        Market {
            long: "-46550164".to_string(),
            lat: "-23558733".to_string(),
            setcens: "355030885000091".to_string(),
            areap: "3550308005040".to_string(),
            coddist,
            distrito: distrito.to_string(),
            codsubpref: 26,
            subprefe: "ARICANDUVA-FORMOSA-CARRAO".to_string(),
            regiao5: "Leste".to_string(),
            regiao8: "Leste 1".to_string(),
            nome_feira: format!("FEIRA {}", registro),
            registro: registro.to_string(),
            logradouro: "RUA MARAGOJIPE".to_string(),
            numero: "S/N".to_string(),
            bairro: "VL FORMOSA".to_string(),
            referencia: "TV RUA PRETORIA".to_string(),
            ..Default::default()
        }
    }

    fn filter(pairs: &[(&'static str, FilterValue)]) -> FilterObject {
        let mut f = FilterObject::new();
        for (k, v) in pairs {
            f.insert(*k, v.clone());
        }
        f
    }

    #[tokio::test]
    async fn test_insert_market() {
        let pool = setup_test_pool().await;

        let inserted = insert_market(&pool, &market("4041-0", "VILA FORMOSA", 87))
            .await
            .unwrap()
            .unwrap();
        assert!(inserted.id > 0);
        assert_eq!(inserted.distrito, "VILA FORMOSA");
        assert_eq!(inserted.coddist, 87);
        assert_eq!(inserted.created_at, inserted.updated_at);

        let row = get_market(&pool, "4041-0").await.unwrap().unwrap();
        assert_eq!(row, inserted);
    }

    #[tokio::test]
    async fn test_insert_market_duplicate_registro() {
        let pool = setup_test_pool().await;

        let first = insert_market(&pool, &market("4041-0", "VILA FORMOSA", 87))
            .await
            .unwrap();
        assert!(first.is_some());

        let mut other = market("4041-0", "SE", 1);
        other.nome_feira = "OTHER".to_string();
        assert!(insert_market(&pool, &other).await.unwrap().is_none());

        let row = get_market(&pool, "4041-0").await.unwrap().unwrap();
        assert_eq!(row.distrito, "VILA FORMOSA");
        assert_eq!(count_markets(&pool).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_get_market_not_found() {
        let pool = setup_test_pool().await;
        assert!(get_market(&pool, "missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_markets_empty_filter_returns_all_ordered() {
        let pool = setup_test_pool().await;
        for code in ["3", "1", "2"] {
            insert_market(&pool, &market(code, "SE", 1)).await.unwrap();
        }

        let rows = find_markets(&pool, &FilterObject::new()).await.unwrap();
        let codes: Vec<_> = rows.iter().map(|r| r.registro.as_str()).collect();
        assert_eq!(codes, vec!["3", "1", "2"]);
        assert!(rows.windows(2).all(|w| w[0].id < w[1].id));
    }

    #[tokio::test]
    async fn test_find_markets_ands_criteria() {
        let pool = setup_test_pool().await;
        insert_market(&pool, &market("A-1", "SE", 1)).await.unwrap();
        insert_market(&pool, &market("A-2", "SE", 2)).await.unwrap();
        insert_market(&pool, &market("A-3", "MOOCA", 2)).await.unwrap();

        let rows = find_markets(
            &pool,
            &filter(&[
                ("distrito", FilterValue::Text("SE".to_string())),
                ("coddist", FilterValue::Integer(2)),
            ]),
        )
        .await
        .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].registro, "A-2");
    }

    #[tokio::test]
    async fn test_find_markets_integer_compared_numerically() {
        let pool = setup_test_pool().await;
        insert_market(&pool, &market("A-1", "SE", 7)).await.unwrap();

        let rows = find_markets(&pool, &filter(&[("coddist", FilterValue::Integer(7))]))
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);

        let rows = find_markets(&pool, &filter(&[("coddist", FilterValue::Integer(70))]))
            .await
            .unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn test_find_markets_exact_match_only() {
        let pool = setup_test_pool().await;
        insert_market(&pool, &market("A-1", "VILA FORMOSA", 87)).await.unwrap();

        let rows = find_markets(
            &pool,
            &filter(&[("distrito", FilterValue::Text("VILA".to_string()))]),
        )
        .await
        .unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn test_find_markets_rejects_unlisted_column() {
        let pool = setup_test_pool().await;
        let err = find_markets(
            &pool,
            &filter(&[("created_at", FilterValue::Integer(0))]),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, SqliteError::InvalidFilterColumn(c) if c == "created_at"));
    }

    #[tokio::test]
    async fn test_update_market_partial() {
        let pool = setup_test_pool().await;
        insert_market(&pool, &market("4041-0", "VILA FORMOSA", 87)).await.unwrap();

        let changes = MarketChanges {
            bairro: Some("VILA FORMOSA".to_string()),
            codsubpref: Some(27),
            ..Default::default()
        };
        let row = update_market(&pool, "4041-0", &changes).await.unwrap().unwrap();

        assert_eq!(row.bairro, "VILA FORMOSA");
        assert_eq!(row.codsubpref, 27);
        assert_eq!(row.distrito, "VILA FORMOSA");
        assert_eq!(row.logradouro, "RUA MARAGOJIPE");
        assert_eq!(row.registro, "4041-0");
    }

    #[tokio::test]
    async fn test_update_market_not_found() {
        let pool = setup_test_pool().await;
        let result = update_market(&pool, "missing", &MarketChanges::default())
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_delete_market() {
        let pool = setup_test_pool().await;
        insert_market(&pool, &market("4041-0", "VILA FORMOSA", 87)).await.unwrap();

        assert!(delete_market(&pool, "4041-0").await.unwrap());
        assert!(!delete_market(&pool, "4041-0").await.unwrap());
        assert!(get_market(&pool, "4041-0").await.unwrap().is_none());
    }
}
