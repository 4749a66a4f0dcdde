//! PostgreSQL module store. Each module is one row holding the whole
//! document as JSONB; the `version` column is authoritative.

use async_trait::async_trait;
use chrono::Utc;
use parametria_core::types::ObjectId;
use serde_json::json;
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, QueryBuilder};

use super::{ModuleQuery, ModuleStore, StoreError};
use crate::models::{Module, ModulePatch};

const COLUMNS: &str = "version, document";

#[derive(Debug, sqlx::FromRow)]
struct ModuleRow {
    version: i64,
    document: Json<Module>,
}

impl From<ModuleRow> for Module {
    fn from(row: ModuleRow) -> Self {
        let mut module = row.document.0;
        module.version = row.version;
        module
    }
}

#[derive(Debug, Clone)]
pub struct PgModuleStore {
    pool: PgPool,
}

impl PgModuleStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Append the `WHERE` conditions for `query`.
fn push_conditions(qb: &mut QueryBuilder<'_, Postgres>, query: &ModuleQuery) {
    qb.push(" WHERE TRUE");
    if let Some(id) = query.id {
        qb.push(" AND id = ").push_bind(id.to_hex());
    }
    if let Some(id) = query.exclude_id {
        qb.push(" AND id <> ").push_bind(id.to_hex());
    }
    if let Some(active) = query.active {
        qb.push(" AND document @> ")
            .push_bind(Json(json!({ "activo": active })));
    }
    if let Some(name) = &query.name {
        qb.push(" AND document->>'nombre' = ").push_bind(name.clone());
    }
    if let Some(entity) = query.entity {
        let mut wanted = json!({ "_id": entity.id.to_hex() });
        if let Some(active) = entity.active {
            wanted["activo"] = json!(active);
        }
        qb.push(" AND document->'entidades' @> ")
            .push_bind(Json(json!([wanted])));
    }
}

#[async_trait]
impl ModuleStore for PgModuleStore {
    async fn ping(&self) -> Result<(), StoreError> {
        crate::health_check(&self.pool).await?;
        Ok(())
    }

    async fn find_one(&self, query: &ModuleQuery) -> Result<Option<Module>, StoreError> {
        let mut qb = QueryBuilder::<Postgres>::new(format!("SELECT {COLUMNS} FROM modules"));
        push_conditions(&mut qb, query);
        qb.push(" ORDER BY created_at ASC LIMIT 1");
        let row = qb
            .build_query_as::<ModuleRow>()
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Module::from))
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Module>, StoreError> {
        let query = format!("SELECT {COLUMNS} FROM modules WHERE id = $1");
        let row = sqlx::query_as::<_, ModuleRow>(&query)
            .bind(id.to_hex())
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Module::from))
    }

    async fn find_all(&self) -> Result<Vec<Module>, StoreError> {
        let query = format!("SELECT {COLUMNS} FROM modules ORDER BY created_at ASC");
        let rows = sqlx::query_as::<_, ModuleRow>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Module::from).collect())
    }

    async fn count_matching(&self, query: &ModuleQuery) -> Result<u64, StoreError> {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM modules");
        push_conditions(&mut qb, query);
        let (count,): (i64,) = qb.build_query_as().fetch_one(&self.pool).await?;
        Ok(count.max(0) as u64)
    }

    async fn insert(&self, mut module: Module) -> Result<Module, StoreError> {
        module.version = 0;
        let query = format!(
            "INSERT INTO modules (id, version, document, created_at, updated_at) \
             VALUES ($1, 0, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, ModuleRow>(&query)
            .bind(module.id.to_hex())
            .bind(Json(&module))
            .bind(module.created_at)
            .bind(module.updated_at)
            .fetch_one(&self.pool)
            .await?;
        Ok(row.into())
    }

    async fn replace(&self, module: &Module) -> Result<Module, StoreError> {
        let mut next = module.clone();
        next.version += 1;
        let query = format!(
            "UPDATE modules SET document = $1, version = version + 1, updated_at = $2 \
             WHERE id = $3 AND version = $4 \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, ModuleRow>(&query)
            .bind(Json(&next))
            .bind(Utc::now())
            .bind(module.id.to_hex())
            .bind(module.version)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Module::from).ok_or(StoreError::VersionConflict {
            id: module.id,
            expected: module.version,
        })
    }

    async fn find_one_and_update(
        &self,
        query: &ModuleQuery,
        patch: &ModulePatch,
    ) -> Result<Option<Module>, StoreError> {
        let now = Utc::now();
        let mut fragment = serde_json::to_value(patch)?;
        fragment["fechaActualizacion"] = serde_json::to_value(now)?;

        let mut qb = QueryBuilder::<Postgres>::new("UPDATE modules SET document = document || ");
        qb.push_bind(Json(fragment))
            .push(", version = version + 1, updated_at = ")
            .push_bind(now)
            .push(" WHERE id = (SELECT id FROM modules");
        push_conditions(&mut qb, query);
        qb.push(" ORDER BY created_at ASC LIMIT 1 FOR UPDATE)")
            .push(format!(" RETURNING {COLUMNS}"));

        let row = qb
            .build_query_as::<ModuleRow>()
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Module::from))
    }
}
