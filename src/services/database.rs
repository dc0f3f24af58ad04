use crate::config::Config;
use crate::error::{AppError, Result};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::fmt;
use surrealdb::engine::remote::http::{Client, Http};
use surrealdb::opt::auth::Root;
use surrealdb::Surreal;
use tracing::{debug, error, info, warn};

/// Logical collections the engine reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Notifications,
    Plays,
    Followers,
}

impl Collection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Notifications => "notifications",
            Collection::Plays => "plays",
            Collection::Followers => "followers",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    Eq(&'static str, Value),
    In(&'static str, Vec<Value>),
}

/// Conjunction of field tests used by `DocumentStore::query`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    conditions: Vec<Condition>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn eq(mut self, field: &'static str, value: impl Into<Value>) -> Self {
        self.conditions.push(Condition::Eq(field, value.into()));
        self
    }

    pub fn one_of<V: Into<Value>>(mut self, field: &'static str, values: impl IntoIterator<Item = V>) -> Self {
        self.conditions
            .push(Condition::In(field, values.into_iter().map(Into::into).collect()));
        self
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn matches(&self, doc: &Value) -> bool {
        self.conditions.iter().all(|condition| match condition {
            Condition::Eq(field, expected) => doc.get(*field) == Some(expected),
            Condition::In(field, allowed) => doc
                .get(*field)
                .map_or(false, |value| allowed.contains(value)),
        })
    }
}

/// A document returned from a query, with its key.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    pub id: String,
    pub data: Value,
}

/// 文档存储接口
/// 引擎只依赖这四个操作，超时和重试由具体实现负责
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn get(&self, collection: Collection, id: &str) -> Result<Option<Value>>;

    /// Writes the whole document, creating it when absent.
    async fn set(&self, collection: Collection, id: &str, doc: Value) -> Result<()>;

    /// Removing a missing document is not an error.
    async fn delete(&self, collection: Collection, id: &str) -> Result<()>;

    async fn query(&self, collection: Collection, filter: &Filter) -> Result<Vec<StoredDocument>>;
}

const KEY_FIELD: &str = "__key";

/// SurrealDB 文档存储
#[derive(Clone)]
pub struct SurrealStore {
    db: Surreal<Client>,
}

impl SurrealStore {
    /// 创建新的数据库连接
    pub async fn connect(config: &Config) -> Result<Self> {
        info!("Initializing database connection to {}", config.database_url);

        let address = config
            .database_url
            .trim_start_matches("http://")
            .trim_end_matches('/');
        let db = Surreal::new::<Http>(address).await?;
        db.signin(Root {
            username: &config.database_username,
            password: &config.database_password,
        })
        .await?;
        db.use_ns(config.database_namespace.as_str())
            .use_db(config.database_name.as_str())
            .await?;

        Ok(Self { db })
    }

    /// 验证数据库连接
    pub async fn verify_connection(&self) -> Result<()> {
        match self.db.query("INFO FOR DB").await {
            Ok(_) => {
                info!("Database connection verified successfully");
                Ok(())
            }
            Err(e) => {
                error!("Failed to verify database connection: {}", e);
                Err(AppError::from(e))
            }
        }
    }

    fn where_clause(filter: &Filter, vars: &mut Map<String, Value>) -> String {
        let clauses: Vec<String> = filter
            .conditions()
            .iter()
            .enumerate()
            .map(|(i, condition)| {
                let var = format!("v{}", i);
                match condition {
                    Condition::Eq(field, value) => {
                        vars.insert(var.clone(), value.clone());
                        format!("{} = ${}", field, var)
                    }
                    Condition::In(field, values) => {
                        vars.insert(var.clone(), Value::Array(values.clone()));
                        format!("{} INSIDE ${}", field, var)
                    }
                }
            })
            .collect();

        if clauses.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", clauses.join(" AND "))
        }
    }
}

#[async_trait]
impl DocumentStore for SurrealStore {
    async fn get(&self, collection: Collection, id: &str) -> Result<Option<Value>> {
        let sql = "SELECT * OMIT id FROM type::thing($tb, $id)";
        debug!("Executing query: {} [{}:{}]", sql, collection, id);

        let mut response = self
            .db
            .query(sql)
            .bind(("tb", collection.as_str()))
            .bind(("id", id))
            .await?;
        let rows: Vec<Value> = response.take(0)?;
        Ok(rows.into_iter().next())
    }

    async fn set(&self, collection: Collection, id: &str, doc: Value) -> Result<()> {
        self.db
            .query("UPDATE type::thing($tb, $id) CONTENT $doc RETURN NONE")
            .bind(("tb", collection.as_str()))
            .bind(("id", id))
            .bind(("doc", doc))
            .await?
            .check()?;
        Ok(())
    }

    async fn delete(&self, collection: Collection, id: &str) -> Result<()> {
        self.db
            .query("DELETE type::thing($tb, $id)")
            .bind(("tb", collection.as_str()))
            .bind(("id", id))
            .await?
            .check()?;
        Ok(())
    }

    async fn query(&self, collection: Collection, filter: &Filter) -> Result<Vec<StoredDocument>> {
        let mut vars = Map::new();
        vars.insert("tb".to_string(), Value::from(collection.as_str()));
        let sql = format!(
            "SELECT *, meta::id(id) AS {} OMIT id FROM type::table($tb){}",
            KEY_FIELD,
            Self::where_clause(filter, &mut vars)
        );
        debug!("Executing query: {}", sql);

        let mut response = self.db.query(sql).bind(Value::Object(vars)).await?;
        let rows: Vec<Value> = response.take(0)?;

        let mut documents = Vec::with_capacity(rows.len());
        for mut row in rows {
            let key = row
                .as_object_mut()
                .and_then(|fields| fields.remove(KEY_FIELD))
                .and_then(|key| key.as_str().map(str::to_string));
            match key {
                Some(id) => documents.push(StoredDocument { id, data: row }),
                None => warn!("Skipping {} row without a string key", collection),
            }
        }
        Ok(documents)
    }
}
