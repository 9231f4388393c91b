//! SQLite user repository implementation.

use crate::audit::{AuditAction, AuditEntry, AuditLog};
use crate::storage::{SqliteStorage, StorageHandle};
use crate::traits::UserRepository;
use async_trait::async_trait;
use quill_config::DatabaseConfig;
use quill_core::{
    Article, NewUser, QuillError, QuillResult, User, UserId, UserPatch, UserWithArticles,
};
use shaku::Component;
use sqlx::{FromRow, QueryBuilder, Sqlite};
use std::sync::Arc;
use tracing::{debug, warn};

/// SQLite user repository implementation.
///
/// Every mutation is a single `... RETURNING` statement, so the row handed
/// back is exactly the row that was written or removed.
#[derive(Component, Clone)]
#[shaku(interface = UserRepository)]
pub struct SqliteUserRepository {
    #[shaku(inject)]
    storage: Arc<dyn StorageHandle>,
    #[shaku(inject)]
    audit_log: Arc<dyn AuditLog>,
}

impl SqliteUserRepository {
    /// Creates a new SQLite user repository.
    #[must_use]
    pub fn new(storage: Arc<dyn StorageHandle>, audit_log: Arc<dyn AuditLog>) -> Self {
        Self { storage, audit_log }
    }

    /// Opens the database described by `config` and applies migrations when
    /// `config.run_migrations` is set.
    pub async fn connect(
        config: &DatabaseConfig,
        audit_log: Arc<dyn AuditLog>,
    ) -> QuillResult<Self> {
        let storage = SqliteStorage::connect(config).await?;
        if config.run_migrations {
            storage.run_migrations().await?;
        }
        Ok(Self::new(Arc::new(storage), audit_log))
    }

    /// Returns the storage handle this repository writes through.
    #[must_use]
    pub fn storage(&self) -> Arc<dyn StorageHandle> {
        Arc::clone(&self.storage)
    }

    async fn audit(&self, action: AuditAction, user: &User) {
        let result = match AuditEntry::new(action, "User", user) {
            Ok(entry) => self.audit_log.record(&entry).await,
            Err(e) => Err(e),
        };

        if let Err(e) = result {
            warn!(user_id = user.id, action = %action, "Failed to write audit entry: {}", e);
        }
    }
}

/// Database row representation of a user.
#[derive(Debug, FromRow)]
struct UserRow {
    id: i64,
    name: String,
    email: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            name: row.name,
            email: row.email,
        }
    }
}

/// Database row representation of an article.
#[derive(Debug, FromRow)]
struct ArticleRow {
    id: i64,
    user_id: i64,
    title: String,
    content: String,
}

impl From<ArticleRow> for Article {
    fn from(row: ArticleRow) -> Self {
        Article {
            id: row.id,
            user_id: row.user_id,
            title: row.title,
            content: row.content,
        }
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn create(&self, user: &NewUser) -> QuillResult<User> {
        debug!("Creating user: {}", user.email);

        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (name, email)
            VALUES (?, ?)
            RETURNING id, name, email
            "#,
        )
        .bind(&user.name)
        .bind(&user.email)
        .fetch_one(self.storage.pool())
        .await?;

        let created = User::from(row);
        self.audit(AuditAction::Created, &created).await;
        Ok(created)
    }

    async fn list(&self) -> QuillResult<Vec<User>> {
        debug!("Listing all users");

        let rows = sqlx::query_as::<_, UserRow>("SELECT id, name, email FROM users")
            .fetch_all(self.storage.pool())
            .await?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn get_by_id(&self, id: UserId) -> QuillResult<Option<User>> {
        debug!("Finding user by id: {}", id);

        let row = sqlx::query_as::<_, UserRow>("SELECT id, name, email FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(self.storage.pool())
            .await?;

        Ok(row.map(User::from))
    }

    async fn get_user_with_articles(&self, id: UserId) -> QuillResult<Option<UserWithArticles>> {
        debug!("Finding user with articles: {}", id);

        // Both reads see the same snapshot.
        let mut tx = self.storage.pool().begin().await?;

        let user = sqlx::query_as::<_, UserRow>("SELECT id, name, email FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(user) = user else {
            tx.commit().await?;
            return Ok(None);
        };

        let articles = sqlx::query_as::<_, ArticleRow>(
            r#"
            SELECT id, user_id, title, content
            FROM articles
            WHERE user_id = ?
            ORDER BY id
            "#,
        )
        .bind(id)
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Some(UserWithArticles::new(
            User::from(user),
            articles.into_iter().map(Article::from).collect(),
        )))
    }

    async fn update(&self, id: UserId, patch: &UserPatch) -> QuillResult<User> {
        debug!("Updating user: {}", id);

        if patch.is_empty() {
            return Err(QuillError::validation("No fields to update"));
        }

        let mut builder = QueryBuilder::<Sqlite>::new("UPDATE users SET ");
        let mut assignments = builder.separated(", ");
        if let Some(name) = &patch.name {
            assignments.push("name = ").push_bind_unseparated(name.clone());
        }
        if let Some(email) = &patch.email {
            assignments.push("email = ").push_bind_unseparated(email.clone());
        }
        builder
            .push(" WHERE id = ")
            .push_bind(id)
            .push(" RETURNING id, name, email");

        let row = builder
            .build_query_as::<UserRow>()
            .fetch_optional(self.storage.pool())
            .await?
            .ok_or_else(|| QuillError::no_rows_affected("User", id))?;

        let updated = User::from(row);
        self.audit(AuditAction::Updated, &updated).await;
        Ok(updated)
    }

    async fn delete(&self, id: UserId) -> QuillResult<Option<User>> {
        debug!("Deleting user: {}", id);

        let row = sqlx::query_as::<_, UserRow>(
            "DELETE FROM users WHERE id = ? RETURNING id, name, email",
        )
        .bind(id)
        .fetch_optional(self.storage.pool())
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let deleted = User::from(row);
        self.audit(AuditAction::Deleted, &deleted).await;
        Ok(Some(deleted))
    }
}

impl std::fmt::Debug for SqliteUserRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteUserRepository").finish_non_exhaustive()
    }
}
