use std::sync::Arc;

use async_graphql::{ComplexObject, Context, FieldResult, InputObject, ResultExt, SimpleObject};
use serde::{Deserialize, Serialize};
use sqlx::types::Uuid;
use sqlx::FromRow;

use quill_pg::DB;
use quill_session::Identity;

use crate::ctx::Storage;
use crate::error::EntityResult;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, SimpleObject)]
#[graphql(complex)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub roles: Vec<String>,
}

impl User {
    pub async fn by_email(db: &DB, email: &str) -> EntityResult<Option<User>> {
        Ok(
            sqlx::query_as::<_, User>("SELECT id, email, roles FROM users WHERE email = $1")
                .bind(email)
                .fetch_optional(db.pool())
                .await?,
        )
    }

    pub async fn by_id(db: &DB, id: Uuid) -> EntityResult<Option<User>> {
        Ok(
            sqlx::query_as::<_, User>("SELECT id, email, roles FROM users WHERE id = $1")
                .bind(id)
                .fetch_optional(db.pool())
                .await?,
        )
    }

    pub async fn list(db: &DB) -> EntityResult<Vec<User>> {
        Ok(
            sqlx::query_as::<_, User>("SELECT id, email, roles FROM users ORDER BY email")
                .fetch_all(db.pool())
                .await?,
        )
    }
}

impl From<&Identity> for User {
    fn from(identity: &Identity) -> Self {
        Self {
            id: identity.id,
            email: identity.email.to_string(),
            roles: identity.roles.iter().map(|role| role.to_string()).collect(),
        }
    }
}

impl From<&User> for Identity {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: Arc::from(user.email.as_str()),
            roles: user
                .roles
                .iter()
                .map(|role| Arc::from(role.as_str()))
                .collect(),
        }
    }
}

#[ComplexObject]
impl User {
    async fn posts(&self, ctx: &Context<'_>) -> FieldResult<Vec<Post>> {
        let db = ctx.data_unchecked::<Storage>().db().await;
        Post::by_author(&db, self.id).await.extend()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, SimpleObject)]
#[graphql(complex)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub content: Option<String>,
    pub published: bool,
    #[graphql(skip)]
    pub author_id: Option<Uuid>,
}

const POST_COLUMNS: &str = "id, title, content, published, author_id";

impl Post {
    pub async fn list(db: &DB, include_unpublished: bool) -> EntityResult<Vec<Post>> {
        let query = if include_unpublished {
            format!("SELECT {POST_COLUMNS} FROM posts ORDER BY title")
        } else {
            format!("SELECT {POST_COLUMNS} FROM posts WHERE published ORDER BY title")
        };
        Ok(sqlx::query_as::<_, Post>(&query)
            .fetch_all(db.pool())
            .await?)
    }

    pub async fn by_id(db: &DB, id: Uuid) -> EntityResult<Option<Post>> {
        let query = format!("SELECT {POST_COLUMNS} FROM posts WHERE id = $1");
        Ok(sqlx::query_as::<_, Post>(&query)
            .bind(id)
            .fetch_optional(db.pool())
            .await?)
    }

    pub async fn by_author(db: &DB, author_id: Uuid) -> EntityResult<Vec<Post>> {
        let query = format!("SELECT {POST_COLUMNS} FROM posts WHERE author_id = $1 ORDER BY title");
        Ok(sqlx::query_as::<_, Post>(&query)
            .bind(author_id)
            .fetch_all(db.pool())
            .await?)
    }

    pub async fn create(db: &DB, author_id: Uuid, input: &CreatePostInput) -> EntityResult<Post> {
        let query = format!(
            "INSERT INTO posts (id, title, content, published, author_id) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {POST_COLUMNS}"
        );
        Ok(sqlx::query_as::<_, Post>(&query)
            .bind(Uuid::new_v4())
            .bind(&input.title)
            .bind(&input.content)
            .bind(input.published.unwrap_or(false))
            .bind(author_id)
            .fetch_one(db.pool())
            .await?)
    }
}

#[ComplexObject]
impl Post {
    async fn author(&self, ctx: &Context<'_>) -> FieldResult<Option<User>> {
        let Some(author_id) = self.author_id else {
            return Ok(None);
        };
        let db = ctx.data_unchecked::<Storage>().db().await;
        User::by_id(&db, author_id).await.extend()
    }

    async fn categories(&self, ctx: &Context<'_>) -> FieldResult<Vec<Category>> {
        let db = ctx.data_unchecked::<Storage>().db().await;
        Category::for_post(&db, self.id).await.extend()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, SimpleObject)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
}

impl Category {
    pub async fn list(db: &DB) -> EntityResult<Vec<Category>> {
        Ok(
            sqlx::query_as::<_, Category>("SELECT id, name FROM categories ORDER BY name")
                .fetch_all(db.pool())
                .await?,
        )
    }

    pub async fn for_post(db: &DB, post_id: Uuid) -> EntityResult<Vec<Category>> {
        Ok(sqlx::query_as::<_, Category>(
            "SELECT c.id, c.name FROM categories c \
             JOIN post_categories pc ON pc.category_id = c.id \
             WHERE pc.post_id = $1 ORDER BY c.name",
        )
        .bind(post_id)
        .fetch_all(db.pool())
        .await?)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, InputObject)]
pub struct CreatePostInput {
    pub title: String,
    pub content: Option<String>,
    pub published: Option<bool>,
}
