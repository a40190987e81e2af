//! Post entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::Set;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    #[sea_orm(column_type = "Text")]
    pub excerpt: String,
    #[sea_orm(unique)]
    pub slug: String,
    pub category: String,
    /// Denormalized tag names stored as a JSONB array.
    pub tags: Json,
    pub published_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub views: i64,
    pub featured: bool,
    pub is_published: bool,
    pub read_time: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain Post.
impl From<Model> for quill_core::domain::Post {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            author_id: model.author_id,
            title: model.title,
            content: model.content,
            excerpt: model.excerpt,
            slug: model.slug,
            category: model.category,
            tags: serde_json::from_value(model.tags).unwrap_or_default(),
            published_at: model.published_at.into(),
            updated_at: model.updated_at.into(),
            views: model.views.max(0) as u64,
            featured: model.featured,
            is_published: model.is_published,
            read_time: model.read_time.max(0) as u32,
        }
    }
}

/// Conversion from Domain Post to SeaORM ActiveModel.
impl From<quill_core::domain::Post> for ActiveModel {
    fn from(post: quill_core::domain::Post) -> Self {
        Self {
            id: Set(post.id),
            author_id: Set(post.author_id),
            title: Set(post.title),
            content: Set(post.content),
            excerpt: Set(post.excerpt),
            slug: Set(post.slug),
            category: Set(post.category),
            tags: Set(serde_json::json!(post.tags)),
            published_at: Set(post.published_at.into()),
            updated_at: Set(post.updated_at.into()),
            views: Set(post.views as i64),
            featured: Set(post.featured),
            is_published: Set(post.is_published),
            read_time: Set(post.read_time as i32),
        }
    }
}
