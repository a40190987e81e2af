//! PostgreSQL repository implementations.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::{Expr, Func, OnConflict};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DbConn, DbErr, EntityTrait, Order, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use quill_core::domain::{
    Pagination, Post, PostFilters, PostPage, PostSort, SortField, SortOrder, StatsPolicy,
};
use quill_core::error::RepoError;
use quill_core::ports::{PostRepository, TaxonomyRepository};

use super::entity::category::{self, Entity as CategoryEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::entity::tag::{self, Entity as TagEntity};

/// PostgreSQL post repository.
pub struct PostgresPostRepository {
    db: DbConn,
}

impl PostgresPostRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

fn query_err(err: DbErr) -> RepoError {
    RepoError::Query(err.to_string())
}

/// Express `PostFilters` as a conjunctive SQL condition. Mirrors the
/// reference predicate in `PostFilters::matches`.
fn filter_condition(filters: &PostFilters) -> Condition {
    let mut cond = Condition::all();

    if let Some(category) = &filters.category {
        cond = cond.add(post::Column::Category.eq(category.clone()));
    }
    if let Some(author_id) = filters.author_id {
        cond = cond.add(post::Column::AuthorId.eq(author_id));
    }
    if let Some(featured) = filters.featured {
        cond = cond.add(post::Column::Featured.eq(featured));
    }
    if let Some(published) = filters.published {
        cond = cond.add(post::Column::IsPublished.eq(published));
    }

    if let Some(tags) = &filters.tags {
        if !tags.is_empty() {
            // Any-of: OR one JSONB containment test per requested tag.
            let mut any_tag = Condition::any();
            for tag in tags {
                any_tag = any_tag.add(Expr::cust_with_values(
                    "tags @> $1",
                    [serde_json::json!([tag])],
                ));
            }
            cond = cond.add(any_tag);
        }
    }

    if let Some(search) = &filters.search {
        let query = search.trim().to_lowercase();
        if !query.is_empty() {
            let pattern = format!("%{query}%");
            let contains = |column: post::Column| {
                Expr::expr(Func::lower(Expr::col(column))).like(pattern.clone())
            };
            cond = cond.add(
                Condition::any()
                    .add(contains(post::Column::Title))
                    .add(contains(post::Column::Excerpt))
                    .add(contains(post::Column::Content))
                    .add(Expr::cust_with_values(
                        "LOWER(tags::text) LIKE $1",
                        [pattern.clone()],
                    )),
            );
        }
    }

    cond
}

fn sort_column(field: SortField) -> post::Column {
    match field {
        SortField::PublishedAt => post::Column::PublishedAt,
        SortField::UpdatedAt => post::Column::UpdatedAt,
        SortField::Views => post::Column::Views,
        SortField::Title => post::Column::Title,
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find_all(
        &self,
        filters: &PostFilters,
        sort: PostSort,
        pagination: Pagination,
    ) -> Result<PostPage, RepoError> {
        let pagination = pagination.normalized();
        let order = match sort.order {
            SortOrder::Asc => Order::Asc,
            SortOrder::Desc => Order::Desc,
        };

        let paginator = PostEntity::find()
            .filter(filter_condition(filters))
            .order_by(sort_column(sort.field), order)
            .paginate(&self.db, pagination.limit);

        let total = paginator.num_items().await.map_err(query_err)?;
        let models = paginator
            .fetch_page(pagination.page - 1)
            .await
            .map_err(query_err)?;

        Ok(PostPage {
            posts: models.into_iter().map(Into::into).collect(),
            total,
            page: pagination.page,
            total_pages: PostPage::total_pages_for(total, pagination.limit),
        })
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let result = PostEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(query_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError> {
        tracing::debug!(slug = %slug, "Finding post by slug");

        let result = PostEntity::find()
            .filter(post::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(query_err)?;

        Ok(result.map(Into::into))
    }

    async fn slug_exists(&self, slug: &str, exclude_id: Option<Uuid>) -> Result<bool, RepoError> {
        let mut query = PostEntity::find().filter(post::Column::Slug.eq(slug));
        if let Some(id) = exclude_id {
            query = query.filter(post::Column::Id.ne(id));
        }

        let count = query.count(&self.db).await.map_err(query_err)?;
        Ok(count > 0)
    }

    async fn insert(&self, entity: Post) -> Result<Post, RepoError> {
        let active_model: post::ActiveModel = entity.into();
        let model = active_model.insert(&self.db).await.map_err(|e| {
            let err_str = e.to_string();
            if err_str.contains("duplicate") || err_str.contains("unique") {
                RepoError::Constraint("Post already exists".to_string())
            } else {
                RepoError::Query(err_str)
            }
        })?;

        Ok(model.into())
    }

    async fn update(&self, entity: Post) -> Result<Post, RepoError> {
        let active_model: post::ActiveModel = entity.into();
        let model = active_model.update(&self.db).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => RepoError::NotFound,
            other => query_err(other),
        })?;

        Ok(model.into())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let result = PostEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(query_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }

    async fn increment_views(&self, id: Uuid) -> Result<(), RepoError> {
        PostEntity::update_many()
            .col_expr(post::Column::Views, Expr::col(post::Column::Views).add(1))
            .filter(post::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(query_err)?;

        Ok(())
    }

    async fn list_published(&self) -> Result<Vec<Post>, RepoError> {
        let models = PostEntity::find()
            .filter(post::Column::IsPublished.eq(true))
            .all(&self.db)
            .await
            .map_err(query_err)?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn distinct_categories(&self) -> Result<Vec<String>, RepoError> {
        let rows = CategoryEntity::find()
            .order_by_asc(category::Column::Name)
            .all(&self.db)
            .await
            .map_err(query_err)?;

        Ok(rows.into_iter().map(|c| c.name).collect())
    }

    async fn distinct_tags(&self) -> Result<Vec<String>, RepoError> {
        let rows = TagEntity::find()
            .order_by_asc(tag::Column::Name)
            .all(&self.db)
            .await
            .map_err(query_err)?;

        Ok(rows.into_iter().map(|t| t.name).collect())
    }

    async fn published_stats(&self, policy: &StatsPolicy) -> Result<(u64, u64), RepoError> {
        let mut cond = Condition::all().add(post::Column::IsPublished.eq(true));
        for author_id in &policy.excluded_authors {
            cond = cond.add(post::Column::AuthorId.ne(*author_id));
        }

        let totals: Option<(i64, i64)> = PostEntity::find()
            .select_only()
            .column_as(Expr::cust("COUNT(*)"), "total_posts")
            .column_as(Expr::cust("COALESCE(SUM(views), 0)::BIGINT"), "total_views")
            .filter(cond)
            .into_tuple()
            .one(&self.db)
            .await
            .map_err(query_err)?;

        let (posts, views) = totals.unwrap_or((0, 0));
        Ok((posts.max(0) as u64, views.max(0) as u64))
    }
}

#[async_trait]
impl TaxonomyRepository for PostgresPostRepository {
    async fn ensure_category(&self, name: &str) -> Result<(), RepoError> {
        let row = category::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
            created_at: Set(Utc::now().into()),
        };

        CategoryEntity::insert(row)
            .on_conflict(
                OnConflict::column(category::Column::Name)
                    .do_nothing()
                    .to_owned(),
            )
            .do_nothing()
            .exec(&self.db)
            .await
            .map_err(query_err)?;

        Ok(())
    }

    async fn ensure_tags(&self, names: &[String]) -> Result<(), RepoError> {
        if names.is_empty() {
            return Ok(());
        }

        let rows = names.iter().map(|name| tag::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.clone()),
            created_at: Set(Utc::now().into()),
        });

        TagEntity::insert_many(rows)
            .on_conflict(OnConflict::column(tag::Column::Name).do_nothing().to_owned())
            .do_nothing()
            .exec(&self.db)
            .await
            .map_err(query_err)?;

        Ok(())
    }
}
