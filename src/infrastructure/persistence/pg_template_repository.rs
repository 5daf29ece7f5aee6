//! PostgreSQL implementation of the template catalog repository.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use std::sync::Arc;

use crate::domain::entities::{
    NewTemplate, SeoTemplate, TemplateFilter, TemplatePage, TemplateSummary, TierCount,
};
use crate::domain::repositories::TemplateRepository;
use crate::error::AppError;

/// Rows per INSERT statement when seeding the catalog.
const INSERT_CHUNK: usize = 500;

pub struct PgTemplateRepository {
    pool: Arc<PgPool>,
}

impl PgTemplateRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

/// Escapes LIKE wildcards so user search text matches literally.
fn like_pattern(search: &str) -> String {
    let escaped = search
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

fn push_filters<'a>(qb: &mut QueryBuilder<'a, Postgres>, filter: &'a TemplateFilter) {
    qb.push(" WHERE is_active = TRUE");

    if let Some(search) = filter.search.as_deref().filter(|s| !s.is_empty()) {
        let pattern = like_pattern(search);
        qb.push(" AND (");
        for (i, column) in ["name", "industry", "style_name", "document_type"]
            .into_iter()
            .enumerate()
        {
            if i > 0 {
                qb.push(" OR ");
            }
            qb.push(column)
                .push(" ILIKE ")
                .push_bind(pattern.clone())
                .push(" ESCAPE '\\'");
        }
        qb.push(")");
    }
    if let Some(industry) = &filter.industry {
        qb.push(" AND industry = ").push_bind(industry);
    }
    if let Some(document_type) = &filter.document_type {
        qb.push(" AND document_type = ").push_bind(document_type);
    }
    if let Some(style_id) = &filter.style_id {
        qb.push(" AND style_id = ").push_bind(style_id);
    }
    if let Some(tier) = &filter.tier {
        qb.push(" AND tier = ").push_bind(tier);
    }
}

#[async_trait]
impl TemplateRepository for PgTemplateRepository {
    async fn delete_all(&self) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM templates")
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected())
    }

    async fn insert_batch(&self, templates: Vec<NewTemplate>) -> Result<u64, AppError> {
        let mut inserted = 0;

        for chunk in templates.chunks(INSERT_CHUNK) {
            let mut qb: QueryBuilder<Postgres> = QueryBuilder::new(
                "INSERT INTO templates (name, slug, category, tier, style_id, style_name, \
                 industry, document_type, primary_color, secondary_color, accent_color, \
                 heading_font, body_font, mood, is_active, sort_order, fields) ",
            );
            qb.push_values(chunk, |mut row, t| {
                row.push_bind(&t.name)
                    .push_bind(&t.slug)
                    .push_bind(&t.category)
                    .push_bind(t.tier.as_str())
                    .push_bind(&t.style_id)
                    .push_bind(&t.style_name)
                    .push_bind(&t.industry)
                    .push_bind(&t.document_type)
                    .push_bind(&t.primary_color)
                    .push_bind(&t.secondary_color)
                    .push_bind(&t.accent_color)
                    .push_bind(&t.heading_font)
                    .push_bind(&t.body_font)
                    .push_bind(&t.mood)
                    .push_bind(t.is_active)
                    .push_bind(t.sort_order)
                    .push_bind(&t.fields);
            });

            let result = qb.build().execute(self.pool.as_ref()).await?;
            inserted += result.rows_affected();
        }

        Ok(inserted)
    }

    async fn list(&self, filter: TemplateFilter) -> Result<TemplatePage, AppError> {
        let mut count_qb: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT COUNT(*) FROM templates");
        push_filters(&mut count_qb, &filter);
        let total: i64 = count_qb
            .build_query_scalar()
            .fetch_one(self.pool.as_ref())
            .await?;

        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new(
            "SELECT id, name, slug, category, tier, style_id, style_name, industry, \
             document_type, primary_color, secondary_color, accent_color, heading_font, \
             body_font, mood, is_active, sort_order FROM templates",
        );
        push_filters(&mut qb, &filter);
        qb.push(" ORDER BY sort_order, id LIMIT ")
            .push_bind(filter.limit)
            .push(" OFFSET ")
            .push_bind(filter.offset);

        let templates = qb
            .build_query_as::<TemplateSummary>()
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(TemplatePage { templates, total })
    }

    async fn count_by_tier(&self) -> Result<Vec<TierCount>, AppError> {
        let rows = sqlx::query_as::<_, TierCount>(
            "SELECT tier, COUNT(*) AS count FROM templates GROUP BY tier ORDER BY tier",
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows)
    }

    async fn seo_pages_for_category(
        &self,
        category_id: i32,
        limit: i64,
    ) -> Result<Vec<SeoTemplate>, AppError> {
        let rows = sqlx::query_as::<_, SeoTemplate>(
            r#"
            SELECT slug, updated_at
            FROM seo_templates
            WHERE category_id = $1
            ORDER BY id
            LIMIT $2
            "#,
        )
        .bind(category_id)
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows)
    }
}
