//! Repository for the `activity_events` table.

use sqlx::PgPool;

use sitelog_core::activity::EventKind;
use sitelog_core::types::DbId;

use crate::error::StoreError;
use crate::models::activity_event::{
    ActivityEvent, EventPage, EventQuery, NewActivityEvent, UpdateActivityEvent,
};

// ---------------------------------------------------------------------------
// Column lists and limits
// ---------------------------------------------------------------------------

/// Column list for SELECT queries.
const COLUMNS: &str = "id, user_id, event_name, type, category, importance, note, date";

/// Page size used when the caller does not specify one.
pub const DEFAULT_PER_PAGE: i64 = 40;

/// Upper bound on the page size a caller may request.
pub const MAX_PER_PAGE: i64 = 100;

/// Sort keys callers may order by. Anything else falls back to `date`.
const SORTABLE_COLUMNS: [&str; 5] = ["date", "event_name", "category", "importance", "type"];

// ---------------------------------------------------------------------------
// ActivityEventRepo
// ---------------------------------------------------------------------------

/// Provides CRUD and query operations for activity events, enforcing the
/// append-only guarantee for automatic events.
pub struct ActivityEventRepo;

impl ActivityEventRepo {
    /// Insert a new event, returning the stored row.
    ///
    /// Rejects empty required text fields so no half-formed row ever lands,
    /// whatever path produced the DTO.
    pub async fn insert(pool: &PgPool, event: &NewActivityEvent) -> Result<ActivityEvent, StoreError> {
        if event.event_name.is_empty() {
            return Err(StoreError::EmptyField("event_name"));
        }
        if event.category.is_empty() {
            return Err(StoreError::EmptyField("category"));
        }

        let query = format!(
            "INSERT INTO activity_events (user_id, event_name, type, category, importance, note, date)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );

        let row = sqlx::query_as::<_, ActivityEvent>(&query)
            .bind(event.user_id)
            .bind(&event.event_name)
            .bind(event.kind.as_str())
            .bind(&event.category)
            .bind(event.importance.as_str())
            .bind(&event.note)
            .bind(event.date)
            .fetch_one(pool)
            .await?;

        Ok(row)
    }

    /// Query one page of events with filtering and sorting.
    ///
    /// `total_pages` is the ceiling of `total / per_page`.
    pub async fn page(pool: &PgPool, params: &EventQuery) -> Result<EventPage, sqlx::Error> {
        let per_page = params
            .per_page
            .unwrap_or(DEFAULT_PER_PAGE)
            .clamp(1, MAX_PER_PAGE);
        let page = params.page.unwrap_or(1).max(1);
        let offset = (page - 1) * per_page;

        let orderby = match params.orderby.as_deref() {
            Some(key) if SORTABLE_COLUMNS.contains(&key) => key,
            _ => "date",
        };
        let order = match params.order.as_deref() {
            Some("ASC") => "ASC",
            _ => "DESC",
        };

        let (where_clause, bind_values, bind_idx) = build_event_filter(params);

        let count_query = format!("SELECT COUNT(*)::BIGINT FROM activity_events {where_clause}");
        let total = bind_filter_values_scalar(sqlx::query_scalar::<_, i64>(&count_query), &bind_values)
            .fetch_one(pool)
            .await?;

        let query = format!(
            "SELECT {COLUMNS} FROM activity_events {where_clause} \
             ORDER BY {orderby} {order} \
             LIMIT ${bind_idx} OFFSET ${}",
            bind_idx + 1
        );
        let items = bind_filter_values(sqlx::query_as::<_, ActivityEvent>(&query), &bind_values)
            .bind(per_page)
            .bind(offset)
            .fetch_all(pool)
            .await?;

        Ok(EventPage {
            items,
            total,
            total_pages: (total + per_page - 1) / per_page,
        })
    }

    /// Find a single event by its id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ActivityEvent>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM activity_events WHERE id = $1");
        sqlx::query_as::<_, ActivityEvent>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Apply a partial update to a manual event, returning the updated row.
    ///
    /// The existence/kind check and the write run in one transaction so a
    /// concurrent delete of the same id cannot slip between them. Fails with
    /// [`StoreError::Immutable`] for automatic events, which are append-only.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateActivityEvent,
    ) -> Result<ActivityEvent, StoreError> {
        let mut tx = pool.begin().await?;

        let lock_query = format!("SELECT {COLUMNS} FROM activity_events WHERE id = $1 FOR UPDATE");
        let existing = sqlx::query_as::<_, ActivityEvent>(&lock_query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(StoreError::NotFound(id))?;

        if existing.kind != EventKind::Manual.as_str() {
            return Err(StoreError::Immutable(id));
        }

        let query = format!(
            "UPDATE activity_events SET
                event_name = COALESCE($2, event_name),
                category = COALESCE($3, category),
                importance = COALESCE($4, importance),
                note = COALESCE($5, note),
                date = COALESCE($6, date)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, ActivityEvent>(&query)
            .bind(id)
            .bind(&input.event_name)
            .bind(&input.category)
            .bind(input.importance.map(|i| i.as_str()))
            .bind(&input.note)
            .bind(input.date)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(updated)
    }

    /// Delete a manual event. Same guards and transaction scope as
    /// [`update`](Self::update).
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<(), StoreError> {
        let mut tx = pool.begin().await?;

        let lock_query = format!("SELECT {COLUMNS} FROM activity_events WHERE id = $1 FOR UPDATE");
        let existing = sqlx::query_as::<_, ActivityEvent>(&lock_query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(StoreError::NotFound(id))?;

        if existing.kind != EventKind::Manual.as_str() {
            return Err(StoreError::Immutable(id));
        }

        sqlx::query("DELETE FROM activity_events WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Distinct categories observed in the store, in no particular order.
    pub async fn distinct_categories(pool: &PgPool) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>("SELECT DISTINCT category FROM activity_events")
            .fetch_all(pool)
            .await
    }

    /// Remove the events table entirely. Uninstall path only; all recorded
    /// history is destroyed.
    pub async fn drop_table(pool: &PgPool) -> Result<(), sqlx::Error> {
        sqlx::query("DROP TABLE IF EXISTS activity_events")
            .execute(pool)
            .await?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Internal helpers for dynamic query building
// ---------------------------------------------------------------------------

/// Build a WHERE clause and bind values from `EventQuery` filter parameters.
///
/// Returns `(where_clause, bind_values, next_bind_index)`. The clause is
/// empty if no filters are active, or starts with `WHERE `. All filters are
/// AND-combined.
fn build_event_filter(params: &EventQuery) -> (String, Vec<String>, u32) {
    let mut conditions: Vec<String> = Vec::new();
    let mut bind_idx = 1u32;
    let mut bind_values: Vec<String> = Vec::new();

    if let Some(ref search) = params.search {
        conditions.push(format!(
            "(event_name ILIKE ${bind_idx} OR note ILIKE ${})",
            bind_idx + 1
        ));
        bind_idx += 2;
        let pattern = format!("%{}%", escape_like(search));
        bind_values.push(pattern.clone());
        bind_values.push(pattern);
    }

    if let Some(ref category) = params.category {
        conditions.push(format!("category = ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(category.clone());
    }

    if let Some(kind) = params.kind {
        conditions.push(format!("type = ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(kind.as_str().to_string());
    }

    if let Some(importance) = params.importance {
        conditions.push(format!("importance = ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(importance.as_str().to_string());
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };

    (where_clause, bind_values, bind_idx)
}

/// Escape LIKE metacharacters so a search term matches literally.
fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Bind a slice of text values to a sqlx `QueryAs`.
fn bind_filter_values<'q, O>(
    mut q: sqlx::query::QueryAs<'q, sqlx::Postgres, O, sqlx::postgres::PgArguments>,
    bind_values: &'q [String],
) -> sqlx::query::QueryAs<'q, sqlx::Postgres, O, sqlx::postgres::PgArguments> {
    for val in bind_values {
        q = q.bind(val.as_str());
    }
    q
}

/// Bind a slice of text values to a sqlx `QueryScalar`.
fn bind_filter_values_scalar<'q>(
    mut q: sqlx::query::QueryScalar<'q, sqlx::Postgres, i64, sqlx::postgres::PgArguments>,
    bind_values: &'q [String],
) -> sqlx::query::QueryScalar<'q, sqlx::Postgres, i64, sqlx::postgres::PgArguments> {
    for val in bind_values {
        q = q.bind(val.as_str());
    }
    q
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_is_empty_without_parameters() {
        let (clause, binds, next_idx) = build_event_filter(&EventQuery::default());
        assert_eq!(clause, "");
        assert!(binds.is_empty());
        assert_eq!(next_idx, 1);
    }

    #[test]
    fn filter_combines_conditions_with_and() {
        let params = EventQuery {
            search: Some("update".into()),
            category: Some("Plugin update".into()),
            kind: Some(EventKind::Automatic),
            ..Default::default()
        };
        let (clause, binds, next_idx) = build_event_filter(&params);
        assert_eq!(
            clause,
            "WHERE (event_name ILIKE $1 OR note ILIKE $2) AND category = $3 AND type = $4"
        );
        assert_eq!(binds, vec!["%update%", "%update%", "Plugin update", "automatic"]);
        assert_eq!(next_idx, 5);
    }

    #[test]
    fn search_term_metacharacters_are_escaped() {
        let params = EventQuery {
            search: Some("100%_done".into()),
            ..Default::default()
        };
        let (_, binds, _) = build_event_filter(&params);
        assert_eq!(binds[0], "%100\\%\\_done%");
    }
}
