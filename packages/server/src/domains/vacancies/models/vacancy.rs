use anyhow::Result;
use serde::{Deserialize, Serialize};
use sqlx::{PgPool, Postgres, QueryBuilder};

/// Placeholder stored when upstream omits a text field.
pub const SENTINEL: &str = "N/A";

/// Rows per INSERT statement. Seven binds per row keeps each statement well
/// under the Postgres bind-parameter limit.
const INSERT_CHUNK_SIZE: usize = 1000;

/// Vacancy - one normalized hh.ru vacancy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Vacancy {
    pub id: i64,
    pub title: String,
    pub city: String,
    pub specialization: String,
    pub salary_min: f64,
    pub salary_max: f64,
    pub currency: String,
    pub url: String,
}

/// A vacancy row before the store assigns its id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewVacancy {
    pub title: String,
    pub city: String,
    pub specialization: String,
    pub salary_min: f64,
    pub salary_max: f64,
    pub currency: String,
    pub url: String,
}

/// Read filter for `Vacancy::search`. Empty strings mean "no filter".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VacancyFilter {
    /// Exact, case-sensitive match on `city`.
    pub city: Option<String>,
    /// Case-sensitive substring match on `specialization`.
    pub specialization: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl VacancyFilter {
    pub fn city(&self) -> Option<&str> {
        self.city.as_deref().filter(|c| !c.is_empty())
    }

    pub fn specialization(&self) -> Option<&str> {
        self.specialization.as_deref().filter(|s| !s.is_empty())
    }

    /// Apply a configured ceiling: `limit` defaults to it and is clamped by it.
    pub fn bounded(mut self, max_limit: Option<i64>) -> Self {
        if let Some(max) = max_limit {
            self.limit = Some(self.limit.map_or(max, |l| l.min(max)));
        }
        self.limit = self.limit.map(|l| l.max(0));
        self.offset = self.offset.map(|o| o.max(0));
        self
    }
}

/// Escape LIKE wildcards so user input matches literally.
pub fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

// =============================================================================
// SQL Queries
// =============================================================================

impl Vacancy {
    /// Replace the whole table with `rows` in one transaction.
    ///
    /// Readers keep seeing the previous contents until commit; any failure
    /// rolls back and leaves them in place. Concurrent replacements run one
    /// after the other, so the table only ever holds a single fetch.
    pub async fn replace_all(rows: &[NewVacancy], pool: &PgPool) -> Result<u64> {
        let mut tx = pool.begin().await?;

        // Self-conflicting, but does not block plain SELECTs.
        sqlx::query("LOCK TABLE vacancies IN SHARE ROW EXCLUSIVE MODE")
            .execute(&mut *tx)
            .await?;

        let deleted = sqlx::query("DELETE FROM vacancies")
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let mut inserted = 0;
        for chunk in rows.chunks(INSERT_CHUNK_SIZE) {
            let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
                "INSERT INTO vacancies (title, city, specialization, salary_min, salary_max, currency, url) ",
            );
            builder.push_values(chunk, |mut b, row| {
                b.push_bind(row.title.clone())
                    .push_bind(row.city.clone())
                    .push_bind(row.specialization.clone())
                    .push_bind(row.salary_min)
                    .push_bind(row.salary_max)
                    .push_bind(row.currency.clone())
                    .push_bind(row.url.clone());
            });

            inserted += builder.build().execute(&mut *tx).await?.rows_affected();
        }

        tx.commit().await?;

        tracing::debug!(deleted, inserted, "Replaced vacancies table contents");
        Ok(inserted)
    }

    /// Find vacancies matching `filter`, in storage (id) order.
    pub async fn search(filter: &VacancyFilter, pool: &PgPool) -> Result<Vec<Self>> {
        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT * FROM vacancies WHERE TRUE");

        if let Some(city) = filter.city() {
            builder.push(" AND city = ").push_bind(city.to_string());
        }
        if let Some(specialization) = filter.specialization() {
            builder
                .push(" AND specialization LIKE ")
                .push_bind(format!("%{}%", escape_like(specialization)))
                .push(" ESCAPE '\\'");
        }

        builder.push(" ORDER BY id");

        if let Some(limit) = filter.limit {
            builder.push(" LIMIT ").push_bind(limit);
        }
        if let Some(offset) = filter.offset {
            builder.push(" OFFSET ").push_bind(offset);
        }

        let vacancies = builder
            .build_query_as::<Vacancy>()
            .fetch_all(pool)
            .await?;
        Ok(vacancies)
    }

    /// Count stored vacancies
    pub async fn count(pool: &PgPool) -> Result<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM vacancies")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }
}
