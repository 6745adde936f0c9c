mod embedded;

use embedded::migrations;

use chrono::NaiveDateTime;
use tokio_postgres::{Client, NoTls};

use crate::models::{Note, Timer};

pub struct Repository {
    client: Client,
}

impl Repository {
    pub async fn new(database_dsn: String) -> Result<Self, tokio_postgres::Error> {
        let (client, con) = tokio_postgres::connect(&database_dsn, NoTls).await?;

        tokio::spawn(async move {
            if let Err(e) = con.await {
                tracing::error!("connection error: {}", e);
            }
        });

        Ok(Self { client })
    }

    pub async fn migrate(&mut self) -> Result<(), refinery::Error> {
        let migrations_report = migrations::runner().run_async(&mut self.client).await?;

        for migration in migrations_report.applied_migrations() {
            tracing::info!(
                "Migration Applied -  Name: {}, Version: {}",
                migration.name(),
                migration.version()
            );
        }

        tracing::info!("DB migrations finished!");

        Ok(())
    }

    // Notes

    pub async fn create_note(
        &self,
        title: String,
        content: String,
    ) -> Result<Note, tokio_postgres::Error> {
        let row = self.client.query_one(
            "INSERT INTO notes (title, content) VALUES ($1, $2) RETURNING id, title, content, created_at, updated_at",
            &[&title, &content],
        ).await?;

        Ok(Note {
            id: row.get("id"),
            title: row.get("title"),
            content: row.get("content"),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        })
    }

    pub async fn update_note(
        &self,
        id: i64,
        title: String,
        content: String,
    ) -> Result<Option<Note>, tokio_postgres::Error> {
        let row = self.client.query_opt(
            "UPDATE notes SET title = $1, content = $2, updated_at = now() WHERE id = $3 RETURNING id, title, content, created_at, updated_at",
            &[&title, &content, &id],
        ).await?;

        Ok(row.map(|row| Note {
            id: row.get("id"),
            title: row.get("title"),
            content: row.get("content"),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        }))
    }

    pub async fn delete_note(&self, id: i64) -> Result<bool, tokio_postgres::Error> {
        let rows = self
            .client
            .execute("DELETE FROM notes WHERE id = $1", &[&id])
            .await?;

        Ok(rows == 1)
    }

    pub async fn bulk_delete_notes(&self, ids: &[i64]) -> Result<u64, tokio_postgres::Error> {
        self.client
            .execute("DELETE FROM notes WHERE id = ANY($1)", &[&ids])
            .await
    }

    pub async fn get_one_note(&self, id: i64) -> Result<Option<Note>, tokio_postgres::Error> {
        let row = self
            .client
            .query_opt(
                "SELECT id, title, content, created_at, updated_at FROM notes WHERE id = $1",
                &[&id],
            )
            .await?;

        Ok(row.map(|row| Note {
            id: row.get("id"),
            title: row.get("title"),
            content: row.get("content"),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        }))
    }

    pub async fn get_all_notes(&self) -> Result<Vec<Note>, tokio_postgres::Error> {
        let rows = self
            .client
            .query(
                "SELECT id, title, content, created_at, updated_at FROM notes",
                &[],
            )
            .await?;

        let mut vec: Vec<Note> = Vec::new();

        for row in rows {
            vec.push(Note {
                id: row.get("id"),
                title: row.get("title"),
                content: row.get("content"),
                created_at: row.get("created_at"),
                updated_at: row.get("updated_at"),
            });
        }

        Ok(vec)
    }

    pub async fn search_notes(&self, title: &str) -> Result<Vec<Note>, tokio_postgres::Error> {
        let rows = self
            .client
            .query(
                "SELECT id, title, content, created_at, updated_at FROM notes WHERE title LIKE '%' || $1 || '%'",
                &[&title],
            )
            .await?;

        let mut vec: Vec<Note> = Vec::new();

        for row in rows {
            vec.push(Note {
                id: row.get("id"),
                title: row.get("title"),
                content: row.get("content"),
                created_at: row.get("created_at"),
                updated_at: row.get("updated_at"),
            });
        }

        Ok(vec)
    }

    pub async fn count_notes(&self) -> Result<i64, tokio_postgres::Error> {
        let row = self
            .client
            .query_one("SELECT COUNT(*) FROM notes", &[])
            .await?;

        Ok(row.get(0))
    }

    pub async fn recent_notes(&self) -> Result<Vec<Note>, tokio_postgres::Error> {
        let rows = self
            .client
            .query(
                "SELECT id, title, content, created_at, updated_at FROM notes ORDER BY updated_at DESC LIMIT 5",
                &[],
            )
            .await?;

        let mut vec: Vec<Note> = Vec::new();

        for row in rows {
            vec.push(Note {
                id: row.get("id"),
                title: row.get("title"),
                content: row.get("content"),
                created_at: row.get("created_at"),
                updated_at: row.get("updated_at"),
            });
        }

        Ok(vec)
    }

    // Timers

    pub async fn create_timer(
        &self,
        task_name: String,
        start_time: NaiveDateTime,
        end_time: NaiveDateTime,
        duration: i64,
    ) -> Result<Timer, tokio_postgres::Error> {
        let row = self.client.query_one(
            "INSERT INTO timers (task_name, start_time, end_time, duration) VALUES ($1, $2, $3, $4) RETURNING id, task_name, start_time, end_time, duration",
            &[&task_name, &start_time, &end_time, &duration],
        ).await?;

        Ok(Timer {
            id: row.get("id"),
            task_name: row.get("task_name"),
            start_time: row.get("start_time"),
            end_time: row.get("end_time"),
            duration: row.get("duration"),
        })
    }

    pub async fn update_timer(
        &self,
        id: i64,
        task_name: String,
        start_time: NaiveDateTime,
        end_time: NaiveDateTime,
        duration: i64,
    ) -> Result<Option<Timer>, tokio_postgres::Error> {
        let row = self.client.query_opt(
            "UPDATE timers SET task_name = $1, start_time = $2, end_time = $3, duration = $4 WHERE id = $5 RETURNING id, task_name, start_time, end_time, duration",
            &[&task_name, &start_time, &end_time, &duration, &id],
        ).await?;

        Ok(row.map(|row| Timer {
            id: row.get("id"),
            task_name: row.get("task_name"),
            start_time: row.get("start_time"),
            end_time: row.get("end_time"),
            duration: row.get("duration"),
        }))
    }

    pub async fn delete_timer(&self, id: i64) -> Result<bool, tokio_postgres::Error> {
        let rows = self
            .client
            .execute("DELETE FROM timers WHERE id = $1", &[&id])
            .await?;

        Ok(rows == 1)
    }

    pub async fn get_one_timer(&self, id: i64) -> Result<Option<Timer>, tokio_postgres::Error> {
        let row = self
            .client
            .query_opt(
                "SELECT id, task_name, start_time, end_time, duration FROM timers WHERE id = $1",
                &[&id],
            )
            .await?;

        Ok(row.map(|row| Timer {
            id: row.get("id"),
            task_name: row.get("task_name"),
            start_time: row.get("start_time"),
            end_time: row.get("end_time"),
            duration: row.get("duration"),
        }))
    }

    pub async fn get_all_timers(&self) -> Result<Vec<Timer>, tokio_postgres::Error> {
        let rows = self
            .client
            .query(
                "SELECT id, task_name, start_time, end_time, duration FROM timers",
                &[],
            )
            .await?;

        let mut vec: Vec<Timer> = Vec::new();

        for row in rows {
            vec.push(Timer {
                id: row.get("id"),
                task_name: row.get("task_name"),
                start_time: row.get("start_time"),
                end_time: row.get("end_time"),
                duration: row.get("duration"),
            });
        }

        Ok(vec)
    }

    pub async fn active_timers(&self) -> Result<Vec<Timer>, tokio_postgres::Error> {
        let rows = self
            .client
            .query(
                "SELECT id, task_name, start_time, end_time, duration FROM timers WHERE end_time IS NULL",
                &[],
            )
            .await?;

        let mut vec: Vec<Timer> = Vec::new();

        for row in rows {
            vec.push(Timer {
                id: row.get("id"),
                task_name: row.get("task_name"),
                start_time: row.get("start_time"),
                end_time: row.get("end_time"),
                duration: row.get("duration"),
            });
        }

        Ok(vec)
    }

    pub async fn total_duration(
        &self,
        task_name: &str,
    ) -> Result<Option<i64>, tokio_postgres::Error> {
        let row = self
            .client
            .query_one(
                "SELECT SUM(duration)::BIGINT FROM timers WHERE task_name = $1",
                &[&task_name],
            )
            .await?;

        Ok(row.get(0))
    }

    pub async fn average_duration(&self) -> Result<Option<f64>, tokio_postgres::Error> {
        let row = self
            .client
            .query_one("SELECT AVG(duration)::DOUBLE PRECISION FROM timers", &[])
            .await?;

        Ok(row.get(0))
    }

    pub async fn timers_in_range(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<Timer>, tokio_postgres::Error> {
        let rows = self
            .client
            .query(
                "SELECT id, task_name, start_time, end_time, duration FROM timers WHERE start_time BETWEEN $1 AND $2",
                &[&start, &end],
            )
            .await?;

        let mut vec: Vec<Timer> = Vec::new();

        for row in rows {
            vec.push(Timer {
                id: row.get("id"),
                task_name: row.get("task_name"),
                start_time: row.get("start_time"),
                end_time: row.get("end_time"),
                duration: row.get("duration"),
            });
        }

        Ok(vec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::time::{SystemTime, UNIX_EPOCH};

    // Runs only against a disposable database: set TEST_PG_DSN to enable.
    async fn connect() -> Option<Repository> {
        let dsn = env::var("TEST_PG_DSN").ok()?;
        let mut repo = Repository::new(dsn)
            .await
            .expect("failed to connect to test database");
        repo.migrate().await.expect("failed to migrate test database");
        Some(repo)
    }

    fn unique(prefix: &str) -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        format!("{prefix}-{nanos}")
    }

    fn ts(s: &str) -> NaiveDateTime {
        s.parse().unwrap()
    }

    #[tokio::test]
    async fn storage_properties() {
        let Some(repo) = connect().await else {
            return;
        };

        // Create then get returns the stored fields, stamped created == updated.
        let title = unique("Foo");
        let note = repo
            .create_note(title.clone(), "body".to_string())
            .await
            .unwrap();
        assert_eq!(note.created_at, note.updated_at);

        let fetched = repo.get_one_note(note.id).await.unwrap().unwrap();
        assert_eq!(fetched.title, title);
        assert_eq!(fetched.content, "body");

        // Update refreshes updated_at and leaves created_at alone.
        let updated = repo
            .update_note(note.id, title.clone(), "revised".to_string())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.content, "revised");
        assert_eq!(updated.created_at, note.created_at);
        assert!(updated.updated_at > note.updated_at);

        // Updating a missing id reports no row.
        assert!(
            repo.update_note(i64::MAX, title.clone(), String::new())
                .await
                .unwrap()
                .is_none()
        );

        // Delete on a missing id succeeds and removes nothing.
        let before = repo.count_notes().await.unwrap();
        assert!(!repo.delete_note(i64::MAX).await.unwrap());
        assert_eq!(repo.count_notes().await.unwrap(), before);

        // Bulk delete removes exactly the subset that exists.
        let extra = repo
            .create_note(unique("Bar"), String::new())
            .await
            .unwrap();
        let count_before = repo.count_notes().await.unwrap();
        let removed = repo
            .bulk_delete_notes(&[note.id, extra.id, i64::MAX])
            .await
            .unwrap();
        assert_eq!(removed, 2);
        assert_eq!(repo.count_notes().await.unwrap(), count_before - 2);

        // Empty id list is a no-op.
        assert_eq!(repo.bulk_delete_notes(&[]).await.unwrap(), 0);

        // Infix title search.
        let tag = unique("oo");
        let foo = repo
            .create_note(format!("Foo {tag}"), String::new())
            .await
            .unwrap();
        let bar = repo
            .create_note(format!("Bar {tag}"), String::new())
            .await
            .unwrap();
        let zoo = repo
            .create_note(format!("Zoo {tag}"), String::new())
            .await
            .unwrap();
        let hits = repo.search_notes(&format!("oo {tag}")).await.unwrap();
        let ids: Vec<i64> = hits.iter().map(|n| n.id).collect();
        assert!(ids.contains(&foo.id));
        assert!(ids.contains(&zoo.id));
        assert!(!ids.contains(&bar.id));

        // Recent notes: at most five, most recently updated first.
        let recent = repo.recent_notes().await.unwrap();
        assert!(recent.len() <= 5);
        for pair in recent.windows(2) {
            assert!(pair[0].updated_at >= pair[1].updated_at);
        }

        repo.bulk_delete_notes(&[foo.id, bar.id, zoo.id])
            .await
            .unwrap();

        // Timer duration is derived and persisted as supplied.
        let task = unique("task");
        let t1 = repo
            .create_timer(
                task.clone(),
                ts("2024-01-01T00:00:00"),
                ts("2024-01-01T00:05:30"),
                330,
            )
            .await
            .unwrap();
        assert_eq!(t1.duration, 330);
        assert_eq!(t1.end_time, Some(ts("2024-01-01T00:05:30")));

        let t2 = repo
            .create_timer(
                task.clone(),
                ts("2024-01-02T00:00:00"),
                ts("2024-01-02T00:03:20"),
                200,
            )
            .await
            .unwrap();

        // Sum over a named task; absent task reports null, not zero.
        assert_eq!(repo.total_duration(&task).await.unwrap(), Some(530));
        assert_eq!(repo.total_duration(&unique("absent")).await.unwrap(), None);

        // Average over all timers exists once any timer does.
        assert!(repo.average_duration().await.unwrap().is_some());

        // Range filter is inclusive on both bounds.
        let in_range = repo
            .timers_in_range(ts("2024-01-01T00:00:00"), ts("2024-01-02T00:00:00"))
            .await
            .unwrap();
        let range_ids: Vec<i64> = in_range.iter().map(|t| t.id).collect();
        assert!(range_ids.contains(&t1.id));
        assert!(range_ids.contains(&t2.id));

        // No timer is ever written without an end time.
        let active = repo.active_timers().await.unwrap();
        assert!(active.iter().all(|t| t.end_time.is_none()));

        // Update rewrites the whole mutable set.
        let renamed = unique("renamed");
        let updated_timer = repo
            .update_timer(
                t1.id,
                renamed.clone(),
                ts("2024-01-01T01:00:00"),
                ts("2024-01-01T00:00:00"),
                -3600,
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated_timer.task_name, renamed);
        assert_eq!(updated_timer.duration, -3600);

        // Timer delete is idempotent at the caller level.
        assert!(repo.delete_timer(t1.id).await.unwrap());
        assert!(!repo.delete_timer(t1.id).await.unwrap());
        repo.delete_timer(t2.id).await.unwrap();
    }
}
