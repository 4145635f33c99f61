use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::sql_types::Timestamptz;
use diesel::{
    define_sql_function, dsl, ExpressionMethods, OptionalExtension, QueryDsl, SelectableHelper,
};
use diesel_async::RunQueryDsl;

use crate::db::{DaoError, DbAsyncPool, EntryRepository};
use crate::models::entry::{Entry, EntryChangeset, EntryDraft, EntryUpdate, NewEntry};
use crate::schema::entries as entry_fields;
use crate::schema::entries::dsl::entries;

define_sql_function! {
    fn greatest(a: Timestamptz, b: Timestamptz) -> Timestamptz;
}

pub struct Dao {
    db_async_pool: DbAsyncPool,
}

impl Dao {
    pub fn new(db_async_pool: &DbAsyncPool) -> Self {
        Self {
            db_async_pool: db_async_pool.clone(),
        }
    }

    /// Applies `update` with `now` as the modification time. The stored `updated_at` keeps the
    /// later of its current value and `now`.
    pub async fn update_entry_at(
        &self,
        entry_id: &str,
        update: &EntryUpdate,
        now: DateTime<Utc>,
    ) -> Result<Option<Entry>, DaoError> {
        let changeset = EntryChangeset::from(update);

        let mut conn = self.db_async_pool.get().await?;
        Ok(diesel::update(entries.find(entry_id))
            .set((
                &changeset,
                entry_fields::updated_at.eq(greatest(entry_fields::updated_at, now)),
            ))
            .returning(Entry::as_returning())
            .get_result::<Entry>(&mut conn)
            .await
            .optional()?)
    }
}

#[async_trait]
impl EntryRepository for Dao {
    async fn create_entry(&self, draft: EntryDraft) -> Result<Entry, DaoError> {
        let entry = draft.into_entry(Utc::now());
        let new_entry = NewEntry::from(&entry);

        let mut conn = self.db_async_pool.get().await?;
        let stored_entry = dsl::insert_into(entries)
            .values(&new_entry)
            .returning(Entry::as_returning())
            .get_result::<Entry>(&mut conn)
            .await?;

        Ok(stored_entry)
    }

    async fn get_all_entries(&self) -> Result<Vec<Entry>, DaoError> {
        let mut conn = self.db_async_pool.get().await?;
        Ok(entries
            .select(Entry::as_select())
            .order((entry_fields::created_at.asc(), entry_fields::id.asc()))
            .load::<Entry>(&mut conn)
            .await?)
    }

    async fn get_entry(&self, entry_id: &str) -> Result<Option<Entry>, DaoError> {
        let mut conn = self.db_async_pool.get().await?;
        Ok(entries
            .find(entry_id)
            .select(Entry::as_select())
            .first::<Entry>(&mut conn)
            .await
            .optional()?)
    }

    async fn update_entry(
        &self,
        entry_id: &str,
        update: &EntryUpdate,
    ) -> Result<Option<Entry>, DaoError> {
        self.update_entry_at(entry_id, update, Utc::now()).await
    }

    async fn delete_entry(&self, entry_id: &str) -> Result<bool, DaoError> {
        let mut conn = self.db_async_pool.get().await?;
        let deleted_row_count = diesel::delete(entries.find(entry_id))
            .execute(&mut conn)
            .await?;

        Ok(deleted_row_count > 0)
    }

    async fn delete_all_entries(&self) -> Result<(), DaoError> {
        let mut conn = self.db_async_pool.get().await?;
        let deleted_row_count = diesel::delete(entries).execute(&mut conn).await?;
        log::debug!("Deleted {deleted_row_count} entries");

        Ok(())
    }
}

// These need a live Postgres instance configured through the JOURNAL_DB_* variables. Run them
// with `cargo test -- --ignored`.
#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_utils;
    use uuid::Uuid;

    async fn dao() -> Dao {
        Dao::new(&test_utils::db_async_pool().await)
    }

    fn unique_id() -> String {
        format!("dao-test-{}", Uuid::now_v7())
    }

    #[tokio::test]
    #[ignore = "requires a Postgres database"]
    async fn test_create_and_get_entry() {
        let dao = dao().await;
        let id = unique_id();

        let created = dao
            .create_entry(EntryDraft::new("Studied diesel", "Async", "Practice").with_id(&id))
            .await
            .unwrap();

        assert_eq!(created.id, id);
        assert_eq!(created.created_at, created.updated_at);

        let fetched = dao.get_entry(&id).await.unwrap().unwrap();
        assert_eq!(fetched.work, "Studied diesel");
        assert_eq!(fetched.struggle, "Async");
        assert_eq!(fetched.intention, "Practice");

        dao.delete_entry(&id).await.unwrap();
    }

    #[tokio::test]
    #[ignore = "requires a Postgres database"]
    async fn test_get_missing_entry_returns_none() {
        let dao = dao().await;
        assert!(dao.get_entry(&unique_id()).await.unwrap().is_none());
    }

    #[tokio::test]
    #[ignore = "requires a Postgres database"]
    async fn test_create_duplicate_id_is_constraint_violation() {
        let dao = dao().await;
        let id = unique_id();

        dao.create_entry(EntryDraft::new("a", "b", "c").with_id(&id))
            .await
            .unwrap();
        let result = dao
            .create_entry(EntryDraft::new("d", "e", "f").with_id(&id))
            .await;

        assert!(matches!(result, Err(DaoError::ConstraintViolation(_))));

        dao.delete_entry(&id).await.unwrap();
    }

    #[tokio::test]
    #[ignore = "requires a Postgres database"]
    async fn test_update_entry_changes_only_given_fields() {
        let dao = dao().await;
        let id = unique_id();

        let draft = EntryDraft::new("Original work", "Original struggle", "Original intention");
        let created = dao.create_entry(draft.with_id(&id)).await.unwrap();

        let update = EntryUpdate {
            work: Some(String::from("Updated work")),
            ..Default::default()
        };
        let updated = dao.update_entry(&id, &update).await.unwrap().unwrap();

        assert_eq!(updated.work, "Updated work");
        assert_eq!(updated.struggle, "Original struggle");
        assert_eq!(updated.intention, "Original intention");
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);

        dao.delete_entry(&id).await.unwrap();
    }

    #[tokio::test]
    #[ignore = "requires a Postgres database"]
    async fn test_update_entry_never_moves_updated_at_backward() {
        let dao = dao().await;
        let id = unique_id();

        let created = dao
            .create_entry(EntryDraft::new("a", "b", "c").with_id(&id))
            .await
            .unwrap();

        let update = EntryUpdate {
            intention: Some(String::from("Updated intention")),
            ..Default::default()
        };
        let earlier = created.updated_at - chrono::Duration::seconds(30);
        let updated = dao
            .update_entry_at(&id, &update, earlier)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.intention, "Updated intention");
        assert_eq!(updated.updated_at, created.updated_at);
        assert!(updated.updated_at >= updated.created_at);

        dao.delete_entry(&id).await.unwrap();
    }

    #[tokio::test]
    #[ignore = "requires a Postgres database"]
    async fn test_update_entry_with_no_fields_only_touches_updated_at() {
        let dao = dao().await;
        let id = unique_id();

        let created = dao
            .create_entry(EntryDraft::new("a", "b", "c").with_id(&id))
            .await
            .unwrap();

        let later = created.updated_at + chrono::Duration::seconds(5);
        let updated = dao
            .update_entry_at(&id, &EntryUpdate::default(), later)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.work, "a");
        assert_eq!(updated.struggle, "b");
        assert_eq!(updated.intention, "c");
        assert_eq!(updated.updated_at, later);

        dao.delete_entry(&id).await.unwrap();
    }

    #[tokio::test]
    #[ignore = "requires a Postgres database"]
    async fn test_update_missing_entry_returns_none() {
        let dao = dao().await;
        let update = EntryUpdate {
            work: Some(String::from("Updated work")),
            ..Default::default()
        };

        assert!(dao.update_entry(&unique_id(), &update).await.unwrap().is_none());
    }

    #[tokio::test]
    #[ignore = "requires a Postgres database"]
    async fn test_delete_entry_is_idempotent() {
        let dao = dao().await;
        let id = unique_id();

        dao.create_entry(EntryDraft::new("a", "b", "c").with_id(&id))
            .await
            .unwrap();

        assert!(dao.delete_entry(&id).await.unwrap());
        assert!(dao.get_entry(&id).await.unwrap().is_none());
        assert!(!dao.delete_entry(&id).await.unwrap());
    }

    #[tokio::test]
    #[ignore = "requires a Postgres database and clears the entries table"]
    async fn test_delete_all_entries() {
        let dao = dao().await;

        for i in 0..3 {
            dao.create_entry(EntryDraft::new(&format!("Work {i}"), "Struggle", "Intention"))
                .await
                .unwrap();
        }

        assert!(dao.get_all_entries().await.unwrap().len() >= 3);

        dao.delete_all_entries().await.unwrap();
        assert!(dao.get_all_entries().await.unwrap().is_empty());
    }
}
