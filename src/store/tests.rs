//! TodoStore Tests

#[cfg(test)]
mod tests {
    use crate::domain::{DomainError, DomainResult, Todo};
    use crate::repository::{read_todos, write_todos, FileStore, KeyValueStore, MemoryStore};
    use crate::store::{FixedClock, StatusSummary, TodoStore};
    use chrono::{DateTime, Duration, Local, Month, NaiveDate, TimeZone, Utc};

    const KEY: &str = "fyf-todos";

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    fn empty_store() -> TodoStore<MemoryStore, FixedClock> {
        TodoStore::load_with_clock(MemoryStore::new(), KEY, FixedClock::new(now())).unwrap()
    }

    fn local(date: NaiveDate, h: u32, m: u32, s: u32) -> DateTime<Utc> {
        Local
            .from_local_datetime(&date.and_hms_opt(h, m, s).unwrap())
            .earliest()
            .unwrap()
            .with_timezone(&Utc)
    }

    /// Store whose writes can be made to fail
    #[derive(Default)]
    struct FlakyStore {
        inner: MemoryStore,
        fail_writes: bool,
    }

    impl KeyValueStore for FlakyStore {
        fn get_item(&self, key: &str) -> DomainResult<Option<String>> {
            self.inner.get_item(key)
        }

        fn set_item(&mut self, key: &str, value: &str) -> DomainResult<()> {
            if self.fail_writes {
                return Err(DomainError::Storage("disk full".to_string()));
            }
            self.inner.set_item(key, value)
        }

        fn remove_item(&mut self, key: &str) -> DomainResult<()> {
            self.inner.remove_item(key)
        }
    }

    #[test]
    fn test_load_empty_slot() {
        let store = empty_store();
        assert!(store.is_empty());
        assert_eq!(store.next_id(), Some(1));
    }

    #[test]
    fn test_ids_strictly_increasing() {
        let mut store = empty_store();
        let ids: Vec<u64> = (0..5)
            .map(|i| store.add(format!("todo {}", i), "", None).unwrap())
            .collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_add_then_get() {
        let mut store = empty_store();
        let due = now() + Duration::days(2);
        let id = store.add("Write report", "Q2 numbers", Some(due)).unwrap();

        let todo = store.get_todo_by_id(id).unwrap();
        assert_eq!(todo.title, "Write report");
        assert_eq!(todo.text, "Q2 numbers");
        assert_eq!(todo.due_date, Some(due));
        assert_eq!(todo.created_at, now());
        assert!(!todo.completed);
    }

    #[test]
    fn test_add_persists_immediately() {
        let mut store = empty_store();
        store.add("Persist me", "", None).unwrap();

        let stored = read_todos(store.storage(), KEY).unwrap().unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].title, "Persist me");
    }

    #[test]
    fn test_get_missing_is_none() {
        let mut store = empty_store();
        store.add("only", "", None).unwrap();
        assert!(store.get_todo_by_id(42).is_none());
    }

    #[test]
    fn test_get_by_path_id() {
        let mut store = empty_store();
        let id = store.add("from url", "", None).unwrap();
        assert_eq!(store.get_todo_by_path_id(&id.to_string()).unwrap().id, id);
        assert!(store.get_todo_by_path_id("abc").is_none());
        assert!(store.get_todo_by_path_id("-1").is_none());
        assert!(store.get_todo_by_path_id("99").is_none());
    }

    #[test]
    fn test_toggle_twice_restores_state() {
        let mut store = empty_store();
        let id = store.add("flip", "", None).unwrap();

        assert_eq!(store.toggle_todo(id).unwrap(), Some(true));
        assert!(store.get_todo_by_id(id).unwrap().completed);
        let stored = read_todos(store.storage(), KEY).unwrap().unwrap();
        assert!(stored[0].completed);

        assert_eq!(store.toggle_todo(id).unwrap(), Some(false));
        assert!(!store.get_todo_by_id(id).unwrap().completed);
    }

    #[test]
    fn test_toggle_missing_is_noop() {
        let mut store = empty_store();
        store.add("untouched", "", None).unwrap();
        let before = store.storage().get_item(KEY).unwrap();

        assert_eq!(store.toggle_todo(99).unwrap(), None);
        assert_eq!(store.storage().get_item(KEY).unwrap(), before);
    }

    #[test]
    fn test_todos_for_date() {
        let mut store = empty_store();
        let day = NaiveDate::from_ymd_opt(2024, 6, 20).unwrap();
        let next = day.succ_opt().unwrap();

        let noon = store.add("noon", "", Some(local(day, 12, 0, 0))).unwrap();
        let first = store.add("first ms", "", Some(local(day, 0, 0, 0))).unwrap();
        let last = store
            .add("last ms", "", Some(local(next, 0, 0, 0) - Duration::milliseconds(1)))
            .unwrap();
        store.add("next day", "", Some(local(next, 0, 0, 1))).unwrap();
        store.add("no deadline", "", None).unwrap();

        let ids: Vec<u64> = store.todos_for_date(day).iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![noon, first, last]);
    }

    #[test]
    fn test_todos_for_month_and_year() {
        let mut store = empty_store();
        let d = |y, m, day| NaiveDate::from_ymd_opt(y, m, day).unwrap();

        let feb_start = store.add("feb 1", "", Some(local(d(2024, 2, 1), 0, 0, 0))).unwrap();
        let feb_end = store.add("feb 29", "", Some(local(d(2024, 2, 29), 23, 59, 59))).unwrap();
        let march = store.add("mar 1", "", Some(local(d(2024, 3, 1), 0, 0, 1))).unwrap();
        let next_year = store.add("2025", "", Some(local(d(2025, 1, 1), 0, 0, 1))).unwrap();
        store.add("undated", "", None).unwrap();

        let feb: Vec<u64> = store
            .todos_for_month(2024, Month::February)
            .iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(feb, vec![feb_start, feb_end]);

        let year: Vec<u64> = store.todos_for_year(2024).iter().map(|t| t.id).collect();
        assert_eq!(year, vec![feb_start, feb_end, march]);

        let later: Vec<u64> = store.todos_for_year(2025).iter().map(|t| t.id).collect();
        assert_eq!(later, vec![next_year]);

        assert!(store.todos_for_year(i32::MAX).is_empty());
    }

    #[test]
    fn test_status_views() {
        let mut store = empty_store();
        let late = store.add("due yesterday", "", Some(now() - Duration::days(1))).unwrap();
        let on_time = store.add("due tomorrow", "", Some(now() + Duration::days(1))).unwrap();
        let done_late = store.add("done", "", Some(now() - Duration::days(3))).unwrap();
        let undated = store.add("undated", "", None).unwrap();
        let due_now = store.add("due now", "", Some(now())).unwrap();
        store.toggle_todo(done_late).unwrap();

        let ids = |todos: Vec<&Todo>| todos.iter().map(|t| t.id).collect::<Vec<_>>();
        assert_eq!(ids(store.late_todos()), vec![late]);
        assert_eq!(ids(store.on_time_todos()), vec![on_time]);
        assert_eq!(ids(store.completed_todos()), vec![done_late]);
        assert_eq!(ids(store.pending_todos()), vec![late, on_time, undated, due_now]);
    }

    #[test]
    fn test_views_follow_clock() {
        let mut store = empty_store();
        let id = store.add("deadline", "", Some(now() + Duration::hours(1))).unwrap();
        assert_eq!(store.on_time_todos().len(), 1);

        store.clock().advance(Duration::hours(2));
        assert!(store.on_time_todos().is_empty());
        assert_eq!(store.late_todos()[0].id, id);
    }

    #[test]
    fn test_summary() {
        let mut store = empty_store();
        store.add("late", "", Some(now() - Duration::days(1))).unwrap();
        store.add("on time", "", Some(now() + Duration::days(1))).unwrap();
        let done = store.add("done", "", None).unwrap();
        store.add("undated", "", None).unwrap();
        store.toggle_todo(done).unwrap();

        assert_eq!(
            store.summary(),
            StatusSummary {
                total: 4,
                completed: 1,
                pending: 3,
                on_time: 1,
                late: 1,
            }
        );
    }

    #[test]
    fn test_reload_roundtrip() {
        let mut store = empty_store();
        store.add("a", "body", Some(now() + Duration::milliseconds(1500))).unwrap();
        let b = store.add("b", "", None).unwrap();
        store.toggle_todo(b).unwrap();
        let original = store.todos().to_vec();

        let storage = store.storage().clone();
        let reloaded = TodoStore::load_with_clock(storage, KEY, FixedClock::new(now())).unwrap();
        assert_eq!(reloaded.todos(), original.as_slice());
        assert_eq!(reloaded.next_id(), Some(3));
    }

    #[test]
    fn test_reload_next_id_after_gaps() {
        let created = now();
        let todos: Vec<Todo> = [1, 2, 5]
            .into_iter()
            .map(|id| Todo::new(id, format!("todo {}", id), "", None, created))
            .collect();
        let mut storage = MemoryStore::new();
        write_todos(&mut storage, KEY, &todos).unwrap();

        let mut store = TodoStore::load_with_clock(storage, KEY, FixedClock::new(now())).unwrap();
        assert_eq!(store.next_id(), Some(6));
        assert_eq!(store.add("next", "", None).unwrap(), 6);
    }

    #[test]
    fn test_ids_exhausted_after_max_id() {
        let todos = vec![Todo::new(u64::MAX, "last", "", None, now())];
        let mut storage = MemoryStore::new();
        write_todos(&mut storage, KEY, &todos).unwrap();

        let mut store = TodoStore::load_with_clock(storage, KEY, FixedClock::new(now())).unwrap();
        assert_eq!(store.next_id(), None);
        assert_eq!(store.add("one more", "", None), Err(DomainError::IdsExhausted));
        assert_eq!(store.len(), 1);

        let stored = read_todos(store.storage(), KEY).unwrap().unwrap();
        assert_eq!(stored.len(), 1);
    }

    #[test]
    fn test_last_id_is_assigned_once() {
        let todos = vec![Todo::new(u64::MAX - 1, "almost", "", None, now())];
        let mut storage = MemoryStore::new();
        write_todos(&mut storage, KEY, &todos).unwrap();

        let mut store = TodoStore::load_with_clock(storage, KEY, FixedClock::new(now())).unwrap();
        assert_eq!(store.add("last", "", None).unwrap(), u64::MAX);
        assert_eq!(store.add("none left", "", None), Err(DomainError::IdsExhausted));
    }

    #[test]
    fn test_rejects_due_date_beyond_year_9999() {
        let mut store = empty_store();
        let far = Utc.with_ymd_and_hms(10000, 1, 1, 0, 0, 0).unwrap();
        assert!(matches!(store.add("far", "", Some(far)), Err(DomainError::InvalidInput(_))));

        let before_zero = Utc.with_ymd_and_hms(-1, 6, 1, 0, 0, 0).unwrap();
        assert!(matches!(
            store.add("ancient", "", Some(before_zero)),
            Err(DomainError::InvalidInput(_))
        ));

        assert!(store.is_empty());
        assert_eq!(store.next_id(), Some(1));
        assert_eq!(store.storage().get_item(KEY).unwrap(), None);
    }

    #[test]
    fn test_latest_storable_due_date_reloads() {
        let mut store = empty_store();
        let edge = Utc.with_ymd_and_hms(9999, 12, 31, 23, 59, 59).unwrap() + Duration::milliseconds(999);
        let id = store.add("edge", "", Some(edge)).unwrap();

        let storage = store.storage().clone();
        let reloaded = TodoStore::load_with_clock(storage, KEY, FixedClock::new(now())).unwrap();
        assert_eq!(reloaded.get_todo_by_id(id).unwrap().due_date, Some(edge));
    }

    #[test]
    fn test_missing_created_at_is_corrupt() {
        let raw = r#"[{"id":1,"title":"no stamp","dueDate":null,"completed":false}]"#;
        let result = TodoStore::load_with_clock(MemoryStore::with_item(KEY, raw), KEY, FixedClock::new(now()));
        assert!(matches!(result, Err(DomainError::CorruptStorage { .. })));
    }

    #[test]
    fn test_load_legacy_browser_payload() {
        let raw = r#"[
            {"id":1,"title":"Groceries","text":"milk","dueDate":"2024-06-14T18:30:00.000Z","completed":false,"createdAt":"2024-06-01T08:00:00.000Z"},
            {"id":4,"title":"Call mum","dueDate":null,"completed":true,"createdAt":"2024-06-02T08:00:00.000Z"}
        ]"#;
        let store =
            TodoStore::load_with_clock(MemoryStore::with_item(KEY, raw), KEY, FixedClock::new(now())).unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(store.next_id(), Some(5));
        assert_eq!(store.late_todos()[0].title, "Groceries");
        assert_eq!(store.completed_todos()[0].title, "Call mum");
    }

    #[test]
    fn test_load_corrupt_slot_fails_fast() {
        let storage = MemoryStore::with_item(KEY, "[{\"id\": \"oops\"}]");
        let result = TodoStore::load_with_clock(storage, KEY, FixedClock::new(now()));
        assert!(matches!(result, Err(DomainError::CorruptStorage { .. })));
    }

    #[test]
    fn test_failed_write_reverts_add() {
        let mut store = TodoStore::load_with_clock(FlakyStore::default(), KEY, FixedClock::new(now())).unwrap();
        store.add("kept", "", None).unwrap();

        store.storage.fail_writes = true;
        assert!(matches!(store.add("lost", "", None), Err(DomainError::Storage(_))));
        assert_eq!(store.len(), 1);

        store.storage.fail_writes = false;
        assert_eq!(store.add("after", "", None).unwrap(), 3);
    }

    #[test]
    fn test_failed_write_reverts_toggle() {
        let mut store = TodoStore::load_with_clock(FlakyStore::default(), KEY, FixedClock::new(now())).unwrap();
        let id = store.add("stay open", "", None).unwrap();

        store.storage.fail_writes = true;
        assert!(store.toggle_todo(id).is_err());
        assert!(!store.get_todo_by_id(id).unwrap().completed);
    }

    #[test]
    fn test_file_backed_store_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        let id = {
            let mut store = TodoStore::load(FileStore::open(dir.path()).unwrap(), KEY).unwrap();
            let id = store.add("on disk", "", Some(Utc::now() + Duration::days(1))).unwrap();
            store.toggle_todo(id).unwrap();
            id
        };

        let store = TodoStore::load(FileStore::open(dir.path()).unwrap(), KEY).unwrap();
        let todo = store.get_todo_by_id(id).unwrap();
        assert_eq!(todo.title, "on disk");
        assert!(todo.completed);
        assert_eq!(store.next_id(), Some(id + 1));
    }
}
