use std::sync::Arc;

use chrono::NaiveDate;
use tempfile::TempDir;

use mindful::{
    encode, summarize, Direction, Emotion, EntryDraft, FileKvStore, FixedClock, JournalEntry,
    JournalError, JournalStore, KeyValueStore, Keyspace, MemoryKvStore, MonthAnchor, Mood,
};

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn store_for(kv: Arc<dyn KeyValueStore>, today: NaiveDate) -> JournalStore {
    JournalStore::with_parts(kv, Arc::new(FixedClock(today)), Keyspace::default())
}

fn draft(sentences: &[&str], mood: Option<Mood>, emotions: &[Emotion]) -> EntryDraft {
    EntryDraft::new(
        sentences.iter().map(|s| s.to_string()).collect(),
        mood,
        emotions.to_vec(),
    )
}

/// Writes an entry for an arbitrary day straight into storage.
async fn seed(kv: &dyn KeyValueStore, date: NaiveDate, mood: Mood) {
    let entry = JournalEntry::new(date, vec![format!("entry for {}", date)], mood, []);
    kv.set(&Keyspace::default().key_for(date), &encode(&entry).unwrap())
        .await
        .unwrap();
}

#[tokio::test]
async fn save_then_get_today_returns_filtered_entry() {
    let kv = Arc::new(MemoryKvStore::new());
    let store = store_for(kv, day(2024, 3, 15));

    let saved = store
        .save(draft(
            &["Coffee with Sam", "", "Finished the chapter"],
            Some(Mood::Happy),
            &[Emotion::Grateful, Emotion::Calm],
        ))
        .await
        .unwrap();

    let today = store.get_today().await.unwrap().unwrap();
    assert_eq!(today, saved);
    assert_eq!(today.sentences, vec!["Coffee with Sam", "Finished the chapter"]);
    assert_eq!(today.date, day(2024, 3, 15));
    assert_eq!(today.id, "2024-03-15");
}

#[tokio::test]
async fn get_today_is_none_before_first_save() {
    let store = store_for(Arc::new(MemoryKvStore::new()), day(2024, 3, 15));
    assert_eq!(store.get_today().await.unwrap(), None);
}

#[tokio::test]
async fn second_save_replaces_first() {
    let kv = Arc::new(MemoryKvStore::new());
    let store = store_for(kv.clone(), day(2024, 3, 15));

    store
        .save(draft(&["first"], Some(Mood::Sad), &[Emotion::Energetic]))
        .await
        .unwrap();
    let second = store
        .save(draft(&["second", "more"], Some(Mood::Neutral), &[]))
        .await
        .unwrap();

    assert_eq!(kv.len().await, 1);
    assert_eq!(store.get_today().await.unwrap(), Some(second));
}

#[tokio::test]
async fn saving_the_same_draft_twice_is_idempotent() {
    let kv = Arc::new(MemoryKvStore::new());
    let store = store_for(kv.clone(), day(2024, 3, 15));
    let d = draft(&["same"], Some(Mood::Happy), &[Emotion::Calm]);

    store.save(d.clone()).await.unwrap();
    let once = kv.get("journal_2024-03-15").await.unwrap();
    store.save(d).await.unwrap();
    let twice = kv.get("journal_2024-03-15").await.unwrap();

    assert_eq!(once, twice);
    assert_eq!(kv.len().await, 1);
}

#[tokio::test]
async fn invalid_draft_leaves_storage_untouched() {
    let kv = Arc::new(MemoryKvStore::new());
    kv.set("theme", "dark").await.unwrap();
    seed(&*kv, day(2024, 3, 15), Mood::Happy).await;
    let before = kv.get("journal_2024-03-15").await.unwrap();
    let store = store_for(kv.clone(), day(2024, 3, 15));

    let err = store
        .save(draft(&["", "   ", "\t"], None, &[]))
        .await
        .unwrap_err();
    assert!(matches!(err, JournalError::Validation { .. }));

    assert_eq!(kv.len().await, 2);
    assert_eq!(kv.get("journal_2024-03-15").await.unwrap(), before);
}

#[tokio::test]
async fn missing_mood_is_rejected() {
    let store = store_for(Arc::new(MemoryKvStore::new()), day(2024, 3, 15));
    let err = store.save(draft(&["words"], None, &[])).await.unwrap_err();
    assert!(matches!(err, JournalError::Validation { .. }));
    assert_eq!(store.get_today().await.unwrap(), None);
}

#[tokio::test]
async fn list_month_filters_and_sorts_descending() {
    let kv = Arc::new(MemoryKvStore::new());
    seed(&*kv, day(2024, 3, 2), Mood::Happy).await;
    seed(&*kv, day(2024, 3, 28), Mood::Sad).await;
    seed(&*kv, day(2024, 3, 15), Mood::Neutral).await;
    seed(&*kv, day(2024, 2, 29), Mood::Happy).await;
    seed(&*kv, day(2024, 4, 1), Mood::Happy).await;
    seed(&*kv, day(2023, 3, 10), Mood::Happy).await;
    let store = store_for(kv, day(2024, 3, 28));

    let march = MonthAnchor::new(2024, 3).unwrap();
    let entries = store.list_month(march).await.unwrap();

    let dates: Vec<NaiveDate> = entries.iter().map(|e| e.date).collect();
    assert_eq!(dates, vec![day(2024, 3, 28), day(2024, 3, 15), day(2024, 3, 2)]);
    assert!(entries.iter().all(|e| march.contains(e.date)));
    assert!(entries.windows(2).all(|w| w[0].date >= w[1].date));
}

#[tokio::test]
async fn list_month_skips_corrupt_and_foreign_values() {
    let kv = Arc::new(MemoryKvStore::new());
    seed(&*kv, day(2024, 5, 1), Mood::Happy).await;
    kv.set("journal_2024-05-02", "definitely not json").await.unwrap();
    kv.set("journal_settings", r#"{"reminder":"21:00"}"#).await.unwrap();
    kv.set("other_app_key", "value").await.unwrap();
    // valid record filed under the wrong day
    let stray = JournalEntry::new(day(2024, 5, 9), vec!["x".into()], Mood::Sad, []);
    kv.set("journal_2024-05-03", &encode(&stray).unwrap())
        .await
        .unwrap();

    let store = store_for(kv, day(2024, 5, 10));
    let entries = store
        .list_month(MonthAnchor::new(2024, 5).unwrap())
        .await
        .unwrap();

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].date, day(2024, 5, 1));
}

#[tokio::test]
async fn empty_month_is_empty() {
    let kv = Arc::new(MemoryKvStore::new());
    seed(&*kv, day(2024, 5, 1), Mood::Happy).await;
    let store = store_for(kv, day(2024, 5, 10));

    let june = MonthAnchor::new(2024, 6).unwrap();
    assert!(store.list_month(june).await.unwrap().is_empty());
}

#[tokio::test]
async fn clear_all_only_removes_journal_keys() {
    let kv = Arc::new(MemoryKvStore::new());
    seed(&*kv, day(2024, 1, 31), Mood::Happy).await;
    seed(&*kv, day(2024, 2, 1), Mood::Sad).await;
    kv.set("theme", "dark").await.unwrap();
    kv.set("journal_settings", "{}").await.unwrap();
    let store = store_for(kv.clone(), day(2024, 2, 1));

    assert_eq!(store.clear_all().await.unwrap(), 2);

    for anchor in [
        MonthAnchor::new(2024, 1).unwrap(),
        MonthAnchor::new(2024, 2).unwrap(),
    ] {
        assert!(store.list_month(anchor).await.unwrap().is_empty());
    }
    let mut remaining = kv.get_all_keys().await.unwrap();
    remaining.sort();
    assert_eq!(remaining, vec!["journal_settings", "theme"]);
}

#[tokio::test]
async fn list_all_is_oldest_first() {
    let kv = Arc::new(MemoryKvStore::new());
    seed(&*kv, day(2024, 6, 3), Mood::Happy).await;
    seed(&*kv, day(2023, 12, 25), Mood::Neutral).await;
    seed(&*kv, day(2024, 1, 1), Mood::Sad).await;
    let store = store_for(kv, day(2024, 6, 3));

    let dates: Vec<NaiveDate> = store
        .list_all()
        .await
        .unwrap()
        .into_iter()
        .map(|e| e.date)
        .collect();
    assert_eq!(dates, vec![day(2023, 12, 25), day(2024, 1, 1), day(2024, 6, 3)]);
}

#[tokio::test]
async fn month_listing_feeds_statistics() {
    let kv = Arc::new(MemoryKvStore::new());
    seed(&*kv, day(2024, 12, 1), Mood::Happy).await;
    seed(&*kv, day(2024, 12, 2), Mood::Sad).await;
    seed(&*kv, day(2024, 12, 3), Mood::Happy).await;
    seed(&*kv, day(2024, 12, 4), Mood::Neutral).await;
    seed(&*kv, day(2025, 1, 1), Mood::Sad).await;
    let store = store_for(kv, day(2025, 1, 1));

    let december = store.current_anchor().advance(Direction::Backward);
    assert_eq!(december, MonthAnchor::new(2024, 12).unwrap());

    let stats = summarize(&store.list_month(december).await.unwrap());
    let summary: Vec<(Mood, usize, u32)> = stats
        .iter()
        .map(|s| (s.mood, s.count, s.percentage))
        .collect();
    assert_eq!(
        summary,
        vec![(Mood::Happy, 2, 50), (Mood::Neutral, 1, 25), (Mood::Sad, 1, 25)]
    );
}

#[tokio::test]
async fn custom_keyspace_ignores_default_prefix() {
    let kv = Arc::new(MemoryKvStore::new());
    seed(&*kv, day(2024, 7, 1), Mood::Happy).await;
    let store = JournalStore::with_parts(
        kv.clone(),
        Arc::new(FixedClock(day(2024, 7, 2))),
        Keyspace::new("diary_"),
    );

    store
        .save(draft(&["new prefix"], Some(Mood::Neutral), &[]))
        .await
        .unwrap();
    let july = MonthAnchor::new(2024, 7).unwrap();
    let entries = store.list_month(july).await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].date, day(2024, 7, 2));

    assert_eq!(store.clear_all().await.unwrap(), 1);
    assert!(kv.get("journal_2024-07-01").await.unwrap().is_some());
}

#[tokio::test]
async fn file_store_backs_the_journal_across_reopen() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("journal");

    {
        let kv = Arc::new(FileKvStore::open(&dir).unwrap());
        kv.set("unrelated", "keep me").await.unwrap();
        let store = store_for(kv, day(2024, 3, 15));
        store
            .save(draft(&["persisted"], Some(Mood::Happy), &[Emotion::Grateful]))
            .await
            .unwrap();
    }

    let kv = Arc::new(FileKvStore::open(&dir).unwrap());
    let store = store_for(kv.clone(), day(2024, 3, 15));
    let today = store.get_today().await.unwrap().unwrap();
    assert_eq!(today.sentences, vec!["persisted"]);
    assert!(today.emotions.contains(&Emotion::Grateful));

    let march = store
        .list_month(MonthAnchor::new(2024, 3).unwrap())
        .await
        .unwrap();
    assert_eq!(march, vec![today]);

    assert_eq!(store.clear_all().await.unwrap(), 1);
    assert_eq!(kv.get_all_keys().await.unwrap(), vec!["unrelated".to_string()]);
}
