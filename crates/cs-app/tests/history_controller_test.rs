//! History controller integration tests
//! 历史控制器集成测试

use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Condvar, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use cs_app::{CopyToClipboardError, HistoryController, HistoryDeps};
use cs_core::ports::*;
use cs_core::{
    ChangeSignature, ClipboardContent, ClipboardItem, ClipboardObservation, ImagePayload, ItemId,
    TimestampMs,
};
use tokio::sync::Notify;

// ---------------------------------------------------------------------------
// Fakes
// ---------------------------------------------------------------------------

#[derive(Default)]
struct FakeStore {
    initial: Vec<ClipboardItem>,
    fail_load: bool,
    calls: Mutex<Vec<String>>,
    last_saved: Mutex<Option<Vec<ClipboardItem>>>,
}

impl FakeStore {
    fn with_items(items: Vec<ClipboardItem>) -> Self {
        Self {
            initial: items,
            ..Self::default()
        }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn count(&self, prefix: &str) -> usize {
        self.calls().iter().filter(|c| c.starts_with(prefix)).count()
    }

    fn last_saved(&self) -> Option<Vec<ClipboardItem>> {
        self.last_saved.lock().unwrap().clone()
    }
}

#[async_trait]
impl HistoryStorePort for FakeStore {
    async fn save(&self, items: &[ClipboardItem]) -> Result<(), StorageError> {
        self.calls.lock().unwrap().push(format!("save:{}", items.len()));
        *self.last_saved.lock().unwrap() = Some(items.to_vec());
        Ok(())
    }

    async fn load(&self) -> Result<Vec<ClipboardItem>, StorageError> {
        if self.fail_load {
            return Err(StorageError::CorruptMetadata("truncated".into()));
        }
        Ok(self.initial.clone())
    }

    async fn delete_item(&self, item: &ClipboardItem) -> Result<(), StorageError> {
        self.calls.lock().unwrap().push(format!("delete:{}", item.id()));
        Ok(())
    }

    async fn clear_all(&self) -> Result<(), StorageError> {
        self.calls.lock().unwrap().push("clear_all".into());
        Ok(())
    }

    async fn usage(&self) -> Result<StorageUsage, StorageError> {
        Ok(StorageUsage {
            total_bytes: 0,
            quota_bytes: u64::MAX,
        })
    }
}

#[derive(Default)]
struct GateState {
    held: bool,
    parked: bool,
    released: bool,
    released_in_time: bool,
}

/// Parks signature reads on the calling thread until the test releases them.
#[derive(Default)]
struct ReadGate {
    state: Mutex<GateState>,
    changed: Condvar,
}

impl ReadGate {
    fn hold(&self) {
        self.state.lock().unwrap().held = true;
    }

    fn pass(&self) {
        let mut state = self.state.lock().unwrap();
        if !state.held {
            return;
        }
        state.parked = true;
        let (mut state, _) = self
            .changed
            .wait_timeout_while(state, Duration::from_secs(2), |s| !s.released)
            .unwrap();
        state.released_in_time = state.released;
        state.held = false;
    }

    fn is_parked(&self) -> bool {
        self.state.lock().unwrap().parked
    }

    fn release(&self) {
        self.state.lock().unwrap().released = true;
        self.changed.notify_all();
    }

    fn released_in_time(&self) -> bool {
        self.state.lock().unwrap().released_in_time
    }
}

/// Clipboard whose signature advances on every change, like the real one.
struct FakeClipboard {
    current: Mutex<(ChangeSignature, ClipboardObservation)>,
    reads: AtomicUsize,
    gate: ReadGate,
}

impl FakeClipboard {
    fn new() -> Self {
        Self {
            current: Mutex::new((ChangeSignature::new(1), ClipboardObservation::empty())),
            reads: AtomicUsize::new(0),
            gate: ReadGate::default(),
        }
    }

    fn copy(&self, observation: ClipboardObservation) {
        let mut current = self.current.lock().unwrap();
        current.0 = current.0.next();
        current.1 = observation;
    }

    fn copy_text(&self, text: &str) {
        self.copy(ClipboardObservation::from_text(text));
    }

    fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

impl ClipboardReaderPort for FakeClipboard {
    fn change_signature(&self) -> Result<ChangeSignature, ClipboardAccessError> {
        self.gate.pass();
        Ok(self.current.lock().unwrap().0)
    }

    fn read_observation(&self) -> Result<ClipboardObservation, ClipboardAccessError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        Ok(self.current.lock().unwrap().1.clone())
    }
}

impl ClipboardWriterPort for FakeClipboard {
    fn write_content(&self, content: &ClipboardContent) -> Result<(), ClipboardAccessError> {
        let observation = match content {
            ClipboardContent::Text(text) => ClipboardObservation::from_text(text.clone()),
            ClipboardContent::Url(url) => ClipboardObservation::from_text(url.as_str()),
            ClipboardContent::Image(payload) => match &payload.image {
                Some(bytes) => ClipboardObservation::from_image(bytes.clone()),
                None => return Err(ClipboardAccessError::Unsupported("no image".into())),
            },
            ClipboardContent::File(file) => ClipboardObservation::from_file(file.clone()),
        };
        self.copy(observation);
        Ok(())
    }
}

#[derive(Default)]
struct FakeWatcherControl {
    starts: AtomicUsize,
    stops: AtomicUsize,
    fail_start: bool,
}

#[async_trait]
impl WatcherControlPort for FakeWatcherControl {
    async fn start_watcher(&self) -> Result<(), WatcherControlError> {
        self.starts.fetch_add(1, Ordering::SeqCst);
        if self.fail_start {
            return Err(WatcherControlError::RuntimeGone);
        }
        Ok(())
    }

    async fn stop_watcher(&self) -> Result<(), WatcherControlError> {
        self.stops.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Thumbnailer that optionally waits for the test to release it.
#[derive(Default)]
struct FakeThumbnailer {
    gate: Option<Arc<Notify>>,
}

#[async_trait]
impl ThumbnailGeneratorPort for FakeThumbnailer {
    async fn generate_thumbnail(&self, _image_bytes: Bytes) -> anyhow::Result<GeneratedThumbnail> {
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        Ok(GeneratedThumbnail {
            bytes: Bytes::from_static(b"thumb"),
            width: 2,
            height: 1,
            original_width: 400,
            original_height: 200,
        })
    }
}

struct SteppingClock(AtomicI64);

impl ClockPort for SteppingClock {
    fn now(&self) -> TimestampMs {
        TimestampMs::from_epoch_millis(self.0.fetch_add(1, Ordering::SeqCst))
    }
}

struct StaticEntitlement(usize);

#[async_trait]
impl EntitlementPort for StaticEntitlement {
    async fn max_items(&self) -> usize {
        self.0
    }
}

// ---------------------------------------------------------------------------
// Harness
// ---------------------------------------------------------------------------

struct Harness {
    controller: HistoryController,
    store: Arc<FakeStore>,
    clipboard: Arc<FakeClipboard>,
    watcher: Arc<FakeWatcherControl>,
}

struct HarnessBuilder {
    store: FakeStore,
    capacity: usize,
    watcher: FakeWatcherControl,
    thumbnailer: FakeThumbnailer,
}

impl HarnessBuilder {
    fn new() -> Self {
        Self {
            store: FakeStore::default(),
            capacity: 20,
            watcher: FakeWatcherControl::default(),
            thumbnailer: FakeThumbnailer::default(),
        }
    }

    fn store(mut self, store: FakeStore) -> Self {
        self.store = store;
        self
    }

    fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    fn failing_watcher(mut self) -> Self {
        self.watcher.fail_start = true;
        self
    }

    fn gated_thumbnails(mut self, gate: Arc<Notify>) -> Self {
        self.thumbnailer.gate = Some(gate);
        self
    }

    fn build(self) -> Harness {
        let store = Arc::new(self.store);
        let clipboard = Arc::new(FakeClipboard::new());
        let watcher = Arc::new(self.watcher);
        let controller = HistoryController::new(HistoryDeps {
            store: store.clone(),
            clipboard_reader: clipboard.clone(),
            clipboard_writer: clipboard.clone(),
            watcher_control: watcher.clone(),
            thumbnails: Arc::new(self.thumbnailer),
            entitlement: Arc::new(StaticEntitlement(self.capacity)),
            clock: Arc::new(SteppingClock(AtomicI64::new(1_000))),
        });
        Harness {
            controller,
            store,
            clipboard,
            watcher,
        }
    }

    async fn loaded(self) -> Harness {
        let harness = self.build();
        harness.controller.load().await.unwrap();
        harness
    }
}

fn text(id: &str, body: &str, ms: i64) -> ClipboardItem {
    ClipboardItem::restore(
        ItemId::from(id),
        TimestampMs::from_epoch_millis(ms),
        ClipboardContent::Text(body.to_string()),
        false,
    )
}

fn ids(items: &[ClipboardItem]) -> Vec<String> {
    items.iter().map(|i| i.id().to_string()).collect()
}

fn bodies(items: &[ClipboardItem]) -> Vec<String> {
    items.iter().map(|i| i.display_text()).collect()
}

async fn add_abcd(controller: &HistoryController) {
    for (n, id) in ["a", "b", "c", "d"].iter().enumerate() {
        controller.add_item(text(id, id, n as i64 + 1)).await;
    }
}

// ---------------------------------------------------------------------------
// List operations
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_adding_beyond_capacity_evicts_oldest_and_its_blobs() {
    let h = HarnessBuilder::new().capacity(3).loaded().await;

    add_abcd(&h.controller).await;
    h.controller.flush().await;

    assert_eq!(ids(&h.controller.items()), ["d", "c", "b"]);
    assert_eq!(h.store.count("delete:"), 1);
    assert!(h.store.calls().contains(&"delete:a".to_string()));
    assert_eq!(ids(&h.store.last_saved().unwrap()), ["d", "c", "b"]);
}

#[tokio::test]
async fn test_favorite_moves_item_to_front_and_is_saved() {
    let h = HarnessBuilder::new().capacity(3).loaded().await;
    add_abcd(&h.controller).await;

    h.controller.toggle_favorite(&ItemId::from("b")).await;
    h.controller.flush().await;

    let items = h.controller.items();
    assert_eq!(ids(&items), ["b", "d", "c"]);
    assert!(items[0].is_favorite());
    assert_eq!(ids(&h.store.last_saved().unwrap()), ["b", "d", "c"]);
}

#[tokio::test]
async fn test_toggle_unknown_id_changes_nothing() {
    let h = HarnessBuilder::new().loaded().await;
    h.controller.add_item(text("a", "a", 1)).await;
    h.controller.flush().await;
    let saves_before = h.store.count("save:");

    h.controller.toggle_favorite(&ItemId::from("missing")).await;
    h.controller.flush().await;

    assert_eq!(h.store.count("save:"), saves_before);
}

#[tokio::test]
async fn test_remove_at_deletes_exactly_one_item() {
    let h = HarnessBuilder::new().capacity(3).loaded().await;
    add_abcd(&h.controller).await;
    h.controller.flush().await;
    let deletes_before = h.store.count("delete:");

    h.controller.remove_at(vec![1]).await;
    h.controller.flush().await;

    assert_eq!(ids(&h.controller.items()), ["d", "b"]);
    assert_eq!(h.store.count("delete:"), deletes_before + 1);
    assert_eq!(h.store.calls().last().unwrap(), "save:2");
}

#[tokio::test]
async fn test_remove_item_by_id() {
    let h = HarnessBuilder::new().loaded().await;
    add_abcd(&h.controller).await;

    h.controller.remove_item(&ItemId::from("c")).await;

    assert_eq!(ids(&h.controller.items()), ["d", "b", "a"]);
}

#[tokio::test]
async fn test_search_filters_visible_items_only() {
    let h = HarnessBuilder::new().loaded().await;
    h.controller.add_item(text("1", "Green Apple", 1)).await;
    h.controller.add_item(text("2", "banana", 2)).await;
    h.controller.add_item(text("3", "apple pie", 3)).await;

    h.controller.update_search_text("apple").await;

    assert_eq!(ids(&h.controller.visible_items()), ["3", "1"]);
    assert_eq!(h.controller.items().len(), 3);

    h.controller.update_search_text("").await;
    assert_eq!(h.controller.visible_items().len(), 3);
}

#[tokio::test]
async fn test_clear_all_twice_is_harmless() {
    let h = HarnessBuilder::new().loaded().await;
    add_abcd(&h.controller).await;

    h.controller.clear_all().await;
    h.controller.clear_all().await;
    h.controller.flush().await;

    assert!(h.controller.items().is_empty());
    assert_eq!(h.store.count("clear_all"), 2);
    assert_eq!(h.store.calls().last().unwrap(), "save:0");
}

// ---------------------------------------------------------------------------
// Loading and capacity
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_load_sorts_and_trims_to_capacity() {
    let mut favorite = text("fav", "fav", 1);
    favorite = ClipboardItem::restore(
        favorite.id().clone(),
        favorite.timestamp(),
        favorite.content().clone(),
        true,
    );
    let store = FakeStore::with_items(vec![
        text("old", "old", 2),
        favorite,
        text("new", "new", 3),
    ]);
    let h = HarnessBuilder::new().store(store).capacity(2).loaded().await;
    h.controller.flush().await;

    assert_eq!(ids(&h.controller.items()), ["fav", "new"]);
    assert!(h.store.calls().contains(&"delete:old".to_string()));
    assert_eq!(h.controller.snapshot().capacity, 2);
}

#[tokio::test]
async fn test_load_failure_is_reported() {
    let store = FakeStore {
        fail_load: true,
        ..FakeStore::default()
    };
    let h = HarnessBuilder::new().store(store).build();

    assert!(matches!(
        h.controller.load().await,
        Err(StorageError::CorruptMetadata(_))
    ));
    assert!(h.controller.items().is_empty());
}

// ---------------------------------------------------------------------------
// Monitoring
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_clipboard_change_is_captured_once_per_signature() {
    let h = HarnessBuilder::new().loaded().await;
    h.controller.start_monitoring().await;

    h.clipboard.copy_text("hello");
    h.controller.on_clipboard_changed().await.unwrap();
    h.controller.on_clipboard_changed().await.unwrap();

    assert_eq!(bodies(&h.controller.items()), ["hello"]);

    h.clipboard.copy_text("world");
    h.controller.on_clipboard_changed().await.unwrap();

    let items = h.controller.items();
    assert_eq!(bodies(&items), ["world", "hello"]);
    assert!(items[0].timestamp() > items[1].timestamp());
}

#[tokio::test]
async fn test_url_text_is_captured_as_url() {
    let h = HarnessBuilder::new().loaded().await;
    h.controller.start_monitoring().await;

    h.clipboard.copy_text("https://example.com/a");
    h.controller.on_clipboard_changed().await.unwrap();

    assert!(matches!(
        h.controller.items()[0].content(),
        ClipboardContent::Url(_)
    ));
}

#[tokio::test]
async fn test_url_is_pasted_back_as_copied() {
    let h = HarnessBuilder::new().loaded().await;
    h.controller.start_monitoring().await;

    h.clipboard.copy_text("https://Example.COM");
    h.controller.on_clipboard_changed().await.unwrap();
    let id = h.controller.items()[0].id().clone();
    h.clipboard.copy_text("something else");

    h.controller.paste_item(&id).await.unwrap();

    let pasted = h.clipboard.current.lock().unwrap().1.clone();
    assert_eq!(pasted.text.as_deref(), Some("https://Example.COM"));
    assert_eq!(bodies(&h.controller.items()), ["https://Example.COM"]);
}

#[tokio::test]
async fn test_clipboard_reads_run_off_the_async_runtime() {
    let h = HarnessBuilder::new().loaded().await;
    h.controller.start_monitoring().await;
    h.clipboard.copy_text("slow");
    h.clipboard.gate.hold();

    let controller = h.controller.clone();
    let signal = tokio::spawn(async move { controller.on_clipboard_changed().await });

    // Single-threaded runtime: timers only fire if the parked read is elsewhere.
    tokio::time::timeout(Duration::from_secs(1), async {
        while !h.clipboard.gate.is_parked() {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .unwrap();
    h.clipboard.gate.release();

    signal.await.unwrap().unwrap();
    assert!(h.clipboard.gate.released_in_time());
    assert_eq!(bodies(&h.controller.items()), ["slow"]);
}

#[tokio::test]
async fn test_restart_does_not_duplicate_newest_item() {
    let store = FakeStore::with_items(vec![text("seed", "hello", 5)]);
    let h = HarnessBuilder::new().store(store).loaded().await;
    h.clipboard.copy_text("hello");

    h.controller.start_monitoring().await;
    h.controller.on_clipboard_changed().await.unwrap();
    assert_eq!(ids(&h.controller.items()), ["seed"]);

    h.clipboard.copy_text("next");
    h.controller.on_clipboard_changed().await.unwrap();
    assert_eq!(bodies(&h.controller.items()), ["next", "hello"]);
}

#[tokio::test]
async fn test_signals_are_ignored_while_stopped() {
    let h = HarnessBuilder::new().loaded().await;
    h.clipboard.copy_text("hello");

    h.controller.on_clipboard_changed().await.unwrap();

    assert!(h.controller.items().is_empty());
    assert_eq!(h.clipboard.reads(), 0);
}

#[tokio::test]
async fn test_inactive_host_needs_background_opt_in() {
    let h = HarnessBuilder::new().loaded().await;
    h.controller.start_monitoring().await;
    h.controller.set_host_active(false).await;

    h.clipboard.copy_text("hidden");
    h.controller.on_clipboard_changed().await.unwrap();
    assert!(h.controller.items().is_empty());

    h.controller.set_background_monitoring(true).await;
    h.controller.on_clipboard_changed().await.unwrap();
    assert_eq!(bodies(&h.controller.items()), ["hidden"]);
}

#[tokio::test]
async fn test_start_and_stop_are_idempotent() {
    let h = HarnessBuilder::new().loaded().await;

    h.controller.start_monitoring().await;
    h.controller.start_monitoring().await;
    assert!(h.controller.snapshot().is_monitoring);

    h.controller.stop_monitoring().await;
    h.controller.stop_monitoring().await;
    assert!(!h.controller.snapshot().is_monitoring);

    assert_eq!(h.watcher.starts.load(Ordering::SeqCst), 1);
    assert_eq!(h.watcher.stops.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_failed_watcher_start_leaves_monitoring_stopped() {
    let h = HarnessBuilder::new().failing_watcher().loaded().await;

    h.controller.start_monitoring().await;

    assert!(!h.controller.snapshot().is_monitoring);
    h.clipboard.copy_text("ignored");
    h.controller.on_clipboard_changed().await.unwrap();
    assert!(h.controller.items().is_empty());
}

// ---------------------------------------------------------------------------
// Paste and thumbnails
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_paste_is_not_captured_again() {
    let h = HarnessBuilder::new().loaded().await;
    h.controller.start_monitoring().await;
    h.clipboard.copy_text("first");
    h.controller.on_clipboard_changed().await.unwrap();
    h.clipboard.copy_text("second");
    h.controller.on_clipboard_changed().await.unwrap();
    let first = h.controller.items()[1].id().clone();

    h.controller.paste_item(&first).await.unwrap();
    h.controller.on_clipboard_changed().await.unwrap();

    assert_eq!(bodies(&h.controller.items()), ["second", "first"]);
}

#[tokio::test]
async fn test_paste_unknown_item_fails() {
    let h = HarnessBuilder::new().loaded().await;

    let err = h
        .controller
        .paste_item(&ItemId::from("nope"))
        .await
        .unwrap_err();

    assert!(matches!(err, CopyToClipboardError::NotFound(id) if id.as_str() == "nope"));
}

#[tokio::test]
async fn test_captured_image_gets_thumbnail_later() {
    let h = HarnessBuilder::new().loaded().await;
    h.controller.start_monitoring().await;

    h.clipboard
        .copy(ClipboardObservation::from_image(Bytes::from_static(b"png")));
    h.controller.on_clipboard_changed().await.unwrap();
    h.controller.flush().await;

    let items = h.controller.items();
    match items[0].content() {
        ClipboardContent::Image(ImagePayload { image, thumbnail }) => {
            assert_eq!(image.as_deref(), Some(&b"png"[..]));
            assert_eq!(thumbnail.as_deref(), Some(&b"thumb"[..]));
        }
        other => panic!("expected image, got {other:?}"),
    }
    let saved = h.store.last_saved().unwrap();
    assert!(saved[0].pending_thumbnail_source().is_none());
}

#[tokio::test]
async fn test_thumbnail_for_removed_item_is_dropped() {
    let gate = Arc::new(Notify::new());
    let h = HarnessBuilder::new()
        .gated_thumbnails(gate.clone())
        .loaded()
        .await;
    let image = ClipboardItem::new(
        ClipboardContent::Image(ImagePayload::new(Bytes::from_static(b"png"))),
        TimestampMs::from_epoch_millis(1),
    );
    let id = image.id().clone();
    h.controller.add_item(image).await;

    h.controller.remove_item(&id).await;
    gate.notify_one();
    h.controller.flush().await;

    assert!(h.controller.items().is_empty());
    assert_eq!(h.store.calls().last().unwrap(), "save:0");
}

#[tokio::test]
async fn test_subscribers_see_changes() {
    let h = HarnessBuilder::new().loaded().await;
    let mut rx = h.controller.subscribe();

    h.controller.add_item(text("a", "a", 1)).await;

    assert!(rx.has_changed().unwrap());
    assert_eq!(ids(&rx.borrow_and_update().items), ["a"]);

    h.controller.toggle_favorite(&ItemId::from("missing")).await;
    assert!(!rx.has_changed().unwrap());
}
