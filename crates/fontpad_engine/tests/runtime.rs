mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{catalog, MemoryFontSource, RecordingPresenter, INTER_JSON};
use fontpad_engine::persistence::{self, KeyValueStore, CONTENT_KEY};
use fontpad_engine::{AutosaveConfig, CatalogSource, EditorEvent, EditorRuntime, FontPadEditor, FontStyle, MemoryStore};
use tokio::sync::mpsc;

fn runtime(fonts: MemoryFontSource, autosave: AutosaveConfig) -> EditorRuntime {
    EditorRuntime::new(Arc::new(fonts), autosave)
}

/// Sends `events` with a pause after each one, then shuts the loop down.
fn drive(events: Vec<EditorEvent>, pause: Duration) -> mpsc::UnboundedReceiver<EditorEvent> {
    let (tx, rx) = mpsc::unbounded_channel();
    tokio::spawn(async move {
        for event in events {
            let _ = tx.send(event);
            tokio::time::sleep(pause).await;
        }
        tokio::time::sleep(Duration::from_millis(200)).await;
        let _ = tx.send(EditorEvent::Shutdown);
    });
    rx
}

#[tokio::test]
async fn test_selection_is_applied() {
    let catalog = catalog();
    let runtime = runtime(MemoryFontSource::for_catalog(&catalog), AutosaveConfig::default().with_interval(None));
    let mut editor = FontPadEditor::new(MemoryStore::new(), RecordingPresenter::default());

    let events = drive(
        vec![
            EditorEvent::FamilyChanged("Inter".into()),
            EditorEvent::WeightChanged("700".into()),
            EditorEvent::ItalicToggled,
        ],
        Duration::from_millis(20),
    );
    runtime.run_with_catalog(&mut editor, Some(catalog), events).await;

    assert_eq!(editor.presenter().applied_locators(), vec!["a.woff", "b.woff", "c.woff"]);
    let state = persistence::load(editor.store()).unwrap();
    assert_eq!(state.selection.family, "Inter");
    assert_eq!(state.selection.weight, "700");
    assert_eq!(state.selection.style, FontStyle::Italic);
}

#[tokio::test]
async fn test_late_superseded_load_is_not_applied() {
    let catalog = catalog();
    let fonts = MemoryFontSource::for_catalog(&catalog).with_delay("a.woff", Duration::from_millis(100));
    let runtime = runtime(fonts, AutosaveConfig::default().with_interval(None));
    let mut editor = FontPadEditor::new(MemoryStore::new(), RecordingPresenter::default());

    // "a.woff" is requested first but arrives after "b.woff"
    let events = drive(vec![EditorEvent::FamilyChanged("Inter".into()), EditorEvent::WeightChanged("700".into())], Duration::from_millis(5));
    runtime.run_with_catalog(&mut editor, Some(catalog), events).await;

    assert_eq!(editor.presenter().applied_locators(), vec!["b.woff"]);
    assert_eq!(editor.current_font().unwrap().locator, "b.woff");
}

#[tokio::test]
async fn test_missing_font_keeps_running() {
    let catalog = catalog();
    let runtime = runtime(MemoryFontSource::new(), AutosaveConfig::default().with_interval(None));
    let mut editor = FontPadEditor::new(MemoryStore::new(), RecordingPresenter::default());

    let events = drive(vec![EditorEvent::FamilyChanged("Inter".into()), EditorEvent::TextEdited("still here".into())], Duration::from_millis(10));
    runtime.run_with_catalog(&mut editor, Some(catalog), events).await;

    assert!(editor.presenter().applied.is_empty());
    assert_eq!(editor.content(), "still here");
}

/// Counts how often the editor flushed a snapshot.
#[derive(Default)]
struct CountingStore {
    inner: MemoryStore,
    flushes: usize,
}

impl KeyValueStore for CountingStore {
    fn get(&self, key: &str) -> Option<String> {
        self.inner.get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> fontpad_engine::Result<()> {
        self.inner.set(key, value)
    }

    fn flush(&mut self) -> fontpad_engine::Result<()> {
        self.flushes += 1;
        Ok(())
    }
}

#[tokio::test]
async fn test_autosave_runs_without_changes() {
    let runtime = runtime(MemoryFontSource::new(), AutosaveConfig::new(Duration::from_millis(20)));
    let mut editor = FontPadEditor::new(CountingStore::default(), RecordingPresenter::default());

    let (tx, rx) = mpsc::unbounded_channel();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(110)).await;
        let _ = tx.send(EditorEvent::Shutdown);
    });
    runtime.run_with_catalog(&mut editor, Some(catalog()), rx).await;

    // nothing was edited, the timer saved anyway (plus one save on shutdown)
    assert!(editor.store().flushes >= 3, "only {} saves", editor.store().flushes);
    assert!(editor.store().get(CONTENT_KEY).is_some());
}

#[tokio::test]
async fn test_failed_catalog_fetch_still_restores_text() {
    let mut store = MemoryStore::new();
    store.set(CONTENT_KEY, "draft").unwrap();
    let runtime = runtime(MemoryFontSource::new(), AutosaveConfig::default().with_interval(None));
    let mut editor = FontPadEditor::new(store, RecordingPresenter::default());

    let (tx, rx) = mpsc::unbounded_channel();
    tx.send(EditorEvent::Shutdown).unwrap();
    let source = CatalogSource::parse("/nonexistent/fontpad/fonts.json");
    runtime.run(&mut editor, &source, rx).await;

    assert!(editor.catalog().is_empty());
    assert_eq!(editor.presenter().text.as_deref(), Some("draft"));
}

#[tokio::test]
async fn test_closed_channel_ends_loop() {
    let runtime = runtime(MemoryFontSource::new(), AutosaveConfig::default());
    let mut editor = FontPadEditor::new(MemoryStore::new(), RecordingPresenter::default());

    let (tx, rx) = mpsc::unbounded_channel::<EditorEvent>();
    drop(tx);
    runtime.run_with_catalog(&mut editor, None, rx).await;
    // shutdown saves once
    assert!(persistence::load(editor.store()).is_some());
}

#[tokio::test]
async fn test_text_typed_during_catalog_load_keeps_stored_text() {
    let dir = std::env::temp_dir().join(format!("fontpad-runtime-{}", fastrand::u64(..)));
    std::fs::create_dir_all(&dir).unwrap();
    let catalog_file = dir.join("fonts.json");
    std::fs::write(&catalog_file, INTER_JSON).unwrap();

    let mut store = MemoryStore::new();
    store.set(CONTENT_KEY, "Hello from last session\n").unwrap();
    let presenter = RecordingPresenter::default();
    let surface = presenter.surface.clone();
    let runtime = runtime(MemoryFontSource::new(), AutosaveConfig::default().with_interval(None));
    let mut editor = FontPadEditor::new(store, presenter);

    // the input task runs once the loop awaits the catalog, like a line typed at startup
    let (tx, rx) = mpsc::unbounded_channel();
    tokio::spawn(async move {
        let text = format!("{}typed\n", surface.lock());
        let _ = tx.send(EditorEvent::TextEdited(text));
        let _ = tx.send(EditorEvent::Shutdown);
    });
    runtime.run(&mut editor, &CatalogSource::parse(&catalog_file.to_string_lossy()), rx).await;

    assert_eq!(editor.content(), "Hello from last session\ntyped\n");
    assert_eq!(editor.store().get(CONTENT_KEY).as_deref(), Some("Hello from last session\ntyped\n"));
    assert_eq!(editor.catalog().len(), 3);

    let _ = std::fs::remove_dir_all(&dir);
}
