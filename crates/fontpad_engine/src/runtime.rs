//! The single-threaded event loop driving a [`FontPadEditor`].
//!
//! All handlers run on one task: inbound control events, finished font loads and the
//! autosave timer are serialized through `tokio::select!`, so the editor needs no locking.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::time::Interval;

use crate::autosave::AutosaveConfig;
use crate::editor::{EditorEvent, FontPadEditor, FontRequest};
use crate::loader::{load_font, FontSource, LoadedFont};
use crate::persistence::KeyValueStore;
use crate::presenter::Presenter;
use crate::{CatalogSource, FontCatalog, Result};

type LoadOutcome = (FontRequest, Result<LoadedFont>);

pub struct EditorRuntime {
    fonts: Arc<dyn FontSource>,
    autosave: AutosaveConfig,
}

impl EditorRuntime {
    pub fn new(fonts: Arc<dyn FontSource>, autosave: AutosaveConfig) -> Self {
        Self { fonts, autosave }
    }

    /// Fetches the catalog, then runs the editor until `Shutdown` arrives or all senders are gone.
    ///
    /// The stored text is restored before the fetch starts, so input typed while the catalog
    /// is loading builds on it. A failed catalog fetch is logged; the editor keeps running
    /// with an empty catalog.
    pub async fn run<S, P>(&self, editor: &mut FontPadEditor<S, P>, source: &CatalogSource, events: mpsc::UnboundedReceiver<EditorEvent>)
    where
        S: KeyValueStore,
        P: Presenter,
    {
        editor.restore();
        let catalog = match FontCatalog::fetch(source).await {
            Ok(catalog) => Some(catalog),
            Err(err) => {
                log::error!("Error loading font data: {err}");
                None
            }
        };
        self.run_with_catalog(editor, catalog, events).await;
    }

    /// Like [`run`](Self::run) with an already loaded catalog.
    pub async fn run_with_catalog<S, P>(&self, editor: &mut FontPadEditor<S, P>, catalog: Option<FontCatalog>, mut events: mpsc::UnboundedReceiver<EditorEvent>)
    where
        S: KeyValueStore,
        P: Presenter,
    {
        let (loaded_tx, mut loaded_rx) = mpsc::unbounded_channel::<LoadOutcome>();

        editor.restore();
        if let Some(catalog) = catalog {
            if let Some(request) = editor.catalog_loaded(catalog) {
                self.spawn_load(request, &loaded_tx);
            }
        }

        let mut timer = self.autosave.timer();
        loop {
            tokio::select! {
                event = events.recv() => {
                    match event {
                        Some(EditorEvent::Shutdown) | None => break,
                        Some(event) => {
                            if let Some(request) = editor.handle(event) {
                                self.spawn_load(request, &loaded_tx);
                            }
                        }
                    }
                }

                Some((request, outcome)) = loaded_rx.recv() => {
                    editor.font_loaded(request, outcome);
                }

                _ = tick(&mut timer) => {
                    editor.autosave_tick();
                }
            }
        }

        log::info!("Editor shutting down");
        editor.save();
    }

    fn spawn_load(&self, request: FontRequest, loaded_tx: &mpsc::UnboundedSender<LoadOutcome>) {
        log::debug!("Loading font {} from {}", request.id, request.locator());
        let fonts = self.fonts.clone();
        let loaded_tx = loaded_tx.clone();
        tokio::spawn(async move {
            let outcome = load_font(fonts.as_ref(), request.locator()).await;
            // the loop is gone on shutdown; nothing left to apply to
            let _ = loaded_tx.send((request, outcome));
        });
    }
}

async fn tick(timer: &mut Option<Interval>) {
    match timer {
        Some(timer) => {
            timer.tick().await;
        }
        None => std::future::pending().await,
    }
}
