//! Navigation-related controller methods (views, search, detail overlay, fetching)

use futures::future::join_all;
use tokio::task::JoinHandle;

use crate::model::{ActiveSection, Location, LoadRequest, Source, View};
use super::AppController;

impl AppController {
    /// Start whatever fetches the current view still needs.
    ///
    /// Results land in the model as each request completes; the handle
    /// resolves once all of them have.
    pub async fn load_current_view(&self, force: bool) -> JoinHandle<()> {
        let model = self.model.lock().await;
        let requests = model.pending_loads(force).await;
        let catalog = model.get_catalog();
        drop(model);

        let controller = self.clone();
        tokio::spawn(async move {
            let Some(catalog) = catalog else {
                tracing::warn!("No catalog client configured, skipping fetch");
                return;
            };
            if requests.is_empty() {
                return;
            }
            tracing::debug!(count = requests.len(), "Fetching view sources");
            join_all(requests.into_iter().map(|request| {
                let catalog = catalog.clone();
                let controller = controller.clone();
                async move {
                    let LoadRequest { source, generation, term } = request;
                    let result = match source {
                        Source::Feed(feed) => catalog.fetch_feed(feed).await,
                        Source::Search(kind) => {
                            catalog.search(kind, term.as_deref().unwrap_or_default()).await
                        }
                    };
                    controller.finish_load(source, generation, result).await;
                }
            }))
            .await;
        })
    }

    async fn finish_load(
        &self,
        source: Source,
        generation: u64,
        result: Result<crate::model::ResultSet, crate::model::CatalogError>,
    ) {
        let model = self.model.lock().await;
        match result {
            Ok(set) => {
                tracing::info!(%source, items = set.len(), "Source loaded");
                model.apply_fetch(source, generation, Ok(set)).await;
            }
            Err(e) => {
                tracing::error!(%source, error = %e, "Source failed to load");
                let message = Self::format_error(&e);
                if model.apply_fetch(source, generation, Err(message.clone())).await {
                    model.set_error(message).await;
                }
            }
        }
    }

    pub async fn switch_view(&self, view: View) -> JoinHandle<()> {
        let model = self.model.lock().await;
        let current = model.current_view().await;
        if current != view {
            let location = match view {
                View::Movies => Location::Movies { selection: None },
                View::Tv => Location::Tv { selection: None },
                View::Search => {
                    let term = model.get_ui_state().await.search_input;
                    Location::Search { term, selection: None }
                }
            };
            model.navigate(location).await;
        }
        drop(model);
        self.load_current_view(false).await
    }

    pub async fn perform_search(&self, term: &str) -> JoinHandle<()> {
        let term = term.trim().to_string();
        tracing::debug!(term, "Performing search");
        let model = self.model.lock().await;
        model
            .navigate(Location::Search { term, selection: None })
            .await;
        model.set_active_section(ActiveSection::Carousels).await;
        drop(model);
        self.load_current_view(false).await
    }

    /// Open the overlay for the highlighted card.
    pub async fn open_focused(&self) {
        let model = self.model.lock().await;
        if let Some(selection) = model.focused_selection().await {
            tracing::debug!(key = %selection.layout_key(), "Opening detail");
            model.open_detail(selection).await;
        }
    }

    /// Close the overlay if one is open, otherwise go back in history.
    pub async fn back(&self) -> Option<JoinHandle<()>> {
        let model = self.model.lock().await;
        if model.close_detail().await {
            return None;
        }
        if model.go_back().await {
            drop(model);
            return Some(self.load_current_view(false).await);
        }
        None
    }

    pub async fn retry(&self) -> JoinHandle<()> {
        tracing::info!("Reloading current view");
        self.load_current_view(true).await
    }
}
