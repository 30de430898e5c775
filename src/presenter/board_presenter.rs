use anyhow::Result;
use async_trait::async_trait;
use log::{debug, info};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::entity::TokenSnapshot;
use crate::interactor::{LoadOutcome, TokenInteractor};
use crate::presenter::token_form_presenter::TokenFormPresenter;
use crate::view::{BoardProjection, RowAction, TokenBoardView};

#[async_trait]
pub trait BoardPresenter: Send + Sync {
    /// Render the current list, recomputing the projection only if the list changed
    async fn show_board(&self) -> Result<()>;
    async fn handle_row_action(&self, action: RowAction) -> Result<()>;
    async fn edit_rank(&self, rank: i64) -> Result<()>;
    async fn refresh(&self) -> Result<()>;
    /// Re-render on every applied reload until the interactor goes away
    async fn watch_updates(&self) -> Result<()>;
}

pub struct BoardPresenterImpl<V> {
    interactor: Arc<dyn TokenInteractor>,
    form: Arc<dyn TokenFormPresenter>,
    view: Arc<V>,
    projection: Mutex<Option<Arc<BoardProjection>>>,
}

impl<V> BoardPresenterImpl<V>
where
    V: TokenBoardView,
{
    pub fn new(
        interactor: Arc<dyn TokenInteractor>,
        form: Arc<dyn TokenFormPresenter>,
        view: Arc<V>,
    ) -> Self {
        Self {
            interactor,
            form,
            view,
            projection: Mutex::new(None),
        }
    }

    // Memoized on the snapshot sequence
    async fn projection_for(&self, snapshot: &TokenSnapshot) -> Arc<BoardProjection> {
        let mut cached = self.projection.lock().await;
        match cached.as_ref() {
            Some(projection) if projection.sequence == snapshot.sequence => projection.clone(),
            _ => {
                debug!("Projecting {} tokens", snapshot.len());
                let projection = Arc::new(BoardProjection::from_snapshot(snapshot));
                *cached = Some(projection.clone());
                projection
            }
        }
    }

    pub async fn current_projection(&self) -> Arc<BoardProjection> {
        self.projection_for(&self.interactor.snapshot()).await
    }
}

#[async_trait]
impl<V> BoardPresenter for BoardPresenterImpl<V>
where
    V: TokenBoardView + Send + Sync,
{
    async fn show_board(&self) -> Result<()> {
        let projection = self.current_projection().await;
        self.view.display_board(&projection).await
    }

    async fn handle_row_action(&self, action: RowAction) -> Result<()> {
        match action {
            RowAction::Edit(record) => {
                info!("Editing token {} (rank {})", record.symbol, record.rank);
                self.form.select_for_edit(&record).await
            }
        }
    }

    async fn edit_rank(&self, rank: i64) -> Result<()> {
        let projection = self.current_projection().await;
        match projection.row_by_rank(rank) {
            Some(row) => self.handle_row_action(row.edit_action()).await,
            None => {
                self.view
                    .display_error(format!("No token with rank {}", rank))
                    .await
            }
        }
    }

    async fn refresh(&self) -> Result<()> {
        match self.interactor.load_all().await {
            Ok(LoadOutcome::Applied { .. }) => self.show_board().await,
            Ok(LoadOutcome::Superseded { .. }) => Ok(()),
            Err(e) => {
                self.view
                    .display_error(format!("Failed to refresh tokens: {}", e))
                    .await
            }
        }
    }

    async fn watch_updates(&self) -> Result<()> {
        let mut updates = self.interactor.subscribe();

        while updates.changed().await.is_ok() {
            let snapshot = updates.borrow_and_update().clone();
            let projection = self.projection_for(&snapshot).await;
            self.view.display_board(&projection).await?;
        }

        debug!("Token updates closed");
        Ok(())
    }
}
