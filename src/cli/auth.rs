use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{spotify, types::PendingLogin};

pub async fn auth(shared_state: Arc<Mutex<Option<PendingLogin>>>) {
    spotify::auth::auth(shared_state).await;
}
