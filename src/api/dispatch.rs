//! Executes the requests `update()` asks for.

use log::{debug, info};

use super::backend::ChatBackend;
use crate::core::action::{Action, Effect, Request, Settlement, update};
use crate::core::state::App;
use crate::core::surface::Surface;

/// Performs one request against the backend. Never fails: errors are part of
/// the returned settlement.
pub async fn perform(backend: &dyn ChatBackend, request: Request) -> Settlement {
    debug!("Performing {:?} via {}", request, backend.name());
    match request {
        Request::Connect => {
            let result = match backend.establish_session().await {
                Ok(()) => backend.health().await,
                Err(e) => Err(e),
            };
            Settlement::Connected(result)
        }
        Request::SendMessage(text) => Settlement::Chat(backend.send_message(&text).await),
        Request::History => Settlement::History(backend.load_history().await),
        Request::Analytics => Settlement::Analytics(backend.load_analytics().await),
    }
}

/// Applies `action` and awaits every request it spawns, in order.
///
/// For callers without an event loop (plain mode, tests). Returns the first
/// effect that is not a request: `Effect::None` or `Effect::Quit`.
pub async fn run_to_settlement(
    app: &mut App,
    surface: &mut dyn Surface,
    backend: &dyn ChatBackend,
    action: Action,
) -> Effect {
    let mut effect = update(app, action, surface);
    while let Effect::Spawn(request) = effect {
        let settlement = perform(backend, request).await;
        effect = update(app, Action::Settled(settlement), surface);
    }
    info!("Settled with {:?}", effect);
    effect
}
