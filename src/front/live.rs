//! Server-Sent Events telling the open pages which collection changed

use futures::{StreamExt, future::ok, stream};
use ntex::{util::Bytes, web};
use tokio::sync::broadcast::error::RecvError;

use crate::front::{AppState, middleware};

const CONNECTED_FRAME: &[u8] = b": connected\n\n";

/// Stream of the changes of the active pet and of the user pet list.
/// Each event is named after the collection, e.g. `event: healthLogs`.
#[web::get("/live/events")]
async fn live_events(
    active_pet: middleware::logged_user::ActivePet,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let user_id = active_pet.user_id();
    let pet_id = active_pet.pet.id;
    let receiver = app_state.live_feed.subscribe();

    let changes = stream::unfold(receiver, move |mut receiver| async move {
        loop {
            match receiver.recv().await {
                Ok(change) if change.concerns(user_id, Some(pet_id)) => {
                    let frame = Bytes::from(change.to_sse_frame());
                    return Some((Ok::<_, web::Error>(frame), receiver));
                }
                Ok(_) => continue,
                Err(RecvError::Lagged(skipped)) => {
                    log::warn!("live feed of user {user_id} skipped {skipped} changes");
                    continue;
                }
                Err(RecvError::Closed) => return None,
            }
        }
    });

    let body = Box::pin(
        stream::once(ok::<_, web::Error>(Bytes::from_static(CONNECTED_FRAME))).chain(changes),
    );

    Ok(web::HttpResponse::Ok()
        .content_type("text/event-stream")
        .header("cache-control", "no-cache")
        .header("content-encoding", "identity")
        .streaming(body))
}
