//! Avatars and memory images, only readable by their owner

use futures::{future::ok, stream::once};
use ntex::{util::Bytes, web};

use crate::{
    front::{AppState, errors, session},
    models, services,
};

/// Whether `key` points inside the storage prefix of `user_id`
pub fn is_owned_key(key: &str, user_id: i64) -> bool {
    key.starts_with(&services::user_storage_prefix(user_id)) && !key.contains("..")
}

fn content_type_of(key: &str) -> String {
    let filename_extension = key
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default();

    models::Pic {
        body: Vec::new(),
        filename_extension,
    }
    .content_type()
}

#[web::get("/media/{key}*")]
async fn get_media(
    web_app_session: session::WebAppSession,
    app_state: web::types::State<AppState>,
    path: web::types::Path<(String,)>,
) -> Result<impl web::Responder, web::Error> {
    let key = path.into_inner().0;

    if !is_owned_key(&key, web_app_session.user.id) {
        return Err(errors::UserError::UrlNotFound.into());
    }

    let body = app_state.storage_service.get_file(&key).await.map_err(|e| {
        log::warn!("media {key} could not be read: {e}");
        errors::UserError::UrlNotFound
    })?;

    Ok(web::HttpResponse::Ok()
        .content_type(content_type_of(&key))
        .header("cache-control", "private, max-age=86400")
        .streaming(once(ok::<_, web::Error>(Bytes::from(body)))))
}
