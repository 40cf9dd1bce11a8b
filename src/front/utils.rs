use std::{collections::HashMap, path::Path};

use anyhow::{anyhow, bail};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use futures::{Stream, StreamExt, TryStreamExt};
use serde_json::json;

use crate::{
    config, consts,
    front::{errors, forms, templates},
    models,
};

/// [ntext responder](ntex::web::HttpResponse) to redirect to `url`
pub fn redirect_to(url: &str) -> Result<ntex::web::HttpResponse, ntex::web::Error> {
    Ok(ntex::web::HttpResponse::Found()
        .header("location", url)
        .finish())
}

/// Full page navigation answered to an htmx request
pub fn hx_redirect_to(url: &str) -> Result<ntex::web::HttpResponse, ntex::web::Error> {
    Ok(ntex::web::HttpResponse::Ok()
        .header("HX-Redirect", url)
        .finish())
}

/// Full page out of `template_name`
pub fn render_page(
    template_name: &str,
    context: &tera::Context,
) -> Result<ntex::web::HttpResponse, ntex::web::Error> {
    let content = templates::WEB_TEMPLATES
        .render(template_name, context)
        .map_err(|e| {
            errors::ServerError::TemplateError(format!(
                "the template {template_name} couldnt be rendered: {e}"
            ))
        })?;

    Ok(ntex::web::HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(content))
}

/// htmx fragment out of `template_name`, a failure still renders an error widget
pub fn render_widget(
    template_name: &str,
    context: &tera::Context,
) -> Result<ntex::web::HttpResponse, ntex::web::Error> {
    let content = templates::WEB_TEMPLATES
        .render(template_name, context)
        .map_err(|e| {
            errors::ServerError::WidgetTemplateError(format!(
                "the widget {template_name} couldnt be rendered: {e}"
            ))
        })?;

    Ok(ntex::web::HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(content))
}

pub fn is_htmx_request(request_headers: &ntex::http::HeaderMap) -> bool {
    request_headers.contains_key("HX-Request")
}

/// `HX-Trigger` value raising a `showToast` event on the page
pub fn toast_trigger(title: &str, description: &str, is_error: bool) -> String {
    json!({
        "showToast": {
            "title": title,
            "description": description,
            "variant": if is_error { "destructive" } else { "default" },
        }
    })
    .to_string()
}

/// `HX-Trigger` value raising the collection event, so the widgets listening
/// to it re-fetch, plus a success toast
pub fn write_trigger(event: &str, title: &str, description: &str) -> String {
    json!({
        event: {},
        "closeModal": {},
        "showToast": {
            "title": title,
            "description": description,
            "variant": "default",
        }
    })
    .to_string()
}

pub fn get_header_str_value(headers: &ntex::http::HeaderMap, key: &str) -> String {
    headers
        .get(key)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

/// Value of a `content-disposition` parameter like `name` or `filename`
pub fn get_content_disposition_param(content_disposition: &str, param: &str) -> Option<String> {
    content_disposition
        .split(';')
        .filter_map(|section| section.trim().split_once('='))
        .find(|(key, _)| key.trim() == param)
        .map(|(_, value)| value.trim().trim_matches('"').to_string())
}

pub fn get_filename_extension(content_disposition: &str) -> anyhow::Result<String> {
    let filename = get_content_disposition_param(content_disposition, "filename").unwrap_or_default();

    if let Some(extension) = Path::new(&filename).extension().and_then(|ext| ext.to_str()) {
        return Ok(extension.trim().to_lowercase());
    }

    bail!("filename extension couldnt be found in the request content_disposition form")
}

/// Concats the bytes of a multipart field.
///
/// Fails on the first broken chunk, and as soon as more than `max_size`
/// bytes arrived, so an oversized upload is never buffered whole.
pub async fn read_field_bytes<S, E>(field: S, max_size: usize) -> anyhow::Result<Vec<u8>>
where
    S: Stream<Item = Result<ntex::util::Bytes, E>>,
    E: std::fmt::Display,
{
    let mut field = std::pin::pin!(field);
    let mut body = Vec::new();

    while let Some(chunk) = field.next().await {
        let chunk = chunk.map_err(|e| anyhow!("multipart field couldnt be read: {e}"))?;
        if body.len() + chunk.len() > max_size {
            bail!("multipart field is larger than {max_size} bytes");
        }
        body.extend_from_slice(&chunk);
    }

    Ok(body)
}

/// Utf8 value of a multipart field, decoded once all the chunks are joined
pub async fn read_field_text<S, E>(field: S, max_size: usize) -> anyhow::Result<String>
where
    S: Stream<Item = Result<ntex::util::Bytes, E>>,
    E: std::fmt::Display,
{
    let body = read_field_bytes(field, max_size).await?;

    String::from_utf8(body).map_err(|e| anyhow!("multipart field is not valid utf8: {e}"))
}

/// Text fields (sanitised) and the image of a multipart form
#[derive(Debug, Default)]
pub struct MultipartForm {
    pub fields: HashMap<String, String>,
    pub pic: Option<models::Pic>,
}

impl MultipartForm {
    pub fn field(&self, name: &str) -> String {
        self.fields.get(name).cloned().unwrap_or_default()
    }
}

/// Reads a multipart form holding text fields and at most one image in `pic_field`
pub async fn read_multipart_form(
    mut payload: ntex_multipart::Multipart,
    pic_field: &str,
) -> anyhow::Result<MultipartForm> {
    let mut form = MultipartForm::default();

    while let Some(field) = payload
        .try_next()
        .await
        .map_err(|e| anyhow!("multipart form couldnt be read: {e}"))?
    {
        let content_disposition = get_header_str_value(field.headers(), "content-disposition");
        let name = get_content_disposition_param(&content_disposition, "name").unwrap_or_default();

        if name == pic_field {
            if !field.content_type().essence_str().contains("image") {
                bail!("{pic_field} must be an image");
            }

            form.pic = Some(models::Pic {
                filename_extension: get_filename_extension(&content_disposition)?,
                body: read_field_bytes(field, consts::PIC_MAX_SIZE_BYTES).await?,
            });
            continue;
        }

        let value = read_field_text(field, consts::MULTIPART_TEXT_MAX_BYTES).await?;
        form.fields.insert(name, forms::clean_text(&value));
    }

    Ok(form)
}

pub fn extract_usertimezone(request_headers: &ntex::http::HeaderMap) -> anyhow::Result<Tz> {
    let user_timezone = request_headers
        .get("timezone")
        .map(|v| v.to_str().map(|tz| tz.parse::<Tz>()));

    if let Some(Ok(Ok(tz))) = user_timezone {
        return Ok(tz);
    }

    bail!("cant perse user time zone")
}

/// Current instant in the user time zone, the configured zone when the page did not send one
pub fn user_now(request_headers: &ntex::http::HeaderMap) -> DateTime<Tz> {
    let tz = extract_usertimezone(request_headers).unwrap_or_else(|_| {
        config::APP_CONFIG
            .get()
            .map(|app_config| app_config.fallback_timezone())
            .unwrap_or(chrono_tz::UTC)
    });

    Utc::now().with_timezone(&tz)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_disposition_params() {
        let content_disposition = r#"form-data; name="pic"; filename="Beach Day.JPG""#;

        assert_eq!(
            get_content_disposition_param(content_disposition, "name"),
            Some("pic".to_string())
        );
        assert_eq!(
            get_content_disposition_param(content_disposition, "filename"),
            Some("Beach Day.JPG".to_string())
        );
        assert_eq!(get_filename_extension(content_disposition).unwrap(), "jpg");

        assert!(get_filename_extension(r#"form-data; name="caption""#).is_err());
    }

    fn chunks(
        parts: Vec<Result<&'static [u8], &'static str>>,
    ) -> impl Stream<Item = Result<ntex::util::Bytes, &'static str>> {
        futures::stream::iter(
            parts
                .into_iter()
                .map(|part| part.map(ntex::util::Bytes::from_static)),
        )
    }

    #[ntex::test]
    async fn test_read_field_bytes_joins_chunks() {
        let body = read_field_bytes(chunks(vec![Ok(&b"\x89PNG"[..]), Ok(&b"\r\n"[..])]), 16)
            .await
            .unwrap();

        assert_eq!(body, b"\x89PNG\r\n");
    }

    #[ntex::test]
    async fn test_read_field_bytes_stops_past_limit() {
        let err = read_field_bytes(
            chunks(vec![Ok(&b"aaaa"[..]), Ok(&b"bbbb"[..]), Err("never polled")]),
            6,
        )
        .await
        .unwrap_err();

        assert!(err.to_string().contains("larger than 6 bytes"));
        assert!(read_field_bytes(chunks(vec![Ok(&b"aaa"[..]), Ok(&b"bbb"[..])]), 6)
            .await
            .is_ok());
    }

    #[ntex::test]
    async fn test_read_field_bytes_propagates_broken_chunk() {
        let err = read_field_bytes(chunks(vec![Ok(&b"abc"[..]), Err("connection reset")]), 64)
            .await
            .unwrap_err();

        assert!(err.to_string().contains("connection reset"));
    }

    #[ntex::test]
    async fn test_read_field_text_keeps_split_characters() {
        // "Día" with the two bytes of "í" in different chunks
        let text = read_field_text(chunks(vec![Ok(&b"D\xc3"[..]), Ok(&b"\xada"[..])]), 64)
            .await
            .unwrap();
        assert_eq!(text, "Día");

        assert!(read_field_text(chunks(vec![Ok(&b"\xc3"[..])]), 64).await.is_err());
    }

    #[test]
    fn test_extract_usertimezone() {
        let mut headers = ntex::http::HeaderMap::new();
        assert!(extract_usertimezone(&headers).is_err());

        headers.insert(
            ntex::http::header::HeaderName::from_static("timezone"),
            ntex::http::header::HeaderValue::from_static("America/Mexico_City"),
        );
        assert_eq!(
            extract_usertimezone(&headers).unwrap(),
            chrono_tz::America::Mexico_City
        );
        assert_eq!(user_now(&headers).timezone(), chrono_tz::America::Mexico_City);
    }

    #[test]
    fn test_write_trigger() {
        let trigger: serde_json::Value =
            serde_json::from_str(&write_trigger("activityLogs", "Success!", "Logged a 30 minute walk."))
                .unwrap();

        assert!(trigger.get("activityLogs").is_some());
        assert_eq!(trigger["showToast"]["description"], "Logged a 30 minute walk.");
        assert_eq!(trigger["showToast"]["variant"], "default");
    }

    #[test]
    fn test_toast_trigger_error_variant() {
        let trigger: serde_json::Value =
            serde_json::from_str(&toast_trigger("Error", "Failed to save event.", true)).unwrap();

        assert_eq!(trigger["showToast"]["variant"], "destructive");
    }
}
