//! Static image pass-through for `GET /catalogue/images/{file}`.
//!
//! Files are read through a `cap_std` directory handle, so lookups cannot
//! escape the configured image directory.

use std::io;
use std::path::Path;
use std::sync::Arc;

use actix_web::{HttpResponse, get, http::header::ContentType, mime, web};
use cap_std::{ambient_authority, fs::Dir};
use serde_json::json;
use tracing::warn;

use crate::domain::{Error, TraceId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Read-only handle on the image directory.
#[derive(Debug, Clone)]
pub struct ImageDir {
    dir: Arc<Dir>,
}

impl ImageDir {
    /// Open `path` as the image root.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let dir = Dir::open_ambient_dir(path, ambient_authority())?;
        Ok(Self { dir: Arc::new(dir) })
    }

    /// Read one image. Only plain file names are accepted.
    pub fn read(&self, name: &str) -> Result<Vec<u8>, Error> {
        if !is_plain_file_name(name) {
            return Err(image_not_found(name));
        }
        self.dir.read(name).map_err(|err| match err.kind() {
            io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied => image_not_found(name),
            _ => {
                warn!(error = %err, file = name, "failed to read catalogue image");
                Error::internal(format!("failed to read image: {err}"))
            }
        })
    }
}

fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty() && !name.starts_with('.') && !name.contains(['/', '\\'])
}

fn image_not_found(name: &str) -> Error {
    Error::not_found("image not found").with_details(json!({ "file": name }))
}

/// Content type derived from the file extension.
pub fn content_type_for(name: &str) -> ContentType {
    let extension = Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("jpg" | "jpeg") => ContentType::jpeg(),
        Some("png") => ContentType::png(),
        Some("gif") => ContentType(mime::IMAGE_GIF),
        Some("svg") => ContentType(mime::IMAGE_SVG),
        Some("webp") => ContentType("image/webp".parse().unwrap_or(mime::APPLICATION_OCTET_STREAM)),
        _ => ContentType::octet_stream(),
    }
}

/// Serve a catalogue image.
#[utoipa::path(
    get,
    path = "/catalogue/images/{file}",
    params(("file" = String, Path, description = "Image file name")),
    responses(
        (status = 200, description = "Image bytes", content_type = "application/octet-stream"),
        (status = 404, description = "No such image", body = Error),
    ),
    tags = ["catalogue"],
    operation_id = "getCatalogueImage"
)]
#[get("/catalogue/images/{file}")]
pub async fn get_image(
    state: web::Data<HttpState>,
    file: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let name = file.into_inner();
    let Some(images) = state.images.clone() else {
        return Err(image_not_found(&name));
    };
    let content_type = content_type_for(&name);
    // Task-locals stay on this task; reattach the trace id to blocking errors.
    let trace_id = TraceId::current();
    let bytes = web::block(move || images.read(&name))
        .await
        .map_err(|err| Error::internal(format!("image read task failed: {err}")))?
        .map_err(|err| match trace_id {
            Some(id) if err.trace_id().is_none() => err.with_trace_id(id.to_string()),
            _ => err,
        })?;
    Ok(HttpResponse::Ok().insert_header(content_type).body(bytes))
}
