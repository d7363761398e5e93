use std::path::Path;

use anyhow::Context;
use base64ct::{Base64, Encoding};

/// A local image file decoded into a self-contained embeddable form.
#[derive(Debug, Clone)]
pub struct AttachedImage {
    pub data_url: String,
    pub file_name: String,
}

/// Read a local image into a `data:<mime>;base64,...` URL. The payload is
/// treated as an opaque blob; no size or type validation is applied.
pub async fn read_as_data_url(path: &Path) -> anyhow::Result<AttachedImage> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("read image {}", path.display()))?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    let data_url = format!(
        "data:{};base64,{}",
        mime_for_path(path),
        Base64::encode_string(&bytes)
    );
    Ok(AttachedImage {
        data_url,
        file_name,
    })
}

fn mime_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());
    match ext.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("heic") => "image/heic",
        Some("gif") => "image/gif",
        _ => "application/octet-stream",
    }
}
