use kanji_cloud::ObjectInfo;
use kanji_core::uploads::{public_url, size_kib};

use super::{csrf_field, escape};

pub const EMPTY_FILES_MESSAGE: &str = "No files found in the bucket.";

/// Card for one stored image, with a delete form.
pub fn file_card(bucket: &str, object: &ObjectInfo, csrf_token: &str) -> String {
    let url = escape(&public_url(bucket, &object.name));
    let name = escape(&object.name);
    format!(
        r##"<div class="file-card">
  <img src="{url}" alt="{name}">
  <p>Name: {name}</p>
  <p>Size: {size} KB</p>
  <p>Created: {created}</p>
  <form hx-post="/delete-file" hx-target="#files-list">
    {csrf}
    <input type="hidden" name="objectName" value="{name}">
    <button type="submit">Delete</button>
  </form>
</div>"##,
        size = size_kib(object.size),
        created = object.created.format("%Y-%m-%d"),
        csrf = csrf_field(csrf_token),
    )
}

/// Gallery of the given objects, or the empty-state message.
pub fn files_gallery(bucket: &str, objects: &[ObjectInfo], csrf_token: &str) -> String {
    let body = if objects.is_empty() {
        format!(r#"<div class="empty-state">{EMPTY_FILES_MESSAGE}</div>"#)
    } else {
        objects
            .iter()
            .map(|object| file_card(bucket, object, csrf_token))
            .collect::<Vec<_>>()
            .join("\n")
    };
    format!(
        "<div class=\"files\">\n<h3>Files in Bucket</h3>\n<div class=\"files-grid\">\n{body}\n</div>\n</div>"
    )
}

/// Fragment returned after a successful upload.
pub fn upload_success(url: &str, kanji_id: Option<&str>) -> String {
    let url = escape(url);
    let association = kanji_id
        .map(|id| format!("\n  <p>Associated with Kanji ID: {}</p>", escape(id)))
        .unwrap_or_default();
    format!(
        r#"<div class="upload-success">
  <p>File uploaded successfully!</p>{association}
  <img src="{url}" alt="Uploaded image">
  <p><a href="{url}" target="_blank">View full image</a></p>
  <input type="hidden" name="imageURL" value="{url}">
</div>"#
    )
}

/// Fragment returned after a delete, with a button to reload the gallery.
pub fn delete_success(csrf_token: &str) -> String {
    format!(
        r##"<div class="delete-success">
  <p>File deleted successfully!</p>
  <form hx-get="/list-files" hx-target="#files-list">
    {csrf}
    <button type="submit">Refresh File List</button>
  </form>
</div>"##,
        csrf = csrf_field(csrf_token),
    )
}
