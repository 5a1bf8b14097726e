//! # Transfer Commands
//!
//! Moving the configuration in and out: JSON files, dropped files, the
//! share link and the CSS variable block.
//!
//! ## Import
//! ```text
//! file / dropped file (mime contains "json") / pasted text
//!      │
//!      ▼
//! codec::from_file_text ──── not JSON ───► toast "Invalid JSON" (2.6 s)
//!      │
//!      ▼
//! validate ──► store.change(|_| imported) ──► toast "Imported configuration"
//!                  (one undo step)
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use atelier_core::{codec, style, validation, EXPORT_FILE_NAME};
use tracing::{debug, warn};

use crate::clipboard::Clipboard;
use crate::commands::config::{commit, ConfigResponse};
use crate::error::{ApiError, ApiResult};
use crate::state::{ConfigState, DbState, ToastState, UrlState, ERROR_TOAST_MS};

pub const READ_FAILED: &str = "Could not read file";
pub const EXPORT_FAILED: &str = "Export failed";

/// Imports configuration JSON from text.
///
/// Whatever the JSON contains is repaired by the validator; only text that
/// is not JSON at all is rejected.
///
/// ## Errors
/// * `InvalidFormat` - `text` is not JSON (the user sees "Invalid JSON")
pub async fn import_text(
    db: &DbState,
    config: &ConfigState,
    url: &UrlState,
    toasts: &ToastState,
    text: &str,
) -> ApiResult<ConfigResponse> {
    debug!(bytes = text.len(), "import_text command");

    let raw = match codec::from_file_text(text) {
        Ok(raw) => raw,
        Err(e) => {
            toasts.push_for("Invalid JSON", Duration::from_millis(ERROR_TOAST_MS));
            return Err(e.into());
        }
    };
    let imported = validation::validate(&raw);

    let response = config.with_store_mut(|store| {
        store.change(|_| imported);
        ConfigResponse::from(&*store)
    });

    commit(db, url, toasts, &response.config).await;
    toasts.push("Imported configuration");
    Ok(response)
}

/// Imports a file the user picked. Any file is accepted; its bytes are
/// read as text (invalid UTF-8 is replaced) and imported.
///
/// ## Errors
/// * `IoError` - the file could not be read (the user sees "Could not read file")
/// * `InvalidFormat` - the file is not JSON
pub async fn import_file(
    db: &DbState,
    config: &ConfigState,
    url: &UrlState,
    toasts: &ToastState,
    path: &Path,
) -> ApiResult<ConfigResponse> {
    debug!(path = %path.display(), "import_file command");

    let bytes = tokio::fs::read(path).await.map_err(|e| {
        warn!(path = %path.display(), error = %e, "Could not read import file");
        toasts.push_for(READ_FAILED, Duration::from_millis(ERROR_TOAST_MS));
        ApiError::io(path, &e)
    })?;
    let text = String::from_utf8_lossy(&bytes);

    import_text(db, config, url, toasts, &text).await
}

/// Imports a dropped file, but only when its MIME type mentions JSON.
///
/// ## Returns
/// * `Ok(None)` - the drop was ignored
/// * `Ok(Some(response))` - the file was imported
pub async fn import_dropped(
    db: &DbState,
    config: &ConfigState,
    url: &UrlState,
    toasts: &ToastState,
    mime: &str,
    path: &Path,
) -> ApiResult<Option<ConfigResponse>> {
    debug!(mime = %mime, path = %path.display(), "import_dropped command");

    if !mime.contains("json") {
        debug!(mime = %mime, "Ignoring non-JSON drop");
        return Ok(None);
    }
    import_file(db, config, url, toasts, path).await.map(Some)
}

/// Writes the configuration to `<export_dir>/ui-config.json`, pretty
/// printed with two-space indentation.
///
/// ## Errors
/// * `IoError` - the file could not be written (the user sees "Export failed")
pub async fn export_config(
    config: &ConfigState,
    toasts: &ToastState,
    export_dir: &Path,
) -> ApiResult<PathBuf> {
    let path = export_dir.join(EXPORT_FILE_NAME);
    debug!(path = %path.display(), "export_config command");

    let text = codec::to_file_text(&config.current());
    tokio::fs::write(&path, text).await.map_err(|e| {
        warn!(path = %path.display(), error = %e, "Could not write export file");
        toasts.push_for(EXPORT_FAILED, Duration::from_millis(ERROR_TOAST_MS));
        ApiError::io(&path, &e)
    })?;

    toasts.push(format!("Exported {EXPORT_FILE_NAME}"));
    Ok(path)
}

/// Copies the page URL (with the current fragment) to the clipboard.
///
/// The fragment is whatever the debounced writer last wrote, so an edit
/// made within the quiet period is not in the link yet.
///
/// ## Errors
/// * `ClipboardError` - the user sees "Could not copy URL"
pub async fn copy_share_url(
    url: &UrlState,
    clipboard: &dyn Clipboard,
    toasts: &ToastState,
) -> ApiResult<String> {
    let href = url.href();
    debug!(href = %href, "copy_share_url command");

    match clipboard.write_text(&href).await {
        Ok(()) => {
            toasts.push("Share URL copied");
            Ok(href)
        }
        Err(e) => {
            warn!(error = %e, "Share URL copy failed");
            toasts.push("Could not copy URL");
            Err(e.into())
        }
    }
}

/// Copies the `:root{ ... }` CSS custom property block to the clipboard.
///
/// ## Errors
/// * `ClipboardError` - the user sees "Copy failed"
pub async fn copy_css_vars(
    config: &ConfigState,
    clipboard: &dyn Clipboard,
    toasts: &ToastState,
) -> ApiResult<String> {
    debug!("copy_css_vars command");
    let css = style::css_variables_block(&config.current());

    match clipboard.write_text(&css).await {
        Ok(()) => {
            toasts.push("CSS variables copied");
            Ok(css)
        }
        Err(e) => {
            warn!(error = %e, "CSS variable copy failed");
            toasts.push("Copy failed");
            Err(e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::MemoryClipboard;
    use crate::commands::test_support::Harness;
    use crate::error::ErrorCode;
    use atelier_core::Configuration;

    fn messages(toasts: &ToastState) -> Vec<String> {
        toasts.active().into_iter().map(|t| t.message).collect()
    }

    async fn import(h: &Harness, text: &str) -> ApiResult<ConfigResponse> {
        import_text(&h.db, &h.config, &h.url, &h.toasts, text).await
    }

    #[tokio::test]
    async fn test_import_clamps_and_defaults() {
        let h = Harness::new().await;
        let response = import(&h, r#"{"button":{"radius":999}}"#).await.unwrap();

        let mut expected = Configuration::default();
        expected.button.radius = 32;
        assert_eq!(response.config, expected);
        assert!(response.can_undo);
        assert_eq!(messages(&h.toasts), vec!["Imported configuration"]);
    }

    #[tokio::test]
    async fn test_import_invalid_json() {
        let h = Harness::new().await;
        let err = import(&h, "{\"button\":").await.unwrap_err();

        assert_eq!(err.code, ErrorCode::InvalidFormat);
        let active = h.toasts.active();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].message, "Invalid JSON");
        assert_eq!(active[0].duration_ms, 2600);
        assert!(!h.config.with_store(|s| s.can_undo()));
    }

    #[tokio::test]
    async fn test_import_is_one_undo_step() {
        let h = Harness::new().await;
        import(&h, r#"{"layout":{"dark":1,"variant":"stacked"}}"#).await.unwrap();
        assert!(h.config.current().layout.dark);

        crate::commands::config::undo(&h.db, &h.config, &h.url, &h.toasts).await;
        assert_eq!(h.config.current(), Configuration::default());
    }

    #[tokio::test]
    async fn test_export_then_import_file() {
        let h = Harness::new().await;
        let dir = tempfile::tempdir().unwrap();

        import(&h, r#"{"typography":{"unit":"rem"}}"#).await.unwrap();
        let path = export_config(&h.config, &h.toasts, dir.path()).await.unwrap();
        assert_eq!(path, dir.path().join("ui-config.json"));

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("{\n  \"typography\": {\n    \"family\""));

        let other = Harness::new().await;
        let response = import_file(&other.db, &other.config, &other.url, &other.toasts, &path)
            .await
            .unwrap();
        assert_eq!(response.config, h.config.current());
        assert!(messages(&h.toasts).contains(&"Exported ui-config.json".to_string()));
    }

    #[tokio::test]
    async fn test_import_missing_file() {
        let h = Harness::new().await;
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("none.json");
        let err = import_file(&h.db, &h.config, &h.url, &h.toasts, &missing)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::IoError);
        assert_eq!(messages(&h.toasts), vec![READ_FAILED]);
        assert_eq!(h.toasts.active()[0].duration_ms, ERROR_TOAST_MS);
        assert!(!h.config.with_store(|s| s.can_undo()));
    }

    #[tokio::test]
    async fn test_export_to_missing_dir() {
        let h = Harness::new().await;
        let dir = tempfile::tempdir().unwrap();
        let err = export_config(&h.config, &h.toasts, &dir.path().join("gone"))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::IoError);
        assert_eq!(messages(&h.toasts), vec![EXPORT_FAILED]);
    }

    #[tokio::test]
    async fn test_drop_requires_json_mime() {
        let h = Harness::new().await;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("theme.json");
        std::fs::write(&path, r#"{"stroke":{"weight":3}}"#).unwrap();

        let ignored = import_dropped(&h.db, &h.config, &h.url, &h.toasts, "text/plain", &path)
            .await
            .unwrap();
        assert!(ignored.is_none());
        assert_eq!(h.config.current().stroke.weight, 1);

        let mime = "application/json";
        let imported = import_dropped(&h.db, &h.config, &h.url, &h.toasts, mime, &path)
            .await
            .unwrap();
        assert_eq!(imported.unwrap().config.stroke.weight, 3);
    }

    #[tokio::test]
    async fn test_copy_css_vars() {
        let h = Harness::new().await;
        let clipboard = MemoryClipboard::new();

        let css = copy_css_vars(&h.config, &clipboard, &h.toasts).await.unwrap();
        assert!(css.starts_with(":root{\n"));
        assert_eq!(clipboard.contents(), Some(css));
        assert_eq!(messages(&h.toasts), vec!["CSS variables copied"]);
    }

    #[tokio::test]
    async fn test_copy_failures_become_notices() {
        let h = Harness::new().await;
        let clipboard = MemoryClipboard::unavailable();

        let err = copy_share_url(&h.url, &clipboard, &h.toasts).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ClipboardError);
        copy_css_vars(&h.config, &clipboard, &h.toasts).await.unwrap_err();

        assert_eq!(messages(&h.toasts), vec!["Could not copy URL", "Copy failed"]);
    }

    #[tokio::test]
    async fn test_share_url_carries_fragment() {
        let h = Harness::new().await;
        let clipboard = MemoryClipboard::new();
        import(&h, r#"{"button":{"radius":4}}"#).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(200)).await;

        let href = copy_share_url(&h.url, &clipboard, &h.toasts).await.unwrap();
        let token = codec::parse_fragment(&href).unwrap();
        let raw = codec::decode_or_none(token).unwrap();
        assert_eq!(validation::validate(&raw).button.radius, 4);
        assert_eq!(clipboard.contents(), Some(href));
    }
}
