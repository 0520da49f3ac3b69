use std::fmt::Write;
use std::path::{Path, PathBuf};

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use tracing::{error, info, warn};

use crate::common::constants::{FORECAST_FILE, HISTORICAL_FILE};
use crate::common::markup::escape;
use crate::data::write::overwrite_file;
use crate::pages::{layout, text, Notice, Page};
use crate::state::AppState;

/// One of the two independent upload slots on the page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UploadSlot {
    Historical,
    Forecast,
}

impl UploadSlot {
    pub const ALL: [UploadSlot; 2] = [UploadSlot::Historical, UploadSlot::Forecast];

    pub fn field_name(self) -> &'static str {
        match self {
            UploadSlot::Historical => "hist",
            UploadSlot::Forecast => "pred",
        }
    }

    pub fn from_field_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|slot| slot.field_name() == name)
    }

    pub fn file_name(self) -> &'static str {
        match self {
            UploadSlot::Historical => HISTORICAL_FILE,
            UploadSlot::Forecast => FORECAST_FILE,
        }
    }

    pub fn path(self, data_dir: &Path) -> PathBuf {
        data_dir.join(self.file_name())
    }

    fn label(self) -> String {
        match self {
            UploadSlot::Historical => format!("{} ({})", text::UPLOAD_HISTORICAL, HISTORICAL_FILE),
            UploadSlot::Forecast => format!("{} ({})", text::UPLOAD_FORECAST, FORECAST_FILE),
        }
    }

    pub fn success_message(self) -> &'static str {
        match self {
            UploadSlot::Historical => text::HISTORICAL_UPLOADED,
            UploadSlot::Forecast => text::FORECAST_UPLOADED,
        }
    }
}

/// The `.csv` check is the only validation an upload gets.
pub fn has_csv_extension(file_name: &str) -> bool {
    Path::new(file_name)
        .extension()
        .is_some_and(|extension| extension.eq_ignore_ascii_case("csv"))
}

pub fn render(notices: &[Notice]) -> String {
    let mut html = format!(
        r#"<h1>{}</h1><form method="post" action="{}" enctype="multipart/form-data">"#,
        escape(text::UPLOAD_TITLE),
        Page::Upload.path()
    );

    for slot in UploadSlot::ALL {
        let _ = write!(
            html,
            r#"<p><label for="{name}">{label}</label><br><input type="file" id="{name}" name="{name}" accept=".csv"></p>"#,
            name = slot.field_name(),
            label = escape(&slot.label()),
        );
    }

    let _ = write!(
        html,
        r#"<button type="submit">{}</button></form>"#,
        escape(text::UPLOAD_BUTTON)
    );

    for notice in notices {
        html.push_str(&notice.render());
    }

    html.push_str(&Notice::Info(text::FILE_NAME_NOTE.to_string()).render());

    html
}

pub async fn receive(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Html<String>, Response> {
    let data_dir = state.data_dir().await;
    let mut notices = vec![];

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| (StatusCode::BAD_REQUEST, "Malformed upload").into_response())?
    {
        let Some(slot) = field.name().and_then(UploadSlot::from_field_name) else {
            continue;
        };

        let file_name = field.file_name().unwrap_or_default().to_string();

        // Browsers send an empty part for a slot left blank
        if file_name.is_empty() {
            continue;
        }

        if !has_csv_extension(&file_name) {
            warn!("Rejected upload {} for {:?}: not a .csv file", file_name, slot);
            notices.push(Notice::Error(text::not_csv(&file_name)));
            continue;
        }

        let contents = field
            .bytes()
            .await
            .map_err(|_| (StatusCode::BAD_REQUEST, "Malformed upload").into_response())?;

        let path = slot.path(&data_dir);

        overwrite_file(&path, &contents).map_err(|err| {
            error!("Upload of {} failed: {:#}", file_name, err);
            (StatusCode::INTERNAL_SERVER_ERROR, "Upload failed").into_response()
        })?;

        info!(
            "Stored upload {} ({} bytes) as {}",
            file_name,
            contents.len(),
            path.to_string_lossy()
        );

        notices.push(Notice::Success(slot.success_message().to_string()));
    }

    Ok(Html(layout(Page::Upload, &render(&notices))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build_router;
    use crate::data::DataStore;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request};
    use tower::ServiceExt;

    const BOUNDARY: &str = "vibrationboundary";

    fn multipart_body(parts: &[(&str, &str, &str)]) -> String {
        let mut body = String::new();

        for (name, file_name, contents) in parts {
            body.push_str(&format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: text/csv\r\n\r\n{contents}\r\n"
            ));
        }

        body.push_str(&format!("--{BOUNDARY}--\r\n"));
        body
    }

    async fn post_upload(state: AppState, body: String) -> (StatusCode, String) {
        let request = Request::builder()
            .method("POST")
            .uri("/upload")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap();

        let response = build_router(state).oneshot(request).await.unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();

        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[test]
    fn csv_extension_check_ignores_case() {
        assert!(has_csv_extension("data.csv"));
        assert!(has_csv_extension("DATA.CSV"));
        assert!(!has_csv_extension("data.xlsx"));
        assert!(!has_csv_extension("csv"));
    }

    #[test]
    fn slots_map_to_fixed_file_names() {
        assert_eq!(UploadSlot::from_field_name("hist"), Some(UploadSlot::Historical));
        assert_eq!(UploadSlot::from_field_name("pred"), Some(UploadSlot::Forecast));
        assert_eq!(UploadSlot::from_field_name("other"), None);
        assert_eq!(UploadSlot::Historical.file_name(), HISTORICAL_FILE);
    }

    #[test]
    fn form_restricts_inputs_to_csv() {
        let html = render(&[]);

        assert_eq!(html.matches(r#"accept=".csv""#).count(), 2);
        assert!(html.contains(text::FILE_NAME_NOTE));
    }

    #[tokio::test]
    async fn historical_upload_overwrites_file_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(HISTORICAL_FILE);
        std::fs::write(&path, "Timestamp,Acceleration RMS (g)\n2023-01-01T00:00,0.5\n").unwrap();
        let contents = "Timestamp,Acceleration RMS (g)\n2024-01-01T00:00,0.01\n2024-01-01T01:00,0.05\n";

        let (status, html) = post_upload(
            AppState::new(dir.path().to_path_buf()),
            multipart_body(&[("hist", "history.csv", contents)]),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(html.contains(UploadSlot::Historical.success_message()));
        assert!(!html.contains(UploadSlot::Forecast.success_message()));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), contents);
        assert!(!dir.path().join(FORECAST_FILE).exists());

        let snapshot = DataStore::new(dir.path().to_path_buf()).load();
        assert_eq!(snapshot.historical.len(), 2);
        assert_eq!(snapshot.historical[0].acceleration_rms, 0.01);
    }

    #[tokio::test]
    async fn upload_does_not_prime_the_cache() {
        let dir = tempfile::tempdir().unwrap();
        let state = AppState::new(dir.path().to_path_buf());

        let (status, _) = post_upload(
            state.clone(),
            multipart_body(&[(
                "hist",
                "history.csv",
                "Timestamp,Acceleration RMS (g)\n2024-01-01T00:00,0.01\n",
            )]),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(state.snapshot().await.historical.len(), 1);
    }

    #[tokio::test]
    async fn both_slots_in_one_submission() {
        let dir = tempfile::tempdir().unwrap();

        let (status, html) = post_upload(
            AppState::new(dir.path().to_path_buf()),
            multipart_body(&[("hist", "a.csv", "one"), ("pred", "b.csv", "two")]),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(html.contains(UploadSlot::Historical.success_message()));
        assert!(html.contains(UploadSlot::Forecast.success_message()));
        assert_eq!(std::fs::read_to_string(dir.path().join(HISTORICAL_FILE)).unwrap(), "one");
        assert_eq!(std::fs::read_to_string(dir.path().join(FORECAST_FILE)).unwrap(), "two");
    }

    #[tokio::test]
    async fn empty_slot_is_skipped() {
        let dir = tempfile::tempdir().unwrap();

        let (status, html) = post_upload(
            AppState::new(dir.path().to_path_buf()),
            multipart_body(&[("hist", "", ""), ("pred", "b.csv", "two")]),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(!html.contains(UploadSlot::Historical.success_message()));
        assert!(!dir.path().join(HISTORICAL_FILE).exists());
        assert!(dir.path().join(FORECAST_FILE).exists());
    }

    #[tokio::test]
    async fn non_csv_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();

        let (status, html) = post_upload(
            AppState::new(dir.path().to_path_buf()),
            multipart_body(&[("pred", "forecast.xlsx", "binary")]),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("forecast.xlsx is not a CSV file"));
        assert!(!dir.path().join(FORECAST_FILE).exists());
    }

    #[tokio::test]
    async fn write_failure_is_a_server_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("gone");

        let (status, body) = post_upload(
            AppState::new(missing),
            multipart_body(&[("hist", "history.csv", "data")]),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, "Upload failed");
    }
}
