//! Issue report lifecycle: intake, classification, listing, status updates.

use axum::body::Bytes;
use shared::models::{
    GeoLocation, IssueCreated, IssueReport, MessageResponse, Prediction, STATUS_PENDING,
};
use std::path::PathBuf;
use std::sync::Arc;

use crate::classifier::{ImageClassifier, UNKNOWN_CATEGORY, is_known_label};
use crate::db::models::NewIssue;
use crate::db::repository::IssueStore;
use crate::storage::UploadStorage;
use crate::utils::{AppError, AppResult, ErrorCode};

/// Category value the web client sends when no category was chosen
const NULL_CATEGORY: &str = "null";

/// An uploaded file part
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: String,
    pub data: Bytes,
}

impl UploadedFile {
    pub fn new(filename: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            filename: filename.into(),
            data: data.into(),
        }
    }
}

/// Input of [`IssueService::create_report`]
///
/// Text fields are kept raw; parsing and defaults happen in the service.
#[derive(Debug, Clone, Default)]
pub struct CreateIssueRequest {
    pub file: Option<UploadedFile>,
    pub lat: Option<String>,
    pub lng: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
}

impl CreateIssueRequest {
    pub fn new(file: Option<UploadedFile>) -> Self {
        Self {
            file,
            ..Self::default()
        }
    }

    pub fn with_coordinates(mut self, lat: impl Into<String>, lng: impl Into<String>) -> Self {
        self.lat = Some(lat.into());
        self.lng = Some(lng.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

/// Orchestrates report intake, classification, persistence and status changes
#[derive(Clone, Debug)]
pub struct IssueService {
    store: Arc<dyn IssueStore>,
    classifier: Arc<dyn ImageClassifier>,
    storage: UploadStorage,
}

impl IssueService {
    pub fn new(
        store: Arc<dyn IssueStore>,
        classifier: Arc<dyn ImageClassifier>,
        storage: UploadStorage,
    ) -> Self {
        Self {
            store,
            classifier,
            storage,
        }
    }

    pub fn storage(&self) -> &UploadStorage {
        &self.storage
    }

    /// Store the photo, pick a category and insert a `Pending` report
    ///
    /// `base_url` is the externally visible origin used for the image link.
    pub async fn create_report(
        &self,
        request: CreateIssueRequest,
        base_url: &str,
    ) -> AppResult<IssueCreated> {
        let file = validate_upload(request.file)?;
        let location = GeoLocation::new(
            parse_coordinate("lat", request.lat.as_deref())?,
            parse_coordinate("lng", request.lng.as_deref())?,
        );

        let stored = self.storage.save(&file.filename, &file.data).await?;

        let category = match category_override(request.category.as_deref()) {
            Some(category) => {
                if !is_known_label(category) {
                    tracing::debug!(category = %category, "Category override outside label set");
                }
                category.to_string()
            }
            None => self.classify(stored.path.clone()).await,
        };

        let image_url = public_image_url(base_url, &stored.filename);
        let issue = NewIssue {
            image_url: image_url.clone(),
            location,
            status: STATUS_PENDING.to_string(),
            category: category.clone(),
            description: request.description.unwrap_or_default(),
            created_at: shared::util::now_millis(),
        };

        let created = match self.store.insert(issue).await {
            Ok(created) => created,
            Err(e) => {
                self.storage.remove(&stored).await;
                return Err(e.into());
            }
        };

        tracing::info!(
            id = %created.id,
            category = %category,
            file = %stored.filename,
            "Report submitted"
        );

        Ok(IssueCreated {
            message: "Report submitted successfully".to_string(),
            id: created.id,
            category,
            image_url,
        })
    }

    /// Every report, newest first
    pub async fn list_reports(&self) -> AppResult<Vec<IssueReport>> {
        Ok(self.store.find_all().await?)
    }

    /// Replace the status of one report; any non-empty status is accepted
    pub async fn update_status(
        &self,
        id: &str,
        status: Option<&str>,
    ) -> AppResult<MessageResponse> {
        let status = status
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| AppError::new(ErrorCode::StatusRequired))?;

        let updated = self.store.update_status(id, status).await?;
        tracing::info!(id = %updated.id, status = %updated.status, "Report status updated");

        Ok(MessageResponse::new("Status updated"))
    }

    /// Classify an upload without creating a report
    pub async fn classify_only(&self, file: Option<UploadedFile>) -> AppResult<Prediction> {
        let file = validate_upload(file)?;
        let stored = self.storage.save_temp(&file.filename, &file.data).await?;

        let category = self.classify(stored.path.clone()).await;
        self.storage.remove(&stored).await;

        Ok(Prediction { category })
    }

    /// Run the classifier on the blocking pool
    async fn classify(&self, path: PathBuf) -> String {
        let classifier = Arc::clone(&self.classifier);
        match tokio::task::spawn_blocking(move || classifier.predict(&path)).await {
            Ok(label) => label,
            Err(e) => {
                tracing::error!(error = %e, "Classifier task failed");
                UNKNOWN_CATEGORY.to_string()
            }
        }
    }
}

fn validate_upload(file: Option<UploadedFile>) -> AppResult<UploadedFile> {
    let file = file.ok_or_else(|| AppError::new(ErrorCode::NoFileProvided))?;
    if file.filename.is_empty() {
        return Err(AppError::new(ErrorCode::NoFilename));
    }
    if file.data.is_empty() {
        return Err(AppError::new(ErrorCode::EmptyFile));
    }
    Ok(file)
}

/// Caller-supplied category, unless absent, empty or the literal `"null"`
pub fn category_override(category: Option<&str>) -> Option<&str> {
    category.filter(|c| !c.is_empty() && *c != NULL_CATEGORY)
}

/// Parse one coordinate; absent or blank means 0.0
pub fn parse_coordinate(field: &str, value: Option<&str>) -> AppResult<f64> {
    let raw = match value.map(str::trim) {
        None | Some("") => return Ok(0.0),
        Some(raw) => raw,
    };

    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| {
            AppError::with_message(
                ErrorCode::InvalidCoordinates,
                format!("Invalid {}: {}", field, raw),
            )
            .with_detail("field", field)
        })
}

/// `{base}/uploads/{filename}` without a doubled slash
pub fn public_image_url(base_url: &str, filename: &str) -> String {
    format!("{}/uploads/{}", base_url.trim_end_matches('/'), filename)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::CATEGORIES;
    use crate::db::DbService;
    use crate::db::repository::{IssueRepository, RepoError, RepoResult};
    use async_trait::async_trait;
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;

    const BASE_URL: &str = "http://localhost:5000/";

    /// Returns a fixed label and counts calls
    #[derive(Debug, Default)]
    struct FixedClassifier {
        calls: AtomicUsize,
    }

    impl ImageClassifier for FixedClassifier {
        fn predict(&self, image_path: &Path) -> String {
            assert!(image_path.exists(), "classifier must see the stored file");
            self.calls.fetch_add(1, Ordering::SeqCst);
            "Garbage".to_string()
        }
    }

    /// Store whose writes always fail
    #[derive(Debug)]
    struct BrokenStore;

    #[async_trait]
    impl IssueStore for BrokenStore {
        async fn insert(&self, _issue: NewIssue) -> RepoResult<IssueReport> {
            Err(RepoError::Database("connection refused".into()))
        }
        async fn find_all(&self) -> RepoResult<Vec<IssueReport>> {
            Err(RepoError::Database("connection refused".into()))
        }
        async fn find_by_id(&self, _id: &str) -> RepoResult<Option<IssueReport>> {
            Ok(None)
        }
        async fn update_status(&self, _id: &str, _status: &str) -> RepoResult<IssueReport> {
            Err(RepoError::Database("connection refused".into()))
        }
        async fn count(&self) -> RepoResult<usize> {
            Ok(0)
        }
        async fn clear(&self) -> RepoResult<usize> {
            Ok(0)
        }
    }

    struct Fixture {
        service: IssueService,
        classifier: Arc<FixedClassifier>,
        store: Arc<IssueRepository>,
        _dir: TempDir,
    }

    async fn fixture() -> Fixture {
        let dir = TempDir::new().unwrap();
        let storage = UploadStorage::new(dir.path());
        let db = DbService::in_memory().await.unwrap();
        let store = Arc::new(IssueRepository::new(db.db));
        let classifier = Arc::new(FixedClassifier::default());
        let service = IssueService::new(store.clone(), classifier.clone(), storage);
        Fixture {
            service,
            classifier,
            store,
            _dir: dir,
        }
    }

    fn photo(name: &str) -> Option<UploadedFile> {
        Some(UploadedFile::new(name, &b"fake-jpeg"[..]))
    }

    fn files_in(dir: &Path) -> Vec<String> {
        std::fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect()
    }

    #[test]
    fn test_category_override() {
        assert_eq!(category_override(Some("Pothole")), Some("Pothole"));
        assert_eq!(category_override(Some("Flooding")), Some("Flooding"));
        assert_eq!(category_override(Some("null")), None);
        assert_eq!(category_override(Some("")), None);
        assert_eq!(category_override(None), None);
    }

    #[test]
    fn test_parse_coordinate() {
        assert_eq!(parse_coordinate("lat", None).unwrap(), 0.0);
        assert_eq!(parse_coordinate("lat", Some("")).unwrap(), 0.0);
        assert_eq!(parse_coordinate("lat", Some(" 12.9 ")).unwrap(), 12.9);
        assert_eq!(parse_coordinate("lng", Some("-77")).unwrap(), -77.0);

        let err = parse_coordinate("lat", Some("north")).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidCoordinates);
        assert_eq!(err.message, "Invalid lat: north");

        let err = parse_coordinate("lng", Some("NaN")).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidCoordinates);
        assert!(parse_coordinate("lng", Some("inf")).is_err());
    }

    #[test]
    fn test_public_image_url() {
        assert_eq!(
            public_image_url("http://localhost:5000/", "a_x.jpg"),
            "http://localhost:5000/uploads/a_x.jpg"
        );
        assert_eq!(
            public_image_url("https://civic.example.org", "a_x.jpg"),
            "https://civic.example.org/uploads/a_x.jpg"
        );
    }

    #[tokio::test]
    async fn test_create_report_classifies() {
        let f = fixture().await;
        let request = CreateIssueRequest::new(photo("pothole.jpg")).with_coordinates("12.9", "77.6");

        let created = f.service.create_report(request, BASE_URL).await.unwrap();

        assert_eq!(created.message, "Report submitted successfully");
        assert_eq!(created.category, "Garbage");
        assert!(created.image_url.starts_with("http://localhost:5000/uploads/"));
        assert!(created.image_url.ends_with("_pothole.jpg"));
        assert_eq!(f.classifier.calls.load(Ordering::SeqCst), 1);

        let stored = f.store.find_by_id(&created.id).await.unwrap().unwrap();
        assert_eq!(stored.status, STATUS_PENDING);
        assert_eq!(stored.location, GeoLocation::new(12.9, 77.6));
        assert_eq!(stored.description, "");
        assert_eq!(stored.image_url, created.image_url);

        // The photo stays on disk under the name in the URL
        let filename = created.image_url.rsplit('/').next().unwrap();
        assert!(f.service.storage().dir().join(filename).exists());
    }

    #[tokio::test]
    async fn test_create_report_with_override() {
        let f = fixture().await;
        let request = CreateIssueRequest::new(photo("lamp.jpg"))
            .with_category("Broken Streetlight")
            .with_description("Dark since Monday");

        let created = f.service.create_report(request, BASE_URL).await.unwrap();

        assert_eq!(created.category, "Broken Streetlight");
        assert_eq!(f.classifier.calls.load(Ordering::SeqCst), 0);
        let stored = f.store.find_by_id(&created.id).await.unwrap().unwrap();
        assert_eq!(stored.description, "Dark since Monday");
    }

    #[tokio::test]
    async fn test_null_override_invokes_classifier() {
        let f = fixture().await;
        let request = CreateIssueRequest::new(photo("x.jpg")).with_category("null");

        let created = f.service.create_report(request, BASE_URL).await.unwrap();

        assert_eq!(created.category, "Garbage");
        assert_eq!(f.classifier.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_missing_coordinates_default_to_origin() {
        let f = fixture().await;
        let created = f
            .service
            .create_report(CreateIssueRequest::new(photo("x.jpg")), BASE_URL)
            .await
            .unwrap();

        let stored = f.store.find_by_id(&created.id).await.unwrap().unwrap();
        assert_eq!(stored.location, GeoLocation::new(0.0, 0.0));
    }

    #[tokio::test]
    async fn test_create_rejects_bad_input_without_side_effects() {
        let f = fixture().await;

        let err = f
            .service
            .create_report(CreateIssueRequest::new(None), BASE_URL)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NoFileProvided);

        let err = f
            .service
            .create_report(CreateIssueRequest::new(photo("")), BASE_URL)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NoFilename);

        let empty = Some(UploadedFile::new("x.jpg", Bytes::new()));
        let err = f
            .service
            .create_report(CreateIssueRequest::new(empty), BASE_URL)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::EmptyFile);

        let request = CreateIssueRequest::new(photo("x.jpg")).with_coordinates("north", "77.6");
        let err = f.service.create_report(request, BASE_URL).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidCoordinates);

        assert_eq!(f.store.count().await.unwrap(), 0);
        assert!(files_in(f.service.storage().dir()).is_empty());
    }

    #[tokio::test]
    async fn test_failed_insert_removes_photo() {
        let dir = TempDir::new().unwrap();
        let service = IssueService::new(
            Arc::new(BrokenStore),
            Arc::new(FixedClassifier::default()),
            UploadStorage::new(dir.path()),
        );

        let err = service
            .create_report(CreateIssueRequest::new(photo("x.jpg")), BASE_URL)
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert!(files_in(dir.path()).is_empty());
    }

    #[tokio::test]
    async fn test_list_reports_newest_first() {
        let f = fixture().await;
        for name in ["a.jpg", "b.jpg", "c.jpg"] {
            f.service
                .create_report(CreateIssueRequest::new(photo(name)), BASE_URL)
                .await
                .unwrap();
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        }

        let reports = f.service.list_reports().await.unwrap();
        assert_eq!(reports.len(), 3);
        assert!(reports.windows(2).all(|w| w[0].timestamp >= w[1].timestamp));
        assert!(reports[0].image_url.ends_with("_c.jpg"));
    }

    #[tokio::test]
    async fn test_update_status() {
        let f = fixture().await;
        let a = f
            .service
            .create_report(CreateIssueRequest::new(photo("a.jpg")), BASE_URL)
            .await
            .unwrap();
        let b = f
            .service
            .create_report(CreateIssueRequest::new(photo("b.jpg")), BASE_URL)
            .await
            .unwrap();

        let response = f.service.update_status(&a.id, Some("Resolved")).await.unwrap();
        assert_eq!(response.message, "Status updated");

        // Idempotent
        f.service.update_status(&a.id, Some("Resolved")).await.unwrap();

        let reports = f.service.list_reports().await.unwrap();
        let status_of = |id: &str| {
            reports
                .iter()
                .find(|r| r.id == id)
                .map(|r| r.status.clone())
                .unwrap()
        };
        assert_eq!(status_of(&a.id), "Resolved");
        assert_eq!(status_of(&b.id), STATUS_PENDING);
    }

    #[tokio::test]
    async fn test_update_status_errors() {
        let f = fixture().await;
        let a = f
            .service
            .create_report(CreateIssueRequest::new(photo("a.jpg")), BASE_URL)
            .await
            .unwrap();

        let err = f.service.update_status(&a.id, None).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::StatusRequired);
        let err = f.service.update_status(&a.id, Some("  ")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::StatusRequired);

        let err = f
            .service
            .update_status("nosuchreport", Some("Resolved"))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ReportNotFound);

        let err = f
            .service
            .update_status("not a valid id!", Some("Resolved"))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidReportId);
    }

    #[tokio::test]
    async fn test_classify_only_leaves_no_trace() {
        let f = fixture().await;

        let prediction = f.service.classify_only(photo("test.png")).await.unwrap();

        assert_eq!(prediction.category, "Garbage");
        assert!(CATEGORIES.contains(&prediction.category.as_str()));
        assert_eq!(f.store.count().await.unwrap(), 0);
        assert!(files_in(f.service.storage().dir()).is_empty());
    }

    #[tokio::test]
    async fn test_classify_only_requires_file() {
        let f = fixture().await;
        let err = f.service.classify_only(None).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NoFileProvided);
    }
}
