use reqwest::RequestBuilder;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::error::TrendError;
use crate::model::{TrendRecord, TrendSeed};
use crate::traits::TrendStore;

// ── Settings ────────────────────────────────────────────────────────

/// Where the trend collection lives.
#[derive(Debug, Clone, PartialEq)]
pub struct AppwriteSettings {
    /// API root including the version segment, e.g. `https://cloud.appwrite.io/v1`.
    pub endpoint: String,
    pub project_id: String,
    /// Server API key. Optional when collection permissions allow the
    /// guest role to read and write.
    pub api_key: Option<String>,
    pub database_id: String,
    pub collection_id: String,
}

// ── Queries ─────────────────────────────────────────────────────────

/// Appwrite query strings, one per `queries[]` parameter.
pub mod query {
    use serde_json::json;

    pub fn equal(attribute: &str, value: &str) -> String {
        json!({ "method": "equal", "attribute": attribute, "values": [value] }).to_string()
    }

    pub fn order_desc(attribute: &str) -> String {
        json!({ "method": "orderDesc", "attribute": attribute }).to_string()
    }

    pub fn limit(n: usize) -> String {
        json!({ "method": "limit", "values": [n] }).to_string()
    }
}

#[derive(Debug, Deserialize)]
struct DocumentList {
    #[serde(default)]
    documents: Vec<TrendRecord>,
}

// ── AppwriteStore ───────────────────────────────────────────────────

/// Trend store backed by an Appwrite Databases collection with the
/// attributes `searchTerm`, `count`, `movie_id`, `title`, `poster_url`.
pub struct AppwriteStore {
    http: reqwest::Client,
    settings: AppwriteSettings,
    documents_url: String,
}

impl AppwriteStore {
    pub fn new(settings: AppwriteSettings) -> Self {
        Self::with_http(reqwest::Client::new(), settings)
    }

    pub fn with_http(http: reqwest::Client, settings: AppwriteSettings) -> Self {
        let documents_url = format!(
            "{}/databases/{}/collections/{}/documents",
            settings.endpoint.trim_end_matches('/'),
            settings.database_id,
            settings.collection_id,
        );
        Self {
            http,
            settings,
            documents_url,
        }
    }

    pub fn documents_url(&self) -> &str {
        &self.documents_url
    }

    fn authed(&self, req: RequestBuilder) -> RequestBuilder {
        let req = req.header("X-Appwrite-Project", &self.settings.project_id);
        match &self.settings.api_key {
            Some(key) => req.header("X-Appwrite-Key", key),
            None => req,
        }
    }

    async fn list(&self, queries: &[String]) -> Result<Vec<TrendRecord>, TrendError> {
        let params: Vec<(&str, &str)> = queries.iter().map(|q| ("queries[]", q.as_str())).collect();
        debug!("GET {} {:?}", self.documents_url, queries);
        let resp = self
            .authed(self.http.get(&self.documents_url))
            .query(&params)
            .send()
            .await?;
        let list: DocumentList = Self::decode(resp, "document list").await?;
        Ok(list.documents)
    }

    async fn decode<T: serde::de::DeserializeOwned>(
        resp: reqwest::Response,
        what: &str,
    ) -> Result<T, TrendError> {
        let status = resp.status();
        if !status.is_success() {
            let code = status.as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(TrendError::Status {
                status: code,
                message: body,
            });
        }
        let body = resp.text().await?;
        serde_json::from_str(&body).map_err(|e| TrendError::Decode(format!("{what}: {e}")))
    }
}

#[async_trait::async_trait]
impl TrendStore for AppwriteStore {
    async fn top(&self, limit: usize) -> Result<Vec<TrendRecord>, TrendError> {
        self.list(&[query::order_desc("count"), query::limit(limit)])
            .await
    }

    async fn find(&self, search_term: &str) -> Result<Option<TrendRecord>, TrendError> {
        let found = self
            .list(&[query::equal("searchTerm", search_term), query::limit(1)])
            .await?;
        Ok(found.into_iter().next())
    }

    async fn create(&self, search_term: &str, seed: &TrendSeed) -> Result<TrendRecord, TrendError> {
        let body = json!({
            "documentId": "unique()",
            "data": {
                "searchTerm": search_term,
                "count": 1,
                "movie_id": seed.movie_id,
                "title": seed.title,
                "poster_url": seed.poster_url,
            }
        });
        debug!("POST {} searchTerm={search_term}", self.documents_url);
        let resp = self
            .authed(self.http.post(&self.documents_url))
            .json(&body)
            .send()
            .await?;
        Self::decode(resp, "created document").await
    }

    async fn increment(&self, record: &TrendRecord) -> Result<TrendRecord, TrendError> {
        let url = format!("{}/{}", self.documents_url, record.id);
        let count = record.count + 1;
        debug!("PATCH {url} count={count}");
        let resp = self
            .authed(self.http.patch(&url))
            .json(&json!({ "data": { "count": count } }))
            .send()
            .await?;
        Self::decode(resp, "updated document").await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::extract::{Path, Query, State};
    use axum::http::{HeaderMap, StatusCode};
    use axum::response::IntoResponse;
    use axum::routing::{get, patch};
    use axum::{Json, Router};
    use serde_json::Value;

    use super::*;

    // =====================================================================
    // Fake collection
    // =====================================================================

    #[derive(Default)]
    struct Collection {
        docs: Vec<Value>,
        next_id: u64,
        projects: Vec<Option<String>>,
        keys: Vec<Option<String>>,
    }

    type Shared = Arc<Mutex<Collection>>;

    fn record_headers(c: &mut Collection, headers: &HeaderMap) {
        let h = |n: &str| headers.get(n).and_then(|v| v.to_str().ok()).map(str::to_string);
        c.projects.push(h("x-appwrite-project"));
        c.keys.push(h("x-appwrite-key"));
    }

    async fn list_docs(
        State(shared): State<Shared>,
        headers: HeaderMap,
        Query(params): Query<Vec<(String, String)>>,
    ) -> impl IntoResponse {
        let mut c = shared.lock().unwrap();
        record_headers(&mut c, &headers);

        let mut docs = c.docs.clone();
        for (key, raw) in params {
            assert_eq!(key, "queries[]");
            let q: Value = serde_json::from_str(&raw).unwrap();
            match q["method"].as_str().unwrap() {
                "equal" => {
                    let attr = q["attribute"].as_str().unwrap().to_string();
                    let want = q["values"][0].clone();
                    docs.retain(|d| d[&attr] == want);
                }
                "orderDesc" => {
                    let attr = q["attribute"].as_str().unwrap().to_string();
                    docs.sort_by_key(|d| std::cmp::Reverse(d[&attr].as_u64().unwrap_or(0)));
                }
                "limit" => docs.truncate(q["values"][0].as_u64().unwrap() as usize),
                other => panic!("unexpected query method {other}"),
            }
        }
        Json(json!({ "total": docs.len(), "documents": docs }))
    }

    async fn create_doc(
        State(shared): State<Shared>,
        headers: HeaderMap,
        Json(body): Json<Value>,
    ) -> impl IntoResponse {
        let mut c = shared.lock().unwrap();
        record_headers(&mut c, &headers);

        assert_eq!(body["documentId"], "unique()");
        c.next_id += 1;
        let mut doc = body["data"].clone();
        doc["$id"] = json!(format!("doc{}", c.next_id));
        c.docs.push(doc.clone());
        (StatusCode::CREATED, Json(doc))
    }

    async fn update_doc(
        State(shared): State<Shared>,
        Path((_db, _col, id)): Path<(String, String, String)>,
        headers: HeaderMap,
        Json(body): Json<Value>,
    ) -> impl IntoResponse {
        let mut c = shared.lock().unwrap();
        record_headers(&mut c, &headers);

        match c.docs.iter_mut().find(|d| d["$id"] == id.as_str()) {
            Some(doc) => {
                for (k, v) in body["data"].as_object().unwrap() {
                    doc[k] = v.clone();
                }
                (StatusCode::OK, Json(doc.clone())).into_response()
            }
            None => (StatusCode::NOT_FOUND, "Document with the requested ID could not be found.")
                .into_response(),
        }
    }

    async fn start_collection() -> (String, Shared) {
        let shared: Shared = Arc::default();
        let app = Router::new()
            .route(
                "/v1/databases/{db}/collections/{col}/documents",
                get(list_docs).post(create_doc),
            )
            .route(
                "/v1/databases/{db}/collections/{col}/documents/{id}",
                patch(update_doc),
            )
            .with_state(shared.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{addr}/v1"), shared)
    }

    fn settings(endpoint: &str, api_key: Option<&str>) -> AppwriteSettings {
        AppwriteSettings {
            endpoint: endpoint.to_string(),
            project_id: "cinefind".into(),
            api_key: api_key.map(str::to_string),
            database_id: "main".into(),
            collection_id: "metrics".into(),
        }
    }

    fn seed(movie_id: u64, title: &str) -> TrendSeed {
        TrendSeed {
            movie_id,
            title: title.into(),
            poster_url: format!("https://image.tmdb.org/t/p/w500/{movie_id}.jpg"),
        }
    }

    // =====================================================================
    // record_search
    // =====================================================================

    #[tokio::test]
    async fn first_search_creates_document() {
        let (endpoint, shared) = start_collection().await;
        let store = AppwriteStore::new(settings(&endpoint, Some("sk-test")));

        let rec = store.record_search("inception", &seed(27205, "Inception")).await.unwrap();
        assert_eq!(rec.id, "doc1");
        assert_eq!(rec.count, 1);
        assert_eq!(rec.movie_id, 27205);

        let c = shared.lock().unwrap();
        assert_eq!(c.docs.len(), 1);
        assert_eq!(c.docs[0]["searchTerm"], "inception");
        assert_eq!(c.docs[0]["title"], "Inception");
        assert!(c.projects.iter().all(|p| p.as_deref() == Some("cinefind")));
        assert!(c.keys.iter().all(|k| k.as_deref() == Some("sk-test")));
    }

    #[tokio::test]
    async fn second_search_increments_without_duplicating() {
        let (endpoint, shared) = start_collection().await;
        let store = AppwriteStore::new(settings(&endpoint, None));

        store.record_search("inception", &seed(27205, "Inception")).await.unwrap();
        let rec = store.record_search("inception", &seed(27205, "Inception")).await.unwrap();

        assert_eq!(rec.count, 2);
        let c = shared.lock().unwrap();
        assert_eq!(c.docs.len(), 1);
        assert_eq!(c.docs[0]["count"], 2);
        assert!(c.keys.iter().all(Option::is_none));
    }

    // =====================================================================
    // top / find
    // =====================================================================

    #[tokio::test]
    async fn top_returns_highest_counts_first() {
        let (endpoint, shared) = start_collection().await;
        {
            let mut c = shared.lock().unwrap();
            for (i, (term, count)) in [("up", 2), ("jaws", 9), ("heat", 5), ("big", 1)].iter().enumerate() {
                c.docs.push(json!({
                    "$id": format!("seed{i}"),
                    "searchTerm": term,
                    "count": count,
                    "movie_id": i,
                    "title": term,
                    "poster_url": ""
                }));
            }
        }
        let store = AppwriteStore::new(settings(&endpoint, None));

        let top = store.top(3).await.unwrap();
        let terms: Vec<_> = top.iter().map(|r| r.search_term.as_str()).collect();
        assert_eq!(terms, ["jaws", "heat", "up"]);
    }

    #[tokio::test]
    async fn find_is_exact_match() {
        let (endpoint, _) = start_collection().await;
        let store = AppwriteStore::new(settings(&endpoint, None));
        store.create("Heat", &seed(949, "Heat")).await.unwrap();

        assert!(store.find("heat").await.unwrap().is_none());
        assert_eq!(store.find("Heat").await.unwrap().map(|r| r.movie_id), Some(949));
    }

    // =====================================================================
    // Failures
    // =====================================================================

    #[tokio::test]
    async fn increment_missing_document_is_status_error() {
        let (endpoint, _) = start_collection().await;
        let store = AppwriteStore::new(settings(&endpoint, None));
        let ghost = TrendRecord::first("nope", "ghost", &seed(1, "Ghost"));

        match store.increment(&ghost).await {
            Err(TrendError::Status { status, .. }) => assert_eq!(status, 404),
            other => panic!("expected 404, got {other:?}"),
        }
    }

    #[test]
    fn query_strings() {
        let parse = |s: String| serde_json::from_str::<Value>(&s).unwrap();
        assert_eq!(
            parse(query::equal("searchTerm", "star wars")),
            json!({ "method": "equal", "attribute": "searchTerm", "values": ["star wars"] })
        );
        assert_eq!(
            parse(query::order_desc("count")),
            json!({ "method": "orderDesc", "attribute": "count" })
        );
        assert_eq!(parse(query::limit(5)), json!({ "method": "limit", "values": [5] }));
    }

    #[test]
    fn documents_url_trims_endpoint() {
        let store = AppwriteStore::new(settings("https://cloud.appwrite.io/v1/", None));
        assert_eq!(
            store.documents_url(),
            "https://cloud.appwrite.io/v1/databases/main/collections/metrics/documents"
        );
    }
}
