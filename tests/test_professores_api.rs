//! End-to-end HTTP test: the real router on an ephemeral port, an in-memory
//! record store and a temporary photo directory.

use professores_api::{
    transport, MemoryRecordStore, NewProfessor, PhotoStore, ProfessorService, RecordStore,
    UploadValidator,
};
use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;
use serde_json::{json, Value};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;

static PHOTO_SEQ: AtomicUsize = AtomicUsize::new(0);

struct TestServer {
    base_url: String,
    client: reqwest::Client,
    records: Arc<MemoryRecordStore>,
    photo_dir: TempDir,
}

impl TestServer {
    async fn start() -> Self {
        let photo_dir = tempfile::tempdir().unwrap();
        let records = Arc::new(MemoryRecordStore::new());
        let photos = PhotoStore::open(photo_dir.path()).await.unwrap();
        let service = ProfessorService::new(records.clone(), photos, UploadValidator::default());
        let router = transport::http::create_router(
            transport::http::AppState::new(service),
            8 * 1024 * 1024,
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self {
            base_url: format!("http://127.0.0.1:{}", port),
            client: reqwest::Client::new(),
            records,
            photo_dir,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn photo_count(&self) -> usize {
        std::fs::read_dir(self.photo_dir.path()).unwrap().count()
    }

    async fn seed(&self, nome: &str, curso: &str, salario: f64) -> i64 {
        self.records
            .insert(NewProfessor {
                nome: nome.to_string(),
                curso: curso.to_string(),
                salario,
                foto: format!("/tmp/{}.png", nome),
            })
            .await
            .unwrap()
    }

    async fn post_form(&self, form: Form) -> (StatusCode, Value) {
        let resp = self
            .client
            .post(self.url("/professores"))
            .multipart(form)
            .send()
            .await
            .unwrap();
        let status = resp.status();
        (status, resp.json::<Value>().await.unwrap())
    }

    async fn get_json(&self, path: &str) -> (StatusCode, Value) {
        let resp = self.client.get(self.url(path)).send().await.unwrap();
        let status = resp.status();
        (status, resp.json::<Value>().await.unwrap())
    }
}

fn photo(mime: &str, size: usize) -> Part {
    Part::bytes(vec![0xAB; size])
        .file_name(format!("retrato-{}.png", PHOTO_SEQ.fetch_add(1, Ordering::Relaxed)))
        .mime_str(mime)
        .unwrap()
}

fn full_form(mime: &str, size: usize) -> Form {
    Form::new()
        .text("nome", "Ana")
        .text("curso", "Física")
        .text("salario", "4500.50")
        .part("foto", photo(mime, size))
}

fn salaries(body: &Value) -> Vec<f64> {
    let mut v: Vec<f64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["salario"].as_f64().unwrap())
        .collect();
    v.sort_by(|a, b| a.partial_cmp(b).unwrap());
    v
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn create_then_list_returns_the_record_with_an_existing_photo() {
    let server = TestServer::start().await;

    let (status, body) = server.post_form(full_form("image/png", 1024)).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["id"].as_i64().unwrap();

    let (status, list) = server.get_json("/professores").await;
    assert_eq!(status, StatusCode::OK);
    let rows = list.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["id"].as_i64(), Some(id));
    assert_eq!(rows[0]["nome"], "Ana");
    assert_eq!(rows[0]["curso"], "Física");
    assert_eq!(rows[0]["salario"].as_f64(), Some(4500.5));

    let foto = rows[0]["foto"].as_str().unwrap();
    assert!(Path::new(foto).exists());
    assert!(foto.contains("-retrato-"));
    assert_eq!(server.photo_count(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn list_is_ordered_by_id_descending() {
    let server = TestServer::start().await;
    let a = server.seed("A", "X", 1.0).await;
    let b = server.seed("B", "X", 2.0).await;
    let c = server.seed("C", "X", 3.0).await;

    let (_, list) = server.get_json("/professores").await;
    let ids: Vec<i64> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![c, b, a]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn wrong_mime_type_is_rejected_and_photo_removed() {
    let server = TestServer::start().await;

    let (status, body) = server.post_form(full_form("image/gif", 1024)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["msg"], "Formato inválido da imagem ou imagem muito grande");
    assert_eq!(server.photo_count(), 0);
    assert!(server.records.list_all().await.unwrap().is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn oversized_photo_is_rejected_and_photo_removed() {
    let server = TestServer::start().await;

    let (status, _) = server.post_form(full_form("image/jpeg", 512 * 1024)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(server.photo_count(), 1);

    let (status, body) = server.post_form(full_form("image/jpeg", 512 * 1024 + 1)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["msg"].as_str().unwrap().contains("muito grande"));
    assert_eq!(server.photo_count(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn missing_fields_are_rejected_without_leaving_a_photo() {
    let server = TestServer::start().await;

    let forms = vec![
        Form::new()
            .text("curso", "Física")
            .text("salario", "1000")
            .part("foto", photo("image/png", 10)),
        Form::new()
            .text("nome", "Ana")
            .text("salario", "1000")
            .part("foto", photo("image/png", 10)),
        Form::new()
            .text("nome", "Ana")
            .text("curso", "Física")
            .part("foto", photo("image/png", 10)),
        Form::new()
            .text("nome", "Ana")
            .text("curso", "Física")
            .text("salario", "1000"),
        Form::new()
            .text("nome", "")
            .text("curso", "Física")
            .text("salario", "1000")
            .part("foto", photo("image/png", 10)),
    ];

    for form in forms {
        let (status, body) = server.post_form(form).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["msg"], "Informe nome, curso, salario e foto do professor");
    }
    assert_eq!(server.photo_count(), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn non_multipart_create_is_a_400_with_msg() {
    let server = TestServer::start().await;

    let resp = server
        .client
        .post(server.url("/professores"))
        .json(&json!({ "nome": "Ana" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = resp.json::<Value>().await.unwrap();
    assert!(body["msg"].is_string());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn delete_is_idempotent_and_keeps_the_photo() {
    let server = TestServer::start().await;
    let (_, body) = server.post_form(full_form("image/png", 10)).await;
    let id = body["id"].as_i64().unwrap();

    for _ in 0..2 {
        let resp = server
            .client
            .delete(server.url(&format!("/professores/{}", id)))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.text().await.unwrap(), "");
    }

    assert!(server.records.get(id).await.is_none());
    // The row is gone but its photo stays on disk.
    assert_eq!(server.photo_count(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn update_changes_only_salario() {
    let server = TestServer::start().await;
    let id = server.seed("Ana", "Física", 1000.0).await;
    let before = server.records.get(id).await.unwrap();

    let resp = server
        .client
        .put(server.url(&format!("/professores/{}", id)))
        .json(&json!({ "salario": 5000, "nome": "Outra" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.text().await.unwrap(), "");

    let after = server.records.get(id).await.unwrap();
    assert_eq!(after.salario, 5000.0);
    assert_eq!(after.nome, before.nome);
    assert_eq!(after.curso, before.curso);
    assert_eq!(after.foto, before.foto);

    let resp = server
        .client
        .put(server.url(&format!("/professores/{}", id)))
        .json(&json!({ "salario": "6100.25" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(server.records.get(id).await.unwrap().salario, 6100.25);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn update_of_missing_id_succeeds_but_bad_input_is_400() {
    let server = TestServer::start().await;

    let resp = server
        .client
        .put(server.url("/professores/999"))
        .json(&json!({ "salario": 1 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = server
        .client
        .put(server.url("/professores/999"))
        .json(&json!({}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = server
        .client
        .put(server.url("/professores/abc"))
        .json(&json!({ "salario": 1 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = resp.json::<Value>().await.unwrap();
    assert!(body["msg"].as_str().unwrap().contains("id"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn update_accepts_a_url_encoded_form() {
    let server = TestServer::start().await;
    let id = server.seed("Ana", "Física", 1.0).await;

    let resp = server
        .client
        .put(server.url(&format!("/professores/{}", id)))
        .form(&[("salario", "5000")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(server.records.get(id).await.unwrap().salario, 5000.0);

    let resp = server
        .client
        .put(server.url(&format!("/professores/{}", id)))
        .form(&[("nome", "Outra")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(server.records.get(id).await.unwrap().nome, "Ana");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn photo_content_type_parameters_and_case_are_ignored() {
    let server = TestServer::start().await;

    for mime in ["image/jpeg; charset=binary", "IMAGE/PNG", "Image/Jpeg"] {
        let (status, body) = server.post_form(full_form(mime, 64)).await;
        assert_eq!(status, StatusCode::CREATED, "{} -> {}", mime, body);
    }
    assert_eq!(server.photo_count(), 3);

    let (status, _) = server
        .post_form(full_form("image/gif; charset=binary", 64))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(server.photo_count(), 3);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn trailing_slash_serves_the_collection() {
    let server = TestServer::start().await;
    server.seed("Ana", "Física", 1000.0).await;

    let (status, body) = server.get_json("/professores/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn search_matches_nome_or_curso() {
    let server = TestServer::start().await;
    server.seed("Ana", "Física", 1000.0).await;
    server.seed("Bob", "Ana Física", 2000.0).await;
    server.seed("Carla", "Química", 3000.0).await;

    let (status, body) = server.get_json("/professores/pesq/Ana").await;
    assert_eq!(status, StatusCode::OK);
    let mut nomes: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["nome"].as_str().unwrap())
        .collect();
    nomes.sort();
    assert_eq!(nomes, vec!["Ana", "Bob"]);

    let (_, body) = server.get_json("/professores/pesq/ana").await;
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn salary_range_and_threshold() {
    let server = TestServer::start().await;
    for s in [500.0, 1000.0, 1500.0, 2000.0, 2500.0] {
        server.seed("P", "C", s).await;
    }

    let (status, body) = server.get_json("/professores/salario/1000/2000").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(salaries(&body), vec![1000.0, 1500.0, 2000.0]);

    let (status, body) = server.get_json("/professores/salario/1000").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(salaries(&body), vec![1000.0, 1500.0, 2000.0, 2500.0]);

    let (status, body) = server.get_json("/professores/salario/muito").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["msg"].is_string());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn totals_aggregate_salaries() {
    let server = TestServer::start().await;

    let (status, body) = server.get_json("/professores/total").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["num"], 0);
    assert_eq!(body["media"], "0.00");

    for s in [1000.0, 2000.0, 3000.0] {
        server.seed("P", "C", s).await;
    }

    let (status, body) = server.get_json("/professores/total").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["num"], 3);
    assert_eq!(body["total"].as_f64(), Some(6000.0));
    assert_eq!(body["menor"].as_f64(), Some(1000.0));
    assert_eq!(body["maior"].as_f64(), Some(3000.0));
    assert_eq!(body["media"], "2000.00");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn cross_origin_requests_are_allowed() {
    let server = TestServer::start().await;

    let resp = server
        .client
        .get(server.url("/professores"))
        .header("Origin", "http://example.com")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn root_and_health() {
    let server = TestServer::start().await;

    let resp = server.client.get(server.url("/")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.text().await.unwrap(), "Hello World!");

    let (status, body) = server.get_json("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}
