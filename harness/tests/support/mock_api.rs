//! In-process stand-in for the posts API.
//!
//! Reproduces the json-server/json-server-auth behaviour the catalogue relies
//! on: registration issuing bearer tokens, the `/664/posts` write guard,
//! `_limit` and repeated `id` filters, 404 for missing posts and for `PUT` on
//! the collection, and `{}` bodies on delete. Responses carry the
//! `application/json; charset=utf-8` content type.
//!
//! The harness owns a single-threaded Tokio runtime plus a `LocalSet` because
//! Actix uses `spawn_local` internally. Dropping [`MockApi`] stops the server.

use std::collections::{BTreeMap, HashMap};
use std::future::Future;
use std::net::TcpListener;
use std::sync::{Arc, Mutex, MutexGuard};

use actix_web::dev::ServerHandle;
use actix_web::http::StatusCode;
use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};
use serde_json::{Map, Value, json};
use tokio::runtime::Runtime;
use tokio::task::LocalSet;

const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";
const SEEDED_POSTS: i64 = 100;

/// Posts and accounts held by the mock.
#[derive(Debug)]
pub(crate) struct Store {
    posts: BTreeMap<i64, Map<String, Value>>,
    users: Vec<Value>,
    tokens: HashMap<String, i64>,
    next_post_id: i64,
}

impl Store {
    fn seeded() -> Self {
        let posts = (1..=SEEDED_POSTS)
            .map(|id| {
                let post = json!({
                    "id": id,
                    "userId": (id - 1) / 10 + 1,
                    "title": format!("Seeded post {id}"),
                    "body": format!("Body of seeded post {id}"),
                });
                (id, as_object(post))
            })
            .collect();
        Self {
            posts,
            users: Vec::new(),
            tokens: HashMap::new(),
            next_post_id: SEEDED_POSTS + 1,
        }
    }

    fn insert_post(&mut self, mut fields: Map<String, Value>) -> Value {
        let id = self.next_post_id;
        self.next_post_id += 1;
        fields.insert("id".to_owned(), json!(id));
        self.posts.insert(id, fields.clone());
        Value::Object(fields)
    }
}

type SharedStore = web::Data<Mutex<Store>>;

/// Running mock server plus the runtime that drives it.
pub(crate) struct MockApi {
    runtime: Runtime,
    local: LocalSet,
    base_url: String,
    server: ServerHandle,
    store: Arc<Mutex<Store>>,
}

impl MockApi {
    /// Start a server on an ephemeral port with 100 seeded posts.
    pub(crate) fn start() -> Self {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("tokio runtime");
        let local = LocalSet::new();
        let store = Arc::new(Mutex::new(Store::seeded()));
        let (base_url, server) = local
            .block_on(&runtime, spawn_server(store.clone()))
            .expect("mock API should start");

        Self {
            runtime,
            local,
            base_url,
            server,
            store,
        }
    }

    /// Base URL such as `http://127.0.0.1:PORT`.
    pub(crate) fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Drive `future` on the runtime serving the mock.
    pub(crate) fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.local.block_on(&self.runtime, future)
    }

    /// Number of stored posts.
    pub(crate) fn post_count(&self) -> usize {
        self.store().posts.len()
    }

    /// Number of registered users.
    pub(crate) fn user_count(&self) -> usize {
        self.store().users.len()
    }

    fn store(&self) -> MutexGuard<'_, Store> {
        self.store.lock().expect("store lock")
    }
}

impl Drop for MockApi {
    fn drop(&mut self) {
        let server = self.server.clone();
        self.local.block_on(&self.runtime, async move {
            server.stop(true).await;
        });
    }
}

async fn spawn_server(store: Arc<Mutex<Store>>) -> Result<(String, ServerHandle), String> {
    let listener = TcpListener::bind("127.0.0.1:0").map_err(|err| err.to_string())?;
    let addr = listener.local_addr().map_err(|err| err.to_string())?;
    let data: SharedStore = web::Data::from(store);

    let server = HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .route("/register", web::post().to(register))
            .service(
                web::resource("/posts")
                    .route(web::get().to(list_posts))
                    .route(web::post().to(create_post))
                    .route(web::put().to(missing_resource)),
            )
            .service(
                web::resource("/664/posts")
                    .route(web::get().to(list_posts))
                    .route(web::post().to(create_guarded_post)),
            )
            .service(
                web::resource("/posts/{id}")
                    .route(web::get().to(get_post))
                    .route(web::put().to(replace_post))
                    .route(web::delete().to(delete_post)),
            )
    })
    .disable_signals()
    .workers(1)
    .listen(listener)
    .map_err(|err| err.to_string())?
    .run();

    let handle = server.handle();
    actix_web::rt::spawn(server);

    Ok((format!("http://{addr}"), handle))
}

fn json_response(status: StatusCode, body: &Value) -> HttpResponse {
    HttpResponse::build(status)
        .content_type(JSON_CONTENT_TYPE)
        .body(body.to_string())
}

fn as_object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(fields) => fields,
        _ => Map::new(),
    }
}

fn parse_object(body: &[u8]) -> Option<Map<String, Value>> {
    match serde_json::from_slice(body) {
        Ok(Value::Object(fields)) => Some(fields),
        _ => None,
    }
}

fn lock(store: &SharedStore) -> MutexGuard<'_, Store> {
    store.lock().expect("store lock")
}

async fn register(store: SharedStore, body: web::Bytes) -> HttpResponse {
    let Some(mut fields) = parse_object(&body) else {
        return json_response(StatusCode::BAD_REQUEST, &json!("Invalid JSON body"));
    };
    let email = fields.get("email").and_then(Value::as_str).map(str::to_owned);
    let has_password = fields
        .get("password")
        .and_then(Value::as_str)
        .is_some_and(|password| !password.is_empty());
    let Some(email) = email.filter(|email| !email.is_empty() && has_password) else {
        return json_response(
            StatusCode::BAD_REQUEST,
            &json!("Email and password are required"),
        );
    };

    let mut store = lock(&store);
    if store
        .users
        .iter()
        .any(|user| user.get("email").and_then(Value::as_str) == Some(email.as_str()))
    {
        return json_response(StatusCode::BAD_REQUEST, &json!("Email already exists"));
    }

    let id = i64::try_from(store.users.len()).expect("user count fits i64") + 1;
    let token = format!("token-{id}-{}", email.len());
    fields.remove("password");
    fields.insert("id".to_owned(), json!(id));
    let user = Value::Object(fields);
    store.users.push(user.clone());
    store.tokens.insert(token.clone(), id);

    json_response(
        StatusCode::CREATED,
        &json!({ "accessToken": token, "user": user }),
    )
}

async fn list_posts(store: SharedStore, req: HttpRequest) -> HttpResponse {
    let mut limit = None;
    let mut ids = Vec::new();
    for (key, value) in url::form_urlencoded::parse(req.query_string().as_bytes()) {
        match key.as_ref() {
            "_limit" => limit = value.parse::<usize>().ok(),
            "id" => ids.extend(value.parse::<i64>().ok()),
            _ => {}
        }
    }

    let store = lock(&store);
    let posts: Vec<Value> = store
        .posts
        .iter()
        .filter(|(id, _)| ids.is_empty() || ids.contains(*id))
        .take(limit.unwrap_or(usize::MAX))
        .map(|(_, fields)| Value::Object(fields.clone()))
        .collect();
    json_response(StatusCode::OK, &Value::Array(posts))
}

async fn create_post(store: SharedStore, body: web::Bytes) -> HttpResponse {
    let Some(fields) = parse_object(&body) else {
        return json_response(StatusCode::BAD_REQUEST, &json!("Invalid JSON body"));
    };
    let created = lock(&store).insert_post(fields);
    json_response(StatusCode::CREATED, &created)
}

async fn create_guarded_post(
    store: SharedStore,
    req: HttpRequest,
    body: web::Bytes,
) -> HttpResponse {
    let token = req
        .headers()
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::to_owned);
    let Some(token) = token else {
        return json_response(
            StatusCode::UNAUTHORIZED,
            &json!("Missing authorization header"),
        );
    };
    if !lock(&store).tokens.contains_key(&token) {
        return json_response(StatusCode::UNAUTHORIZED, &json!("jwt malformed"));
    }
    create_post(store, body).await
}

async fn missing_resource() -> HttpResponse {
    json_response(StatusCode::NOT_FOUND, &json!({}))
}

fn post_id(raw: &str) -> Option<i64> {
    raw.parse().ok()
}

async fn get_post(store: SharedStore, path: web::Path<String>) -> HttpResponse {
    let store = lock(&store);
    match post_id(&path).and_then(|id| store.posts.get(&id)) {
        Some(fields) => json_response(StatusCode::OK, &Value::Object(fields.clone())),
        None => json_response(StatusCode::NOT_FOUND, &json!({})),
    }
}

async fn replace_post(
    store: SharedStore,
    path: web::Path<String>,
    body: web::Bytes,
) -> HttpResponse {
    let Some(mut fields) = parse_object(&body) else {
        return json_response(StatusCode::BAD_REQUEST, &json!("Invalid JSON body"));
    };
    let mut store = lock(&store);
    let Some(id) = post_id(&path).filter(|id| store.posts.contains_key(id)) else {
        return json_response(StatusCode::NOT_FOUND, &json!({}));
    };
    fields.insert("id".to_owned(), json!(id));
    store.posts.insert(id, fields.clone());
    json_response(StatusCode::OK, &Value::Object(fields))
}

async fn delete_post(store: SharedStore, path: web::Path<String>) -> HttpResponse {
    let removed = post_id(&path).and_then(|id| lock(&store).posts.remove(&id));
    let status = if removed.is_some() {
        StatusCode::OK
    } else {
        StatusCode::NOT_FOUND
    };
    json_response(status, &json!({}))
}
