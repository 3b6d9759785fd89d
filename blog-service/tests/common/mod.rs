use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::Authenticator;
use auth::CredentialLookup;
use auth::IdentityResolver;
use auth::JwtHandler;
use auth::PasswordHasher;
use blog_service::domain::post::errors::PostError;
use blog_service::domain::post::models::Post;
use blog_service::domain::post::models::PostId;
use blog_service::domain::post::ports::PostRepository;
use blog_service::domain::post::service::PostService;
use blog_service::domain::user::credentials::UserCredentialLookup;
use blog_service::domain::user::errors::UserError;
use blog_service::domain::user::models::EmailAddress;
use blog_service::domain::user::models::Page;
use blog_service::domain::user::models::User;
use blog_service::domain::user::models::UserId;
use blog_service::domain::user::ports::UserRepository;
use blog_service::domain::user::service::UserService;
use blog_service::inbound::http::router::create_router;
use blog_service::inbound::http::router::AppState;
use serde_json::json;
use serde_json::Value;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns a real server over in-memory storage
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub jwt_handler: JwtHandler,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let store = Arc::new(Mutex::new(Store::default()));
        let user_repository = Arc::new(InMemoryUserRepository(Arc::clone(&store)));
        let post_repository = Arc::new(InMemoryPostRepository(store));

        // Cheap Argon2 parameters keep the suite fast
        let password_hasher =
            PasswordHasher::with_params(1024, 1, 1).expect("Invalid test hashing parameters");
        let jwt_handler = Arc::new(JwtHandler::new(TEST_SECRET));
        let credential_lookup: Arc<dyn CredentialLookup> =
            Arc::new(UserCredentialLookup::new(Arc::clone(&user_repository)));

        let state = AppState {
            user_service: Arc::new(UserService::new(
                user_repository,
                password_hasher.clone(),
            )),
            post_service: Arc::new(PostService::new(post_repository)),
            authenticator: Arc::new(Authenticator::new(
                Arc::clone(&credential_lookup),
                password_hasher,
            )),
            identity_resolver: Arc::new(IdentityResolver::new(
                credential_lookup,
                Arc::clone(&jwt_handler),
            )),
            token_issuer: jwt_handler,
            token_ttl: chrono::Duration::minutes(30),
        };

        let router = create_router(state);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            jwt_handler: JwtHandler::new(TEST_SECRET),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(&format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(&format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Helper to make PATCH request with Bearer token
    pub fn patch_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .patch(&format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Helper to make DELETE request with Bearer token
    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .delete(&format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Register a user and return the `data` object of the response
    pub async fn register(&self, name: &str, email: &str, password: &str) -> Value {
        let response = self
            .post("/api/users")
            .json(&json!({ "name": name, "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let body: Value = response.json().await.expect("Failed to parse response");
        body["data"].clone()
    }

    /// Submit the token form
    pub async fn login(&self, email: &str, password: &str) -> reqwest::Response {
        self.post("/token")
            .form(&[("username", email), ("password", password)])
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Log in and return the access token
    pub async fn token_for(&self, email: &str, password: &str) -> String {
        let response = self.login(email, password).await;
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: Value = response.json().await.expect("Failed to parse response");
        body["access_token"]
            .as_str()
            .expect("Missing access_token")
            .to_string()
    }
}

/// Shared tables; removing a user drops their posts like the foreign key does
#[derive(Default)]
pub struct Store {
    users: Vec<User>,
    posts: Vec<Post>,
}

pub struct InMemoryUserRepository(Arc<Mutex<Store>>);

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut store = self.0.lock().unwrap();
        if store.users.iter().any(|u| u.email == user.email) {
            return Err(UserError::EmailAlreadyExists(user.email.to_string()));
        }
        store.users.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        let store = self.0.lock().unwrap();
        Ok(store.users.iter().find(|u| u.id == *id).cloned())
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError> {
        let store = self.0.lock().unwrap();
        Ok(store.users.iter().find(|u| u.email == *email).cloned())
    }

    async fn list(&self, page: Page) -> Result<Vec<User>, UserError> {
        let store = self.0.lock().unwrap();
        Ok(store
            .users
            .iter()
            .skip(page.skip as usize)
            .take(page.limit as usize)
            .cloned()
            .collect())
    }

    async fn update(&self, user: User) -> Result<User, UserError> {
        let mut store = self.0.lock().unwrap();
        if store
            .users
            .iter()
            .any(|u| u.email == user.email && u.id != user.id)
        {
            return Err(UserError::EmailAlreadyExists(user.email.to_string()));
        }
        let slot = store
            .users
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or_else(|| UserError::NotFound(user.id.to_string()))?;
        *slot = user.clone();
        Ok(user)
    }

    async fn delete(&self, id: &UserId) -> Result<(), UserError> {
        let mut store = self.0.lock().unwrap();
        let before = store.users.len();
        store.users.retain(|u| u.id != *id);
        if store.users.len() == before {
            return Err(UserError::NotFound(id.to_string()));
        }
        store.posts.retain(|p| p.owner_id != *id);
        Ok(())
    }
}

pub struct InMemoryPostRepository(Arc<Mutex<Store>>);

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn create(&self, post: Post) -> Result<Post, PostError> {
        self.0.lock().unwrap().posts.push(post.clone());
        Ok(post)
    }

    async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, PostError> {
        let store = self.0.lock().unwrap();
        Ok(store.posts.iter().find(|p| p.id == *id).cloned())
    }

    async fn list_by_owner(&self, owner_id: &UserId) -> Result<Vec<Post>, PostError> {
        let store = self.0.lock().unwrap();
        // Newest first: later inserts come first
        Ok(store
            .posts
            .iter()
            .rev()
            .filter(|p| p.owner_id == *owner_id)
            .cloned()
            .collect())
    }

    async fn update(&self, post: Post) -> Result<Post, PostError> {
        let mut store = self.0.lock().unwrap();
        let slot = store
            .posts
            .iter_mut()
            .find(|p| p.id == post.id)
            .ok_or(PostError::NotFound(post.id))?;
        *slot = post.clone();
        Ok(post)
    }

    async fn delete(&self, id: &PostId) -> Result<(), PostError> {
        let mut store = self.0.lock().unwrap();
        let before = store.posts.len();
        store.posts.retain(|p| p.id != *id);
        if store.posts.len() == before {
            return Err(PostError::NotFound(*id));
        }
        Ok(())
    }
}
