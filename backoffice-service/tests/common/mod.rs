use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::Authenticator;
use auth::JwtHandler;
use backoffice_service::domain::auth::service::AuthService;
use backoffice_service::domain::user::models::NewUser;
use backoffice_service::domain::user::models::User;
use backoffice_service::domain::user::models::UserId;
use backoffice_service::domain::user::ports::UserRepository;
use backoffice_service::domain::user::service::ProfileService;
use backoffice_service::inbound::http::router::create_router;
use backoffice_service::user::errors::RepositoryError;
use chrono::Utc;
use serde_json::json;
use serde_json::Value;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub repository: Arc<InMemoryUserRepository>,
    /// Client that keeps cookies between requests
    pub api_client: reqwest::Client,
    /// Client without a cookie store, for hand-built headers
    pub bare_client: reqwest::Client,
    pub jwt_handler: JwtHandler,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let address = format!("http://{}", listener.local_addr().unwrap());

        let repository = Arc::new(InMemoryUserRepository::default());
        let authenticator = Arc::new(Authenticator::new(JWT_SECRET));

        let auth_service = Arc::new(AuthService::new(
            Arc::clone(&repository),
            Arc::clone(&authenticator),
        ));
        let profile_service = Arc::new(ProfileService::new(
            Arc::clone(&repository),
            Arc::clone(&authenticator),
        ));

        let router = create_router(auth_service, profile_service);

        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            repository,
            api_client: reqwest::Client::builder()
                .cookie_store(true)
                .build()
                .expect("Failed to create reqwest client"),
            bare_client: reqwest::Client::new(),
            jwt_handler: JwtHandler::new(JWT_SECRET),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(self.url(path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(self.url(path))
    }

    /// Helper to make PUT request
    pub fn put(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.put(self.url(path))
    }

    /// Helper to make GET request with Bearer token and no cookies
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.bare_client.get(self.url(path)).bearer_auth(token)
    }

    /// Helper to make PUT request with Bearer token and no cookies
    pub fn put_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.bare_client.put(self.url(path)).bearer_auth(token)
    }

    /// Register a user through the API and return the session body
    pub async fn register(&self, first_name: &str, email: &str, password: &str) -> Value {
        let response = self
            .post("/api/register")
            .json(&json!({
                "first_name": first_name,
                "last_name": "Doe",
                "email": email,
                "password": password,
                "confirm_password": password
            }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), reqwest::StatusCode::OK);
        response.json().await.expect("Failed to parse response")
    }
}

/// User storage kept in memory, with the same uniqueness and soft-delete
/// rules as the Postgres adapter.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserRepository {
    fn update<F>(&self, id: UserId, acting_user_id: UserId, apply: F) -> Result<User, RepositoryError>
    where
        F: FnOnce(&mut User),
    {
        let mut users = self.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|u| u.id == id && u.deleted_at.is_none())
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))?;

        apply(user);
        user.updated_by = Some(acting_user_id);
        user.updated_at = Some(Utc::now());
        Ok(user.clone())
    }

    fn email_taken(users: &[User], email: &str, except: Option<UserId>) -> bool {
        users
            .iter()
            .any(|u| u.email == email && u.deleted_at.is_none() && Some(u.id) != except)
    }

    pub fn soft_delete(&self, id: UserId) {
        let mut users = self.users.lock().unwrap();
        if let Some(user) = users.iter_mut().find(|u| u.id == id) {
            user.deleted_by = Some(id);
            user.deleted_at = Some(Utc::now());
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, RepositoryError> {
        let mut users = self.users.lock().unwrap();
        if Self::email_taken(&users, &user.email, None) {
            return Err(RepositoryError::EmailAlreadyExists(user.email));
        }

        let created = User {
            // Id 1 is the system user.
            id: UserId(users.len() as u64 + 2),
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            hashed_password: user.hashed_password,
            role_id: user.role_id,
            created_by: user.created_by,
            created_at: Utc::now(),
            updated_by: None,
            updated_at: None,
            deleted_by: None,
            deleted_at: None,
        };
        users.push(created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let users = self.users.lock().unwrap();
        Ok(users
            .iter()
            .find(|u| u.id == id && u.deleted_at.is_none())
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        let users = self.users.lock().unwrap();
        Ok(users
            .iter()
            .find(|u| u.email == email && u.deleted_at.is_none())
            .cloned())
    }

    async fn update_info(
        &self,
        id: UserId,
        first_name: &str,
        last_name: &str,
        acting_user_id: UserId,
    ) -> Result<User, RepositoryError> {
        self.update(id, acting_user_id, |user| {
            user.first_name = first_name.to_string();
            user.last_name = last_name.to_string();
        })
    }

    async fn update_password(
        &self,
        id: UserId,
        hashed_password: &str,
        acting_user_id: UserId,
    ) -> Result<User, RepositoryError> {
        self.update(id, acting_user_id, |user| {
            user.hashed_password = hashed_password.to_string();
        })
    }

    async fn update_email(
        &self,
        id: UserId,
        email: &str,
        acting_user_id: UserId,
    ) -> Result<User, RepositoryError> {
        {
            let users = self.users.lock().unwrap();
            if Self::email_taken(&users, email, Some(id)) {
                return Err(RepositoryError::EmailAlreadyExists(email.to_string()));
            }
        }

        self.update(id, acting_user_id, |user| {
            user.email = email.to_string();
        })
    }
}
