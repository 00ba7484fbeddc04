pub mod errors;
pub mod gate;
pub mod models;
pub mod ports;
pub mod service;

pub use errors::AuthError;
pub use models::Identity;
pub use models::LoginResponse;
pub use ports::AuthServicePort;
pub use service::AuthService;
