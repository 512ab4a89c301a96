pub mod actor;
pub mod jwt;
pub mod middleware;

pub use actor::current_user;
pub use jwt::JwtUtils;
pub use middleware::AuthMiddleware;
