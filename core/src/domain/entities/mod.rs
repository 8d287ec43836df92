//! Domain entities

pub mod lockout;
pub mod token;
pub mod user;

pub use lockout::FailedLoginState;
pub use token::{
    Claims, TokenPair, TokenType, ACCESS_TOKEN_TTL_SECONDS, REFRESH_TOKEN_TTL_SECONDS,
};
pub use user::UserAccount;
