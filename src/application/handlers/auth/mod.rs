//! Auth command handlers.

mod login;
mod logout;
mod refresh_session;

pub use login::{LoginCommand, LoginHandler, LoginResult};
pub use logout::{LogoutCommand, LogoutHandler};
pub use refresh_session::{RefreshSessionCommand, RefreshSessionHandler, RefreshSessionResult};
