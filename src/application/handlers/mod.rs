//! Application handlers.
//!
//! One handler per use case. Each owns its ports behind `Arc<dyn _>` and
//! exposes a single `handle` method returning `Result<_, UseCaseError>`.

pub mod auth;
pub mod role;
pub mod user;

#[cfg(test)]
pub mod test_support;

pub use auth::{
    LoginCommand, LoginHandler, LoginResult, LogoutCommand, LogoutHandler,
    RefreshSessionCommand, RefreshSessionHandler, RefreshSessionResult,
};
pub use role::{
    AssignPermissionHandler, CreateRoleCommand, CreateRoleHandler, CreateRoleResult,
    DeleteRoleCommand, DeleteRoleHandler, GetAllRolesHandler, GetRoleHandler, GetRoleQuery,
    RemovePermissionHandler, RolePermissionCommand, UpdateRoleCommand, UpdateRoleHandler,
};
pub use user::{
    AssignRolesCommand, AssignRolesHandler, CreateUserCommand, CreateUserHandler,
    CreateUserResult, DeleteUserCommand, DeleteUserHandler, GetAllUsersHandler, GetUserHandler,
    GetUserQuery, GetUserRolesHandler, GetUserRolesQuery, UpdateUserCommand, UpdateUserHandler,
    UpdateUserResult,
};
