//! User command and query handlers.

mod assign_roles;
mod create_user;
mod delete_user;
mod queries;
mod update_user;

pub use assign_roles::{AssignRolesCommand, AssignRolesHandler};
pub use create_user::{CreateUserCommand, CreateUserHandler, CreateUserResult};
pub use delete_user::{DeleteUserCommand, DeleteUserHandler};
pub use queries::{
    GetAllUsersHandler, GetUserHandler, GetUserQuery, GetUserRolesHandler, GetUserRolesQuery,
};
pub use update_user::{UpdateUserCommand, UpdateUserHandler, UpdateUserResult};
