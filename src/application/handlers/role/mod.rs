//! Role command and query handlers.

mod create_role;
mod queries;
mod update_role;

pub use create_role::{CreateRoleCommand, CreateRoleHandler, CreateRoleResult};
pub use queries::{
    DeleteRoleCommand, DeleteRoleHandler, GetAllRolesHandler, GetRoleHandler, GetRoleQuery,
};
pub use update_role::{
    AssignPermissionHandler, RemovePermissionHandler, RolePermissionCommand, UpdateRoleCommand,
    UpdateRoleHandler,
};
