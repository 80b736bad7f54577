//! CLI command implementations.
//!
//! - `parse`: parse a display name into an identifier
//! - `list`: enumerate and sort a directory
//! - `attrs`: attribute flags of an item
//! - `name`: compose a display name
//! - `bind`: the class an item binds to
//! - `handler`: resolve a type handler
//! - `icon`: icon location
//! - `rename`: rename an item
//! - `columns`: the column table
//! - `registry`: import, set and block registry entries
//! - `devices`: list device interfaces
//! - `completions`: shell completion scripts

pub mod attrs;
pub mod bind;
pub mod columns;
pub mod completions;
pub mod devices;
pub mod handler;
pub mod icon;
pub mod list;
pub mod name;
pub mod parse;
pub mod registry;
pub mod rename;

pub use attrs::AttrsCommand;
pub use bind::BindCommand;
pub use columns::ColumnsCommand;
pub use completions::CompletionsCommand;
pub use devices::DevicesCommand;
pub use handler::HandlerCommand;
pub use icon::IconCommand;
pub use list::ListCommand;
pub use name::NameCommand;
pub use parse::ParseCommand;
pub use registry::RegistryCommand;
pub use rename::RenameCommand;
