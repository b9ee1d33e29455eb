//! MCP server providing flat file tools confined to one root directory.
//!
//! Client-supplied names are reduced to a single path segment and resolved
//! against the root chosen at startup, so every operation targets a direct
//! child of that root. Errors are returned as one line of text of the form
//! `Error <verb>ing <noun>: <message>`.

use rmcp::{
    ServerHandler,
    handler::server::router::tool::ToolRouter,
    model::{Implementation, ServerCapabilities, ServerInfo},
    tool_handler,
};
pub mod error;
pub mod info;
pub mod ops;
pub mod tools;
pub mod validate;

pub use validate::Root;

/// MCP flat filesystem server bound to a single root directory.
#[derive(Debug, Clone)]
pub struct FlatfsServer {
    pub(crate) root: Root,
    pub(crate) tool_router: ToolRouter<Self>,
}

#[tool_handler]
impl ServerHandler for FlatfsServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "wmcp-flatfs".into(),
                title: Some("Walrus MCP Flat Filesystem Server".into()),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            instructions: Some(
                "Flat file server confined to one root directory. File names are reduced to \
                 their final segment; subdirectories cannot be addressed."
                    .into(),
            ),
        }
    }
}
