//! Tool implementations for the flat filesystem MCP server.

use crate::FlatfsServer;
use crate::error::Op;
use crate::ops::{self, LineWindow};
use crate::validate::Root;
use rmcp::{
    handler::server::wrapper::Parameters,
    schemars::{self, JsonSchema},
    tool, tool_router,
};
use serde::Deserialize;

/// Parameters for reading a text file.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct ReadTextFileParams {
    /// Name of the file inside the root directory. Directory components are ignored.
    pub filename: String,
    /// Return only the first N lines. Takes precedence over `tail`.
    pub head: Option<i64>,
    /// Return only the last N lines.
    pub tail: Option<i64>,
}

/// Parameters for writing a file.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct WriteFileParams {
    /// Name of the file inside the root directory. Directory components are ignored.
    pub filename: String,
    /// Content to write to the file.
    pub content: String,
}

/// Parameters for searching files.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct SearchFilesParams {
    /// Glob pattern to match (e.g. "*.txt" or "**/*.rs").
    pub pattern: String,
}

/// Parameters for getting file info.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetFileInfoParams {
    /// Name of the file or directory inside the root directory.
    pub name: String,
}

#[tool_router]
impl FlatfsServer {
    /// Create a new server confined to `root`.
    pub fn new(root: Root) -> Self {
        Self {
            root,
            tool_router: Self::tool_router(),
        }
    }

    /// Read a text file, optionally only its first or last lines.
    #[tool(
        description = "Read a text file from the root directory. Use head or tail to return only the first or last N lines"
    )]
    async fn read_text_file(
        &self,
        Parameters(params): Parameters<ReadTextFileParams>,
    ) -> Result<String, String> {
        let window = LineWindow::new(params.head, params.tail);
        ops::read_text_file(&self.root, &params.filename, window)
            .await
            .map_err(|e| Op::ReadFile.report(&e))
    }

    /// Create or overwrite a file.
    #[tool(description = "Create a new file or overwrite an existing file in the root directory")]
    async fn write_file(
        &self,
        Parameters(params): Parameters<WriteFileParams>,
    ) -> Result<String, String> {
        ops::write_file(&self.root, &params.filename, &params.content)
            .await
            .map_err(|e| Op::WriteFile.report(&e))
    }

    /// List files directly inside the root.
    #[tool(description = "List the files directly inside the root directory")]
    async fn list_files(&self) -> Result<String, String> {
        ops::list_files(&self.root)
            .await
            .map_err(|e| Op::ListFiles.report(&e))
    }

    /// Recursively search for files matching a glob pattern.
    #[tool(
        description = "Recursively search the root directory for files whose name matches a glob pattern"
    )]
    async fn search_files(
        &self,
        Parameters(params): Parameters<SearchFilesParams>,
    ) -> Result<String, String> {
        ops::search_files(&self.root, &params.pattern)
            .await
            .map_err(|e| Op::SearchFiles.report(&e))
    }

    /// Get metadata about a file or directory.
    #[tool(description = "Get detailed metadata about a file or directory in the root directory")]
    async fn get_file_info(
        &self,
        Parameters(params): Parameters<GetFileInfoParams>,
    ) -> Result<String, String> {
        ops::get_file_info(&self.root, &params.name)
            .await
            .map_err(|e| Op::GetFileInfo.report(&e))
    }

    /// Report the root directory this server is confined to.
    #[tool(description = "Get the root directory that this server is confined to")]
    async fn get_root_directory(&self) -> String {
        self.root.path().display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn server() -> (tempfile::TempDir, FlatfsServer) {
        let dir = tempfile::tempdir().unwrap();
        let root = Root::open(dir.path()).unwrap();
        (dir, FlatfsServer::new(root))
    }

    #[test]
    fn registers_all_tools() {
        let (_dir, server) = server();
        let mut names: Vec<String> = server
            .tool_router
            .list_all()
            .into_iter()
            .map(|t| t.name.to_string())
            .collect();
        names.sort();
        assert_eq!(
            names,
            [
                "get_file_info",
                "get_root_directory",
                "list_files",
                "read_text_file",
                "search_files",
                "write_file",
            ]
        );
    }

    #[tokio::test]
    async fn read_missing_reports_error_text() {
        let (_dir, server) = server();
        let err = server
            .read_text_file(Parameters(ReadTextFileParams {
                filename: "missing.txt".into(),
                head: None,
                tail: None,
            }))
            .await
            .unwrap_err();
        assert!(err.starts_with("Error reading file:"));
        assert!(err.contains("not found"));
    }

    #[tokio::test]
    async fn head_wins_over_tail() {
        let (dir, server) = server();
        fs::write(dir.path().join("five.txt"), "1\n2\n3\n4\n5").unwrap();
        let out = server
            .read_text_file(Parameters(ReadTextFileParams {
                filename: "five.txt".into(),
                head: Some(2),
                tail: Some(2),
            }))
            .await
            .unwrap();
        assert_eq!(out, "1\n2");
    }

    #[tokio::test]
    async fn write_reports_original_name() {
        let (dir, server) = server();
        let out = server
            .write_file(Parameters(WriteFileParams {
                filename: "nested/dir/out.txt".into(),
                content: "hello".into(),
            }))
            .await
            .unwrap();
        assert_eq!(out, "Successfully wrote to nested/dir/out.txt");
        assert_eq!(fs::read_to_string(dir.path().join("out.txt")).unwrap(), "hello");
    }

    #[tokio::test]
    async fn write_degenerate_name_reports_error_text() {
        let (_dir, server) = server();
        let err = server
            .write_file(Parameters(WriteFileParams {
                filename: "../".into(),
                content: "x".into(),
            }))
            .await
            .unwrap_err();
        assert!(err.starts_with("Error writing file: "));
    }

    #[tokio::test]
    async fn sentinels_are_plain_results() {
        let (_dir, server) = server();
        assert_eq!(server.list_files().await.unwrap(), "No files found");
        let out = server
            .search_files(Parameters(SearchFilesParams {
                pattern: "*.txt".into(),
            }))
            .await
            .unwrap();
        assert_eq!(out, "No matches found");
    }

    #[tokio::test]
    async fn bad_pattern_reports_error_text() {
        let (_dir, server) = server();
        let err = server
            .search_files(Parameters(SearchFilesParams {
                pattern: "[".into(),
            }))
            .await
            .unwrap_err();
        assert!(err.starts_with("Error searching files: invalid pattern"));
    }

    #[tokio::test]
    async fn info_missing_reports_error_text() {
        let (_dir, server) = server();
        let err = server
            .get_file_info(Parameters(GetFileInfoParams {
                name: "nope".into(),
            }))
            .await
            .unwrap_err();
        assert!(err.starts_with("Error getting file info: "));
        assert!(err.contains("not found"));
    }

    #[tokio::test]
    async fn reports_canonical_root() {
        let (dir, server) = server();
        let out = server.get_root_directory().await;
        assert_eq!(out, dir.path().canonicalize().unwrap().display().to_string());
    }
}
