//! Wire types for the custom selection methods and the mapping of
//! [`ExpandError`] onto JSON-RPC errors.

use serde::{Deserialize, Serialize};
use tower_lsp_server::jsonrpc::{Error, ErrorCode};
use tower_lsp_server::ls_types::{Range, TextDocumentIdentifier};

use crate::error::ExpandError;

/// Method name of the one-step expansion request
pub const EXPAND_SELECTION_METHOD: &str = "selection/expand";
/// Method name of the shrink request
pub const SHRINK_SELECTION_METHOD: &str = "selection/shrink";

/// LSP `ContentModified`
const CONTENT_MODIFIED: i64 = -32801;
/// LSP `RequestFailed`
const REQUEST_FAILED: i64 = -32803;

/// Params of `selection/expand` and `selection/shrink`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionParams {
    pub text_document: TextDocumentIdentifier,
    pub range: Range,
}

/// Convert an expansion failure into the JSON-RPC error sent to the client.
pub fn to_jsonrpc_error(err: ExpandError) -> Error {
    let code = match &err {
        ExpandError::OutOfRange { .. } => ErrorCode::InvalidParams,
        ExpandError::RevisionMismatch { .. } => ErrorCode::ServerError(CONTENT_MODIFIED),
        ExpandError::Unparseable { .. } => ErrorCode::ServerError(REQUEST_FAILED),
        ExpandError::Config { .. } | ExpandError::Io(_) => ErrorCode::InternalError,
    };

    Error {
        code,
        message: err.to_string().into(),
        data: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tower_lsp_server::ls_types::Position;

    #[rstest]
    #[case::out_of_range(ExpandError::out_of_range("line 9"), ErrorCode::InvalidParams)]
    #[case::unknown_document(
        ExpandError::unknown_document("file:///a.java"),
        ErrorCode::InvalidParams
    )]
    #[case::revision_mismatch(
        ExpandError::revision_mismatch(1, 2),
        ErrorCode::ServerError(-32801)
    )]
    #[case::unparseable(ExpandError::unparseable("no tree"), ErrorCode::ServerError(-32803))]
    #[case::config(ExpandError::config("bad"), ErrorCode::InternalError)]
    fn test_error_codes(#[case] err: ExpandError, #[case] expected: ErrorCode) {
        let message = err.to_string();
        let rpc = to_jsonrpc_error(err);
        assert_eq!(rpc.code, expected);
        assert_eq!(rpc.message, message);
    }

    #[test]
    fn test_selection_params_wire_format() {
        let params: SelectionParams = serde_json::from_value(serde_json::json!({
            "textDocument": { "uri": "file:///a.java" },
            "range": {
                "start": { "line": 1, "character": 2 },
                "end": { "line": 3, "character": 4 }
            }
        }))
        .unwrap();

        assert_eq!(params.text_document.uri.as_str(), "file:///a.java");
        assert_eq!(
            params.range,
            Range::new(Position::new(1, 2), Position::new(3, 4))
        );
    }
}
