use std::sync::Arc;

use url::Url;

use crate::error::ExpandResult;
use crate::syntax::SyntaxTree;

/// Supplies syntax trees for documents.
///
/// Implementations must hand out a tree built from exactly `revision` of the
/// document, or fail with `RevisionMismatch`; when no tree can be produced they
/// fail with `Unparseable`.
pub trait SyntaxModel {
    fn root_node(&self, uri: &Url, revision: i32) -> ExpandResult<Arc<SyntaxTree>>;
}
