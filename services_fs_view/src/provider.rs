//! Host-facing provider
//!
//! Combines the document tree and the root catalog and renders their
//! results as projected rows.

use crate::operations::{DocumentOperations, OperationError};
use crate::projection::{ResultSet, DOCUMENT_COLUMNS, ROOT_COLUMNS};
use crate::roots::{AppLabelProvider, RootCatalog, RootInfo};
use crate::service::{DocumentTreeService, TreeConfig};
use fs_view::Document;

/// Document tree plus root catalog, answering row queries
pub struct DocumentsProvider {
    tree: DocumentTreeService,
    roots: RootCatalog,
}

impl DocumentsProvider {
    /// Creates the provider, creating the base directory if it is missing
    pub fn new(
        config: TreeConfig,
        labels: impl AppLabelProvider + 'static,
    ) -> Result<Self, OperationError> {
        let tree = DocumentTreeService::new(config)?;
        let roots = RootCatalog::new(tree.root_id().clone(), labels);
        Ok(Self { tree, roots })
    }

    /// The underlying document operations
    pub fn tree(&self) -> &DocumentTreeService {
        &self.tree
    }

    pub fn roots(&self) -> &RootCatalog {
        &self.roots
    }

    /// Root rows
    pub fn query_roots(&self, projection: Option<&[&str]>) -> ResultSet {
        let mut set = ResultSet::new(projection, ROOT_COLUMNS);
        for root in self.roots.list_roots() {
            add_root_row(&mut set, root);
        }
        set
    }

    /// A single document row
    pub fn query_document(
        &self,
        id: &str,
        projection: Option<&[&str]>,
    ) -> Result<ResultSet, OperationError> {
        let doc = self.tree.stat_document(id)?;
        let mut set = ResultSet::new(projection, DOCUMENT_COLUMNS);
        add_document_row(&mut set, doc);
        Ok(set)
    }

    /// One row per direct child of `parent_id`
    pub fn query_child_documents(
        &self,
        parent_id: &str,
        projection: Option<&[&str]>,
    ) -> Result<ResultSet, OperationError> {
        let children = self.tree.list_children(parent_id)?;
        let mut set = ResultSet::new(projection, DOCUMENT_COLUMNS);
        for doc in children {
            add_document_row(&mut set, doc);
        }
        Ok(set)
    }
}

fn add_root_row(set: &mut ResultSet, root: RootInfo) {
    set.new_row()
        .add("root_id", root.root_id)
        .add("document_id", root.document_id.to_string())
        .add("summary", root.summary)
        .add("flags", root.flags.bits())
        .add("title", root.title)
        .add("mime_types", root.mime_types)
        .add("icon", root.icon);
}

fn add_document_row(set: &mut ResultSet, doc: Document) {
    set.new_row()
        .add("document_id", doc.id.to_string())
        .add("display_name", doc.display_name)
        .add("size", doc.size)
        .add("mime_type", doc.mime_type)
        .add("last_modified", doc.last_modified)
        .add("flags", doc.flags.bits());
}
