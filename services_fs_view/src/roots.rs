//! Root catalog
//!
//! The tree has exactly one root: the base directory.

use core_types::{DocumentId, RootFlags};

/// MIME filter accepted by the root
pub const ANY_MIME_TYPE: &str = "*/*";

/// Supplies the human-facing title and icon of the hosting application
pub trait AppLabelProvider: Send + Sync {
    fn title(&self) -> String;
    fn icon(&self) -> Option<String>;
}

/// Label provider with fixed values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticLabels {
    pub title: String,
    pub icon: Option<String>,
}

impl StaticLabels {
    pub fn new(title: impl Into<String>, icon: Option<String>) -> Self {
        Self {
            title: title.into(),
            icon,
        }
    }
}

impl AppLabelProvider for StaticLabels {
    fn title(&self) -> String {
        self.title.clone()
    }

    fn icon(&self) -> Option<String> {
        self.icon.clone()
    }
}

/// Description of one root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootInfo {
    pub root_id: String,
    pub document_id: DocumentId,
    pub summary: String,
    pub flags: RootFlags,
    pub title: String,
    pub mime_types: String,
    pub icon: Option<String>,
}

/// Reports the single root of a document tree
pub struct RootCatalog {
    root: DocumentId,
    labels: Box<dyn AppLabelProvider>,
}

impl RootCatalog {
    pub fn new(root: DocumentId, labels: impl AppLabelProvider + 'static) -> Self {
        Self {
            root,
            labels: Box::new(labels),
        }
    }

    /// Lists the roots; always exactly one
    pub fn list_roots(&self) -> Vec<RootInfo> {
        let token = self.root.to_string();
        vec![RootInfo {
            root_id: token.clone(),
            document_id: self.root.clone(),
            summary: token,
            flags: RootFlags::local_tree(),
            title: self.labels.title(),
            mime_types: ANY_MIME_TYPE.to_string(),
            icon: self.labels.icon(),
        }]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_root() {
        let catalog = RootCatalog::new(
            DocumentId::root("com.example.app").unwrap(),
            StaticLabels::new("Example", Some("ic_launcher".to_string())),
        );

        let roots = catalog.list_roots();
        assert_eq!(roots.len(), 1);

        let root = &roots[0];
        assert_eq!(root.root_id, "com.example.app");
        assert_eq!(root.document_id.to_string(), "com.example.app");
        assert_eq!(root.summary, "com.example.app");
        assert_eq!(root.title, "Example");
        assert_eq!(root.mime_types, "*/*");
        assert_eq!(root.icon.as_deref(), Some("ic_launcher"));
        assert!(root.flags.contains(RootFlags::LOCAL_ONLY));
        assert!(root.flags.contains(RootFlags::SUPPORTS_CREATE));
    }

    struct CountingLabels;

    impl AppLabelProvider for CountingLabels {
        fn title(&self) -> String {
            "dynamic".to_string()
        }

        fn icon(&self) -> Option<String> {
            None
        }
    }

    #[test]
    fn test_labels_come_from_provider() {
        let catalog = RootCatalog::new(DocumentId::root("app").unwrap(), CountingLabels);
        let root = &catalog.list_roots()[0];
        assert_eq!(root.title, "dynamic");
        assert_eq!(root.icon, None);
    }
}
