//! Phase 3: fold the flat file map into a folder/file hierarchy.

use std::collections::HashMap;

use crate::config::{FolderNode, ParsedFile, RepoNode};

/// Build the hierarchical view from the flat parsed-file map.
///
/// Files are processed in sorted-path order so folder creation order is
/// reproducible; intermediate folders are created on demand and reused by
/// exact path.
pub fn build_file_tree(files: &HashMap<String, ParsedFile>) -> FolderNode {
    let mut root = FolderNode {
        path: String::new(),
        children: Vec::new(),
    };

    let mut paths: Vec<&String> = files.keys().collect();
    paths.sort();

    for path in paths {
        let file = &files[path.as_str()];
        let segments: Vec<&str> = path.split('/').collect();

        let mut current = &mut root;
        let mut prefix = String::new();
        for segment in &segments[..segments.len() - 1] {
            if !prefix.is_empty() {
                prefix.push('/');
            }
            prefix.push_str(segment);
            current = find_or_create_folder(current, &prefix);
        }
        current.children.push(RepoNode::File(file.clone()));
    }

    root
}

fn find_or_create_folder<'a>(parent: &'a mut FolderNode, path: &str) -> &'a mut FolderNode {
    let idx = parent
        .children
        .iter()
        .position(|c| matches!(c, RepoNode::Folder(f) if f.path == path));
    let idx = match idx {
        Some(i) => i,
        None => {
            parent.children.push(RepoNode::Folder(FolderNode {
                path: path.to_string(),
                children: Vec::new(),
            }));
            parent.children.len() - 1
        }
    };
    match &mut parent.children[idx] {
        RepoNode::Folder(folder) => folder,
        RepoNode::File(_) => unreachable!("index points at a folder"),
    }
}
