//! Document assembly and render-tree preparation

pub mod assemble;
pub mod temp_tree;
pub mod virtual_path;

pub use assemble::{
    PreparedDocument, assemble_document, load_css, load_document, load_document_from_source,
};
pub use temp_tree::{TempTree, prepare_render_tree};
pub use virtual_path::compute_document_virtual_path;
