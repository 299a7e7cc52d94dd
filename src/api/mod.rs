pub mod document;
pub mod export;
pub mod headers;
pub mod pointer;
pub mod preview;
pub mod signature;

pub use document::{handle_pages, handle_upload_document, __path_handle_pages, __path_handle_upload_document};
pub use export::{handle_export, __path_handle_export};
pub use pointer::{
    handle_page_click, handle_placement, handle_pointer_down, handle_pointer_move,
    handle_pointer_up, __path_handle_page_click, __path_handle_placement,
    __path_handle_pointer_down, __path_handle_pointer_move, __path_handle_pointer_up,
};
pub use preview::{handle_preview, __path_handle_preview};
pub use signature::{
    handle_clear_signature, handle_colors, handle_set_color, handle_signature,
    handle_upload_signature, SignatureQuery, __path_handle_clear_signature, __path_handle_colors,
    __path_handle_set_color, __path_handle_signature, __path_handle_upload_signature,
};
