use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlacementError {
    #[error("no pages to place a signature on")]
    NoPages,

    #[error("page {index} does not exist (document has {count} pages)")]
    PageOutOfRange { index: usize, count: usize },
}
