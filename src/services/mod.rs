pub mod intake;
pub mod pdf;
pub mod renderer;
pub mod session;
pub mod writer;

pub use intake::{FileKind, SignatureIntake};
pub use renderer::{PageRenderer, PdfPageRenderer, RenderedPage};
pub use session::{ExportGate, ExportGuard, ExportJob, PreviewJob, SigningSession};
pub use writer::{DocumentWriter, PdfStampWriter};
