pub mod config;
pub mod view;

pub use config::{AppConfig, BackgroundConfig, ColorConfig, ExportConfig, RecolorConfig, ViewerConfig};
pub use view::{
    ColorEntry, ColorRequest, ControllerView, GestureView, PageInfo, PagesResponse,
    PlacementView, PointerRequest, PointerResponse, SignatureResponse, TargetKind,
};
