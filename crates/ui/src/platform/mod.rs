mod webview;

pub use webview::{SurfaceCommand, WebviewBridge, WebviewEnvironment};
