/// Settings applied to every chart surface the host creates.
#[derive(Debug, Clone)]
pub struct WebViewConfig {
    /// Whether to enable dev tools.
    pub devtools: bool,
    /// Custom user agent string. `None` keeps the engine default.
    pub user_agent: Option<String>,
    pub clipboard: bool,
    pub autoplay: bool,
    /// Step applied by zoom in / zoom out.
    pub zoom_step: f64,
    /// Shell background painted before the first frame.
    pub background: Option<(u8, u8, u8)>,
}

impl Default for WebViewConfig {
    fn default() -> Self {
        Self {
            devtools: cfg!(debug_assertions),
            user_agent: None,
            clipboard: true,
            autoplay: true,
            zoom_step: 0.1,
            background: None,
        }
    }
}
