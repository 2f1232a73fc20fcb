//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# Griffin Configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[window]
# title = "Griffin Tab Manager"
# width = 900              # >= 200
# height = 670             # >= 200
# background = "#1c1c1c"
# startup_mode = "windowed"   # windowed | maximized | fullscreen

[surfaces]
# Minutes a background tab may stay idle before its view is unloaded.
# 0 = never unload.
inactivity_timeout_minutes = 15   # 0-1440
# sweep_interval_secs = 60        # 5-3600
# user_agent = "Mozilla/5.0 ..."
# devtools = false

[bounds]
# debounce_ms = 350        # 0-2000
# min_visible_px = 10      # 1-100

[grid]
# gap = 4                  # 0-32
# primary_ratio = 0.6      # 0.1-0.9

[shell]
# url = "griffin://localhost/index.html"
# assets_dir = "/path/to/shell"

[logging]
# level = "griffin=info"
"##
    .to_string()
}
