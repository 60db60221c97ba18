//! Default TOML settings template with inline documentation comments.

/// Generate the default TOML settings content with comments.
pub(crate) fn default_config_toml() -> &'static str {
    r##"# SignalEdge settings
# Only override what you want to change -- missing fields use defaults.
# Secrets are never read from this file. Set GEMINI_API_KEY and
# INNGEST_EVENT_KEY in the environment (or a .env file) instead.

[gemini]
# model = "gemini-2.0-flash"
# max_tokens = 4096      # 1-65536
# temperature = 0.7      # 0.0-2.0
# base_url = "https://generativelanguage.googleapis.com/v1beta/models"

[events]
# base_url = "https://inn.gs"
# dev = false            # true uses http://localhost:8288
"##
}
