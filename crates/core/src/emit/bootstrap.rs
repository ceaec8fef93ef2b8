//! `queries-base.ts`: the axios instance every request function uses.
//!
//! Written once; later runs leave an existing file alone so local edits
//! (a development token, interceptors) survive regeneration.

use super::BANNER_RULE;
use super::ts::{Emit, TsImport, TsModule};
use crate::config::BootstrapConfig;
use crate::openapi::naming::escape_js_string;

pub fn emit_bootstrap(config: &BootstrapConfig) -> String {
    let base_url = format!(
        "export const baseUrl =\n  import.meta.env.{} || \"{}\";\n",
        config.base_url_env,
        escape_js_string(&config.default_base_url)
    );

    let token = format!(
        "// Platform token inside Telegram, otherwise a fallback for local development\n\
         const rawToken = isTMA()\n  ? tgToken\n  : // Paste a development token here\n    \"\";\n\n\
         export const token = rawToken ? `{} ${{rawToken}}` : \"\";\n",
        config.auth_scheme.replace('`', "")
    );

    let instance = "export const axiosInstance: AxiosInstance = axios.create({\n  \
                    baseURL: baseUrl,\n  \
                    headers: {\n    \
                    \"Content-Type\": \"application/json\",\n    \
                    Accept: \"application/json\",\n    \
                    ...(token ? { Authorization: token } : {}),\n  \
                    },\n\
                    });\n"
        .to_string();

    TsModule {
        header: vec![
            BANNER_RULE.to_string(),
            "API client setup".to_string(),
            "This file is NOT overwritten when the API code is regenerated".to_string(),
            BANNER_RULE.to_string(),
        ],
        imports: vec![
            TsImport::named(["AxiosInstance"], "axios").with_default("axios"),
            TsImport::named(["isTMA", "tgToken"], &config.token_module),
        ],
        items: vec![base_url, token, instance],
    }
    .emit()
}
