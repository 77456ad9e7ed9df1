//! Files under `assets/` compiled into the binary.

use std::{borrow::Cow, sync::OnceLock};

use rust_embed::RustEmbed;
use tracing::error;

#[derive(RustEmbed)]
#[folder = "assets"]
struct EmbeddedAssets;

const MAIN_CSS_PATH: &str = "main.css";
const FAVICON_PATH: &str = "favicon.svg";
const BUNDLED_DATASET_PATH: &str = "data/retail_sales.csv";

static MAIN_CSS: OnceLock<String> = OnceLock::new();
static FAVICON_DATA_URI: OnceLock<String> = OnceLock::new();
static BUNDLED_DATASET: OnceLock<Option<String>> = OnceLock::new();

/// Stylesheet for every page. Empty if the asset is missing.
pub fn main_css() -> &'static str {
    MAIN_CSS
        .get_or_init(|| embedded_text(MAIN_CSS_PATH).unwrap_or_default())
        .as_str()
}

pub fn favicon_data_uri() -> &'static str {
    FAVICON_DATA_URI
        .get_or_init(|| {
            embedded(FAVICON_PATH)
                .map(|bytes| format!("data:image/svg+xml;base64,{}", encode_base64(&bytes)))
                .unwrap_or_default()
        })
        .as_str()
}

/// The sales sample shipped with the app, or `None` if it is missing or not UTF-8.
pub fn bundled_dataset() -> Option<&'static str> {
    BUNDLED_DATASET
        .get_or_init(|| embedded_text(BUNDLED_DATASET_PATH))
        .as_deref()
}

fn embedded(path: &str) -> Option<Cow<'static, [u8]>> {
    let file = EmbeddedAssets::get(path);
    if file.is_none() {
        error!(asset = path, "embedded asset missing");
    }
    file.map(|file| file.data)
}

fn embedded_text(path: &str) -> Option<String> {
    let bytes = embedded(path)?;
    match String::from_utf8(bytes.into_owned()) {
        Ok(text) => Some(text),
        Err(_) => {
            error!(asset = path, "embedded asset is not valid UTF-8");
            None
        }
    }
}

fn encode_base64(input: &[u8]) -> String {
    const TABLE: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";
    let mut output = String::with_capacity(input.len().div_ceil(3) * 4);

    for chunk in input.chunks(3) {
        let word = chunk
            .iter()
            .enumerate()
            .fold(0u32, |acc, (idx, byte)| acc | (u32::from(*byte) << (16 - 8 * idx)));
        for slot in 0..4 {
            if slot <= chunk.len() {
                let index = (word >> (18 - 6 * slot)) & 0b11_1111;
                output.push(TABLE[index as usize] as char);
            } else {
                output.push('=');
            }
        }
    }

    output
}
