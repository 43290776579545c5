//! World boundaries download pipeline.
//!
//! Uses channel-based communication to bridge the async fetch with egui's
//! synchronous update loop.

use super::LoadResult;
use eframe::egui;
use std::sync::mpsc::{channel, Receiver, Sender};

/// Channel-based loader for the world boundaries document.
///
/// The fetch is async but egui's update() is synchronous. Results are
/// passed back to the UI thread through this channel, tagged with the
/// generation of the request that produced them.
pub struct WorldLoadChannel {
    sender: Sender<(u64, LoadResult)>,
    receiver: Receiver<(u64, LoadResult)>,
}

impl Default for WorldLoadChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl WorldLoadChannel {
    pub fn new() -> Self {
        let (sender, receiver) = channel();
        Self { sender, receiver }
    }

    /// Spawns a browser fetch of the dataset.
    #[cfg(target_arch = "wasm32")]
    pub fn load(&self, ctx: egui::Context, generation: u64, url: String, object_name: String) {
        let sender = self.sender.clone();

        wasm_bindgen_futures::spawn_local(async move {
            let body = fetch_text(&url).await;
            let _ = sender.send((generation, super::resolve(body, &object_name)));
            ctx.request_repaint();
        });
    }

    /// Native fetch on a worker thread.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(&self, ctx: egui::Context, generation: u64, url: String, object_name: String) {
        let sender = self.sender.clone();

        std::thread::spawn(move || {
            let body = fetch_text(&url);
            let _ = sender.send((generation, super::resolve(body, &object_name)));
            ctx.request_repaint();
        });
    }

    /// Non-blocking check for a completed load.
    pub fn try_recv(&self) -> Option<(u64, LoadResult)> {
        self.receiver.try_recv().ok()
    }
}

/// Fetches a text document with the browser's fetch API.
#[cfg(target_arch = "wasm32")]
async fn fetch_text(url: &str) -> Result<String, String> {
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;

    let window = web_sys::window().ok_or("No window")?;
    log::info!("Fetching world boundaries: {}", url);

    let response = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| format!("Fetch failed: {:?}", e))?;
    let response: web_sys::Response = response
        .dyn_into()
        .map_err(|_| "Fetch did not return a Response".to_string())?;

    if !response.ok() {
        return Err(format!("HTTP {}", response.status()));
    }

    let text = response
        .text()
        .map_err(|e| format!("Failed to read body: {:?}", e))?;
    let text = JsFuture::from(text)
        .await
        .map_err(|e| format!("Failed to read body: {:?}", e))?;

    text.as_string()
        .ok_or_else(|| "Response body was not text".to_string())
}

/// Fetches a text document with a blocking HTTP client.
#[cfg(not(target_arch = "wasm32"))]
fn fetch_text(url: &str) -> Result<String, String> {
    log::info!("Fetching world boundaries: {}", url);

    let client = reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(30))
        .build()
        .map_err(|e| format!("HTTP client error: {}", e))?;

    let response = client
        .get(url)
        .send()
        .map_err(|e| format!("Fetch failed: {}", e))?;

    if !response.status().is_success() {
        return Err(format!("HTTP {}", response.status()));
    }

    response
        .text()
        .map_err(|e| format!("Failed to read body: {}", e))
}
