// src/app/posters.rs
use std::collections::HashMap;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use eframe::egui as eg;
use reqwest::blocking::Client;
use tracing::{debug, warn};

use super::types::{PosterDone, PosterState, PosterView};

const RESIZE_MAX_W: u32 = 320;
const MAX_DONE_PER_FRAME: usize = 12;
const MAX_UPLOADS_PER_FRAME: usize = 4;

/// Background poster downloads plus the texture cache the grid and overlay paint from.
///
/// Failures are remembered per URL and only change what gets painted.
pub struct PosterStore {
    states: HashMap<String, PosterState>,
    upload_queue: Vec<String>,
    in_flight: usize,
    work_tx: Sender<String>,
    done_rx: Receiver<PosterDone>,
}

impl PosterStore {
    pub fn start(workers: usize, timeout: Duration) -> Result<Self, String> {
        let client = Client::builder()
            .user_agent(concat!("cinegrid/", env!("CARGO_PKG_VERSION"), " (posters)"))
            .timeout(timeout)
            .pool_max_idle_per_host(workers)
            .default_headers({
                use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
                let mut h = HeaderMap::new();
                h.insert(
                    ACCEPT,
                    HeaderValue::from_static("image/avif,image/webp,image/*;q=0.8,*/*;q=0.5"),
                );
                h
            })
            .build()
            .map_err(|e| format!("poster http client build failed: {e}"))?;
        let client = Arc::new(client);

        let (work_tx, work_rx) = mpsc::channel::<String>();
        let (done_tx, done_rx) = mpsc::channel::<PosterDone>();
        let work_rx = Arc::new(Mutex::new(work_rx));

        for _ in 0..workers.max(1) {
            let work_rx = Arc::clone(&work_rx);
            let done_tx = done_tx.clone();
            let client = Arc::clone(&client);

            std::thread::spawn(move || loop {
                let job = match work_rx.lock() {
                    Ok(rx) => rx.recv(),
                    Err(_) => break,
                };
                let Ok(url) = job else { break };
                let result = fetch_poster(&client, &url);
                if done_tx.send(PosterDone { url, result }).is_err() {
                    break;
                }
            });
        }

        Ok(Self {
            states: HashMap::new(),
            upload_queue: Vec::new(),
            in_flight: 0,
            work_tx,
            done_rx,
        })
    }

    pub fn has_in_flight(&self) -> bool {
        self.in_flight > 0 || !self.upload_queue.is_empty()
    }

    /// Current view of `url`, queueing a download the first time it is seen.
    pub fn view(&mut self, url: &str) -> PosterView {
        if url.is_empty() {
            return PosterView::Missing;
        }
        match self.states.get(url) {
            Some(PosterState::Ready(tex)) => PosterView::Ready(tex.clone()),
            Some(PosterState::Failed) => PosterView::Missing,
            Some(PosterState::Pending) | Some(PosterState::Decoded(_)) => PosterView::Loading,
            None => {
                if self.work_tx.send(url.to_string()).is_ok() {
                    self.in_flight += 1;
                    self.states.insert(url.to_string(), PosterState::Pending);
                    PosterView::Loading
                } else {
                    self.states.insert(url.to_string(), PosterState::Failed);
                    PosterView::Missing
                }
            }
        }
    }

    /// Drain finished downloads and upload a bounded number of textures.
    pub fn poll(&mut self, ctx: &eg::Context) {
        let mut drained = 0usize;
        while drained < MAX_DONE_PER_FRAME {
            match self.done_rx.try_recv() {
                Ok(done) => {
                    drained += 1;
                    self.in_flight = self.in_flight.saturating_sub(1);
                    match done.result {
                        Ok(decoded) => {
                            self.states
                                .insert(done.url.clone(), PosterState::Decoded(decoded));
                            self.upload_queue.push(done.url);
                        }
                        Err(e) => {
                            debug!("poster failed {}: {e}", done.url);
                            self.states.insert(done.url, PosterState::Failed);
                        }
                    }
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    warn!("poster workers exited");
                    break;
                }
            }
        }

        let take = self.upload_queue.len().min(MAX_UPLOADS_PER_FRAME);
        for url in self.upload_queue.drain(..take).collect::<Vec<_>>() {
            if let Some(PosterState::Decoded(decoded)) = self.states.remove(&url) {
                let tex = super::gfx::upload_rgba(ctx, &decoded, &url);
                self.states.insert(url, PosterState::Ready(tex));
            }
        }

        if drained > 0 || take > 0 {
            ctx.request_repaint();
        }
    }
}

fn fetch_poster(client: &Client, url: &str) -> Result<super::types::DecodedPoster, String> {
    let bytes = client
        .get(url)
        .send()
        .and_then(|r| r.error_for_status())
        .and_then(|r| r.bytes())
        .map_err(|e| format!("download: {e}"))?;
    super::gfx::decode_poster(&bytes, RESIZE_MAX_W)
}
