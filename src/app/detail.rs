// src/app/detail.rs
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::Arc;

use tracing::{debug, info, warn};

use super::tmdb::{resolve_details, MetadataService};
use super::types::{DetailRecord, LookupMsg, OverlayState};

/// Owns the overlay state and drives title -> TMDB id -> details lookups.
///
/// Each `open()` gets a fresh token; a finished lookup is applied only if its token is
/// still the latest one, so a slow earlier request can never overwrite a newer one.
pub struct DetailPipeline {
    service: Arc<dyn MetadataService>,
    image_base: String,
    state: OverlayState,
    latest_token: u64,
    in_flight: usize,
    tx: Sender<LookupMsg>,
    rx: Receiver<LookupMsg>,
}

impl DetailPipeline {
    pub fn new(service: Arc<dyn MetadataService>, image_base: impl Into<String>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            service,
            image_base: image_base.into(),
            state: OverlayState::Hidden,
            latest_token: 0,
            in_flight: 0,
            tx,
            rx,
        }
    }

    pub fn state(&self) -> &OverlayState {
        &self.state
    }

    pub fn latest_token(&self) -> u64 {
        self.latest_token
    }

    pub fn has_in_flight(&self) -> bool {
        self.in_flight > 0
    }

    fn next_token(&mut self) -> u64 {
        self.latest_token += 1;
        self.latest_token
    }

    /// Show the loading overlay now and resolve `title` on a worker thread.
    pub fn open(&mut self, title: &str) -> u64 {
        let token = self.next_token();
        self.state = OverlayState::Loading {
            title: title.to_string(),
        };
        self.in_flight += 1;
        info!("detail lookup #{token} started for {title:?}");

        let service = Arc::clone(&self.service);
        let image_base = self.image_base.clone();
        let tx = self.tx.clone();
        let title = title.to_string();
        std::thread::spawn(move || {
            let result = resolve_details(service.as_ref(), &title)
                .map(|details| DetailRecord::from_tmdb(details, &image_base));
            let _ = tx.send(LookupMsg {
                token,
                title,
                result,
            });
        });

        token
    }

    /// Drain finished lookups. Returns true if the overlay state changed.
    pub fn poll(&mut self) -> bool {
        let mut changed = false;
        loop {
            match self.rx.try_recv() {
                Ok(msg) => changed |= self.apply(msg),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        changed
    }

    fn apply(&mut self, msg: LookupMsg) -> bool {
        self.in_flight = self.in_flight.saturating_sub(1);
        if msg.token != self.latest_token {
            debug!(
                "dropping stale lookup #{} for {:?} (latest is #{})",
                msg.token, msg.title, self.latest_token
            );
            return false;
        }
        self.state = match msg.result {
            Ok(record) => {
                info!("detail lookup #{} loaded {:?}", msg.token, record.title);
                OverlayState::Loaded(record)
            }
            Err(err) => {
                warn!("detail lookup #{} for {:?} failed: {err}", msg.token, msg.title);
                OverlayState::Errored(err.to_string())
            }
        };
        true
    }

    /// Hide the overlay from any state. Lookups still running are ignored when they land.
    pub fn close(&mut self) {
        if self.state.is_visible() || self.in_flight > 0 {
            self.next_token();
        }
        self.state = OverlayState::Hidden;
    }

    /// Skip both remote stages and show details the caller already has.
    pub fn show_direct(&mut self, record: DetailRecord) {
        self.next_token();
        self.state = OverlayState::Loaded(record);
    }

    #[cfg(test)]
    fn wait_one(&mut self, timeout: std::time::Duration) -> bool {
        match self.rx.recv_timeout(timeout) {
            Ok(msg) => {
                self.apply(msg);
                true
            }
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tmdb::{Genre, LookupError, MovieDetails, SearchCandidate};
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    const WAIT: Duration = Duration::from_secs(5);
    const BASE: &str = "https://image.tmdb.org/t/p/w500";

    #[derive(Default)]
    struct FakeTmdb {
        search_results: HashMap<String, Result<Vec<SearchCandidate>, LookupError>>,
        details: HashMap<u64, Result<MovieDetails, LookupError>>,
        slow_titles: HashMap<String, Duration>,
        search_calls: AtomicUsize,
        detail_calls: AtomicUsize,
    }

    impl FakeTmdb {
        fn with_movie(mut self, title: &str, id: u64, details: MovieDetails) -> Self {
            self.search_results.insert(
                title.to_string(),
                Ok(vec![SearchCandidate {
                    id,
                    title: Some(title.to_string()),
                }]),
            );
            self.details.insert(id, Ok(details));
            self
        }
    }

    impl MetadataService for FakeTmdb {
        fn search(&self, title: &str) -> Result<Vec<SearchCandidate>, LookupError> {
            self.search_calls.fetch_add(1, Ordering::SeqCst);
            if let Some(delay) = self.slow_titles.get(title) {
                std::thread::sleep(*delay);
            }
            self.search_results
                .get(title)
                .cloned()
                .unwrap_or_else(|| Ok(Vec::new()))
        }

        fn details(&self, id: u64) -> Result<MovieDetails, LookupError> {
            self.detail_calls.fetch_add(1, Ordering::SeqCst);
            self.details.get(&id).cloned().unwrap_or(Err(LookupError::Remote {
                status: 404,
                reason: "Not Found".into(),
            }))
        }
    }

    fn titled(title: &str) -> MovieDetails {
        MovieDetails {
            title: Some(title.to_string()),
            ..MovieDetails::default()
        }
    }

    fn pipeline(fake: FakeTmdb) -> (DetailPipeline, Arc<FakeTmdb>) {
        let fake = Arc::new(fake);
        let svc: Arc<dyn MetadataService> = fake.clone();
        (DetailPipeline::new(svc, BASE), fake)
    }

    fn loaded(p: &DetailPipeline) -> &DetailRecord {
        match p.state() {
            OverlayState::Loaded(rec) => rec,
            other => panic!("expected Loaded, got {other:?}"),
        }
    }

    #[test]
    fn open_is_loading_before_result_lands() {
        let (mut p, _) = pipeline(FakeTmdb::default().with_movie("X", 42, titled("X")));
        assert_eq!(p.state(), &OverlayState::Hidden);

        let token = p.open("X");
        assert_eq!(token, 1);
        assert_eq!(
            p.state(),
            &OverlayState::Loading {
                title: "X".to_string()
            }
        );
        assert!(p.has_in_flight());

        assert!(p.wait_one(WAIT));
        assert_eq!(loaded(&p).title, "X");
        assert!(!p.has_in_flight());
    }

    #[test]
    fn two_stage_lookup_builds_record() {
        let details = MovieDetails {
            title: Some("X".into()),
            vote_average: Some(8.0),
            genres: Some(Vec::<Genre>::new()),
            ..MovieDetails::default()
        };
        let (mut p, fake) = pipeline(FakeTmdb::default().with_movie("X", 42, details));
        p.open("X");
        assert!(p.wait_one(WAIT));

        let rec = loaded(&p);
        assert_eq!(rec.rating_text(), "8.0");
        assert_eq!(rec.genres_text(), "No genres available");
        assert_eq!(fake.search_calls.load(Ordering::SeqCst), 1);
        assert_eq!(fake.detail_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn empty_search_never_hits_detail_endpoint() {
        let (mut p, fake) = pipeline(FakeTmdb::default());
        p.open("Nobody Knows This Film");
        assert!(p.wait_one(WAIT));

        assert_eq!(
            p.state(),
            &OverlayState::Errored("Movie not found in TMDB database".into())
        );
        assert_eq!(fake.search_calls.load(Ordering::SeqCst), 1);
        assert_eq!(fake.detail_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn first_candidate_wins() {
        let mut fake = FakeTmdb::default();
        fake.search_results.insert(
            "Dragon".into(),
            Ok(vec![
                SearchCandidate { id: 7, title: None },
                SearchCandidate { id: 8, title: None },
            ]),
        );
        fake.details.insert(7, Ok(titled("Dragon (2025)")));
        fake.details.insert(8, Ok(titled("Dragon (1999)")));
        let (mut p, _) = pipeline(fake);
        p.open("Dragon");
        assert!(p.wait_one(WAIT));
        assert_eq!(loaded(&p).title, "Dragon (2025)");
    }

    #[test]
    fn remote_and_transport_failures_become_errored() {
        let mut fake = FakeTmdb::default();
        fake.search_results.insert(
            "Down".into(),
            Err(LookupError::Transport("connection refused".into())),
        );
        fake.search_results.insert(
            "Gone".into(),
            Ok(vec![SearchCandidate { id: 99, title: None }]),
        );
        let (mut p, fake) = pipeline(fake);

        p.open("Down");
        assert!(p.wait_one(WAIT));
        assert_eq!(p.state(), &OverlayState::Errored("connection refused".into()));

        p.open("Gone");
        assert!(p.wait_one(WAIT));
        assert_eq!(
            p.state(),
            &OverlayState::Errored("API Error: 404 - Not Found".into())
        );
        assert_eq!(fake.detail_calls.load(Ordering::SeqCst), 1);

        // errored -> loading again on a new request
        p.open("Gone");
        assert!(p.state().is_loading());
        assert!(p.wait_one(WAIT));
    }

    #[test]
    fn stale_result_is_dropped() {
        let mut fake = FakeTmdb::default()
            .with_movie("Slow", 1, titled("Slow"))
            .with_movie("Fast", 2, titled("Fast"));
        fake.slow_titles
            .insert("Slow".into(), Duration::from_millis(200));
        let (mut p, _) = pipeline(fake);

        let first = p.open("Slow");
        let second = p.open("Fast");
        assert!(second > first);
        assert_eq!(p.latest_token(), second);

        assert!(p.wait_one(WAIT));
        assert!(p.wait_one(WAIT));
        assert_eq!(loaded(&p).title, "Fast");
        assert!(!p.has_in_flight());
    }

    #[test]
    fn close_from_every_state() {
        let (mut p, _) = pipeline(FakeTmdb::default().with_movie("X", 42, titled("X")));

        p.close();
        assert_eq!(p.state(), &OverlayState::Hidden);

        p.open("X");
        p.close();
        assert_eq!(p.state(), &OverlayState::Hidden);
        // the lookup still lands, but must not reopen the overlay
        assert!(p.wait_one(WAIT));
        assert_eq!(p.state(), &OverlayState::Hidden);

        p.open("X");
        assert!(p.wait_one(WAIT));
        assert!(matches!(p.state(), OverlayState::Loaded(_)));
        p.close();
        assert_eq!(p.state(), &OverlayState::Hidden);

        p.open("missing");
        assert!(p.wait_one(WAIT));
        assert!(matches!(p.state(), OverlayState::Errored(_)));
        p.close();
        p.close();
        assert_eq!(p.state(), &OverlayState::Hidden);
    }

    #[test]
    fn show_direct_skips_remote_calls() {
        let (mut p, fake) = pipeline(FakeTmdb::default());
        let record = DetailRecord {
            title: "Madras Matinee".into(),
            overview: "An ageing writer.".into(),
            release_date: "Unknown".into(),
            genres: vec!["Drama".into()],
            rating: Some(9.0),
            poster_url: "https://example.org/p.jpg".into(),
        };
        p.show_direct(record.clone());
        assert_eq!(p.state(), &OverlayState::Loaded(record));
        assert_eq!(fake.search_calls.load(Ordering::SeqCst), 0);
        assert!(!p.poll());
    }

    #[test]
    fn poll_applies_finished_lookup() {
        let (mut p, _) = pipeline(FakeTmdb::default().with_movie("X", 42, titled("X")));
        p.open("X");
        let deadline = std::time::Instant::now() + WAIT;
        while !p.poll() {
            assert!(std::time::Instant::now() < deadline, "lookup never finished");
            std::thread::sleep(Duration::from_millis(5));
        }
        assert_eq!(loaded(&p).title, "X");
    }
}
