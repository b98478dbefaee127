use reqwest::blocking::Client;
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;

use crate::calendar::MonthIndex;
use crate::config::Config;
use crate::counts::{CountsBody, PostCounts};
use crate::error::{Error, Result};
use crate::events::Event;

/// Blocking client for the feed's count-lookup endpoint.
pub struct CountApi {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl CountApi {
    pub fn new(base_url: &str, token: Option<&str>, timeout: std::time::Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(CountApi {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
            token: token.map(str::to_owned),
        })
    }

    /// `None` if no base URL is configured; the calendar then renders
    /// without activity counts.
    pub fn from_config(config: &Config) -> Result<Option<Self>> {
        match &config.api.base_url {
            Some(base_url) => {
                if config.api.token.is_none() {
                    log::warn!("count API configured without a token, requests may be rejected");
                }
                CountApi::new(base_url, config.api.token.as_deref(), config.api_timeout())
                    .map(Some)
            }
            None => Ok(None),
        }
    }

    fn month_url(&self, month: &MonthIndex) -> String {
        format!(
            "{}/posts/calendar?year={}&month={}",
            self.base_url,
            month.year(),
            month.number()
        )
    }

    /// One count lookup. Non-success statuses, transport failures and
    /// malformed bodies all surface as errors; the caller decides how to
    /// degrade.
    pub fn fetch_month(&self, month: &MonthIndex) -> Result<PostCounts> {
        let mut request = self.client.get(self.month_url(month));

        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::from_status(status.as_u16()));
        }

        let body: CountsBody = response.json()?;
        Ok(body.into())
    }
}

/// Seam between the pane and wherever its counts come from. Answers are
/// delivered as `Event::CountsLoaded`, stamped with the generation of the
/// request they belong to.
pub trait CountSource {
    fn request(&self, month: MonthIndex, generation: u64, sink: &mpsc::Sender<Event>);
}

/// Fetches counts on a worker thread; the event loop never blocks on
/// the network.
pub struct HttpCountSource {
    api: Arc<CountApi>,
}

impl HttpCountSource {
    pub fn new(api: CountApi) -> Self {
        HttpCountSource { api: Arc::new(api) }
    }
}

impl CountSource for HttpCountSource {
    fn request(&self, month: MonthIndex, generation: u64, sink: &mpsc::Sender<Event>) {
        let api = Arc::clone(&self.api);
        let sink = sink.clone();

        thread::spawn(move || {
            let counts = match api.fetch_month(&month) {
                Ok(counts) => counts,
                Err(err) => {
                    log::warn!(
                        "count lookup for {}-{:02} failed: {}",
                        month.year(),
                        month.number(),
                        err
                    );
                    PostCounts::empty()
                }
            };

            // Receiver may be gone by the time the fetch finishes
            let _ = sink.send(Event::CountsLoaded {
                month,
                generation,
                counts,
            });
        });
    }
}

/// Answers every request immediately with a fixed mapping. Used when no
/// API is configured and by tests.
pub struct StaticCountSource {
    counts: PostCounts,
}

impl StaticCountSource {
    pub fn new(counts: PostCounts) -> Self {
        StaticCountSource { counts }
    }

    pub fn empty() -> Self {
        StaticCountSource::new(PostCounts::empty())
    }
}

impl CountSource for StaticCountSource {
    fn request(&self, month: MonthIndex, generation: u64, sink: &mpsc::Sender<Event>) {
        let _ = sink.send(Event::CountsLoaded {
            month,
            generation,
            counts: self.counts.clone(),
        });
    }
}
