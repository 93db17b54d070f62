//! Chrome session: logging in and rendering workout pages.

use std::{
    sync::Arc,
    thread::sleep,
    time::{Duration, Instant},
};

use anyhow::bail;
use headless_chrome::{Browser, LaunchOptions, Tab};
use log::{debug, info, trace, warn};
use truecoach_scraping_utils::credentials::Credentials;
use url::Url;

use crate::{collector::PageSource, config::NetworkIdleConfig};

pub const EMAIL_INPUT: &str = r#"input[type="email"]"#;
pub const PASSWORD_INPUT: &str = r#"input[type="password"]"#;
pub const SUBMIT_BUTTON: &str = r#"button[type="submit"]"#;

/// The browser is shut down when it has seen no activity for this long.
const BROWSER_IDLE_TIMEOUT: Duration = Duration::from_secs(600);

/// `-1` until the document has loaded, then the number of finished resource loads.
///
/// The resource-timing buffer holds 250 entries by default; past that the
/// count would freeze and a busy page would look idle.
const IDLE_PROBE: &str = "(() => { \
    if (!window.__idleProbeBuffer) { \
        performance.setResourceTimingBufferSize(1000000); \
        window.__idleProbeBuffer = true; \
    } \
    return document.readyState === 'complete' \
        ? performance.getEntriesByType('resource').length : -1; \
})()";

/// A textarea's value is not part of the serialized document; copy it in.
const SYNC_TEXTAREAS: &str =
    "document.querySelectorAll('textarea').forEach(t => { t.textContent = t.value; })";

pub struct BrowserOptions {
    pub headless: bool,
    pub port: Option<u16>,
}

pub fn launch(options: &BrowserOptions) -> anyhow::Result<Browser> {
    info!("Starting Chrome (headless: {})", options.headless);
    let launch_options = LaunchOptions::default_builder()
        .headless(options.headless)
        .port(options.port)
        .window_size(Some((1280, 1600)))
        .idle_browser_timeout(BROWSER_IDLE_TIMEOUT)
        .build()?;
    Browser::new(launch_options)
}

/// One tab of the browser.  Tabs of the same browser share the session cookie.
pub struct BrowserTab {
    tab: Arc<Tab>,
    network_idle: NetworkIdleConfig,
}

impl BrowserTab {
    pub fn open(browser: &Browser, network_idle: NetworkIdleConfig) -> anyhow::Result<Self> {
        let tab = browser.new_tab()?;
        tab.set_default_timeout(network_idle.timeout());
        Ok(Self { tab, network_idle })
    }

    pub fn login(&self, login_url: &Url, credentials: &Credentials) -> anyhow::Result<()> {
        info!("Logging in as {}", credentials.email);
        self.goto(login_url)?;
        self.tab
            .wait_for_element(EMAIL_INPUT)?
            .type_into(credentials.email.as_ref())?;
        self.tab
            .wait_for_element(PASSWORD_INPUT)?
            .type_into(credentials.password.as_ref())?;
        self.tab.wait_for_element(SUBMIT_BUTTON)?.click()?;
        self.tab.wait_until_navigated()?;
        self.wait_for_network_idle()?;

        let landed = self.tab.get_url();
        if landed.starts_with(login_url.as_str()) {
            warn!("Still on {landed} after submitting the login form.");
            warn!("The session is probably not logged in; pages will be scraped blank.");
        } else {
            info!("Logged in; landed on {landed}");
        }
        Ok(())
    }

    fn goto(&self, url: &Url) -> anyhow::Result<()> {
        self.tab.navigate_to(url.as_str())?;
        self.tab.wait_until_navigated()?;
        self.wait_for_network_idle()
    }

    fn wait_for_network_idle(&self) -> anyhow::Result<()> {
        let config = self.network_idle;
        let started = Instant::now();
        let mut tracker = IdleTracker::new(config.idle());
        loop {
            let finished = self
                .tab
                .evaluate(IDLE_PROBE, false)?
                .value
                .and_then(|value| value.as_i64());
            trace!("Finished resource loads: {finished:?}");
            if tracker.observe(finished, Instant::now()) {
                debug!("Network idle after {:?}", started.elapsed());
                return Ok(());
            }
            if started.elapsed() >= config.timeout() {
                bail!("Network did not become idle within {:?}", config.timeout());
            }
            sleep(config.poll());
        }
    }
}

impl PageSource for BrowserTab {
    fn load(&self, url: &Url) -> anyhow::Result<String> {
        self.goto(url)?;
        self.tab.evaluate(SYNC_TEXTAREAS, false)?;
        self.tab.get_content()
    }
}

/// Decides network idleness from successive probe results: the document
/// must be loaded and the count of finished loads unchanged for `idle`.
#[derive(Debug)]
struct IdleTracker {
    idle: Duration,
    last: Option<(i64, Instant)>,
}

impl IdleTracker {
    fn new(idle: Duration) -> Self {
        Self { idle, last: None }
    }

    fn observe(&mut self, finished: Option<i64>, now: Instant) -> bool {
        let Some(finished) = finished.filter(|&count| count >= 0) else {
            self.last = None;
            return false;
        };
        match self.last {
            Some((count, since)) if count == finished => now.duration_since(since) >= self.idle,
            _ => {
                self.last = Some((finished, now));
                false
            }
        }
    }
}
