use crate::errors::{Error, Result};

/// Something that can show the authorization URL to the user.
pub trait Launcher {
    fn open(&self, url: &str) -> Result<()>;
}

/// Opens URLs in the system default browser.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemBrowser;

impl Launcher for SystemBrowser {
    fn open(&self, url: &str) -> Result<()> {
        webbrowser::open(url).map_err(|e| Error::BrowserLaunch(e.to_string()))
    }
}
