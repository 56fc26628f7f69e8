//! Existence probes for candidate image URLs.

/// Answers whether a URL currently points at something.
pub trait ExistenceProbe: Send + Sync {
    /// Check if the URL exists. Errors count as non-existence.
    fn exists(&self, url: &str) -> bool;
}

impl<F> ExistenceProbe for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn exists(&self, url: &str) -> bool {
        self(url)
    }
}

/// Probe that reports every URL as missing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverExists;

impl ExistenceProbe for NeverExists {
    fn exists(&self, _url: &str) -> bool {
        false
    }
}

#[cfg(feature = "http")]
mod http {
    use super::ExistenceProbe;
    use crate::error::Result;
    use crate::resolve::ResolverOptions;
    use reqwest::blocking::Client;
    use reqwest::StatusCode;

    /// HEAD-request probe backed by a blocking reqwest client.
    ///
    /// Only `200 OK` counts as existing.
    #[derive(Debug, Clone)]
    pub struct HttpProbe {
        client: Client,
    }

    impl HttpProbe {
        /// Create a probe with default options.
        pub fn new() -> Result<Self> {
            Self::with_options(&ResolverOptions::default())
        }

        /// Create a probe with custom timeout and User-Agent.
        pub fn with_options(options: &ResolverOptions) -> Result<Self> {
            let client = Client::builder()
                .user_agent(options.user_agent.clone())
                .timeout(options.timeout)
                .build()?;
            Ok(Self::from_client(client))
        }

        /// Wrap an existing client.
        pub fn from_client(client: Client) -> Self {
            Self { client }
        }
    }

    impl ExistenceProbe for HttpProbe {
        fn exists(&self, url: &str) -> bool {
            match self.client.head(url).send() {
                Ok(response) => {
                    let status = response.status();
                    log::debug!("HEAD {} -> {}", url, status);
                    status == StatusCode::OK
                }
                Err(e) => {
                    log::debug!("HEAD {} failed: {}", url, e);
                    false
                }
            }
        }
    }
}

#[cfg(feature = "http")]
pub use http::HttpProbe;
