// src/crawl/normalize.rs
// =============================================================================
// Turns discovered address fragments into absolute addresses.
//
// Pages link to other pages in three shapes we care about:
//   https://example.com/a   - already absolute, left alone
//   //cdn.example.com/a     - protocol-relative, borrows the seed's scheme
//   /a                      - root-relative, borrows the seed's scheme + host
//
// The scheme and host always come from the FIRST address in the queue (the
// "origin"), never from the page the fragment was found on.
//
// Rust concepts:
// - Url: parsing the seed to read its scheme/host
// - Option combinators: map / unwrap_or for the lenient fallbacks
// =============================================================================

use url::Url;

// Scheme used when the first seed has none
pub const DEFAULT_SCHEME: &str = "http";

// The scheme and host every relative address is resolved against
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Origin {
    pub scheme: String,
    pub host: String,
}

impl Origin {
    // Derives the origin from a seed address
    //
    // Lenient on purpose: a seed like "example.com/start" has no scheme, so
    // it is retried as "http://example.com/start". If even that fails the
    // host is left empty.
    //
    // Non-default ports are kept as part of the host ("localhost:8080").
    pub fn from_seed(seed: &str) -> Self {
        let parsed = Url::parse(seed)
            .ok()
            .filter(|url| url.has_host())
            .or_else(|| Url::parse(&format!("{}://{}", DEFAULT_SCHEME, seed)).ok());

        match parsed {
            Some(url) => {
                let host = match (url.host_str(), url.port()) {
                    (Some(host), Some(port)) => format!("{}:{}", host, port),
                    (Some(host), None) => host.to_string(),
                    (None, _) => String::new(),
                };
                Origin {
                    scheme: url.scheme().to_string(),
                    host,
                }
            }
            None => Origin {
                scheme: DEFAULT_SCHEME.to_string(),
                host: String::new(),
            },
        }
    }
}

// Converts an address to absolute form using the origin
//
// Anything that is neither protocol-relative nor root-relative is returned
// unchanged, malformed input included.
pub fn normalize(address: &str, origin: &Origin) -> String {
    if address.starts_with("//") {
        format!("{}:{}", origin.scheme, address)
    } else if address.starts_with('/') {
        format!("{}://{}{}", origin.scheme, origin.host, address)
    } else {
        address.to_string()
    }
}
