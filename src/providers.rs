//! Static provider descriptors.

use crate::extractor::Strategy;

/// A CDN provider publishing its IP ranges
#[derive(Debug, Clone, Copy)]
pub struct Provider {
    pub name: &'static str,
    /// Source URLs, fetched in order; extracted entries are concatenated
    pub urls: &'static [&'static str],
    pub strategy: Strategy,
}

/// Cloudflare publishes plain-text lists, one entry per line
pub const CLOUDFLARE: Provider = Provider {
    name: "cloudflare",
    urls: &[
        "https://www.cloudflare.com/ips-v4",
        "https://www.cloudflare.com/ips-v6",
    ],
    strategy: Strategy::Pattern,
};

/// Gcore publishes a JSON document with v4 and v6 address arrays
pub const GCORE: Provider = Provider {
    name: "gcore",
    urls: &["https://api.gcore.com/cdn/public-ip-list"],
    strategy: Strategy::Structured {
        fields: &["addresses", "addresses_v6"],
    },
};
