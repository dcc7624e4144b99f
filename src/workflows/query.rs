use url::form_urlencoded;

pub const NYAA_BASE_URL: &str = "https://nyaa.si/";
pub const RESOLUTION: &str = "1080p";
pub const EXCLUDE_BATCH: &str = "-batch";

/// Release groups in order of preference.
pub const SUBBERS: [&str; 5] = ["SubsPlease", "Erai-raws", "EMBER", "Anime Time", "A-L"];

// page=rss returns the feed instead of the HTML listing, c=1_2 is
// "Anime - English-translated".
const BASE_QUERY_PARAMS: [(&str, &str); 2] = [("page", "rss"), ("c", "1_2")];

/// Builds the feed search URL for one name and subber.
pub fn build_feed_url(name: &str, subber: &str) -> String {
    let query = format!("{name} {subber} {RESOLUTION} {EXCLUDE_BATCH}");

    let mut serializer = form_urlencoded::Serializer::new(String::new());
    serializer.append_pair("q", &query);
    for (key, value) in BASE_QUERY_PARAMS {
        serializer.append_pair(key, value);
    }

    format!("{NYAA_BASE_URL}?{}", serializer.finish())
}
