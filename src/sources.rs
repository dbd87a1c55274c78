use crate::types::{NewsSource, SourceKind, BATCH_SIZE, SOURCE_COUNT};

/// Built-in source table: 30 sources in 5 batches of 6. Google News
/// search feeds are Standard; direct WordPress feeds carry long HTML
/// bodies and get the larger capture window.
pub fn default_sources() -> Vec<NewsSource> {
    use SourceKind::{Standard, Wordpress};

    let sources = vec![
        // Batch 0
        NewsSource::new(
            "VALDOSTA DAILY",
            "https://news.google.com/rss/search?q=site:valdostadailytimes.com",
            Standard,
        ),
        NewsSource::new(
            "THOMASVILLE T-E",
            "https://news.google.com/rss/search?q=site:timesenterprise.com",
            Standard,
        ),
        NewsSource::new(
            "MOULTRIE OBS",
            "https://news.google.com/rss/search?q=site:moultrieobserver.com",
            Standard,
        ),
        NewsSource::new("TALLY REPORTS", "https://tallahasseereports.com/feed/", Wordpress),
        NewsSource::new("BAINBRIDGE POST", "https://thepostsearchlight.com/feed/", Wordpress),
        NewsSource::new("WAKULLA SUN", "https://thewakullasun.com/feed/", Wordpress),
        // Batch 1
        NewsSource::new("GREENE PUB", "https://www.greenepublishing.com/feed/", Wordpress),
        NewsSource::new(
            "APALACH TIMES",
            "https://news.google.com/rss/search?q=site:apalachicolatimes.com",
            Standard,
        ),
        NewsSource::new(
            "SUWANNEE DEM",
            "https://news.google.com/rss/search?q=site:suwanneedemocrat.com",
            Standard,
        ),
        NewsSource::new("HAVANA HERALD", "https://theherald.online/feed/", Wordpress),
        NewsSource::new(
            "WJHG NEWS 7",
            "https://news.google.com/rss/search?q=site:wjhg.com",
            Standard,
        ),
        NewsSource::new(
            "CNN",
            "https://news.google.com/rss/search?q=site:cnn.com",
            Standard,
        ),
        // Batch 2
        NewsSource::new(
            "USA TODAY",
            "https://news.google.com/rss/search?q=site:usatoday.com",
            Standard,
        ),
        NewsSource::new(
            "NBC NEWS",
            "https://news.google.com/rss/search?q=site:nbcnews.com",
            Standard,
        ),
        NewsSource::new(
            "ABC NEWS",
            "https://news.google.com/rss/search?q=site:abcnews.go.com",
            Standard,
        ),
        NewsSource::new(
            "NY POST",
            "https://news.google.com/rss/search?q=site:nypost.com",
            Standard,
        ),
        NewsSource::new(
            "CHRISTIAN SCI",
            "https://news.google.com/rss/search?q=site:csmonitor.com",
            Standard,
        ),
        NewsSource::new(
            "DAILY WIRE",
            "https://news.google.com/rss/search?q=site:dailywire.com",
            Standard,
        ),
        // Batch 3
        NewsSource::new(
            "NEWSWEEK",
            "https://news.google.com/rss/search?q=site:newsweek.com",
            Standard,
        ),
        NewsSource::new(
            "REUTERS",
            "https://news.google.com/rss/search?q=site:reuters.com",
            Standard,
        ),
        NewsSource::new(
            "ASSOC. PRESS",
            "https://news.google.com/rss/search?q=site:apnews.com",
            Standard,
        ),
        NewsSource::new("FLA POLITICS", "https://floridapolitics.com/feed/", Wordpress),
        NewsSource::new(
            "HUFFPOST",
            "https://news.google.com/rss/search?q=site:huffpost.com",
            Standard,
        ),
        NewsSource::new(
            "FOX NEWS",
            "https://news.google.com/rss/search?q=site:foxnews.com",
            Standard,
        ),
        // Batch 4
        NewsSource::new(
            "WSJ",
            "https://news.google.com/rss/search?q=site:wsj.com",
            Standard,
        ),
        NewsSource::new(
            "FORBES",
            "https://news.google.com/rss/search?q=site:forbes.com",
            Standard,
        ),
        NewsSource::new(
            "REASON",
            "https://news.google.com/rss/search?q=site:reason.com",
            Standard,
        ),
        NewsSource::new(
            "SKY NEWS",
            "https://news.google.com/rss/search?q=site:news.sky.com",
            Standard,
        ),
        NewsSource::new(
            "BBC NEWS",
            "https://news.google.com/rss/search?q=site:bbc.com",
            Standard,
        ),
        NewsSource::new(
            "POLITICO",
            "https://news.google.com/rss/search?q=site:politico.com",
            Standard,
        ),
    ];

    debug_assert_eq!(sources.len(), SOURCE_COUNT);
    debug_assert_eq!(SOURCE_COUNT % BATCH_SIZE, 0);
    sources
}
