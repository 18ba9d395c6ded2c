/// Phase definitions for a backup run
///
/// A run moves through its phases strictly in order. `Teardown` can be
/// entered from any phase so the renderer is released no matter where a
/// run stops.
use std::fmt;

/// Represents the current phase of a backup run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackupPhase {
    /// Blog identity is being extracted from the home page
    Init,

    /// Section navigation is being read
    DiscoverSections,

    /// Home feed and sections are being scrolled for post links
    CrawlListings,

    /// Discovered links are being merged into the worklist
    Deduplicate,

    /// Posts are being rendered and written one by one
    MaterializeEach,

    /// The run summary is being written
    Summarize,

    /// The pipeline finished
    Done,

    /// The renderer is being released
    Teardown,
}

impl BackupPhase {
    /// The phase that normally follows this one
    pub fn next(&self) -> Option<Self> {
        match self {
            Self::Init => Some(Self::DiscoverSections),
            Self::DiscoverSections => Some(Self::CrawlListings),
            Self::CrawlListings => Some(Self::Deduplicate),
            Self::Deduplicate => Some(Self::MaterializeEach),
            Self::MaterializeEach => Some(Self::Summarize),
            Self::Summarize => Some(Self::Done),
            Self::Done => Some(Self::Teardown),
            Self::Teardown => None,
        }
    }

    /// Returns true if the machine may move from this phase to `to`
    ///
    /// Only the next phase in order and `Teardown` are reachable.
    pub fn can_transition_to(&self, to: Self) -> bool {
        if *self == Self::Teardown {
            return false;
        }
        to == Self::Teardown || self.next() == Some(to)
    }

    /// Returns true once no further work will happen
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Teardown)
    }

    /// Short name used in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::DiscoverSections => "discover_sections",
            Self::CrawlListings => "crawl_listings",
            Self::Deduplicate => "deduplicate",
            Self::MaterializeEach => "materialize_each",
            Self::Summarize => "summarize",
            Self::Done => "done",
            Self::Teardown => "teardown",
        }
    }

    /// Returns all phases in run order
    pub fn all_phases() -> Vec<Self> {
        vec![
            Self::Init,
            Self::DiscoverSections,
            Self::CrawlListings,
            Self::Deduplicate,
            Self::MaterializeEach,
            Self::Summarize,
            Self::Done,
            Self::Teardown,
        ]
    }
}

impl fmt::Display for BackupPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
