//! Size and count limits for the tailer, rings and runtime

use std::num::NonZeroUsize;

nonzero_newtype! {
    /// A non-zero number of trailing lines to read per tail pass
    ///
    /// # Examples
    /// ```
    /// use gnb_monitor::types::TailLines;
    ///
    /// let lines = TailLines::new(100).unwrap();
    /// assert_eq!(lines.get(), 100);
    ///
    /// assert!(TailLines::new(0).is_none());
    /// ```
    pub struct TailLines(NonZeroUsize: usize);
}

impl TailLines {
    /// Default tail window
    pub const DEFAULT: Self = Self::literal(crate::constants::tail::DEFAULT_LINES);
}

impl Default for TailLines {
    fn default() -> Self {
        Self::DEFAULT
    }
}

nonzero_newtype! {
    /// A non-zero ring buffer capacity
    ///
    /// Used for the recent-events ring and the chart history ring.
    #[doc(alias = "history_size")]
    pub struct RingCapacity(NonZeroUsize: usize);
}

impl RingCapacity {
    /// Default recent-events capacity
    pub const EVENTS: Self = Self::literal(crate::constants::store::RECENT_EVENTS);

    /// Default chart history capacity
    pub const HISTORY: Self = Self::literal(crate::constants::store::HISTORY_POINTS);

    /// Call-flow message capacity
    pub const CALL_FLOW: Self = Self::literal(crate::constants::store::CALL_FLOW_MESSAGES);

    /// Error and warning log capacity
    pub const LOG_ENTRIES: Self = Self::literal(crate::constants::state::MAX_LOG_ENTRIES);
}

nonzero_newtype! {
    /// A non-zero thread count
    ///
    /// Ensures the runtime always has at least 1 worker thread.
    pub struct ThreadCount(NonZeroUsize: usize);
}

impl ThreadCount {
    /// Default thread count
    pub const DEFAULT: Self = Self::literal(1);

    /// Number of available CPU cores, falling back to 1
    #[must_use]
    pub fn from_available_parallelism() -> Self {
        Self(std::thread::available_parallelism().unwrap_or(NonZeroUsize::MIN))
    }
}

impl Default for ThreadCount {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl std::str::FromStr for ThreadCount {
    type Err = std::num::ParseIntError;

    /// `0` selects one thread per CPU core
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.parse::<usize>()?;
        Ok(Self::new(value).unwrap_or_else(Self::from_available_parallelism))
    }
}
