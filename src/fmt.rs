use crate::Url;
use core::fmt;

impl fmt::Debug for Url {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Url")
            .field("protocol", &self.protocol())
            .field("user", &self.user())
            .field("host", &self.host())
            .field("port", &self.port())
            .field("path", &self.path())
            .field("query", &self.query_string())
            .field("fragment", &self.fragment())
            .field("normalized", &self.normalized_url())
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Url {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.normalized_url(), f)
    }
}
