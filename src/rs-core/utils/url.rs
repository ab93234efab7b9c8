use std::fmt::Display;

/// Abstraction allowing to help with the handling of URLs
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Url {
    inner: String,
}

impl Url {
    pub fn new(url: String) -> Self {
        Self { inner: url }
    }

    /// Build an absolute `Url` from a base (which may or may not include a scheme) and path
    /// segments, each joined by exactly one `/`.
    ///
    /// `default_scheme` is only used when `base` is not already an absolute URL.
    pub fn from_base_and_segments(base: &str, default_scheme: &str, segments: &[&str]) -> Self {
        let base = base.trim_end_matches('/');
        let mut inner = if is_absolute_url(base.as_bytes()) {
            base.to_owned()
        } else {
            format!("{}://{}", default_scheme, base.trim_start_matches('/'))
        };
        for segment in segments {
            inner.push('/');
            inner.push_str(segment.trim_matches('/'));
        }
        Url { inner }
    }

    pub fn take(self) -> String {
        self.inner
    }

    pub fn get_ref(&self) -> &str {
        self.inner.as_str()
    }

    pub fn is_absolute(&self) -> bool {
        is_absolute_url(self.inner.as_bytes())
    }
}

impl Display for Url {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.get_ref())
    }
}

fn is_absolute_url(bytes: &[u8]) -> bool {
    let mut offset = 0;
    loop {
        if bytes.len() < offset + 1 {
            return false;
        }
        if bytes[offset].is_ascii_alphabetic() {
            offset += 1;
            continue;
        } else if bytes[offset] == b':' {
            if offset == 0 {
                return false;
            }
            offset += 1;
            break;
        } else {
            return false;
        }
    }

    if bytes.len() < offset + 2 {
        false
    } else {
        &bytes[offset..offset + 2] == b"//"
    }
}
