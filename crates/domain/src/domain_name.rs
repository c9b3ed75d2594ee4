use crate::DomainError;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

const MAX_LABEL_LEN: usize = 63;
const MAX_WIRE_LEN: usize = 255;

/// A fully-qualified domain name held as its labels, leftmost first.
///
/// The root label is implicit: `example.com` and `example.com.` parse to the
/// same value, and `.` parses to the root name with no labels. Equality and
/// hashing ignore ASCII case, display keeps the case the name arrived with.
#[derive(Debug, Clone, Eq)]
pub struct DomainName {
    labels: Vec<String>,
}

impl DomainName {
    pub fn root() -> Self {
        Self { labels: Vec::new() }
    }

    pub fn parse(input: &str) -> Result<Self, DomainError> {
        let trimmed = input.trim();
        let without_root = trimmed.strip_suffix('.').unwrap_or(trimmed);

        if without_root.is_empty() {
            return Ok(Self::root());
        }

        let mut labels = Vec::new();
        let mut wire_len = 1;

        for label in without_root.split('.') {
            if label.is_empty() {
                return Err(DomainError::InvalidDomainName(format!(
                    "'{}' contains an empty label",
                    input
                )));
            }
            if label.len() > MAX_LABEL_LEN {
                return Err(DomainError::InvalidDomainName(format!(
                    "label '{}' exceeds {} bytes",
                    label, MAX_LABEL_LEN
                )));
            }
            if label.chars().any(|c| c.is_whitespace() || c.is_control()) {
                return Err(DomainError::InvalidDomainName(format!(
                    "label '{}' contains whitespace or control characters",
                    label
                )));
            }
            wire_len += label.len() + 1;
            labels.push(label.to_string());
        }

        if wire_len > MAX_WIRE_LEN {
            return Err(DomainError::InvalidDomainName(format!(
                "'{}' exceeds {} bytes in wire format",
                input, MAX_WIRE_LEN
            )));
        }

        Ok(Self { labels })
    }

    pub fn is_root(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn label_count(&self) -> usize {
        self.labels.len()
    }

    /// Labels in walk order: TLD first, host label last.
    pub fn labels_outermost_first(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().rev().map(String::as_str)
    }

    /// The name formed by the `count` outermost labels.
    ///
    /// For `www.example.com`, `ancestor_with(1)` is `com.` and
    /// `ancestor_with(2)` is `example.com.`. Counts past the label count
    /// return the whole name.
    pub fn ancestor_with(&self, count: usize) -> DomainName {
        let keep = count.min(self.labels.len());
        let skip = self.labels.len() - keep;
        Self {
            labels: self.labels[skip..].to_vec(),
        }
    }

    /// Uncompressed, lowercased wire form as used in DS digests and RRSIG
    /// signed data.
    pub fn to_wire_canonical(&self) -> Vec<u8> {
        let mut wire = Vec::with_capacity(self.wire_len());
        for label in &self.labels {
            wire.push(label.len() as u8);
            wire.extend(label.bytes().map(|b| b.to_ascii_lowercase()));
        }
        wire.push(0);
        wire
    }

    fn wire_len(&self) -> usize {
        self.labels.iter().map(|l| l.len() + 1).sum::<usize>() + 1
    }
}

impl PartialEq for DomainName {
    fn eq(&self, other: &Self) -> bool {
        self.labels.len() == other.labels.len()
            && self
                .labels
                .iter()
                .zip(&other.labels)
                .all(|(a, b)| a.eq_ignore_ascii_case(b))
    }
}

impl Hash for DomainName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for label in &self.labels {
            label.to_ascii_lowercase().hash(state);
        }
        self.labels.len().hash(state);
    }
}

impl fmt::Display for DomainName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.labels.is_empty() {
            return f.write_str(".");
        }
        for label in &self.labels {
            write!(f, "{}.", label)?;
        }
        Ok(())
    }
}

impl FromStr for DomainName {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
