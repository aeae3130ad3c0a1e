use serde::{Deserialize, Serialize};

/// Site family an application URL belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Linkedin,
    Indeed,
    Company,
}

impl Platform {
    pub const ALL: [Platform; 3] = [Platform::Linkedin, Platform::Indeed, Platform::Company];

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Linkedin => "linkedin",
            Platform::Indeed => "indeed",
            Platform::Company => "company",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a URL by host substring. Anything unrecognised is a company career site.
pub fn classify(url: &str) -> Platform {
    let host = host_of(url);

    if host.contains("linkedin.") || host.contains("lnkd.in") {
        Platform::Linkedin
    } else if host.contains("indeed.") {
        Platform::Indeed
    } else {
        Platform::Company
    }
}

/// Lowercased host portion of a URL, tolerating a missing scheme
fn host_of(url: &str) -> String {
    let trimmed = url.trim();
    let without_scheme = match trimmed.find("://") {
        Some(pos) => &trimmed[pos + 3..],
        None => trimmed,
    };
    let end = without_scheme.find(['/', '?', '#']).unwrap_or(without_scheme.len());
    let authority = &without_scheme[..end];
    // Drop credentials and port
    let host = authority.rsplit('@').next().unwrap_or(authority);
    let host = host.split(':').next().unwrap_or(host);
    host.to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_known_hosts() {
        assert_eq!(classify("https://www.linkedin.com/jobs/view/123"), Platform::Linkedin);
        assert_eq!(classify("https://uk.indeed.com/viewjob?jk=abc"), Platform::Indeed);
        assert_eq!(classify("https://www.Indeed.com/job/1"), Platform::Indeed);
    }

    #[test]
    fn test_classify_fallback_company() {
        assert_eq!(classify("https://boards.greenhouse.io/acme/jobs/1"), Platform::Company);
        assert_eq!(classify("https://jobs.lever.co/acme/123"), Platform::Company);
        assert_eq!(classify(""), Platform::Company);
    }

    #[test]
    fn test_classify_ignores_path_mentions() {
        // Only the host decides
        assert_eq!(classify("https://careers.acme.com/from/linkedin.com"), Platform::Company);
        assert_eq!(classify("https://acme.com/?ref=indeed.com"), Platform::Company);
    }

    #[test]
    fn test_classify_without_scheme() {
        assert_eq!(classify("linkedin.com/jobs/view/9"), Platform::Linkedin);
        assert_eq!(classify("user@www.indeed.com:443/x"), Platform::Indeed);
    }
}
