use serde::Serialize;

use crate::config::FilterConfig;

/// Page selection passed alongside a filter to the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
}

impl Pagination {
    /// Page falls back to 1 when missing or unparsable and never goes below 1.
    /// Limit falls back to the configured default and is capped at the configured max.
    pub fn from_params(page: Option<&str>, limit: Option<&str>, config: &FilterConfig) -> Self {
        let page = page
            .and_then(|p| p.trim().parse::<i64>().ok())
            .unwrap_or(1)
            .clamp(1, u32::MAX as i64) as u32;

        let requested = limit
            .and_then(|l| l.trim().parse::<i64>().ok())
            .filter(|l| *l >= 1)
            .unwrap_or(config.default_limit as i64);

        let max_limit = config.max_limit.unwrap_or(u32::MAX) as i64;
        let limit = if requested > max_limit {
            if config.debug_logging {
                tracing::warn!("Limit {} exceeds max {}, capping to max", requested, max_limit);
            }
            max_limit
        } else {
            requested
        };

        Self {
            page,
            limit: limit.clamp(1, u32::MAX as i64) as u32,
        }
    }

    pub fn offset(&self) -> u64 {
        (self.page as u64 - 1) * self.limit as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> FilterConfig {
        FilterConfig {
            default_limit: 10,
            max_limit: Some(100),
            debug_logging: false,
        }
    }

    #[test]
    fn page_defaults_and_clamps() {
        let cfg = config();
        assert_eq!(Pagination::from_params(None, None, &cfg).page, 1);
        assert_eq!(Pagination::from_params(Some("abc"), None, &cfg).page, 1);
        assert_eq!(Pagination::from_params(Some("0"), None, &cfg).page, 1);
        assert_eq!(Pagination::from_params(Some("-4"), None, &cfg).page, 1);
        assert_eq!(Pagination::from_params(Some("3"), None, &cfg).page, 3);
    }

    #[test]
    fn limit_defaults_and_caps() {
        let cfg = config();
        assert_eq!(Pagination::from_params(None, None, &cfg).limit, 10);
        assert_eq!(Pagination::from_params(None, Some("0"), &cfg).limit, 10);
        assert_eq!(Pagination::from_params(None, Some("25"), &cfg).limit, 25);
        assert_eq!(Pagination::from_params(None, Some("5000"), &cfg).limit, 100);
    }

    #[test]
    fn offset_follows_page() {
        let p = Pagination { page: 3, limit: 20 };
        assert_eq!(p.offset(), 40);
    }
}
