// Matching and cleanup of individual search results

use crate::models::Profile;
use crate::search::OrganicResult;

/// URL fragment that marks a LinkedIn personal profile
pub const LINKEDIN_PROFILE_MARKER: &str = "linkedin.com/in/";

/// Suffix Google appends to LinkedIn page titles
const TITLE_SUFFIX: &str = " | LinkedIn";

/// Restrict a keyword search to one site path, e.g. `"cto site:linkedin.com/in/"`
pub fn build_query(keyword: &str, site_filter: &str) -> String {
    format!("{} site:{}", keyword, site_filter)
}

pub fn clean_name(title: &str) -> String {
    title.replace(TITLE_SUFFIX, "").trim().to_string()
}

pub fn is_profile_url(link: &str, site_filter: &str) -> bool {
    link.contains(site_filter)
}

impl Profile {
    pub fn from_result(result: &OrganicResult) -> Self {
        Self {
            name: clean_name(&result.title),
            url: result.link.clone(),
        }
    }
}
